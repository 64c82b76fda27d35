const INITIAL: u64 = 0x2545_F491_4F6C_DD1D;

/// Incremental state hash: the hash of the empty ordering folded with every placed slide id
/// by XOR. Orderings of the same slides hash alike, and so can other unrelated orderings.
#[derive(Eq, PartialEq, Clone, Copy, Debug)]
pub struct Zobrist {
    hash: u64,
}

impl Zobrist {
    pub fn initial() -> Self {
        Zobrist { hash: INITIAL }
    }

    pub fn place_slide(&self, slide_id: usize) -> Self {
        Zobrist {
            hash: self.hash ^ slide_id as u64,
        }
    }

    pub fn state_hash(&self) -> u64 {
        self.hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_of_placement_does_not_matter() {
        let left = Zobrist::initial().place_slide(3).place_slide(5);
        let right = Zobrist::initial().place_slide(5).place_slide(3);

        assert_eq!(left, right);
        assert_ne!(left, Zobrist::initial().place_slide(3));
    }

    #[test]
    fn test_unrelated_sets_can_collide() {
        // 1 ^ 2 == 3
        let left = Zobrist::initial().place_slide(1).place_slide(2);
        let right = Zobrist::initial().place_slide(3);

        assert_eq!(left.state_hash(), right.state_hash());
    }
}
