use rand::prelude::{SeedableRng, StdRng};

/// Every searcher draws from an rng built here so that a run is reproducible from its seed.
pub fn create_rng_from_seed(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[cfg(test)]
mod tests {
    use super::create_rng_from_seed;
    use rand::Rng;

    #[test]
    fn test_same_seed_same_stream() {
        let mut left = create_rng_from_seed(7);
        let mut right = create_rng_from_seed(7);

        let left = (0..16).map(|_| left.gen::<u64>()).collect::<Vec<_>>();
        let right = (0..16).map(|_| right.gen::<u64>()).collect::<Vec<_>>();

        assert_eq!(left, right);
    }

    #[test]
    fn test_different_seed_different_stream() {
        let mut left = create_rng_from_seed(7);
        let mut right = create_rng_from_seed(8);

        assert_ne!(left.gen::<u64>(), right.gen::<u64>());
    }
}
