use std::cmp::Reverse;

use log::debug;
use rand::seq::index;
use rand::Rng;

use crate::slide::Slide;

/// Slide ids sorted by descending tag count. Ties keep input order.
pub fn priority_order(slides: &[Slide]) -> Vec<usize> {
    let mut order = (0..slides.len()).collect::<Vec<_>>();
    order.sort_by_key(|&id| Reverse(slides[id].tag_count()));
    order
}

/// The ids of slides that have not been placed yet. Membership checks, removal and uniform
/// sampling are all constant time; iteration order is unspecified but deterministic.
#[derive(Clone, Debug)]
pub struct UnplacedSet {
    members: Vec<usize>,
    positions: Vec<Option<usize>>,
}

impl UnplacedSet {
    pub fn full(num_slides: usize) -> Self {
        Self {
            members: (0..num_slides).collect(),
            positions: (0..num_slides).map(Some).collect(),
        }
    }

    pub fn contains(&self, slide_id: usize) -> bool {
        matches!(self.positions.get(slide_id), Some(Some(_)))
    }

    /// Returns false if the slide was not in the set.
    pub fn remove(&mut self, slide_id: usize) -> bool {
        let Some(position) = self.positions.get_mut(slide_id).and_then(Option::take) else {
            return false;
        };

        self.members.swap_remove(position);
        if let Some(&moved) = self.members.get(position) {
            self.positions[moved] = Some(position);
        }

        true
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.members.iter().copied()
    }

    pub fn choose<R: Rng>(&self, rng: &mut R) -> Option<usize> {
        if self.members.is_empty() {
            None
        } else {
            Some(self.members[rng.gen_range(0..self.members.len())])
        }
    }

    /// Up to `amount` distinct members other than `excluded`, in random order.
    pub fn sample_excluding<R: Rng>(&self, excluded: usize, amount: usize, rng: &mut R) -> Vec<usize> {
        let len = self.members.len();
        let amount = amount.min(len);
        let drawn = (amount + 1).min(len);

        index::sample(rng, len, drawn)
            .into_iter()
            .map(|i| self.members[i])
            .filter(|&id| id != excluded)
            .take(amount)
            .collect()
    }
}

/// Narrows "which slide goes next" down to the first `cap` unplaced slides of the priority
/// order. The unplaced set handed in must only ever shrink between calls.
#[derive(Clone, Debug)]
pub struct CandidateSelector {
    priority: Vec<usize>,
    cap: usize,
    cursor: usize,
    fallbacks: usize,
}

impl CandidateSelector {
    pub fn new(priority: Vec<usize>, cap: usize) -> Self {
        Self {
            priority,
            cap,
            cursor: 0,
            fallbacks: 0,
        }
    }

    pub fn for_slides(slides: &[Slide], cap: usize) -> Self {
        Self::new(priority_order(slides), cap)
    }

    pub fn priority(&self) -> &[usize] {
        &self.priority
    }

    pub fn candidates(&mut self, unplaced: &UnplacedSet) -> Vec<usize> {
        while self
            .priority
            .get(self.cursor)
            .is_some_and(|&id| !unplaced.contains(id))
        {
            self.cursor += 1;
        }

        self.priority[self.cursor..]
            .iter()
            .copied()
            .filter(|&id| unplaced.contains(id))
            .take(self.cap)
            .collect()
    }

    /// Picks uniformly among every unplaced slide when no candidate survived the cap.
    pub fn fallback<R: Rng>(&mut self, unplaced: &UnplacedSet, rng: &mut R) -> Option<usize> {
        let slide_id = unplaced.choose(rng)?;
        self.fallbacks += 1;
        debug!("No candidate left, picked slide {} at random", slide_id);
        Some(slide_id)
    }

    pub fn fallbacks(&self) -> usize {
        self.fallbacks
    }
}
