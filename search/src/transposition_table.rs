use std::collections::HashMap;

use crate::{first_max, ucb1};

/// Visit and reward statistics of one state hash, indexed by the position of an action in
/// the state's legal window.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TranspositionEntry {
    visits: usize,
    action_visits: Vec<usize>,
    action_rewards: Vec<f64>,
}

impl TranspositionEntry {
    pub fn new(num_actions: usize) -> Self {
        Self {
            visits: 0,
            action_visits: vec![0; num_actions],
            action_rewards: vec![0.0; num_actions],
        }
    }

    pub fn visits(&self) -> usize {
        self.visits
    }

    pub fn action_visits(&self, index: usize) -> usize {
        self.action_visits.get(index).copied().unwrap_or(0)
    }

    pub fn mean_reward(&self, index: usize) -> f64 {
        let visits = self.action_visits(index);
        let reward = self.action_rewards.get(index).copied().unwrap_or(0.0);

        common::div_or_zero(reward, visits as f64)
    }

    /// The action to descend into: highest UCB1 value over the first `num_actions` slots.
    pub fn select(&self, num_actions: usize, exploration: f64) -> Option<usize> {
        first_max((0..num_actions).map(|index| {
            let reward = self.action_rewards.get(index).copied().unwrap_or(0.0);
            ucb1(reward, self.action_visits(index), self.visits, exploration)
        }))
    }

    pub fn most_visited(&self, num_actions: usize) -> Option<usize> {
        first_max((0..num_actions).map(|index| self.action_visits(index)))
    }

    pub fn record(&mut self, index: usize, reward: f64) {
        if index >= self.action_visits.len() {
            self.action_visits.resize(index + 1, 0);
            self.action_rewards.resize(index + 1, 0.0);
        }

        self.visits += 1;
        self.action_visits[index] += 1;
        self.action_rewards[index] += reward;
    }
}

/// Statistics keyed by state hash. States whose hashes collide share one entry.
#[derive(Debug, Default)]
pub struct TranspositionTable {
    entries: HashMap<u64, TranspositionEntry>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, transposition_hash: u64) -> Option<&TranspositionEntry> {
        self.entries.get(&transposition_hash)
    }

    pub fn insert(&mut self, transposition_hash: u64, entry: TranspositionEntry) {
        self.entries.insert(transposition_hash, entry);
    }

    pub fn record(&mut self, transposition_hash: u64, index: usize, reward: f64) {
        self.entries
            .entry(transposition_hash)
            .or_default()
            .record(index, reward);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UNVISITED_PRIORITY;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_unvisited_actions_are_selected_in_order() {
        let mut entry = TranspositionEntry::new(3);

        assert_eq!(entry.select(3, 0.5), Some(0));
        entry.record(0, 4.0);
        assert_eq!(entry.select(3, 0.5), Some(1));
        entry.record(1, 2.0);
        assert_eq!(entry.select(3, 0.5), Some(2));
    }

    #[test]
    fn test_select_uses_mean_and_bonus() {
        let mut entry = TranspositionEntry::new(2);
        entry.record(0, 10.0);
        entry.record(1, 2.0);
        entry.record(1, 2.0);

        assert_eq!(entry.select(2, 0.01), Some(0));
        assert!(entry.select(2, 100.0).is_some());
        assert_approx_eq!(entry.mean_reward(1), 2.0, 1e-9);
        assert_eq!(entry.visits(), 3);
    }

    #[test]
    fn test_narrower_window_ignores_extra_slots() {
        let mut entry = TranspositionEntry::new(3);
        entry.record(2, 50.0);

        assert_eq!(entry.most_visited(2), Some(0));
        assert_eq!(entry.most_visited(3), Some(2));
    }

    #[test]
    fn test_most_visited_ignores_mean_reward() {
        let mut entry = TranspositionEntry::new(2);
        entry.record(0, 50.0);
        for _ in 0..3 {
            entry.record(1, 1.0);
        }

        assert!(entry.mean_reward(0) > entry.mean_reward(1));
        assert_eq!(entry.most_visited(2), Some(1));
    }

    #[test]
    fn test_record_grows_entry() {
        let mut entry = TranspositionEntry::new(1);
        entry.record(3, 1.0);

        assert_eq!(entry.action_visits(3), 1);
        assert_eq!(entry.action_visits(2), 0);
        assert_eq!(
            crate::ucb1(0.0, entry.action_visits(2), entry.visits(), 1.0),
            UNVISITED_PRIORITY
        );
    }

    #[test]
    fn test_table_records_into_same_entry() {
        let mut table = TranspositionTable::new();
        table.insert(7, TranspositionEntry::new(2));
        table.record(7, 1, 3.0);
        table.record(7, 1, 5.0);

        assert_eq!(table.len(), 1);
        assert_eq!(table.get(7).map(|e| e.action_visits(1)), Some(2));
        assert_approx_eq!(table.get(7).unwrap().mean_reward(1), 4.0, 1e-9);
    }
}
