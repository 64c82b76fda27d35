/// Priority given to an arm or move that has never been tried, so every option is sampled
/// once before any is revisited.
pub const UNVISITED_PRIORITY: f64 = 100_000.0;

/// UCB1 value of an option: its mean reward plus an exploration bonus that shrinks as the
/// option is visited more often than its siblings.
pub fn ucb1(total_reward: f64, visits: usize, parent_visits: usize, exploration: f64) -> f64 {
    if visits == 0 {
        return UNVISITED_PRIORITY;
    }

    let visits = visits as f64;
    let mean = total_reward / visits;

    mean + exploration * ((parent_visits as f64).ln() / visits).sqrt()
}

/// Index of the first maximal value. Later values must be strictly greater to win, so ties
/// go to the earliest option.
pub fn first_max<T: PartialOrd>(values: impl IntoIterator<Item = T>) -> Option<usize> {
    let mut best: Option<(usize, T)> = None;

    for (index, value) in values.into_iter().enumerate() {
        let is_better = match &best {
            Some((_, best_value)) => value > *best_value,
            None => true,
        };

        if is_better {
            best = Some((index, value));
        }
    }

    best.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_unvisited_gets_sentinel() {
        assert_eq!(ucb1(0.0, 0, 10, 0.7), UNVISITED_PRIORITY);
    }

    #[test]
    fn test_ucb1_value() {
        let expected = 2.5 + 0.7 * (8f64.ln() / 4.0).sqrt();

        assert_approx_eq!(ucb1(10.0, 4, 8, 0.7), expected, 1e-9);
    }

    #[test]
    fn test_ucb1_single_parent_visit_has_no_bonus() {
        assert_approx_eq!(ucb1(3.0, 1, 1, 0.7), 3.0, 1e-9);
    }

    #[test]
    fn test_first_max_prefers_earliest() {
        assert_eq!(first_max([1, 3, 2, 3]), Some(1));
        assert_eq!(first_max([0.5, 0.5]), Some(0));
        assert_eq!(first_max(Vec::<usize>::new()), None);
    }
}
