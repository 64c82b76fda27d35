use common::softmax;
use rand::Rng;

/// One weight per action code. The weights of a set of legal actions are turned into move
/// probabilities with a softmax.
#[derive(Clone, Debug, PartialEq)]
pub struct Policy {
    weights: Vec<f64>,
}

impl Policy {
    pub fn uniform(size: usize) -> Self {
        Self {
            weights: vec![0.0; size],
        }
    }

    /// Weights drawn from `{0.00, 0.01, ..., 1.00}`.
    pub fn random<R: Rng>(size: usize, rng: &mut R) -> Self {
        Self {
            weights: (0..size)
                .map(|_| rng.gen_range(0..=100) as f64 / 100.0)
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn weight(&self, code: usize) -> f64 {
        self.weights.get(code).copied().unwrap_or(0.0)
    }

    pub fn distribution(&self, codes: &[usize]) -> Vec<f64> {
        let weights = codes.iter().map(|&code| self.weight(code)).collect::<Vec<_>>();

        softmax(&weights)
    }

    pub fn add(&mut self, code: usize, delta: f64) {
        if code >= self.weights.len() {
            self.weights.resize(code + 1, 0.0);
        }

        self.weights[code] += delta;
    }
}
