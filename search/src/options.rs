use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use anyhow::{anyhow, Result};
use common::{Config, ConfigLoader};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequencerKind {
    Random,
    Greedy,
    Nested,
    Ucb,
    Uct,
    Nrpa,
}

impl SequencerKind {
    pub const ALL: [SequencerKind; 6] = [
        SequencerKind::Random,
        SequencerKind::Greedy,
        SequencerKind::Nested,
        SequencerKind::Ucb,
        SequencerKind::Uct,
        SequencerKind::Nrpa,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SequencerKind::Random => "random",
            SequencerKind::Greedy => "greedy",
            SequencerKind::Nested => "nested",
            SequencerKind::Ucb => "ucb",
            SequencerKind::Uct => "uct",
            SequencerKind::Nrpa => "nrpa",
        }
    }
}

impl FromStr for SequencerKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        SequencerKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow!("Unknown sequencer {:?}", s))
    }
}

impl Display for SequencerKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SearchOptions {
    pub sequencer: SequencerKind,
    pub seed: u64,
    pub max_slides: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            sequencer: SequencerKind::Greedy,
            seed: 0,
            max_slides: None,
        }
    }
}

impl Config for SearchOptions {
    fn load(config: &ConfigLoader) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            sequencer: config
                .get_string("sequencer")
                .map(|s| s.parse::<SequencerKind>())
                .transpose()?
                .unwrap_or(defaults.sequencer),
            seed: config
                .get("seed")
                .and_then(|v| v.as_u64())
                .unwrap_or(defaults.seed),
            max_slides: config.get_usize("max_slides").or(defaults.max_slides),
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RandomOptions {
    pub iterations: usize,
}

impl Default for RandomOptions {
    fn default() -> Self {
        Self { iterations: 10 }
    }
}

impl Config for RandomOptions {
    fn load(config: &ConfigLoader) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            iterations: config
                .get_usize("random_iterations")
                .unwrap_or(defaults.iterations),
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GreedyOptions {
    pub max_candidates: usize,
}

impl Default for GreedyOptions {
    fn default() -> Self {
        Self {
            max_candidates: 1000,
        }
    }
}

impl Config for GreedyOptions {
    fn load(config: &ConfigLoader) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            max_candidates: config
                .get_usize("greedy_max_candidates")
                .unwrap_or(defaults.max_candidates),
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NestedOptions {
    pub level: usize,
    pub max_candidates: usize,
}

impl Default for NestedOptions {
    fn default() -> Self {
        Self {
            level: 2,
            max_candidates: 3,
        }
    }
}

impl Config for NestedOptions {
    fn load(config: &ConfigLoader) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            level: config.get_usize("nested_level").unwrap_or(defaults.level),
            max_candidates: config
                .get_usize("nested_max_candidates")
                .unwrap_or(defaults.max_candidates),
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UcbOptions {
    pub max_candidates: usize,
    pub simulations: usize,
    pub exploration: f64,
    pub rollout_length: usize,
}

impl Default for UcbOptions {
    fn default() -> Self {
        Self {
            max_candidates: 200,
            simulations: 400,
            exploration: 0.7,
            rollout_length: 10,
        }
    }
}

impl Config for UcbOptions {
    fn load(config: &ConfigLoader) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            max_candidates: config
                .get_usize("ucb_max_candidates")
                .unwrap_or(defaults.max_candidates),
            simulations: config
                .get_usize("ucb_simulations")
                .unwrap_or(defaults.simulations),
            exploration: config
                .get_f64("ucb_exploration")
                .unwrap_or(defaults.exploration),
            rollout_length: config
                .get_usize("ucb_rollout_length")
                .unwrap_or(defaults.rollout_length),
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UctOptions {
    pub max_candidates: usize,
    pub simulations: usize,
    pub exploration: f64,
}

impl Default for UctOptions {
    fn default() -> Self {
        Self {
            max_candidates: 3,
            simulations: 30,
            exploration: 0.01,
        }
    }
}

impl Config for UctOptions {
    fn load(config: &ConfigLoader) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            max_candidates: config
                .get_usize("uct_max_candidates")
                .unwrap_or(defaults.max_candidates),
            simulations: config
                .get_usize("uct_simulations")
                .unwrap_or(defaults.simulations),
            exploration: config
                .get_f64("uct_exploration")
                .unwrap_or(defaults.exploration),
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NrpaOptions {
    pub level: usize,
    /// Iterations per level (N).
    pub iterations: usize,
    /// Playouts at the stabilized level (P).
    pub stabilization: usize,
    pub alpha: f64,
    pub max_candidates: usize,
    pub stabilized: bool,
    pub time_limit_secs: Option<f64>,
}

impl Default for NrpaOptions {
    fn default() -> Self {
        Self {
            level: 2,
            iterations: 50,
            stabilization: 10,
            alpha: 1.0,
            max_candidates: 3,
            stabilized: false,
            time_limit_secs: None,
        }
    }
}

impl Config for NrpaOptions {
    fn load(config: &ConfigLoader) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            level: config.get_usize("nrpa_level").unwrap_or(defaults.level),
            iterations: config
                .get_usize("nrpa_iterations")
                .unwrap_or(defaults.iterations),
            stabilization: config
                .get_usize("nrpa_stabilization")
                .unwrap_or(defaults.stabilization),
            alpha: config.get_f64("nrpa_alpha").unwrap_or(defaults.alpha),
            max_candidates: config
                .get_usize("nrpa_max_candidates")
                .unwrap_or(defaults.max_candidates),
            stabilized: config
                .get_bool("nrpa_stabilized")
                .unwrap_or(defaults.stabilized),
            time_limit_secs: config
                .get_f64("nrpa_time_limit_secs")
                .or(defaults.time_limit_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequencer_kind_parses_case_insensitively() {
        assert_eq!("UCT".parse::<SequencerKind>().unwrap(), SequencerKind::Uct);
        assert_eq!(" nrpa ".parse::<SequencerKind>().unwrap(), SequencerKind::Nrpa);
        assert!("beam".parse::<SequencerKind>().is_err());
    }

    #[test]
    fn test_defaults_from_empty_config() {
        let config = ConfigLoader::empty("slideshow".to_string());
        let ucb: UcbOptions = config.load().unwrap();
        let nrpa: NrpaOptions = config.load().unwrap();

        assert_eq!(ucb.simulations, 400);
        assert_eq!(ucb.rollout_length, 10);
        assert_eq!(nrpa.iterations, 50);
        assert!(nrpa.time_limit_secs.is_none());
    }

    #[test]
    fn test_options_from_config() {
        let config = ConfigLoader::from_str(
            r#"
            slideshow {
                sequencer = "nrpa"
                seed = 42
                max_slides = 200
                nrpa_level = 3
                nrpa_stabilized = true
                nrpa_time_limit_secs = 1.5
                uct_exploration = 0.2
            }
            "#,
            "slideshow".to_string(),
        )
        .unwrap();

        let search: SearchOptions = config.load().unwrap();
        let nrpa: NrpaOptions = config.load().unwrap();
        let uct: UctOptions = config.load().unwrap();

        assert_eq!(search.sequencer, SequencerKind::Nrpa);
        assert_eq!(search.seed, 42);
        assert_eq!(search.max_slides, Some(200));
        assert_eq!(nrpa.level, 3);
        assert!(nrpa.stabilized);
        assert_eq!(nrpa.time_limit_secs, Some(1.5));
        assert_eq!(uct.exploration, 0.2);
        assert_eq!(uct.simulations, 30);
    }

    #[test]
    fn test_unknown_sequencer_in_config_fails() {
        let config =
            ConfigLoader::from_str("sequencer = \"beam\"", "slideshow".to_string()).unwrap();

        assert!(config.load::<SearchOptions>().is_err());
    }
}
