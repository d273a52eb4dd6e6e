//! Pipeline configuration with one explicit default.

use std::path::Path;

use gambit_features::Horizon;
use gambit_training::{Hyperparams, ModelKind};
use serde::{Deserialize, Serialize};

/// Looked up when no `--config` is given; falling back to
/// [`Config::default`] when it does not exist either.
pub const DEFAULT_CONFIG_PATH: &str = "config/config.json";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub features: FeaturesConfig,
    pub cleaning: CleaningConfig,
    pub model: ModelConfig,
}

impl Config {
    /// Loads the configuration, or the default one.
    ///
    /// An explicit `--config` path must exist; without one, the default
    /// path is used when present and the built-in default otherwise.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => crate::io::read_json("config", path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_PATH);
                if fallback.exists() {
                    crate::io::read_json("config", fallback)
                } else {
                    log::warn!("no configuration file found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    /// Horizon in full moves; takes precedence over `num_moves`.
    pub fullmoves: Option<usize>,
    /// Horizon in half-moves (legacy knob).
    pub num_moves: Option<usize>,
}

impl FeaturesConfig {
    #[must_use]
    pub fn horizon(&self) -> Horizon {
        Horizon::from_config(self.fullmoves, self.num_moves)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    pub min_rating: i64,
    pub max_rating: i64,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            min_rating: 1500,
            max_rating: 3000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Candidate model names; the baseline is always trained on top.
    pub candidates: Vec<String>,
    pub test_size: f64,
    pub random_state: u64,
    pub n_estimators: usize,
    pub max_depth: usize,
    pub parallel_training: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            candidates: vec![
                "logistic_regression".to_owned(),
                "random_forest".to_owned(),
                "boosted_trees".to_owned(),
            ],
            test_size: 0.2,
            random_state: 42,
            n_estimators: 100,
            max_depth: 10,
            parallel_training: true,
        }
    }
}

impl ModelConfig {
    pub fn candidate_kinds(&self) -> anyhow::Result<Vec<ModelKind>> {
        self.candidates
            .iter()
            .map(|name| {
                name.parse::<ModelKind>()
                    .map_err(|err| anyhow::anyhow!("{err}"))
            })
            .collect()
    }

    #[must_use]
    pub fn hyperparams(&self) -> Hyperparams {
        Hyperparams {
            n_estimators: self.n_estimators,
            max_depth: self.max_depth,
        }
    }
}
