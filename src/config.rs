use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::filter::KinematicCuts;

/// A cut range that cannot select anything meaningful.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} range is inverted: min {min} > max {max}")]
    InvertedRange {
        name: &'static str,
        min: f64,
        max: f64,
    },
    #[error("{name} range has a NaN bound")]
    NanBound { name: &'static str },
}

/// Analysis settings read from a JSON file.
///
/// ```json
/// { "container": "tracks", "cuts": { "min_pt": 0.5, "max_eta": 0.7 } }
/// ```
///
/// Missing keys fall back to [`KinematicCuts::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Name given to the particle container.
    pub container: String,
    pub cuts: KinematicCuts,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            container: "particles".to_string(),
            cuts: KinematicCuts::default(),
        }
    }
}

impl AnalysisConfig {
    /// Read and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: AnalysisConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject NaN bounds and ranges whose minimum exceeds their maximum.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cuts = &self.cuts;
        for (name, min, max) in [
            ("pt", cuts.min_pt, cuts.max_pt),
            ("eta", cuts.min_eta, cuts.max_eta),
            ("phi", cuts.min_phi, cuts.max_phi),
        ] {
            if min.is_nan() || max.is_nan() {
                return Err(ConfigError::NanBound { name });
            }
            if min > max {
                return Err(ConfigError::InvertedRange { name, min, max });
            }
        }
        Ok(())
    }
}
