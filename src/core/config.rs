//! funish.json loading.
//!
//! Every section is optional; missing keys fall back to built-in defaults.

use crate::bench::{BenchOptions, DEFAULT_ITERATIONS};
use crate::error::{Error, Result};
use crate::lint::LintConfig;
use crate::utils::io;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "funish.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FunishConfig {
    #[serde(default)]
    pub bench: BenchSettings,
    #[serde(default)]
    pub lint: LintConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchSettings {
    #[serde(default = "default_iterations")]
    pub iterations: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
}

impl Default for BenchSettings {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            unit: default_unit(),
        }
    }
}

impl BenchSettings {
    /// Validate the unit and build runner options.
    ///
    /// Iterations are validated when the runner is created.
    pub fn to_options(&self) -> Result<BenchOptions> {
        Ok(BenchOptions::default()
            .iterations(self.iterations)
            .unit(self.unit.parse()?))
    }
}

fn default_iterations() -> f64 {
    DEFAULT_ITERATIONS as f64
}

fn default_unit() -> String {
    "ns".to_string()
}

/// Load configuration.
///
/// An explicit `path` must exist. Without one, `funish.json` in the current
/// directory is used when present and built-in defaults otherwise.
pub fn load(path: Option<&Path>) -> Result<FunishConfig> {
    let path: PathBuf = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let local = PathBuf::from(CONFIG_FILE);
            if !local.exists() {
                return Ok(FunishConfig::default());
            }
            local
        }
    };

    let content = io::read_file(&path, &format!("read {}", path.display()))?;
    from_str(&content, &path.display().to_string())
}

pub fn from_str(content: &str, source: &str) -> Result<FunishConfig> {
    serde_json::from_str(content).map_err(|e| Error::config_invalid_json(source, e))
}
