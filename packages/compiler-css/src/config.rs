use crate::error::{CompileError, CompileResult};
use nestcss_evaluator::EvalOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "nestcss.config.json";

/// nestcss configuration file format
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Evaluation options (`maxDepth`, `unknownFunctions`) at the top level
    /// of the file
    #[serde(flatten)]
    pub evaluation: EvalOptions,
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn from_json(json: &str) -> CompileResult<Self> {
        serde_json::from_str(json).map_err(|e| CompileError::Config(e.to_string()))
    }
}
