use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Errors encountered while resolving run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required setting was provided neither on the command line nor in the environment.
    #[error("Missing required setting: {0}")]
    MissingSetting(String),
    /// Setting contained a value that could not be parsed or is out of range.
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

/// Runtime configuration for one extraction run.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Path to the bzip2-compressed XML dump.
    pub dump_path: PathBuf,
    /// Directory receiving the numbered shard files; created if missing.
    pub output_dir: PathBuf,
    /// Number of accepted articles written to each shard file.
    pub pages_per_shard: usize,
    /// Optional cap on the total number of pages processed, for partial or trial runs.
    pub max_pages: Option<u64>,
}

/// Default number of articles written to each shard file.
pub const DEFAULT_PAGES_PER_SHARD: usize = 10_000;

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Explicit overrides (typically CLI flags) layered over the environment.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    /// Overrides `WIKISHARD_DUMP_PATH`.
    pub dump_path: Option<PathBuf>,
    /// Overrides `WIKISHARD_OUTPUT_DIR`.
    pub output_dir: Option<PathBuf>,
    /// Overrides `WIKISHARD_PAGES_PER_SHARD`.
    pub pages_per_shard: Option<usize>,
    /// Overrides `WIKISHARD_MAX_PAGES`.
    pub max_pages: Option<u64>,
}

impl ExtractConfig {
    /// Resolve the effective configuration, performing validation along the way.
    ///
    /// Each setting prefers the explicit override, then the corresponding environment
    /// variable, then the built-in default. The dump path has no default and must come
    /// from one of the first two.
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let dump_path = overrides
            .dump_path
            .or_else(|| load_env_optional("WIKISHARD_DUMP_PATH").map(PathBuf::from))
            .ok_or_else(|| {
                ConfigError::MissingSetting("WIKISHARD_DUMP_PATH (or --input)".to_string())
            })?;

        let output_dir = overrides
            .output_dir
            .or_else(|| load_env_optional("WIKISHARD_OUTPUT_DIR").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        let pages_per_shard = match overrides.pages_per_shard {
            Some(value) => value,
            None => load_env_optional("WIKISHARD_PAGES_PER_SHARD")
                .map(|value| {
                    value.parse().map_err(|_| {
                        ConfigError::InvalidValue("WIKISHARD_PAGES_PER_SHARD".to_string())
                    })
                })
                .transpose()?
                .unwrap_or(DEFAULT_PAGES_PER_SHARD),
        };
        if pages_per_shard == 0 {
            return Err(ConfigError::InvalidValue(
                "pages per shard must be at least 1".to_string(),
            ));
        }

        let max_pages = match overrides.max_pages {
            Some(value) => Some(value),
            None => load_env_optional("WIKISHARD_MAX_PAGES")
                .map(|value| {
                    value
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("WIKISHARD_MAX_PAGES".to_string()))
                })
                .transpose()?,
        };

        Ok(Self {
            dump_path,
            output_dir,
            pages_per_shard,
            max_pages,
        })
    }
}

fn load_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
