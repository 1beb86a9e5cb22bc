//! Configuration model: TOML file + smart defaults.

#![allow(missing_docs)]

use std::fs;
use std::path::Path;
use std::thread;

use serde::{Deserialize, Serialize};

use crate::core::errors::{DirsigError, Result};

/// Default Bloom filter allocation: 32 MiB keeps the false-positive rate
/// negligible for tens of millions of files.
pub const DEFAULT_GATE_BYTES: usize = 32 * 1024 * 1024;

/// Initial capacity of the path registry; it doubles as needed.
pub const DEFAULT_REGISTRY_CAPACITY: usize = 1024;

/// Minimum interval between progress redraws, in milliseconds.
pub const DEFAULT_REDRAW_INTERVAL_MS: u64 = 100;

/// Full dirsig configuration model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
#[derive(Default)]
pub struct Config {
    pub engine: EngineConfig,
    pub progress: ProgressConfig,
}

/// Fingerprinting engine knobs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    /// Worker count for the hashing phase. 0 means one per available core.
    pub workers: usize,
    /// Duplicate-gate bit array size in bytes.
    pub gate_bytes: usize,
    /// Initial path registry capacity.
    pub registry_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            gate_bytes: DEFAULT_GATE_BYTES,
            registry_capacity: DEFAULT_REGISTRY_CAPACITY,
        }
    }
}

/// Progress rendering knobs (consumed by the CLI, not the engine).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProgressConfig {
    /// Minimum milliseconds between bar redraws.
    pub redraw_interval_ms: u64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            redraw_interval_ms: DEFAULT_REDRAW_INTERVAL_MS,
        }
    }
}

impl Config {
    /// Load configuration from an explicit TOML file path.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DirsigError::MissingConfig {
                path: path.to_path_buf(),
            });
        }
        let raw = fs::read_to_string(path).map_err(|e| DirsigError::io(path, e))?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Reject configurations the engine cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.engine.gate_bytes == 0 {
            return Err(DirsigError::InvalidConfig {
                details: "engine.gate_bytes must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Resolve the worker count: configured value, or one per available core.
    #[must_use]
    pub fn effective_workers(&self) -> usize {
        if self.engine.workers > 0 {
            self.engine.workers
        } else {
            thread::available_parallelism().map_or(4, std::num::NonZeroUsize::get)
        }
    }
}
