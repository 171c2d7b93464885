// Normalizer Configuration
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0
//
// TOML configuration file. Command-line flags override values loaded here.

use crate::crt_sh::BatchConfig;
use crate::crt_sh::batch::{DEFAULT_CHANNEL_CAPACITY, DEFAULT_MAX_CONCURRENT_JOBS};
use crate::error::{NormalizeError, Result};
use crate::output::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::Level;

/// Batch worker settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    /// Maximum jobs normalized concurrently
    pub max_concurrent_jobs: usize,
    /// Capacity of the outcome channel
    pub channel_capacity: usize,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            max_concurrent_jobs: DEFAULT_MAX_CONCURRENT_JOBS,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// Full configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Output format for facts
    pub format: OutputFormat,
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Print run statistics to stderr
    pub show_stats: bool,
    /// Log level used when RUST_LOG is not set
    pub log_level: String,
    /// Batch worker settings
    pub batch: BatchSettings,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Jsonl,
            pretty: false,
            show_stats: false,
            log_level: "warn".to_string(),
            batch: BatchSettings::default(),
        }
    }
}

impl NormalizerConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| NormalizeError::io(path.display().to_string(), e))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: NormalizerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default configuration as an example file
    pub fn create_example(path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(&Self::default())?;
        std::fs::write(path, toml).map_err(|e| NormalizeError::io(path.display().to_string(), e))
    }

    /// Check values that cannot be expressed in the type system
    pub fn validate(&self) -> Result<()> {
        if self.batch.max_concurrent_jobs == 0 {
            return Err(NormalizeError::Config {
                message: "batch.max_concurrent_jobs must be at least 1".to_string(),
            });
        }

        if self.batch.channel_capacity == 0 {
            return Err(NormalizeError::Config {
                message: "batch.channel_capacity must be at least 1".to_string(),
            });
        }

        self.level()?;
        Ok(())
    }

    /// Parsed log level
    pub fn level(&self) -> Result<Level> {
        self.log_level
            .parse::<Level>()
            .map_err(|_| NormalizeError::Config {
                message: format!("Unknown log level '{}'", self.log_level),
            })
    }

    /// Batch runner configuration derived from these settings
    pub fn batch_config(&self) -> BatchConfig {
        BatchConfig {
            max_concurrent_jobs: self.batch.max_concurrent_jobs,
            channel_capacity: self.batch.channel_capacity,
            reference_time: None,
        }
    }
}
