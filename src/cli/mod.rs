// CLI module - Command line interface and argument parsing
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use crate::config::NormalizerConfig;
use crate::error::{NormalizeError, Result};
use clap::Parser;
use std::path::PathBuf;

// Sub-modules for organized CLI arguments
mod batch_args;
mod input_args;
mod output_args;

// Re-export sub-structs
pub use batch_args::BatchArgs;
pub use input_args::InputArgs;
pub use output_args::OutputArgs;

/// Environment variable naming a default configuration file
pub const CONFIG_ENV: &str = "CRTSH_NORMALIZER_CONFIG";

/// crtsh-normalizer - crt.sh search results to object-graph facts
///
/// The Args struct composes the domain-specific argument groups:
/// - Payload and requested hostname (InputArgs)
/// - Output formats (OutputArgs)
/// - Concurrent batch jobs (BatchArgs)
/// - Configuration file handling
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, long_about = None)]
#[command(name = "crtsh-normalizer")]
#[command(about = "Normalize crt.sh certificate transparency results into facts")]
pub struct Args {
    /// crt.sh JSON payload file (`-` or omitted for stdin)
    #[arg(value_name = "INPUT", conflicts_with = "jobs")]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub source: InputArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub batch: BatchArgs,

    /// Configuration file (TOML)
    #[arg(short = 'c', long = "config", value_name = "FILE", env = CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// Write an example configuration file and exit
    #[arg(long = "config-example", value_name = "FILE")]
    pub config_example: Option<PathBuf>,
}

impl Args {
    /// Whether the payload is read from stdin
    pub fn reads_stdin(&self) -> bool {
        match &self.input {
            None => true,
            Some(path) => path.as_os_str() == "-",
        }
    }

    /// Load the configuration file (or defaults) and apply flag overrides
    pub fn load_config(&self) -> Result<NormalizerConfig> {
        let mut config = match &self.config {
            Some(path) => NormalizerConfig::from_file(path)?,
            None => NormalizerConfig::default(),
        };

        if let Some(format) = self.output.format {
            config.format = format;
        }
        config.pretty |= self.output.pretty;
        config.show_stats |= self.output.stats;
        if let Some(max) = self.batch.max_concurrent {
            config.batch.max_concurrent_jobs = max;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject argument combinations clap cannot express
    pub fn validate(&self) -> Result<()> {
        if !self.batch.jobs.is_empty() {
            return Ok(());
        }

        if self.config_example.is_none()
            && self.source.hostname.is_none()
            && self.source.meta.is_none()
        {
            return Err(NormalizeError::Config {
                message: "A requested hostname is required: use --hostname or --meta".to_string(),
            });
        }

        Ok(())
    }
}
