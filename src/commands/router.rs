// CommandRouter - Routes CLI arguments to appropriate Command
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use super::{BatchCommand, Command, ConfigExampleCommand, NormalizeCommand};
use crate::config::NormalizerConfig;
use crate::error::NormalizeError;
use crate::{Args, Result};

/// CommandRouter determines which Command to execute based on CLI arguments
///
/// Priority:
/// 1. Example configuration (--config-example)
/// 2. Batch normalization (--job)
/// 3. Single payload normalization (default)
pub struct CommandRouter;

impl CommandRouter {
    /// Route CLI arguments to the appropriate Command
    ///
    /// `config` is the configuration already loaded by the caller, with the
    /// flag overrides of `args` applied.
    pub fn route(args: Args, config: NormalizerConfig) -> Result<Box<dyn Command>> {
        Self::validate_routing(&args)?;

        if args.config_example.is_some() {
            return Ok(Box::new(ConfigExampleCommand::new(args)));
        }

        if !args.batch.jobs.is_empty() {
            return Ok(Box::new(BatchCommand::new(args, config)));
        }

        Ok(Box::new(NormalizeCommand::new(args, config)))
    }

    /// Check that the argument combination can be routed
    pub fn validate_routing(args: &Args) -> Result<()> {
        let has_single_source =
            args.input.is_some() || args.source.hostname.is_some() || args.source.meta.is_some();
        if !args.batch.jobs.is_empty() && has_single_source {
            return Err(NormalizeError::Config {
                message: "--job cannot be combined with INPUT, --hostname or --meta".to_string(),
            }
            .into());
        }

        args.validate()?;
        Ok(())
    }
}
