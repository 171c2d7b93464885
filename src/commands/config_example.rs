// ConfigExampleCommand - Writes an example configuration file
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use super::Command;
use crate::config::NormalizerConfig;
use crate::{Args, Result};
use async_trait::async_trait;
use tracing::info;

/// Writes the default configuration to the path given with --config-example
pub struct ConfigExampleCommand {
    args: Args,
}

impl ConfigExampleCommand {
    pub fn new(args: Args) -> Self {
        Self { args }
    }
}

#[async_trait]
impl Command for ConfigExampleCommand {
    async fn execute(&self) -> Result<()> {
        let path = self
            .args
            .config_example
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("--config-example requires a file path"))?;

        NormalizerConfig::create_example(path)?;
        info!("Wrote example configuration to {}", path.display());
        eprintln!("✓ Example configuration saved to: {}", path.display());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "ConfigExampleCommand"
    }
}
