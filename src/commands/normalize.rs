// NormalizeCommand - Normalizes a single crt.sh payload
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use super::Command;
use crate::crt_sh::{CrtShNormalizer, NormalizerMeta, RunContext, stats::print_run_stats};
use crate::config::NormalizerConfig;
use crate::error::NormalizeError;
use crate::output;
use crate::{Args, Result};
use anyhow::Context;
use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

/// NormalizeCommand reads one payload (file or stdin), normalizes it and
/// prints the facts
pub struct NormalizeCommand {
    args: Args,
    config: NormalizerConfig,
}

impl NormalizeCommand {
    pub fn new(args: Args, config: NormalizerConfig) -> Self {
        Self { args, config }
    }

    /// Resolve the run context from --hostname or --meta
    fn run_context(&self) -> Result<RunContext> {
        if let Some(hostname) = &self.args.source.hostname {
            return Ok(RunContext::new(hostname.clone()));
        }

        let path = self.args.source.meta.as_ref().ok_or_else(|| {
            anyhow::anyhow!("A requested hostname is required: use --hostname or --meta")
        })?;

        let meta = NormalizerMeta::from_file(path)?;
        Ok(RunContext::from_meta(&meta)?)
    }

    async fn read_payload(&self) -> Result<Vec<u8>> {
        let mut raw = Vec::new();

        if self.args.reads_stdin() {
            debug!("Reading payload from stdin");
            tokio::io::stdin()
                .read_to_end(&mut raw)
                .await
                .context("Failed to read payload from stdin")?;
        } else if let Some(path) = &self.args.input {
            raw = tokio::fs::read(path)
                .await
                .map_err(|e| NormalizeError::io(path.display().to_string(), e))?;
        }

        Ok(raw)
    }
}

#[async_trait]
impl Command for NormalizeCommand {
    async fn execute(&self) -> Result<()> {
        let config = &self.config;
        let context = self.run_context()?;
        let raw = self.read_payload().await?;

        info!(
            "Normalizing {} bytes for '{}'",
            raw.len(),
            context.requested_hostname
        );

        let normalizer = CrtShNormalizer::new(&context.requested_hostname);
        let (facts, stats) = normalizer.normalize_with_stats(&raw)?;

        let rendered = output::render(
            &facts,
            config.format,
            config.pretty,
            Some(normalizer.current()),
        )?;
        print!("{}", rendered);
        if !rendered.ends_with('\n') {
            println!();
        }

        if config.show_stats {
            eprintln!("\n=== Normalization Statistics ===");
            print_run_stats(&stats);
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "NormalizeCommand"
    }
}
