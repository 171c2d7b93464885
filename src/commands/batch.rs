// BatchCommand - Normalizes several payloads concurrently
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use super::Command;
use crate::crt_sh::{BatchRunner, NormalizeJob};
use crate::output::{self, terminal};
use crate::config::NormalizerConfig;
use crate::{Args, Result};
use async_trait::async_trait;
use tracing::info;

/// BatchCommand runs every --job through the batch runner
///
/// Facts of each successful job are printed in submission order; failed
/// jobs are reported on stderr and contribute no facts.
pub struct BatchCommand {
    args: Args,
    config: NormalizerConfig,
}

impl BatchCommand {
    pub fn new(args: Args, config: NormalizerConfig) -> Self {
        Self { args, config }
    }

    /// Parse every HOSTNAME=PATH specification
    pub fn jobs(&self) -> Result<Vec<NormalizeJob>> {
        self.args
            .batch
            .jobs
            .iter()
            .map(|spec| NormalizeJob::parse_spec(spec).map_err(Into::into))
            .collect()
    }
}

#[async_trait]
impl Command for BatchCommand {
    async fn execute(&self) -> Result<()> {
        let config = &self.config;
        let jobs = self.jobs()?;
        let total = jobs.len();

        info!("Starting batch normalization of {} payloads", total);

        let runner = BatchRunner::new(config.batch_config());
        let outcomes = runner.run(jobs).await?;

        let mut failed = 0;
        for outcome in &outcomes {
            match &outcome.result {
                Ok((facts, _)) => {
                    let label = Some(outcome.label.as_str());
                    let rendered = output::render(facts, config.format, config.pretty, label)?;
                    print!("{}", rendered);
                    if !rendered.ends_with('\n') {
                        println!();
                    }
                }
                Err(e) => {
                    failed += 1;
                    eprintln!("{}", terminal::format_failure(&outcome.label, e));
                }
            }
        }

        if config.show_stats {
            runner.stats().print_stats();
        }

        if failed > 0 {
            anyhow::bail!("{} of {} jobs failed", failed, total);
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "BatchCommand"
    }
}
