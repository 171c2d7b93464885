// Batch mode arguments
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use clap::Args;

/// Concurrent normalization of several payloads
#[derive(Args, Debug, Clone, Default)]
pub struct BatchArgs {
    /// Normalization job (repeatable, format: HOSTNAME=PATH)
    #[arg(short = 'j', long = "job", value_name = "HOSTNAME=PATH", id = "jobs")]
    pub jobs: Vec<String>,

    /// Maximum jobs normalized concurrently
    #[arg(long = "max-concurrent", value_name = "N")]
    pub max_concurrent: Option<usize>,
}
