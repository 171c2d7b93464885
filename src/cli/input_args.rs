// Payload and run context arguments
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use clap::Args;
use std::path::PathBuf;

/// Where the requested hostname of a single run comes from
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Hostname the CT search was made for
    #[arg(short = 'H', long = "hostname", value_name = "NAME", conflicts_with = "meta")]
    pub hostname: Option<String>,

    /// Normalizer metadata JSON holding boefje_meta.arguments.input.hostname.name
    #[arg(short = 'm', long = "meta", value_name = "FILE", id = "meta")]
    pub meta: Option<PathBuf>,
}
