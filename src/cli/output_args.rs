// Output format arguments
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use crate::output::OutputFormat;
use clap::Args;

/// Output options
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output format (overrides the configuration file)
    #[arg(short = 'f', long = "format", value_enum, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output
    #[arg(long = "pretty")]
    pub pretty: bool,

    /// Print run statistics to stderr
    #[arg(long = "stats")]
    pub stats: bool,
}
