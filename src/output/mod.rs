// Output module - Fact formatting (JSON, JSON lines, Terminal)
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use crate::models::Fact;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod json;
pub mod terminal;

/// Output format for facts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON array per run
    Json,
    /// One JSON object per line
    #[default]
    Jsonl,
    /// Colored human-readable listing
    Text,
}

/// Render facts in the requested format
pub fn render(
    facts: &[Fact],
    format: OutputFormat,
    pretty: bool,
    label: Option<&str>,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => json::generate_json(facts, pretty),
        OutputFormat::Jsonl => json::generate_jsonl(facts),
        OutputFormat::Text => Ok(terminal::format_facts(facts, label)),
    }
}
