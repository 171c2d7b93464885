// crtsh-normalizer - crt.sh certificate transparency results to facts
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

//! crtsh-normalizer maps the JSON returned by a crt.sh certificate
//! transparency search onto typed facts for an object-graph store: one
//! `Network`, the `Hostname`s found on the certificates, and one
//! `Certificate` per log entry.
//!
//! ```
//! use crtsh_normalizer::crt_sh::normalize_str;
//! use crtsh_normalizer::models::Fact;
//!
//! let facts = normalize_str("[]", "example.com").unwrap();
//! assert!(matches!(facts[0], Fact::Network(_)));
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod crt_sh;
pub mod error;
pub mod models;
pub mod output;

// Re-export commonly used types
pub use crate::cli::Args;
pub use crate::crt_sh::{CrtShNormalizer, normalize, normalize_str};
pub use crate::error::NormalizeError;
pub use crate::models::Fact;
pub use crate::output::OutputFormat;

/// Result type for command-level operations
pub type Result<T> = anyhow::Result<T>;

/// Error type for command-level operations
pub use anyhow::Error;
