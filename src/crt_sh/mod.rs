// crt.sh Normalization Module
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0
//
// Maps crt.sh certificate transparency search results onto network, hostname
// and certificate facts.

pub mod batch;
pub mod context;
pub mod deduplicator;
pub mod entry;
pub mod normalizer;
pub mod stats;

pub use batch::{BatchConfig, BatchRunner, JobOutcome, NormalizeJob, PayloadSource};
pub use context::{BoefjeMeta, NormalizerMeta, RunContext};
pub use deduplicator::Deduplicator;
pub use entry::{CrtShEntry, normalize_common_name, normalize_hostname, split_lines};
pub use normalizer::{CrtShNormalizer, FactStream, normalize, normalize_str};
pub use stats::{NormalizeStats, Stats, StatsTracker};

pub use crate::error::Result;
