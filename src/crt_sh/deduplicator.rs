// Hostname Deduplicator
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0
//
// Exact, per-run deduplication of hostnames. The set lives only as long as
// the normalization run that owns it.

use std::collections::HashSet;

/// Tracks hostnames already emitted during one normalization run
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<String>,
}

impl Deduplicator {
    /// Create an empty deduplicator
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name` and report whether it is new
    ///
    /// Returns true the first time a name is offered, false afterwards.
    pub fn check_and_insert(&mut self, name: &str) -> bool {
        if self.seen.contains(name) {
            return false;
        }
        self.seen.insert(name.to_string())
    }

    /// Whether `name` has been recorded, without recording it
    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }
}
