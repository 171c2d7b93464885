// Normalization Statistics
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0
//
// Per-run counters and a thread-safe tracker aggregating them across jobs

use crate::models::ValidityStatus;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Counters for a single normalization run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeStats {
    /// Certificate entries consumed
    pub entries_processed: u64,
    /// Hostname facts emitted from `name_value`
    pub hostnames_emitted: u64,
    /// Names skipped because they were already emitted
    pub duplicate_names: u64,
    /// Names that do not fall under the requested hostname (still emitted)
    pub unrelated_names: u64,
    /// Certificate facts emitted
    pub certificates_emitted: u64,
    /// Hostname facts emitted for certificate subjects
    pub subject_hostnames_emitted: u64,
    /// Subject hostnames emitted although the name had already been emitted
    pub subject_reemissions: u64,
    /// Certificates inside their validity window
    pub current_certificates: u64,
    /// Certificates past `not_after`
    pub expired_certificates: u64,
    /// Certificates before `not_before`
    pub future_certificates: u64,
    /// Certificates whose validity timestamps could not be parsed
    pub unknown_validity: u64,
}

impl NormalizeStats {
    /// Total facts of a completed run: the single Network plus every
    /// Hostname and Certificate
    pub fn total_facts(&self) -> u64 {
        1 + self.hostnames_emitted + self.subject_hostnames_emitted + self.certificates_emitted
    }

    pub(crate) fn record_validity(&mut self, status: ValidityStatus) {
        match status {
            ValidityStatus::Current => self.current_certificates += 1,
            ValidityStatus::Expired => self.expired_certificates += 1,
            ValidityStatus::NotYetValid => self.future_certificates += 1,
            ValidityStatus::Unknown => self.unknown_validity += 1,
        }
    }

    /// Add another run's counters to this one
    pub fn merge(&mut self, other: &NormalizeStats) {
        self.entries_processed += other.entries_processed;
        self.hostnames_emitted += other.hostnames_emitted;
        self.duplicate_names += other.duplicate_names;
        self.unrelated_names += other.unrelated_names;
        self.certificates_emitted += other.certificates_emitted;
        self.subject_hostnames_emitted += other.subject_hostnames_emitted;
        self.subject_reemissions += other.subject_reemissions;
        self.current_certificates += other.current_certificates;
        self.expired_certificates += other.expired_certificates;
        self.future_certificates += other.future_certificates;
        self.unknown_validity += other.unknown_validity;
    }
}

/// Statistics across all runs of a process
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stats {
    /// Runs that completed
    pub runs_succeeded: u64,
    /// Runs that failed and whose facts were discarded
    pub runs_failed: u64,
    /// Sum of the counters of successful runs
    pub totals: NormalizeStats,
    /// Start time
    #[serde(skip)]
    pub start_time: Option<Instant>,
    /// Elapsed time in milliseconds
    pub processing_time_ms: u64,
}

/// Thread-safe statistics tracker
#[derive(Clone)]
pub struct StatsTracker {
    stats: Arc<Mutex<Stats>>,
}

impl StatsTracker {
    /// Create a new statistics tracker
    pub fn new() -> Self {
        let stats = Stats {
            start_time: Some(Instant::now()),
            ..Default::default()
        };

        Self {
            stats: Arc::new(Mutex::new(stats)),
        }
    }

    /// Record a completed run
    pub fn record_success(&self, run: &NormalizeStats) {
        if let Ok(mut stats) = self.stats.lock() {
            stats.runs_succeeded += 1;
            stats.totals.merge(run);
        }
    }

    /// Record a failed run
    pub fn record_failure(&self) {
        if let Ok(mut stats) = self.stats.lock() {
            stats.runs_failed += 1;
        }
    }

    /// Get current statistics snapshot
    pub fn get_snapshot(&self) -> Stats {
        if let Ok(mut stats) = self.stats.lock() {
            if let Some(start_time) = stats.start_time {
                stats.processing_time_ms = start_time.elapsed().as_millis() as u64;
            }
            stats.clone()
        } else {
            Stats::default()
        }
    }

    /// Entries processed per second since the tracker was created
    pub fn get_processing_rate(&self) -> f64 {
        if let Ok(stats) = self.stats.lock()
            && let Some(start_time) = stats.start_time
        {
            let elapsed_secs = start_time.elapsed().as_secs_f64();
            if elapsed_secs > 0.0 {
                return stats.totals.entries_processed as f64 / elapsed_secs;
            }
        }
        0.0
    }

    /// Print statistics to stderr, keeping stdout for facts
    pub fn print_stats(&self) {
        let snapshot = self.get_snapshot();
        eprintln!("\n=== Normalization Statistics ===");
        eprintln!("Runs Succeeded:       {}", snapshot.runs_succeeded);
        eprintln!("Runs Failed:          {}", snapshot.runs_failed);
        print_run_stats(&snapshot.totals);
        eprintln!("Processing Rate:      {:.2} entries/sec", self.get_processing_rate());
        eprintln!("Processing Time:      {} ms", snapshot.processing_time_ms);
    }
}

impl Default for StatsTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Print the counters of one run (or an aggregate) to stderr
pub fn print_run_stats(stats: &NormalizeStats) {
    eprintln!("Entries Processed:    {}", stats.entries_processed);
    eprintln!("Hostnames Emitted:    {}", stats.hostnames_emitted);
    eprintln!("Duplicate Names:      {}", stats.duplicate_names);
    eprintln!("Unrelated Names:      {}", stats.unrelated_names);
    eprintln!("Certificates:         {}", stats.certificates_emitted);
    eprintln!(
        "Subject Hostnames:    {} ({} re-emitted)",
        stats.subject_hostnames_emitted, stats.subject_reemissions
    );
    eprintln!(
        "Validity:             {} current, {} expired, {} not yet valid, {} unknown",
        stats.current_certificates,
        stats.expired_certificates,
        stats.future_certificates,
        stats.unknown_validity
    );
}
