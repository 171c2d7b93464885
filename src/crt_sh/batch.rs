// Batch Runner
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0
//
// Normalizes many independent payloads concurrently. Each job either
// delivers all of its facts or only its error.

use super::normalizer::CrtShNormalizer;
use super::stats::{NormalizeStats, StatsTracker};
use super::Result;
use crate::error::NormalizeError;
use crate::models::Fact;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Default number of jobs normalized at the same time
pub const DEFAULT_MAX_CONCURRENT_JOBS: usize = 8;

/// Default capacity of the outcome channel
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Where a job's raw payload comes from
#[derive(Debug, Clone)]
pub enum PayloadSource {
    /// Read from a file when the job runs
    File(PathBuf),
    /// Already in memory
    Inline(Vec<u8>),
}

/// One normalization job
#[derive(Debug, Clone)]
pub struct NormalizeJob {
    /// Label used in logs and output
    pub label: String,
    /// Requested hostname of the run
    pub hostname: String,
    /// Raw crt.sh payload
    pub source: PayloadSource,
}

impl NormalizeJob {
    /// Job reading its payload from `path`
    pub fn from_file(hostname: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            label: path.display().to_string(),
            hostname: hostname.into(),
            source: PayloadSource::File(path),
        }
    }

    /// Job over an in-memory payload
    pub fn inline(label: impl Into<String>, hostname: impl Into<String>, raw: Vec<u8>) -> Self {
        Self {
            label: label.into(),
            hostname: hostname.into(),
            source: PayloadSource::Inline(raw),
        }
    }

    /// Parse a `HOSTNAME=PATH` job specification
    pub fn parse_spec(spec: &str) -> Result<Self> {
        match spec.split_once('=') {
            Some((hostname, path)) if !hostname.is_empty() && !path.is_empty() => {
                Ok(Self::from_file(hostname, path))
            }
            _ => Err(NormalizeError::Config {
                message: format!("Invalid job '{}'. Expected HOSTNAME=PATH", spec),
            }),
        }
    }

    async fn load(&self) -> Result<Vec<u8>> {
        match &self.source {
            PayloadSource::File(path) => tokio::fs::read(path)
                .await
                .map_err(|e| NormalizeError::io(path.display().to_string(), e)),
            PayloadSource::Inline(raw) => Ok(raw.clone()),
        }
    }
}

/// Result of one job
#[derive(Debug)]
pub struct JobOutcome {
    /// Submission position of the job
    pub index: usize,
    pub label: String,
    pub hostname: String,
    /// All facts and statistics, or the error that aborted the job
    pub result: Result<(Vec<Fact>, NormalizeStats)>,
}

impl JobOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn facts(&self) -> &[Fact] {
        match &self.result {
            Ok((facts, _)) => facts,
            Err(_) => &[],
        }
    }
}

/// Configuration for batch runs
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Maximum jobs normalized concurrently
    pub max_concurrent_jobs: usize,
    /// Capacity of the outcome channel
    pub channel_capacity: usize,
    /// Fixed time for validity classification, wall clock when unset
    pub reference_time: Option<DateTime<Utc>>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrent_jobs: DEFAULT_MAX_CONCURRENT_JOBS,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            reference_time: None,
        }
    }
}

/// Runs normalization jobs on the tokio runtime
pub struct BatchRunner {
    config: BatchConfig,
    stats: StatsTracker,
}

impl BatchRunner {
    pub fn new(config: BatchConfig) -> Self {
        let config = BatchConfig {
            max_concurrent_jobs: config.max_concurrent_jobs.max(1),
            channel_capacity: config.channel_capacity.max(1),
            ..config
        };

        Self {
            config,
            stats: StatsTracker::new(),
        }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Statistics shared by all jobs of this runner
    pub fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    /// Start all jobs; outcomes arrive on the receiver in completion order
    ///
    /// The receiver closes once every job has finished.
    pub fn spawn(
        &self,
        jobs: Vec<NormalizeJob>,
    ) -> (mpsc::Receiver<JobOutcome>, Vec<JoinHandle<()>>) {
        let (tx, rx) = mpsc::channel::<JobOutcome>(self.config.channel_capacity);
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_jobs));

        info!(
            "Running {} normalization jobs with up to {} workers",
            jobs.len(),
            self.config.max_concurrent_jobs
        );

        let mut handles = Vec::with_capacity(jobs.len());

        for (index, job) in jobs.into_iter().enumerate() {
            let tx = tx.clone();
            let semaphore = Arc::clone(&semaphore);
            let stats = self.stats.clone();
            let reference_time = self.config.reference_time;

            let handle = tokio::spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    warn!("Worker pool closed before job {} could run", job.label);
                    return;
                };

                let outcome = Self::run_job(index, job, reference_time, &stats).await;

                if tx.send(outcome).await.is_err() {
                    warn!("Outcome channel closed, dropping result of job {}", index);
                }
            });

            handles.push(handle);
        }

        // Drop the original sender so the receiver closes with the last job
        drop(tx);

        (rx, handles)
    }

    /// Run all jobs and return their outcomes in submission order
    pub async fn run(&self, jobs: Vec<NormalizeJob>) -> Result<Vec<JobOutcome>> {
        let (mut rx, handles) = self.spawn(jobs);

        let mut outcomes = Vec::with_capacity(handles.len());
        while let Some(outcome) = rx.recv().await {
            outcomes.push(outcome);
        }

        for handle in handles {
            handle.await?;
        }

        outcomes.sort_by_key(|outcome| outcome.index);
        Ok(outcomes)
    }

    async fn run_job(
        index: usize,
        job: NormalizeJob,
        reference_time: Option<DateTime<Utc>>,
        stats: &StatsTracker,
    ) -> JobOutcome {
        debug!("Starting job {} ({}) for '{}'", index, job.label, job.hostname);

        let result = match job.load().await {
            Ok(raw) => {
                let mut normalizer = CrtShNormalizer::new(&job.hostname);
                if let Some(now) = reference_time {
                    normalizer = normalizer.with_reference_time(now);
                }
                normalizer.normalize_with_stats(&raw)
            }
            Err(e) => Err(e),
        };

        match &result {
            Ok((facts, run_stats)) => {
                debug!("Job {} produced {} facts", job.label, facts.len());
                stats.record_success(run_stats);
            }
            Err(e) => {
                warn!("Job {} failed: {}", job.label, e);
                stats.record_failure();
            }
        }

        JobOutcome {
            index,
            label: job.label,
            hostname: job.hostname,
            result,
        }
    }
}

impl Default for BatchRunner {
    fn default() -> Self {
        Self::new(BatchConfig::default())
    }
}
