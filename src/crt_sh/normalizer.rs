// crt.sh Normalizer
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0
//
// Turns a crt.sh JSON search result into Network, Hostname and Certificate
// facts. The Network is always produced first and every other fact points
// at it.

use super::deduplicator::Deduplicator;
use super::entry::{CrtShEntry, normalize_hostname};
use super::stats::NormalizeStats;
use super::Result;
use crate::error::NormalizeError;
use crate::models::{Certificate, Fact, Hostname, Network, Reference};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::VecDeque;
use std::iter::FusedIterator;
use tracing::{debug, trace, warn};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Normalizer for crt.sh search results of one requested hostname
#[derive(Debug, Clone)]
pub struct CrtShNormalizer {
    current: String,
    reference_time: Option<DateTime<Utc>>,
}

impl CrtShNormalizer {
    /// Create a normalizer for the hostname the CT search was made for
    pub fn new(requested_hostname: &str) -> Self {
        Self {
            current: normalize_hostname(requested_hostname).to_string(),
            reference_time: None,
        }
    }

    /// Classify certificate validity against `now` instead of the wall clock
    pub fn with_reference_time(mut self, now: DateTime<Utc>) -> Self {
        self.reference_time = Some(now);
        self
    }

    /// Requested hostname with leading and trailing dots removed
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Lazily normalize a raw payload
    ///
    /// Decoding and JSON errors are returned immediately. A malformed entry
    /// is yielded as an `Err`, after which the stream ends; facts already
    /// read from such a stream must be discarded.
    pub fn facts(&self, raw: &[u8]) -> Result<FactStream> {
        let raw = raw.strip_prefix(UTF8_BOM).unwrap_or(raw);
        let text = std::str::from_utf8(raw)?;
        self.facts_from_str(text)
    }

    /// Lazily normalize an already decoded payload
    pub fn facts_from_str(&self, raw: &str) -> Result<FactStream> {
        let entries = match serde_json::from_str::<Value>(raw)? {
            Value::Array(entries) => entries,
            other => {
                return Err(NormalizeError::input_format(format!(
                    "expected a JSON array of certificates, got {}",
                    match other {
                        Value::Object(_) => "an object",
                        Value::String(_) => "a string",
                        Value::Number(_) => "a number",
                        Value::Bool(_) => "a boolean",
                        _ => "null",
                    }
                )));
            }
        };

        debug!(
            "Normalizing {} crt.sh entries for '{}'",
            entries.len(),
            self.current
        );

        Ok(FactStream::new(
            self.current.clone(),
            entries,
            self.reference_time.unwrap_or_else(Utc::now),
        ))
    }

    /// Normalize a payload completely; no facts are returned on error
    pub fn normalize(&self, raw: &[u8]) -> Result<Vec<Fact>> {
        self.normalize_with_stats(raw).map(|(facts, _)| facts)
    }

    /// Normalize a payload completely and return the run statistics
    pub fn normalize_with_stats(&self, raw: &[u8]) -> Result<(Vec<Fact>, NormalizeStats)> {
        let mut stream = self.facts(raw)?;
        let facts = stream.by_ref().collect::<Result<Vec<_>>>()?;
        Ok((facts, stream.into_stats()))
    }
}

/// Normalize a raw crt.sh payload for `requested_hostname`
pub fn normalize(raw: &[u8], requested_hostname: &str) -> Result<Vec<Fact>> {
    CrtShNormalizer::new(requested_hostname).normalize(raw)
}

/// Normalize a crt.sh payload given as text
pub fn normalize_str(raw: &str, requested_hostname: &str) -> Result<Vec<Fact>> {
    normalize(raw.as_bytes(), requested_hostname)
}

/// Lazy, ordered sequence of facts from one payload
pub struct FactStream {
    current: String,
    network: Option<Network>,
    network_ref: Reference,
    entries: std::vec::IntoIter<Value>,
    index: usize,
    pending: VecDeque<Fact>,
    seen: Deduplicator,
    stats: NormalizeStats,
    now: DateTime<Utc>,
    finished: bool,
}

impl FactStream {
    fn new(current: String, entries: Vec<Value>, now: DateTime<Utc>) -> Self {
        let network = Network::internet();
        let network_ref = network.reference();

        Self {
            current,
            network: Some(network),
            network_ref,
            entries: entries.into_iter(),
            index: 0,
            pending: VecDeque::new(),
            seen: Deduplicator::new(),
            stats: NormalizeStats::default(),
            now,
            finished: false,
        }
    }

    /// Counters for the facts produced so far
    pub fn stats(&self) -> &NormalizeStats {
        &self.stats
    }

    pub fn into_stats(self) -> NormalizeStats {
        self.stats
    }

    /// Queue every fact derived from one entry
    fn process_entry(&mut self, index: usize, value: &Value) -> Result<()> {
        let entry = CrtShEntry::from_value(index, value)?;
        let subject = entry.subject();
        let pk_number = entry.pk_number();

        for name in entry.names() {
            if !name.ends_with(self.current.as_str()) {
                trace!("'{}' is not under '{}'", name, self.current);
                self.stats.unrelated_names += 1;
            }

            if self.seen.check_and_insert(&name) {
                self.stats.hostnames_emitted += 1;
                self.pending
                    .push_back(Fact::Hostname(Hostname::new(name, self.network_ref.clone())));
            } else {
                self.stats.duplicate_names += 1;
            }
        }

        let certificate = Certificate {
            subject: subject.clone(),
            issuer: entry.issuer_name,
            valid_from: entry.not_before,
            valid_until: entry.not_after,
            pk_number,
            network: self.network_ref.clone(),
        };
        self.stats
            .record_validity(certificate.validity_status(self.now));
        self.stats.certificates_emitted += 1;
        self.pending.push_back(Fact::Certificate(certificate));

        // The subject is emitted when it falls under the requested hostname
        // even if it was already emitted, and it is never recorded as seen.
        let already_seen = self.seen.contains(&subject);
        if subject.ends_with(self.current.as_str()) || !already_seen {
            if already_seen {
                self.stats.subject_reemissions += 1;
            }
            self.stats.subject_hostnames_emitted += 1;
            self.pending
                .push_back(Fact::Hostname(Hostname::new(subject, self.network_ref.clone())));
        }

        self.stats.entries_processed += 1;
        Ok(())
    }
}

impl Iterator for FactStream {
    type Item = Result<Fact>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(network) = self.network.take() {
            return Some(Ok(Fact::Network(network)));
        }

        loop {
            if let Some(fact) = self.pending.pop_front() {
                return Some(Ok(fact));
            }

            if self.finished {
                return None;
            }

            let Some(value) = self.entries.next() else {
                self.finished = true;
                debug!(
                    "Normalized {} entries for '{}': {} hostnames, {} certificates",
                    self.stats.entries_processed,
                    self.current,
                    self.stats.hostnames_emitted + self.stats.subject_hostnames_emitted,
                    self.stats.certificates_emitted
                );
                return None;
            };

            let index = self.index;
            self.index += 1;

            if let Err(e) = self.process_entry(index, &value) {
                warn!("Aborting normalization for '{}': {}", self.current, e);
                self.finished = true;
                self.pending.clear();
                return Some(Err(e));
            }
        }
    }
}

impl FusedIterator for FactStream {}
