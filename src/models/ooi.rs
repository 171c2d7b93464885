// Object Types
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0
//
// Network, Hostname and Certificate facts as consumed by the object graph

use super::reference::Reference;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name of the logical network every crt.sh fact lives in
pub const INTERNET: &str = "internet";

/// Timestamp layouts crt.sh uses for `not_before` / `not_after`
const VALIDITY_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// A named network namespace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub name: String,
}

impl Network {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The public internet
    pub fn internet() -> Self {
        Self::new(INTERNET)
    }

    pub fn reference(&self) -> Reference {
        Reference::from_parts("Network", [self.name.as_str()])
    }
}

/// A DNS name observed on a certificate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hostname {
    pub name: String,
    pub network: Reference,
}

impl Hostname {
    pub fn new(name: impl Into<String>, network: Reference) -> Self {
        Self {
            name: name.into(),
            network,
        }
    }

    /// Reference keyed by the network's natural key and the hostname
    pub fn reference(&self) -> Reference {
        let parts = self.network.key_parts().chain([self.name.as_str()]);
        Reference::from_parts("Hostname", parts)
    }
}

/// Validity of a certificate relative to a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidityStatus {
    /// Inside its validity window
    Current,
    /// `not_after` lies in the past
    Expired,
    /// `not_before` lies in the future
    NotYetValid,
    /// Timestamps could not be parsed
    Unknown,
}

/// A certificate as reported by the CT search
///
/// Validity timestamps are kept verbatim; they are never validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub subject: String,
    pub issuer: String,
    pub valid_from: String,
    pub valid_until: String,
    pub pk_number: String,
    pub network: Reference,
}

impl Certificate {
    pub fn reference(&self) -> Reference {
        Reference::from_parts("Certificate", [self.issuer.as_str(), self.pk_number.as_str()])
    }

    /// Classify the validity window against `now`
    pub fn validity_status(&self, now: DateTime<Utc>) -> ValidityStatus {
        let (Some(from), Some(until)) = (
            parse_validity(&self.valid_from),
            parse_validity(&self.valid_until),
        ) else {
            return ValidityStatus::Unknown;
        };

        if now < from {
            ValidityStatus::NotYetValid
        } else if now > until {
            ValidityStatus::Expired
        } else {
            ValidityStatus::Current
        }
    }
}

/// Parse a crt.sh validity timestamp (UTC, no offset) or an RFC 3339 one
pub fn parse_validity(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    VALIDITY_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn certificate(valid_from: &str, valid_until: &str) -> Certificate {
        Certificate {
            subject: "example.com".to_string(),
            issuer: "C=US, O=Let's Encrypt, CN=R3".to_string(),
            valid_from: valid_from.to_string(),
            valid_until: valid_until.to_string(),
            pk_number: "1A2B".to_string(),
            network: Network::internet().reference(),
        }
    }

    #[test]
    fn test_network_reference() {
        assert_eq!(Network::internet().reference().as_str(), "Network|internet");
    }

    #[test]
    fn test_hostname_reference_uses_network_name() {
        let hostname = Hostname::new("www.example.com", Network::internet().reference());
        assert_eq!(hostname.reference().as_str(), "Hostname|internet|www.example.com");
    }

    #[test]
    fn test_hostname_reference_follows_its_own_network() {
        let hostname = Hostname::new("db.corp", Network::new("lab").reference());
        assert_eq!(hostname.reference().as_str(), "Hostname|lab|db.corp");

        let json = r#"{"name": "db.corp", "network": "Network|lab"}"#;
        let parsed: Hostname = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.reference(), hostname.reference());
    }

    #[test]
    fn test_hostname_with_malformed_network_is_rejected() {
        let json = r#"{"name": "db.corp", "network": "lab"}"#;
        assert!(serde_json::from_str::<Hostname>(json).is_err());
    }

    #[test]
    fn test_certificate_reference() {
        let cert = certificate("2024-01-01T00:00:00", "2024-04-01T00:00:00");
        assert_eq!(
            cert.reference().as_str(),
            "Certificate|C=US, O=Let's Encrypt, CN=R3|1A2B"
        );
    }

    #[test]
    fn test_validity_status() {
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();

        let current = certificate("2024-01-01T00:00:00", "2024-04-01T00:00:00");
        assert_eq!(current.validity_status(now), ValidityStatus::Current);

        let expired = certificate("2023-01-01T00:00:00", "2023-04-01T00:00:00");
        assert_eq!(expired.validity_status(now), ValidityStatus::Expired);

        let future = certificate("2024-03-01T00:00:00", "2024-06-01T00:00:00");
        assert_eq!(future.validity_status(now), ValidityStatus::NotYetValid);

        let garbage = certificate("yesterday", "tomorrow");
        assert_eq!(garbage.validity_status(now), ValidityStatus::Unknown);
    }

    #[test]
    fn test_parse_validity_formats() {
        assert!(parse_validity("2024-01-01T00:00:00").is_some());
        assert!(parse_validity("2024-01-01T00:00:00.123").is_some());
        assert!(parse_validity("2024-01-01 00:00:00").is_some());
        assert!(parse_validity("2024-01-01T00:00:00Z").is_some());
        assert!(parse_validity("").is_none());
    }
}
