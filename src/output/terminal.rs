// Terminal Output Module
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use crate::error::NormalizeError;
use crate::models::Fact;
use colored::*;
use std::fmt::Write;

/// Format facts as a colored listing
pub fn format_facts(facts: &[Fact], label: Option<&str>) -> String {
    let mut out = String::new();

    if let Some(label) = label {
        let _ = writeln!(out, "\n{}", label.cyan().bold());
        let _ = writeln!(out, "{}", "=".repeat(50));
    }

    for fact in facts {
        match fact {
            Fact::Network(network) => {
                let _ = writeln!(out, "{} {}", "Network    ".blue().bold(), network.name);
            }
            Fact::Hostname(hostname) => {
                let _ = writeln!(out, "{} {}", "Hostname   ".green(), hostname.name);
            }
            Fact::Certificate(certificate) => {
                let _ = writeln!(
                    out,
                    "{} {} {}",
                    "Certificate".yellow(),
                    certificate.subject,
                    format!("[{}]", certificate.pk_number).dimmed()
                );
                let _ = writeln!(out, "            Issuer: {}", certificate.issuer);
                let _ = writeln!(
                    out,
                    "            Valid:  {} -> {}",
                    certificate.valid_from, certificate.valid_until
                );
            }
        }
    }

    out
}

/// Format a failed run
///
/// Rejected payloads are marked in yellow, environment failures (unreadable
/// files, join errors) in red.
pub fn format_failure(label: &str, error: &NormalizeError) -> String {
    if error.is_input_error() {
        format!("{} {}: rejected payload: {}", "X".yellow().bold(), label, error)
    } else {
        format!("{} {}: {}", "X".red().bold(), label, error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Certificate, Hostname, Network};

    #[test]
    fn test_format_facts_lists_every_fact() {
        colored::control::set_override(false);

        let network = Network::internet();
        let reference = network.reference();
        let facts = vec![
            Fact::Network(network),
            Fact::Hostname(Hostname::new("www.example.com", reference.clone())),
            Fact::Certificate(Certificate {
                subject: "www.example.com".to_string(),
                issuer: "C=US, O=Let's Encrypt, CN=R3".to_string(),
                valid_from: "2023-02-13T09:12:33".to_string(),
                valid_until: "2023-05-14T09:12:32".to_string(),
                pk_number: "04AB".to_string(),
                network: reference,
            }),
        ];

        let text = format_facts(&facts, Some("example.com"));
        assert!(text.contains("example.com\n"));
        assert!(text.contains("Network     internet"));
        assert!(text.contains("Hostname    www.example.com"));
        assert!(text.contains("[04AB]"));
        assert!(text.contains("2023-02-13T09:12:33 -> 2023-05-14T09:12:32"));
    }

    #[test]
    fn test_format_failure_for_rejected_payload() {
        colored::control::set_override(false);
        let err = NormalizeError::missing_field("name_value", "entry 0");
        let text = format_failure("broken.json", &err);
        assert_eq!(
            text,
            "X broken.json: rejected payload: Missing field 'name_value' in entry 0"
        );
    }

    #[test]
    fn test_format_failure_for_unreadable_file() {
        colored::control::set_override(false);
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
        let err = NormalizeError::io("missing.json", source);
        let text = format_failure("missing.json", &err);
        assert_eq!(text, "X missing.json: I/O error: missing.json: not found");
    }
}
