// JSON Output Module
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use crate::models::{Fact, KeyedFact};

/// Generate a JSON array of facts, each carrying its primary key
pub fn generate_json(facts: &[Fact], pretty: bool) -> serde_json::Result<String> {
    let keyed: Vec<KeyedFact<'_>> = facts.iter().map(KeyedFact::from).collect();
    if pretty {
        serde_json::to_string_pretty(&keyed)
    } else {
        serde_json::to_string(&keyed)
    }
}

/// Generate one JSON object per line
pub fn generate_jsonl(facts: &[Fact]) -> serde_json::Result<String> {
    let mut out = String::new();
    for fact in facts {
        out.push_str(&serde_json::to_string(&KeyedFact::from(fact))?);
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Hostname, Network};

    fn facts() -> Vec<Fact> {
        let network = Network::internet();
        let reference = network.reference();
        vec![
            Fact::Network(network),
            Fact::Hostname(Hostname::new("example.com", reference)),
        ]
    }

    #[test]
    fn test_json_generation() {
        let json = generate_json(&facts(), false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[1]["primary_key"], "Hostname|internet|example.com");

        let pretty_json = generate_json(&facts(), true).unwrap();
        assert!(pretty_json.contains('\n'));
    }

    #[test]
    fn test_jsonl_generation() {
        let jsonl = generate_jsonl(&facts()).unwrap();
        let lines: Vec<_> = jsonl.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"object_type\":\"Network\""));
        assert!(lines[1].contains("\"name\":\"example.com\""));
    }

    #[test]
    fn test_jsonl_empty() {
        assert_eq!(generate_jsonl(&[]).unwrap(), "");
    }
}
