// Object References
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between the object type and natural key parts of a reference
pub const REFERENCE_SEPARATOR: char = '|';

/// Primary-key reference of a fact in the object graph
///
/// Formatted as `<ObjectType>|<key>|<key>...`, e.g. `Hostname|internet|example.com`.
/// A reference always carries an object type and at least one key part;
/// deserialization rejects strings that do not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Reference(String);

impl Reference {
    /// Build a reference from an object type name and its natural key parts
    pub fn from_parts<'a>(object_type: &str, parts: impl IntoIterator<Item = &'a str>) -> Self {
        let mut reference = object_type.to_string();
        for part in parts {
            reference.push(REFERENCE_SEPARATOR);
            reference.push_str(part);
        }
        Self(reference)
    }

    /// Object type this reference points to
    pub fn object_type(&self) -> &str {
        self.0
            .split(REFERENCE_SEPARATOR)
            .next()
            .unwrap_or_default()
    }

    /// Natural key parts, without the object type
    pub fn key_parts(&self) -> impl Iterator<Item = &str> {
        self.0.split(REFERENCE_SEPARATOR).skip(1)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Reference {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.split_once(REFERENCE_SEPARATOR) {
            Some((object_type, _)) if !object_type.is_empty() => Ok(Self(value)),
            _ => Err(format!(
                "invalid reference '{}': expected <ObjectType>|<key>",
                value
            )),
        }
    }
}

impl From<Reference> for String {
    fn from(reference: Reference) -> Self {
        reference.0
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Reference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
