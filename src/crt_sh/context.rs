// Run Context
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0
//
// Metadata the job runner hands to a normalizer run, and the requested
// hostname extracted from it

use super::Result;
use crate::error::NormalizeError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Path of the requested hostname inside the boefje arguments
pub const HOSTNAME_PATH: [&str; 3] = ["input", "hostname", "name"];

/// Metadata of the boefje run that fetched the raw payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoefjeMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boefje: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default)]
    pub arguments: Value,
}

/// Metadata of a normalizer run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizerMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub boefje_meta: BoefjeMeta,
}

impl NormalizerMeta {
    /// Parse metadata from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read metadata from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| NormalizeError::io(path.display().to_string(), e))?;
        Self::from_json(&content)
    }

    /// Requested hostname at `arguments.input.hostname.name`
    pub fn requested_hostname(&self) -> Result<&str> {
        let mut value = &self.boefje_meta.arguments;
        let mut location = String::from("arguments");

        for key in HOSTNAME_PATH {
            value = value
                .get(key)
                .ok_or_else(|| NormalizeError::missing_field(key, location.clone()))?;
            location.push('.');
            location.push_str(key);
        }

        value.as_str().ok_or_else(|| NormalizeError::InvalidField {
            field: "name".to_string(),
            location: "arguments.input.hostname".to_string(),
            expected: "a string",
        })
    }
}

/// Context of one normalization run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    /// Requested hostname as supplied, before dot stripping
    pub requested_hostname: String,
}

impl RunContext {
    pub fn new(requested_hostname: impl Into<String>) -> Self {
        Self {
            requested_hostname: requested_hostname.into(),
        }
    }

    /// Build the context from normalizer metadata
    pub fn from_meta(meta: &NormalizerMeta) -> Result<Self> {
        meta.requested_hostname().map(Self::new)
    }
}
