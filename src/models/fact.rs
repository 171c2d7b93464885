// Fact Sum Type
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use super::ooi::{Certificate, Hostname, Network};
use super::reference::Reference;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of object a fact describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectType {
    Network,
    Hostname,
    Certificate,
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObjectType::Network => "Network",
            ObjectType::Hostname => "Hostname",
            ObjectType::Certificate => "Certificate",
        };
        f.write_str(name)
    }
}

/// One typed record produced by the normalizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "object_type")]
pub enum Fact {
    Network(Network),
    Hostname(Hostname),
    Certificate(Certificate),
}

impl Fact {
    pub fn object_type(&self) -> ObjectType {
        match self {
            Fact::Network(_) => ObjectType::Network,
            Fact::Hostname(_) => ObjectType::Hostname,
            Fact::Certificate(_) => ObjectType::Certificate,
        }
    }

    /// Primary-key reference of this fact
    pub fn reference(&self) -> Reference {
        match self {
            Fact::Network(network) => network.reference(),
            Fact::Hostname(hostname) => hostname.reference(),
            Fact::Certificate(certificate) => certificate.reference(),
        }
    }

    /// Network this fact points at, `None` for the Network itself
    pub fn network(&self) -> Option<&Reference> {
        match self {
            Fact::Network(_) => None,
            Fact::Hostname(hostname) => Some(&hostname.network),
            Fact::Certificate(certificate) => Some(&certificate.network),
        }
    }

    pub fn as_hostname(&self) -> Option<&Hostname> {
        match self {
            Fact::Hostname(hostname) => Some(hostname),
            _ => None,
        }
    }

    pub fn as_certificate(&self) -> Option<&Certificate> {
        match self {
            Fact::Certificate(certificate) => Some(certificate),
            _ => None,
        }
    }
}

/// Serializable view of a fact with its primary key attached
#[derive(Debug, Clone, Serialize)]
pub struct KeyedFact<'a> {
    pub primary_key: Reference,
    #[serde(flatten)]
    pub fact: &'a Fact,
}

impl<'a> From<&'a Fact> for KeyedFact<'a> {
    fn from(fact: &'a Fact) -> Self {
        Self {
            primary_key: fact.reference(),
            fact,
        }
    }
}
