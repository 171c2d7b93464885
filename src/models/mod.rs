// Fact Models Module
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0
//
// Typed facts handed to the object-graph store

pub mod fact;
pub mod ooi;
pub mod reference;

pub use fact::{Fact, KeyedFact, ObjectType};
pub use ooi::{Certificate, Hostname, INTERNET, Network, ValidityStatus};
pub use reference::Reference;
