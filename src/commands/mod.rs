// Commands module - Command Pattern implementation
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

mod command;
mod router;

// Individual command implementations
mod batch;
mod config_example;
mod normalize;

pub use command::Command;
pub use router::CommandRouter;

// Re-export individual commands for testing purposes
pub use batch::BatchCommand;
pub use config_example::ConfigExampleCommand;
pub use normalize::NormalizeCommand;
