//! Game log sources
//!
//! This module defines where game logs come from. Sources are async because
//! real ones talk to disk or a remote store; the ranking itself is not.

pub mod provider;

// Re-export commonly used types
pub use provider::{InMemoryLogSource, JsonFileLogSource, LogSource};
