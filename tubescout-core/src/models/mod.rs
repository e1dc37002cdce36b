//! Domain models for `TubeScout`.
//!
//! This module contains the data structures flowing through the discovery
//! pipeline: channel identifiers and records on the output side, search
//! queries and locale filters on the input side.
//!
//! ## Submodules
//!
//! - [`channel`] - Channel types ([`ChannelId`], [`ChannelRecord`])
//! - [`query`] - Query types ([`SearchQuery`], [`LocaleFilter`])

mod channel;
mod query;

// Re-export everything at the models level
pub use channel::{ChannelId, ChannelRecord};
pub use query::{LocaleFilter, SearchQuery};

#[cfg(test)]
mod serde_tests;
