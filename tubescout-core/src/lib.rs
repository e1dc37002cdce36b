// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `TubeScout` Core
//!
//! Core domain types for the `TubeScout` channel discovery pipeline.
//!
//! This crate provides the foundational types shared by the rest of the
//! workspace, with no network dependencies:
//!
//! - Channel types ([`ChannelId`], [`ChannelRecord`])
//! - Query types ([`SearchQuery`], [`LocaleFilter`])
//! - Error types ([`CoreError`])
//!
//! ## Key Types
//!
//! - [`ChannelId`] - Opaque identifier for a remote channel; the canonical
//!   channel URL is derived from it, never read from a remote response.
//! - [`ChannelRecord`] - Normalized output entity. Numeric fields that are
//!   absent upstream stay `None` ("unavailable"), never zero.
//! - [`SearchQuery`] - Validated discovery input: keywords, locale, limit.
//! - [`LocaleFilter`] - Language/region pair passed through to every search.

pub mod error;
pub mod models;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{ChannelId, ChannelRecord, LocaleFilter, SearchQuery};
