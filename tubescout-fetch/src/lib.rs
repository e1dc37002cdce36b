// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `TubeScout` Fetch
//!
//! The discovery-and-retrieval pipeline for `TubeScout`.
//!
//! Given a credential, keywords, a locale, and a result cap, the pipeline
//! discovers a deduplicated set of channel identifiers through the paginated
//! search API, then fetches detail records for them in batches, surviving
//! rate limits and partial failures along the way.
//!
//! ## Components
//!
//! - [`BackoffExecutor`] - Bounded exponential retry around every remote call
//! - [`ChannelApi`] - The seam between orchestration and transport
//! - [`YouTubeClient`] - The reqwest-backed production implementation
//! - [`ChannelPipeline`] - Sequential discovery then retrieval
//! - [`CancelToken`] - Cancellation checked before every call and sleep
//!
//! ## Example
//!
//! ```ignore
//! use tubescout_fetch::discover_channels;
//!
//! let records = discover_channels(
//!     &api_key,
//!     vec!["rust programming".to_string()],
//!     "en",
//!     "US",
//!     100,
//! )
//! .await?;
//! ```

pub mod api;
pub mod backoff;
pub mod client;
pub mod context;
mod details;
mod discovery;
pub mod error;
pub mod pipeline;

// Re-export the public surface
pub use api::{ChannelApi, ChannelItem, ChannelListPage, SearchItem, SearchPage, SearchResultId};
pub use backoff::{BackoffExecutor, BackoffPolicy, CallOutcome};
pub use client::YouTubeClient;
pub use context::{CancelToken, FetchContext, FetchSettings, SERVICE_MAX_PAGE_SIZE};
pub use error::{ApiError, FetchError};
pub use pipeline::{discover_channels, ChannelPipeline};
