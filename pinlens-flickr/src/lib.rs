//! Flickr-backed photo search for the Pinlens engine.
//!
//! Responsibilities:
//! - Implement the `pinlens-core` search and image-fetch traits over the
//!   Flickr REST API.
//! - Build immutable search queries and decode the service's wire format.
//! - Bridge async HTTP calls to the synchronous core traits.
//!
//! Boundaries:
//! - No domain rules (bounding-box and sampling arithmetic live in
//!   `pinlens-core`).
//! - No persistence; results are handed to the caller's `PhotoStore`.
//!
//! Invariants:
//! - No shared mutable state; concurrent searches need no coordination.
//! - One failure aborts a whole search, never a partial result.

mod api;
mod client;
pub mod query;

#[doc(hidden)]
pub mod test_support;

pub use client::{
    DEFAULT_ENDPOINT, DEFAULT_USER_AGENT, FlickrPhotoSearcher, FlickrPhotoSearcherConfig,
    SearcherBuildError,
};
pub use query::SearchQuery;
