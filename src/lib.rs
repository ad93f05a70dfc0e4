//! Facade crate for the Pinlens photo-discovery engine.
//!
//! This crate re-exports the core domain types and exposes the Flickr search
//! client behind a feature flag.

#![forbid(unsafe_code)]

pub use pinlens_core::{
    BoundingBox, BoundingBoxParseError, ImageFetcher, PhotoReference, PhotoSearcher, PhotoStore,
    Pin, PinError, SavedPhoto, SearchError, StoreError,
};

#[cfg(feature = "flickr")]
pub use pinlens_flickr::{FlickrPhotoSearcher, FlickrPhotoSearcherConfig, SearcherBuildError};
