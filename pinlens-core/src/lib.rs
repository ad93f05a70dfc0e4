//! Core domain types for the Pinlens photo-discovery engine.
//!
//! These models cover the geometry and arithmetic of bounded-region photo
//! search: clamped bounding boxes, page and window sampling, and the error
//! taxonomy shared by search clients. Constructors return `Result` to surface
//! invalid input early; the sampling functions are total so callers never
//! face an out-of-range slice.

pub mod bbox;
pub mod photo;
pub mod pin;
pub mod sampling;
pub mod search;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use bbox::{
    BoundingBox, BoundingBoxParseError, DEFAULT_HALF_HEIGHT, DEFAULT_HALF_WIDTH, LATITUDE_RANGE,
    LONGITUDE_RANGE,
};
pub use photo::{PhotoReference, SavedPhoto};
pub use pin::{Pin, PinError};
pub use sampling::{MAX_PAGE_DEPTH, MAX_WINDOW_LEN};
pub use search::{ImageFetcher, PhotoSearcher, SearchError};
pub use store::{PhotoStore, StoreError};
