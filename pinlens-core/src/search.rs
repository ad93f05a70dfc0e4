//! Search for photos near a coordinate.
//!
//! The `PhotoSearcher` trait abstracts the two-stage paged search: discover
//! how many result pages exist, fetch one at random, and keep a contiguous
//! window of its photos. Implementations return the windowed photo URLs in
//! server order or a single [`SearchError`]; there is no partial success and
//! no internal retry. `ImageFetcher` covers the follow-up download of one
//! photo's bytes.

use geo::Coord;
use thiserror::Error;

use crate::PhotoReference;

/// Errors from the search pipeline and image downloads.
///
/// Variants are cheap to clone and compare so test doubles can replay them
/// verbatim. A timeout is reported as [`Transport`](Self::Transport); the
/// pipeline treats an expired request like any other connection failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SearchError {
    /// The request never produced an HTTP response.
    #[error("request to {url} failed: {message}")]
    Transport {
        /// Requested URL.
        url: String,
        /// Transport-level failure description.
        message: String,
    },
    /// The server answered with a non-success HTTP status.
    #[error("request to {url} returned HTTP status {status}")]
    HttpStatus {
        /// Requested URL.
        url: String,
        /// Status code of the response.
        status: u16,
    },
    /// The response body was not valid JSON of the expected shape.
    #[error("failed to decode response from {url}: {message}")]
    Decode {
        /// Requested URL.
        url: String,
        /// Decoder failure description.
        message: String,
    },
    /// The service answered but reported a failure status of its own.
    #[error("search service reported \"{stat}\": {message}")]
    RemoteStatus {
        /// Status token from the response body.
        stat: String,
        /// Human-readable explanation supplied by the service.
        message: String,
    },
    /// A field the pipeline depends on was absent from the response.
    #[error("search response is missing the `{field}` field")]
    MissingField {
        /// Dotted path of the missing field.
        field: &'static str,
    },
    /// The chosen page contained no photos.
    #[error("no photos available for the searched region")]
    NoResults,
}

/// Find photo URLs near a coordinate.
///
/// Implementers derive a search region from `centre`, run the two-stage
/// paged search, and return at most a window's worth of photo URLs in the
/// order the server listed them. The coordinate uses WGS84 with
/// `x = longitude` and `y = latitude`.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use pinlens_core::{PhotoReference, PhotoSearcher, SearchError};
///
/// struct CannedSearcher;
///
/// impl PhotoSearcher for CannedSearcher {
///     fn fetch_photo_references(
///         &self,
///         _centre: Coord<f64>,
///     ) -> Result<Vec<PhotoReference>, SearchError> {
///         Ok(vec![PhotoReference::new("https://example.test/1_m.jpg")])
///     }
/// }
///
/// let photos = CannedSearcher.fetch_photo_references(Coord { x: 0.0, y: 0.0 })?;
/// assert_eq!(photos.len(), 1);
/// # Ok::<(), SearchError>(())
/// ```
pub trait PhotoSearcher {
    /// Return the windowed photo URLs for the region around `centre`.
    fn fetch_photo_references(
        &self,
        centre: Coord<f64>,
    ) -> Result<Vec<PhotoReference>, SearchError>;
}

/// Download the bytes behind a photo reference.
///
/// No decoding takes place; callers receive the raw body and decide how to
/// persist or render it.
pub trait ImageFetcher {
    /// Fetch the image bytes for `reference`.
    fn fetch_image(&self, reference: &PhotoReference) -> Result<Vec<u8>, SearchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_render_their_context() {
        let error = SearchError::HttpStatus {
            url: "https://example.test/rest".into(),
            status: 503,
        };
        assert_eq!(
            error.to_string(),
            "request to https://example.test/rest returned HTTP status 503"
        );
    }

    #[test]
    fn missing_field_names_the_dotted_path() {
        let error = SearchError::MissingField {
            field: "photos.pages",
        };
        assert!(error.to_string().contains("photos.pages"));
    }

    #[test]
    fn errors_compare_equal_for_identical_context() {
        let a = SearchError::RemoteStatus {
            stat: "fail".into(),
            message: "Invalid API Key".into(),
        };
        assert_eq!(a.clone(), a);
        assert_ne!(a, SearchError::NoResults);
    }
}
