//! Test utilities for photo searchers.
//!
//! This module provides [`StubPhotoSearcher`], a deterministic test double
//! for the [`PhotoSearcher`] and [`ImageFetcher`] traits that returns
//! pre-configured responses without making actual HTTP requests.

use geo::Coord;

use pinlens_core::{ImageFetcher, PhotoReference, PhotoSearcher, SearchError};

/// Stub `PhotoSearcher` for testing.
///
/// The stub returns pre-configured responses, allowing tests to verify
/// behaviour without a running photo search service. Search and image
/// outcomes are configured independently: a searcher built with
/// [`with_references`](Self::with_references) serves empty image bodies until
/// [`with_image_bytes`](Self::with_image_bytes) supplies some.
///
/// # Example
///
/// ```
/// use geo::Coord;
/// use pinlens_core::{PhotoReference, PhotoSearcher};
/// use pinlens_flickr::test_support::StubPhotoSearcher;
///
/// let searcher = StubPhotoSearcher::with_references(vec![
///     PhotoReference::new("https://live.example.com/1_m.jpg"),
///     PhotoReference::new("https://live.example.com/2_m.jpg"),
/// ]);
///
/// let photos = searcher
///     .fetch_photo_references(Coord { x: 0.0, y: 0.0 })
///     .expect("stub should succeed");
/// assert_eq!(photos.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct StubPhotoSearcher {
    search: StubResponse,
    image: Result<Vec<u8>, SearchError>,
}

#[derive(Debug, Clone)]
enum StubResponse {
    References(Vec<PhotoReference>),
    Error(SearchError),
}

impl StubPhotoSearcher {
    /// Create a searcher that returns the given references.
    ///
    /// The references will be returned regardless of the centre searched.
    #[must_use]
    pub fn with_references(references: Vec<PhotoReference>) -> Self {
        Self {
            search: StubResponse::References(references),
            image: Ok(Vec::new()),
        }
    }

    /// Create a searcher that fails every search with the given error.
    #[must_use]
    pub fn with_error(error: SearchError) -> Self {
        Self {
            search: StubResponse::Error(error),
            image: Ok(Vec::new()),
        }
    }

    /// Serve the given bytes for every image fetch.
    #[must_use]
    pub fn with_image_bytes(mut self, bytes: Vec<u8>) -> Self {
        self.image = Ok(bytes);
        self
    }

    /// Fail every image fetch with the given error.
    #[must_use]
    pub fn with_image_error(mut self, error: SearchError) -> Self {
        self.image = Err(error);
        self
    }
}

impl PhotoSearcher for StubPhotoSearcher {
    fn fetch_photo_references(
        &self,
        _centre: Coord<f64>,
    ) -> Result<Vec<PhotoReference>, SearchError> {
        match &self.search {
            StubResponse::References(references) => Ok(references.clone()),
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}

impl ImageFetcher for StubPhotoSearcher {
    fn fetch_image(&self, _reference: &PhotoReference) -> Result<Vec<u8>, SearchError> {
        self.image.clone()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn centre() -> Coord<f64> {
        Coord { x: 0.0, y: 0.0 }
    }

    fn sample_references(count: usize) -> Vec<PhotoReference> {
        (0..count)
            .map(|i| PhotoReference::new(format!("https://live.example.com/{i}_m.jpg")))
            .collect()
    }

    #[rstest]
    fn with_references_returns_configured_window() {
        let references = sample_references(3);
        let searcher = StubPhotoSearcher::with_references(references.clone());

        let result = searcher
            .fetch_photo_references(centre())
            .expect("should succeed");

        assert_eq!(result, references);
    }

    #[rstest]
    fn with_error_returns_configured_error() {
        let searcher = StubPhotoSearcher::with_error(SearchError::NoResults);

        let err = searcher
            .fetch_photo_references(centre())
            .expect_err("should fail");

        assert_eq!(err, SearchError::NoResults);
    }

    #[rstest]
    fn image_fetch_defaults_to_an_empty_body() {
        let searcher = StubPhotoSearcher::with_references(sample_references(1));

        let bytes = searcher
            .fetch_image(&PhotoReference::new("https://live.example.com/1_m.jpg"))
            .expect("should succeed");

        assert!(bytes.is_empty());
    }

    #[rstest]
    fn with_image_bytes_serves_the_configured_body() {
        let searcher =
            StubPhotoSearcher::with_references(sample_references(1)).with_image_bytes(vec![1, 2]);

        let bytes = searcher
            .fetch_image(&PhotoReference::new("https://live.example.com/1_m.jpg"))
            .expect("should succeed");

        assert_eq!(bytes, vec![1, 2]);
    }

    #[rstest]
    fn with_image_error_fails_the_fetch() {
        let searcher = StubPhotoSearcher::with_references(sample_references(1)).with_image_error(
            SearchError::HttpStatus {
                url: "https://live.example.com/1_m.jpg".into(),
                status: 404,
            },
        );

        let err = searcher
            .fetch_image(&PhotoReference::new("https://live.example.com/1_m.jpg"))
            .expect_err("should fail");

        assert!(matches!(err, SearchError::HttpStatus { status: 404, .. }));
    }
}
