//! HTTP-based `PhotoSearcher` using the Flickr photo search API.
//!
//! This module provides [`FlickrPhotoSearcher`], an implementation of the
//! [`PhotoSearcher`] and [`ImageFetcher`] traits that runs the two-stage
//! paged search over HTTP: one call to learn the total page count, a draw of
//! a random page, a second call to fetch it, and a draw of a contiguous
//! window of its photos.
//!
//! # Architecture
//!
//! The core traits are synchronous to keep them embeddable in synchronous
//! contexts. This client bridges the async HTTP calls to the sync interface
//! by blocking on a Tokio runtime internally. Randomness is drawn from a
//! fresh generator per call, derived from the configured seed when one is
//! set, so invocations share no state and equal seeds reproduce both draws.
//!
//! # Example
//!
//! ```no_run
//! use geo::Coord;
//! use pinlens_core::PhotoSearcher;
//! use pinlens_flickr::FlickrPhotoSearcher;
//!
//! let searcher = FlickrPhotoSearcher::new("your-api-key")?;
//! let photos = searcher.fetch_photo_references(Coord { x: -95.7129, y: 37.0902 })?;
//! for url in &photos {
//!     println!("{url}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::future::Future;
use std::time::Duration;

use geo::Coord;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use reqwest::Client;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

use pinlens_core::{
    BoundingBox, DEFAULT_HALF_HEIGHT, DEFAULT_HALF_WIDTH, ImageFetcher, LATITUDE_RANGE,
    LONGITUDE_RANGE, MAX_PAGE_DEPTH, MAX_WINDOW_LEN, PhotoReference, PhotoSearcher, SearchError,
    sampling,
};

use crate::api::{PhotoSummary, SearchResponse};
use crate::query::SearchQuery;

/// Error type for [`FlickrPhotoSearcher`] construction failures.
#[derive(Debug)]
pub enum SearcherBuildError {
    /// The configured API key was empty.
    MissingApiKey,
    /// The configured endpoint was not a valid URL.
    Endpoint(url::ParseError),
    /// Failed to build the HTTP client.
    HttpClient(reqwest::Error),
    /// Failed to build the Tokio runtime.
    Runtime(std::io::Error),
}

impl std::fmt::Display for SearcherBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingApiKey => write!(f, "an API key is required"),
            Self::Endpoint(err) => write!(f, "invalid endpoint URL: {err}"),
            Self::HttpClient(err) => write!(f, "failed to build HTTP client: {err}"),
            Self::Runtime(err) => write!(f, "failed to build Tokio runtime: {err}"),
        }
    }
}

impl std::error::Error for SearcherBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MissingApiKey => None,
            Self::Endpoint(err) => Some(err),
            Self::HttpClient(err) => Some(err),
            Self::Runtime(err) => Some(err),
        }
    }
}

/// Default endpoint of the photo search service.
pub const DEFAULT_ENDPOINT: &str = "https://api.flickr.com/services/rest";

/// Default user agent for search requests.
pub const DEFAULT_USER_AGENT: &str = "pinlens-flickr/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`FlickrPhotoSearcher`].
#[derive(Clone)]
pub struct FlickrPhotoSearcherConfig {
    /// API key sent with every search request.
    pub api_key: String,
    /// Endpoint URL of the search service.
    pub endpoint: String,
    /// Request timeout duration, applied to connect and overall time.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
    /// Half width of the search region in degrees of longitude.
    pub half_width: f64,
    /// Half height of the search region in degrees of latitude.
    pub half_height: f64,
    /// Whether to restrict results to safe content.
    pub safe_search: bool,
    /// Deepest result page eligible for the page draw.
    pub page_depth: u32,
    /// Largest number of photos kept from a fetched page.
    pub window_len: usize,
    /// Seed for the page and window draws; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl std::fmt::Debug for FlickrPhotoSearcherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlickrPhotoSearcherConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("half_width", &self.half_width)
            .field("half_height", &self.half_height)
            .field("safe_search", &self.safe_search)
            .field("page_depth", &self.page_depth)
            .field("window_len", &self.window_len)
            .field("seed", &self.seed)
            .finish()
    }
}

impl Default for FlickrPhotoSearcherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            half_width: DEFAULT_HALF_WIDTH,
            half_height: DEFAULT_HALF_HEIGHT,
            safe_search: true,
            page_depth: MAX_PAGE_DEPTH,
            window_len: MAX_WINDOW_LEN,
            seed: None,
        }
    }
}

impl FlickrPhotoSearcherConfig {
    /// Create a new configuration with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Set the endpoint URL of the search service.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the half extents of the search region in degrees.
    #[must_use]
    pub fn with_half_extents(mut self, half_width: f64, half_height: f64) -> Self {
        self.half_width = half_width;
        self.half_height = half_height;
        self
    }

    /// Toggle the safe-search restriction.
    #[must_use]
    pub fn with_safe_search(mut self, safe_search: bool) -> Self {
        self.safe_search = safe_search;
        self
    }

    /// Set the deepest result page eligible for the page draw.
    #[must_use]
    pub fn with_page_depth(mut self, page_depth: u32) -> Self {
        self.page_depth = page_depth;
        self
    }

    /// Set the largest number of photos kept from a fetched page.
    #[must_use]
    pub fn with_window_len(mut self, window_len: usize) -> Self {
        self.window_len = window_len;
        self
    }

    /// Seed the page and window draws for reproducible searches.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// HTTP-based photo searcher for the Flickr search API.
///
/// The searcher implements the synchronous [`PhotoSearcher`] and
/// [`ImageFetcher`] traits by internally blocking on asynchronous HTTP
/// requests. It owns a Tokio runtime that is reused across calls, avoiding
/// the overhead of creating a new runtime per request.
///
/// # Runtime behaviour
///
/// When called from outside any Tokio runtime, the searcher uses its own
/// stored runtime. When called from within an existing multi-threaded Tokio
/// runtime (detected via [`Handle::try_current()`] and
/// [`RuntimeFlavor::MultiThread`]), it uses that runtime's handle with
/// [`tokio::task::block_in_place`] to avoid nested runtime panics.
///
/// When called from within a `current_thread` Tokio runtime, the searcher
/// falls back to its own internal runtime. This avoids the panic that
/// `block_in_place` would cause, but may deadlock if the caller's runtime is
/// driving IO or timers that this request depends on. Async callers should
/// prefer [`fetch_photo_references_async`] and [`fetch_image_async`]
/// directly.
///
/// [`fetch_photo_references_async`]: Self::fetch_photo_references_async
/// [`fetch_image_async`]: Self::fetch_image_async
pub struct FlickrPhotoSearcher {
    client: Client,
    config: FlickrPhotoSearcherConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for FlickrPhotoSearcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlickrPhotoSearcher")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl FlickrPhotoSearcher {
    /// Create a new searcher with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn new(api_key: impl Into<String>) -> Result<Self, SearcherBuildError> {
        Self::with_config(FlickrPhotoSearcherConfig::new(api_key))
    }

    /// Create a new searcher with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty, the endpoint is not a valid
    /// URL, or the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: FlickrPhotoSearcherConfig) -> Result<Self, SearcherBuildError> {
        if config.api_key.is_empty() {
            return Err(SearcherBuildError::MissingApiKey);
        }
        Url::parse(&config.endpoint).map_err(SearcherBuildError::Endpoint)?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(SearcherBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(SearcherBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// Run the two-stage search around `centre` and return the windowed
    /// photo URLs in server order.
    ///
    /// The stages are strictly sequential: the page count from the first
    /// call feeds the page draw, and the fetched page feeds the window
    /// draw. Dropping the returned future between the stages aborts the
    /// search with nothing fetched.
    ///
    /// # Errors
    ///
    /// Any stage failure aborts the whole search; see [`SearchError`] for
    /// the taxonomy. There are no partial results and no internal retries,
    /// though re-invoking re-randomises both draws.
    pub async fn fetch_photo_references_async(
        &self,
        centre: Coord<f64>,
    ) -> Result<Vec<PhotoReference>, SearchError> {
        let bbox = BoundingBox::clamped(
            centre,
            self.config.half_width,
            self.config.half_height,
            &LONGITUDE_RANGE,
            &LATITUDE_RANGE,
        );
        let query = SearchQuery::new(self.config.api_key.as_str(), &bbox, self.config.safe_search);
        let mut rng = self.draw_rng();

        let counted = self.send_search(&query).await?;
        let total_pages = total_pages_from(&counted)?;
        let page = sampling::select_page(total_pages, self.config.page_depth, &mut rng);
        log::debug!("search at {bbox}: {total_pages} pages reported, fetching page {page}");

        let paged = self.send_search(&query.with_page(page)).await?;
        let records = photo_records_from(paged)?;
        references_for_window(records, self.config.window_len, &mut rng)
    }

    /// Download the raw bytes behind `reference`.
    ///
    /// No decoding takes place; the response body is returned as-is.
    ///
    /// # Errors
    ///
    /// Transport and HTTP status failures map to the same [`SearchError`]
    /// variants as the search stages.
    pub async fn fetch_image_async(
        &self,
        reference: &PhotoReference,
    ) -> Result<Vec<u8>, SearchError> {
        let url = reference.as_ref();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, url))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?;
        Ok(bytes.to_vec())
    }

    /// Issue one search call and return its decoded, status-checked body.
    async fn send_search(&self, query: &SearchQuery) -> Result<SearchResponse, SearchError> {
        let url = self.config.endpoint.as_str();
        let response = self
            .client
            .get(url)
            .query(&query.params())
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, url))?;

        let decoded: SearchResponse =
            response.json().await.map_err(|err| SearchError::Decode {
                url: url.to_owned(),
                message: err.to_string(),
            })?;

        ensure_remote_ok(decoded)
    }

    /// Build the per-call draw generator.
    ///
    /// A configured seed derives a fresh generator each call, so repeated
    /// searches with the same seed make identical draws.
    fn draw_rng(&self) -> ChaCha8Rng {
        match self.config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }

    /// Convert a reqwest error to a `SearchError`.
    ///
    /// Timeouts fold into [`SearchError::Transport`]; the pipeline does not
    /// distinguish an expired request from a failed connection.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> SearchError {
        if error.is_timeout() {
            return SearchError::Transport {
                url: url.to_owned(),
                message: format!(
                    "request timed out after {}s",
                    self.config.timeout.as_secs()
                ),
            };
        }

        if let Some(status) = error.status() {
            return SearchError::HttpStatus {
                url: url.to_owned(),
                status: status.as_u16(),
            };
        }

        SearchError::Transport {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }

    /// Block on `future` using the ambient runtime when safe, otherwise the
    /// searcher's own.
    fn run_blocking<F: Future>(&self, future: F) -> F::Output {
        // block_in_place requires a multi-threaded runtime; for
        // current_thread runtimes we fall back to our own stored runtime.
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}

/// Check the service's own status token, passing the body through on `ok`.
fn ensure_remote_ok(response: SearchResponse) -> Result<SearchResponse, SearchError> {
    if response.is_ok() {
        return Ok(response);
    }
    let SearchResponse {
        stat,
        code,
        message,
        ..
    } = response;
    let message = message.unwrap_or_else(|| match code {
        Some(code) => format!("error code {code}"),
        None => String::new(),
    });
    Err(SearchError::RemoteStatus { stat, message })
}

/// Extract the total page count from a stage-one response.
fn total_pages_from(response: &SearchResponse) -> Result<u32, SearchError> {
    response
        .photos
        .as_ref()
        .ok_or(SearchError::MissingField { field: "photos" })?
        .pages
        .ok_or(SearchError::MissingField {
            field: "photos.pages",
        })
}

/// Extract the photo records from a stage-two response.
fn photo_records_from(response: SearchResponse) -> Result<Vec<PhotoSummary>, SearchError> {
    response
        .photos
        .ok_or(SearchError::MissingField { field: "photos" })?
        .photo
        .ok_or(SearchError::MissingField {
            field: "photos.photo",
        })
}

/// Draw a window over `records` and map it to photo references.
///
/// Fails with [`SearchError::NoResults`] on an empty page and with
/// [`SearchError::MissingField`] when any windowed record lacks its medium
/// URL; a partially usable window is never returned.
fn references_for_window<R: Rng + ?Sized>(
    records: Vec<PhotoSummary>,
    window_cap: usize,
    rng: &mut R,
) -> Result<Vec<PhotoReference>, SearchError> {
    if records.is_empty() {
        return Err(SearchError::NoResults);
    }

    let window = sampling::select_window(records.len(), window_cap, rng);
    log::debug!(
        "keeping {} of {} photos from offset {}",
        window.len(),
        records.len(),
        window.start
    );

    records
        .into_iter()
        .skip(window.start)
        .take(window.len())
        .map(|record| {
            let id = record.id;
            record.medium_url.map(PhotoReference::new).ok_or_else(|| {
                log::warn!(
                    "photo {} has no medium URL; abandoning the window",
                    id.as_deref().unwrap_or("<unknown>")
                );
                SearchError::MissingField {
                    field: "photos.photo.url_m",
                }
            })
        })
        .collect()
}

impl PhotoSearcher for FlickrPhotoSearcher {
    /// Run the two-stage search, blocking until it completes or fails.
    ///
    /// # Runtime requirements
    ///
    /// When called from within an existing Tokio runtime, the runtime must
    /// be multi-threaded (`flavor = "multi_thread"`). From a
    /// `current_thread` runtime the method falls back to the searcher's own
    /// runtime, which may block the caller's runtime; async callers should
    /// use [`FlickrPhotoSearcher::fetch_photo_references_async`] instead.
    fn fetch_photo_references(
        &self,
        centre: Coord<f64>,
    ) -> Result<Vec<PhotoReference>, SearchError> {
        self.run_blocking(self.fetch_photo_references_async(centre))
    }
}

impl ImageFetcher for FlickrPhotoSearcher {
    /// Download one photo's bytes, blocking until done.
    ///
    /// Shares the runtime behaviour of
    /// [`fetch_photo_references`](PhotoSearcher::fetch_photo_references).
    fn fetch_image(&self, reference: &PhotoReference) -> Result<Vec<u8>, SearchError> {
        self.run_blocking(self.fetch_image_async(reference))
    }
}
