//! Immutable search queries for the Flickr REST API.
//!
//! A [`SearchQuery`] is a value: the two pipeline stages each hold their own
//! query rather than mutating a shared parameter set. Stage one carries no
//! page number; stage two derives a second value via
//! [`with_page`](SearchQuery::with_page), leaving the first untouched.

use pinlens_core::BoundingBox;

/// API method invoked for every search.
pub const SEARCH_METHOD: &str = "flickr.photos.search";

/// Extra response fields requested alongside the defaults.
pub const EXTRA_FIELDS: &str = "url_m";

/// Response encoding requested from the service.
pub const RESPONSE_FORMAT: &str = "json";

/// Query parameters for one `flickr.photos.search` call.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use pinlens_core::BoundingBox;
/// use pinlens_flickr::SearchQuery;
///
/// let bbox = BoundingBox::around(Coord { x: -95.7129, y: 37.0902 });
/// let count_query = SearchQuery::new("key", &bbox, true);
/// let page_query = count_query.clone().with_page(3);
///
/// assert_eq!(count_query.page(), None);
/// assert_eq!(page_query.page(), Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    api_key: String,
    bbox: String,
    safe_search: bool,
    page: Option<u32>,
}

impl SearchQuery {
    /// Build the stage-one query for the region `bbox` without a page number.
    pub fn new(api_key: impl Into<String>, bbox: &BoundingBox, safe_search: bool) -> Self {
        Self {
            api_key: api_key.into(),
            bbox: bbox.to_string(),
            safe_search,
            page: None,
        }
    }

    /// Derive the stage-two query addressing a 1-based result page.
    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// The 1-based page this query addresses, if any.
    pub fn page(&self) -> Option<u32> {
        self.page
    }

    /// The bounding box in its comma-joined wire form.
    pub fn bbox(&self) -> &str {
        &self.bbox
    }

    /// Render the full parameter list in wire order.
    ///
    /// `safe_search` appears only when enabled and `page` only when set; the
    /// constant parameters (`method`, `extras`, `format`, `nojsoncallback`)
    /// are always present.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("method", SEARCH_METHOD.to_owned()),
            ("api_key", self.api_key.clone()),
            ("bbox", self.bbox.clone()),
        ];
        if self.safe_search {
            params.push(("safe_search", "1".to_owned()));
        }
        params.push(("extras", EXTRA_FIELDS.to_owned()));
        params.push(("format", RESPONSE_FORMAT.to_owned()));
        params.push(("nojsoncallback", "1".to_owned()));
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        params
    }
}
