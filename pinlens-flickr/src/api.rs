//! Flickr REST API response types for the photo search service.
//!
//! This module provides deserialisation types for the `flickr.photos.search`
//! response format. The search returns a paged envelope: a status token, the
//! page bookkeeping, and the photo records of the requested page.
//!
//! See: <https://www.flickr.com/services/api/flickr.photos.search.html>
//!
//! Fields the pipeline depends on are `Option`-wrapped rather than required;
//! absence is reported as a typed error at extraction time so a malformed
//! body and a missing field stay distinguishable.

use serde::Deserialize;

/// Photo search response envelope.
///
/// The response carries a page of photos on success or an error code and
/// message on failure. The `stat` field indicates which.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    /// Status token from the service.
    ///
    /// `"ok"` marks success; `"fail"` carries `code` and `message`.
    pub stat: String,

    /// Numeric error code when `stat` is not `"ok"`.
    pub code: Option<i64>,

    /// Optional error message when `stat` is not `"ok"`.
    pub message: Option<String>,

    /// Result payload, present on success.
    pub photos: Option<PhotoPage>,
}

impl SearchResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.stat == "ok"
    }
}

/// One page of search results.
#[derive(Debug, Deserialize)]
pub struct PhotoPage {
    /// Total number of result pages available for the search.
    pub pages: Option<u32>,

    /// Photo records on this page, in server order.
    pub photo: Option<Vec<PhotoSummary>>,
}

/// A single photo record within a page.
///
/// Only the fields the pipeline reads are modelled; the service sends many
/// more, which serde ignores.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PhotoSummary {
    /// Photo identifier assigned by the service.
    pub id: Option<String>,

    /// Title supplied by the uploader.
    pub title: Option<String>,

    /// Medium-size image URL, present when the query's extras request it.
    #[serde(rename = "url_m")]
    pub medium_url: Option<String>,
}
