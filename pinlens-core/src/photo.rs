//! Domain wrappers for photo references and persisted photo records.

use std::{fmt, ops::Deref, time::SystemTime};

/// Medium-size image URL extracted from a search response.
///
/// # Examples
/// ```
/// # use pinlens_core::PhotoReference;
/// let reference = PhotoReference::new("https://live.example.com/1_a_m.jpg");
/// assert!(reference.as_ref().ends_with("_m.jpg"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoReference(String);

impl PhotoReference {
    /// Construct a new [`PhotoReference`] from an owned or borrowed string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Consume the wrapper and return the inner [`String`].
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<&str> for PhotoReference {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for PhotoReference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for PhotoReference {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for PhotoReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A downloaded photo as persisted against a pin.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedPhoto {
    /// Source URL the bytes were fetched from.
    pub reference: PhotoReference,
    /// Raw image bytes, undecoded.
    pub bytes: Vec<u8>,
    /// Moment the record was created.
    pub saved_at: SystemTime,
}

impl SavedPhoto {
    /// Construct a record timestamped with the current time.
    ///
    /// # Examples
    /// ```
    /// # use pinlens_core::{PhotoReference, SavedPhoto};
    /// let photo = SavedPhoto::new(PhotoReference::new("https://example.test/p.jpg"), vec![1, 2]);
    /// assert_eq!(photo.bytes.len(), 2);
    /// ```
    pub fn new(reference: PhotoReference, bytes: Vec<u8>) -> Self {
        Self {
            reference,
            bytes,
            saved_at: SystemTime::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_round_trips_inner_string() {
        let reference = PhotoReference::new("https://example.test/p.jpg");
        assert_eq!(reference.to_string(), "https://example.test/p.jpg");
        assert_eq!(reference.into_inner(), "https://example.test/p.jpg");
    }

    #[test]
    fn saved_photo_keeps_reference_and_bytes() {
        let photo = SavedPhoto::new(PhotoReference::from("https://example.test/p.jpg"), vec![9]);
        assert_eq!(photo.reference.as_ref(), "https://example.test/p.jpg");
        assert_eq!(photo.bytes, vec![9]);
    }
}
