//! Persistence seam for photos saved against a pin.
//!
//! The `PhotoStore` trait defines the interface the search pipeline hands
//! its results to. The engine never persists anything itself; a store
//! implementation (device database, file tree, test double) owns durability.
//! Refreshing a pin's collection is expressed through this seam as
//! [`clear_pin`](PhotoStore::clear_pin) followed by a fresh search and
//! [`save_photos`](PhotoStore::save_photos).

use thiserror::Error;

use crate::SavedPhoto;

/// Errors raised by [`PhotoStore`] implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backing store rejected or failed the operation.
    #[error("photo store failure: {message}")]
    Backend {
        /// Failure description from the backing store.
        message: String,
    },
}

/// Store and retrieve photos keyed by pin identifier.
///
/// Saved order is significant: [`photos_for_pin`](PhotoStore::photos_for_pin)
/// returns records in the order they were saved, which preserves the server
/// order of a search window. Reading an unknown pin yields an empty
/// collection, not an error, and clearing one is a no-op.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use pinlens_core::{PhotoReference, PhotoStore, SavedPhoto, StoreError};
///
/// #[derive(Default)]
/// struct MapStore {
///     photos: HashMap<u64, Vec<SavedPhoto>>,
/// }
///
/// impl PhotoStore for MapStore {
///     fn save_photos(&mut self, pin_id: u64, photos: Vec<SavedPhoto>) -> Result<(), StoreError> {
///         self.photos.entry(pin_id).or_default().extend(photos);
///         Ok(())
///     }
///
///     fn photos_for_pin(&self, pin_id: u64) -> Result<Vec<SavedPhoto>, StoreError> {
///         Ok(self.photos.get(&pin_id).cloned().unwrap_or_default())
///     }
///
///     fn clear_pin(&mut self, pin_id: u64) -> Result<(), StoreError> {
///         self.photos.remove(&pin_id);
///         Ok(())
///     }
/// }
///
/// let mut store = MapStore::default();
/// store.save_photos(1, vec![SavedPhoto::new(PhotoReference::new("u"), vec![0])])?;
/// assert_eq!(store.photos_for_pin(1)?.len(), 1);
/// store.clear_pin(1)?;
/// assert!(store.photos_for_pin(1)?.is_empty());
/// # Ok::<(), StoreError>(())
/// ```
pub trait PhotoStore {
    /// Append `photos` to the collection saved for `pin_id`.
    fn save_photos(&mut self, pin_id: u64, photos: Vec<SavedPhoto>) -> Result<(), StoreError>;

    /// Return the saved photos for `pin_id` in save order.
    fn photos_for_pin(&self, pin_id: u64) -> Result<Vec<SavedPhoto>, StoreError>;

    /// Remove every photo saved for `pin_id`.
    fn clear_pin(&mut self, pin_id: u64) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::{PhotoReference, test_support::MemoryPhotoStore};

    #[fixture]
    fn window() -> Vec<SavedPhoto> {
        vec![
            SavedPhoto::new(PhotoReference::new("https://example.test/a_m.jpg"), vec![1]),
            SavedPhoto::new(PhotoReference::new("https://example.test/b_m.jpg"), vec![2]),
        ]
    }

    #[rstest]
    fn returns_photos_in_save_order(window: Vec<SavedPhoto>) {
        let mut store = MemoryPhotoStore::default();
        store.save_photos(1, window.clone()).expect("save photos");
        assert_eq!(store.photos_for_pin(1).expect("load photos"), window);
    }

    #[rstest]
    fn unknown_pin_reads_empty() {
        let store = MemoryPhotoStore::default();
        assert!(store.photos_for_pin(99).expect("load photos").is_empty());
    }

    #[rstest]
    fn clearing_unknown_pin_is_a_no_op() {
        let mut store = MemoryPhotoStore::default();
        assert!(store.clear_pin(99).is_ok());
    }

    #[rstest]
    fn pins_are_isolated(window: Vec<SavedPhoto>) {
        let store = MemoryPhotoStore::with_photos(1, window);
        assert!(store.photos_for_pin(2).expect("load photos").is_empty());
    }

    #[rstest]
    fn new_collection_replaces_saved_photos(window: Vec<SavedPhoto>) {
        let mut store = MemoryPhotoStore::with_photos(1, window);

        let replacement = vec![SavedPhoto::new(
            PhotoReference::new("https://example.test/c_m.jpg"),
            vec![3],
        )];
        store.clear_pin(1).expect("clear pin");
        assert_eq!(store.pin_count(), 0);
        store
            .save_photos(1, replacement.clone())
            .expect("save replacement");

        assert_eq!(store.photos_for_pin(1).expect("load photos"), replacement);
        assert_eq!(store.pin_count(), 1);
    }
}
