//! Test-only, in-memory `PhotoStore` implementation used by unit and
//! behaviour tests.

use std::collections::HashMap;

use crate::{PhotoStore, SavedPhoto, StoreError};

/// In-memory `PhotoStore` implementation used in tests.
///
/// Collections live in a hash map keyed by pin identifier; the store is
/// intended only for small datasets and never fails.
#[derive(Default, Debug)]
pub struct MemoryPhotoStore {
    photos: HashMap<u64, Vec<SavedPhoto>>,
}

impl MemoryPhotoStore {
    /// Create a store already holding `photos` for `pin_id`.
    pub fn with_photos(pin_id: u64, photos: Vec<SavedPhoto>) -> Self {
        Self {
            photos: HashMap::from([(pin_id, photos)]),
        }
    }

    /// Number of pins with at least one saved photo.
    pub fn pin_count(&self) -> usize {
        self.photos.len()
    }
}

impl PhotoStore for MemoryPhotoStore {
    fn save_photos(&mut self, pin_id: u64, photos: Vec<SavedPhoto>) -> Result<(), StoreError> {
        self.photos.entry(pin_id).or_default().extend(photos);
        Ok(())
    }

    fn photos_for_pin(&self, pin_id: u64) -> Result<Vec<SavedPhoto>, StoreError> {
        Ok(self.photos.get(&pin_id).cloned().unwrap_or_default())
    }

    fn clear_pin(&mut self, pin_id: u64) -> Result<(), StoreError> {
        self.photos.remove(&pin_id);
        Ok(())
    }
}
