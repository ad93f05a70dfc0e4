//! Map pins binding a location to stored photos.

use geo::Coord;
use thiserror::Error;

use crate::bbox::{LATITUDE_RANGE, LONGITUDE_RANGE};

/// A dropped map pin.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. The pin
/// identifier keys saved photo collections in a [`PhotoStore`].
///
/// [`PhotoStore`]: crate::PhotoStore
///
/// # Examples
/// ```
/// use geo::Coord;
/// use pinlens_core::Pin;
///
/// # fn main() -> Result<(), pinlens_core::PinError> {
/// let pin = Pin::new(1, Coord { x: -95.7129, y: 37.0902 })?;
/// assert_eq!(pin.id, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pin {
    /// Unique identifier.
    pub id: u64,
    /// Geospatial position.
    pub location: Coord<f64>,
}

/// Errors returned by [`Pin::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PinError {
    /// The longitude fell outside the world range.
    #[error("longitude {longitude} is outside [-180, 180]")]
    LongitudeOutOfRange {
        /// Offending longitude in degrees.
        longitude: f64,
    },
    /// The latitude fell outside the world range.
    #[error("latitude {latitude} is outside [-90, 90]")]
    LatitudeOutOfRange {
        /// Offending latitude in degrees.
        latitude: f64,
    },
}

impl Pin {
    /// Validates and constructs a [`Pin`].
    ///
    /// Rejects coordinates outside the WGS84 world ranges; a pin must sit on
    /// the map before any photo search can be anchored to it.
    pub fn new(id: u64, location: Coord<f64>) -> Result<Self, PinError> {
        if !LONGITUDE_RANGE.contains(&location.x) {
            return Err(PinError::LongitudeOutOfRange {
                longitude: location.x,
            });
        }
        if !LATITUDE_RANGE.contains(&location.y) {
            return Err(PinError::LatitudeOutOfRange {
                latitude: location.y,
            });
        }
        Ok(Self { id, location })
    }
}
