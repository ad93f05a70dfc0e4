//! Clamped geographic bounding boxes.
//!
//! A [`BoundingBox`] is the rectangular search region derived from a centre
//! coordinate and half extents, clamped to the world ranges so a centre near
//! a pole or the antimeridian still yields a valid region. Coordinates are
//! WGS84 with `x = longitude` and `y = latitude`.

use std::fmt;
use std::num::ParseFloatError;
use std::ops::RangeInclusive;
use std::str::FromStr;

use geo::{Coord, Rect};
use thiserror::Error;

/// Valid longitude range in degrees.
pub const LONGITUDE_RANGE: RangeInclusive<f64> = -180.0..=180.0;

/// Valid latitude range in degrees.
pub const LATITUDE_RANGE: RangeInclusive<f64> = -90.0..=90.0;

/// Default half width of a search region in degrees of longitude.
pub const DEFAULT_HALF_WIDTH: f64 = 1.0;

/// Default half height of a search region in degrees of latitude.
pub const DEFAULT_HALF_HEIGHT: f64 = 1.0;

/// Axis-aligned search region in lon/lat space.
///
/// Construction clamps to the supplied ranges, so the invariants
/// `min_lon <= max_lon` and `min_lat <= max_lat` hold and every corner lies
/// within the world ranges. The region never crosses the antimeridian; a
/// centre close to it is clamped, not wrapped.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use pinlens_core::BoundingBox;
///
/// let bbox = BoundingBox::around(Coord { x: -95.7129, y: 37.0902 });
/// assert_eq!(bbox.to_string(), "-96.7129,36.0902,-94.7129,38.0902");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox(Rect<f64>);

impl BoundingBox {
    /// Build a region of `half_width` by `half_height` degrees around
    /// `centre`, clamped to `lon_range` and `lat_range`.
    ///
    /// Clamping makes the function total: a centre outside the ranges
    /// produces a degenerate box pinned to the nearest edge rather than an
    /// error. Half extents are absolute distances in degrees.
    ///
    /// # Panics
    /// Panics if a supplied range is inverted (`start > end`).
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use pinlens_core::{BoundingBox, LATITUDE_RANGE, LONGITUDE_RANGE};
    ///
    /// let polar = BoundingBox::clamped(
    ///     Coord { x: 0.0, y: 89.5 },
    ///     1.0,
    ///     1.0,
    ///     &LONGITUDE_RANGE,
    ///     &LATITUDE_RANGE,
    /// );
    /// assert_eq!(polar.max_lat(), 90.0);
    /// assert_eq!(polar.min_lat(), 88.5);
    /// ```
    pub fn clamped(
        centre: Coord<f64>,
        half_width: f64,
        half_height: f64,
        lon_range: &RangeInclusive<f64>,
        lat_range: &RangeInclusive<f64>,
    ) -> Self {
        let clamp = |value: f64, range: &RangeInclusive<f64>| {
            value.clamp(*range.start(), *range.end())
        };
        let min = Coord {
            x: clamp(centre.x - half_width, lon_range),
            y: clamp(centre.y - half_height, lat_range),
        };
        let max = Coord {
            x: clamp(centre.x + half_width, lon_range),
            y: clamp(centre.y + half_height, lat_range),
        };
        Self(Rect::new(min, max))
    }

    /// Build a region around `centre` using the default half extents and the
    /// world ranges.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use pinlens_core::BoundingBox;
    ///
    /// let bbox = BoundingBox::around(Coord { x: 179.5, y: 0.0 });
    /// assert_eq!(bbox.max_lon(), 180.0);
    /// ```
    pub fn around(centre: Coord<f64>) -> Self {
        Self::clamped(
            centre,
            DEFAULT_HALF_WIDTH,
            DEFAULT_HALF_HEIGHT,
            &LONGITUDE_RANGE,
            &LATITUDE_RANGE,
        )
    }

    /// Western edge in degrees of longitude.
    pub fn min_lon(&self) -> f64 {
        self.0.min().x
    }

    /// Southern edge in degrees of latitude.
    pub fn min_lat(&self) -> f64 {
        self.0.min().y
    }

    /// Eastern edge in degrees of longitude.
    pub fn max_lon(&self) -> f64 {
        self.0.max().x
    }

    /// Northern edge in degrees of latitude.
    pub fn max_lat(&self) -> f64 {
        self.0.max().y
    }

    /// The underlying rectangle in lon/lat space.
    pub fn rect(&self) -> Rect<f64> {
        self.0
    }
}

impl fmt::Display for BoundingBox {
    /// Render the wire form `min_lon,min_lat,max_lon,max_lat`.
    ///
    /// Values use Rust's shortest round-trip `f64` formatting, so parsing the
    /// rendered string recovers the exact corner values.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.min_lon(),
            self.min_lat(),
            self.max_lon(),
            self.max_lat()
        )
    }
}

/// Errors returned when parsing a bounding box from its wire form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoundingBoxParseError {
    /// The input did not contain exactly four comma-separated fields.
    #[error("expected 4 comma-separated values, found {found}")]
    FieldCount {
        /// Number of fields present in the input.
        found: usize,
    },
    /// One of the fields was not a decimal number.
    #[error("invalid {field} value: {source}")]
    InvalidNumber {
        /// Name of the offending field.
        field: &'static str,
        /// Parse failure reported by the standard library.
        #[source]
        source: ParseFloatError,
    },
    /// The minimum corner exceeded the maximum corner on an axis.
    #[error("inverted bounds: minimum corner must not exceed maximum corner")]
    Inverted,
}

impl FromStr for BoundingBox {
    type Err = BoundingBoxParseError;

    /// Parse the wire form produced by [`Display`](fmt::Display).
    ///
    /// # Examples
    /// ```
    /// use pinlens_core::BoundingBox;
    ///
    /// let bbox: BoundingBox = "-96.7129,36.0902,-94.7129,38.0902".parse()?;
    /// assert_eq!(bbox.min_lat(), 36.0902);
    /// # Ok::<(), pinlens_core::BoundingBoxParseError>(())
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const FIELDS: [&str; 4] = ["min_lon", "min_lat", "max_lon", "max_lat"];

        let raw: Vec<&str> = s.split(',').collect();
        if raw.len() != FIELDS.len() {
            return Err(BoundingBoxParseError::FieldCount { found: raw.len() });
        }

        let mut values = [0.0_f64; 4];
        for (value, (raw, field)) in values.iter_mut().zip(raw.iter().zip(FIELDS)) {
            *value = raw
                .trim()
                .parse()
                .map_err(|source| BoundingBoxParseError::InvalidNumber { field, source })?;
        }

        let [min_lon, min_lat, max_lon, max_lat] = values;
        if min_lon > max_lon || min_lat > max_lat {
            return Err(BoundingBoxParseError::Inverted);
        }

        Ok(Self(Rect::new(
            Coord {
                x: min_lon,
                y: min_lat,
            },
            Coord {
                x: max_lon,
                y: max_lat,
            },
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn around_offsets_centre_by_default_extents() {
        let bbox = BoundingBox::around(Coord {
            x: -95.7129,
            y: 37.0902,
        });
        assert_eq!(bbox.min_lon(), -96.7129);
        assert_eq!(bbox.min_lat(), 36.0902);
        assert_eq!(bbox.max_lon(), -94.7129);
        assert_eq!(bbox.max_lat(), 38.0902);
    }

    #[rstest]
    #[case::north_pole(Coord { x: 0.0, y: 89.5 }, "-1,88.5,1,90")]
    #[case::south_pole(Coord { x: 0.0, y: -89.5 }, "-1,-90,1,-88.5")]
    #[case::antimeridian_east(Coord { x: 179.5, y: 0.0 }, "178.5,-1,180,1")]
    #[case::antimeridian_west(Coord { x: -179.5, y: 0.0 }, "-180,-1,-178.5,1")]
    #[case::corner(Coord { x: 180.0, y: 90.0 }, "179,89,180,90")]
    fn around_clamps_to_world_ranges(#[case] centre: Coord<f64>, #[case] expected: &str) {
        assert_eq!(BoundingBox::around(centre).to_string(), expected);
    }

    #[rstest]
    fn clamped_honours_custom_ranges() {
        let bbox = BoundingBox::clamped(
            Coord { x: 9.5, y: 0.0 },
            1.0,
            1.0,
            &(-10.0..=10.0),
            &(-5.0..=5.0),
        );
        assert_eq!(bbox.max_lon(), 10.0);
        assert_eq!(bbox.min_lon(), 8.5);
    }

    #[rstest]
    fn clamped_pins_out_of_range_centre_to_edge() {
        let bbox = BoundingBox::around(Coord { x: 0.0, y: 95.0 });
        assert_eq!(bbox.max_lat(), 90.0);
        assert_eq!(bbox.min_lat(), 90.0);
    }

    #[rstest]
    fn rect_exposes_the_clamped_corners() {
        let rect = BoundingBox::around(Coord { x: 179.5, y: 0.0 }).rect();
        assert_eq!(rect.min(), Coord { x: 178.5, y: -1.0 });
        assert_eq!(rect.max(), Coord { x: 180.0, y: 1.0 });
    }

    #[rstest]
    #[case(Coord { x: -95.7129, y: 37.0902 })]
    #[case(Coord { x: 0.1, y: -0.2 })]
    #[case(Coord { x: 179.99, y: -89.99 })]
    fn display_round_trips_through_from_str(#[case] centre: Coord<f64>) {
        let bbox = BoundingBox::around(centre);
        let parsed: BoundingBox = bbox.to_string().parse().expect("parse rendered box");
        assert_eq!(parsed, bbox);
    }

    #[rstest]
    #[case::too_few("1,2,3", 3)]
    #[case::too_many("1,2,3,4,5", 5)]
    fn from_str_rejects_wrong_field_count(#[case] input: &str, #[case] found: usize) {
        let error = input.parse::<BoundingBox>().expect_err("should reject");
        assert_eq!(error, BoundingBoxParseError::FieldCount { found });
    }

    #[rstest]
    fn from_str_reports_offending_field() {
        let error = "1,oops,3,4"
            .parse::<BoundingBox>()
            .expect_err("should reject");
        assert!(matches!(
            error,
            BoundingBoxParseError::InvalidNumber {
                field: "min_lat",
                ..
            }
        ));
    }

    #[rstest]
    #[case::lon("2,0,1,1")]
    #[case::lat("0,2,1,1")]
    fn from_str_rejects_inverted_bounds(#[case] input: &str) {
        let error = input.parse::<BoundingBox>().expect_err("should reject");
        assert_eq!(error, BoundingBoxParseError::Inverted);
    }

    #[rstest]
    fn from_str_accepts_whitespace_padding() {
        let bbox: BoundingBox = " -1, -1, 1, 1 ".parse().expect("parse padded box");
        assert_eq!(bbox.to_string(), "-1,-1,1,1");
    }
}
