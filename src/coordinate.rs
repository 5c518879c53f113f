// Copyright (c) 2024-2025 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! The coordinate module contains the `Coordinate` type: a position defined
//! by its geodetic latitude and longitude in decimal degrees.
//!
//! Latitudes North of the Equator and longitudes East of the Prime Meridian
//! are positive.

pub mod dms;

use crate::error::{Error, Result};
use angle_sc::{Degrees, Radians, Validate};
use unit_sphere::LatLong;

/// A geographic position in decimal degrees.
///
/// A `Coordinate` always holds finite values. It does **not** constrain them
/// to the usual ranges of latitude and longitude, use `is_valid` to test that.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    /// The geodetic latitude in degrees.
    lat: f64,
    /// The longitude in degrees.
    lon: f64,
}

impl Validate for Coordinate {
    /// Test whether a `Coordinate` is valid.
    /// Whether -90° <= `latitude` <= 90° and -180° <= `longitude` <= 180°.
    fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

impl Coordinate {
    /// Construct a `Coordinate`.
    /// * `lat` - the geodetic latitude.
    /// * `lon` - the longitude.
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` if either value is not finite.
    pub fn new(lat: Degrees, lon: Degrees) -> Result<Self> {
        Ok(Self {
            lat: finite(lat.0)?,
            lon: finite(lon.0)?,
        })
    }

    /// Construct a `Coordinate` from decimal degree text, e.g. `"45.5361"`
    /// and `"-122.8092"`.
    /// * `lat` - the latitude text.
    /// * `lon` - the longitude text.
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` if either text is not a finite number.
    ///
    /// # Examples
    /// ```
    /// use geocalc::Coordinate;
    ///
    /// let home = Coordinate::parse_decimal_degrees("45.5361", "-122.8092").unwrap();
    /// assert_eq!(45.5361, home.lat().0);
    /// assert_eq!(-122.8092, home.lon().0);
    ///
    /// assert!(Coordinate::parse_decimal_degrees("45.5361", "W122").is_err());
    /// ```
    pub fn parse_decimal_degrees(lat: &str, lon: &str) -> Result<Self> {
        Self::new(parse_decimal_degrees(lat)?, parse_decimal_degrees(lon)?)
    }

    /// Construct a `Coordinate` from degrees, minutes and seconds text,
    /// e.g. `"45 32 10 N"` and `"122 48 33.1 W"`, see `dms::parse_degrees`.
    /// * `lat` - the latitude text.
    /// * `lon` - the longitude text.
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` if either text cannot be read.
    pub fn parse_dms(lat: &str, lon: &str) -> Result<Self> {
        Self::new(dms::parse_degrees(lat)?, dms::parse_degrees(lon)?)
    }

    /// The geodetic latitude in degrees.
    #[must_use]
    pub const fn lat(&self) -> Degrees {
        Degrees(self.lat)
    }

    /// The longitude in degrees.
    #[must_use]
    pub const fn lon(&self) -> Degrees {
        Degrees(self.lon)
    }

    /// The geodetic latitude in radians.
    #[must_use]
    pub fn lat_rad(&self) -> Radians {
        Radians(self.lat.to_radians())
    }

    /// The longitude in radians.
    #[must_use]
    pub fn lon_rad(&self) -> Radians {
        Radians(self.lon.to_radians())
    }
}

impl From<&Coordinate> for LatLong {
    fn from(coordinate: &Coordinate) -> Self {
        Self::new(coordinate.lat(), coordinate.lon())
    }
}

impl TryFrom<&LatLong> for Coordinate {
    type Error = Error;

    fn try_from(lat_long: &LatLong) -> Result<Self> {
        Self::new(lat_long.lat(), lat_long.lon())
    }
}

fn finite(value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::Parse(format!("{value} is not a finite number")))
    }
}

/// Parse decimal degree text, e.g. `" -122.8092 "`.
/// * `text` - the text, surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns `Error::Parse` if the text is empty, is not a number or is
/// not finite.
pub fn parse_decimal_degrees(text: &str) -> Result<Degrees> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::Parse(String::from("no input")));
    }
    let value = text
        .parse::<f64>()
        .map_err(|_| Error::Parse(format!("{text:?} is not a number")))?;
    finite(value).map(Degrees)
}

/// Format an angle in degrees for display, to four decimal places.
#[must_use]
pub fn format_degrees(value: Degrees) -> String {
    format!("{:.4}", value.0)
}
