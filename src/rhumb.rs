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

//! The rhumb module contains functions for calculating the rhumb line
//! between two positions.
//!
//! A rhumb line (loxodrome) crosses every meridian at the same angle, so it
//! can be followed with a constant compass bearing. It is generally longer
//! than the great circle between the same positions.
//!
//! The bearing is calculated from the difference in isometric latitude of
//! the positions and the distance from the length of the meridian arc between
//! their latitudes, both corrected for the Eccentricity of the ellipsoid.

#![allow(clippy::suboptimal_flops)]

use crate::error::{Error, Result};
use crate::trace::{Trace, STATUS_OK};
use crate::{ellipsoid, Coordinate, EllipsoidModel, GeoPath};
use angle_sc::Radians;
use core::f64::consts::{FRAC_PI_4, PI};

/// The magnitude of the cosine of a bearing below which a rhumb line is
/// treated as running due East or West along a parallel.
pub const SINGULAR_BEARING_TOLERANCE: f64 = 1e-9;

/// Calculate the longitude difference between two longitudes, taking the
/// shorter way around the Earth.
/// * `lon1`, `lon2` - the start and finish longitudes.
///
/// returns `lon2 - lon1` in the range -π to π.
///
/// # Examples
/// ```
/// use geocalc::rhumb::normalize_delta_longitude;
/// use geocalc::Radians;
///
/// // Eastbound across the antimeridian, from 179°E to 179°W
/// let delta = normalize_delta_longitude(
///     Radians(179_f64.to_radians()),
///     Radians(-179_f64.to_radians()),
/// );
/// assert!((delta.0 - 2_f64.to_radians()).abs() < 1e-12);
/// ```
#[must_use]
pub fn normalize_delta_longitude(lon1: Radians, lon2: Radians) -> Radians {
    let delta = lon2.0 - lon1.0;
    if libm::fabs(delta) <= PI {
        Radians(delta)
    } else if delta < -PI {
        Radians(delta + 2.0 * PI)
    } else {
        Radians(delta - 2.0 * PI)
    }
}

/// Calculate the exponential of the isometric latitude at a latitude.
///
/// `tan(π/4 + φ/2) * ((1 - e sin φ) / (1 + e sin φ))^(e/2)`,
/// the Mercator projection `tan(π/4 + φ/2)` on a sphere.
/// * `lat` - the geodetic latitude.
/// * `e` - the Eccentricity of the ellipsoid.
#[must_use]
pub fn calculate_isometric_factor(lat: Radians, e: f64) -> f64 {
    let e_sin_lat = e * libm::sin(lat.0);
    libm::tan(FRAC_PI_4 + 0.5 * lat.0) * libm::pow((1.0 - e_sin_lat) / (1.0 + e_sin_lat), 0.5 * e)
}

/// Calculate the meridian arc between two latitudes on the unit ellipsoid.
///
/// The result multiplied by the Semimajor axis is the length of the meridian
/// arc, it is the latitude difference on a sphere.
/// * `lat1`, `lat2` - the start and finish geodetic latitudes.
/// * `e` - the Eccentricity of the ellipsoid.
#[must_use]
pub fn calculate_meridian_arc(lat1: Radians, lat2: Radians, e: f64) -> f64 {
    let e_2 = e * e;
    (1.0 - 0.25 * e_2) * (lat2.0 - lat1.0)
        - 0.375 * e_2 * (libm::sin(2.0 * lat2.0) - libm::sin(2.0 * lat1.0))
}

/// Calculate the length of an arc of a parallel of latitude.
/// * `lat` - the geodetic latitude of the parallel.
/// * `delta_lon` - the longitude difference along the parallel.
/// * `model` - the `EllipsoidModel`.
///
/// returns the length of the arc in kilometres.
#[must_use]
pub fn calculate_parallel_arc(lat: Radians, delta_lon: Radians, model: &EllipsoidModel) -> f64 {
    let radius =
        ellipsoid::calculate_prime_vertical_radius(libm::sin(lat.0), model.a(), model.e_2());
    radius * libm::cos(lat.0) * libm::fabs(delta_lon.0)
}

/// Calculate the rhumb line between a pair of positions, recording the
/// intermediate values of the calculation.
/// * `from`, `to` - the start and finish positions.
/// * `model` - the `EllipsoidModel`.
///
/// returns the rhumb line distance and bearing and the `Trace` of the
/// calculation.
///
/// Due East or West rhumb lines, where the secant of the bearing is
/// unbounded, are measured along the parallel at the mean latitude of the
/// positions.
///
/// # Errors
///
/// Returns `Error::Numeric` if the distance or bearing is not finite,
/// e.g. between two positions at the South pole, or if the distance is
/// negative, e.g. along a parallel with a latitude beyond ±90°.
pub fn calculate_rhumb_line_traced(
    from: &Coordinate,
    to: &Coordinate,
    model: &EllipsoidModel,
) -> Result<(GeoPath, Trace)> {
    let lat1 = from.lat_rad();
    let lat2 = to.lat_rad();
    let delta_lon = normalize_delta_longitude(from.lon_rad(), to.lon_rad());

    let e = model.e();
    let delta_psi = libm::log(calculate_isometric_factor(lat2, e))
        - libm::log(calculate_isometric_factor(lat1, e));
    let bearing = libm::atan2(delta_lon.0, delta_psi);

    let cos_bearing = libm::cos(bearing);
    let distance = if libm::fabs(cos_bearing) < SINGULAR_BEARING_TOLERANCE {
        log::warn!("rhumb line runs along a parallel, bearing: {bearing}");
        calculate_parallel_arc(Radians(0.5 * (lat1.0 + lat2.0)), delta_lon, model)
    } else {
        model.a() * calculate_meridian_arc(lat1, lat2, e) / cos_bearing
    };

    if !bearing.is_finite() {
        return Err(Error::Numeric("rhumb line bearing is not finite"));
    }
    if !distance.is_finite() {
        return Err(Error::Numeric("rhumb line distance is not finite"));
    }
    if distance < 0.0 {
        return Err(Error::Numeric("rhumb line distance is negative"));
    }

    let path = GeoPath::new(distance, Radians(bearing));

    let mut trace = Trace::new();
    trace
        .record("rhumb.minor_axis_km", model.b())
        .record("rhumb.eccentricity", e)
        .record("rhumb.delta_lon_rad", delta_lon.0)
        .record("rhumb.bearing_rad", path.bearing().0)
        .record("rhumb.distance_km", path.distance_km())
        .record("rhumb", STATUS_OK);

    Ok((path, trace))
}

/// Calculate the rhumb line between a pair of positions.
/// * `from`, `to` - the start and finish positions.
/// * `model` - the `EllipsoidModel`.
///
/// returns the rhumb line distance and bearing.
///
/// # Errors
///
/// Returns `Error::Numeric` if the distance or bearing is not finite.
///
/// # Examples
/// ```
/// use geocalc::*;
///
/// let home = Coordinate::new(Degrees(45.5361), Degrees(-122.8092)).unwrap();
/// let destination = Coordinate::new(Degrees(45.56), Degrees(-122.2)).unwrap();
///
/// let path = calculate_rhumb_line(&home, &destination, &WGS84_MODEL).unwrap();
/// assert_eq!("29.61 miles", path.distance_text());
/// assert_eq!("86.80° true", path.bearing_text());
/// ```
pub fn calculate_rhumb_line(
    from: &Coordinate,
    to: &Coordinate,
    model: &EllipsoidModel,
) -> Result<GeoPath> {
    calculate_rhumb_line_traced(from, to, model).map(|(path, _)| path)
}
