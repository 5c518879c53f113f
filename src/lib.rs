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

//! geocalc
//!
//! A library for calculating the distance and bearing between two positions
//! on the [WGS-84](https://www.icao.int/NACC/Documents/Meetings/2014/ECARAIM/REF08-Doc9674.pdf)
//! ellipsoid or on a spherical model of the Earth.
//!
//! ## Rhumb lines and great circles
//!
//! A [rhumb line](https://en.wikipedia.org/wiki/Rhumb_line) crosses every
//! meridian at the same angle, so it can be followed with a constant compass
//! bearing. The shortest path between two positions is a
//! [geodesic](https://en.wikipedia.org/wiki/Geodesics_on_an_ellipsoid), the
//! equivalent of a great circle arc on a sphere. Its bearing changes along
//! the path, so only the initial bearing is calculated.
//!
//! The library calculates:
//!
//! - the length and bearing of the rhumb line between two positions,
//!   see `calculate_rhumb_line`;
//! - the length and initial bearing of the great circle between two
//!   positions, using Vincenty's iterative method, see `calculate_great_circle`;
//! - both of them together with a `Trace` of the intermediate values,
//!   see `calculate_routes`.
//!
//! ## Design
//!
//! The `EllipsoidModel` holds the parameters of the model of the Earth.
//! It is immutable and passed by reference to every calculation, so
//! calculations on different models may run concurrently.
//! The statics `WGS84_MODEL` and `SPHERE_MODEL` hold the two supported models.
//!
//! A `Coordinate` holds a position in decimal degrees, it may be read from
//! decimal degree or degrees, minutes and seconds text.
//!
//! A `GeoPath` holds the result of a calculation: a distance in kilometres and
//! a bearing in radians, with conversions to miles, nautical miles and degrees.
//!
//! The library depends upon the following crates:
//!
//! - [angle-sc](https://crates.io/crates/angle-sc) - to define `Angle`,
//!   `Degrees` and `Radians`;
//! - [unit-sphere](https://crates.io/crates/unit-sphere) - to convert
//!   `Coordinate`s to and from `LatLong`s;
//! - [icao_units](https://crates.io/crates/icao-units) - to define `Metres` and
//!   `NauticalMiles` and perform conversions between them.

extern crate angle_sc;
extern crate icao_units;
extern crate unit_sphere;

pub mod coordinate;
pub mod ellipsoid;
pub mod error;
pub mod geodesic;
pub mod rhumb;
pub mod trace;

pub use angle_sc::{Angle, Degrees, Radians, Validate};
pub use coordinate::Coordinate;
pub use ellipsoid::Model;
pub use error::{Error, Result};
pub use geodesic::{calculate_great_circle, calculate_great_circle_traced};
pub use icao_units::non_si::NauticalMiles;
pub use icao_units::si::Metres;
pub use rhumb::{calculate_rhumb_line, calculate_rhumb_line_traced};
pub use trace::{Trace, TraceValue};
pub use unit_sphere::LatLong;

use core::f64::consts::TAU;
use lazy_static::lazy_static;

/// The number of statute miles in a kilometre.
pub const KM_TO_MILES: f64 = 0.621_371;

/// The parameters of a model of the Earth.
///
/// The flattening and Eccentricity are derived from the Semimajor and
/// Semiminor axes. On the `Sphere` both axes are the mean radius of the
/// Earth, so the flattening and Eccentricity are zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EllipsoidModel {
    /// The model.
    model: Model,
    /// The Semimajor axis in kilometres.
    a: f64,
    /// The Semiminor axis in kilometres.
    b: f64,
    /// The flattening, a ratio.
    f: f64,
    /// One minus the flattening ratio.
    one_minus_f: f64,
    /// The Eccentricity.
    e: f64,
    /// The square of the Eccentricity.
    e_2: f64,
}

impl EllipsoidModel {
    fn from_axes(model: Model, a: f64, b: f64) -> Self {
        let f = ellipsoid::calculate_flattening(a, b);
        Self {
            model,
            a,
            b,
            f,
            one_minus_f: 1.0 - f,
            e: ellipsoid::calculate_eccentricity(a, b),
            e_2: ellipsoid::calculate_sq_eccentricity(a, b),
        }
    }

    /// Constructor.
    /// * `model` - the model of the Earth.
    #[must_use]
    pub fn new(model: Model) -> Self {
        match model {
            Model::Wgs84 => Self::from_axes(model, ellipsoid::wgs84::A, ellipsoid::wgs84::B),
            Model::Sphere => {
                Self::from_axes(model, ellipsoid::sphere::R, ellipsoid::sphere::R)
            }
        }
    }

    /// Construct an `EllipsoidModel` by name: `"WGS-84"` or `"Sphere"`.
    ///
    /// **Unrecognised names select the `Sphere`**, see `Model::from_name`.
    /// * `name` - the model name.
    ///
    /// # Examples
    /// ```
    /// use geocalc::{EllipsoidModel, Model};
    ///
    /// assert_eq!(Model::Wgs84, EllipsoidModel::select("WGS-84").model());
    /// assert_eq!(Model::Sphere, EllipsoidModel::select("Sphere").model());
    /// assert_eq!(Model::Sphere, EllipsoidModel::select("Clarke 1866").model());
    /// ```
    #[must_use]
    pub fn select(name: &str) -> Self {
        let model = Self::new(Model::from_name(name));
        log::debug!("selected model: {}", model.name());
        model
    }

    /// Construct an `EllipsoidModel` with the WGS-84 parameters.
    #[must_use]
    pub fn wgs84() -> Self {
        Self::new(Model::Wgs84)
    }

    /// Construct a spherical `EllipsoidModel` with the mean radius of the Earth.
    #[must_use]
    pub fn sphere() -> Self {
        Self::new(Model::Sphere)
    }

    /// The model.
    #[must_use]
    pub const fn model(&self) -> Model {
        self.model
    }

    /// The name of the model.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.model.name()
    }

    /// The Semimajor axis in kilometres.
    #[must_use]
    pub const fn a(&self) -> f64 {
        self.a
    }

    /// The Semiminor axis in kilometres.
    #[must_use]
    pub const fn b(&self) -> f64 {
        self.b
    }

    /// The flattening, a ratio.
    #[must_use]
    pub const fn f(&self) -> f64 {
        self.f
    }

    /// One minus the flattening ratio.
    #[must_use]
    pub const fn one_minus_f(&self) -> f64 {
        self.one_minus_f
    }

    /// The Eccentricity.
    #[must_use]
    pub const fn e(&self) -> f64 {
        self.e
    }

    /// The square of the Eccentricity.
    #[must_use]
    pub const fn e_2(&self) -> f64 {
        self.e_2
    }
}

impl From<Model> for EllipsoidModel {
    fn from(model: Model) -> Self {
        Self::new(model)
    }
}

impl Default for EllipsoidModel {
    fn default() -> Self {
        *WGS84_MODEL
    }
}

lazy_static! {
    /// A static instance of the WGS-84 `EllipsoidModel`.
    pub static ref WGS84_MODEL: EllipsoidModel = EllipsoidModel::wgs84();

    /// A static instance of the spherical `EllipsoidModel`.
    pub static ref SPHERE_MODEL: EllipsoidModel = EllipsoidModel::sphere();
}

/// Normalise a bearing to the range 0 to 2π.
fn normalize_bearing(bearing: f64) -> f64 {
    let bearing = bearing % TAU;
    let bearing = if bearing < 0.0 { bearing + TAU } else { bearing };
    // fabs removes a negative zero
    if bearing < TAU {
        libm::fabs(bearing)
    } else {
        0.0
    }
}

/// The distance and bearing of a path between two positions.
///
/// A `GeoPath` is only created by the solvers, its distance is finite and
/// never negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPath {
    /// The distance in kilometres.
    distance_km: f64,
    /// The bearing in radians, 0 to 2π clockwise from true North.
    bearing: f64,
}

impl GeoPath {
    /// Constructor.
    /// * `distance_km` - the distance in kilometres, finite and not negative.
    /// * `bearing` - the bearing, it is normalised to the range 0 to 2π.
    #[must_use]
    pub(crate) fn new(distance_km: f64, bearing: Radians) -> Self {
        debug_assert!(0.0 <= distance_km && distance_km.is_finite());
        Self {
            distance_km,
            bearing: normalize_bearing(bearing.0),
        }
    }

    /// The distance in kilometres.
    #[must_use]
    pub const fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// The distance in statute miles.
    #[must_use]
    pub fn distance_miles(&self) -> f64 {
        self.distance_km * KM_TO_MILES
    }

    /// The distance in `Metres`.
    #[must_use]
    pub fn distance_metres(&self) -> Metres {
        Metres(self.distance_km * 1000.0)
    }

    /// The distance in `NauticalMiles`.
    #[must_use]
    pub fn distance_nautical_miles(&self) -> NauticalMiles {
        NauticalMiles::from(self.distance_metres())
    }

    /// The bearing in radians.
    #[must_use]
    pub const fn bearing(&self) -> Radians {
        Radians(self.bearing)
    }

    /// The bearing in degrees.
    #[must_use]
    pub fn bearing_deg(&self) -> Degrees {
        Degrees(self.bearing.to_degrees())
    }

    /// The bearing as an `Angle`.
    #[must_use]
    pub fn azimuth(&self) -> Angle {
        Angle::from(self.bearing())
    }

    /// The distance in miles formatted for display, e.g. `"29.61 miles"`.
    #[must_use]
    pub fn distance_text(&self) -> String {
        format!("{:.2} miles", self.distance_miles())
    }

    /// The bearing in degrees formatted for display, e.g. `"86.80° true"`.
    #[must_use]
    pub fn bearing_text(&self) -> String {
        format!("{:.2}° true", self.bearing_deg().0)
    }
}

/// The rhumb line and great circle between a pair of positions.
#[derive(Clone, Debug, PartialEq)]
pub struct Routes {
    /// The rhumb line.
    pub rhumb: GeoPath,
    /// The great circle.
    pub great_circle: GeoPath,
    /// The intermediate values of both calculations.
    pub trace: Trace,
}

/// Calculate the rhumb line and the great circle between a pair of positions.
/// * `from`, `to` - the start and finish positions.
/// * `model` - the `EllipsoidModel`.
///
/// returns both paths and the `Trace` of the calculations. The `Trace`
/// records the crate version, the model, the positions in radians, the
/// intermediate values of each calculation and the formatted results.
///
/// # Errors
///
/// Returns the first error of either calculation, see `calculate_rhumb_line`
/// and `calculate_great_circle`.
///
/// # Examples
/// ```
/// use geocalc::*;
///
/// let home = Coordinate::parse_decimal_degrees("45.5361", "-122.8092").unwrap();
/// let destination = Coordinate::parse_dms("45 33 36 N", "122 12 W").unwrap();
///
/// let model = EllipsoidModel::select("WGS-84");
/// let routes = calculate_routes(&home, &destination, &model).unwrap();
/// assert_eq!("29.61 miles", routes.rhumb.distance_text());
/// assert_eq!("29.61 miles", routes.great_circle.distance_text());
/// println!("{}", routes.trace);
/// ```
pub fn calculate_routes(
    from: &Coordinate,
    to: &Coordinate,
    model: &EllipsoidModel,
) -> Result<Routes> {
    let mut trace = Trace::new();
    trace
        .record("geocalc", env!("CARGO_PKG_VERSION"))
        .record("model", model.name())
        .record("from.lat_rad", from.lat_rad().0)
        .record("from.lon_rad", from.lon_rad().0)
        .record("to.lat_rad", to.lat_rad().0)
        .record("to.lon_rad", to.lon_rad().0);

    let (rhumb, rhumb_trace) = calculate_rhumb_line_traced(from, to, model)?;
    trace.append(rhumb_trace);

    let (great_circle, great_circle_trace) = calculate_great_circle_traced(from, to, model)?;
    trace.append(great_circle_trace);

    trace
        .record("rhumb.dist", rhumb.distance_text())
        .record("rhumb.bear", rhumb.bearing_text())
        .record("gc.dist", great_circle.distance_text())
        .record("gc.course", great_circle.bearing_text());

    log::debug!(
        "{} rhumb line: {} {}, great circle: {} {}",
        model.name(),
        rhumb.distance_text(),
        rhumb.bearing_text(),
        great_circle.distance_text(),
        great_circle.bearing_text()
    );

    Ok(Routes {
        rhumb,
        great_circle,
        trace,
    })
}
