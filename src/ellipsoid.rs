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

//! The ellipsoid module contains the reference models of the Earth and
//! functions for deriving the flattening and eccentricity of an ellipsoid
//! from its Semimajor and Semiminor axes.

pub mod sphere;
pub mod wgs84;

use core::fmt;

/// The reference models of the Earth supported by the calculators.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Model {
    /// The WGS-84 ellipsoid.
    #[default]
    Wgs84,
    /// A sphere with the mean radius of the Earth.
    Sphere,
}

impl Model {
    /// The display name of the model, as accepted by `Model::from_name`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wgs84 => wgs84::NAME,
            Self::Sphere => sphere::NAME,
        }
    }

    /// Select a model by name.
    ///
    /// Only the exact name `"WGS-84"` selects the WGS-84 ellipsoid.
    /// **Any other name, including a misspelling of `"WGS-84"`, silently
    /// selects the `Sphere`.** A warning is logged for names other than
    /// `"Sphere"` but no error is returned.
    /// * `name` - the model name.
    ///
    /// # Examples
    /// ```
    /// use geocalc::ellipsoid::Model;
    ///
    /// assert_eq!(Model::Wgs84, Model::from_name("WGS-84"));
    /// assert_eq!(Model::Sphere, Model::from_name("Sphere"));
    /// assert_eq!(Model::Sphere, Model::from_name("wgs84"));
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            wgs84::NAME => Self::Wgs84,
            sphere::NAME => Self::Sphere,
            _ => {
                log::warn!("unrecognised model {name:?}, using {}", sphere::NAME);
                Self::Sphere
            }
        }
    }
}

impl From<&str> for Model {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Calculate the flattening of an ellipsoid.
/// * `a` - the Semimajor axis of the ellipsoid.
/// * `b` - the Semiminor axis of the ellipsoid.
/// # Examples
/// ```
/// use geocalc::ellipsoid::{calculate_flattening, sphere, wgs84};
///
/// assert_eq!(0.003352810664775582, calculate_flattening(wgs84::A, wgs84::B));
/// assert_eq!(0.0, calculate_flattening(sphere::R, sphere::R));
/// ```
#[must_use]
pub fn calculate_flattening(a: f64, b: f64) -> f64 {
    (a - b) / a
}

/// Calculate the square of the Eccentricity of an ellipsoid.
/// * `a` - the Semimajor axis of the ellipsoid.
/// * `b` - the Semiminor axis of the ellipsoid.
#[must_use]
pub fn calculate_sq_eccentricity(a: f64, b: f64) -> f64 {
    1.0 - (b * b) / (a * a)
}

/// Calculate the Eccentricity of an ellipsoid.
/// * `a` - the Semimajor axis of the ellipsoid.
/// * `b` - the Semiminor axis of the ellipsoid.
/// # Examples
/// ```
/// use geocalc::ellipsoid::{calculate_eccentricity, wgs84};
///
/// assert_eq!(0.08181919084296284, calculate_eccentricity(wgs84::A, wgs84::B));
/// ```
#[must_use]
pub fn calculate_eccentricity(a: f64, b: f64) -> f64 {
    libm::sqrt(calculate_sq_eccentricity(a, b))
}

/// Calculate the radius of curvature in the prime vertical at a latitude.
/// * `lat_sin` - the sine of the geodetic latitude.
/// * `a` - the Semimajor axis of the ellipsoid.
/// * `e_2` - the square of the Eccentricity of the ellipsoid.
#[must_use]
pub fn calculate_prime_vertical_radius(lat_sin: f64, a: f64, e_2: f64) -> f64 {
    a / libm::sqrt(1.0 - e_2 * lat_sin * lat_sin)
}
