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

//! The geodesic module contains functions for calculating the great circle,
//! i.e. geodesic, path between two points on the surface of an ellipsoid.
//!
//! It solves the inverse problem with Vincenty's iterative method:
//! the longitude difference on an auxiliary sphere, lambda, is refined until
//! it converges, then the arc length on the auxiliary sphere is converted to
//! a distance on the ellipsoid with Vincenty's series.
//!
//! The method does not converge for antipodal or nearly antipodal positions,
//! the iteration is bounded by `MAX_ITERATIONS`.
//!
//! See: T. Vincenty,
//! [Direct and Inverse Solutions of Geodesics on the Ellipsoid](https://www.ngs.noaa.gov/PUBS_LIB/inverse.pdf)

#![allow(clippy::float_cmp)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::suboptimal_flops)]

use crate::error::{Error, Result};
use crate::rhumb::normalize_delta_longitude;
use crate::trace::{Trace, STATUS_OK};
use crate::{Coordinate, EllipsoidModel, GeoPath};
use angle_sc::Radians;
use core::f64::consts::PI;

/// The maximum number of iterations to attempt.
pub const MAX_ITERATIONS: u32 = 100;

/// The change in lambda, in Radians, below which the iteration has converged.
pub const CONVERGENCE_TOLERANCE: Radians = Radians(1e-12);

/// The sine and cosine of a reduced (parametric) latitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReducedLatitude {
    /// The sine of the reduced latitude.
    pub sin: f64,
    /// The cosine of the reduced latitude.
    pub cos: f64,
}

/// Calculate the reduced latitude on the auxiliary sphere of a geodetic latitude.
/// * `lat` - the geodetic latitude.
/// * `one_minus_f` - one minus the flattening ratio.
#[must_use]
pub fn calculate_reduced_latitude(lat: Radians, one_minus_f: f64) -> ReducedLatitude {
    let tan_u = one_minus_f * libm::tan(lat.0);
    let cos = 1.0 / libm::sqrt(1.0 + tan_u * tan_u);
    ReducedLatitude {
        sin: tan_u * cos,
        cos,
    }
}

/// The converged solution on the auxiliary sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AuxiliarySolution {
    /// The longitude difference on the auxiliary sphere.
    pub lambda: Radians,
    /// The arc length on the auxiliary sphere.
    pub sigma: Radians,
    /// The sine of sigma.
    pub sin_sigma: f64,
    /// The cosine of sigma.
    pub cos_sigma: f64,
    /// The square of the cosine of the azimuth at the Equator.
    pub cos_sq_alpha: f64,
    /// The cosine of twice the arc length from the Equator to the mid point.
    pub cos_2sigma_m: f64,
    /// The number of iterations performed.
    pub iterations: u32,
}

impl AuxiliarySolution {
    /// The solution for coincident positions.
    const fn coincident(lambda: f64, iterations: u32) -> Self {
        Self {
            lambda: Radians(lambda),
            sigma: Radians(0.0),
            sin_sigma: 0.0,
            cos_sigma: 1.0,
            cos_sq_alpha: 1.0,
            cos_2sigma_m: 1.0,
            iterations,
        }
    }
}

/// Iterate the longitude difference on the auxiliary sphere until it converges.
/// * `u1`, `u2` - the reduced latitudes of the start and finish positions.
/// * `delta_lon` - the longitude difference between the positions, -π to π.
/// * `f` - the flattening of the ellipsoid.
/// * `tolerance` - the change in lambda at which the iteration has converged.
/// * `max_iterations` - the maximum number of iterations.
///
/// # Errors
///
/// Returns `Error::Convergence` if lambda does not converge within
/// `max_iterations` or if it exceeds π, as it does for antipodal positions.
pub fn solve_auxiliary_sphere(
    u1: ReducedLatitude,
    u2: ReducedLatitude,
    delta_lon: Radians,
    f: f64,
    tolerance: Radians,
    max_iterations: u32,
) -> Result<AuxiliarySolution> {
    let mut lambda = delta_lon.0;
    for iterations in 1..=max_iterations {
        let sin_lambda = libm::sin(lambda);
        let cos_lambda = libm::cos(lambda);

        let y = u2.cos * sin_lambda;
        let x = u1.cos * u2.sin - u1.sin * u2.cos * cos_lambda;
        let sin_sigma = libm::sqrt(y * y + x * x);
        let cos_sigma = u1.sin * u2.sin + u1.cos * u2.cos * cos_lambda;

        // Only coincident positions give a zero arc
        if sin_sigma == 0.0 {
            return Ok(AuxiliarySolution::coincident(lambda, iterations));
        }

        let sigma = libm::atan2(sin_sigma, cos_sigma);
        let sin_alpha = u1.cos * u2.cos * sin_lambda / sin_sigma;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;

        // On the Equator cos_sq_alpha is zero
        let cos_2sigma_m = if cos_sq_alpha == 0.0 {
            0.0
        } else {
            cos_sigma - 2.0 * u1.sin * u2.sin / cos_sq_alpha
        };

        let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
        let series = cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m);
        let next = delta_lon.0 + (1.0 - c) * f * sin_alpha * (sigma + c * sin_sigma * series);
        log::trace!("great circle iteration: {iterations} lambda: {next}");

        if PI < libm::fabs(next) {
            log::warn!("great circle lambda exceeds pi after {iterations} iterations");
            return Err(Error::Convergence { iterations });
        }

        if libm::fabs(next - lambda) < tolerance.0 {
            return Ok(AuxiliarySolution {
                lambda: Radians(next),
                sigma: Radians(sigma),
                sin_sigma,
                cos_sigma,
                cos_sq_alpha,
                cos_2sigma_m,
                iterations,
            });
        }
        lambda = next;
    }

    log::warn!("great circle did not converge in {max_iterations} iterations");
    Err(Error::Convergence {
        iterations: max_iterations,
    })
}

/// Calculate Vincenty's A and B series coefficients.
/// * `u_sq` - the square of the reduced second Eccentricity,
///   `cos²α (a² - b²) / b²`.
///
/// returns the A and B coefficients.
#[must_use]
pub fn calculate_series_coefficients(u_sq: f64) -> (f64, f64) {
    let a = 1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
    let b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
    (a, b)
}

/// Calculate the difference between the arc length on the auxiliary sphere
/// and the scaled arc length on the ellipsoid.
/// * `b` - Vincenty's B coefficient.
/// * `solution` - the converged solution on the auxiliary sphere.
#[must_use]
pub fn calculate_delta_sigma(b: f64, solution: &AuxiliarySolution) -> f64 {
    let sin_sigma = solution.sin_sigma;
    let cos_sigma = solution.cos_sigma;
    let cos_2sigma_m = solution.cos_2sigma_m;
    let cos_sq_2sigma_m = cos_2sigma_m * cos_2sigma_m;
    b * sin_sigma
        * (cos_2sigma_m
            + b / 4.0
                * (cos_sigma * (-1.0 + 2.0 * cos_sq_2sigma_m)
                    - b / 6.0
                        * cos_2sigma_m
                        * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                        * (-3.0 + 4.0 * cos_sq_2sigma_m)))
}

/// Calculate the great circle between a pair of positions, recording the
/// intermediate values of the calculation.
/// * `from`, `to` - the start and finish positions.
/// * `model` - the `EllipsoidModel`.
///
/// returns the great circle distance and initial bearing and the `Trace`
/// of the calculation.
///
/// # Errors
///
/// Returns `Error::Convergence` if the positions are antipodal or nearly
/// antipodal, or `Error::Numeric` if the distance or bearing is not finite.
pub fn calculate_great_circle_traced(
    from: &Coordinate,
    to: &Coordinate,
    model: &EllipsoidModel,
) -> Result<(GeoPath, Trace)> {
    let u1 = calculate_reduced_latitude(from.lat_rad(), model.one_minus_f());
    let u2 = calculate_reduced_latitude(to.lat_rad(), model.one_minus_f());
    let delta_lon = normalize_delta_longitude(from.lon_rad(), to.lon_rad());

    let solution = solve_auxiliary_sphere(
        u1,
        u2,
        delta_lon,
        model.f(),
        CONVERGENCE_TOLERANCE,
        MAX_ITERATIONS,
    )?;
    log::debug!(
        "great circle converged in {} iterations",
        solution.iterations
    );

    let a = model.a();
    let b = model.b();
    let u_sq = solution.cos_sq_alpha * (a * a - b * b) / (b * b);
    let (big_a, big_b) = calculate_series_coefficients(u_sq);
    let delta_sigma = calculate_delta_sigma(big_b, &solution);
    let distance = b * big_a * (solution.sigma.0 - delta_sigma);

    let bearing = libm::atan2(
        u2.cos * libm::sin(solution.lambda.0),
        u1.cos * u2.sin - u1.sin * u2.cos * libm::cos(solution.lambda.0),
    );

    if !bearing.is_finite() {
        return Err(Error::Numeric("great circle bearing is not finite"));
    }
    if !distance.is_finite() {
        return Err(Error::Numeric("great circle distance is not finite"));
    }

    let path = GeoPath::new(distance, Radians(bearing));

    let mut trace = Trace::new();
    trace
        .record("gc.delta_lon_rad", delta_lon.0)
        .record("gc.iterations", solution.iterations)
        .record("gc.lambda_rad", solution.lambda.0)
        .record("gc.sigma_rad", solution.sigma.0)
        .record("gc.distance_km", path.distance_km())
        .record("gc.bearing_rad", path.bearing().0)
        .record("gc", STATUS_OK);

    Ok((path, trace))
}

/// Calculate the great circle between a pair of positions.
/// * `from`, `to` - the start and finish positions.
/// * `model` - the `EllipsoidModel`.
///
/// returns the great circle distance and initial bearing.
///
/// # Errors
///
/// Returns `Error::Convergence` if the positions are antipodal or nearly
/// antipodal, or `Error::Numeric` if the distance or bearing is not finite.
///
/// # Examples
/// ```
/// use geocalc::*;
///
/// let istanbul = Coordinate::new(Degrees(42.0), Degrees(29.0)).unwrap();
/// let washington = Coordinate::new(Degrees(39.0), Degrees(-77.0)).unwrap();
///
/// let path = calculate_great_circle(&istanbul, &washington, &WGS84_MODEL).unwrap();
/// assert_eq!("5182.15 miles", path.distance_text());
/// assert_eq!("309.31° true", path.bearing_text());
/// ```
pub fn calculate_great_circle(
    from: &Coordinate,
    to: &Coordinate,
    model: &EllipsoidModel,
) -> Result<GeoPath> {
    calculate_great_circle_traced(from, to, model).map(|(path, _)| path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SPHERE_MODEL, WGS84_MODEL};
    use angle_sc::{is_within_tolerance, Degrees};

    fn position(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(Degrees(lat), Degrees(lon)).unwrap()
    }

    #[test]
    fn test_calculate_reduced_latitude() {
        let result = calculate_reduced_latitude(Radians(0.0), WGS84_MODEL.one_minus_f());
        assert_eq!(0.0, result.sin);
        assert_eq!(1.0, result.cos);

        // On the sphere the reduced latitude is the geodetic latitude
        let lat = Radians(30_f64.to_radians());
        let result = calculate_reduced_latitude(lat, 1.0);
        assert!(is_within_tolerance(0.5, result.sin, 1e-15));
        assert!(is_within_tolerance(libm::cos(lat.0), result.cos, 1e-15));

        // On the ellipsoid it is closer to the Equator
        let result = calculate_reduced_latitude(lat, WGS84_MODEL.one_minus_f());
        assert!(result.sin < 0.5);
        assert!(is_within_tolerance(
            1.0,
            result.sin * result.sin + result.cos * result.cos,
            1e-15
        ));
    }

    #[test]
    fn test_calculate_series_coefficients() {
        assert_eq!((1.0, 0.0), calculate_series_coefficients(0.0));

        let (a, b) = calculate_series_coefficients(0.006_739_496_742_276_434);
        assert!(1.0 < a);
        assert!(0.0 < b);
    }

    #[test]
    fn test_great_circle_reference_values() {
        let home = position(45.5361, -122.8092);
        let destination = position(45.56, -122.2);

        let (result, trace) =
            calculate_great_circle_traced(&home, &destination, &WGS84_MODEL).unwrap();
        assert!(is_within_tolerance(47.647_361_650_067_77, result.distance_km(), 1e-9));
        assert!(is_within_tolerance(86.586_747_222_242_65, result.bearing_deg().0, 1e-9));
        assert!(45.0 < result.bearing_deg().0 && result.bearing_deg().0 < 135.0);

        let iterations = trace.get("gc.iterations").unwrap().to_string();
        assert!(iterations.parse::<u32>().unwrap() <= MAX_ITERATIONS);

        let result = calculate_great_circle(&home, &destination, &SPHERE_MODEL).unwrap();
        assert!(is_within_tolerance(47.513_944_220_743_284, result.distance_km(), 1e-9));
        assert!(is_within_tolerance(86.576_206_089_130_8, result.bearing_deg().0, 1e-9));
    }

    #[test]
    fn test_great_circle_is_symmetric() {
        let istanbul = position(42.0, 29.0);
        let washington = position(39.0, -77.0);

        for model in [&*WGS84_MODEL, &*SPHERE_MODEL] {
            let west = calculate_great_circle(&istanbul, &washington, model).unwrap();
            let east = calculate_great_circle(&washington, &istanbul, model).unwrap();
            assert!(is_within_tolerance(
                west.distance_km(),
                east.distance_km(),
                1e-6 * west.distance_km()
            ));
        }

        let west = calculate_great_circle(&istanbul, &washington, &WGS84_MODEL).unwrap();
        let east = calculate_great_circle(&washington, &istanbul, &WGS84_MODEL).unwrap();
        assert!(is_within_tolerance(8_339.863_136_024_633, west.distance_km(), 1e-7));
        assert!(is_within_tolerance(309.306_246_959_031_74, west.bearing_deg().0, 1e-9));
        assert!(is_within_tolerance(47.735_339_288_207_86, east.bearing_deg().0, 1e-9));
    }

    #[test]
    fn test_great_circle_model_sensitivity() {
        let istanbul = position(42.0, 29.0);
        let washington = position(39.0, -77.0);

        let ellipsoid = calculate_great_circle(&istanbul, &washington, &WGS84_MODEL).unwrap();
        let sphere = calculate_great_circle(&istanbul, &washington, &SPHERE_MODEL).unwrap();
        assert!(10.0 < ellipsoid.distance_km() - sphere.distance_km());
        assert!(is_within_tolerance(8_319.350_745_659_609, sphere.distance_km(), 1e-7));
    }

    #[test]
    fn test_great_circle_equator_and_meridian() {
        // Eastbound along the Equator
        let (result, trace) = calculate_great_circle_traced(
            &position(0.0, -40.0),
            &position(0.0, 50.0),
            &WGS84_MODEL,
        )
        .unwrap();
        assert!(is_within_tolerance(90.0, result.bearing_deg().0, 1e-12));
        assert!(is_within_tolerance(10_018.754_171_390_376, result.distance_km(), 1e-8));
        assert!(trace.number("gc.lambda_rad").unwrap() > core::f64::consts::FRAC_PI_2);

        // Northbound along a meridian
        let result =
            calculate_great_circle(&position(-70.0, 40.0), &position(80.0, 40.0), &WGS84_MODEL)
                .unwrap();
        assert_eq!(0.0, result.bearing_deg().0);
        assert!(is_within_tolerance(16_654.120_599_704_565, result.distance_km(), 1e-7));
    }

    #[test]
    fn test_great_circle_across_antimeridian() {
        let (result, trace) = calculate_great_circle_traced(
            &position(10.0, 179.0),
            &position(-10.0, -179.0),
            &WGS84_MODEL,
        )
        .unwrap();
        assert!(is_within_tolerance(2_222.774_554_699_072_7, result.distance_km(), 1e-8));
        assert!(is_within_tolerance(174.222_272_459_243_38, result.bearing_deg().0, 1e-9));
        assert!(is_within_tolerance(
            2_f64.to_radians(),
            trace.number("gc.delta_lon_rad").unwrap(),
            1e-12
        ));
    }

    #[test]
    fn test_great_circle_same_position() {
        let home = position(45.5361, -122.8092);
        for model in [&*WGS84_MODEL, &*SPHERE_MODEL] {
            let result = calculate_great_circle(&home, &home, model).unwrap();
            assert_eq!(0.0, result.distance_km());
            assert_eq!(0.0, result.bearing().0);
        }
    }

    #[test]
    fn test_great_circle_nearly_antipodal() {
        // Converges too slowly
        let result =
            calculate_great_circle(&position(0.0, 0.0), &position(0.5, 179.5), &WGS84_MODEL);
        assert!(matches!(result, Err(Error::Convergence { .. })));

        // Lambda exceeds pi
        let result =
            calculate_great_circle(&position(0.0, 0.0), &position(0.5, 179.7), &WGS84_MODEL);
        assert!(matches!(result, Err(Error::Convergence { .. })));

        // Antipodal on the Equator, lambda exceeds pi
        let result =
            calculate_great_circle(&position(0.0, 0.0), &position(0.0, 180.0), &WGS84_MODEL);
        assert!(matches!(result, Err(Error::Convergence { .. })));

        // Further from antipodal converges
        let result =
            calculate_great_circle(&position(0.0, 0.0), &position(1.0, 179.0), &WGS84_MODEL);
        assert!(result.is_ok());
    }

    #[test]
    fn test_solve_auxiliary_sphere_coincident() {
        let u = calculate_reduced_latitude(Radians(45_f64.to_radians()), WGS84_MODEL.one_minus_f());
        let result = solve_auxiliary_sphere(
            u,
            u,
            Radians(0.0),
            WGS84_MODEL.f(),
            CONVERGENCE_TOLERANCE,
            MAX_ITERATIONS,
        )
        .unwrap();
        assert_eq!(1, result.iterations);
        assert_eq!(0.0, result.sigma.0);
        assert_eq!(0.0, result.sin_sigma);
    }

    #[test]
    fn test_solve_auxiliary_sphere_iteration_limit() {
        let u1 = calculate_reduced_latitude(Radians(0.0), WGS84_MODEL.one_minus_f());
        let u2 = calculate_reduced_latitude(Radians(1_f64.to_radians()), WGS84_MODEL.one_minus_f());
        let delta_lon = Radians(179_f64.to_radians());

        let result = solve_auxiliary_sphere(
            u1,
            u2,
            delta_lon,
            WGS84_MODEL.f(),
            CONVERGENCE_TOLERANCE,
            MAX_ITERATIONS,
        )
        .unwrap();
        assert!(10 < result.iterations);

        let result = solve_auxiliary_sphere(
            u1,
            u2,
            delta_lon,
            WGS84_MODEL.f(),
            CONVERGENCE_TOLERANCE,
            5,
        );
        assert!(matches!(result, Err(Error::Convergence { iterations: 5 })));
    }
}
