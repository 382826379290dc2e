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

//! This module contains the series coefficients and correction terms used by
//! T. Vincenty's solutions of the direct and inverse geodesic problems.
//!
//! It uses the equations given by T. Vincenty in
//! [Direct and Inverse Solutions of Geodesics on the Ellipsoid with application
//! of nested equations](https://www.ngs.noaa.gov/PUBS_LIB/inverse.pdf),
//! Survey Review XXIII, No. 176, April 1975.

#![allow(clippy::suboptimal_flops)]

/// The polynomial coefficients of Vincenty's `A` series, Eq. 3.
const COEFFS_A: [f64; 4] = [4096.0, -768.0, 320.0, -175.0];

/// The polynomial coefficients of Vincenty's `B` series, Eq. 4.
const COEFFS_B: [f64; 4] = [256.0, -128.0, 74.0, -47.0];

/// Evaluate the polynomial in x using
/// [Horner's method](https://en.wikipedia.org/wiki/Horner%27s_method).
/// * `coeffs` - the polynomial coefficients, lowest order first.
/// * `x` - the variable.
#[must_use]
pub fn evaluate_polynomial(coeffs: &[f64], x: f64) -> f64 {
    coeffs.split_last().map_or(0.0, |(last, elements)| {
        elements
            .iter()
            .rev()
            .fold(*last, |result, element| result.mul_add(x, *element))
    })
}

/// Calculate `u²`, the square of the geodesic's parameter on the auxiliary sphere.
/// * `cos_sq_alpha` - the square of the cosine of the azimuth at the Equator.
/// * `ep_2` - the square of the second Eccentricity of the ellipsoid.
#[must_use]
pub fn calculate_u_sq(cos_sq_alpha: f64, ep_2: f64) -> f64 {
    cos_sq_alpha * ep_2
}

/// Vincenty's `A` series, Eq. 3.
/// * `u_sq` - the square of the geodesic parameter, see `calculate_u_sq`.
/// # Examples
/// ```
/// use vincenty_wgs84::ellipsoid::coefficients::evaluate_a;
///
/// assert_eq!(1.0, evaluate_a(0.0));
/// ```
#[must_use]
pub fn evaluate_a(u_sq: f64) -> f64 {
    1.0 + u_sq / 16384.0 * evaluate_polynomial(&COEFFS_A, u_sq)
}

/// Vincenty's `B` series, Eq. 4.
/// * `u_sq` - the square of the geodesic parameter, see `calculate_u_sq`.
/// # Examples
/// ```
/// use vincenty_wgs84::ellipsoid::coefficients::evaluate_b;
///
/// assert_eq!(0.0, evaluate_b(0.0));
/// ```
#[must_use]
pub fn evaluate_b(u_sq: f64) -> f64 {
    u_sq / 1024.0 * evaluate_polynomial(&COEFFS_B, u_sq)
}

/// Vincenty's `C` term, Eq. 10.
/// * `f` - the flattening of the ellipsoid.
/// * `cos_sq_alpha` - the square of the cosine of the azimuth at the Equator.
#[must_use]
pub fn evaluate_c(f: f64, cos_sq_alpha: f64) -> f64 {
    f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha))
}

/// Calculate `cos 2σm`, the cosine of twice the arc distance from the
/// Equator to the mid point of the geodesic, Eq. 17 rearranged.
///
/// Returns zero for geodesics along the Equator, where `cos²α` is zero.
/// * `cos_sigma` - the cosine of the arc length on the auxiliary sphere.
/// * `sin_u1_sin_u2` - the product of the sines of the reduced latitudes.
/// * `cos_sq_alpha` - the square of the cosine of the azimuth at the Equator.
#[must_use]
pub fn calculate_cos_2sigma_m(cos_sigma: f64, sin_u1_sin_u2: f64, cos_sq_alpha: f64) -> f64 {
    if cos_sq_alpha == 0.0 {
        0.0
    } else {
        cos_sigma - 2.0 * sin_u1_sin_u2 / cos_sq_alpha
    }
}

/// Vincenty's `Δσ` term, Eq. 6.
/// * `b` - the `B` series value.
/// * `sin_sigma`, `cos_sigma` - the sine and cosine of the arc length.
/// * `cos_2sigma_m` - see `calculate_cos_2sigma_m`.
#[must_use]
pub fn calculate_delta_sigma(b: f64, sin_sigma: f64, cos_sigma: f64, cos_2sigma_m: f64) -> f64 {
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

/// The difference between the longitude on the auxiliary sphere and the
/// longitude on the ellipsoid, Eqs. 11 and 13.
/// * `f` - the flattening of the ellipsoid.
/// * `sin_alpha` - the sine of the azimuth at the Equator.
/// * `sigma` - the arc length on the auxiliary sphere in radians.
/// * `sin_sigma`, `cos_sigma` - the sine and cosine of the arc length.
/// * `cos_2sigma_m` - see `calculate_cos_2sigma_m`.
#[must_use]
pub fn calculate_longitude_correction(
    f: f64,
    sin_alpha: f64,
    sigma: f64,
    sin_sigma: f64,
    cos_sigma: f64,
    cos_2sigma_m: f64,
) -> f64 {
    let c = evaluate_c(f, 1.0 - sin_alpha * sin_alpha);
    (1.0 - c)
        * f
        * sin_alpha
        * (sigma
            + c * sin_sigma
                * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ellipsoid::{calculate_sq_2nd_eccentricity, wgs84};
    use angle_sc::is_within_tolerance;

    #[test]
    fn test_evaluate_polynomial() {
        assert_eq!(0.0, evaluate_polynomial(&[], 2.0));
        assert_eq!(3.0, evaluate_polynomial(&[3.0], 2.0));
        // 1 + 2x + 3x^2 at x = 2
        assert_eq!(17.0, evaluate_polynomial(&[1.0, 2.0, 3.0], 2.0));
    }

    #[test]
    fn test_evaluate_a_and_b_wgs84() {
        // A meridional geodesic: cos^2 alpha = 1
        let u_sq = calculate_u_sq(1.0, calculate_sq_2nd_eccentricity(wgs84::F));
        assert!(is_within_tolerance(1.0016827510415456, evaluate_a(u_sq), 1e-15));
        assert!(is_within_tolerance(
            0.0016792186103152505,
            evaluate_b(u_sq),
            1e-15
        ));

        // An equatorial geodesic: cos^2 alpha = 0
        let u_sq = calculate_u_sq(0.0, calculate_sq_2nd_eccentricity(wgs84::F));
        assert_eq!(1.0, evaluate_a(u_sq));
        assert_eq!(0.0, evaluate_b(u_sq));
    }

    #[test]
    fn test_evaluate_c() {
        assert_eq!(0.0, evaluate_c(wgs84::F, 0.0));
        assert!(is_within_tolerance(
            0.0004199795627304385,
            evaluate_c(wgs84::F, 0.5),
            1e-17
        ));
        assert!(is_within_tolerance(
            0.0008389052498964729,
            evaluate_c(wgs84::F, 1.0),
            1e-17
        ));
    }

    #[test]
    fn test_calculate_cos_2sigma_m() {
        assert_eq!(0.0, calculate_cos_2sigma_m(0.5, 0.25, 0.0));
        assert_eq!(-0.5, calculate_cos_2sigma_m(0.5, 0.25, 0.5));
    }

    #[test]
    fn test_calculate_delta_sigma() {
        // No correction on a sphere or at zero arc length
        assert_eq!(0.0, calculate_delta_sigma(0.0, 0.5, 0.5, 0.5));
        assert_eq!(0.0, calculate_delta_sigma(0.001, 0.0, 1.0, 0.5));

        // First order term dominates for small B
        let b = 1e-6;
        assert!(is_within_tolerance(
            b * 0.5 * 0.25,
            calculate_delta_sigma(b, 0.5, 0.8, 0.25),
            1e-12
        ));
    }

    #[test]
    fn test_calculate_longitude_correction() {
        // No correction for a meridional geodesic
        assert_eq!(
            0.0,
            calculate_longitude_correction(wgs84::F, 0.0, 1.0, 0.8, 0.6, 0.5)
        );

        // An equatorial geodesic: C = 0, so the correction is f * sigma
        let sigma = 1.0;
        let (sin_sigma, cos_sigma) = (libm::sin(sigma), libm::cos(sigma));
        assert!(is_within_tolerance(
            wgs84::F * sigma,
            calculate_longitude_correction(wgs84::F, 1.0, sigma, sin_sigma, cos_sigma, 0.0),
            1e-18
        ));
    }
}
