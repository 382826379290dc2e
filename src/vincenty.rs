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

//! The vincenty module contains T. Vincenty's iterative solutions of the
//! inverse and direct geodesic problems on an ellipsoid of revolution.
//!
//! Both solutions iterate to a fixed point on the auxiliary sphere:
//! - the inverse problem iterates the longitude difference `λ` on the
//!   auxiliary sphere between two known positions;
//! - the direct problem iterates the arc length `σ` on the auxiliary sphere
//!   given a start position, azimuth and length.
//!
//! The iteration is performed by `iterate`, parameterised by a `FixedPoint`
//! for each problem.
//!
//! The iteration is capped. Reaching the cap is not an error: the last
//! iterate is used and the returned `Status` is marked as not converged.

#![allow(clippy::float_cmp)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::suboptimal_flops)]

use crate::ellipsoid::coefficients::{
    calculate_cos_2sigma_m, calculate_delta_sigma, calculate_longitude_correction,
    calculate_u_sq, evaluate_a, evaluate_b,
};
use crate::{normalise_bearing, normalise_longitude, Ellipsoid, Metres};
use angle_sc::{Angle, Degrees};
use unit_sphere::LatLong;

/// The default convergence threshold, in radians.
pub const DEFAULT_THRESHOLD: f64 = 1e-12;

/// The default maximum number of iterations.
pub const MAX_ITERATIONS: u32 = 100;

/// The settings used to solve the geodesic problems.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settings {
    /// The iteration stops when successive iterates differ by less than this.
    pub threshold: f64,
    /// The maximum number of iterations, at least one is always performed.
    pub max_iterations: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            max_iterations: MAX_ITERATIONS,
        }
    }
}

/// How a solution was reached.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Status {
    /// The number of iterations performed.
    pub iterations: u32,
    /// Whether the iteration met the threshold before the iteration cap.
    pub converged: bool,
}

impl Status {
    /// The `Status` of a solution that did not require any iterations.
    #[must_use]
    pub const fn immediate() -> Self {
        Self {
            iterations: 0,
            converged: true,
        }
    }
}

/// One step of a fixed point iteration.
pub trait FixedPoint {
    /// Calculate the next iterate from `x`.
    ///
    /// returns None if the geometry is degenerate at `x`.
    fn next(&mut self, x: f64) -> Option<f64>;
}

/// The result of `iterate`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outcome {
    /// The final iterate, whether or not it converged.
    Solved(f64, Status),
    /// The `FixedPoint` reported a degenerate geometry.
    Degenerate(Status),
}

/// Iterate a `FixedPoint` from `initial` until successive iterates differ by
/// less than `settings.threshold` or `settings.max_iterations` is reached.
/// * `problem` - the `FixedPoint` to iterate.
/// * `initial` - the initial value.
/// * `settings` - the threshold and iteration cap.
///
/// returns the final iterate and its `Status` or `Outcome::Degenerate`.
pub fn iterate<P: FixedPoint>(problem: &mut P, initial: f64, settings: &Settings) -> Outcome {
    let max_iterations = settings.max_iterations.max(1);

    let mut x = initial;
    for iterations in 1..=max_iterations {
        let Some(next) = problem.next(x) else {
            return Outcome::Degenerate(Status {
                iterations,
                converged: true,
            });
        };
        let delta = libm::fabs(next - x);
        x = next;
        if delta < settings.threshold {
            return Outcome::Solved(
                x,
                Status {
                    iterations,
                    converged: true,
                },
            );
        }
    }

    tracing::warn!(
        iterations = max_iterations,
        threshold = settings.threshold,
        "geodesic iteration did not converge, using last iterate"
    );
    Outcome::Solved(
        x,
        Status {
            iterations: max_iterations,
            converged: false,
        },
    )
}

/// The arc length on the auxiliary sphere and its trigonometric terms.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct ArcTerms {
    sigma: f64,
    sin_sigma: f64,
    cos_sigma: f64,
    cos_2sigma_m: f64,
}

impl ArcTerms {
    /// The terms at arc length `sigma` from a start point at arc length
    /// `sigma1` from the Equator.
    fn from_sigma(sigma: f64, sigma1: f64) -> Self {
        Self {
            sigma,
            sin_sigma: libm::sin(sigma),
            cos_sigma: libm::cos(sigma),
            cos_2sigma_m: libm::cos(2.0 * sigma1 + sigma),
        }
    }
}

/// The inverse problem: iterate `λ`, the longitude difference on the
/// auxiliary sphere.
struct Inverse {
    /// The longitude difference on the ellipsoid, in radians.
    l: f64,
    sin_u1: f64,
    cos_u1: f64,
    sin_u2: f64,
    cos_u2: f64,
    f: f64,

    // values from the last step
    sin_lambda: f64,
    cos_lambda: f64,
    sin_alpha: f64,
    cos_sq_alpha: f64,
    terms: ArcTerms,
}

impl FixedPoint for Inverse {
    fn next(&mut self, lambda: f64) -> Option<f64> {
        self.sin_lambda = libm::sin(lambda);
        self.cos_lambda = libm::cos(lambda);

        let sin_sigma = libm::hypot(
            self.cos_u2 * self.sin_lambda,
            self.cos_u1 * self.sin_u2 - self.sin_u1 * self.cos_u2 * self.cos_lambda,
        );
        if sin_sigma == 0.0 {
            return None;
        }

        let cos_sigma = self.sin_u1 * self.sin_u2 + self.cos_u1 * self.cos_u2 * self.cos_lambda;
        let sigma = libm::atan2(sin_sigma, cos_sigma);
        self.sin_alpha = self.cos_u1 * self.cos_u2 * self.sin_lambda / sin_sigma;
        self.cos_sq_alpha = 1.0 - self.sin_alpha * self.sin_alpha;
        let cos_2sigma_m =
            calculate_cos_2sigma_m(cos_sigma, self.sin_u1 * self.sin_u2, self.cos_sq_alpha);
        self.terms = ArcTerms {
            sigma,
            sin_sigma,
            cos_sigma,
            cos_2sigma_m,
        };

        Some(
            self.l
                + calculate_longitude_correction(
                    self.f,
                    self.sin_alpha,
                    sigma,
                    sin_sigma,
                    cos_sigma,
                    cos_2sigma_m,
                ),
        )
    }
}

/// The direct problem: iterate `σ`, the arc length on the auxiliary sphere.
struct Direct {
    /// The arc length from the Equator to the start point.
    sigma1: f64,
    /// The first approximation to the arc length, `s / (b * A)`.
    sigma0: f64,
    /// The `B` series value.
    b: f64,
}

impl FixedPoint for Direct {
    fn next(&mut self, sigma: f64) -> Option<f64> {
        let terms = ArcTerms::from_sigma(sigma, self.sigma1);
        Some(
            self.sigma0
                + calculate_delta_sigma(
                    self.b,
                    terms.sin_sigma,
                    terms.cos_sigma,
                    terms.cos_2sigma_m,
                ),
        )
    }
}

/// The solution of the inverse geodesic problem.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeodesicResult {
    distance: Metres,
    bearing: Degrees,
    final_bearing: Degrees,
    status: Status,
}

impl GeodesicResult {
    /// The `GeodesicResult` between coincident positions.
    #[must_use]
    pub const fn coincident(status: Status) -> Self {
        Self {
            distance: Metres(0.0),
            bearing: Degrees(0.0),
            final_bearing: Degrees(0.0),
            status,
        }
    }

    /// The length of the geodesic in metres.
    #[must_use]
    pub const fn distance(&self) -> Metres {
        self.distance
    }

    /// The initial bearing of the geodesic, in the range [0, 360) degrees.
    #[must_use]
    pub const fn bearing(&self) -> Degrees {
        self.bearing
    }

    /// The bearing of the geodesic at its end point, in the range [0, 360) degrees.
    #[must_use]
    pub const fn final_bearing(&self) -> Degrees {
        self.final_bearing
    }

    /// How the solution was reached.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }
}

/// Solve the inverse geodesic problem: calculate the length and bearings of
/// the geodesic between a pair of positions.
/// * `a`, `b` - the start and finish positions in geodetic coordinates.
/// * `settings` - the threshold and iteration cap.
/// * `ellipsoid` - the `Ellipsoid`.
///
/// returns the `GeodesicResult`, a zero distance and bearing if the positions
/// coincide.
#[allow(clippy::similar_names)]
#[must_use]
pub fn solve_inverse(
    a: &LatLong,
    b: &LatLong,
    settings: &Settings,
    ellipsoid: &Ellipsoid,
) -> GeodesicResult {
    if a.lat().0 == b.lat().0 && a.lon().0 == b.lon().0 {
        tracing::debug!("inverse geodesic positions coincide");
        return GeodesicResult::coincident(Status::immediate());
    }

    let u1 = ellipsoid.calculate_parametric_latitude(Angle::from(a.lat()));
    let u2 = ellipsoid.calculate_parametric_latitude(Angle::from(b.lat()));
    let l = normalise_longitude(Degrees(b.lon().0 - a.lon().0))
        .0
        .to_radians();

    let mut problem = Inverse {
        l,
        sin_u1: u1.sin().0,
        cos_u1: u1.cos().0,
        sin_u2: u2.sin().0,
        cos_u2: u2.cos().0,
        f: ellipsoid.f(),
        sin_lambda: 0.0,
        cos_lambda: 1.0,
        sin_alpha: 0.0,
        cos_sq_alpha: 1.0,
        terms: ArcTerms::default(),
    };

    let status = match iterate(&mut problem, l, settings) {
        Outcome::Solved(_, status) => status,
        Outcome::Degenerate(status) => {
            tracing::debug!("inverse geodesic arc length is zero, returning zero distance");
            return GeodesicResult::coincident(status);
        }
    };

    let terms = problem.terms;
    let u_sq = calculate_u_sq(problem.cos_sq_alpha, ellipsoid.ep_2());
    let coeff_b = evaluate_b(u_sq);
    let delta_sigma = calculate_delta_sigma(
        coeff_b,
        terms.sin_sigma,
        terms.cos_sigma,
        terms.cos_2sigma_m,
    );
    let distance = Metres(ellipsoid.b().0 * evaluate_a(u_sq) * (terms.sigma - delta_sigma));

    let bearing = libm::atan2(
        problem.cos_u2 * problem.sin_lambda,
        problem.cos_u1 * problem.sin_u2 - problem.sin_u1 * problem.cos_u2 * problem.cos_lambda,
    );
    let final_bearing = libm::atan2(
        problem.cos_u1 * problem.sin_lambda,
        problem.cos_u1 * problem.sin_u2 * problem.cos_lambda - problem.sin_u1 * problem.cos_u2,
    );

    GeodesicResult {
        distance,
        bearing: normalise_bearing(Degrees(bearing.to_degrees())),
        final_bearing: normalise_bearing(Degrees(final_bearing.to_degrees())),
        status,
    }
}

/// Solve the direct geodesic problem: calculate the position at a distance
/// along a geodesic from a start position and initial bearing.
/// * `a` - the start position in geodetic coordinates.
/// * `bearing` - the initial bearing of the geodesic.
/// * `distance` - the distance along the geodesic in metres, a finite value
///   not less than zero.
/// * `settings` - the threshold and iteration cap.
/// * `ellipsoid` - the `Ellipsoid`.
///
/// returns the position at `distance` with its longitude in the range
/// (-180, 180] degrees, or `a` if `distance` is zero.
/// A negative or non-finite `distance` panics in debug builds.
#[allow(clippy::similar_names)]
#[must_use]
pub fn solve_direct(
    a: &LatLong,
    bearing: Degrees,
    distance: Metres,
    settings: &Settings,
    ellipsoid: &Ellipsoid,
) -> (LatLong, Status) {
    debug_assert!(
        0.0 <= distance.0 && distance.0.is_finite(),
        "geodesic distance must be finite and not negative: {distance:?}"
    );
    if distance.0 == 0.0 {
        return (*a, Status::immediate());
    }

    let alpha1 = Angle::from(bearing);
    let sin_alpha1 = alpha1.sin().0;
    let cos_alpha1 = alpha1.cos().0;

    let u1 = ellipsoid.calculate_parametric_latitude(Angle::from(a.lat()));
    let sin_u1 = u1.sin().0;
    let cos_u1 = u1.cos().0;

    // arc length from the Equator to the start point, i.e. atan2(tan U1, cos alpha1)
    let sigma1 = libm::atan2(sin_u1, cos_u1 * cos_alpha1);
    let sin_alpha = cos_u1 * sin_alpha1;
    let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;

    let u_sq = calculate_u_sq(cos_sq_alpha, ellipsoid.ep_2());
    let sigma0 = distance.0 / (ellipsoid.b().0 * evaluate_a(u_sq));

    let mut problem = Direct {
        sigma1,
        sigma0,
        b: evaluate_b(u_sq),
    };
    let (sigma, status) = match iterate(&mut problem, sigma0, settings) {
        Outcome::Solved(sigma, status) => (sigma, status),
        Outcome::Degenerate(status) => (sigma0, status),
    };

    let terms = ArcTerms::from_sigma(sigma, sigma1);
    let x = sin_u1 * terms.sin_sigma - cos_u1 * terms.cos_sigma * cos_alpha1;
    let lat2 = libm::atan2(
        sin_u1 * terms.cos_sigma + cos_u1 * terms.sin_sigma * cos_alpha1,
        ellipsoid.one_minus_f() * libm::hypot(sin_alpha, x),
    );
    let lambda = libm::atan2(
        terms.sin_sigma * sin_alpha1,
        cos_u1 * terms.cos_sigma - sin_u1 * terms.sin_sigma * cos_alpha1,
    );
    let l = lambda
        - calculate_longitude_correction(
            ellipsoid.f(),
            sin_alpha,
            terms.sigma,
            terms.sin_sigma,
            terms.cos_sigma,
            terms.cos_2sigma_m,
        );

    let lon2 = normalise_longitude(Degrees(a.lon().0 + l.to_degrees()));
    (LatLong::new(Degrees(lat2.to_degrees()), lon2), status)
}
