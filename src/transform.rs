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

//! The transform module contains an affine transform from a local planar
//! coordinate system to geographic coordinates.
//!
//! The transform is fitted to three control points whose positions are known
//! in both coordinate systems. Latitude and longitude are each modelled as a
//! linear function of the local coordinates:
//!
//!   `lat = a0 * u + a1 * v + a2`
//!
//!   `lon = b0 * u + b1 * v + b2`
//!
//! The coefficients are the minimum norm least squares solutions, so
//! collinear or coincident control points produce a best fit rather than
//! an error.

use crate::error::{check_finite, Result};
use crate::{normalise_longitude, Error};
use angle_sc::Degrees;
use nalgebra::{Matrix3, Vector3, SVD, U3};
use unit_sphere::LatLong;

/// A point in a local planar coordinate system.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LocalPoint {
    /// The coordinate along the first axis.
    pub u: f64,
    /// The coordinate along the second axis.
    pub v: f64,
}

impl LocalPoint {
    /// Constructor.
    #[must_use]
    pub const fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }
}

/// The orientation of a caller's local axes relative to the (u, v) axes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AxisConvention {
    /// x maps to u and y maps to v.
    #[default]
    RightHanded,
    /// x maps to u and y maps to -v.
    LeftHanded,
}

impl AxisConvention {
    /// Convert a caller's local coordinates into a `LocalPoint`.
    /// * `x`, `y` - the coordinates along the caller's first and second axes.
    #[must_use]
    pub fn to_local(self, x: f64, y: f64) -> LocalPoint {
        match self {
            Self::RightHanded => LocalPoint::new(x, y),
            Self::LeftHanded => LocalPoint::new(x, -y),
        }
    }
}

/// Solve `m * x = b` for the minimum norm least squares `x`.
fn solve_least_squares(svd: &SVD<f64, U3, U3>, b: Vector3<f64>, eps: f64) -> Result<[f64; 3]> {
    let x = svd.solve(&b, eps).map_err(Error::LeastSquares)?;
    Ok([x[0], x[1], x[2]])
}

/// An affine transform from local coordinates to latitude and longitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineTransform {
    lat: [f64; 3],
    lon: [f64; 3],
}

impl AffineTransform {
    /// Fit an `AffineTransform` to three control points.
    /// * `control_local` - the control points in local coordinates.
    /// * `control_geo` - the positions of the control points.
    ///
    /// # Errors
    ///
    /// `Error::InvalidParameter` if a coordinate is not finite.
    pub fn fit(control_local: &[LocalPoint; 3], control_geo: &[LatLong; 3]) -> Result<Self> {
        for point in control_local {
            check_finite("u", point.u)?;
            check_finite("v", point.v)?;
        }
        for position in control_geo {
            check_finite("latitude", position.lat().0)?;
            check_finite("longitude", position.lon().0)?;
        }

        let m = Matrix3::from_fn(|row, column| match column {
            0 => control_local[row].u,
            1 => control_local[row].v,
            _ => 1.0,
        });
        let svd = SVD::new(m, true, true);
        let eps = 3.0 * f64::EPSILON * svd.singular_values.max();
        if svd.rank(eps) < 3 {
            tracing::debug!(
                rank = svd.rank(eps),
                "local frame control points are collinear, using minimum norm fit"
            );
        }

        // Measure longitudes from the first control point so that control
        // points either side of the anti-meridian stay adjacent.
        let lon0 = control_geo[0].lon().0;
        let longitudes = control_geo
            .map(|position| lon0 + normalise_longitude(Degrees(position.lon().0 - lon0)).0);
        let latitudes = control_geo.map(|position| position.lat().0);

        Ok(Self {
            lat: solve_least_squares(&svd, Vector3::from(latitudes), eps)?,
            lon: solve_least_squares(&svd, Vector3::from(longitudes), eps)?,
        })
    }

    /// The latitude coefficients: `[u, v, constant]`.
    #[must_use]
    pub const fn latitude_coefficients(&self) -> [f64; 3] {
        self.lat
    }

    /// The longitude coefficients: `[u, v, constant]`.
    #[must_use]
    pub const fn longitude_coefficients(&self) -> [f64; 3] {
        self.lon
    }

    /// Transform a point in local coordinates to a position.
    /// * `point` - the point in local coordinates.
    ///
    /// returns the position, with its latitude clamped to [-90, 90] and its
    /// longitude normalised to (-180, 180].
    #[must_use]
    pub fn apply(&self, point: LocalPoint) -> LatLong {
        let evaluate = |c: &[f64; 3]| c[0].mul_add(point.u, c[1].mul_add(point.v, c[2]));
        let lat = evaluate(&self.lat).clamp(-90.0, 90.0);
        let lon = normalise_longitude(Degrees(evaluate(&self.lon)));
        LatLong::new(Degrees(lat), lon)
    }
}
