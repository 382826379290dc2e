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

//! The spherical module contains approximate navigation calculations on a
//! sphere with the mean radius of the Earth.
//!
//! They are faster but less accurate than the ellipsoidal calculations in
//! the `vincenty` module, with errors of up to about 0.5%.

use crate::ellipsoid::wgs84::MEAN_RADIUS;
use crate::{normalise_bearing, normalise_longitude, Metres};
use angle_sc::{Angle, Degrees, Radians};
use unit_sphere::{great_circle, LatLong};

/// Calculate the great circle distance between a pair of positions.
/// * `a`, `b` - the start and finish positions.
///
/// returns the distance on the mean radius sphere in metres.
/// # Examples
/// ```
/// use vincenty_wgs84::{spherical, Degrees, LatLong};
/// use angle_sc::is_within_tolerance;
///
/// let a = LatLong::new(Degrees(0.0), Degrees(0.0));
/// let b = LatLong::new(Degrees(0.0), Degrees(90.0));
/// let distance = spherical::distance(&a, &b);
/// assert!(is_within_tolerance(10_007_543.398, distance.0, 1e-3));
/// ```
#[must_use]
pub fn distance(a: &LatLong, b: &LatLong) -> Metres {
    let gc_distance = great_circle::calculate_gc_distance(
        Angle::from(a.lat()),
        Angle::from(b.lat()),
        Angle::from(b.lon() - a.lon()),
    );
    Metres(MEAN_RADIUS.0 * gc_distance.0)
}

/// Calculate the initial great circle bearing from `a` to `b`.
///
/// returns the bearing in the range [0, 360) degrees.
#[must_use]
pub fn bearing(a: &LatLong, b: &LatLong) -> Degrees {
    let azimuth = great_circle::calculate_gc_azimuth(
        Angle::from(a.lat()),
        Angle::from(b.lat()),
        Angle::from(b.lon() - a.lon()),
    );
    normalise_bearing(Degrees::from(azimuth))
}

/// Calculate the position at `distance` along the great circle from `a` at
/// the initial `bearing`.
/// * `a` - the start position.
/// * `bearing` - the initial bearing.
/// * `distance` - the distance in metres.
///
/// returns the position with its longitude in the range (-180, 180] degrees.
/// # Examples
/// ```
/// use vincenty_wgs84::{spherical, Degrees, LatLong, Metres};
/// use angle_sc::is_within_tolerance;
///
/// let a = LatLong::new(Degrees(0.0), Degrees(0.0));
/// let b = spherical::destination(&a, Degrees(90.0), Metres(10_007_543.398));
/// assert!(is_within_tolerance(0.0, b.lat().0, 1e-9));
/// assert!(is_within_tolerance(90.0, b.lon().0, 1e-6));
/// ```
#[must_use]
pub fn destination(a: &LatLong, bearing: Degrees, distance: Metres) -> LatLong {
    let length = Radians(distance.0 / MEAN_RADIUS.0);
    let arc = unit_sphere::Arc::from_lat_lon_azi_length(a, Angle::from(bearing), length);
    let point = arc.position(length);
    let position = LatLong::from(&point);
    LatLong::new(position.lat(), normalise_longitude(position.lon()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vincenty::{solve_inverse, Settings};
    use crate::WGS84_ELLIPSOID;
    use angle_sc::is_within_tolerance;

    #[test]
    fn test_distance_and_bearing() {
        let a = LatLong::new(Degrees(0.0), Degrees(0.0));

        let b = LatLong::new(Degrees(90.0), Degrees(0.0));
        assert!(is_within_tolerance(
            core::f64::consts::FRAC_PI_2 * MEAN_RADIUS.0,
            distance(&a, &b).0,
            1e-6
        ));
        assert!(is_within_tolerance(0.0, bearing(&a, &b).0, 1e-12));

        let b = LatLong::new(Degrees(0.0), Degrees(-90.0));
        assert!(is_within_tolerance(270.0, bearing(&a, &b).0, 1e-12));

        assert!(is_within_tolerance(0.0, distance(&a, &a).0, 1e-9));
    }

    #[test]
    fn test_destination_round_trip() {
        let a = LatLong::new(Degrees(44.520414), Degrees(-1.116611));
        let range = Metres(25_000.0);

        for i in 0..12 {
            let course = Degrees(30.0 * f64::from(i));
            let b = destination(&a, course, range);
            assert!(is_within_tolerance(range.0, distance(&a, &b).0, 1e-6));
        }
    }

    #[test]
    fn test_destination() {
        let a = LatLong::new(Degrees(0.0), Degrees(0.0));
        let quarter = core::f64::consts::FRAC_PI_2 * MEAN_RADIUS.0;

        let b = destination(&a, Degrees(0.0), Metres(quarter));
        assert!(is_within_tolerance(90.0, b.lat().0, 1e-9));

        let b = destination(&a, Degrees(270.0), Metres(quarter));
        assert!(is_within_tolerance(0.0, b.lat().0, 1e-9));
        assert!(is_within_tolerance(-90.0, b.lon().0, 1e-9));

        let b = destination(&a, Degrees(45.0), Metres(0.0));
        assert!(is_within_tolerance(0.0, b.lat().0, 1e-12));
        assert!(is_within_tolerance(0.0, b.lon().0, 1e-12));
    }

    #[test]
    fn test_destination_across_antimeridian() {
        let a = LatLong::new(Degrees(-10.0), Degrees(179.5));
        let b = destination(&a, Degrees(90.0), Metres(200_000.0));

        assert!(-179.0 < b.lon().0 && b.lon().0 < -178.0);
        assert!(is_within_tolerance(200_000.0, distance(&a, &b).0, 1e-6));
        assert!(is_within_tolerance(90.0, bearing(&a, &b).0, 1e-6));
    }

    #[test]
    fn test_compare_with_ellipsoid() {
        let a = LatLong::new(Degrees(44.520414), Degrees(-1.116611));
        let b = destination(&a, Degrees(60.0), Metres(100_000.0));

        let result = solve_inverse(&a, &b, &Settings::default(), &WGS84_ELLIPSOID);
        let relative_error = libm::fabs(result.distance().0 - 100_000.0) / 100_000.0;
        assert!(relative_error < 0.005);
    }
}
