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

//! vincenty-wgs84
//!
//! A library for solving geodesic problems on the
//! [WGS-84](https://www.icao.int/NACC/Documents/Meetings/2014/ECARAIM/REF08-Doc9674.pdf)
//! ellipsoid and for generating the boundaries of shapes drawn on it.
//!
//! ## Geodesic problems
//!
//! The shortest path between two points on the surface of an ellipsoid is a
//! [geodesic](https://en.wikipedia.org/wiki/Geodesics_on_an_ellipsoid).
//! This library uses T. Vincenty's
//! [iterative formulae](https://www.ngs.noaa.gov/PUBS_LIB/inverse.pdf)
//! to solve:
//!
//! - the inverse problem: the length and initial bearing of the geodesic
//!   between two positions, see [`inverse`];
//! - the direct problem: the position at a distance along a geodesic from a
//!   start position and initial bearing, see [`direct`].
//!
//! Vincenty's inverse method does not converge for some nearly antipodal
//! positions. The iterations are capped and the last iterate is used: the
//! [`vincenty::Status`] of a solution reports whether it converged.
//!
//! ## Shapes
//!
//! Circles, arcs and rectangles defined by a centre position and dimensions
//! in metres are projected onto the ellipsoid by solving the direct problem
//! from their centres, see [`project_shape`].
//!
//! ## Local coordinates
//!
//! Positions measured in a local planar coordinate system are converted to
//! latitude and longitude by an affine transform fitted to three control
//! points, see [`fit_and_apply`].
//!
//! ## Design
//!
//! All angles are in degrees and all distances in metres at the interface.
//! The library depends upon the following crates:
//!
//! - [angle-sc](https://crates.io/crates/angle-sc) - to define `Angle`,
//!   `Degrees` and `Radians` and perform trigonometric calculations;
//! - [unit-sphere](https://crates.io/crates/unit-sphere) - to define `LatLong`
//!   and perform great-circle calculations.
//! - [icao_units](https://crates.io/crates/icao-units) - to define `Metres` and
//!   `NauticalMiles` and perform conversions between them.
//! - [nalgebra](https://crates.io/crates/nalgebra) - to solve least squares
//!   problems.
//!
//! The calculations are pure functions of their arguments: they may be called
//! from any number of threads.

extern crate angle_sc;
extern crate icao_units;
extern crate unit_sphere;

pub mod ellipsoid;
pub mod error;
pub mod shape;
pub mod spherical;
pub mod transform;
pub mod vincenty;

pub use angle_sc::{Angle, Degrees, Radians};
pub use error::Error;
pub use icao_units::non_si::NauticalMiles;
pub use icao_units::si::Metres;
pub use shape::{Arc, BoundarySequence, Circle, Rectangle, ShapeSpec};
pub use transform::{AffineTransform, AxisConvention, LocalPoint};
pub use unit_sphere::LatLong;
pub use vincenty::{GeodesicResult, Settings, Status};

use lazy_static::lazy_static;

/// The parameters of an `Ellipsoid`.
#[derive(Clone, Debug, PartialEq)]
pub struct Ellipsoid {
    /// The Semimajor axis of the ellipsoid.
    a: Metres,
    /// The flattening of the ellipsoid, a ratio.
    f: f64,

    /// The Semiminor axis of the ellipsoid.
    b: Metres,
    /// One minus the flattening ratio.
    one_minus_f: f64,
    /// The square of the second Eccentricity of the ellipsoid.
    ep_2: f64,
}

impl Ellipsoid {
    /// Constructor.
    /// * `a` - the Semimajor axis of the `Ellipsoid`.
    /// * `f` - the flattening of the `Ellipsoid`, a ratio.
    #[must_use]
    pub fn new(a: Metres, f: f64) -> Self {
        Self {
            a,
            f,
            b: ellipsoid::calculate_minor_axis(a, f),
            one_minus_f: 1.0 - f,
            ep_2: ellipsoid::calculate_sq_2nd_eccentricity(f),
        }
    }

    /// Construct an `Ellipsoid` with the WGS-84 parameters.
    #[must_use]
    pub fn wgs84() -> Self {
        Self::new(ellipsoid::wgs84::A, ellipsoid::wgs84::F)
    }

    /// The Semimajor axis of the ellipsoid.
    #[must_use]
    pub const fn a(&self) -> Metres {
        self.a
    }

    /// The flattening of the ellipsoid, a ratio.
    #[must_use]
    pub const fn f(&self) -> f64 {
        self.f
    }

    /// The Semiminor axis of the ellipsoid.
    #[must_use]
    pub const fn b(&self) -> Metres {
        self.b
    }

    /// One minus the flattening ratio.
    #[must_use]
    pub const fn one_minus_f(&self) -> f64 {
        self.one_minus_f
    }

    /// The square of the second Eccentricity of the ellipsoid.
    #[must_use]
    pub const fn ep_2(&self) -> f64 {
        self.ep_2
    }

    /// Convert a geodetic Latitude to a parametric Latitude on the
    /// auxiliary sphere.
    /// * `lat` - the geodetic Latitude
    #[must_use]
    pub fn calculate_parametric_latitude(&self, lat: Angle) -> Angle {
        ellipsoid::calculate_parametric_latitude(lat, self.one_minus_f)
    }

    /// Convert a parametric Latitude on the auxiliary sphere to a
    /// geodetic Latitude.
    /// * `beta` - the parametric Latitude
    #[must_use]
    pub fn calculate_geodetic_latitude(&self, beta: Angle) -> Angle {
        ellipsoid::calculate_geodetic_latitude(beta, self.one_minus_f)
    }
}

lazy_static! {
    /// A static instance of the WGS-84 `Ellipsoid`.
    pub static ref WGS84_ELLIPSOID: Ellipsoid = Ellipsoid::wgs84();
}

/// Normalise a longitude into the range (-180, 180] degrees.
/// # Examples
/// ```
/// use vincenty_wgs84::{normalise_longitude, Degrees};
///
/// assert_eq!(180.0, normalise_longitude(Degrees(-180.0)).0);
/// assert_eq!(-170.0, normalise_longitude(Degrees(190.0)).0);
/// assert_eq!(10.0, normalise_longitude(Degrees(370.0)).0);
/// ```
#[must_use]
pub fn normalise_longitude(lon: Degrees) -> Degrees {
    if -180.0 < lon.0 && lon.0 <= 180.0 {
        lon
    } else {
        let value = (lon.0 + 180.0).rem_euclid(360.0) - 180.0;
        Degrees(if value <= -180.0 { 180.0 } else { value })
    }
}

/// Normalise a bearing into the range [0, 360) degrees.
/// # Examples
/// ```
/// use vincenty_wgs84::{normalise_bearing, Degrees};
///
/// assert_eq!(0.0, normalise_bearing(Degrees(360.0)).0);
/// assert_eq!(270.0, normalise_bearing(Degrees(-90.0)).0);
/// ```
#[must_use]
pub fn normalise_bearing(bearing: Degrees) -> Degrees {
    if (0.0..360.0).contains(&bearing.0) {
        bearing
    } else {
        let value = bearing.0.rem_euclid(360.0);
        // rem_euclid rounds tiny negative values up to 360
        Degrees(if 360.0 <= value { 0.0 } else { value })
    }
}

/// The signed angle from bearing `a` to bearing `b`, in the range (-180, 180].
#[must_use]
pub fn delta_bearing(a: Degrees, b: Degrees) -> Degrees {
    normalise_longitude(Degrees(b.0 - a.0))
}

/// Construct a validated `LatLong`.
/// * `lat` - the latitude, in the range [-90, 90] degrees.
/// * `lon` - the longitude, normalised to the range (-180, 180] degrees.
///
/// # Errors
///
/// `Error::InvalidParameter` if the latitude is out of range or either value
/// is not finite.
pub fn lat_long(lat: Degrees, lon: Degrees) -> Result<LatLong, Error> {
    let lat = error::check_finite("latitude", lat.0)?;
    if !(-90.0..=90.0).contains(&lat) {
        return Err(Error::invalid("latitude", "must be in the range [-90, 90] degrees"));
    }
    let lon = error::check_finite("longitude", lon.0)?;
    Ok(LatLong::new(Degrees(lat), normalise_longitude(Degrees(lon))))
}

/// Calculate the length and initial bearing of the geodesic between a pair
/// of positions on the WGS-84 ellipsoid.
/// * `a`, `b` - the start and finish positions.
///
/// returns the `GeodesicResult`: zero distance and bearing if the positions
/// coincide.
///
/// # Examples
/// ```
/// use vincenty_wgs84::*;
/// use angle_sc::is_within_tolerance;
///
/// let flinders_peak = LatLong::new(Degrees(-37.951033417), Degrees(144.424867889));
/// let buninyong = LatLong::new(Degrees(-37.652821139), Degrees(143.926495528));
/// let result = inverse(&flinders_peak, &buninyong);
///
/// assert!(is_within_tolerance(54_972.271, result.distance().0, 1e-3));
/// assert!(is_within_tolerance(306.868159, result.bearing().0, 1e-6));
/// assert!(result.status().converged);
///
/// let distance_nm = NauticalMiles::from(result.distance());
/// println!("Flinders Peak-Buninyong distance: {:?}", distance_nm);
/// ```
#[must_use]
pub fn inverse(a: &LatLong, b: &LatLong) -> GeodesicResult {
    vincenty::solve_inverse(a, b, &Settings::default(), &WGS84_ELLIPSOID)
}

/// Calculate the position at a distance along the geodesic from a position
/// at an initial bearing on the WGS-84 ellipsoid.
/// * `a` - the start position.
/// * `bearing` - the initial bearing.
/// * `distance` - the distance in metres, a finite value not less than zero.
///
/// returns the position, `a` if `distance` is zero.
/// A negative or non-finite `distance` panics in debug builds.
///
/// # Examples
/// ```
/// use vincenty_wgs84::*;
/// use angle_sc::is_within_tolerance;
///
/// let flinders_peak = LatLong::new(Degrees(-37.951033417), Degrees(144.424867889));
/// let buninyong = direct(&flinders_peak, Degrees(306.868159), Metres(54_972.271));
///
/// assert!(is_within_tolerance(-37.652821139, buninyong.lat().0, 1e-6));
/// assert!(is_within_tolerance(143.926495528, buninyong.lon().0, 1e-6));
/// ```
#[must_use]
pub fn direct(a: &LatLong, bearing: Degrees, distance: Metres) -> LatLong {
    vincenty::solve_direct(a, bearing, distance, &Settings::default(), &WGS84_ELLIPSOID).0
}

/// Generate the boundary of a shape on the WGS-84 ellipsoid.
/// * `shape` - the shape.
///
/// # Examples
/// ```
/// use vincenty_wgs84::*;
///
/// let centre = LatLong::new(Degrees(44.52), Degrees(-1.12));
/// let circle = Circle::new(centre, Metres(9_260.0), 36).unwrap();
/// let boundary = project_shape(&ShapeSpec::from(circle));
///
/// assert_eq!(37, boundary.len());
/// assert_eq!(boundary.first(), boundary.last());
/// ```
#[must_use]
pub fn project_shape(shape: &ShapeSpec) -> BoundarySequence {
    shape::project(shape, &Settings::default(), &WGS84_ELLIPSOID)
}

/// Fit an `AffineTransform` to three control points and apply it to a
/// point in local coordinates.
/// * `control_local` - the control points in local coordinates.
/// * `control_geo` - the positions of the control points.
/// * `query` - the point to transform.
///
/// # Errors
///
/// `Error::InvalidParameter` if a coordinate is not finite.
pub fn fit_and_apply(
    control_local: &[LocalPoint; 3],
    control_geo: &[LatLong; 3],
    query: LocalPoint,
) -> Result<LatLong, Error> {
    AffineTransform::fit(control_local, control_geo).map(|transform| transform.apply(query))
}

/// Calculate the length of a path through a sequence of positions on the
/// WGS-84 ellipsoid.
/// * `points` - the positions.
///
/// returns the sum of the geodesic lengths between consecutive positions.
#[must_use]
pub fn path_length(points: &[LatLong]) -> Metres {
    Metres(
        points
            .windows(2)
            .map(|pair| inverse(&pair[0], &pair[1]).distance().0)
            .sum(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use angle_sc::is_within_tolerance;

    #[test]
    fn test_ellipsoid_wgs84() {
        let geoid = Ellipsoid::wgs84();
        assert_eq!(ellipsoid::wgs84::A, geoid.a());
        assert_eq!(ellipsoid::wgs84::F, geoid.f());
        assert_eq!(
            ellipsoid::calculate_minor_axis(ellipsoid::wgs84::A, ellipsoid::wgs84::F),
            geoid.b()
        );
        assert_eq!(1.0 - ellipsoid::wgs84::F, geoid.one_minus_f());
        assert_eq!(
            ellipsoid::calculate_sq_2nd_eccentricity(ellipsoid::wgs84::F),
            geoid.ep_2()
        );

        let lat = Angle::from(Degrees(45.0));
        let beta = geoid.calculate_parametric_latitude(lat);
        assert!(is_within_tolerance(
            45.0,
            Degrees::from(geoid.calculate_geodetic_latitude(beta)).0,
            32.0 * f64::EPSILON
        ));

        assert_eq!(geoid, *WGS84_ELLIPSOID);
    }

    #[test]
    fn test_ellipsoid_traits() {
        let geoid = Ellipsoid::new(Metres(6_378_160.0), 1.0 / 298.25);

        let geoid_clone = geoid.clone();
        assert!(geoid_clone == geoid);
        assert!(geoid != Ellipsoid::wgs84());

        println!("Ellipsoid: {:?}", geoid);
    }

    #[test]
    fn test_normalise_longitude() {
        assert_eq!(0.0, normalise_longitude(Degrees(0.0)).0);
        assert_eq!(180.0, normalise_longitude(Degrees(180.0)).0);
        assert_eq!(180.0, normalise_longitude(Degrees(-180.0)).0);
        assert_eq!(-179.0, normalise_longitude(Degrees(181.0)).0);
        assert_eq!(179.0, normalise_longitude(Degrees(-181.0)).0);
        assert_eq!(0.0, normalise_longitude(Degrees(720.0)).0);
        assert_eq!(-0.57918, normalise_longitude(Degrees(-0.57918)).0);
    }

    #[test]
    fn test_normalise_bearing() {
        assert_eq!(0.0, normalise_bearing(Degrees(0.0)).0);
        assert_eq!(359.5, normalise_bearing(Degrees(359.5)).0);
        assert_eq!(0.0, normalise_bearing(Degrees(720.0)).0);
        assert_eq!(350.0, normalise_bearing(Degrees(-10.0)).0);
        assert_eq!(0.0, normalise_bearing(Degrees(-1e-20)).0);
    }

    #[test]
    fn test_delta_bearing() {
        assert_eq!(20.0, delta_bearing(Degrees(350.0), Degrees(10.0)).0);
        assert_eq!(-20.0, delta_bearing(Degrees(10.0), Degrees(350.0)).0);
        assert_eq!(180.0, delta_bearing(Degrees(0.0), Degrees(180.0)).0);
    }

    #[test]
    fn test_lat_long() {
        let position = lat_long(Degrees(44.5), Degrees(181.0)).unwrap();
        assert_eq!(44.5, position.lat().0);
        assert_eq!(-179.0, position.lon().0);

        let error = lat_long(Degrees(90.5), Degrees(0.0)).unwrap_err();
        assert_eq!(Some("latitude"), error.field());

        let error = lat_long(Degrees(f64::NAN), Degrees(0.0)).unwrap_err();
        assert_eq!(Some("latitude"), error.field());

        let error = lat_long(Degrees(0.0), Degrees(f64::INFINITY)).unwrap_err();
        assert_eq!(Some("longitude"), error.field());

        assert!(lat_long(Degrees(-90.0), Degrees(-180.0)).is_ok());
    }

    #[test]
    fn test_inverse_identity_and_symmetry() {
        let istanbul = LatLong::new(Degrees(42.0), Degrees(29.0));
        let washington = LatLong::new(Degrees(39.0), Degrees(-77.0));

        let result = inverse(&istanbul, &istanbul);
        assert_eq!(0.0, result.distance().0);
        assert_eq!(0.0, result.bearing().0);

        let forward = inverse(&istanbul, &washington);
        let reverse = inverse(&washington, &istanbul);
        assert!(is_within_tolerance(8_339_863.136, forward.distance().0, 1e-3));
        assert!(is_within_tolerance(forward.distance().0, reverse.distance().0, 1e-6));
        assert!(is_within_tolerance(360.0 - 50.69375304113997, forward.bearing().0, 1e-6));
        assert!((0.0..360.0).contains(&reverse.bearing().0));

        // the reverse bearing is the opposite of the final forward bearing
        let opposite = Degrees(forward.final_bearing().0 + 180.0);
        let delta = delta_bearing(opposite, reverse.bearing());
        assert!(is_within_tolerance(0.0, delta.0, 1e-6));
    }

    #[test]
    fn test_direct_identity() {
        let position = LatLong::new(Degrees(-45.0), Degrees(170.0));
        assert_eq!(position, direct(&position, Degrees(123.0), Metres(0.0)));
    }

    #[test]
    fn test_project_shape() {
        let centre = LatLong::new(Degrees(44.520414), Degrees(-1.116611));
        let rectangle =
            Rectangle::new(centre, Metres(1_000.0), Metres(500.0), Degrees(90.0)).unwrap();
        let boundary = project_shape(&ShapeSpec::from(rectangle));
        assert_eq!(5, boundary.len());
        assert_eq!(boundary[0], boundary[4]);

        // heading East, the front right corner is South East of the centre
        assert!(boundary[0].lat().0 < centre.lat().0);
        assert!(centre.lon().0 < boundary[0].lon().0);
    }

    #[test]
    fn test_fit_and_apply() {
        let local = [
            LocalPoint::new(0.0, 0.0),
            LocalPoint::new(100.0, 0.0),
            LocalPoint::new(0.0, 100.0),
        ];
        let geo = [
            LatLong::new(Degrees(44.0), Degrees(-1.0)),
            LatLong::new(Degrees(44.0), Degrees(-0.99)),
            LatLong::new(Degrees(44.01), Degrees(-1.0)),
        ];

        for (point, position) in local.iter().zip(geo.iter()) {
            let result = fit_and_apply(&local, &geo, *point).unwrap();
            assert!(is_within_tolerance(position.lat().0, result.lat().0, 1e-9));
            assert!(is_within_tolerance(position.lon().0, result.lon().0, 1e-9));
        }

        let query = AxisConvention::LeftHanded.to_local(100.0, -100.0);
        let result = fit_and_apply(&local, &geo, query).unwrap();
        assert!(is_within_tolerance(44.01, result.lat().0, 1e-9));
        assert!(is_within_tolerance(-0.99, result.lon().0, 1e-9));
    }

    #[test]
    fn test_path_length() {
        let a = LatLong::new(Degrees(0.0), Degrees(0.0));
        let b = LatLong::new(Degrees(0.0), Degrees(45.0));
        let c = LatLong::new(Degrees(0.0), Degrees(90.0));

        assert_eq!(0.0, path_length(&[]).0);
        assert_eq!(0.0, path_length(&[a]).0);
        assert!(is_within_tolerance(
            inverse(&a, &c).distance().0,
            path_length(&[a, b, c]).0,
            1e-6
        ));
    }

    #[test]
    fn test_units() {
        assert!(is_within_tolerance(
            1.0,
            NauticalMiles::from(Metres(1852.0)).0,
            1e-12
        ));
    }
}
