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

//! The shape module contains the shapes that may be projected onto the
//! ellipsoid and the functions to generate their boundaries.
//!
//! A shape is defined by its centre position and its dimensions in metres.
//! Its boundary is generated by repeatedly solving the direct geodesic
//! problem from the centre, see `vincenty::solve_direct`.
//!
//! Shapes are validated when constructed, so boundary generation cannot fail.

use crate::error::{check_finite, check_positive, Result};
use crate::vincenty::{solve_direct, Settings};
use crate::{lat_long, normalise_bearing, Ellipsoid, Error, Metres};
use angle_sc::Degrees;
use unit_sphere::LatLong;

/// The minimum number of segments of a `Circle` or `Arc`.
pub const MIN_SEGMENTS: u32 = 3;

/// The default number of segments of a `Circle`.
pub const DEFAULT_SEGMENTS: u32 = 16;

/// An ordered sequence of positions around the boundary of a shape.
pub type BoundarySequence = Vec<LatLong>;

/// Validate the centre position of a shape.
fn check_centre(centre: &LatLong) -> Result<LatLong> {
    lat_long(centre.lat(), centre.lon())
}

/// Validate the number of segments of a `Circle` or `Arc`.
const fn check_segments(segments: u32) -> Result<u32> {
    if MIN_SEGMENTS <= segments {
        Ok(segments)
    } else {
        Err(Error::invalid("segments", "must be at least 3"))
    }
}

/// A circle around a centre position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    centre: LatLong,
    radius: Metres,
    segments: u32,
}

impl Circle {
    /// Constructor.
    /// * `centre` - the centre position.
    /// * `radius` - the radius, must be greater than zero.
    /// * `segments` - the number of segments, must be at least `MIN_SEGMENTS`.
    ///
    /// # Errors
    ///
    /// `Error::InvalidParameter` if any parameter is invalid.
    pub fn new(centre: LatLong, radius: Metres, segments: u32) -> Result<Self> {
        Ok(Self {
            centre: check_centre(&centre)?,
            radius: Metres(check_positive("radius", radius.0)?),
            segments: check_segments(segments)?,
        })
    }

    /// Construct a `Circle` with `DEFAULT_SEGMENTS` segments.
    ///
    /// # Errors
    ///
    /// `Error::InvalidParameter` if any parameter is invalid.
    pub fn with_default_segments(centre: LatLong, radius: Metres) -> Result<Self> {
        Self::new(centre, radius, DEFAULT_SEGMENTS)
    }

    /// The centre position of the circle.
    #[must_use]
    pub const fn centre(&self) -> LatLong {
        self.centre
    }

    /// The radius of the circle in metres.
    #[must_use]
    pub const fn radius(&self) -> Metres {
        self.radius
    }

    /// The number of segments of the boundary.
    #[must_use]
    pub const fn segments(&self) -> u32 {
        self.segments
    }

    /// The bearings from the centre of the boundary points, from 0° clockwise.
    ///
    /// The closing bearing of 360° is not included.
    #[must_use]
    pub fn sample_bearings(&self) -> Vec<Degrees> {
        let step = 360.0 / f64::from(self.segments);
        (0..self.segments)
            .map(|i| Degrees(step * f64::from(i)))
            .collect()
    }
}

/// An arc of a circle, clockwise from a start bearing to an end bearing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arc {
    circle: Circle,
    start: Degrees,
    end: Degrees,
    closed: bool,
}

impl Arc {
    /// Constructor.
    /// * `centre` - the centre position.
    /// * `radius` - the radius, must be greater than zero.
    /// * `segments` - the minimum number of segments, must be at least `MIN_SEGMENTS`.
    /// * `start`, `end` - the start and end bearings, normalised to [0, 360).
    /// * `closed` - whether the boundary returns through the centre.
    ///
    /// # Errors
    ///
    /// `Error::InvalidParameter` if any parameter is invalid.
    pub fn new(
        centre: LatLong,
        radius: Metres,
        segments: u32,
        start: Degrees,
        end: Degrees,
        closed: bool,
    ) -> Result<Self> {
        Ok(Self {
            circle: Circle::new(centre, radius, segments)?,
            start: normalise_bearing(Degrees(check_finite("start", start.0)?)),
            end: normalise_bearing(Degrees(check_finite("end", end.0)?)),
            closed,
        })
    }

    /// The circle that the arc lies on.
    #[must_use]
    pub const fn circle(&self) -> &Circle {
        &self.circle
    }

    /// The start bearing, in the range [0, 360) degrees.
    #[must_use]
    pub const fn start(&self) -> Degrees {
        self.start
    }

    /// The end bearing, in the range [0, 360) degrees.
    #[must_use]
    pub const fn end(&self) -> Degrees {
        self.end
    }

    /// Whether the boundary returns through the centre.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// The clockwise angle from the start to the end bearing, in [0, 360).
    #[must_use]
    pub fn span(&self) -> Degrees {
        let end = if self.end.0 < self.start.0 {
            self.end.0 + 360.0
        } else {
            self.end.0
        };
        Degrees(end - self.start.0)
    }

    /// The number of segments along the arc: at least one per degree.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn samples(&self) -> u32 {
        // span is in [0, 360)
        let degrees = libm::round(libm::fabs(self.span().0)) as u32;
        self.circle.segments.max(degrees)
    }

    /// The bearings from the centre of the arc points, from `start` to `end`
    /// inclusive.
    #[must_use]
    pub fn sample_bearings(&self) -> Vec<Degrees> {
        let samples = self.samples();
        let step = self.span().0 / f64::from(samples);
        (0..=samples)
            .map(|i| {
                let bearing = step.mul_add(f64::from(i), self.start.0);
                Degrees(if 360.0 <= bearing {
                    bearing - 360.0
                } else {
                    bearing
                })
            })
            .collect()
    }
}

/// A rectangle centred on a position and aligned with a heading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rectangle {
    centre: LatLong,
    length: Metres,
    width: Metres,
    heading: Degrees,
}

impl Rectangle {
    /// Constructor.
    /// * `centre` - the centre position.
    /// * `length` - the length along `heading`, must be greater than zero.
    /// * `width` - the width across `heading`, must be greater than zero.
    /// * `heading` - the bearing of the length axis, normalised to [0, 360).
    ///
    /// # Errors
    ///
    /// `Error::InvalidParameter` if any parameter is invalid.
    pub fn new(centre: LatLong, length: Metres, width: Metres, heading: Degrees) -> Result<Self> {
        Ok(Self {
            centre: check_centre(&centre)?,
            length: Metres(check_positive("length", length.0)?),
            width: Metres(check_positive("width", width.0)?),
            heading: normalise_bearing(Degrees(check_finite("heading", heading.0)?)),
        })
    }

    /// The centre position of the rectangle.
    #[must_use]
    pub const fn centre(&self) -> LatLong {
        self.centre
    }

    /// The length along the heading in metres.
    #[must_use]
    pub const fn length(&self) -> Metres {
        self.length
    }

    /// The width across the heading in metres.
    #[must_use]
    pub const fn width(&self) -> Metres {
        self.width
    }

    /// The heading, in the range [0, 360) degrees.
    #[must_use]
    pub const fn heading(&self) -> Degrees {
        self.heading
    }

    /// The distances and bearings from the centre of the corners:
    /// front right, back right, back left and front left.
    #[must_use]
    pub fn corner_offsets(&self) -> [(Metres, Degrees); 4] {
        let half_length = 0.5 * self.length.0;
        let half_width = 0.5 * self.width.0;
        // forward along the heading, positive to the right
        [
            (half_length, half_width),
            (-half_length, half_width),
            (-half_length, -half_width),
            (half_length, -half_width),
        ]
        .map(|(forward, right)| {
            let distance = Metres(libm::hypot(forward, right));
            let angle = libm::atan2(right, forward).to_degrees();
            (distance, normalise_bearing(Degrees(self.heading.0 + angle)))
        })
    }
}

/// A shape to project onto the ellipsoid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShapeSpec {
    /// A closed ring around a centre.
    Circle(Circle),
    /// An arc, optionally closed through its centre.
    Arc(Arc),
    /// A closed rectangle aligned with a heading.
    Rectangle(Rectangle),
}

impl From<Circle> for ShapeSpec {
    fn from(circle: Circle) -> Self {
        Self::Circle(circle)
    }
}

impl From<Arc> for ShapeSpec {
    fn from(arc: Arc) -> Self {
        Self::Arc(arc)
    }
}

impl From<Rectangle> for ShapeSpec {
    fn from(rectangle: Rectangle) -> Self {
        Self::Rectangle(rectangle)
    }
}

/// Calculate the positions at `bearings` and `radius` from `centre`.
fn radial_points(
    centre: &LatLong,
    bearings: &[Degrees],
    radius: Metres,
    settings: &Settings,
    ellipsoid: &Ellipsoid,
) -> BoundarySequence {
    bearings
        .iter()
        .map(|bearing| solve_direct(centre, *bearing, radius, settings, ellipsoid).0)
        .collect()
}

/// Generate the closed boundary of a `Circle`, clockwise from due North.
///
/// returns `segments + 1` positions, the last a copy of the first.
#[must_use]
pub fn circle_boundary(
    circle: &Circle,
    settings: &Settings,
    ellipsoid: &Ellipsoid,
) -> BoundarySequence {
    let mut points = radial_points(
        &circle.centre,
        &circle.sample_bearings(),
        circle.radius,
        settings,
        ellipsoid,
    );
    if let Some(first) = points.first().copied() {
        points.push(first);
    }
    points
}

/// Generate the boundary of an `Arc`, clockwise from `start` to `end`.
///
/// returns the arc positions, preceded and followed by the centre if the arc
/// is closed.
#[must_use]
pub fn arc_boundary(arc: &Arc, settings: &Settings, ellipsoid: &Ellipsoid) -> BoundarySequence {
    let centre = arc.circle.centre;
    let arc_points = radial_points(
        &centre,
        &arc.sample_bearings(),
        arc.circle.radius,
        settings,
        ellipsoid,
    );
    if arc.closed {
        let mut points = BoundarySequence::with_capacity(arc_points.len() + 2);
        points.push(centre);
        points.extend(arc_points);
        points.push(centre);
        points
    } else {
        arc_points
    }
}

/// Generate the closed boundary of a `Rectangle`.
///
/// returns the front right, back right, back left and front left corners
/// followed by a copy of the front right corner.
#[must_use]
pub fn rectangle_boundary(
    rectangle: &Rectangle,
    settings: &Settings,
    ellipsoid: &Ellipsoid,
) -> BoundarySequence {
    let mut points: BoundarySequence = rectangle
        .corner_offsets()
        .iter()
        .map(|(distance, bearing)| {
            solve_direct(&rectangle.centre, *bearing, *distance, settings, ellipsoid).0
        })
        .collect();
    points.push(points[0]);
    points
}

/// Generate the boundary of a `ShapeSpec`.
/// * `shape` - the shape.
/// * `settings` - the threshold and iteration cap for `solve_direct`.
/// * `ellipsoid` - the `Ellipsoid`.
#[must_use]
pub fn project(shape: &ShapeSpec, settings: &Settings, ellipsoid: &Ellipsoid) -> BoundarySequence {
    match shape {
        ShapeSpec::Circle(circle) => circle_boundary(circle, settings, ellipsoid),
        ShapeSpec::Arc(arc) => arc_boundary(arc, settings, ellipsoid),
        ShapeSpec::Rectangle(rectangle) => rectangle_boundary(rectangle, settings, ellipsoid),
    }
}
