//! 2D points, affine transforms and the paintable shapes of the widget.
//!
//! Coordinates follow the SVG convention: x grows to the right, y grows downwards.
//! Angles of [`Shape::Sector`] are measured counterclockwise *as seen on screen*, i.e. with the y axis flipped.

use std::f64::consts::TAU;
use std::ops::Mul;

use glam::{DAffine2, DMat2, DVec2};
use serde::{Deserialize, Serialize};

/// Tolerance used by hit-testing so that points on a shared border are never lost between two shapes.
const HIT_TOLERANCE: f64 = 1e-9;

/// Half of the stroke width used when hit-testing lines.
const LINE_HIT_RADIUS: f64 = 0.5;

pub type Point = DVec2;

/// Polar helpers for points in screen space.
pub trait ScreenPoint {
    /// The point on the circle around `self` with the given `radius` at `angle` radians, counterclockwise on screen.
    fn polar_offset(self, radius: f64, angle: f64) -> Point;

    /// Direction of `other` as seen from `self` in screen space, i.e. `atan2(dy, dx)` with y pointing downwards.
    ///
    /// A growing value means clockwise motion on screen.
    fn screen_angle_to(self, other: Point) -> f64;
}

impl ScreenPoint for Point {
    fn polar_offset(self, radius: f64, angle: f64) -> Point {
        let (sin, cos) = angle.sin_cos();
        self + radius * DVec2::new(cos, -sin)
    }

    fn screen_angle_to(self, other: Point) -> f64 {
        let delta = other - self;
        delta.y.atan2(delta.x)
    }
}

/// An affine transform laid out like an SVG `matrix(a b c d e f)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Transform(DAffine2);

impl Transform {
    pub const fn identity() -> Self {
        Self(DAffine2::IDENTITY)
    }

    pub fn translation(dx: f64, dy: f64) -> Self {
        Self(DAffine2::from_translation(DVec2::new(dx, dy)))
    }

    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self(DAffine2::from_scale(DVec2::new(sx, sy)))
    }

    /// Equivalent to the SVG `rotate(degrees cx cy)` instruction. Positive angles turn clockwise on screen.
    ///
    /// ```
    /// # use assert_approx_eq::assert_approx_eq;
    /// # use scale_wheel::geometry::{Point, Transform};
    /// let rotation = Transform::rotation_about(90.0, Point::new(10.0, 10.0));
    /// let rotated = rotation.transform_point(Point::new(20.0, 10.0));
    /// assert_approx_eq!(rotated.x, 10.0);
    /// assert_approx_eq!(rotated.y, 20.0);
    /// ```
    pub fn rotation_about(degrees: f64, center: Point) -> Self {
        Self(
            DAffine2::from_translation(center)
                * DAffine2::from_angle(degrees.to_radians())
                * DAffine2::from_translation(-center),
        )
    }

    pub fn transform_point(&self, point: Point) -> Point {
        self.0.transform_point2(point)
    }

    /// Returns [`None`] if the transform collapses the plane, e.g. a zero scaling.
    pub fn inverse(&self) -> Option<Transform> {
        if self.0.matrix2.determinant().abs() < f64::EPSILON {
            return None;
        }
        Some(Self(self.0.inverse()))
    }

    pub fn is_identity(&self) -> bool {
        self.0 == DAffine2::IDENTITY
    }

    /// The coefficients `[a, b, c, d, e, f]` of the SVG matrix.
    pub fn to_svg_matrix(&self) -> [f64; 6] {
        self.0.to_cols_array()
    }
}

/// `outer * inner` applies `inner` first.
impl Mul for Transform {
    type Output = Transform;

    fn mul(self, inner: Transform) -> Transform {
        Self(self.0 * inner.0)
    }
}

/// An SVG-like paintable primitive in local coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// A pie slice from `start_angle` to `start_angle + sweep` radians.
    Sector {
        center: Point,
        radius: f64,
        start_angle: f64,
        sweep: f64,
    },
    Polygon(Vec<Point>),
    Polyline(Vec<Point>),
    Line(Point, Point),
    Rect {
        origin: Point,
        width: f64,
        height: f64,
        corner_radius: f64,
    },
    /// An ellipse rotated by `rotation` degrees around its center.
    Ellipse {
        center: Point,
        rx: f64,
        ry: f64,
        rotation: f64,
    },
    /// An elliptical arc from `from` to `to`, drawn like an SVG `A` path command with the sweep flag set.
    Arc {
        from: Point,
        to: Point,
        rx: f64,
        ry: f64,
        rotation: f64,
    },
    /// A text run starting at `anchor` and vertically centered on it.
    Text {
        anchor: Point,
        content: String,
        size: f64,
    },
    Image {
        href: String,
        origin: Point,
        width: f64,
        height: f64,
    },
}

impl Shape {
    /// The two rim points of a sector, counterclockwise end first, like they are drawn.
    pub fn sector_corners(center: Point, radius: f64, start_angle: f64, sweep: f64) -> (Point, Point) {
        (
            center.polar_offset(radius, start_angle + sweep),
            center.polar_offset(radius, start_angle),
        )
    }

    /// Tests whether `point`, given in the shape's own coordinates, lies on the painted area.
    ///
    /// Borders are included, so a point on the border of two adjacent shapes hits both of them.
    pub fn contains(&self, point: Point) -> bool {
        match self {
            Shape::Sector {
                center,
                radius,
                start_angle,
                sweep,
            } => {
                let offset = point - *center;
                if offset.length() > radius + HIT_TOLERANCE {
                    return false;
                }
                if offset.length() <= HIT_TOLERANCE {
                    return true;
                }
                let angle = (-offset.y).atan2(offset.x);
                let relative = (angle - start_angle).rem_euclid(TAU);
                relative <= sweep + HIT_TOLERANCE || relative >= TAU - HIT_TOLERANCE
            }
            Shape::Polygon(corners) => polygon_contains(corners, point),
            Shape::Polyline(points) => points
                .windows(2)
                .any(|segment| segment_distance(segment[0], segment[1], point) <= LINE_HIT_RADIUS),
            Shape::Line(from, to) => segment_distance(*from, *to, point) <= LINE_HIT_RADIUS,
            Shape::Rect {
                origin,
                width,
                height,
                ..
            } => {
                point.x >= origin.x
                    && point.x <= origin.x + width
                    && point.y >= origin.y
                    && point.y <= origin.y + height
            }
            Shape::Ellipse {
                center,
                rx,
                ry,
                rotation,
            } => {
                let local = DMat2::from_angle(-rotation.to_radians()) * (point - *center);
                (local.x / rx).powi(2) + (local.y / ry).powi(2) <= 1.0 + HIT_TOLERANCE
            }
            Shape::Arc { from, to, .. } => segment_distance(*from, *to, point) <= LINE_HIT_RADIUS,
            Shape::Text {
                anchor,
                content,
                size,
            } => {
                let width = content.chars().count() as f64 * size * 0.6;
                point.x >= anchor.x
                    && point.x <= anchor.x + width
                    && (point.y - anchor.y).abs() <= size / 2.0
            }
            Shape::Image { .. } => false,
        }
    }
}

fn polygon_contains(corners: &[Point], point: Point) -> bool {
    if corners.len() < 3 {
        return false;
    }

    if corners
        .iter()
        .zip(corners.iter().cycle().skip(1))
        .any(|(&from, &to)| segment_distance(from, to, point) <= HIT_TOLERANCE)
    {
        return true;
    }

    let mut inside = false;
    for (current, previous) in corners.iter().zip(corners.iter().cycle().skip(corners.len() - 1)) {
        if (current.y > point.y) != (previous.y > point.y) {
            let crossing_x = previous.x
                + (point.y - previous.y) / (current.y - previous.y) * (current.x - previous.x);
            if point.x < crossing_x {
                inside = !inside;
            }
        }
    }
    inside
}

fn segment_distance(from: Point, to: Point, point: Point) -> f64 {
    let direction = to - from;
    let length_squared = direction.length_squared();
    if length_squared == 0.0 {
        return point.distance(from);
    }
    let t = ((point - from).dot(direction) / length_squared).clamp(0.0, 1.0);
    point.distance(from + direction * t)
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn inverse_undoes_transform() {
        let transform = Transform::translation(12.0, -3.0)
            * Transform::scaling(2.5, 2.5)
            * Transform::rotation_about(33.0, Point::new(50.0, 39.0));
        let inverse = transform.inverse().unwrap();

        let point = Point::new(7.0, 91.0);
        let round_trip = inverse.transform_point(transform.transform_point(point));
        assert_approx_eq!(round_trip.x, point.x);
        assert_approx_eq!(round_trip.y, point.y);

        assert!(Transform::scaling(0.0, 1.0).inverse().is_none());
    }

    #[test]
    fn svg_matrix_of_composed_transforms() {
        let transform = Transform::translation(300.0, 120.0) * Transform::scaling(4.0, 4.0);
        assert_eq!(transform.to_svg_matrix(), [4.0, 0.0, 0.0, 4.0, 300.0, 120.0]);

        let [a, b, c, d, e, f] = Transform::rotation_about(90.0, Point::new(10.0, 10.0)).to_svg_matrix();
        assert_approx_eq!(a, 0.0);
        assert_approx_eq!(b, 1.0);
        assert_approx_eq!(c, -1.0);
        assert_approx_eq!(d, 0.0);
        assert_approx_eq!(e, 20.0);
        assert_approx_eq!(f, 0.0);

        assert!(Transform::identity().is_identity());
        assert!(Transform::default().is_identity());
    }

    #[test]
    fn screen_angles_grow_clockwise() {
        let center = Point::new(0.0, 0.0);
        assert_approx_eq!(center.screen_angle_to(Point::new(1.0, 0.0)), 0.0);
        assert_approx_eq!(
            center.screen_angle_to(Point::new(0.0, 1.0)),
            std::f64::consts::FRAC_PI_2
        );
    }

    #[test]
    fn sector_hit_test() {
        let sector = Shape::Sector {
            center: Point::new(50.0, 39.0),
            radius: 25.0,
            start_angle: 60f64.to_radians(),
            sweep: 60f64.to_radians(),
        };

        assert!(sector.contains(Point::new(50.0, 18.0)));
        assert!(!sector.contains(Point::new(50.0, 60.0)));
        assert!(!sector.contains(Point::new(50.0, 10.0)));
        assert!(!sector.contains(Point::new(75.0, 39.0)));
    }

    #[test]
    fn adjacent_sectors_share_their_border() {
        let center = Point::new(0.0, 0.0);
        let sweep = TAU / 7.0;
        let sectors: Vec<_> = (0..7)
            .map(|index| Shape::Sector {
                center,
                radius: 10.0,
                start_angle: 0.2 + index as f64 * sweep,
                sweep,
            })
            .collect();

        for index in 0..7 {
            let border = center.polar_offset(5.0, 0.2 + index as f64 * sweep);
            let hits = sectors.iter().filter(|sector| sector.contains(border)).count();
            assert!(hits >= 1);
        }
    }

    #[test]
    fn polygon_and_ellipse_hit_test() {
        let triangle = Shape::Polygon(vec![
            Point::new(50.0, 18.0),
            Point::new(47.0, 11.0),
            Point::new(53.0, 11.0),
        ]);
        assert!(triangle.contains(Point::new(50.0, 13.0)));
        assert!(triangle.contains(Point::new(50.0, 18.0)));
        assert!(!triangle.contains(Point::new(50.0, 19.0)));

        let ellipse = Shape::Ellipse {
            center: Point::new(18.0, 86.0),
            rx: 2.0,
            ry: 1.2,
            rotation: -18.0,
        };
        assert!(ellipse.contains(Point::new(19.5, 86.0)));
        assert!(!ellipse.contains(Point::new(18.0, 88.0)));
    }
}
