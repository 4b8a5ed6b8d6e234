//! Fundamental planar geometry for truss diagrams.

use nalgebra::Vector2;

/// Position in the drawing plane measured in metres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    /// Distance along the global X axis.
    pub x: f64,
    /// Distance along the global Y axis.
    pub y: f64,
}

impl Point {
    /// Create a [`Point`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert the point into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// Point halfway between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Point) -> Point {
        Point::from((self.to_vector() + other.to_vector()) * 0.5)
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (other.to_vector() - self.to_vector()).norm()
    }

    /// Move `distance` along `direction`, which is expected to be a unit vector.
    #[must_use]
    pub fn offset(self, direction: Vector2<f64>, distance: f64) -> Point {
        Point::from(self.to_vector() + direction * distance)
    }
}

impl From<Vector2<f64>> for Point {
    fn from(value: Vector2<f64>) -> Self {
        Self::new(value.x, value.y)
    }
}

impl From<Point> for Vector2<f64> {
    fn from(value: Point) -> Self {
        value.to_vector()
    }
}

/// Cartesian force vector in newtons.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Force {
    /// Force component acting along the global X axis.
    pub x: f64,
    /// Force component acting along the global Y axis.
    pub y: f64,
}

impl Force {
    /// Create a [`Force`] with explicit components.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert the force into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// Magnitude in kilonewtons.
    #[must_use]
    pub fn kilonewtons(self) -> f64 {
        self.to_vector().norm() / 1000.0
    }
}

impl Default for Force {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Axis-aligned rectangle enclosing a set of points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Lower-left corner.
    pub min: Point,
    /// Upper-right corner.
    pub max: Point,
}

impl Bounds {
    /// Smallest rectangle containing every point, or `None` for an empty iterator.
    pub fn enclosing<I: IntoIterator<Item = Point>>(points: I) -> Option<Bounds> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bounds = Bounds {
            min: first,
            max: first,
        };
        for p in points {
            bounds.min.x = bounds.min.x.min(p.x);
            bounds.min.y = bounds.min.y.min(p.y);
            bounds.max.x = bounds.max.x.max(p.x);
            bounds.max.y = bounds.max.y.max(p.y);
        }
        Some(bounds)
    }

    /// Horizontal extent.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Vertical extent.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Grow the rectangle by `margin` on every side.
    #[must_use]
    pub fn inflate(&self, margin: f64) -> Bounds {
        Bounds {
            min: Point::new(self.min.x - margin, self.min.y - margin),
            max: Point::new(self.max.x + margin, self.max.y + margin),
        }
    }
}

/// Unit vector pointing from `from` towards `to`, or `None` when the points coincide.
#[must_use]
pub fn unit_direction(from: Point, to: Point) -> Option<Vector2<f64>> {
    let delta = to.to_vector() - from.to_vector();
    let length = delta.norm();
    if length > 0.0 {
        Some(delta / length)
    } else {
        None
    }
}

/// Convenience helper for creating [`Point`] instances.
///
/// # Examples
/// ```
/// use trussviz::point;
///
/// let origin = point(0.0, 0.0);
/// assert_eq!(origin.x, 0.0);
/// ```
#[must_use]
pub const fn point(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn point_to_vector_roundtrip() {
        let origin = Point::new(1.0, 2.0);
        let vector: Vector2<f64> = origin.into();
        assert_eq!(vector, Vector2::new(1.0, 2.0));
        assert_eq!(Point::from(vector), origin);
    }

    #[test]
    fn force_defaults_to_zero() {
        assert_eq!(Force::default(), Force::new(0.0, 0.0));
        assert_relative_eq!(Force::new(30_000.0, -40_000.0).kilonewtons(), 50.0);
    }

    #[test]
    fn midpoint_and_distance() {
        let a = point(0.0, 0.0);
        let b = point(3.0, 4.0);
        assert_eq!(a.midpoint(b), point(1.5, 2.0));
        assert_relative_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn unit_direction_of_coincident_points_is_none() {
        assert!(unit_direction(point(1.0, 1.0), point(1.0, 1.0)).is_none());
        let dir = unit_direction(point(0.0, 0.0), point(0.0, -2.0)).expect("distinct points");
        assert_relative_eq!(dir.y, -1.0);
    }

    #[test]
    fn bounds_enclose_all_points() {
        let bounds = Bounds::enclosing([point(1.0, -2.0), point(-3.0, 4.0), point(0.0, 0.0)])
            .expect("non-empty");
        assert_eq!(bounds.min, point(-3.0, -2.0));
        assert_eq!(bounds.max, point(1.0, 4.0));
        assert_relative_eq!(bounds.inflate(1.0).width(), 6.0);
        assert!(Bounds::enclosing(std::iter::empty()).is_none());
    }
}
