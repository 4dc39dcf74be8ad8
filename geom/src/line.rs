use crate::math::{point, Point, Vector};

/// A line segment defined by its two endpoints.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct LineSegment {
    pub from: Point,
    pub to: Point,
}

impl LineSegment {
    /// Sample the segment at t (expecting t between 0 and 1).
    #[inline]
    pub fn sample(&self, t: f32) -> Point {
        self.from.lerp(self.to, t)
    }

    /// Returns the vector between this segment's `from` and `to` points.
    #[inline]
    pub fn to_vector(&self) -> Vector {
        self.to - self.from
    }

    /// Returns the line containing this segment.
    #[inline]
    pub fn to_line(&self) -> Line {
        Line {
            point: self.from,
            vector: self.to - self.from,
        }
    }

    /// Computes the length of this segment.
    #[inline]
    pub fn length(&self) -> f32 {
        self.to_vector().length()
    }
}

/// An infinite line defined by a point and a direction vector.
#[derive(Copy, Clone, Debug)]
pub struct Line {
    pub point: Point,
    pub vector: Vector,
}

impl Line {
    /// Computes the intersection of two lines, `None` if they are nearly
    /// parallel.
    pub fn intersection(&self, other: &Self) -> Option<Point> {
        let epsilon = 0.000001;
        let det = self.vector.cross(other.vector);
        if det.abs() <= epsilon {
            // The lines are very close to parallel
            return None;
        }
        let inv_det = 1.0 / det;
        let self_p2 = self.point + self.vector;
        let other_p2 = other.point + other.vector;
        let a = self.point.to_vector().cross(self_p2.to_vector());
        let b = other.point.to_vector().cross(other_p2.to_vector());
        Some(point(
            (b * self.vector.x - a * other.vector.x) * inv_det,
            (b * self.vector.y - a * other.vector.y) * inv_det,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vector;

    fn fuzzy_eq_point(a: Point, b: Point, epsilon: f32) -> bool {
        (a.x - b.x).abs() <= epsilon && (a.y - b.y).abs() <= epsilon
    }

    #[test]
    fn intersection_rotated() {
        use std::f32::consts::PI;
        let epsilon = 0.0001;
        let count: u32 = 50;

        for i in 0..count {
            for j in 0..count {
                if i % (count / 2) == j % (count / 2) {
                    // avoid the colinear case.
                    continue;
                }

                let angle1 = i as f32 / (count as f32) * 2.0 * PI;
                let angle2 = j as f32 / (count as f32) * 2.0 * PI;

                let l1 = LineSegment {
                    from: point(10.0 * angle1.cos(), 10.0 * angle1.sin()),
                    to: point(-10.0 * angle1.cos(), -10.0 * angle1.sin()),
                }
                .to_line();

                let l2 = LineSegment {
                    from: point(10.0 * angle2.cos(), 10.0 * angle2.sin()),
                    to: point(-10.0 * angle2.cos(), -10.0 * angle2.sin()),
                }
                .to_line();

                assert!(fuzzy_eq_point(
                    l1.intersection(&l2).unwrap(),
                    point(0.0, 0.0),
                    epsilon
                ));
            }
        }
    }

    #[test]
    fn intersection_parallel() {
        let l1 = Line {
            point: point(0.0, 0.0),
            vector: vector(1.0, 0.0),
        };
        let l2 = Line {
            point: point(0.0, 1.0),
            vector: vector(1.0, 0.0),
        };

        assert!(l1.intersection(&l2).is_none());
    }

    #[test]
    fn segment_basics() {
        let s = LineSegment {
            from: point(1.0, 1.0),
            to: point(3.0, 1.0),
        };

        assert_eq!(s.sample(0.5), point(2.0, 1.0));
        assert_eq!(s.to_vector(), vector(2.0, 0.0));
        assert_eq!(s.length(), 2.0);
    }
}
