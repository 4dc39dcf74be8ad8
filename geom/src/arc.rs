//! Circular arc maths and sampling.

use crate::math::{vector, Angle, Point, Vector};
use crate::utils::tangent;

use std::f32::consts::PI;

/// A circular arc described by its center, radius and angular range.
///
/// The sweep produced by [`Arc::from_angles`] is always positive: arcs
/// travel counter-clockwise from `start_angle`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Arc {
    pub center: Point,
    pub radius: f32,
    pub start_angle: Angle,
    pub sweep_angle: Angle,
}

impl Arc {
    /// The arc going counter-clockwise from `angle1` to `angle2`.
    ///
    /// The sweep is `angle2 - angle1` normalized into `(0, 2π]`: a
    /// difference that wraps to exactly zero denotes a full turn. Callers
    /// that want equal input angles to mean "no arc at all" must filter
    /// that case out before constructing the arc.
    pub fn from_angles(center: Point, radius: f32, angle1: Angle, angle2: Angle) -> Self {
        let mut sweep = (angle2 - angle1).radians % (2.0 * PI);
        if sweep <= 0.0 {
            sweep += 2.0 * PI;
        }

        Arc {
            center,
            radius,
            start_angle: angle1,
            sweep_angle: Angle::radians(sweep),
        }
    }

    /// Sample the arc's angle at t (expecting t between 0 and 1).
    #[inline]
    pub fn get_angle(&self, t: f32) -> Angle {
        self.start_angle + Angle::radians(self.sweep_angle.radians * t)
    }

    #[inline]
    pub fn end_angle(&self) -> Angle {
        self.start_angle + self.sweep_angle
    }

    /// Position on the circle at the given absolute angle.
    #[inline]
    pub fn point_at_angle(&self, angle: Angle) -> Point {
        self.center + self.radial_at_angle(angle) * self.radius
    }

    /// Unit vector pointing from the center towards the circle at `angle`.
    #[inline]
    pub fn radial_at_angle(&self, angle: Angle) -> Vector {
        vector(angle.radians.cos(), angle.radians.sin())
    }

    /// Unit tangent in the direction of travel (counter-clockwise).
    #[inline]
    pub fn tangent_at_angle(&self, angle: Angle) -> Vector {
        tangent(self.radial_at_angle(angle))
    }

    /// Sample the arc at t (expecting t between 0 and 1).
    #[inline]
    pub fn sample(&self, t: f32) -> Point {
        self.point_at_angle(self.get_angle(t))
    }

    #[inline]
    pub fn from(&self) -> Point {
        self.sample(0.0)
    }

    #[inline]
    pub fn to(&self) -> Point {
        self.sample(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::point;

    fn radians(a: &Arc) -> f32 {
        a.sweep_angle.radians
    }

    #[test]
    fn sweep_normalization() {
        let c = point(0.0, 0.0);
        let e = 0.0001;

        let quarter = Arc::from_angles(c, 1.0, Angle::radians(0.0), Angle::radians(0.5 * PI));
        assert!((radians(&quarter) - 0.5 * PI).abs() < e);

        // Going "backwards" wraps the long way around.
        let three_quarters =
            Arc::from_angles(c, 1.0, Angle::radians(0.5 * PI), Angle::radians(0.0));
        assert!((radians(&three_quarters) - 1.5 * PI).abs() < e);

        // A difference of exactly one turn is a full circle, not an empty arc.
        let full = Arc::from_angles(c, 1.0, Angle::radians(0.0), Angle::radians(2.0 * PI));
        assert!((radians(&full) - 2.0 * PI).abs() < e);

        let more_than_full =
            Arc::from_angles(c, 1.0, Angle::radians(0.0), Angle::radians(2.5 * PI));
        assert!((radians(&more_than_full) - 0.5 * PI).abs() < e);
    }

    #[test]
    fn sampling() {
        let arc = Arc::from_angles(
            point(1.0, 0.0),
            2.0,
            Angle::radians(0.0),
            Angle::radians(PI),
        );

        let e = 0.0001;
        assert!((arc.from() - point(3.0, 0.0)).length() < e);
        assert!((arc.to() - point(-1.0, 0.0)).length() < e);
        assert!((arc.sample(0.5) - point(1.0, 2.0)).length() < e);
        assert!((arc.tangent_at_angle(Angle::radians(0.0)) - vector(0.0, 1.0)).length() < e);
    }
}
