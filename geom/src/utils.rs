use crate::math::{vector, Vector};

use std::f32::consts::PI;

/// Rotate the vector 90° counter-clockwise.
#[inline]
pub fn tangent(v: Vector) -> Vector {
    vector(-v.y, v.x)
}

/// Angle between vectors `a` and `b`, in the range `[0, 2π)`.
///
/// ex: `directed_angle([0,-1], [1,0]) = 1/2 Pi rad` (y pointing upwards).
#[inline]
pub fn directed_angle(a: Vector, b: Vector) -> f32 {
    let angle = b.y.atan2(b.x) - a.y.atan2(a.x);
    if angle < 0.0 {
        angle + 2.0 * PI
    } else {
        angle
    }
}
