//! Stroke tessellation of flattened curves.
//!
//! ## Overview
//!
//! The generic pipeline works on a polyline approximating the curve:
//!
//! 1. [`build_offset_rails`] extrudes a left and a right rail at half the
//!    pen width, using the averaged local tangent at every vertex so the
//!    rails stay roughly parallel through gentle curvature.
//! 2. [`resolve_miter_joins`] replaces the interior rail vertices with the
//!    intersection of the two adjacent offset edges, when that
//!    intersection exists and stays within the miter limit. Sharper bends
//!    keep the plain averaged-normal offset, which avoids the long spike
//!    artifacts a naive miter produces without needing a bevel special
//!    case.
//! 3. The cap pass either extends both ends by half the pen width
//!    ([`extend_square_caps`]) or closes them with a half-disc fan
//!    ([`tessellate_round_cap`]).
//! 4. [`tessellate_strip`] walks the rails and emits two triangles per
//!    quad.
//!
//! Every stage builds fresh data from its inputs; nothing is cached across
//! calls. Degenerate inputs (zero-length segments, collapsed tangents,
//! parallel miter rays) fall back to safe values locally and never produce
//! non-finite coordinates.

use crate::geom::math::{vector, Angle, Point, Vector};
use crate::geom::utils::{directed_angle, tangent};
use crate::geom::LineSegment;
use crate::geometry_builder::{Count, TriangleBatch};
use crate::pen::arc_segment_count;
use crate::{Color, PenCap, PenOptions};

use std::f32::consts::PI;

/// Segments shorter than this have no usable direction of their own.
pub(crate) const EPSILON: f32 = 1e-4;

/// The left/right vertex rails bounding a stroke around a polyline.
///
/// Both rails are index-aligned with the polyline they were built from.
#[derive(Clone, Debug, PartialEq)]
pub struct OffsetRails {
    pub left: Vec<Point>,
    pub right: Vec<Point>,
}

/// Unit direction from `from` to `to`, falling back to the x axis when the
/// segment is too short to have a direction.
fn direction_or_x_axis(from: Point, to: Point) -> Vector {
    let v = to - from;
    let len = v.length();
    if len < EPSILON {
        vector(1.0, 0.0)
    } else {
        v / len
    }
}

#[inline]
fn debug_assert_finite(p: Point) {
    debug_assert!(p.x.is_finite() && p.y.is_finite());
}

/// Extrude the offset rails of a stroke of width `2 * half_width`.
///
/// The normal at each vertex comes from the direction between its two
/// neighbours (the vertex itself for the first and last index), which is
/// stable across corners.
pub fn build_offset_rails(polyline: &[Point], half_width: f32) -> OffsetRails {
    let n = polyline.len();
    let mut left = Vec::with_capacity(n);
    let mut right = Vec::with_capacity(n);

    for i in 0..n {
        let prev = polyline[if i == 0 { 0 } else { i - 1 }];
        let next = polyline[(i + 1).min(n - 1)];
        let normal = tangent(direction_or_x_axis(prev, next));

        left.push(polyline[i] + normal * half_width);
        right.push(polyline[i] - normal * half_width);
    }

    OffsetRails { left, right }
}

// Intersection of the two offset edges meeting at `joint`, accepted only
// within `miter_limit * half_width` of the joint.
fn miter_offset(
    joint: Point,
    edge_in: LineSegment,
    edge_out: LineSegment,
    half_width: f32,
    miter_limit: f32,
) -> Option<Point> {
    let intersection = edge_in.to_line().intersection(&edge_out.to_line())?;
    if (intersection - joint).length() <= miter_limit * half_width {
        Some(intersection)
    } else {
        None
    }
}

/// Correct the interior rail vertices with miter joins.
///
/// For each interior polyline vertex, each side's rail vertex moves to the
/// intersection of the two adjacent offset edges. A joint keeps its
/// averaged-normal offset when the edges are near parallel (no usable
/// intersection) or when the intersection sits further than
/// `miter_limit * half_width` away.
pub fn resolve_miter_joins(
    polyline: &[Point],
    rails: &mut OffsetRails,
    half_width: f32,
    miter_limit: f32,
) {
    debug_assert_eq!(rails.left.len(), polyline.len());
    debug_assert_eq!(rails.right.len(), polyline.len());

    if polyline.len() < 3 {
        return;
    }

    for i in 1..polyline.len() - 1 {
        let joint = polyline[i];
        let dir_in = direction_or_x_axis(polyline[i - 1], joint);
        let dir_out = direction_or_x_axis(joint, polyline[i + 1]);
        let normal_in = tangent(dir_in);
        let normal_out = tangent(dir_out);

        for side in 0..2 {
            let sign = if side == 0 { 1.0 } else { -1.0 };
            let edge_in = LineSegment {
                from: polyline[i - 1] + normal_in * half_width * sign,
                to: joint + normal_in * half_width * sign,
            };
            let edge_out = LineSegment {
                from: joint + normal_out * half_width * sign,
                to: polyline[i + 1] + normal_out * half_width * sign,
            };

            if let Some(p) = miter_offset(joint, edge_in, edge_out, half_width, miter_limit) {
                if side == 0 {
                    rails.left[i] = p;
                } else {
                    rails.right[i] = p;
                }
            }
        }
    }
}

/// Extend both stroke ends by `half_width` along the curve direction.
///
/// The endpoint sample and the matching rail vertices all shift by the
/// same vector, so the end quads themselves cover the cap region and the
/// stroke ends on a flush edge with no seam.
///
/// An end whose closing segment is too short to have a direction is left
/// in place.
pub fn extend_square_caps(polyline: &mut [Point], rails: &mut OffsetRails, half_width: f32) {
    let n = polyline.len();
    if n < 2 {
        return;
    }

    let d = polyline[0] - polyline[1];
    if d.length() >= EPSILON {
        let extension = d / d.length() * half_width;
        polyline[0] += extension;
        rails.left[0] += extension;
        rails.right[0] += extension;
    }

    let d = polyline[n - 1] - polyline[n - 2];
    if d.length() >= EPSILON {
        let extension = d / d.length() * half_width;
        polyline[n - 1] += extension;
        rails.left[n - 1] += extension;
        rails.right[n - 1] += extension;
    }
}

/// Tessellate a half-disc closing off a round stroke end.
///
/// The flat edge of the disc is perpendicular to `dir`, the local direction
/// of travel of the curve; `is_end` picks which of the two half-planes the
/// curved side faces. Returns nothing for a collapsed radius or direction.
pub fn tessellate_round_cap(
    center: Point,
    radius: f32,
    dir: Vector,
    is_end: bool,
    color: Color,
    output: &mut dyn TriangleBatch,
) -> Count {
    let mut count = Count::default();
    if radius < EPSILON || dir.length() < EPSILON {
        return count;
    }

    let outward = if is_end { dir } else { -dir };
    let outward = outward / outward.length();

    let mid_angle = directed_angle(vector(1.0, 0.0), outward);
    let num_segments = arc_segment_count(Angle::radians(PI), radius);
    let start_angle = mid_angle - 0.5 * PI;
    let step = PI / num_segments as f32;

    output.prepare(num_segments as usize * 3);

    let mut prev = center + vector(start_angle.cos(), start_angle.sin()) * radius;
    for i in 1..=num_segments {
        let a = start_angle + step * i as f32;
        let p = center + vector(a.cos(), a.sin()) * radius;
        debug_assert_finite(p);
        output.add_triangle(center, prev, p, color);
        count.vertices += 3;
        count.triangles += 1;
        prev = p;
    }

    count
}

/// Emit the quad strip between the two rails, two triangles per polyline
/// segment. Segments shorter than the degeneracy threshold are skipped.
pub fn tessellate_strip(
    polyline: &[Point],
    rails: &OffsetRails,
    color: Color,
    output: &mut dyn TriangleBatch,
) -> Count {
    debug_assert_eq!(rails.left.len(), polyline.len());
    debug_assert_eq!(rails.right.len(), polyline.len());

    let mut count = Count::default();
    if polyline.len() < 2 {
        return count;
    }

    output.prepare((polyline.len() - 1) * 6);

    for i in 0..polyline.len() - 1 {
        if (polyline[i + 1] - polyline[i]).length() < EPSILON {
            continue;
        }

        let l0 = rails.left[i];
        let r0 = rails.right[i];
        let l1 = rails.left[i + 1];
        let r1 = rails.right[i + 1];
        debug_assert_finite(l0);
        debug_assert_finite(r0);
        debug_assert_finite(l1);
        debug_assert_finite(r1);

        output.add_triangle(l0, r0, r1, color);
        output.add_triangle(l0, r1, l1, color);
        count.vertices += 6;
        count.triangles += 2;
    }

    count
}

/// Tessellate the stroke of an open polyline: rails, joins, caps, strip.
///
/// The polyline is consumed; it was built for this call and the square cap
/// pass shifts its end points in place. Fewer than two points produce no
/// geometry.
pub fn tessellate_polyline(
    mut polyline: Vec<Point>,
    options: &PenOptions,
    color: Color,
    output: &mut dyn TriangleBatch,
) -> Count {
    if polyline.len() < 2 {
        return Count::default();
    }

    let half_width = options.line_width * 0.5;

    let mut rails = build_offset_rails(&polyline, half_width);
    resolve_miter_joins(&polyline, &mut rails, half_width, options.miter_limit);

    let mut count = Count::default();
    match options.cap {
        PenCap::Square => {
            extend_square_caps(&mut polyline, &mut rails, half_width);
        }
        PenCap::Round => {
            // The cap radius is rounded to whole units and can sit slightly
            // off the body rails.
            let cap_radius = (options.line_width * 0.5).round();
            let n = polyline.len();
            let start_dir = direction_or_x_axis(polyline[0], polyline[1]);
            let end_dir = direction_or_x_axis(polyline[n - 2], polyline[n - 1]);

            count += tessellate_round_cap(polyline[0], cap_radius, start_dir, false, color, output);
            count += tessellate_round_cap(polyline[n - 1], cap_radius, end_dir, true, color, output);
        }
    }

    count + tessellate_strip(&polyline, &rails, color, output)
}
