//! The pen drawing entry points.
//!
//! Each entry point tessellates one curve, a circular arc or a cubic
//! bézier, into a [`TriangleBatch`](../geometry_builder/trait.TriangleBatch.html)
//! and returns the [`Count`](../geometry_builder/struct.Count.html) of the
//! geometry it appended. The cap style is selected once at the top of each
//! function; everything downstream works on explicit data built for that
//! call.
//!
//! Arc bodies bypass the generic offset pipeline: a circular arc's exact
//! offset direction is the radial from the center, so each angular segment
//! emits its quad directly. Bézier curves always go through the flattening
//! + offset rails + miter pipeline of the [`stroke`](../stroke/index.html)
//! module because their curvature has no closed form.

use crate::geom::math::{Angle, Point, Vector};
use crate::geom::{Arc, CubicBezierSegment};
use crate::geometry_builder::{Count, TriangleBatch};
use crate::stroke::{tessellate_polyline, tessellate_round_cap, EPSILON};
use crate::{Color, PenCap, PenKind, PenOptions};

use std::f32::consts::PI;

/// Hard cap on the segment count of a full circle.
const MAX_CIRCLE_SEGMENTS: f32 = 360.0;

/// Number of segments used to approximate a full circle of the given
/// radius. Detail grows with physical size and is capped at
/// `MAX_CIRCLE_SEGMENTS`.
pub fn segments_per_circle(radius: f32) -> u32 {
    (radius * 5.0).round().min(MAX_CIRCLE_SEGMENTS) as u32
}

/// Number of angular segments for an arc spanning `sweep`, at least 2 so
/// even tiny arcs produce visible quads.
pub fn arc_segment_count(sweep: Angle, radius: f32) -> u32 {
    let per_circle = segments_per_circle(radius) as f32;
    ((sweep.radians / (2.0 * PI) * per_circle).ceil() as u32).max(2)
}

/// Stroke a circular arc with square caps.
///
/// Angles are radians; the arc travels counter-clockwise from `angle1` to
/// `angle2` with the sweep normalized into `(0, 2π]`, except that equal
/// angles draw nothing at all. `pen_kind` is accepted for the callers'
/// sake and currently ignored.
pub fn draw_arc_square(
    output: &mut dyn TriangleBatch,
    center: Point,
    radius: f32,
    angle1: Angle,
    angle2: Angle,
    color: Color,
    pen_width: f32,
    _pen_kind: PenKind,
) -> Count {
    let options = PenOptions::cap(PenCap::Square).with_line_width(pen_width);
    tessellate_arc(output, center, radius, angle1, angle2, color, &options)
}

/// Stroke a circular arc with round caps. See [`draw_arc_square`].
pub fn draw_arc_round(
    output: &mut dyn TriangleBatch,
    center: Point,
    radius: f32,
    angle1: Angle,
    angle2: Angle,
    color: Color,
    pen_width: f32,
    _pen_kind: PenKind,
) -> Count {
    let options = PenOptions::cap(PenCap::Round).with_line_width(pen_width);
    tessellate_arc(output, center, radius, angle1, angle2, color, &options)
}

/// Stroke a cubic bézier curve with square caps.
///
/// The curve is flattened at the default tolerance and fed through the
/// offset-rail pipeline. `pen_kind` is accepted for the callers' sake and
/// currently ignored.
pub fn draw_bezier_square(
    output: &mut dyn TriangleBatch,
    curve: &CubicBezierSegment,
    color: Color,
    pen_width: f32,
    _pen_kind: PenKind,
) -> Count {
    let options = PenOptions::cap(PenCap::Square).with_line_width(pen_width);
    tessellate_bezier(output, curve, color, &options)
}

/// Stroke a cubic bézier curve with round caps. See [`draw_bezier_square`].
pub fn draw_bezier_round(
    output: &mut dyn TriangleBatch,
    curve: &CubicBezierSegment,
    color: Color,
    pen_width: f32,
) -> Count {
    let options = PenOptions::cap(PenCap::Round).with_line_width(pen_width);
    tessellate_bezier(output, curve, color, &options)
}

fn tessellate_arc(
    output: &mut dyn TriangleBatch,
    center: Point,
    radius: f32,
    angle1: Angle,
    angle2: Angle,
    color: Color,
    options: &PenOptions,
) -> Count {
    // Equal angles are an empty arc. A sweep that only *normalizes* to
    // zero, from distinct angles one turn apart, is a full circle instead
    // (see Arc::from_angles).
    if angle1 == angle2 {
        return Count::default();
    }

    let mut arc = Arc::from_angles(center, radius, angle1, angle2);
    let half_width = options.line_width * 0.5;

    if options.cap == PenCap::Square && radius > 0.0 {
        // Widen the sweep so the end quads themselves cover the cap region,
        // with no seam against the body.
        let pad = half_width / radius;
        arc.start_angle = arc.start_angle - Angle::radians(pad);
        arc.sweep_angle = arc.sweep_angle + Angle::radians(2.0 * pad);
    }

    let num_segments = arc_segment_count(arc.sweep_angle, radius);
    output.prepare(num_segments as usize * 6);

    let mut count = Count::default();
    for i in 0..num_segments {
        let a1 = arc.get_angle(i as f32 / num_segments as f32);
        let a2 = arc.get_angle((i + 1) as f32 / num_segments as f32);
        let p1 = arc.point_at_angle(a1);
        let p2 = arc.point_at_angle(a2);

        if (p2 - p1).length() < EPSILON {
            continue;
        }

        let n1 = radial_normal(&arc, a1);
        let n2 = radial_normal(&arc, a2);

        output.add_triangle(
            p1 + n1 * half_width,
            p1 - n1 * half_width,
            p2 - n2 * half_width,
            color,
        );
        output.add_triangle(
            p1 + n1 * half_width,
            p2 - n2 * half_width,
            p2 + n2 * half_width,
            color,
        );
        count.vertices += 6;
        count.triangles += 2;
    }

    if options.cap == PenCap::Round {
        // The cap radius is rounded to whole units and can sit slightly
        // off the arc body.
        let cap_radius = (options.line_width * 0.5).round();
        let start_tangent = arc.tangent_at_angle(arc.start_angle);
        let end_tangent = arc.tangent_at_angle(arc.end_angle());

        count += tessellate_round_cap(arc.from(), cap_radius, start_tangent, false, color, output);
        count += tessellate_round_cap(arc.to(), cap_radius, end_tangent, true, color, output);
    }

    count
}

// The offset normal of an arc vertex is the exact radial direction, except
// when the radius collapses to the center; the angular normal
// (perpendicular to the travel tangent) takes over there.
fn radial_normal(arc: &Arc, angle: Angle) -> Vector {
    let r = arc.point_at_angle(angle) - arc.center;
    let len = r.length();
    if len > EPSILON {
        r / len
    } else {
        arc.radial_at_angle(angle)
    }
}

fn tessellate_bezier(
    output: &mut dyn TriangleBatch,
    curve: &CubicBezierSegment,
    color: Color,
    options: &PenOptions,
) -> Count {
    let mut polyline = vec![curve.from];
    curve.for_each_flattened(options.tolerance, &mut |p| {
        // Flattening a degenerate curve can repeat a point; a polyline
        // vertex must not coincide with its predecessor.
        if p != *polyline.last().unwrap() {
            polyline.push(p);
        }
    });

    tessellate_polyline(polyline, options, color, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry_builder::{BatchBuffers, BatchVertex};
    use crate::geom::math::point;

    // A batch that checks every emitted vertex, in addition to storing it.
    struct CheckingBatch {
        buffers: BatchBuffers,
    }

    impl CheckingBatch {
        fn new() -> Self {
            CheckingBatch {
                buffers: BatchBuffers::new(),
            }
        }

        fn triangles(&self) -> u32 {
            self.buffers.num_triangles() as u32
        }
    }

    impl TriangleBatch for CheckingBatch {
        fn prepare(&mut self, additional_vertices: usize) {
            self.buffers.prepare(additional_vertices);
        }

        fn add_triangle(&mut self, a: Point, b: Point, c: Point, color: Color) {
            for p in &[a, b, c] {
                assert!(p.x.is_finite());
                assert!(p.y.is_finite());
            }
            self.buffers.add_triangle(a, b, c, color);
        }
    }

    fn white() -> Color {
        Color::WHITE
    }

    #[test]
    fn arc_with_equal_angles_is_empty() {
        let mut batch = CheckingBatch::new();
        let count = draw_arc_square(
            &mut batch,
            point(0.0, 0.0),
            25.0,
            Angle::radians(1.25),
            Angle::radians(1.25),
            white(),
            4.0,
            PenKind::default(),
        );

        assert_eq!(count, Count::default());
        assert_eq!(batch.triangles(), 0);
    }

    #[test]
    fn arc_wrapping_to_zero_is_a_full_circle() {
        let mut batch = CheckingBatch::new();
        let count = draw_arc_round(
            &mut batch,
            point(0.0, 0.0),
            10.0,
            Angle::radians(0.0),
            Angle::radians(2.0 * PI),
            white(),
            4.0,
            PenKind::default(),
        );

        // radius 10 -> 50 segments for the full turn -> 100 triangles,
        // plus two 5-triangle caps of radius round(4 / 2) = 2.
        assert_eq!(count.triangles, 110);
        assert_eq!(batch.triangles(), 110);
    }

    #[test]
    fn arc_triangle_count_follows_the_density_formula() {
        // Half circle of radius 50: min(round(50 * 5), 360) = 250 segments
        // per turn, 125 for the half, two triangles each.
        let mut batch = CheckingBatch::new();
        let count = draw_arc_round(
            &mut batch,
            point(0.0, 0.0),
            50.0,
            Angle::radians(0.0),
            Angle::radians(PI),
            white(),
            4.0,
            PenKind::default(),
        );

        // 250 body triangles plus two 5-triangle round caps.
        assert_eq!(count.triangles, 260);

        // The same arc drawn backwards covers the other three quarters.
        let mut batch = CheckingBatch::new();
        let count = draw_arc_round(
            &mut batch,
            point(0.0, 0.0),
            10.0,
            Angle::radians(0.5 * PI),
            Angle::radians(0.0),
            white(),
            4.0,
            PenKind::default(),
        );
        // ceil(0.75 * 50) = 38 segments -> 76 body triangles + 2 * 5.
        assert_eq!(count.triangles, 86);
    }

    #[test]
    fn square_cap_arc_pads_the_sweep_instead_of_capping() {
        // Half circle of radius 50, pen width 4: the sweep grows by
        // half_width / radius = 0.04 rad on each side, so
        // ceil((pi + 0.08) / 2pi * 250) = 129 segments and nothing else.
        let mut batch = CheckingBatch::new();
        let count = draw_arc_square(
            &mut batch,
            point(0.0, 0.0),
            50.0,
            Angle::radians(0.0),
            Angle::radians(PI),
            white(),
            4.0,
            PenKind::default(),
        );

        assert_eq!(count.triangles, 258);
        assert_eq!(batch.triangles(), 258);
    }

    #[test]
    fn arc_vertices_sit_on_the_offset_circles() {
        let radius = 20.0;
        let half_width = 1.5;
        let mut batch = CheckingBatch::new();
        draw_arc_square(
            &mut batch,
            point(3.0, -2.0),
            radius,
            Angle::radians(0.2),
            Angle::radians(2.1),
            white(),
            half_width * 2.0,
            PenKind::default(),
        );

        for v in &batch.buffers.vertices {
            let d = (v.position - point(3.0, -2.0)).length();
            let inner = (d - (radius - half_width)).abs() < 0.001;
            let outer = (d - (radius + half_width)).abs() < 0.001;
            assert!(inner || outer, "vertex off both offset circles: {:?}", v);
        }
    }

    #[test]
    fn zero_radius_arc_does_not_panic() {
        let mut batch = CheckingBatch::new();
        draw_arc_round(
            &mut batch,
            point(5.0, 5.0),
            0.0,
            Angle::radians(0.0),
            Angle::radians(PI),
            white(),
            4.0,
            PenKind::default(),
        );
        // Every body segment is degenerate; only the caps remain.
        for v in &batch.buffers.vertices {
            assert!((v.position - point(5.0, 5.0)).length() <= 2.001);
        }
    }

    #[test]
    fn straight_bezier_strokes_to_a_rectangle() {
        // Collinear control points: the strip must be two parallel rails at
        // the half width, extended by the half width at both ends.
        let curve = CubicBezierSegment {
            from: point(0.0, 0.0),
            ctrl1: point(10.0, 0.0),
            ctrl2: point(20.0, 0.0),
            to: point(30.0, 0.0),
        };

        let mut batch = CheckingBatch::new();
        let count = draw_bezier_square(&mut batch, &curve, white(), 2.0, PenKind::default());

        assert_eq!(count.triangles, 2);
        let mut min_x = f32::MAX;
        let mut max_x = f32::MIN;
        for v in &batch.buffers.vertices {
            assert!((v.position.y.abs() - 1.0).abs() < 0.001);
            min_x = min_x.min(v.position.x);
            max_x = max_x.max(v.position.x);
        }
        assert!((min_x - -1.0).abs() < 0.001);
        assert!((max_x - 31.0).abs() < 0.001);
    }

    #[test]
    fn round_bezier_adds_two_caps() {
        let curve = CubicBezierSegment {
            from: point(0.0, 0.0),
            ctrl1: point(10.0, 0.0),
            ctrl2: point(20.0, 0.0),
            to: point(30.0, 0.0),
        };

        let mut batch = CheckingBatch::new();
        let count = draw_bezier_round(&mut batch, &curve, white(), 4.0);

        // One quad for the body, a 5-triangle fan of radius 2 per end.
        assert_eq!(count.triangles, 12);
    }

    #[test]
    fn bezier_tessellation_is_deterministic() {
        let curve = CubicBezierSegment {
            from: point(0.0, 0.0),
            ctrl1: point(30.0, 0.0),
            ctrl2: point(30.0, 30.0),
            to: point(60.0, 30.0),
        };

        let mut batch_a = CheckingBatch::new();
        let mut batch_b = CheckingBatch::new();
        let count_a = draw_bezier_square(&mut batch_a, &curve, white(), 3.0, PenKind::default());
        let count_b = draw_bezier_square(&mut batch_b, &curve, white(), 3.0, PenKind::default());

        assert_eq!(count_a, count_b);
        assert_eq!(batch_a.buffers.vertices, batch_b.buffers.vertices);
        assert!(count_a.triangles > 2);
    }

    #[test]
    fn zero_width_bezier_does_not_panic() {
        let curve = CubicBezierSegment {
            from: point(0.0, 0.0),
            ctrl1: point(10.0, 0.0),
            ctrl2: point(20.0, 0.0),
            to: point(30.0, 0.0),
        };

        let mut batch = CheckingBatch::new();
        let count = draw_bezier_square(&mut batch, &curve, white(), 0.0, PenKind::default());

        assert_eq!(count.triangles, 2);
        for v in &batch.buffers.vertices {
            assert_eq!(v.position.y, 0.0);
        }
    }

    #[test]
    fn colors_are_copied_into_every_vertex() {
        let color = Color::rgba(12, 34, 56, 78);
        let mut batch = CheckingBatch::new();
        draw_arc_round(
            &mut batch,
            point(0.0, 0.0),
            10.0,
            Angle::radians(0.0),
            Angle::radians(1.0),
            color,
            2.0,
            PenKind::default(),
        );

        assert!(!batch.buffers.vertices.is_empty());
        for v in &batch.buffers.vertices {
            assert_eq!(v.color, color);
        }
    }

    #[test]
    fn vertices_match_batch_vertex_layout() {
        let mut buffers = BatchBuffers::new();
        buffers.add_triangle(point(0.0, 0.0), point(1.0, 0.0), point(0.0, 1.0), white());
        assert_eq!(
            buffers.vertices[1],
            BatchVertex {
                position: point(1.0, 0.0),
                color: white(),
            }
        );
    }
}
