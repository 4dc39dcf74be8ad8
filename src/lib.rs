//! `nib` turns pen strokes (circular arcs and cubic bézier curves with a
//! width and a cap style) into triangles for a batched 2D renderer.
//!
//! The actual work happens in the member crates, re-exported here:
//!
//! - [`nib_tessellation`](../nib_tessellation/index.html): the stroke
//!   tessellators, the drawing entry points and the batch contract.
//! - [`nib_geom`](../nib_geom/index.html): arc and bézier math.

pub use nib_geom as geom;
pub use nib_tessellation as tessellation;

pub use nib_geom::math;
pub use nib_tessellation::geometry_builder;

pub use nib_tessellation::{
    draw_arc_round, draw_arc_square, draw_bezier_round, draw_bezier_square, Color, PenCap,
    PenKind, PenOptions,
};
