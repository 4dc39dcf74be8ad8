//! Stroke tessellation of parametric curves for a batched 2D renderer.
//!
//! ## Overview
//!
//! This crate turns circular arcs and cubic bézier curves, together with a
//! pen description (width and cap style), into filled triangles appended to
//! a caller-owned render batch. The pipeline samples the curve into a
//! polyline, extrudes left/right offset rails at half the pen width,
//! corrects interior rail vertices with limited miter joins, applies the
//! cap geometry and emits two triangles per quad. Arcs skip the generic
//! offset pipeline for their body: each angular segment uses the exact
//! radial direction as its offset normal.
//!
//! The destination of the triangles is anything implementing
//! [`TriangleBatch`](geometry_builder/trait.TriangleBatch.html); the
//! [`pen`](pen/index.html) module exposes the drawing entry points.
//!
//! All of the work happens synchronously within one call and no
//! intermediate data outlives it: the batch is the only long-lived object
//! and it belongs to the rendering backend, not to this crate.

pub extern crate nib_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
extern crate serde;

pub mod geometry_builder;
pub mod pen;
pub mod stroke;

pub use crate::geometry_builder::{BatchBuffers, BatchVertex, Count, TriangleBatch};
pub use crate::pen::{draw_arc_round, draw_arc_square, draw_bezier_round, draw_bezier_square};

/// The two cap styles the pen tessellator knows how to produce.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum PenCap {
    /// Extend the stroke by half the pen width so it ends on a flush edge.
    Square,
    /// Close the stroke with a half-disc fan.
    Round,
}

/// Pen style selector accepted by the drawing entry points.
///
/// Only the solid pen exists today; the parameter is carried through so
/// callers can keep passing it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum PenKind {
    Solid,
}

impl Default for PenKind {
    fn default() -> Self {
        PenKind::Solid
    }
}

/// A plain 8-bit RGBA color, copied into every emitted triangle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }
}

/// Parameters for the pen stroke tessellators.
///
/// See the [module documentation](index.html) for the role each field
/// plays. `line_width` is the full pen width; the rails sit at half of it
/// on each side of the curve. Validation of the numeric inputs (finite
/// coordinates, non-negative width) is the caller's responsibility.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct PenOptions {
    /// How the ends of the stroke are closed off.
    ///
    /// Default value: `PenCap::Square`.
    pub cap: PenCap,

    /// The full width of the stroke.
    ///
    /// Default value: `PenOptions::DEFAULT_LINE_WIDTH`.
    pub line_width: f32,

    /// A miter intersection further than `miter_limit` times the half
    /// width from the joint falls back to the plain offset vertex.
    ///
    /// Default value: `PenOptions::DEFAULT_MITER_LIMIT`.
    pub miter_limit: f32,

    /// Maximum distance between a bézier curve and its flattened
    /// approximation. Smaller values produce smoother strokes from more
    /// triangles.
    ///
    /// Default value: `PenOptions::DEFAULT_TOLERANCE`.
    pub tolerance: f32,
}

impl PenOptions {
    pub const DEFAULT_LINE_WIDTH: f32 = 1.0;
    pub const DEFAULT_MITER_LIMIT: f32 = 2.0;
    pub const DEFAULT_TOLERANCE: f32 = 0.75;

    /// Options with the given cap style and every other field defaulted.
    pub fn cap(cap: PenCap) -> Self {
        PenOptions {
            cap,
            ..Default::default()
        }
    }

    pub fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    pub fn with_miter_limit(mut self, limit: f32) -> Self {
        self.miter_limit = limit;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }
}

impl Default for PenOptions {
    fn default() -> Self {
        PenOptions {
            cap: PenCap::Square,
            line_width: Self::DEFAULT_LINE_WIDTH,
            miter_limit: Self::DEFAULT_MITER_LIMIT,
            tolerance: Self::DEFAULT_TOLERANCE,
        }
    }
}
