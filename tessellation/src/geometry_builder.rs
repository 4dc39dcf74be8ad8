//! # Geometry builder
//!
//! The interface between the pen tessellators and the render batch that
//! receives their triangles.
//!
//! ## Overview
//!
//! The tessellators in this crate don't know anything about the memory the
//! rendering backend submits to the GPU. They talk to a [`TriangleBatch`],
//! requesting capacity up front with [`TriangleBatch::prepare`] and
//! appending one colored triangle at a time with
//! [`TriangleBatch::add_triangle`]. [`BatchBuffers`] is the plain growable
//! implementation used by the tests and by backends without their own
//! buffer type.
//!
//! ## Example
//!
//! ```
//! use nib_tessellation::geometry_builder::BatchBuffers;
//! use nib_tessellation::{Color, PenKind};
//! use nib_tessellation::geom::math::{point, Angle};
//!
//! let mut batch = BatchBuffers::new();
//!
//! nib_tessellation::draw_arc_square(
//!     &mut batch,
//!     point(0.0, 0.0),
//!     10.0,
//!     Angle::radians(0.0),
//!     Angle::radians(1.0),
//!     Color::WHITE,
//!     2.0,
//!     PenKind::default(),
//! );
//!
//! println!("The generated vertices are: {:?}.", &batch.vertices[..]);
//! ```

use crate::geom::math::Point;
use crate::Color;

use std::ops::{Add, AddAssign};

/// The destination of the triangles produced by the tessellators.
///
/// The batch is owned by the rendering backend and outlives the draw call;
/// the tessellators only ever append to it.
pub trait TriangleBatch {
    /// Ensure capacity for `additional_vertices` more vertices.
    ///
    /// Called before a tessellation pass with the expected number of
    /// vertices. Must be callable speculatively: over-estimating is safe.
    fn prepare(&mut self, additional_vertices: usize);

    /// Append one solid-color triangle to the batch.
    fn add_triangle(&mut self, a: Point, b: Point, c: Point, color: Color);
}

/// A vertex as stored in [`BatchBuffers`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BatchVertex {
    pub position: Point,
    pub color: Color,
}

/// Growable vertex storage for batched triangles.
///
/// Three consecutive vertices form one triangle; there is no index buffer.
#[derive(Clone, Debug, Default)]
pub struct BatchBuffers {
    pub vertices: Vec<BatchVertex>,
}

impl BatchBuffers {
    pub fn new() -> Self {
        BatchBuffers {
            vertices: Vec::new(),
        }
    }

    pub fn with_capacity(num_vertices: usize) -> Self {
        BatchBuffers {
            vertices: Vec::with_capacity(num_vertices),
        }
    }

    pub fn num_triangles(&self) -> usize {
        self.vertices.len() / 3
    }
}

impl TriangleBatch for BatchBuffers {
    fn prepare(&mut self, additional_vertices: usize) {
        self.vertices.reserve(additional_vertices);
    }

    fn add_triangle(&mut self, a: Point, b: Point, c: Point, color: Color) {
        self.vertices.push(BatchVertex { position: a, color });
        self.vertices.push(BatchVertex { position: b, color });
        self.vertices.push(BatchVertex { position: c, color });
    }
}

/// Number of vertices and triangles added by a tessellation pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Count {
    pub vertices: u32,
    pub triangles: u32,
}

impl Add for Count {
    type Output = Count;
    fn add(self, other: Count) -> Count {
        Count {
            vertices: self.vertices + other.vertices,
            triangles: self.triangles + other.triangles,
        }
    }
}

impl AddAssign for Count {
    fn add_assign(&mut self, other: Count) {
        *self = *self + other;
    }
}
