//! 2D curve math for the nib stroke tessellator.
//!
//! This crate provides the small geometric vocabulary the tessellation
//! crate is built on: circular arcs with normalized sweeps, cubic bézier
//! segments with a tolerance-driven flattening pass, line/line
//! intersection, and a few vector utilities. Everything is `f32` and sits
//! on top of [euclid](https://crates.io/crates/euclid)'s 2D types.

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod arc;
pub mod cubic_bezier;
mod flatten_cubic;
mod line;
pub mod math;
pub mod utils;

pub use crate::arc::Arc;
pub use crate::cubic_bezier::CubicBezierSegment;
pub use crate::flatten_cubic::Flattened;
pub use crate::line::{Line, LineSegment};

pub use euclid;
