//! **gridstar-core**: geometry primitives and the integer value grid.
//!
//! This crate provides the foundational types used by the pathfinding
//! engine in `gridstar-paths`: [`Point`], [`Range`] and a [`Grid`] of raw
//! `i32` cell values backed by a shared, thread-safe buffer.

pub mod geom;
pub mod grid;

pub use geom::{Point, Range};
pub use grid::{Grid, GridError};
