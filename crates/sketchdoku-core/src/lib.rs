//! Core grid types for sketchdoku.
//!
//! This crate provides the geometric vocabulary shared by the annotation model and
//! the constraint grammar: the size of the grid, continuous canvas points, and the
//! discrete cell addresses those points resolve to.
//!
//! # Overview
//!
//! - [`grid_size`]: The side length `N` of an `N×N` grid (1-31, default 9)
//! - [`cell`]: Cell addresses inside the grid, border clue cells just outside it,
//!   and numpad-style single-step moves between cells
//! - [`geometry`]: Canvas points and the point-to-cell mapping
//!
//! All row and column numbers held by these types are 0-based. The textual
//! `RxCy` notation is 1-based; conversion happens only at that boundary
//! ([`CellAddress`]'s [`Display`](std::fmt::Display) and the grammar crate's parser).
//!
//! # Examples
//!
//! ```
//! use sketchdoku_core::{Canvas, CellAddress, GridSize, Point};
//!
//! let canvas = Canvas::new(900.0, 900.0, GridSize::default());
//! let cell = canvas.cell_at(Point::new(150.0, 150.0));
//! assert_eq!(cell, Some(CellAddress::new(1, 1)));
//! assert_eq!(cell.unwrap().to_string(), "R2C2");
//!
//! // Points outside the canvas map to no cell at all.
//! assert_eq!(canvas.cell_at(Point::new(-1.0, 10.0)), None);
//! ```

pub mod cell;
mod error;
pub mod geometry;
pub mod grid_size;

pub use self::{
    cell::{CellAddress, ClueCell, NumpadMove},
    error::GridError,
    geometry::{Canvas, Point, point_to_cell},
    grid_size::GridSize,
};
