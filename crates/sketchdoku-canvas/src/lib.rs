//! Annotation model and drawing history for sketchdoku.
//!
//! A user draws marks (circles, lines, arrows, cages, regions) over a grid. This
//! crate holds the structured form of those marks and their undo/redo history.
//! Every operation consumes the current value and returns the next one, so the
//! owner of the drawing state replaces it atomically after each call.
//!
//! - [`Annotation`] / [`AnnotationSet`]: one validated mark and the ordered marks
//!   of a puzzle
//! - [`HistoryState`]: committed marks plus the undone branch
//! - [`DrawingDto`]: serializable form of a mark, including the cells under its points
//!
//! # Examples
//!
//! ```
//! use sketchdoku_canvas::{AnnotationKind, HistoryState};
//! use sketchdoku_core::Point;
//!
//! let history = HistoryState::new()
//!     .draw(
//!         AnnotationKind::Arrow,
//!         vec![Point::new(10.0, 10.0), Point::new(50.0, 90.0)],
//!         "#3B82F6",
//!     )?;
//! assert!(history.can_undo());
//!
//! let history = history.undo();
//! assert!(history.committed().is_empty());
//! assert!(history.can_redo());
//!
//! let history = history.redo();
//! assert_eq!(history.committed().len(), 1);
//! # Ok::<(), sketchdoku_canvas::AnnotationError>(())
//! ```

pub use self::{annotation::*, drawing_dto::*, error::*, history::*};

mod annotation;
mod drawing_dto;
mod error;
mod history;
