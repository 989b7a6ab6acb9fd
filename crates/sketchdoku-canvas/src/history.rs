use std::sync::Arc;

use sketchdoku_core::Point;

use crate::{Annotation, AnnotationError, AnnotationKind, AnnotationSet, Color};

/// Drawing history: the committed annotations and the branch of undone ones.
///
/// These two sequences are the only source of truth for what is on the canvas.
/// `undone` is ordered by time of undo, so its last element is the next to redo.
/// Every transition consumes the state and returns the next one; `undo`, `redo`
/// and `record` are O(1) amortized. Undoing or redoing at a bound is a no-op.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryState {
    committed: AnnotationSet,
    undone: Vec<Arc<Annotation>>,
}

impl HistoryState {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the annotations currently on the canvas, in drawing order.
    #[must_use]
    pub fn committed(&self) -> &AnnotationSet {
        &self.committed
    }

    /// Returns the undone annotations; the last one is the next to be redone.
    #[must_use]
    pub fn undone(&self) -> &[Arc<Annotation>] {
        &self.undone
    }

    /// Returns `true` if there is a committed annotation to undo.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    /// Returns `true` if there is an undone annotation to redo.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// Commits a new annotation and discards the redo branch.
    #[must_use]
    pub fn record(mut self, annotation: impl Into<Arc<Annotation>>) -> Self {
        self.committed = self.committed.push(annotation.into());
        self.undone.clear();
        self
    }

    /// Validates a mark and records it, leaving `self` untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AnnotationError::InvalidAnnotation`] if the colour is not a palette
    /// colour or the points do not form a valid annotation.
    pub fn draw(
        &self,
        kind: AnnotationKind,
        points: Vec<Point>,
        color: &str,
    ) -> Result<Self, AnnotationError> {
        let color = color.parse::<Color>()?;
        let annotation = Annotation::new(kind, points, color)?;
        Ok(self.clone().record(annotation))
    }

    /// Moves the most recent annotation onto the redo branch.
    #[must_use]
    pub fn undo(mut self) -> Self {
        if let Some(annotation) = self.committed.pop() {
            self.undone.push(annotation);
        }
        self
    }

    /// Moves the most recently undone annotation back onto the canvas.
    #[must_use]
    pub fn redo(mut self) -> Self {
        if let Some(annotation) = self.undone.pop() {
            self.committed = self.committed.push(annotation);
        }
        self
    }

    /// Empties both the canvas and the redo branch.
    #[must_use]
    pub fn clear(mut self) -> Self {
        self.committed.clear();
        self.undone.clear();
        self
    }
}
