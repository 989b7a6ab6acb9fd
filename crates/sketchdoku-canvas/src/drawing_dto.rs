//! Serializable drawings for storage and for the constraint classifier.
//!
//! A [`DrawingDto`] carries the raw mark plus the linear index (`row * N + col`)
//! of the cell under each of its points, which is what the classifier is shown.
//! Kind and colour travel as plain strings and are validated when the DTO is
//! converted back into an [`Annotation`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sketchdoku_core::{Canvas, Point};

use crate::{Annotation, AnnotationError, AnnotationKind, AnnotationSet, Color};

/// DTO for one drawn mark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingDto {
    /// Tool identifier of the mark (`circle`, `dottedLine`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Points in drawing order.
    pub points: Vec<Point>,
    /// Colour as `#RRGGBB`.
    pub color: String,
    /// Linear index of the cell under each point; `None` for points off the grid.
    #[serde(default)]
    pub cell_indices: Vec<Option<usize>>,
}

impl DrawingDto {
    /// Builds a DTO, resolving every point against `canvas`.
    #[must_use]
    pub fn from_annotation(annotation: &Annotation, canvas: &Canvas) -> Self {
        Self {
            kind: annotation.kind().tool_id().to_owned(),
            points: annotation.points().to_vec(),
            color: annotation.color().hex().to_owned(),
            cell_indices: annotation
                .cells(canvas)
                .map(|cell| cell.map(|c| c.to_linear(canvas.size)))
                .collect(),
        }
    }
}

impl TryFrom<DrawingDto> for Annotation {
    type Error = AnnotationError;

    fn try_from(value: DrawingDto) -> Result<Self, Self::Error> {
        let kind = value.kind.parse::<AnnotationKind>()?;
        let color = value.color.parse::<Color>()?;
        Ok(Annotation::new(kind, value.points, color)?)
    }
}

/// Builds DTOs for every annotation in drawing order.
#[must_use]
pub fn drawings_to_dtos(set: &AnnotationSet, canvas: &Canvas) -> Vec<DrawingDto> {
    set.iter()
        .map(|annotation| DrawingDto::from_annotation(annotation, canvas))
        .collect()
}

/// Rebuilds an annotation set from DTOs, keeping their order.
///
/// Stored cell indices are ignored; they are derived data.
///
/// # Errors
///
/// Returns the first [`AnnotationError::InvalidAnnotation`] encountered.
pub fn dtos_to_drawings(dtos: Vec<DrawingDto>) -> Result<AnnotationSet, AnnotationError> {
    dtos.into_iter()
        .map(|dto| Annotation::try_from(dto).map(Arc::new))
        .collect()
}

#[cfg(test)]
mod tests {
    use sketchdoku_core::GridSize;

    use super::*;
    use crate::InvalidAnnotationReason;

    #[test]
    fn test_dto_resolves_cells() {
        let canvas = Canvas::new(900.0, 900.0, GridSize::NINE);
        let set = AnnotationSet::new()
            .add(
                AnnotationKind::DottedLine,
                vec![Point::new(150.0, 150.0), Point::new(850.0, 50.0), Point::new(-3.0, 0.0)],
                "green",
            )
            .unwrap();
        let dtos = drawings_to_dtos(&set, &canvas);
        assert_eq!(dtos.len(), 1);
        assert_eq!(dtos[0].kind, "dottedLine");
        assert_eq!(dtos[0].color, "#10B981");
        assert_eq!(dtos[0].cell_indices, vec![Some(10), Some(8), None]);
    }

    #[test]
    fn test_json_shape() {
        let canvas = Canvas::new(90.0, 90.0, GridSize::NINE);
        let annotation = Annotation::new(
            AnnotationKind::Cage,
            vec![Point::new(5.0, 5.0), Point::new(15.0, 5.0)],
            Color::Red,
        )
        .unwrap();
        let json = serde_json::to_value(DrawingDto::from_annotation(&annotation, &canvas)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "cage",
                "points": [{ "x": 5.0, "y": 5.0 }, { "x": 15.0, "y": 5.0 }],
                "color": "#EF4444",
                "cellIndices": [0, 1],
            })
        );
    }

    #[test]
    fn test_dtos_back_to_drawings() {
        let json = r##"[
            { "type": "arrow", "points": [{ "x": 1, "y": 2 }, { "x": 3, "y": 4 }], "color": "#8B5CF6" },
            { "type": "region", "points": [{ "x": 0, "y": 0 }, { "x": 9, "y": 9 }], "color": "yellow" }
        ]"##;
        let dtos: Vec<DrawingDto> = serde_json::from_str(json).unwrap();
        let set = dtos_to_drawings(dtos).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(0).unwrap().kind(), AnnotationKind::Arrow);
        assert_eq!(set.get(1).unwrap().color(), Color::Yellow);
    }

    #[test]
    fn test_dtos_reject_unknown_tool() {
        let dto = DrawingDto {
            kind: "eraser".into(),
            points: vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
            color: "#3B82F6".into(),
            cell_indices: Vec::new(),
        };
        assert_eq!(
            dtos_to_drawings(vec![dto]),
            Err(AnnotationError::InvalidAnnotation(
                InvalidAnnotationReason::UnknownKind("eraser".into())
            ))
        );
    }
}
