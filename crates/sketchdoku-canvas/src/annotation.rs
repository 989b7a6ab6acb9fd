use std::{
    fmt::{self, Display},
    str::FromStr,
    sync::Arc,
};

use serde::{Deserialize, Serialize};
use sketchdoku_core::{Canvas, CellAddress, Point};

use crate::{AnnotationError, InvalidAnnotationReason};

/// The kind of mark a drawing tool produces.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "camelCase")]
pub enum AnnotationKind {
    /// A circle centred on the first point, through the second.
    Circle,
    /// A solid straight line.
    Line,
    /// A dashed straight line.
    DottedLine,
    /// A line with an arrowhead at the last point.
    Arrow,
    /// A dashed rectangle spanned by two corners.
    Cage,
    /// A filled rectangle spanned by two corners.
    Region,
}

impl AnnotationKind {
    /// All annotation kinds in toolbar order.
    pub const ALL: [Self; 6] = [
        Self::Circle,
        Self::Line,
        Self::DottedLine,
        Self::Arrow,
        Self::Cage,
        Self::Region,
    ];

    /// Returns the tool identifier of this kind.
    #[must_use]
    pub const fn tool_id(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Line => "line",
            Self::DottedLine => "dottedLine",
            Self::Arrow => "arrow",
            Self::Cage => "cage",
            Self::Region => "region",
        }
    }
}

impl Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tool_id())
    }
}

impl FromStr for AnnotationKind {
    type Err = InvalidAnnotationReason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tool_id().eq_ignore_ascii_case(s))
            .ok_or_else(|| InvalidAnnotationReason::UnknownKind(s.to_owned()))
    }
}

/// A palette colour.
///
/// Only palette colours are accepted for annotations. A colour parses from either
/// its name or its hex value, ignoring ASCII case.
///
/// # Examples
///
/// ```
/// use sketchdoku_canvas::Color;
///
/// assert_eq!("#3b82f6".parse(), Ok(Color::Blue));
/// assert_eq!("Purple".parse(), Ok(Color::Purple));
/// assert!("#000000".parse::<Color>().is_err());
/// assert_eq!(Color::Red.to_string(), "#EF4444");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Color {
    /// `#3B82F6`
    #[default]
    Blue,
    /// `#10B981`
    Green,
    /// `#EF4444`
    Red,
    /// `#8B5CF6`
    Purple,
    /// `#F59E0B`
    Yellow,
}

impl Color {
    /// All palette colours in toolbar order.
    pub const ALL: [Self; 5] = [
        Self::Blue,
        Self::Green,
        Self::Red,
        Self::Purple,
        Self::Yellow,
    ];

    /// Returns the palette name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Red => "red",
            Self::Purple => "purple",
            Self::Yellow => "yellow",
        }
    }

    /// Returns the `#RRGGBB` value.
    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Blue => "#3B82F6",
            Self::Green => "#10B981",
            Self::Red => "#EF4444",
            Self::Purple => "#8B5CF6",
            Self::Yellow => "#F59E0B",
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hex())
    }
}

impl FromStr for Color {
    type Err = InvalidAnnotationReason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|color| color.hex().eq_ignore_ascii_case(s) || color.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| InvalidAnnotationReason::UnknownColor(s.to_owned()))
    }
}

impl TryFrom<String> for Color {
    type Error = InvalidAnnotationReason;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.hex().to_owned()
    }
}

/// One drawn mark.
///
/// An annotation is immutable once created: it always has at least two finite
/// points and a palette colour.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    kind: AnnotationKind,
    points: Vec<Point>,
    color: Color,
}

impl Annotation {
    /// Creates an annotation.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidAnnotationReason::TooFewPoints`] if fewer than two points are
    /// given, and [`InvalidAnnotationReason::NonFinitePoint`] if a coordinate is NaN
    /// or infinite.
    pub fn new(
        kind: AnnotationKind,
        points: Vec<Point>,
        color: Color,
    ) -> Result<Self, InvalidAnnotationReason> {
        if points.len() < 2 {
            return Err(InvalidAnnotationReason::TooFewPoints {
                count: points.len(),
            });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(InvalidAnnotationReason::NonFinitePoint { index });
        }
        Ok(Self {
            kind,
            points,
            color,
        })
    }

    /// Returns the kind of mark.
    #[must_use]
    pub fn kind(&self) -> AnnotationKind {
        self.kind
    }

    /// Returns the points in drawing order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns the colour.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the cell under each point, in point order.
    ///
    /// Points outside the grid yield `None`.
    pub fn cells(&self, canvas: &Canvas) -> impl Iterator<Item = Option<CellAddress>> {
        self.points.iter().map(|p| canvas.cell_at(*p))
    }
}

/// The ordered annotations of one puzzle; insertion order is drawing order.
///
/// Annotations are shared through [`Arc`], so cloning a set or moving an annotation
/// between a set and the undo branch never copies point data. Identity of an
/// annotation is its position in the set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationSet {
    items: Vec<Arc<Annotation>>,
}

impl AnnotationSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new set with a validated mark appended.
    ///
    /// `self` is left untouched; the new set shares its annotations.
    ///
    /// # Errors
    ///
    /// Returns [`AnnotationError::InvalidAnnotation`] if the colour is not a palette
    /// colour or the points do not form a valid annotation.
    pub fn add(
        &self,
        kind: AnnotationKind,
        points: Vec<Point>,
        color: &str,
    ) -> Result<Self, AnnotationError> {
        let color = color.parse::<Color>()?;
        let annotation = Annotation::new(kind, points, color)?;
        Ok(self.clone().push(Arc::new(annotation)))
    }

    /// Appends an already validated annotation.
    #[must_use]
    pub fn push(mut self, annotation: Arc<Annotation>) -> Self {
        self.items.push(annotation);
        self
    }

    /// Returns a new set without the most recently drawn annotation, and that annotation.
    ///
    /// # Errors
    ///
    /// Returns [`AnnotationError::EmptyAnnotationSet`] if there is nothing to remove.
    pub fn remove_last(&self) -> Result<(Self, Arc<Annotation>), AnnotationError> {
        let (removed, rest) = self
            .items
            .split_last()
            .ok_or(AnnotationError::EmptyAnnotationSet)?;
        Ok((Self { items: rest.to_vec() }, Arc::clone(removed)))
    }

    pub(crate) fn pop(&mut self) -> Option<Arc<Annotation>> {
        self.items.pop()
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the number of annotations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no annotations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the annotation at drawing position `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Arc<Annotation>> {
        self.items.get(index)
    }

    /// Returns the most recently drawn annotation.
    #[must_use]
    pub fn last(&self) -> Option<&Arc<Annotation>> {
        self.items.last()
    }

    /// Iterates over the annotations in drawing order.
    pub fn iter(&self) -> std::slice::Iter<'_, Arc<Annotation>> {
        self.items.iter()
    }
}

impl FromIterator<Arc<Annotation>> for AnnotationSet {
    fn from_iter<I: IntoIterator<Item = Arc<Annotation>>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a AnnotationSet {
    type Item = &'a Arc<Annotation>;
    type IntoIter = std::slice::Iter<'a, Arc<Annotation>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
