/// Errors produced by the annotation model.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::Error,
    derive_more::From,
    derive_more::IsVariant,
)]
pub enum AnnotationError {
    /// The attempted mark cannot become an annotation.
    #[display("invalid annotation: {_0}")]
    InvalidAnnotation(#[from] InvalidAnnotationReason),
    /// There is no annotation to remove.
    #[display("annotation set is empty")]
    EmptyAnnotationSet,
}

/// Why an attempted mark was rejected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InvalidAnnotationReason {
    /// Fewer than two points were supplied.
    #[display("expected at least 2 points, got {count}")]
    TooFewPoints {
        /// Number of points supplied.
        count: usize,
    },
    /// A point has a NaN or infinite coordinate.
    #[display("point {index} has a non-finite coordinate")]
    NonFinitePoint {
        /// Position of the offending point.
        index: usize,
    },
    /// The colour is not one of the palette colours.
    #[display("unrecognized color {_0:?}")]
    UnknownColor(#[error(not(source))] String),
    /// The tool name does not denote an annotation kind.
    #[display("unrecognized annotation kind {_0:?}")]
    UnknownKind(#[error(not(source))] String),
}
