use sketchdoku_core::{CellAddress, GridError, GridSize};

use crate::{Arity, ConstraintKind, GroupShape, Leading};

/// Errors produced while encoding or decoding constraint expressions.
///
/// The variants separate "not our grammar" ([`MalformedExpression`],
/// [`MalformedCellGroup`]) from "well-formed but invalid for this kind"
/// ([`UnknownConstraintKind`], [`SchemaViolation`]).
///
/// [`MalformedExpression`]: GrammarError::MalformedExpression
/// [`MalformedCellGroup`]: GrammarError::MalformedCellGroup
/// [`UnknownConstraintKind`]: GrammarError::UnknownConstraintKind
/// [`SchemaViolation`]: GrammarError::SchemaViolation
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
pub enum GrammarError {
    /// The kind name is not in the closed set of constraint kinds.
    #[display("unknown constraint kind {_0:?}")]
    UnknownConstraintKind(#[error(not(source))] String),
    /// The arguments do not match the schema of the kind.
    #[display("{_0}")]
    #[from]
    SchemaViolation(SchemaViolation),
    /// The text is not shaped like a constraint expression at all.
    #[display("malformed expression {text:?}: {reason}")]
    MalformedExpression {
        /// The offending text.
        text: String,
        /// What was wrong with it.
        reason: &'static str,
    },
    /// A cell group does not follow the addressing grammar.
    #[display("malformed cell group {text:?}: {source}")]
    MalformedCellGroup {
        /// The offending group text.
        text: String,
        /// What was wrong with it.
        source: CellGroupError,
    },
    /// A cell supplied as an index or a `[row, col]` pair is off the grid.
    #[display("{_0}")]
    #[from]
    CellOutOfBounds(GridError),
    /// A cell reference is neither a non-negative index nor a pair of integers.
    #[display("unrecognized cell reference {_0}")]
    UnrecognizedCellReference(#[error(not(source))] String),
}

impl GrammarError {
    pub(crate) fn malformed(text: &str, reason: &'static str) -> Self {
        Self::MalformedExpression {
            text: text.to_owned(),
            reason,
        }
    }

    pub(crate) fn cell_group(text: &str, source: CellGroupError) -> Self {
        Self::MalformedCellGroup {
            text: text.to_owned(),
            source,
        }
    }
}

/// Which coordinate of a cell a number addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Axis {
    /// The `R` part.
    #[display("row")]
    Row,
    /// The `C` part.
    #[display("column")]
    Column,
}

/// Reasons a cell group text is rejected.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
pub enum CellGroupError {
    /// The group text is empty.
    #[display("empty cell group")]
    Empty,
    /// A character that does not belong at this position.
    #[display("unexpected {found:?} at offset {offset}")]
    UnexpectedChar {
        /// Byte offset in the group text.
        offset: usize,
        /// The character found.
        found: char,
    },
    /// The text ends in the middle of a cell.
    #[display("unexpected end of cell group")]
    UnexpectedEnd,
    /// A row or column numeral is zero or exceeds the grid size.
    #[display("{axis} {value} is outside 1-{size}")]
    OutOfRange {
        /// Axis of the numeral.
        axis: Axis,
        /// The numeral as written.
        value: u32,
        /// Side length of the grid.
        size: GridSize,
    },
    /// A range whose start is greater than its end.
    #[display("{axis} range {start}-{end} is descending")]
    DescendingRange {
        /// Axis of the range.
        axis: Axis,
        /// First bound as written.
        start: u32,
        /// Second bound as written.
        end: u32,
    },
    /// A numpad move digit that is not a direction (`0` or `5`).
    #[display("{digit} is not a numpad direction")]
    InvalidMove {
        /// The digit as written.
        digit: u8,
    },
    /// A numpad move steps off the grid.
    #[display("numpad move {digit} from {from} leaves the grid")]
    MoveLeavesGrid {
        /// Cell the move starts from.
        from: CellAddress,
        /// The move digit.
        digit: u8,
    },
    /// A numpad chain follows a range or list instead of a single cell.
    #[display("numpad moves must follow a single cell")]
    ChainWithoutBase,
    /// A cell appears twice without being reached by a numpad move.
    #[display("{cell} appears more than once")]
    DuplicateCell {
        /// The repeated cell.
        cell: CellAddress,
    },
}

/// A constraint whose arguments do not fit the schema of its kind.
///
/// Always reports the kind together with the group arity it expects and the
/// number of groups it got.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("{kind}: {violation} (expects {expected}, got {actual} group(s))")]
pub struct SchemaViolation {
    /// Kind of the rejected constraint.
    pub kind: ConstraintKind,
    /// Group arity the schema expects.
    pub expected: Arity,
    /// Number of groups supplied.
    pub actual: usize,
    /// What was wrong.
    pub violation: Violation,
}

/// The specific schema rule a constraint broke.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum Violation {
    /// Too few or too many leading scalars.
    #[display("expected {expected} leading value(s), got {actual}")]
    LeadingCount {
        /// Accepted number of leading scalars.
        expected: Leading,
        /// Number supplied.
        actual: usize,
    },
    /// Too few or too many groups.
    #[display("wrong number of groups")]
    GroupCount,
    /// A group has the wrong shape for its position.
    #[display("group {index} should be {expected}")]
    GroupShape {
        /// 0-based group position.
        index: usize,
        /// Shape required at that position.
        expected: GroupShape,
    },
    /// A cell group has fewer cells than required.
    #[display("group {index} needs at least {min} cell(s), got {actual}")]
    TooFewCells {
        /// 0-based group position.
        index: usize,
        /// Minimum number of cells.
        min: usize,
        /// Number supplied.
        actual: usize,
    },
    /// A cell lies outside the grid.
    #[display("group {index} contains {cell}, outside the {size}x{size} grid")]
    CellOutsideGrid {
        /// 0-based group position.
        index: usize,
        /// The offending cell.
        cell: CellAddress,
        /// Side length of the grid.
        size: GridSize,
    },
    /// A cell repeats without being a single step from the cell before it.
    #[display("group {index} repeats {cell} where no numpad move can reach it")]
    UnreachableRepeat {
        /// 0-based group position.
        index: usize,
        /// The repeated cell.
        cell: CellAddress,
    },
    /// A clue cell is not on the ring around the grid.
    #[display("group {index} clue must sit just outside the grid")]
    ClueNotOnBorder {
        /// 0-based group position.
        index: usize,
    },
    /// A row/column clue sits on a corner of the ring.
    #[display("group {index} clue must face a row or column, not a corner")]
    CornerClue {
        /// 0-based group position.
        index: usize,
    },
    /// A direction token outside `UR`, `DR`, `UL`, `DL`.
    #[display("group {index} direction {found:?} is not one of UR, DR, UL, DL")]
    InvalidDirection {
        /// 0-based group position.
        index: usize,
        /// The token found.
        found: String,
    },
    /// A digit value outside `1..=N`.
    #[display("group {index} digit {value} is outside 1-{size}")]
    DigitOutOfRange {
        /// 0-based group position.
        index: usize,
        /// The value supplied.
        value: u32,
        /// Side length of the grid.
        size: GridSize,
    },
    /// Groups that must have the same number of cells differ.
    #[display("groups must all have the same number of cells")]
    UnequalLengths,
}
