//! The schema registry: the argument contract of every constraint kind.
//!
//! An expression is `kind[:arg1[;arg2...]]`. The arguments are an optional run
//! of leading numeric scalars followed by the groups. Each [`Schema`] fixes how
//! many leading scalars are allowed and which [`GroupShape`] each group position
//! takes. Both [`Compiler::encode`](crate::Compiler::encode) and
//! [`Compiler::decode`](crate::Compiler::decode) validate against this table;
//! there is no other source of argument rules.

use std::fmt::{self, Display};

use crate::ConstraintKind;

/// How many leading scalars a kind accepts (`min..=max`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leading {
    /// Minimum count.
    pub min: usize,
    /// Maximum count.
    pub max: usize,
}

impl Leading {
    /// No leading scalars.
    pub const NONE: Self = Self { min: 0, max: 0 };
    /// One optional leading scalar.
    pub const OPTIONAL: Self = Self { min: 0, max: 1 };
    /// Exactly one leading scalar.
    pub const ONE: Self = Self { min: 1, max: 1 };

    /// Returns `true` if `count` leading scalars are accepted.
    #[must_use]
    pub const fn accepts(self, count: usize) -> bool {
        self.min <= count && count <= self.max
    }
}

impl Display for Leading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}-{}", self.min, self.max)
        }
    }
}

/// What a single group at a given position must look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GroupShape {
    /// A cell group with at least `min_len` cells.
    Cells {
        /// Minimum number of cells.
        min_len: usize,
    },
    /// A bare non-negative number.
    Value,
    /// A bare digit in `1..=N`.
    Digit,
    /// One cell on the ring just outside the grid.
    Clue,
    /// A diagonal direction: `UR`, `DR`, `UL` or `DL`.
    Direction,
    /// A number immediately followed by a non-corner clue cell, as in `15R0C3`.
    SumClue,
}

impl Display for GroupShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cells { min_len: 1 } => f.write_str("a cell group"),
            Self::Cells { min_len } => write!(f, "a cell group of at least {min_len} cells"),
            Self::Value => f.write_str("a number"),
            Self::Digit => f.write_str("a digit"),
            Self::Clue => f.write_str("a clue cell outside the grid"),
            Self::Direction => f.write_str("a direction (UR, DR, UL, DL)"),
            Self::SumClue => f.write_str("a sum followed by a clue cell"),
        }
    }
}

/// Trailing groups that may repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Repeat {
    /// Shape of every repeated group.
    pub shape: GroupShape,
    /// Minimum number of repetitions.
    pub min: usize,
    /// Maximum number of repetitions, if bounded.
    pub max: Option<usize>,
}

/// Rules that relate several groups to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossRule {
    /// No cross-group rule.
    None,
    /// Every cell group holds the same number of cells.
    EqualLengths,
}

/// Number of groups a kind accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// No groups.
    Zero,
    /// Exactly this many groups.
    Exact(usize),
    /// This many groups or more.
    AtLeast(usize),
    /// Between the two bounds, inclusive.
    Between(usize, usize),
}

impl Arity {
    /// Returns `true` if `count` groups are accepted.
    #[must_use]
    pub const fn accepts(self, count: usize) -> bool {
        match self {
            Self::Zero => count == 0,
            Self::Exact(n) => count == n,
            Self::AtLeast(n) => count >= n,
            Self::Between(min, max) => min <= count && count <= max,
        }
    }
}

impl Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zero => f.write_str("no groups"),
            Self::Exact(n) => write!(f, "exactly {n} group(s)"),
            Self::AtLeast(n) => write!(f, "at least {n} group(s)"),
            Self::Between(min, max) => write!(f, "{min} to {max} groups"),
        }
    }
}

/// The argument contract of one constraint kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    /// The kind this schema describes.
    pub kind: ConstraintKind,
    /// Accepted number of leading scalars.
    pub leading: Leading,
    /// Shapes of the groups at fixed positions.
    pub fixed: &'static [GroupShape],
    /// Shape of the groups after the fixed ones, if any may follow.
    pub repeat: Option<Repeat>,
    /// Rule relating groups to each other.
    pub cross: CrossRule,
}

impl Schema {
    /// Returns the number of groups this schema accepts.
    #[must_use]
    pub const fn arity(&self) -> Arity {
        let fixed = self.fixed.len();
        match self.repeat {
            None if fixed == 0 => Arity::Zero,
            None => Arity::Exact(fixed),
            Some(Repeat { max: None, min, .. }) => Arity::AtLeast(fixed + min),
            Some(Repeat {
                max: Some(max),
                min,
                ..
            }) => Arity::Between(fixed + min, fixed + max),
        }
    }

    /// Returns the shape expected at group position `index`, if any.
    #[must_use]
    pub fn shape_at(&self, index: usize) -> Option<GroupShape> {
        if let Some(shape) = self.fixed.get(index) {
            return Some(*shape);
        }
        let repeat = self.repeat?;
        let offset = index - self.fixed.len();
        match repeat.max {
            Some(max) if offset >= max => None,
            _ => Some(repeat.shape),
        }
    }

    /// Returns `true` if the kind takes no arguments at all.
    #[must_use]
    pub const fn takes_no_arguments(&self) -> bool {
        self.leading.max == 0 && matches!(self.arity(), Arity::Zero)
    }
}

const fn cells(min_len: usize) -> GroupShape {
    GroupShape::Cells { min_len }
}

const fn no_args(kind: ConstraintKind) -> Schema {
    Schema {
        kind,
        leading: Leading::NONE,
        fixed: &[],
        repeat: None,
        cross: CrossRule::None,
    }
}

const fn cell_lists(kind: ConstraintKind, leading: Leading, min_len: usize) -> Schema {
    Schema {
        kind,
        leading,
        fixed: &[],
        repeat: Some(Repeat {
            shape: cells(min_len),
            min: 1,
            max: None,
        }),
        cross: CrossRule::None,
    }
}

const fn fixed(kind: ConstraintKind, leading: Leading, shapes: &'static [GroupShape]) -> Schema {
    Schema {
        kind,
        leading,
        fixed: shapes,
        repeat: None,
        cross: CrossRule::None,
    }
}

/// The registry, in [`ConstraintKind::ALL`] order.
static SCHEMAS: [Schema; 29] = {
    use ConstraintKind as K;
    [
        Schema {
            kind: K::Arrow,
            leading: Leading::NONE,
            fixed: &[cells(1)],
            repeat: Some(Repeat {
                shape: cells(1),
                min: 1,
                max: None,
            }),
            cross: CrossRule::None,
        },
        cell_lists(K::BetweenLine, Leading::NONE, 3),
        Schema {
            kind: K::Chess,
            leading: Leading { min: 2, max: 2 },
            fixed: &[],
            repeat: Some(Repeat {
                shape: cells(1),
                min: 0,
                max: None,
            }),
            cross: CrossRule::None,
        },
        Schema {
            kind: K::Clone,
            leading: Leading::NONE,
            fixed: &[cells(1), cells(1)],
            repeat: None,
            cross: CrossRule::EqualLengths,
        },
        cell_lists(K::Difference, Leading::OPTIONAL, 2),
        no_args(K::DisjointOffset),
        no_args(K::Djg),
        no_args(K::Dnc),
        no_args(K::DNeg),
        no_args(K::DPos),
        cell_lists(K::Even, Leading::NONE, 1),
        cell_lists(K::ExtraRegion, Leading::NONE, 1),
        fixed(K::Killer, Leading::OPTIONAL, &[cells(1)]),
        no_args(K::King),
        no_args(K::Knight),
        fixed(
            K::LittleKiller,
            Leading::NONE,
            &[GroupShape::Value, GroupShape::Clue, GroupShape::Direction],
        ),
        cell_lists(K::Max, Leading::NONE, 1),
        cell_lists(K::Min, Leading::NONE, 1),
        cell_lists(K::Odd, Leading::NONE, 1),
        cell_lists(K::Palindrome, Leading::NONE, 2),
        cell_lists(K::Renban, Leading::NONE, 2),
        cell_lists(K::Whispers, Leading::OPTIONAL, 2),
        Schema {
            kind: K::Quad,
            leading: Leading::NONE,
            fixed: &[cells(1)],
            repeat: Some(Repeat {
                shape: GroupShape::Digit,
                min: 1,
                max: Some(4),
            }),
            cross: CrossRule::None,
        },
        cell_lists(K::Ratio, Leading::OPTIONAL, 2),
        fixed(K::Sandwich, Leading::NONE, &[GroupShape::SumClue]),
        cell_lists(K::Sum, Leading::ONE, 1),
        no_args(K::Taxi).with_leading(Leading::ONE),
        no_args(K::SelfTaxi),
        cell_lists(K::Thermo, Leading::NONE, 2),
    ]
};

impl Schema {
    const fn with_leading(mut self, leading: Leading) -> Self {
        self.leading = leading;
        self
    }
}

/// Returns the schema of `kind`.
///
/// # Examples
///
/// ```
/// use sketchdoku_grammar::{Arity, ConstraintKind, schema_for};
///
/// let schema = schema_for(ConstraintKind::LittleKiller);
/// assert_eq!(schema.arity(), Arity::Exact(3));
/// assert_eq!(schema_for(ConstraintKind::King).arity(), Arity::Zero);
/// ```
#[must_use]
pub fn schema_for(kind: ConstraintKind) -> &'static Schema {
    &SCHEMAS[kind as usize]
}

/// Looks up a schema by kind name, ignoring ASCII case.
///
/// # Errors
///
/// Returns [`GrammarError::UnknownConstraintKind`](crate::GrammarError::UnknownConstraintKind)
/// if the name is not a known kind.
pub fn schema_for_name(name: &str) -> Result<&'static Schema, crate::GrammarError> {
    Ok(schema_for(name.parse()?))
}
