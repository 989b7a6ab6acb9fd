//! Constraint kinds understood by the solving engine.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::GrammarError;

macro_rules! constraint_kinds {
    ($($(#[$meta:meta])* $variant:ident => $name:literal,)*) => {
        /// A constraint kind.
        ///
        /// The set is closed: text naming any other kind is rejected with
        /// [`GrammarError::UnknownConstraintKind`] as soon as it is parsed.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "&'static str")]
        pub enum ConstraintKind {
            $($(#[$meta])* $variant,)*
        }

        impl ConstraintKind {
            /// All constraint kinds, in registry order.
            pub const ALL: [Self; 29] = [$(Self::$variant,)*];

            /// Returns the name used in the grammar.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }
        }
    };
}

constraint_kinds! {
    /// Circle cell equals the sum of each arrow shaft.
    Arrow => "arrow",
    /// Cells on the line lie strictly between the two endpoint values.
    BetweenLine => "betweenline",
    /// Digits may not repeat at a given chess-move offset.
    Chess => "chess",
    /// Groups of cells holding identical digits.
    Clone => "clone",
    /// Adjacent cells differ by a given amount (default 1).
    Difference => "difference",
    /// Cells at the same position within each box hold different digits.
    DisjointOffset => "disjointoffset",
    /// Disjoint groups.
    Djg => "djg",
    /// Diagonal non-consecutive.
    Dnc => "dnc",
    /// Digits on the negative diagonal do not repeat.
    DNeg => "dneg",
    /// Digits on the positive diagonal do not repeat.
    DPos => "dpos",
    /// Cells hold even digits.
    Even => "even",
    /// An additional region of non-repeating digits.
    ExtraRegion => "extraregion",
    /// Killer cage with an optional sum.
    Killer => "killer",
    /// Anti-king.
    King => "king",
    /// Anti-knight.
    Knight => "knight",
    /// Little killer: a diagonal sum clue outside the grid.
    LittleKiller => "lk",
    /// Cell is greater than its orthogonal neighbours.
    Max => "max",
    /// Cell is less than its orthogonal neighbours.
    Min => "min",
    /// Cells hold odd digits.
    Odd => "odd",
    /// The line reads the same in both directions.
    Palindrome => "palindrome",
    /// The line holds a set of consecutive digits.
    Renban => "renban",
    /// Adjacent cells on the line differ by at least a given amount (default 5).
    Whispers => "whispers",
    /// Listed digits appear among the four cells around a grid intersection.
    Quad => "quad",
    /// Adjacent cells are in a given ratio (default 2).
    Ratio => "ratio",
    /// Sum of the digits between the 1 and the 9 of a row or column.
    Sandwich => "sandwich",
    /// Cells sum to a given total.
    Sum => "sum",
    /// Digits may not repeat at a given taxicab distance.
    Taxi => "taxi",
    /// A digit may not appear at taxicab distance equal to itself.
    SelfTaxi => "selftaxi",
    /// Digits strictly increase from the bulb along the thermometer.
    Thermo => "thermo",
}

impl Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConstraintKind {
    type Err = GrammarError;

    /// Parses a kind name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| GrammarError::UnknownConstraintKind(s.to_owned()))
    }
}

impl TryFrom<String> for ConstraintKind {
    type Error = GrammarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ConstraintKind> for &'static str {
    fn from(kind: ConstraintKind) -> Self {
        kind.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_set() {
        assert_eq!(ConstraintKind::ALL.len(), 29);
        for kind in ConstraintKind::ALL {
            assert_eq!(kind.name().parse::<ConstraintKind>().unwrap(), kind);
            assert_eq!(kind.name(), kind.name().to_ascii_lowercase());
        }
        assert_eq!("LK".parse::<ConstraintKind>().unwrap(), ConstraintKind::LittleKiller);
        assert!(matches!(
            "arrowsum".parse::<ConstraintKind>(),
            Err(GrammarError::UnknownConstraintKind(name)) if name == "arrowsum"
        ));
    }
}
