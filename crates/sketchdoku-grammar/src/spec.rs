use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use sketchdoku_core::ClueCell;

use crate::{CellGroup, ConstraintKind};

/// A diagonal direction, as used by little killer clues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Diagonal {
    /// Up and to the right.
    #[serde(rename = "UR")]
    UpRight,
    /// Down and to the right.
    #[serde(rename = "DR")]
    DownRight,
    /// Up and to the left.
    #[serde(rename = "UL")]
    UpLeft,
    /// Down and to the left.
    #[serde(rename = "DL")]
    DownLeft,
}

impl Diagonal {
    /// All directions.
    pub const ALL: [Self; 4] = [Self::UpRight, Self::DownRight, Self::UpLeft, Self::DownLeft];

    /// Returns the token used in the grammar.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UpRight => "UR",
            Self::DownRight => "DR",
            Self::UpLeft => "UL",
            Self::DownLeft => "DL",
        }
    }
}

impl Display for Diagonal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Diagonal {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|dir| dir.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// One `;`-separated argument after the leading scalars.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Group {
    /// Cells inside the grid.
    Cells(CellGroup),
    /// A bare number.
    Value(u32),
    /// A cell on the ring around the grid.
    Clue(ClueCell),
    /// A diagonal direction.
    Direction(Diagonal),
    /// A sum paired with the row or column clue it belongs to.
    SumClue {
        /// The sum.
        sum: u32,
        /// Where the sum is written.
        clue: ClueCell,
    },
}

impl Group {
    /// Returns the cell group, if this is one.
    #[must_use]
    pub fn as_cells(&self) -> Option<&CellGroup> {
        match self {
            Self::Cells(cells) => Some(cells),
            _ => None,
        }
    }
}

impl From<CellGroup> for Group {
    fn from(cells: CellGroup) -> Self {
        Self::Cells(cells)
    }
}

/// A constraint: its kind, leading scalars and groups.
///
/// Values are checked against the kind's [`Schema`](crate::Schema) only when
/// encoded; a decoded spec has already passed that check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConstraintSpec {
    /// The constraint kind.
    pub kind: ConstraintKind,
    /// Leading numeric arguments, such as a cage total.
    #[serde(default)]
    pub scalars: Vec<u32>,
    /// Group arguments in order.
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl ConstraintSpec {
    /// Creates a spec with no arguments.
    #[must_use]
    pub fn new(kind: ConstraintKind) -> Self {
        Self {
            kind,
            scalars: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Appends a leading scalar.
    #[must_use]
    pub fn with_scalar(mut self, value: u32) -> Self {
        self.scalars.push(value);
        self
    }

    /// Appends a group.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<Group>) -> Self {
        self.groups.push(group.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use sketchdoku_core::{CellAddress, GridSize};

    use super::*;

    #[test]
    fn test_diagonal_tokens() {
        assert_eq!("ur".parse::<Diagonal>(), Ok(Diagonal::UpRight));
        assert_eq!("Dl".parse::<Diagonal>(), Ok(Diagonal::DownLeft));
        assert!("XX".parse::<Diagonal>().is_err());
        assert!("U".parse::<Diagonal>().is_err());
    }

    #[test]
    fn test_builder() {
        let spec = ConstraintSpec::new(ConstraintKind::Killer)
            .with_scalar(10)
            .with_group(CellGroup::new(vec![CellAddress::new(0, 0)]));
        assert_eq!(spec.scalars, [10]);
        assert_eq!(spec.groups[0].as_cells().unwrap().len(), 1);
    }

    #[test]
    fn test_json_shape() {
        let clue = ClueCell::new(-1, 2, GridSize::NINE).unwrap();
        let spec = ConstraintSpec::new(ConstraintKind::LittleKiller)
            .with_group(Group::Value(23))
            .with_group(Group::Clue(clue))
            .with_group(Group::Direction(Diagonal::DownRight));
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "lk",
                "scalars": [],
                "groups": [
                    { "value": 23 },
                    { "clue": { "row": -1, "col": 2 } },
                    { "direction": "DR" },
                ],
            })
        );
        assert_eq!(serde_json::from_value::<ConstraintSpec>(json).unwrap(), spec);
    }
}
