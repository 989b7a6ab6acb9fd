//! DTOs for the external constraint classifier's response.
//!
//! The classifier is shown the drawings and answers with
//! `{"rules": [{"type": ..., "cells": [...], "total": ...}]}`, where each cell
//! is either a linear index (`row * N + col`) or a `[row, col]` pair, both
//! 0-based. Nothing in the response is trusted: a rule with an unknown type or
//! a bad cell fails on its own, and every other rule goes through the same
//! schema checks as any other constraint.

use serde::{Deserialize, Serialize};
use sketchdoku_core::{CellAddress, GridError, GridSize};

use crate::{CellGroup, Compiler, ConstraintKind, ConstraintSpec, GrammarError, Group};

/// Suffix the classifier appends to its type names, as in `KillerCageConstraint`.
const TYPE_SUFFIX: &str = "Constraint";

/// Classifier type names that differ from the grammar name, without the suffix.
const TYPE_ALIASES: [(&str, ConstraintKind); 7] = [
    ("ArrowSum", ConstraintKind::Arrow),
    ("KillerCage", ConstraintKind::Killer),
    ("Thermometer", ConstraintKind::Thermo),
    ("LittleKiller", ConstraintKind::LittleKiller),
    ("GermanWhispers", ConstraintKind::Whispers),
    ("AntiKing", ConstraintKind::King),
    ("AntiKnight", ConstraintKind::Knight),
];

/// The classifier's whole answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedRulesDto {
    /// One entry per recognized constraint.
    #[serde(default)]
    pub rules: Vec<ClassifiedRuleDto>,
}

/// One classified constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedRuleDto {
    /// Kind name, either the grammar name (`killer`) or the classifier's
    /// type name (`KillerCageConstraint`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Cells in the order the classifier listed them.
    #[serde(default)]
    pub cells: Vec<CellRefDto>,
    /// Optional total, used as the leading scalar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,
}

/// A cell reference in any of the forms the classifier may use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellRefDto {
    /// `row * N + col`.
    Linear(u64),
    /// `[row, col]`.
    Pair([i64; 2]),
    /// Anything else, such as a negative or fractional index. Kept so the
    /// rest of the response still deserializes.
    Unrecognized(serde_json::Value),
}

impl CellRefDto {
    /// Converts the reference into a cell address of an `size`x`size` grid.
    ///
    /// # Errors
    ///
    /// - [`GrammarError::CellOutOfBounds`] if the index or pair is off the grid
    /// - [`GrammarError::UnrecognizedCellReference`] for any other value
    pub fn to_cell(&self, size: GridSize) -> Result<CellAddress, GrammarError> {
        match self {
            Self::Linear(index) => {
                let index = usize::try_from(*index).unwrap_or(usize::MAX);
                Ok(CellAddress::from_linear(index, size)?)
            }
            Self::Pair([row, col]) => match (u8::try_from(*row), u8::try_from(*col)) {
                (Ok(row), Ok(col)) => Ok(CellAddress::checked(row, col, size)?),
                _ => Err(GridError::OutOfBounds {
                    row: saturate(*row),
                    col: saturate(*col),
                    size: size.get(),
                }
                .into()),
            },
            Self::Unrecognized(value) => {
                Err(GrammarError::UnrecognizedCellReference(value.to_string()))
            }
        }
    }
}

fn saturate(value: i64) -> i16 {
    i16::try_from(value).unwrap_or(if value < 0 { i16::MIN } else { i16::MAX })
}

/// Parses a classifier type name, ignoring ASCII case.
///
/// A trailing `Constraint` is dropped, then the name is looked up among the
/// aliases and finally among the grammar names.
fn parse_type_name(name: &str) -> Result<ConstraintKind, GrammarError> {
    let base = name
        .len()
        .checked_sub(TYPE_SUFFIX.len())
        .and_then(|at| Some((name.get(..at)?, name.get(at..)?)))
        .filter(|(_, suffix)| suffix.eq_ignore_ascii_case(TYPE_SUFFIX))
        .map_or(name, |(base, _)| base);
    if let Some((_, kind)) = TYPE_ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(base))
    {
        return Ok(*kind);
    }
    base.parse()
        .map_err(|_| GrammarError::UnknownConstraintKind(name.to_owned()))
}

impl ClassifiedRuleDto {
    /// Converts the rule into a constraint spec.
    ///
    /// The total becomes the only leading scalar. The cells form one group,
    /// except for arrows, whose first cell is the bulb and the rest the shaft,
    /// and clones, which are split into two equal halves.
    ///
    /// # Errors
    ///
    /// - [`GrammarError::UnknownConstraintKind`] if the type is not known
    /// - [`GrammarError::CellOutOfBounds`] or
    ///   [`GrammarError::UnrecognizedCellReference`] for the first bad cell
    pub fn to_spec(&self, size: GridSize) -> Result<ConstraintSpec, GrammarError> {
        let kind = parse_type_name(&self.kind)?;
        let cells = self
            .cells
            .iter()
            .map(|cell| cell.to_cell(size))
            .collect::<Result<Vec<_>, _>>()?;
        let groups = match kind {
            _ if cells.is_empty() => Vec::new(),
            ConstraintKind::Arrow => {
                let (bulb, shaft) = cells.split_at(1);
                [bulb, shaft]
                    .into_iter()
                    .filter(|part| !part.is_empty())
                    .map(|part| Group::Cells(CellGroup::new(part.to_vec())))
                    .collect()
            }
            ConstraintKind::Clone => {
                let (left, right) = cells.split_at(cells.len().div_ceil(2));
                vec![
                    Group::Cells(CellGroup::new(left.to_vec())),
                    Group::Cells(CellGroup::new(right.to_vec())),
                ]
            }
            _ => vec![Group::Cells(CellGroup::new(cells))],
        };
        Ok(ConstraintSpec {
            kind,
            scalars: self.total.into_iter().collect(),
            groups,
        })
    }
}

impl Compiler {
    /// Encodes every classified rule independently.
    ///
    /// The results are in rule order, so the caller can report and drop the
    /// rejected ones and keep the rest.
    #[must_use]
    pub fn compile_rules(&self, rules: &ClassifiedRulesDto) -> Vec<Result<String, GrammarError>> {
        rules
            .rules
            .iter()
            .map(|rule| self.encode(&rule.to_spec(self.size())?))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(json: &str) -> ClassifiedRulesDto {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_compile_rules() {
        let rules = rules(
            r#"{ "rules": [
                { "type": "killer", "cells": [0, 1, 9], "total": 10 },
                { "type": "thermo", "cells": [[0, 0], [0, 1], [0, 2]] },
                { "type": "arrow", "cells": [40, 41, 42] },
                { "type": "knight", "cells": [] },
                { "type": "clone", "cells": [0, 1, 79, 80] }
            ] }"#,
        );
        let compiled = Compiler::default().compile_rules(&rules);
        assert_eq!(
            compiled,
            [
                Ok("killer:10;R1C1R1C2R2C1".to_owned()),
                Ok("thermo:R1C1R1C2R1C3".to_owned()),
                Ok("arrow:R5C5;R5C6R5C7".to_owned()),
                Ok("knight".to_owned()),
                Ok("clone:R1C1R1C2;R9C8R9C9".to_owned()),
            ]
        );
    }

    #[test]
    fn test_classifier_type_names() {
        // The response shape shown to the classifier, without its trailing comma.
        let rules = rules(
            r#"{
              "rules": [
                {
                  "type": "ArrowSumConstraint",
                  "cells": [3,5]
                },
                {
                  "type": "ArrowSumConstraint",
                  "cells": [21,23]
                },
                {
                  "type": "KillerCageConstraint",
                  "cells": [[0,0],[0,1],[1,0]],
                  "total": null
                }
              ]
            }"#,
        );
        assert_eq!(
            Compiler::default().compile_rules(&rules),
            [
                Ok("arrow:R1C4;R1C6".to_owned()),
                Ok("arrow:R3C4;R3C6".to_owned()),
                Ok("killer:R1C1R1C2R2C1".to_owned()),
            ]
        );
    }

    #[test]
    fn test_parse_type_name() {
        for (name, kind) in [
            ("killercageconstraint", ConstraintKind::Killer),
            ("ThermometerConstraint", ConstraintKind::Thermo),
            ("RenbanConstraint", ConstraintKind::Renban),
            ("LittleKiller", ConstraintKind::LittleKiller),
            ("lk", ConstraintKind::LittleKiller),
            ("BetweenLineConstraint", ConstraintKind::BetweenLine),
        ] {
            assert_eq!(parse_type_name(name), Ok(kind), "{name}");
        }
        for name in ["Constraint", "XVConstraint", "arrowsumconstraints", ""] {
            assert_eq!(
                parse_type_name(name),
                Err(GrammarError::UnknownConstraintKind(name.to_owned())),
                "{name}"
            );
        }
    }

    #[test]
    fn test_bad_rules_fail_alone() {
        let rules = rules(
            r#"{ "rules": [
                { "type": "arrowsum", "cells": [0, 1] },
                { "type": "thermo", "cells": [0, 200] },
                { "type": "renban", "cells": [3, 4], "total": null },
                { "type": "thermo", "cells": [0, 1], "total": 5 },
                { "type": "thermo", "cells": [[0, 0], [-1, 2]] },
                { "type": "thermo", "cells": [[0, 0], [300, 2]] },
                { "type": "thermo", "cells": [0, 1.5] },
                { "type": "killer", "cells": [0, 1], "total": 3 }
            ] }"#,
        );
        let compiled = Compiler::default().compile_rules(&rules);
        assert_eq!(compiled.len(), 8);
        assert_eq!(compiled[0], Ok("arrow:R1C1;R1C2".to_owned()));
        assert_eq!(
            compiled[1],
            Err(GrammarError::CellOutOfBounds(GridError::IndexOutOfBounds {
                index: 200,
                size: 9
            }))
        );
        assert_eq!(compiled[2], Ok("renban:R1C4R1C5".to_owned()));
        assert!(compiled[3].as_ref().unwrap_err().is_schema_violation());
        assert_eq!(
            compiled[4],
            Err(GrammarError::CellOutOfBounds(GridError::OutOfBounds {
                row: -1,
                col: 2,
                size: 9
            }))
        );
        assert_eq!(
            compiled[5],
            Err(GrammarError::CellOutOfBounds(GridError::OutOfBounds {
                row: 300,
                col: 2,
                size: 9
            }))
        );
        assert_eq!(
            compiled[6],
            Err(GrammarError::UnrecognizedCellReference("1.5".to_owned()))
        );
        assert_eq!(compiled[7], Ok("killer:3;R1C1R1C2".to_owned()));
    }

    #[test]
    fn test_cell_refs() {
        let size = GridSize::NINE;
        assert_eq!(CellRefDto::Linear(80).to_cell(size), Ok(CellAddress::new(8, 8)));
        assert_eq!(CellRefDto::Pair([2, 3]).to_cell(size), Ok(CellAddress::new(2, 3)));
        assert!(CellRefDto::Linear(81).to_cell(size).unwrap_err().is_cell_out_of_bounds());
        assert!(
            CellRefDto::Linear(u64::MAX)
                .to_cell(size)
                .unwrap_err()
                .is_cell_out_of_bounds()
        );
        let refs: Vec<CellRefDto> = serde_json::from_str(r#"[5, [1, 2], -4, "R1C1"]"#).unwrap();
        assert_eq!(
            refs,
            [
                CellRefDto::Linear(5),
                CellRefDto::Pair([1, 2]),
                CellRefDto::Unrecognized((-4).into()),
                CellRefDto::Unrecognized("R1C1".into()),
            ]
        );
        assert_eq!(
            refs[3].to_cell(size),
            Err(GrammarError::UnrecognizedCellReference("\"R1C1\"".to_owned()))
        );
    }
}
