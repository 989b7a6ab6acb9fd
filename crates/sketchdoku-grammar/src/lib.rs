//! The constraint grammar: text expressions understood by the solving engine.
//!
//! An expression names a constraint kind and its arguments, for example
//! `killer:10;R1C1R1C2R2C1` (a killer cage summing to 10) or `lk:23;R0C3;DR`
//! (a little killer clue). This crate converts between that text and the typed
//! [`ConstraintSpec`], checking every argument against the kind's [`Schema`].
//!
//! # Overview
//!
//! - [`ConstraintKind`]: The closed set of 29 constraint kinds
//! - [`Schema`] and [`schema_for`]: The argument contract of each kind
//! - [`CellGroup`]: The `RxCy` cell addressing grammar (lists, ranges, numpad chains)
//! - [`Compiler`]: `encode`, `decode` and `resolve`, for one grid size
//! - [`ConstraintSpecDto`] and [`ClassifiedRulesDto`]: Untyped input from
//!   outside the crate
//!
//! # Examples
//!
//! ```
//! use sketchdoku_grammar::{ConstraintKind, GrammarError, decode, encode};
//!
//! let spec = decode("thermo:R1C1R1C2R1C3")?;
//! assert_eq!(spec.kind, ConstraintKind::Thermo);
//! assert_eq!(spec.groups.len(), 1);
//! assert_eq!(encode(&spec)?, "thermo:R1C1R1C2R1C3");
//!
//! assert!(decode("thermo:R1C1").unwrap_err().is_schema_violation());
//! assert!(decode("thermo:R5-2C3").unwrap_err().is_malformed_cell_group());
//! # Ok::<(), GrammarError>(())
//! ```

mod cell_group;
mod classified_rules_dto;
mod compiler;
mod constraint_spec_dto;
mod error;
mod kind;
mod schema;
mod spec;

pub use self::{
    cell_group::CellGroup,
    classified_rules_dto::{CellRefDto, ClassifiedRuleDto, ClassifiedRulesDto},
    compiler::{Compiler, EncodeOptions},
    constraint_spec_dto::ConstraintSpecDto,
    error::{Axis, CellGroupError, GrammarError, SchemaViolation, Violation},
    kind::ConstraintKind,
    schema::{Arity, CrossRule, GroupShape, Leading, Repeat, Schema, schema_for, schema_for_name},
    spec::{ConstraintSpec, Diagonal, Group},
};

/// Encodes `spec` for a 9x9 grid in canonical form.
///
/// # Errors
///
/// See [`Compiler::encode`].
pub fn encode(spec: &ConstraintSpec) -> Result<String, GrammarError> {
    Compiler::default().encode(spec)
}

/// Decodes an expression for a 9x9 grid.
///
/// # Errors
///
/// See [`Compiler::decode`].
pub fn decode(text: &str) -> Result<ConstraintSpec, GrammarError> {
    Compiler::default().decode(text)
}
