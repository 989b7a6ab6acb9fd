//! Encoding and decoding of constraint expressions.

use std::fmt::Write as _;

use sketchdoku_core::{ClueCell, GridSize};

use crate::{
    CellGroup, ConstraintKind, ConstraintSpec, ConstraintSpecDto, CrossRule, Diagonal,
    GrammarError, Group, GroupShape, Schema, SchemaViolation, Violation,
    cell_group::parse_clue_numerals, schema_for,
};

/// Options that change how [`Compiler::encode`] renders cell groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Fold cell groups into range and list segments where possible.
    pub compact: bool,
}

/// Encodes and decodes constraint expressions for one grid size.
///
/// Every expression passes through the kind's [`Schema`] in both directions,
/// so for any spec `encode` accepts, `decode(encode(spec)) == spec`.
///
/// # Examples
///
/// ```
/// use sketchdoku_core::GridSize;
/// use sketchdoku_grammar::{Compiler, EncodeOptions, GrammarError};
///
/// let compiler = Compiler::new(GridSize::NINE, EncodeOptions { compact: true });
/// let spec = compiler.decode("killer:15;R1C1R1C2R1C3R2C1R2C2R2C3")?;
/// assert_eq!(compiler.encode(&spec)?, "killer:15;R1,2C1-3");
/// # Ok::<(), GrammarError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Compiler {
    size: GridSize,
    options: EncodeOptions,
}

impl Compiler {
    /// Creates a compiler for an `size`x`size` grid.
    #[must_use]
    pub const fn new(size: GridSize, options: EncodeOptions) -> Self {
        Self { size, options }
    }

    /// Returns the grid size.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Returns the encoding options.
    #[must_use]
    pub const fn options(&self) -> EncodeOptions {
        self.options
    }

    /// Checks `spec` against the schema of its kind.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaViolation`] found.
    pub fn validate(&self, spec: &ConstraintSpec) -> Result<(), SchemaViolation> {
        let cx = Context::new(spec.kind, spec.groups.len(), self.size);
        cx.check_counts(spec.scalars.len())?;
        for (index, group) in spec.groups.iter().enumerate() {
            cx.check_group(index, group)?;
        }
        if cx.schema.cross == CrossRule::EqualLengths {
            let mut lengths = spec.groups.iter().filter_map(Group::as_cells).map(CellGroup::len);
            if let Some(first) = lengths.next()
                && lengths.any(|len| len != first)
            {
                return Err(cx.violation(Violation::UnequalLengths));
            }
        }
        Ok(())
    }

    /// Renders `spec` as `kind[:arg1[;arg2...]]`.
    ///
    /// Leading scalars come first, then the groups. The `:` is omitted when
    /// there are no arguments.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::SchemaViolation`] if `spec` does not fit its
    /// kind's schema.
    pub fn encode(&self, spec: &ConstraintSpec) -> Result<String, GrammarError> {
        self.validate(spec)?;

        let mut out = String::from(spec.kind.name());
        let mut sep = ':';
        for scalar in &spec.scalars {
            out.push(sep);
            let _ = write!(out, "{scalar}");
            sep = ';';
        }
        for group in &spec.groups {
            out.push(sep);
            self.write_group(&mut out, group);
            sep = ';';
        }
        Ok(out)
    }

    fn write_group(&self, out: &mut String, group: &Group) {
        let _ = match group {
            Group::Cells(cells) => write!(out, "{}", cells.to_text(self.options.compact)),
            Group::Value(value) => write!(out, "{value}"),
            Group::Clue(clue) => write!(out, "{clue}"),
            Group::Direction(dir) => write!(out, "{dir}"),
            Group::SumClue { sum, clue } => write!(out, "{sum}{clue}"),
        };
    }

    /// Parses an expression.
    ///
    /// The text before the first `:` names the kind. The rest is split on
    /// `;` (a backslash escapes the next character). The run of numeric
    /// arguments at the start is taken as the leading scalars, unless the
    /// first group is itself a number, in which case only as many as the
    /// schema allows are. Every remaining argument is parsed as the group
    /// shape its position calls for.
    ///
    /// # Errors
    ///
    /// - [`GrammarError::MalformedExpression`] if the text is not shaped like
    ///   an expression
    /// - [`GrammarError::UnknownConstraintKind`] if the kind is not known
    /// - [`GrammarError::MalformedCellGroup`] if a cell group does not parse
    /// - [`GrammarError::SchemaViolation`] if the arguments do not fit the kind
    pub fn decode(&self, text: &str) -> Result<ConstraintSpec, GrammarError> {
        let (name, args) = match text.split_once(':') {
            Some((name, args)) => (name, Some(args)),
            None => (text, None),
        };
        if name.is_empty() || !name.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(GrammarError::malformed(
                text,
                "expected an alphanumeric constraint kind",
            ));
        }
        let kind = name.parse::<ConstraintKind>()?;
        let tokens = match args {
            Some(args) => split_arguments(text, args)?,
            None => Vec::new(),
        };

        let schema = schema_for(kind);
        let numeric = tokens.iter().take_while(|token| is_number(token)).count();
        let leading = match schema.shape_at(0) {
            Some(GroupShape::Value | GroupShape::Digit) => numeric.min(schema.leading.max),
            _ => numeric,
        };
        let (scalar_tokens, group_tokens) = tokens.split_at(leading);

        let cx = Context::new(kind, group_tokens.len(), self.size);
        cx.check_counts(leading)?;
        let scalars = scalar_tokens
            .iter()
            .map(|token| parse_number(token))
            .collect::<Result<Vec<_>, _>>()?;
        let groups = group_tokens
            .iter()
            .enumerate()
            .map(|(index, token)| cx.parse_group(index, token))
            .collect::<Result<Vec<_>, _>>()?;

        let spec = ConstraintSpec {
            kind,
            scalars,
            groups,
        };
        self.validate(&spec)?;
        Ok(spec)
    }

    /// Builds a spec from untyped group texts, such as those supplied by an
    /// external classifier.
    ///
    /// Each group is given as pieces that are concatenated before parsing,
    /// so `["R1C1", "R1C2"]` and `["R1C1R1C2"]` are the same group.
    ///
    /// # Errors
    ///
    /// Fails like [`Compiler::decode`].
    pub fn resolve(&self, dto: &ConstraintSpecDto) -> Result<ConstraintSpec, GrammarError> {
        let kind = dto.kind.parse::<ConstraintKind>()?;
        let cx = Context::new(kind, dto.groups.len(), self.size);
        cx.check_counts(dto.scalars.len())?;
        let groups = dto
            .groups
            .iter()
            .enumerate()
            .map(|(index, pieces)| cx.parse_group(index, &pieces.concat()))
            .collect::<Result<Vec<_>, _>>()?;

        let spec = ConstraintSpec {
            kind,
            scalars: dto.scalars.clone(),
            groups,
        };
        self.validate(&spec)?;
        Ok(spec)
    }
}

/// Schema lookups for one constraint being checked.
struct Context {
    schema: &'static Schema,
    actual: usize,
    size: GridSize,
}

impl Context {
    fn new(kind: ConstraintKind, actual: usize, size: GridSize) -> Self {
        Self {
            schema: schema_for(kind),
            actual,
            size,
        }
    }

    fn violation(&self, violation: Violation) -> SchemaViolation {
        SchemaViolation {
            kind: self.schema.kind,
            expected: self.schema.arity(),
            actual: self.actual,
            violation,
        }
    }

    fn reject(&self, violation: Violation) -> GrammarError {
        self.violation(violation).into()
    }

    fn check_counts(&self, leading: usize) -> Result<(), SchemaViolation> {
        if !self.schema.leading.accepts(leading) {
            return Err(self.violation(Violation::LeadingCount {
                expected: self.schema.leading,
                actual: leading,
            }));
        }
        if !self.schema.arity().accepts(self.actual) {
            return Err(self.violation(Violation::GroupCount));
        }
        Ok(())
    }

    fn shape_at(&self, index: usize) -> Result<GroupShape, SchemaViolation> {
        self.schema
            .shape_at(index)
            .ok_or_else(|| self.violation(Violation::GroupCount))
    }

    fn check_clue(&self, index: usize, clue: ClueCell) -> Result<(), SchemaViolation> {
        if ClueCell::new(clue.row(), clue.col(), self.size).is_err() {
            return Err(self.violation(Violation::ClueNotOnBorder { index }));
        }
        Ok(())
    }

    fn check_group(&self, index: usize, group: &Group) -> Result<(), SchemaViolation> {
        let shape = self.shape_at(index)?;
        match (shape, group) {
            (GroupShape::Cells { min_len }, Group::Cells(cells)) => {
                if cells.len() < min_len {
                    return Err(self.violation(Violation::TooFewCells {
                        index,
                        min: min_len,
                        actual: cells.len(),
                    }));
                }
                if let Some(&cell) = cells.iter().find(|cell| !cell.is_within(self.size)) {
                    return Err(self.violation(Violation::CellOutsideGrid {
                        index,
                        cell,
                        size: self.size,
                    }));
                }
                if let Some(cell) = cells.unreachable_repeat() {
                    return Err(self.violation(Violation::UnreachableRepeat { index, cell }));
                }
            }
            (GroupShape::Value, Group::Value(_)) | (GroupShape::Direction, Group::Direction(_)) => {}
            (GroupShape::Digit, Group::Value(value)) => {
                if !(1..=u32::from(self.size.get())).contains(value) {
                    return Err(self.violation(Violation::DigitOutOfRange {
                        index,
                        value: *value,
                        size: self.size,
                    }));
                }
            }
            (GroupShape::Clue, Group::Clue(clue)) => self.check_clue(index, *clue)?,
            (GroupShape::SumClue, Group::SumClue { clue, .. }) => {
                self.check_clue(index, *clue)?;
                if clue.is_corner(self.size) {
                    return Err(self.violation(Violation::CornerClue { index }));
                }
            }
            _ => {
                return Err(self.violation(Violation::GroupShape {
                    index,
                    expected: shape,
                }));
            }
        }
        Ok(())
    }

    fn parse_group(&self, index: usize, token: &str) -> Result<Group, GrammarError> {
        let shape = self.shape_at(index)?;
        let wrong_shape = || {
            self.reject(Violation::GroupShape {
                index,
                expected: shape,
            })
        };
        match shape {
            GroupShape::Cells { .. } if starts_with_row(token) => CellGroup::parse(token, self.size)
                .map(Group::Cells)
                .map_err(|err| GrammarError::cell_group(token, err)),
            GroupShape::Value | GroupShape::Digit if is_number(token) => {
                parse_number(token).map(Group::Value)
            }
            GroupShape::Clue if starts_with_row(token) => {
                self.parse_clue(index, token).map(Group::Clue)
            }
            GroupShape::Direction => token.parse::<Diagonal>().map(Group::Direction).map_err(|()| {
                self.reject(Violation::InvalidDirection {
                    index,
                    found: token.to_owned(),
                })
            }),
            GroupShape::SumClue => {
                let digits = token.bytes().take_while(u8::is_ascii_digit).count();
                let (sum, clue) = token.split_at(digits);
                if sum.is_empty() || !starts_with_row(clue) {
                    return Err(wrong_shape());
                }
                Ok(Group::SumClue {
                    sum: parse_number(sum)?,
                    clue: self.parse_clue(index, clue)?,
                })
            }
            _ => Err(wrong_shape()),
        }
    }

    fn parse_clue(&self, index: usize, token: &str) -> Result<ClueCell, GrammarError> {
        let (row, col) =
            parse_clue_numerals(token, self.size).map_err(|err| GrammarError::cell_group(token, err))?;
        let to_index = |value: u32| i8::try_from(i64::from(value) - 1).ok();
        to_index(row)
            .zip(to_index(col))
            .and_then(|(row, col)| ClueCell::new(row, col, self.size).ok())
            .ok_or_else(|| self.reject(Violation::ClueNotOnBorder { index }))
    }
}

fn starts_with_row(token: &str) -> bool {
    token.bytes().next().is_some_and(|b| b.eq_ignore_ascii_case(&b'R'))
}

fn is_number(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

fn parse_number(token: &str) -> Result<u32, GrammarError> {
    token
        .parse()
        .map_err(|_| GrammarError::malformed(token, "number is too large"))
}

/// Splits the argument list on unescaped `;` and checks every argument's
/// character set.
fn split_arguments(text: &str, args: &str) -> Result<Vec<String>, GrammarError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut chars = args.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let escaped = chars
                    .next()
                    .ok_or_else(|| GrammarError::malformed(text, "dangling escape"))?;
                current.push(escaped);
            }
            ';' => tokens.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    tokens.push(current);

    for token in &tokens {
        if token.is_empty() {
            return Err(GrammarError::malformed(text, "empty argument"));
        }
        if !token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ',' || c == '-')
        {
            return Err(GrammarError::malformed(text, "unexpected character in argument"));
        }
    }
    Ok(tokens)
}
