//! Cell group text: the `RxCy` addressing grammar.
//!
//! A group is a concatenation of segments:
//!
//! ```text
//! segment := 'R' axis 'C' axis ('D' move+)?
//! axis    := item (',' item)*
//! item    := number ('-' number)?
//! ```
//!
//! Numbers are 1-based and letters are case-insensitive. A segment expands to
//! the row-major cross product of its row and column items, in the order they
//! are listed. A segment with a single row and a single column may be followed
//! by numpad moves (`1`-`4`, `6`-`9`), each one adding the cell one step away
//! from the previous one.

use std::{
    collections::HashSet,
    fmt::{self, Display, Write as _},
};

use serde::{Deserialize, Serialize};
use sketchdoku_core::{CellAddress, GridSize, NumpadMove};

use crate::{Axis, CellGroupError};

/// An ordered sequence of cells addressed by one group of an expression.
///
/// A cell may appear more than once only if every repeat is a single numpad
/// move away from the cell before it; [`CellGroup::parse`] enforces this and
/// the compiler checks it before encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellGroup(Vec<CellAddress>);

impl CellGroup {
    /// Creates a group from cells in order.
    #[must_use]
    pub fn new(cells: Vec<CellAddress>) -> Self {
        Self(cells)
    }

    /// Returns the cells in order.
    #[must_use]
    pub fn cells(&self) -> &[CellAddress] {
        &self.0
    }

    /// Returns the number of cells, counting repeats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the group has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the cells in order.
    pub fn iter(&self) -> impl Iterator<Item = &CellAddress> {
        self.0.iter()
    }

    /// Returns `true` if any cell appears more than once.
    #[must_use]
    pub fn has_repeats(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.0.len());
        !self.0.iter().all(|cell| seen.insert(*cell))
    }

    /// Returns the first repeated cell that is not one numpad move away from
    /// its predecessor, if any.
    #[must_use]
    pub fn unreachable_repeat(&self) -> Option<CellAddress> {
        let mut seen = HashSet::with_capacity(self.0.len());
        let mut prev: Option<CellAddress> = None;
        for &cell in &self.0 {
            if !seen.insert(cell) && prev.and_then(|p| p.move_to(cell)).is_none() {
                return Some(cell);
            }
            prev = Some(cell);
        }
        None
    }

    /// Parses group text for a grid of the given size.
    ///
    /// # Errors
    ///
    /// Returns a [`CellGroupError`] describing the first problem found.
    ///
    /// # Examples
    ///
    /// ```
    /// use sketchdoku_core::{CellAddress, GridSize};
    /// use sketchdoku_grammar::{CellGroup, CellGroupError};
    ///
    /// let group = CellGroup::parse("r1-2c3,1", GridSize::NINE)?;
    /// assert_eq!(group.to_string(), "R1C3R1C1R2C3R2C1");
    ///
    /// let chain = CellGroup::parse("R5C5D62", GridSize::NINE)?;
    /// assert_eq!(chain.cells()[2], CellAddress::new(5, 5));
    /// # Ok::<(), CellGroupError>(())
    /// ```
    pub fn parse(text: &str, size: GridSize) -> Result<Self, CellGroupError> {
        let mut parser = Parser::new(text, size)?;
        let mut cells = Vec::new();
        let mut seen = HashSet::new();

        while !parser.at_end() {
            let segment = parser.segment()?;
            if segment.moves.is_empty() {
                for &row in &segment.rows {
                    for &col in &segment.cols {
                        push_first_use(&mut cells, &mut seen, CellAddress::new(row, col))?;
                    }
                }
                continue;
            }

            let (&[row], &[col]) = (segment.rows.as_slice(), segment.cols.as_slice()) else {
                return Err(CellGroupError::ChainWithoutBase);
            };
            if !segment.single {
                return Err(CellGroupError::ChainWithoutBase);
            }
            let mut current = CellAddress::new(row, col);
            push_first_use(&mut cells, &mut seen, current)?;
            for digit in segment.moves {
                let dir = NumpadMove::from_digit(digit).ok_or(CellGroupError::InvalidMove { digit })?;
                current = current
                    .step(dir, size)
                    .ok_or(CellGroupError::MoveLeavesGrid {
                        from: current,
                        digit,
                    })?;
                seen.insert(current);
                cells.push(current);
            }
        }
        Ok(Self(cells))
    }

    /// Renders the group as text.
    ///
    /// Groups with repeated cells are rendered with numpad chains. Other groups
    /// use one `RxCy` per cell, or with `compact` the shortest run of range and
    /// list segments that enumerates the same cells in the same order.
    #[must_use]
    pub fn to_text(&self, compact: bool) -> String {
        let mut out = String::new();
        if self.has_repeats() {
            self.write_chains(&mut out);
        } else if compact {
            self.write_compact(&mut out);
        } else {
            for cell in &self.0 {
                let _ = write!(out, "{cell}");
            }
        }
        out
    }

    fn write_chains(&self, out: &mut String) {
        let mut cells = self.0.iter().copied().peekable();
        while let Some(base) = cells.next() {
            let _ = write!(out, "{base}");
            let mut current = base;
            let mut moves = String::new();
            while let Some(&next) = cells.peek()
                && let Some(dir) = current.move_to(next)
            {
                moves.push(char::from(b'0' + dir.digit()));
                current = next;
                cells.next();
            }
            if !moves.is_empty() {
                out.push('D');
                out.push_str(&moves);
            }
        }
    }

    fn write_compact(&self, out: &mut String) {
        let mut rest = self.0.as_slice();
        while !rest.is_empty() {
            let len = longest_cross_product(rest);
            let (chunk, tail) = rest.split_at(len);
            let (rows, cols) = distinct_axes(chunk);
            out.push('R');
            write_axis(out, &rows);
            out.push('C');
            write_axis(out, &cols);
            rest = tail;
        }
    }
}

impl Display for CellGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text(false))
    }
}

impl From<Vec<CellAddress>> for CellGroup {
    fn from(cells: Vec<CellAddress>) -> Self {
        Self(cells)
    }
}

impl FromIterator<CellAddress> for CellGroup {
    fn from_iter<T: IntoIterator<Item = CellAddress>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a CellGroup {
    type Item = &'a CellAddress;
    type IntoIter = std::slice::Iter<'a, CellAddress>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn push_first_use(
    cells: &mut Vec<CellAddress>,
    seen: &mut HashSet<CellAddress>,
    cell: CellAddress,
) -> Result<(), CellGroupError> {
    if !seen.insert(cell) {
        return Err(CellGroupError::DuplicateCell { cell });
    }
    cells.push(cell);
    Ok(())
}

/// Rows and columns of `cells` in order of first appearance.
fn distinct_axes(cells: &[CellAddress]) -> (Vec<u8>, Vec<u8>) {
    let mut rows = Vec::new();
    let mut cols = Vec::new();
    for cell in cells {
        if !rows.contains(&cell.row()) {
            rows.push(cell.row());
        }
        if !cols.contains(&cell.col()) {
            cols.push(cell.col());
        }
    }
    (rows, cols)
}

/// Length of the longest prefix of `cells` that is exactly the row-major cross
/// product of its own rows and columns.
fn longest_cross_product(cells: &[CellAddress]) -> usize {
    let mut best = 1;
    let mut rows = Vec::new();
    let mut cols = Vec::new();
    for (len, cell) in (1..).zip(cells) {
        if !rows.contains(&cell.row()) {
            rows.push(cell.row());
        }
        if !cols.contains(&cell.col()) {
            cols.push(cell.col());
        }
        if rows.len() * cols.len() != len {
            continue;
        }
        let is_product = cells[..len].iter().enumerate().all(|(i, c)| {
            c.row() == rows[i / cols.len()] && c.col() == cols[i % cols.len()]
        });
        if is_product {
            best = len;
        }
    }
    best
}

/// Writes 0-based axis values as 1-based text, folding ascending runs of three
/// or more into `a-b`.
fn write_axis(out: &mut String, values: &[u8]) {
    let mut i = 0;
    while i < values.len() {
        if i > 0 {
            out.push(',');
        }
        let mut end = i;
        while end + 1 < values.len() && values[end + 1] == values[end] + 1 {
            end += 1;
        }
        if end - i >= 2 {
            let _ = write!(out, "{}-{}", values[i] + 1, values[end] + 1);
            i = end + 1;
        } else {
            let _ = write!(out, "{}", values[i] + 1);
            i += 1;
        }
    }
}

/// Parses a single `RxCy` whose numerals may fall outside the grid, returning
/// them as written.
pub(crate) fn parse_clue_numerals(text: &str, size: GridSize) -> Result<(u32, u32), CellGroupError> {
    let mut parser = Parser::new(text, size)?;
    parser.expect(b'R')?;
    let row = parser.number()?;
    parser.expect(b'C')?;
    let col = parser.number()?;
    if !parser.at_end() {
        return Err(parser.unexpected());
    }
    Ok((row, col))
}

struct Segment {
    rows: Vec<u8>,
    cols: Vec<u8>,
    single: bool,
    moves: Vec<u8>,
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
    size: GridSize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str, size: GridSize) -> Result<Self, CellGroupError> {
        if text.is_empty() {
            return Err(CellGroupError::Empty);
        }
        if let Some((offset, found)) = text.char_indices().find(|(_, c)| !c.is_ascii()) {
            return Err(CellGroupError::UnexpectedChar { offset, found });
        }
        Ok(Self {
            bytes: text.as_bytes(),
            pos: 0,
            size,
        })
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn unexpected(&self) -> CellGroupError {
        match self.peek() {
            Some(b) => CellGroupError::UnexpectedChar {
                offset: self.pos,
                found: char::from(b),
            },
            None => CellGroupError::UnexpectedEnd,
        }
    }

    fn eat(&mut self, letter: u8) -> bool {
        if self.peek().is_some_and(|b| b.eq_ignore_ascii_case(&letter)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, letter: u8) -> Result<(), CellGroupError> {
        if self.eat(letter) {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn number(&mut self) -> Result<u32, CellGroupError> {
        let start = self.pos;
        let mut value: u32 = 0;
        while let Some(b) = self.peek()
            && b.is_ascii_digit()
        {
            value = value.saturating_mul(10).saturating_add(u32::from(b - b'0'));
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.unexpected());
        }
        Ok(value)
    }

    fn index(&self, axis: Axis, value: u32) -> Result<u8, CellGroupError> {
        if value == 0 || value > u32::from(self.size.get()) {
            return Err(CellGroupError::OutOfRange {
                axis,
                value,
                size: self.size,
            });
        }
        #[expect(clippy::cast_possible_truncation)]
        Ok((value - 1) as u8)
    }

    /// Parses one axis; the flag is `true` if it named a single number.
    fn axis(&mut self, axis: Axis) -> Result<(Vec<u8>, bool), CellGroupError> {
        let mut values = Vec::new();
        let mut single = true;
        loop {
            let start = self.number()?;
            let end = if self.eat(b'-') {
                single = false;
                self.number()?
            } else {
                start
            };
            let first = self.index(axis, start)?;
            let last = self.index(axis, end)?;
            if first > last {
                return Err(CellGroupError::DescendingRange { axis, start, end });
            }
            values.extend(first..=last);
            if !self.eat(b',') {
                break;
            }
            single = false;
        }
        Ok((values, single))
    }

    fn segment(&mut self) -> Result<Segment, CellGroupError> {
        self.expect(b'R')?;
        let (rows, single_row) = self.axis(Axis::Row)?;
        self.expect(b'C')?;
        let (cols, single_col) = self.axis(Axis::Column)?;
        let mut moves = Vec::new();
        if self.eat(b'D') {
            while let Some(b) = self.peek()
                && b.is_ascii_digit()
            {
                moves.push(b - b'0');
                self.pos += 1;
            }
            if moves.is_empty() {
                return Err(self.unexpected());
            }
        }
        Ok(Segment {
            rows,
            cols,
            single: single_row && single_col,
            moves,
        })
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn cell(row: u8, col: u8) -> CellAddress {
        CellAddress::new(row, col)
    }

    fn parse(text: &str) -> Result<CellGroup, CellGroupError> {
        CellGroup::parse(text, GridSize::NINE)
    }

    #[test]
    fn test_single_and_list() {
        assert_eq!(parse("R1C1").unwrap().cells(), [cell(0, 0)]);
        assert_eq!(
            parse("R1C1r1c2R2C1").unwrap().cells(),
            [cell(0, 0), cell(0, 1), cell(1, 0)]
        );
    }

    #[test]
    fn test_ranges_and_lists_are_row_major() {
        assert_eq!(
            parse("R1-2C1-2").unwrap().cells(),
            [cell(0, 0), cell(0, 1), cell(1, 0), cell(1, 1)]
        );
        assert_eq!(
            parse("R3,1C5").unwrap().cells(),
            [cell(2, 4), cell(0, 4)]
        );
        assert_eq!(
            parse("R1C9,1-2").unwrap().cells(),
            [cell(0, 8), cell(0, 0), cell(0, 1)]
        );
    }

    #[test]
    fn test_numpad_chain() {
        assert_eq!(
            parse("R2C2D236").unwrap().cells(),
            [cell(1, 1), cell(2, 1), cell(3, 2), cell(3, 3)]
        );
        // Back and forth repeats cells through moves only.
        assert_eq!(
            parse("R1C1D64").unwrap().cells(),
            [cell(0, 0), cell(0, 1), cell(0, 0)]
        );
    }

    #[test]
    fn test_rejections() {
        assert_eq!(
            parse("R5-2C3"),
            Err(CellGroupError::DescendingRange {
                axis: Axis::Row,
                start: 5,
                end: 2
            })
        );
        assert_eq!(
            parse("R0C1"),
            Err(CellGroupError::OutOfRange {
                axis: Axis::Row,
                value: 0,
                size: GridSize::NINE
            })
        );
        assert_eq!(
            parse("R1C10"),
            Err(CellGroupError::OutOfRange {
                axis: Axis::Column,
                value: 10,
                size: GridSize::NINE
            })
        );
        assert_eq!(parse("R1C1D5"), Err(CellGroupError::InvalidMove { digit: 5 }));
        assert_eq!(parse("R1C1D0"), Err(CellGroupError::InvalidMove { digit: 0 }));
        assert_eq!(
            parse("R1C1D8"),
            Err(CellGroupError::MoveLeavesGrid {
                from: cell(0, 0),
                digit: 8
            })
        );
        assert_eq!(parse("R1-2C1D2"), Err(CellGroupError::ChainWithoutBase));
        assert_eq!(
            parse("R1C1R1C1"),
            Err(CellGroupError::DuplicateCell { cell: cell(0, 0) })
        );
        assert_eq!(parse(""), Err(CellGroupError::Empty));
        assert_eq!(parse("R1"), Err(CellGroupError::UnexpectedEnd));
        assert_eq!(parse("R1C"), Err(CellGroupError::UnexpectedEnd));
        assert_eq!(parse("R1C1D"), Err(CellGroupError::UnexpectedEnd));
        assert_eq!(
            parse("X1C1"),
            Err(CellGroupError::UnexpectedChar {
                offset: 0,
                found: 'X'
            })
        );
        assert_eq!(
            parse("R1Cé"),
            Err(CellGroupError::UnexpectedChar {
                offset: 3,
                found: 'é'
            })
        );
    }

    #[test]
    fn test_size_bounds() {
        let size = GridSize::new(4).unwrap();
        assert!(CellGroup::parse("R4C4", size).is_ok());
        assert!(CellGroup::parse("R5C4", size).unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_canonical_text() {
        let group = CellGroup::new(vec![cell(0, 0), cell(0, 1), cell(1, 0)]);
        assert_eq!(group.to_text(false), "R1C1R1C2R2C1");
        assert_eq!(group.to_string(), "R1C1R1C2R2C1");
    }

    #[test]
    fn test_compact_text() {
        let square: CellGroup = (0..3).flat_map(|r| (0..3).map(move |c| cell(r, c))).collect();
        assert_eq!(square.to_text(true), "R1-3C1-3");

        let column = CellGroup::new(vec![cell(0, 4), cell(2, 4)]);
        assert_eq!(column.to_text(true), "R1,3C5");

        let ell = CellGroup::new(vec![cell(0, 0), cell(0, 1), cell(1, 0)]);
        assert_eq!(ell.to_text(true), "R1C1,2R2C1");
    }

    #[test]
    fn test_repeats_render_as_chains() {
        let group = CellGroup::new(vec![cell(0, 0), cell(0, 1), cell(0, 0), cell(4, 4)]);
        assert!(group.has_repeats());
        assert_eq!(group.unreachable_repeat(), None);
        assert_eq!(group.to_text(false), "R1C1D64R5C5");
        assert_eq!(group.to_text(true), "R1C1D64R5C5");

        let broken = CellGroup::new(vec![cell(0, 0), cell(4, 4), cell(0, 0)]);
        assert_eq!(broken.unreachable_repeat(), Some(cell(0, 0)));
    }

    #[test]
    fn test_clue_numerals() {
        assert_eq!(parse_clue_numerals("R0C3", GridSize::NINE), Ok((0, 3)));
        assert_eq!(parse_clue_numerals("r10c10", GridSize::NINE), Ok((10, 10)));
        assert_eq!(
            parse_clue_numerals("R0C3R1C1", GridSize::NINE),
            Err(CellGroupError::UnexpectedChar {
                offset: 4,
                found: 'R'
            })
        );
        assert_eq!(
            parse_clue_numerals("R0-1C3", GridSize::NINE),
            Err(CellGroupError::UnexpectedChar {
                offset: 2,
                found: '-'
            })
        );
    }

    fn distinct_group() -> impl Strategy<Value = CellGroup> {
        prop::collection::vec((0u8..9, 0u8..9), 1..20).prop_map(|pairs| {
            let mut seen = HashSet::new();
            pairs
                .into_iter()
                .map(|(r, c)| cell(r, c))
                .filter(|c| seen.insert(*c))
                .collect()
        })
    }

    fn walk() -> impl Strategy<Value = CellGroup> {
        (0u8..9, 0u8..9, prop::collection::vec(0usize..8, 0..24)).prop_map(|(r, c, dirs)| {
            let mut current = cell(r, c);
            let mut cells = vec![current];
            for dir in dirs {
                if let Some(next) = current.step(NumpadMove::ALL[dir], GridSize::NINE) {
                    current = next;
                    cells.push(next);
                }
            }
            CellGroup::new(cells)
        })
    }

    proptest! {
        #[test]
        fn text_parses_back(group in distinct_group(), compact in any::<bool>()) {
            let text = group.to_text(compact);
            prop_assert_eq!(parse(&text).unwrap(), group);
        }

        #[test]
        fn walks_parse_back(group in walk()) {
            prop_assert_eq!(group.unreachable_repeat(), None);
            let text = group.to_text(false);
            prop_assert_eq!(parse(&text).unwrap(), group);
        }
    }
}
