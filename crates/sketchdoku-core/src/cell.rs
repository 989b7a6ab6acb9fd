//! Cell addresses and single-step moves.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::{GridError, GridSize};

/// A cell inside the grid, identified by its 0-based row and column.
///
/// A `CellAddress` does not know the size of the grid it belongs to; bounds are
/// checked by the constructors that take a [`GridSize`].
///
/// The [`Display`] form is the 1-based `RxCy` notation used by the constraint grammar.
///
/// # Examples
///
/// ```
/// use sketchdoku_core::{CellAddress, GridSize};
///
/// let cell = CellAddress::checked(0, 2, GridSize::NINE)?;
/// assert_eq!(cell.to_string(), "R1C3");
/// assert_eq!(cell.to_linear(GridSize::NINE), 2);
/// assert_eq!(CellAddress::from_linear(80, GridSize::NINE)?, CellAddress::new(8, 8));
/// # Ok::<(), sketchdoku_core::GridError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellAddress {
    row: u8,
    col: u8,
}

impl CellAddress {
    /// Creates a cell address without checking it against a grid size.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Creates a cell address that is guaranteed to lie inside a grid of `size`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if `row` or `col` is not below `size`.
    pub fn checked(row: u8, col: u8, size: GridSize) -> Result<Self, GridError> {
        let cell = Self::new(row, col);
        if cell.is_within(size) {
            Ok(cell)
        } else {
            Err(GridError::OutOfBounds {
                row: i16::from(row),
                col: i16::from(col),
                size: size.get(),
            })
        }
    }

    /// Converts a row-major linear index (`row * N + col`) into a cell address.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::IndexOutOfBounds`] if `index` is not below `N * N`.
    pub fn from_linear(index: usize, size: GridSize) -> Result<Self, GridError> {
        if index >= size.cell_count() {
            return Err(GridError::IndexOutOfBounds {
                index,
                size: size.get(),
            });
        }
        let n = usize::from(size.get());
        #[expect(clippy::cast_possible_truncation)]
        Ok(Self::new((index / n) as u8, (index % n) as u8))
    }

    /// Returns the row-major linear index (`row * N + col`) of this cell.
    #[must_use]
    pub fn to_linear(self, size: GridSize) -> usize {
        usize::from(self.row) * usize::from(size.get()) + usize::from(self.col)
    }

    /// Returns the 0-based row.
    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the 0-based column.
    #[must_use]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Returns `true` if this cell lies inside a grid of `size`.
    #[must_use]
    pub const fn is_within(self, size: GridSize) -> bool {
        self.row < size.get() && self.col < size.get()
    }

    /// Returns the cell one numpad step away, or `None` if the step leaves the grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use sketchdoku_core::{CellAddress, GridSize, NumpadMove};
    ///
    /// let cell = CellAddress::new(0, 0);
    /// assert_eq!(cell.step(NumpadMove::DownRight, GridSize::NINE), Some(CellAddress::new(1, 1)));
    /// assert_eq!(cell.step(NumpadMove::Up, GridSize::NINE), None);
    /// ```
    #[must_use]
    pub fn step(self, dir: NumpadMove, size: GridSize) -> Option<Self> {
        let (dr, dc) = dir.offset();
        let row = i16::from(self.row) + i16::from(dr);
        let col = i16::from(self.col) + i16::from(dc);
        if !size.contains(row, col) {
            return None;
        }
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Some(Self::new(row as u8, col as u8))
    }

    /// Returns the move that leads from `self` to the king-adjacent cell `to`.
    ///
    /// Returns `None` if the cells are identical or not adjacent.
    #[must_use]
    pub fn move_to(self, to: Self) -> Option<NumpadMove> {
        let dr = i8::try_from(i16::from(to.row) - i16::from(self.row)).ok()?;
        let dc = i8::try_from(i16::from(to.col) - i16::from(self.col)).ok()?;
        NumpadMove::ALL
            .into_iter()
            .find(|m| m.offset() == (dr, dc))
    }
}

impl Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}C{}", u16::from(self.row) + 1, u16::from(self.col) + 1)
    }
}

/// A cell on the ring surrounding the grid, where outside clues are written.
///
/// Coordinates are 0-based like [`CellAddress`], so the row above the grid is `-1`
/// and the row below a grid of size `N` is `N`. In the 1-based text notation these
/// are `R0` and `R{N+1}`.
///
/// # Examples
///
/// ```
/// use sketchdoku_core::{ClueCell, GridSize};
///
/// let clue = ClueCell::new(-1, 2, GridSize::NINE)?;
/// assert_eq!(clue.to_string(), "R0C3");
/// assert!(!clue.is_corner(GridSize::NINE));
///
/// // Cells inside the grid are not clue cells.
/// assert!(ClueCell::new(0, 0, GridSize::NINE).is_err());
/// # Ok::<(), sketchdoku_core::GridError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClueCell {
    row: i8,
    col: i8,
}

impl ClueCell {
    /// Creates a clue cell on the border ring of a grid of `size`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::NotOnBorder`] if the cell is inside the grid or further
    /// than one step away from it.
    pub fn new(row: i8, col: i8, size: GridSize) -> Result<Self, GridError> {
        let n = i16::from(size.get());
        let (r, c) = (i16::from(row), i16::from(col));
        let on_ring = (-1..=n).contains(&r) && (-1..=n).contains(&c);
        if !on_ring || size.contains(r, c) {
            return Err(GridError::NotOnBorder {
                row: r,
                col: c,
                size: size.get(),
            });
        }
        Ok(Self { row, col })
    }

    /// Returns the 0-based row (`-1` for the row above the grid).
    #[must_use]
    pub const fn row(self) -> i8 {
        self.row
    }

    /// Returns the 0-based column (`-1` for the column left of the grid).
    #[must_use]
    pub const fn col(self) -> i8 {
        self.col
    }

    /// Returns `true` if the clue sits diagonally off a corner of the grid.
    #[must_use]
    pub fn is_corner(self, size: GridSize) -> bool {
        let n = i16::from(size.get());
        let edge = |v: i8| i16::from(v) == -1 || i16::from(v) == n;
        edge(self.row) && edge(self.col)
    }
}

impl Display for ClueCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}C{}", i16::from(self.row) + 1, i16::from(self.col) + 1)
    }
}

/// A single step in one of the eight compass directions, numbered like a numeric keypad.
///
/// ```text
/// 7 8 9
/// 4 . 6
/// 1 2 3
/// ```
///
/// Digit 5 (no movement) has no variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NumpadMove {
    /// One row down, one column left.
    DownLeft = 1,
    /// One row down.
    Down = 2,
    /// One row down, one column right.
    DownRight = 3,
    /// One column left.
    Left = 4,
    /// One column right.
    Right = 6,
    /// One row up, one column left.
    UpLeft = 7,
    /// One row up.
    Up = 8,
    /// One row up, one column right.
    UpRight = 9,
}

impl NumpadMove {
    /// All moves in numpad digit order.
    pub const ALL: [Self; 8] = [
        Self::DownLeft,
        Self::Down,
        Self::DownRight,
        Self::Left,
        Self::Right,
        Self::UpLeft,
        Self::Up,
        Self::UpRight,
    ];

    /// Returns the move for a numpad digit, or `None` for `5` and non-direction digits.
    #[must_use]
    pub const fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            1 => Some(Self::DownLeft),
            2 => Some(Self::Down),
            3 => Some(Self::DownRight),
            4 => Some(Self::Left),
            6 => Some(Self::Right),
            7 => Some(Self::UpLeft),
            8 => Some(Self::Up),
            9 => Some(Self::UpRight),
            _ => None,
        }
    }

    /// Returns the numpad digit of this move.
    #[must_use]
    pub const fn digit(self) -> u8 {
        self as u8
    }

    /// Returns the `(row, column)` delta of this move.
    #[must_use]
    pub const fn offset(self) -> (i8, i8) {
        match self {
            Self::DownLeft => (1, -1),
            Self::Down => (1, 0),
            Self::DownRight => (1, 1),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
            Self::UpLeft => (-1, -1),
            Self::Up => (-1, 0),
            Self::UpRight => (-1, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_round_trip() {
        let size = GridSize::new(6).unwrap();
        for index in 0..size.cell_count() {
            let cell = CellAddress::from_linear(index, size).unwrap();
            assert!(cell.is_within(size));
            assert_eq!(cell.to_linear(size), index);
        }
        assert_eq!(
            CellAddress::from_linear(36, size),
            Err(GridError::IndexOutOfBounds { index: 36, size: 6 })
        );
    }

    #[test]
    fn test_checked_rejects_outside() {
        assert!(CellAddress::checked(8, 8, GridSize::NINE).is_ok());
        assert_eq!(
            CellAddress::checked(9, 0, GridSize::NINE),
            Err(GridError::OutOfBounds {
                row: 9,
                col: 0,
                size: 9
            })
        );
    }

    #[test]
    fn test_numpad_digits() {
        for dir in NumpadMove::ALL {
            assert_eq!(NumpadMove::from_digit(dir.digit()), Some(dir));
        }
        assert_eq!(NumpadMove::from_digit(5), None);
        assert_eq!(NumpadMove::from_digit(0), None);
    }

    #[test]
    fn test_step_and_move_to() {
        let size = GridSize::NINE;
        let center = CellAddress::new(4, 4);
        for dir in NumpadMove::ALL {
            let next = center.step(dir, size).unwrap();
            assert_eq!(center.move_to(next), Some(dir));
        }
        assert_eq!(center.move_to(center), None);
        assert_eq!(center.move_to(CellAddress::new(6, 4)), None);
        assert_eq!(CellAddress::new(8, 8).step(NumpadMove::Right, size), None);
    }

    #[test]
    fn test_clue_cell() {
        let size = GridSize::NINE;
        assert!(ClueCell::new(-1, -1, size).unwrap().is_corner(size));
        assert!(ClueCell::new(9, 9, size).unwrap().is_corner(size));
        assert!(!ClueCell::new(4, 9, size).unwrap().is_corner(size));
        assert!(ClueCell::new(-2, 0, size).is_err());
        assert!(ClueCell::new(4, 4, size).is_err());
        assert_eq!(ClueCell::new(9, 3, size).unwrap().to_string(), "R10C4");
    }
}
