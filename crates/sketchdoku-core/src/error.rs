/// Errors produced when constructing grid types from untrusted values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridError {
    /// The grid size is outside the supported range.
    #[display("invalid grid size {size} (expected 1-31)")]
    InvalidSize {
        /// The rejected size.
        size: u8,
    },
    /// A cell lies outside the grid.
    #[display("cell (row {row}, column {col}) is outside the {size}x{size} grid")]
    OutOfBounds {
        /// 0-based row.
        row: i16,
        /// 0-based column.
        col: i16,
        /// Side length of the grid.
        size: u8,
    },
    /// A linear cell index is outside the grid.
    #[display("cell index {index} is outside the {size}x{size} grid")]
    IndexOutOfBounds {
        /// The rejected linear index.
        index: usize,
        /// Side length of the grid.
        size: u8,
    },
    /// A clue cell is not on the ring of cells surrounding the grid.
    #[display("clue cell (row {row}, column {col}) is not on the border of the {size}x{size} grid")]
    NotOnBorder {
        /// 0-based row (`-1` is the row above the grid).
        row: i16,
        /// 0-based column (`-1` is the column left of the grid).
        col: i16,
        /// Side length of the grid.
        size: u8,
    },
}
