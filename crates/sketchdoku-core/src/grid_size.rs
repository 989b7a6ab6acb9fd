//! Grid side length.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::GridError;

/// The side length `N` of an `N×N` grid.
///
/// The constraint grammar addresses rows and columns with decimal numerals, and the
/// solving engine accepts grids from 1×1 up to 31×31. The default is the classic 9×9.
///
/// # Examples
///
/// ```
/// use sketchdoku_core::GridSize;
///
/// let size = GridSize::new(6)?;
/// assert_eq!(size.get(), 6);
/// assert_eq!(size.cell_count(), 36);
///
/// assert!(GridSize::new(0).is_err());
/// assert!(GridSize::new(32).is_err());
/// assert_eq!(GridSize::default(), GridSize::NINE);
/// # Ok::<(), sketchdoku_core::GridError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct GridSize(u8);

impl GridSize {
    /// The smallest supported size.
    pub const MIN: Self = Self(1);
    /// The largest supported size.
    pub const MAX: Self = Self(31);
    /// The classic 9×9 grid.
    pub const NINE: Self = Self(9);

    /// Creates a grid size.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidSize`] if `size` is not in the range 1-31.
    pub const fn new(size: u8) -> Result<Self, GridError> {
        if size < Self::MIN.0 || size > Self::MAX.0 {
            return Err(GridError::InvalidSize { size });
        }
        Ok(Self(size))
    }

    /// Returns the side length.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns the number of cells in the grid (`N * N`).
    #[must_use]
    pub const fn cell_count(self) -> usize {
        self.0 as usize * self.0 as usize
    }

    /// Returns `true` if the 0-based coordinate is inside the grid.
    #[must_use]
    #[inline]
    pub fn contains(self, row: i16, col: i16) -> bool {
        let n = i16::from(self.0);
        (0..n).contains(&row) && (0..n).contains(&col)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::NINE
    }
}

impl Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl TryFrom<u8> for GridSize {
    type Error = GridError;

    fn try_from(size: u8) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl From<GridSize> for u8 {
    fn from(size: GridSize) -> u8 {
        size.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert_eq!(GridSize::new(1), Ok(GridSize::MIN));
        assert_eq!(GridSize::new(31), Ok(GridSize::MAX));
        assert_eq!(GridSize::new(0), Err(GridError::InvalidSize { size: 0 }));
        assert_eq!(GridSize::new(32), Err(GridError::InvalidSize { size: 32 }));
    }

    #[test]
    fn test_contains() {
        let size = GridSize::NINE;
        assert!(size.contains(0, 0));
        assert!(size.contains(8, 8));
        assert!(!size.contains(-1, 0));
        assert!(!size.contains(0, 9));
    }
}
