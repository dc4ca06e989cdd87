//! Binary occupancy grids.

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::error::IouScoreError;

/// A 2D grid of on/off cells, indexed `(row, col)`.
///
/// Integer input is binarized on construction: any nonzero value is "on".
#[derive(Clone, PartialEq, Eq)]
pub struct Mask {
    cells: Array2<bool>,
}

impl Mask {
    /// Wraps an existing boolean array.
    pub fn from_array(cells: Array2<bool>) -> Self {
        Self { cells }
    }

    /// A mask of the given shape with every cell off.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            cells: Array2::from_elem((rows, cols), false),
        }
    }

    /// Builds a mask from a row-major buffer.
    pub fn from_shape_vec(
        rows: usize,
        cols: usize,
        cells: Vec<bool>,
    ) -> Result<Self, IouScoreError> {
        let len = cells.len();
        Array2::from_shape_vec((rows, cols), cells)
            .map(Self::from_array)
            .map_err(|_| IouScoreError::InvalidMaskBuffer { rows, cols, len })
    }

    /// Builds a mask from nested rows of integers.
    ///
    /// Every row must have the length of the first one.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, IouScoreError> {
        let cols = rows.first().map_or(0, |row| row.as_ref().len());
        let mut cells = Vec::with_capacity(rows.len() * cols);

        for (idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(IouScoreError::RaggedMask {
                    row: idx,
                    expected: cols,
                    found: row.len(),
                });
            }
            cells.extend(row.iter().map(|&v| v != 0));
        }

        Self::from_shape_vec(rows.len(), cols, cells)
    }

    /// Returns `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.cells.dim()
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Total number of cells, on or off.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Cell value, or `None` outside the grid.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        self.cells.get((row, col)).copied()
    }

    /// Number of on cells.
    pub fn count_on(&self) -> usize {
        self.cells.iter().filter(|&&on| on).count()
    }

    /// Returns true if no cell is on.
    pub fn is_blank(&self) -> bool {
        !self.cells.iter().any(|&on| on)
    }

    /// Coordinates of on cells in row-major order.
    pub fn on_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .indexed_iter()
            .filter_map(|(idx, &on)| on.then_some(idx))
    }

    /// Grid height over grid width.
    ///
    /// This describes the whole grid, not the region its on cells occupy.
    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        self.rows() as f64 / self.cols() as f64
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.cells.iter().copied()
    }

    pub fn view(&self) -> ArrayView2<'_, bool> {
        self.cells.view()
    }

    /// Nested rows of `0`/`1`, the layout input files use.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .rows()
            .into_iter()
            .map(|row| row.iter().map(|&on| u8::from(on)).collect())
            .collect()
    }
}

impl std::fmt::Debug for Mask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (rows, cols) = self.shape();
        writeln!(f, "Mask {rows}x{cols} [")?;
        for row in self.cells.rows() {
            let line: String = row.iter().map(|&on| if on { '#' } else { '.' }).collect();
            writeln!(f, "  {line}")?;
        }
        write!(f, "]")
    }
}

impl Serialize for Mask {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_rows().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Mask {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<Vec<u8>>::deserialize(deserializer)?;
        Mask::from_rows(&rows).map_err(serde::de::Error::custom)
    }
}
