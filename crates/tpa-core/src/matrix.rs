use crate::error::TpaError;
use serde::{Deserialize, Serialize};

/// Dense row-major matrix indexed by (path, frequency band).
///
/// Serialized as nested rows (`[[h00, h01, ...], ...]`); deserialization goes
/// through [`PathBandMatrix::from_rows`] so empty and ragged input is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct PathBandMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl PathBandMatrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self { rows, cols, data }
    }

    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, TpaError> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if cols == 0 {
            return Err(TpaError::EmptyMatrix);
        }
        let n_rows = rows.len();
        let mut data = Vec::with_capacity(n_rows * cols);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != cols {
                return Err(TpaError::RaggedMatrix {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            data.extend(values);
        }
        Ok(Self {
            rows: n_rows,
            cols,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [f64] {
        &mut self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Row-major view of every entry.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut f64> {
        self.data.iter_mut()
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|r| self.row(r).to_vec()).collect()
    }

    pub fn ensure_shape(&self, rows: usize, cols: usize) -> Result<(), TpaError> {
        if self.shape() != (rows, cols) {
            return Err(TpaError::ShapeMismatch {
                left: self.shape(),
                right: (rows, cols),
            });
        }
        Ok(())
    }

    pub fn ensure_same_shape(&self, other: &PathBandMatrix) -> Result<(), TpaError> {
        self.ensure_shape(other.rows, other.cols)
    }

    pub fn ensure_finite(&self) -> Result<(), TpaError> {
        match self.data.iter().position(|v| !v.is_finite()) {
            Some(i) => Err(TpaError::NonFiniteEntry {
                row: i / self.cols,
                col: i % self.cols,
            }),
            None => Ok(()),
        }
    }

    pub fn ensure_non_negative(&self) -> Result<(), TpaError> {
        match self.data.iter().position(|v| *v < 0.0) {
            Some(i) => Err(TpaError::NegativeEntry {
                row: i / self.cols,
                col: i % self.cols,
                value: self.data[i],
            }),
            None => Ok(()),
        }
    }

    pub fn abs_in_place(&mut self) {
        for v in &mut self.data {
            *v = v.abs();
        }
    }

    pub fn sum_of_squares(&self) -> f64 {
        self.data.iter().map(|v| v * v).sum()
    }
}

impl TryFrom<Vec<Vec<f64>>> for PathBandMatrix {
    type Error = TpaError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<PathBandMatrix> for Vec<Vec<f64>> {
    fn from(m: PathBandMatrix) -> Self {
        m.to_rows()
    }
}
