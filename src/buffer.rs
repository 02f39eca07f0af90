//! Row-major buffer conversions
//!
//! Foreign callers hand over points as one contiguous `f64` buffer plus its
//! `(rows, cols)` shape. These helpers move between that layout and
//! per-element vectors.

use crate::errors::{DistclusError, Result};
use crate::types::Elemt;

/// A row-major matrix of `f64` values.
///
/// `data.len() == rows * cols` always holds; the only constructors check it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatArray {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl FlatArray {
    /// Wrap an existing buffer, checking its length against the shape
    pub fn new(data: Vec<f64>, rows: usize, cols: usize) -> Result<Self> {
        check_shape(data.len(), rows, cols)?;
        Ok(Self { data, rows, cols })
    }

    /// Row-major values
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Take the row-major values, dropping the shape
    pub fn into_data(self) -> Vec<f64> {
        self.data
    }

    /// Borrow one row
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        if i >= self.rows {
            return None;
        }
        self.data.get(i * self.cols..(i + 1) * self.cols)
    }

    /// Split into one element per row
    pub fn into_elemts(self) -> Vec<Elemt> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.data.chunks(self.cols).map(|c| c.to_vec()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}

fn check_shape(len: usize, rows: usize, cols: usize) -> Result<()> {
    let expected = rows
        .checked_mul(cols)
        .ok_or_else(|| DistclusError::invalid_shape(format!("{}x{} overflows", rows, cols)))?;
    if len != expected {
        return Err(DistclusError::invalid_shape(format!(
            "buffer holds {} values but shape {}x{} needs {}",
            len, rows, cols, expected
        )));
    }
    Ok(())
}

/// Convert a row-major buffer into elements
pub fn elemts_from_array(data: &[f64], rows: usize, cols: usize) -> Result<Vec<Elemt>> {
    check_shape(data.len(), rows, cols)?;
    if cols == 0 {
        return Ok(vec![Vec::new(); rows]);
    }
    Ok(data.chunks(cols).map(|c| c.to_vec()).collect())
}

/// Flatten elements into a row-major buffer.
///
/// All elements must have the same dimension.
pub fn elemts_to_array(elemts: &[Elemt]) -> Result<FlatArray> {
    let rows = elemts.len();
    let cols = elemts.first().map_or(0, |e| e.len());

    let mut data = Vec::with_capacity(rows * cols);
    for (i, elemt) in elemts.iter().enumerate() {
        if elemt.len() != cols {
            return Err(DistclusError::invalid_shape(format!(
                "element {} has dimension {} instead of {}",
                i,
                elemt.len(),
                cols
            )));
        }
        data.extend_from_slice(elemt);
    }

    Ok(FlatArray { data, rows, cols })
}

/// Convert cluster labels to the integer width used across the boundary
pub fn labels_to_array(labels: &[usize]) -> Vec<i64> {
    labels.iter().map(|&l| l as i64).collect()
}
