//! Row-major sample grid

use crate::image_pipeline::common::error::{PipelineError, Result};

/// `width * height`, or `InvalidDimensions` when the product does not fit in `usize`.
pub fn sample_count(width: usize, height: usize) -> Result<usize> {
    width
        .checked_mul(height)
        .ok_or(PipelineError::InvalidDimensions(width, height))
}

/// A `height × width` grid of samples stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T> Grid<T> {
    /// Wraps a flat buffer, checking that it holds exactly `width * height` samples.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self> {
        let expected = sample_count(width, height)?;
        if data.len() != expected {
            return Err(PipelineError::dimension_mismatch(
                format!("{width}x{height} grid"),
                expected,
                data.len(),
            ));
        }
        Ok(Self { width, height, data })
    }

    /// Builds a grid by evaluating `f(row, col)` for every position.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                data.push(f(row, col));
            }
        }
        Self { width, height, data }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn same_shape<U>(&self, other: &Grid<U>) -> bool {
        self.width == other.width && self.height == other.height
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn rows(&self) -> std::slice::ChunksExact<'_, T> {
        self.data.chunks_exact(self.width.max(1))
    }

    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.width;
        &self.data[start..start + self.width]
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl<T: Copy> Grid<T> {
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.width + col]
    }

    /// Samples every `row_step`-th row and `col_step`-th column, keeping
    /// exactly `height × width` samples starting at the origin.
    pub fn strided(&self, row_step: usize, col_step: usize, height: usize, width: usize) -> Result<Grid<T>> {
        let last_row = height.saturating_sub(1) * row_step;
        let last_col = width.saturating_sub(1) * col_step;
        if height == 0 || width == 0 || last_row >= self.height || last_col >= self.width {
            return Err(PipelineError::InvalidDimensions(width, height));
        }
        Ok(Grid::from_fn(width, height, |row, col| {
            self.get(row * row_step, col * col_step)
        }))
    }
}

impl<T: Copy + Into<f64>> Grid<T> {
    pub fn to_f64(&self) -> Grid<f64> {
        self.map(|&v| v.into())
    }
}

impl Grid<f64> {
    /// Rounds half away from zero and clamps into the 8-bit range.
    pub fn quantize(&self) -> Grid<u8> {
        self.map(|&v| v.round().clamp(0.0, 255.0) as u8)
    }
}
