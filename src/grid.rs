//! Dense row-major scalar fields and neighbor boundary policies.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::FloatGrid;

/// How neighbor indices behave at the grid edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    /// Indices wrap around to the opposite edge.
    Periodic,
    /// Indices are clamped to the edge (replicate boundary).
    Clamp,
}

impl Boundary {
    /// Returns the `(previous, next)` neighbor indices of `i` along an axis of
    /// length `len`.
    #[inline]
    pub fn neighbors(self, i: usize, len: usize) -> (usize, usize) {
        debug_assert!(i < len);
        match self {
            Boundary::Periodic => {
                let prev = if i == 0 { len - 1 } else { i - 1 };
                let next = if i + 1 == len { 0 } else { i + 1 };
                (prev, next)
            }
            Boundary::Clamp => (i.saturating_sub(1), (i + 1).min(len - 1)),
        }
    }
}

/// A `width` x `height` scalar field stored row-major.
///
/// Used both for the normalized samples and for the level-set function phi.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl Field {
    /// Creates a zero-filled field.
    pub fn new(width: usize, height: usize) -> Result<Field> {
        Self::filled(width, height, 0.0)
    }

    /// Creates a field with every value set to `value`.
    pub fn filled(width: usize, height: usize, value: f64) -> Result<Field> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyGrid { width, height });
        }
        Ok(Field {
            width,
            height,
            data: vec![value; width * height],
        })
    }

    /// Builds a field by evaluating `f(x, y)` at every pixel.
    pub fn from_fn<F>(width: usize, height: usize, f: F) -> Result<Field>
    where
        F: Fn(usize, usize) -> f64,
    {
        let mut field = Self::new(width, height)?;
        for y in 0..height {
            for x in 0..width {
                field.data[y * width + x] = f(x, y);
            }
        }
        Ok(field)
    }

    /// Copies a `FloatGrid`, rejecting empty grids and non-finite samples.
    pub fn from_grid(grid: &FloatGrid) -> Result<Field> {
        let mut field = Self::new(grid.width(), grid.height())?;
        for (x, y, &value) in grid.iter() {
            field.data[y * field.width + x] = value;
        }
        field.ensure_finite()?;
        Ok(field)
    }

    /// Fails on the first NaN or infinite value in row-major order.
    pub fn ensure_finite(&self) -> Result<()> {
        match self.data.iter().position(|v| !v.is_finite()) {
            Some(i) => Err(Error::NonFiniteSample {
                x: i % self.width,
                y: i / self.width,
            }),
            None => Ok(()),
        }
    }

    /// Copies the field into a `FloatGrid`.
    pub fn to_grid(&self) -> FloatGrid {
        let mut grid = FloatGrid::new(self.width, self.height);
        for (x, y, value) in grid.iter_mut() {
            *value = self.data[y * self.width + x];
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Value at `(x, y)`. Panics when out of bounds.
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> f64 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        self.data[y * self.width + x] = value;
    }

    /// Row-major view of all values.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Row `y` as a slice.
    #[inline]
    pub fn row(&self, y: usize) -> &[f64] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    /// Fails unless `other` has the same dimensions.
    pub fn ensure_same_shape(&self, other: &Field) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        Ok(())
    }

    /// Largest absolute pointwise difference to `other`.
    pub fn max_abs_diff(&self, other: &Field) -> f64 {
        self.data
            .iter()
            .zip(other.data.iter())
            .fold(0.0f64, |acc, (a, b)| acc.max((a - b).abs()))
    }
}
