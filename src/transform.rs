// Author: Lukas Bower
// Purpose: Common 3-D affine representation for per-level physical transforms.
#![forbid(unsafe_code)]

//! Every scale level's transform is converted into [`AffineTransform3D`]
//! regardless of the dimensionality its source metadata was written in. On
//! disk and in JSON exports the transform is a flat row-packed array of
//! twelve numbers.

use serde::{Deserialize, Serialize};

use crate::error::MetadataError;

/// Number of entries in a row-packed 3×4 affine matrix.
pub const ROW_PACKED_LEN: usize = 12;

/// Affine map from array index space to physical space, stored as a 3×4
/// row-major matrix `[m00 m01 m02 t0, m10 m11 m12 t1, m20 m21 m22 t2]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct AffineTransform3D {
    matrix: [f64; ROW_PACKED_LEN],
}

impl AffineTransform3D {
    /// Identity transform.
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            matrix: [
                1.0, 0.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0,
            ],
        }
    }

    /// Build a transform from a row-packed slice of exactly twelve values.
    pub fn from_row_packed(values: &[f64]) -> Result<Self, MetadataError> {
        let matrix: [f64; ROW_PACKED_LEN] =
            values.try_into().map_err(|_| MetadataError::TransformLength {
                expected: ROW_PACKED_LEN,
                found: values.len(),
            })?;
        Ok(Self { matrix })
    }

    /// Axis-aligned scale followed by a translation.
    #[must_use]
    pub fn from_scale_translation(scale: [f64; 3], translation: [f64; 3]) -> Self {
        let mut transform = Self::identity();
        for axis in 0..3 {
            transform.matrix[axis * 4 + axis] = scale[axis];
            transform.matrix[axis * 4 + 3] = translation[axis];
        }
        transform
    }

    /// Axis-aligned scale without translation.
    #[must_use]
    pub fn from_scale(scale: [f64; 3]) -> Self {
        Self::from_scale_translation(scale, [0.0; 3])
    }

    /// Matrix entry at `row` (0..3) and `col` (0..4). Out of range reads 0.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        if row < 3 && col < 4 {
            self.matrix[row * 4 + col]
        } else {
            0.0
        }
    }

    /// Row-packed copy of the matrix.
    #[must_use]
    pub fn row_packed(&self) -> [f64; ROW_PACKED_LEN] {
        self.matrix
    }

    /// Diagonal of the linear part.
    #[must_use]
    pub fn scale(&self) -> [f64; 3] {
        [self.matrix[0], self.matrix[5], self.matrix[10]]
    }

    /// Translation column.
    #[must_use]
    pub fn translation(&self) -> [f64; 3] {
        [self.matrix[3], self.matrix[7], self.matrix[11]]
    }

    /// Map an index-space point into physical space.
    #[must_use]
    pub fn apply(&self, point: [f64; 3]) -> [f64; 3] {
        let mut out = [0.0; 3];
        for (row, value) in out.iter_mut().enumerate() {
            let base = row * 4;
            *value = self.matrix[base] * point[0]
                + self.matrix[base + 1] * point[1]
                + self.matrix[base + 2] * point[2]
                + self.matrix[base + 3];
        }
        out
    }

    /// Compose `self ∘ other`: the result applies `other` first.
    #[must_use]
    pub fn concatenate(&self, other: &Self) -> Self {
        let mut matrix = [0.0; ROW_PACKED_LEN];
        for row in 0..3 {
            for col in 0..4 {
                let mut value = 0.0;
                for k in 0..3 {
                    value += self.get(row, k) * other.get(k, col);
                }
                if col == 3 {
                    value += self.get(row, 3);
                }
                matrix[row * 4 + col] = value;
            }
        }
        Self { matrix }
    }
}

impl Default for AffineTransform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl TryFrom<Vec<f64>> for AffineTransform3D {
    type Error = MetadataError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::from_row_packed(&values)
    }
}

impl From<AffineTransform3D> for Vec<f64> {
    fn from(transform: AffineTransform3D) -> Self {
        transform.matrix.to_vec()
    }
}

/// Pad or truncate per-axis values to three entries, filling with `fill`.
pub(crate) fn pad3(values: &[f64], fill: f64) -> [f64; 3] {
    let mut out = [fill; 3];
    for (slot, value) in out.iter_mut().zip(values) {
        *slot = *value;
    }
    out
}
