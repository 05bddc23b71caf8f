// Author: Lukas Bower
// Purpose: COSEM single-scale metadata and its schema-native transform field.
#![forbid(unsafe_code)]

//! COSEM datasets describe their placement in a `transform` attribute whose
//! arrays are listed in C order (slowest axis first, e.g. `["z", "y", "x"]`).
//! Conversion to [`AffineTransform3D`] reverses them into x-first order.

use serde::{Deserialize, Serialize};

use super::{DatasetAttributes, Metadata, PhysicalMetadata};
use crate::error::MetadataError;
use crate::transform::{pad3, AffineTransform3D};

/// Attribute key holding the COSEM transform.
pub const TRANSFORM_KEY: &str = "transform";

/// Axis-aligned scale and translation in COSEM's C-ordered layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CosemTransform {
    /// Axis labels, slowest axis first.
    pub axes: Vec<String>,
    /// Scale per axis.
    pub scale: Vec<f64>,
    /// Translation per axis.
    pub translate: Vec<f64>,
    /// Unit label per axis.
    pub units: Vec<String>,
}

impl CosemTransform {
    /// Build a transform, checking every array matches the axis count.
    pub fn new(
        axes: Vec<String>,
        scale: Vec<f64>,
        translate: Vec<f64>,
        units: Vec<String>,
    ) -> Result<Self, MetadataError> {
        let transform = Self {
            axes,
            scale,
            translate,
            units,
        };
        transform.validate()?;
        Ok(transform)
    }

    /// Read the `transform` field from a dataset attribute document.
    ///
    /// Returns `Ok(None)` when the document has no such field.
    pub fn from_attributes(attributes: &serde_json::Value) -> Result<Option<Self>, MetadataError> {
        let Some(field) = attributes.get(TRANSFORM_KEY) else {
            return Ok(None);
        };
        let transform: Self = serde_json::from_value(field.clone())?;
        transform.validate()?;
        Ok(Some(transform))
    }

    /// Check that `scale`, `translate` and `units` each have one entry per axis.
    pub fn validate(&self) -> Result<(), MetadataError> {
        let expected = self.axes.len();
        let fields = [
            ("scale", self.scale.len()),
            ("translate", self.translate.len()),
            ("units", self.units.len()),
        ];
        for (field, found) in fields {
            if found != expected {
                return Err(MetadataError::AxisMismatch {
                    field,
                    expected,
                    found,
                });
            }
        }
        Ok(())
    }

    /// Convert to the common affine form, x axis first, padded to 3-D.
    #[must_use]
    pub fn to_affine_3d(&self) -> AffineTransform3D {
        let scale: Vec<f64> = self.scale.iter().rev().copied().collect();
        let translate: Vec<f64> = self.translate.iter().rev().copied().collect();
        AffineTransform3D::from_scale_translation(pad3(&scale, 1.0), pad3(&translate, 0.0))
    }

    /// Unit labels in x-first order.
    #[must_use]
    pub fn units_xyz(&self) -> Vec<String> {
        self.units.iter().rev().cloned().collect()
    }
}

/// COSEM single-scale dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CosemMetadata {
    path: String,
    attributes: DatasetAttributes,
    transform: CosemTransform,
}

impl CosemMetadata {
    /// Record for the dataset at `path`.
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        attributes: DatasetAttributes,
        transform: CosemTransform,
    ) -> Self {
        Self {
            path: path.into(),
            attributes,
            transform,
        }
    }

    /// Schema-native transform as written in the attribute document.
    #[must_use]
    pub fn transform(&self) -> &CosemTransform {
        &self.transform
    }
}

impl Metadata for CosemMetadata {
    fn path(&self) -> &str {
        &self.path
    }

    fn attributes(&self) -> Option<&DatasetAttributes> {
        Some(&self.attributes)
    }
}

impl PhysicalMetadata for CosemMetadata {
    fn physical_transform(&self) -> Option<AffineTransform3D> {
        Some(self.transform.to_affine_3d())
    }

    fn units(&self) -> Vec<String> {
        self.transform.units_xyz()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zyx(scale: [f64; 3], translate: [f64; 3]) -> CosemTransform {
        CosemTransform::new(
            vec!["z".into(), "y".into(), "x".into()],
            scale.to_vec(),
            translate.to_vec(),
            vec!["nm".into(), "um".into(), "mm".into()],
        )
        .expect("valid transform")
    }

    #[test]
    fn c_order_is_reversed() {
        let t = zyx([40.0, 4.0, 2.0], [10.0, 1.0, 0.5]);
        let affine = t.to_affine_3d();
        assert_eq!(affine.scale(), [2.0, 4.0, 40.0]);
        assert_eq!(affine.translation(), [0.5, 1.0, 10.0]);
        assert_eq!(t.units_xyz(), vec!["mm", "um", "nm"]);
    }

    #[test]
    fn two_dimensional_transform_is_padded() {
        let t = CosemTransform::new(
            vec!["y".into(), "x".into()],
            vec![3.0, 2.0],
            vec![1.0, 0.0],
            vec!["nm".into(), "nm".into()],
        )
        .expect("valid transform");
        let affine = t.to_affine_3d();
        assert_eq!(affine.scale(), [2.0, 3.0, 1.0]);
        assert_eq!(affine.translation(), [0.0, 1.0, 0.0]);
    }

    #[test]
    fn mismatched_arrays_are_rejected() {
        let err = CosemTransform::new(
            vec!["z".into(), "y".into(), "x".into()],
            vec![1.0, 1.0],
            vec![0.0, 0.0, 0.0],
            vec!["nm".into(); 3],
        )
        .expect_err("scale too short");
        assert!(matches!(
            err,
            MetadataError::AxisMismatch {
                field: "scale",
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn reads_transform_attribute() {
        let doc = serde_json::json!({
            "dimensions": [10, 10, 10],
            "transform": {
                "axes": ["z", "y", "x"],
                "scale": [8.0, 8.0, 8.0],
                "translate": [4.0, 4.0, 4.0],
                "units": ["nm", "nm", "nm"]
            }
        });
        let t = CosemTransform::from_attributes(&doc)
            .expect("valid document")
            .expect("transform present");
        assert_eq!(t.to_affine_3d().scale(), [8.0, 8.0, 8.0]);

        let missing = CosemTransform::from_attributes(&serde_json::json!({ "dimensions": [1] }))
            .expect("valid document");
        assert!(missing.is_none());

        let broken = serde_json::json!({ "transform": { "axes": ["x"] } });
        assert!(matches!(
            CosemTransform::from_attributes(&broken),
            Err(MetadataError::Json(_))
        ));
    }
}
