// Author: Lukas Bower
// Purpose: Single-dataset metadata shapes: plain datasets and N5 viewer scale levels.
#![forbid(unsafe_code)]

//! Single-dataset records and the N5 viewer level transform.

use serde::{Deserialize, Serialize};

use super::{DatasetAttributes, Metadata, PhysicalMetadata};
use crate::transform::{pad3, AffineTransform3D};

/// Unit label used when a legacy record carries no unit.
pub const LEGACY_UNIT: &str = "pixel";

/// Dataset with attributes but no physical placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    path: String,
    attributes: DatasetAttributes,
}

impl DatasetMetadata {
    /// Record for the dataset at `path`.
    #[must_use]
    pub fn new(path: impl Into<String>, attributes: DatasetAttributes) -> Self {
        Self {
            path: path.into(),
            attributes,
        }
    }
}

impl Metadata for DatasetMetadata {
    fn path(&self) -> &str {
        &self.path
    }

    fn attributes(&self) -> Option<&DatasetAttributes> {
        Some(&self.attributes)
    }
}

/// Physical size of one voxel, as written in the `pixelResolution` attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PixelResolution {
    /// Voxel extent per axis, x first.
    pub dimensions: Vec<f64>,
    /// Unit shared by every axis.
    pub unit: String,
}

impl PixelResolution {
    /// Resolution with a single unit for all axes.
    #[must_use]
    pub fn new(dimensions: Vec<f64>, unit: impl Into<String>) -> Self {
        Self {
            dimensions,
            unit: unit.into(),
        }
    }
}

/// N5 viewer scale level: base resolution plus downsampling factors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleScaleMetadata {
    path: String,
    attributes: DatasetAttributes,
    pixel_resolution: PixelResolution,
    downsampling_factors: Vec<f64>,
}

impl SingleScaleMetadata {
    /// Record for one scale level.
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        attributes: DatasetAttributes,
        pixel_resolution: PixelResolution,
        downsampling_factors: Vec<f64>,
    ) -> Self {
        Self {
            path: path.into(),
            attributes,
            pixel_resolution,
            downsampling_factors,
        }
    }

    /// Base-level voxel resolution.
    #[must_use]
    pub fn pixel_resolution(&self) -> &PixelResolution {
        &self.pixel_resolution
    }

    /// Downsampling factor per axis relative to the full-resolution level.
    #[must_use]
    pub fn downsampling_factors(&self) -> &[f64] {
        &self.downsampling_factors
    }
}

impl Metadata for SingleScaleMetadata {
    fn path(&self) -> &str {
        &self.path
    }

    fn attributes(&self) -> Option<&DatasetAttributes> {
        Some(&self.attributes)
    }
}

impl PhysicalMetadata for SingleScaleMetadata {
    fn physical_transform(&self) -> Option<AffineTransform3D> {
        mipmap_transform(&self.pixel_resolution.dimensions, &self.downsampling_factors)
    }

    fn units(&self) -> Vec<String> {
        vec![self.pixel_resolution.unit.clone(); 3]
    }
}

/// Legacy N5 viewer scale level: bare resolution array and no unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleScaleLegacyMetadata {
    path: String,
    attributes: DatasetAttributes,
    pixel_resolution: Vec<f64>,
    #[serde(default)]
    downsampling_factors: Vec<f64>,
}

impl SingleScaleLegacyMetadata {
    /// Record for one legacy scale level. Empty factors mean full resolution.
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        attributes: DatasetAttributes,
        pixel_resolution: Vec<f64>,
        downsampling_factors: Vec<f64>,
    ) -> Self {
        Self {
            path: path.into(),
            attributes,
            pixel_resolution,
            downsampling_factors,
        }
    }

    /// Base-level voxel resolution.
    #[must_use]
    pub fn pixel_resolution(&self) -> &[f64] {
        &self.pixel_resolution
    }
}

impl Metadata for SingleScaleLegacyMetadata {
    fn path(&self) -> &str {
        &self.path
    }

    fn attributes(&self) -> Option<&DatasetAttributes> {
        Some(&self.attributes)
    }
}

impl PhysicalMetadata for SingleScaleLegacyMetadata {
    fn physical_transform(&self) -> Option<AffineTransform3D> {
        mipmap_transform(&self.pixel_resolution, &self.downsampling_factors)
    }

    fn units(&self) -> Vec<String> {
        vec![LEGACY_UNIT.to_owned(); 3]
    }
}

/// Transform of a downsampled level: each voxel spans `factor` base voxels and
/// its centre sits half a downsampled voxel in from the base origin.
///
/// `None` when the record carries no resolution at all.
fn mipmap_transform(resolution: &[f64], factors: &[f64]) -> Option<AffineTransform3D> {
    if resolution.is_empty() {
        return None;
    }
    let resolution = pad3(resolution, 1.0);
    let factors = pad3(factors, 1.0);
    let mut scale = [0.0; 3];
    let mut translation = [0.0; 3];
    for axis in 0..3 {
        scale[axis] = resolution[axis] * factors[axis];
        translation[axis] = 0.5 * (factors[axis] - 1.0) * resolution[axis];
    }
    Some(AffineTransform3D::from_scale_translation(scale, translation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::DataType;

    fn attrs() -> DatasetAttributes {
        DatasetAttributes::new(vec![100, 100, 100], vec![64, 64, 64], DataType::Uint16)
    }

    #[test]
    fn full_resolution_level_is_pure_scale() {
        let md = SingleScaleMetadata::new(
            "/em/s0",
            attrs(),
            PixelResolution::new(vec![4.0, 4.0, 40.0], "nm"),
            vec![1.0, 1.0, 1.0],
        );
        let t = md.physical_transform().expect("transform");
        assert_eq!(t.scale(), [4.0, 4.0, 40.0]);
        assert_eq!(t.translation(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn downsampled_level_is_offset_by_half_voxel() {
        let md = SingleScaleMetadata::new(
            "/em/s1",
            attrs(),
            PixelResolution::new(vec![4.0, 4.0, 40.0], "nm"),
            vec![2.0, 2.0, 1.0],
        );
        let t = md.physical_transform().expect("transform");
        assert_eq!(t.scale(), [8.0, 8.0, 40.0]);
        assert_eq!(t.translation(), [2.0, 2.0, 0.0]);
        assert_eq!(md.downsampling_factors(), &[2.0, 2.0, 1.0]);
    }

    #[test]
    fn legacy_level_defaults_to_pixel_units() {
        let md = SingleScaleLegacyMetadata::new("/em/s0", attrs(), vec![1.0, 1.0], Vec::new());
        assert_eq!(md.units(), vec!["pixel", "pixel", "pixel"]);
        let t = md.physical_transform().expect("transform");
        assert_eq!(t.scale(), [1.0, 1.0, 1.0]);
        assert_eq!(md.pixel_resolution(), &[1.0, 1.0]);
    }

    #[test]
    fn missing_resolution_has_no_transform() {
        let md = SingleScaleMetadata::new(
            "/em/s0",
            attrs(),
            PixelResolution::new(Vec::new(), "nm"),
            Vec::new(),
        );
        assert!(md.physical_transform().is_none());
        assert_eq!(md.units(), vec!["nm", "nm", "nm"]);
        let legacy = SingleScaleLegacyMetadata::new("/em/s0", attrs(), Vec::new(), vec![2.0; 3]);
        assert!(legacy.physical_transform().is_none());
    }

    #[test]
    fn legacy_deserializes_from_camel_case() {
        let doc = serde_json::json!({
            "path": "/em/s2",
            "attributes": {
                "dimensions": [25, 25, 25],
                "blockSize": [64, 64, 64],
                "dataType": "uint8"
            },
            "pixelResolution": [2.0, 2.0, 2.0],
            "downsamplingFactors": [4.0, 4.0, 4.0]
        });
        let md: SingleScaleLegacyMetadata = serde_json::from_value(doc).expect("legacy record");
        assert_eq!(md.path(), "/em/s2");
        let t = md.physical_transform().expect("transform");
        assert_eq!(t.scale(), [8.0, 8.0, 8.0]);
        assert_eq!(t.translation(), [3.0, 3.0, 3.0]);
    }
}
