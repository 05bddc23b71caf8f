// Author: Lukas Bower
// Purpose: Aggregate metadata record describing a recognised multiscale pyramid.
#![forbid(unsafe_code)]

//! Aggregate record for a recognised pyramid.

use serde::{Deserialize, Serialize};

use super::{DatasetAttributes, Metadata, PhysicalMetadata};
use crate::error::MetadataError;
use crate::transform::AffineTransform3D;

/// Convention whose group parser produced an aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiscaleConvention {
    /// COSEM pyramids built from [`super::CosemMetadata`] levels.
    Cosem,
    /// N5 viewer pyramids built from single-scale levels.
    N5Viewer,
}

/// Multiscale pyramid hosted by a group: per-level paths and transforms,
/// index aligned, plus units shared by every level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MultiscaleRecord")]
pub struct MultiscaleMetadata {
    base_path: String,
    convention: MultiscaleConvention,
    paths: Vec<String>,
    transforms: Vec<AffineTransform3D>,
    units: Vec<String>,
}

/// Unchecked wire shape of [`MultiscaleMetadata`].
#[derive(Deserialize)]
struct MultiscaleRecord {
    base_path: String,
    convention: MultiscaleConvention,
    paths: Vec<String>,
    transforms: Vec<AffineTransform3D>,
    #[serde(default)]
    units: Vec<String>,
}

impl TryFrom<MultiscaleRecord> for MultiscaleMetadata {
    type Error = MetadataError;

    fn try_from(record: MultiscaleRecord) -> Result<Self, Self::Error> {
        let (paths, transforms) = (record.paths.len(), record.transforms.len());
        Self::new(
            record.base_path,
            record.convention,
            record.paths,
            record.transforms,
            record.units,
        )
        .ok_or(MetadataError::LevelMismatch { paths, transforms })
    }
}

impl MultiscaleMetadata {
    /// Build an aggregate, or `None` when there are no levels or the path
    /// and transform lists differ in length.
    #[must_use]
    pub fn new(
        base_path: impl Into<String>,
        convention: MultiscaleConvention,
        paths: Vec<String>,
        transforms: Vec<AffineTransform3D>,
        units: Vec<String>,
    ) -> Option<Self> {
        if paths.is_empty() || paths.len() != transforms.len() {
            return None;
        }
        Some(Self {
            base_path: base_path.into(),
            convention,
            paths,
            transforms,
            units,
        })
    }

    /// Path of the group hosting the pyramid.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Convention the pyramid was recognised under.
    #[must_use]
    pub fn convention(&self) -> MultiscaleConvention {
        self.convention
    }

    /// Storage path of every level, finest first.
    #[must_use]
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Transform of every level, aligned with [`Self::paths`].
    #[must_use]
    pub fn transforms(&self) -> &[AffineTransform3D] {
        &self.transforms
    }

    /// Number of levels.
    #[must_use]
    pub fn num_levels(&self) -> usize {
        self.paths.len()
    }

    /// Path and transform of level `index`.
    #[must_use]
    pub fn level(&self, index: usize) -> Option<(&str, &AffineTransform3D)> {
        let path = self.paths.get(index)?;
        let transform = self.transforms.get(index)?;
        Some((path.as_str(), transform))
    }

    /// Iterate `(path, transform)` pairs, finest level first.
    pub fn levels(&self) -> impl Iterator<Item = (&str, &AffineTransform3D)> + '_ {
        self.paths
            .iter()
            .map(String::as_str)
            .zip(self.transforms.iter())
    }
}

impl Metadata for MultiscaleMetadata {
    fn path(&self) -> &str {
        &self.base_path
    }

    fn attributes(&self) -> Option<&DatasetAttributes> {
        None
    }
}

impl PhysicalMetadata for MultiscaleMetadata {
    // Each level carries its own transform; see `transforms`.
    fn physical_transform(&self) -> Option<AffineTransform3D> {
        None
    }

    fn units(&self) -> Vec<String> {
        self.units.clone()
    }
}
