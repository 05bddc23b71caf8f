// Author: Lukas Bower
// Purpose: Metadata capabilities and the tagged metadata value attached to tree nodes.
#![forbid(unsafe_code)]

//! Metadata model for storage tree nodes.
//!
//! Records are inspected through two capabilities rather than by concrete
//! type: [`Metadata`] (path and dataset attributes) and [`PhysicalMetadata`]
//! (affine transform and per-axis units). [`NodeMetadata`] is the value a
//! [`crate::TreeNode`] carries; [`NodeMetadata::as_physical`] is the
//! capability query.

use serde::{Deserialize, Serialize};

use crate::transform::AffineTransform3D;

pub mod cosem;
pub mod multiscale;
pub mod single_scale;

pub use cosem::{CosemMetadata, CosemTransform};
pub use multiscale::{MultiscaleConvention, MultiscaleMetadata};
pub use single_scale::{
    DatasetMetadata, PixelResolution, SingleScaleLegacyMetadata, SingleScaleMetadata,
};

/// Minimal contract every metadata record satisfies.
pub trait Metadata {
    /// Storage path the record describes.
    fn path(&self) -> &str;

    /// Dataset attributes when the record describes exactly one dataset.
    ///
    /// Groups and multiscale aggregates return `None`.
    fn attributes(&self) -> Option<&DatasetAttributes>;

    /// Whether the record describes a single dataset.
    fn is_dataset(&self) -> bool {
        self.attributes().is_some()
    }
}

/// Records that place their data in a physical coordinate space.
pub trait PhysicalMetadata: Metadata {
    /// Affine map from array index space to physical space.
    ///
    /// `None` when no single transform applies, e.g. for a pyramid whose
    /// levels each carry their own.
    fn physical_transform(&self) -> Option<AffineTransform3D>;

    /// Per-axis unit labels, x axis first.
    fn units(&self) -> Vec<String>;
}

/// Element type of an N5 dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Unsigned 8-bit integer.
    Uint8,
    /// Unsigned 16-bit integer.
    Uint16,
    /// Unsigned 32-bit integer.
    Uint32,
    /// Unsigned 64-bit integer.
    Uint64,
    /// Signed 8-bit integer.
    Int8,
    /// Signed 16-bit integer.
    Int16,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// 32-bit float.
    Float32,
    /// 64-bit float.
    Float64,
    /// Opaque serialized object blocks.
    Object,
}

/// Attributes of a chunked array dataset as stored in its attribute document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetAttributes {
    /// Array extent per dimension.
    pub dimensions: Vec<u64>,
    /// Chunk extent per dimension.
    pub block_size: Vec<u32>,
    /// Element type.
    pub data_type: DataType,
    /// Compression descriptor, kept opaque.
    #[serde(default)]
    pub compression: serde_json::Value,
}

impl DatasetAttributes {
    /// Attributes with no compression descriptor.
    #[must_use]
    pub fn new(dimensions: Vec<u64>, block_size: Vec<u32>, data_type: DataType) -> Self {
        Self {
            dimensions,
            block_size,
            data_type,
            compression: serde_json::Value::Null,
        }
    }

    /// Number of array dimensions.
    #[must_use]
    pub fn num_dimensions(&self) -> usize {
        self.dimensions.len()
    }
}

/// Metadata attached to a tree node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeMetadata {
    /// Plain dataset without physical placement.
    Dataset(DatasetMetadata),
    /// COSEM single-scale dataset.
    Cosem(CosemMetadata),
    /// N5 viewer single-scale dataset.
    SingleScale(SingleScaleMetadata),
    /// Legacy N5 viewer single-scale dataset.
    SingleScaleLegacy(SingleScaleLegacyMetadata),
    /// Aggregate describing a multiscale pyramid.
    Multiscale(MultiscaleMetadata),
}

impl NodeMetadata {
    /// View the record through the [`Metadata`] capability.
    #[must_use]
    pub fn as_metadata(&self) -> &dyn Metadata {
        match self {
            Self::Dataset(inner) => inner,
            Self::Cosem(inner) => inner,
            Self::SingleScale(inner) => inner,
            Self::SingleScaleLegacy(inner) => inner,
            Self::Multiscale(inner) => inner,
        }
    }

    /// View the record through the [`PhysicalMetadata`] capability, if it has it.
    #[must_use]
    pub fn as_physical(&self) -> Option<&dyn PhysicalMetadata> {
        match self {
            Self::Dataset(_) => None,
            Self::Cosem(inner) => Some(inner),
            Self::SingleScale(inner) => Some(inner),
            Self::SingleScaleLegacy(inner) => Some(inner),
            Self::Multiscale(inner) => Some(inner),
        }
    }

    /// Borrow the aggregate when this is a multiscale record.
    #[must_use]
    pub fn as_multiscale(&self) -> Option<&MultiscaleMetadata> {
        match self {
            Self::Multiscale(inner) => Some(inner),
            _ => None,
        }
    }
}

impl Metadata for NodeMetadata {
    fn path(&self) -> &str {
        self.as_metadata().path()
    }

    fn attributes(&self) -> Option<&DatasetAttributes> {
        self.as_metadata().attributes()
    }
}

impl From<DatasetMetadata> for NodeMetadata {
    fn from(value: DatasetMetadata) -> Self {
        Self::Dataset(value)
    }
}

impl From<CosemMetadata> for NodeMetadata {
    fn from(value: CosemMetadata) -> Self {
        Self::Cosem(value)
    }
}

impl From<SingleScaleMetadata> for NodeMetadata {
    fn from(value: SingleScaleMetadata) -> Self {
        Self::SingleScale(value)
    }
}

impl From<SingleScaleLegacyMetadata> for NodeMetadata {
    fn from(value: SingleScaleLegacyMetadata) -> Self {
        Self::SingleScaleLegacy(value)
    }
}

impl From<MultiscaleMetadata> for NodeMetadata {
    fn from(value: MultiscaleMetadata) -> Self {
        Self::Multiscale(value)
    }
}
