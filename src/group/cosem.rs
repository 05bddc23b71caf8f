// Author: Lukas Bower
// Purpose: Recognise COSEM multiscale groups.
#![forbid(unsafe_code)]

use super::{assemble_levels, GroupParser, LevelSource, ScaleLevelPattern};
use crate::error::MetadataError;
use crate::metadata::{MultiscaleConvention, MultiscaleMetadata, NodeMetadata, PhysicalMetadata};
use crate::tree::TreeNode;

/// Group parser for COSEM pyramids: every level must carry
/// [`crate::metadata::CosemMetadata`]; its transform comes from the
/// schema-native `transform` field.
#[derive(Debug, Clone, Default)]
pub struct CosemMultiscaleParser {
    pattern: ScaleLevelPattern,
}

impl CosemMultiscaleParser {
    /// Parser matching the canonical `s<N>` level names.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parser matching level names against `pattern`.
    pub fn with_pattern(pattern: &str) -> Result<Self, MetadataError> {
        Ok(Self::with_scale_level_pattern(ScaleLevelPattern::new(pattern)?))
    }

    /// Parser using an already compiled pattern.
    #[must_use]
    pub fn with_scale_level_pattern(pattern: ScaleLevelPattern) -> Self {
        Self { pattern }
    }
}

impl GroupParser for CosemMultiscaleParser {
    fn convention(&self) -> MultiscaleConvention {
        MultiscaleConvention::Cosem
    }

    fn parse_metadata_group(&self, node: &TreeNode) -> Option<MultiscaleMetadata> {
        assemble_levels(&self.pattern, node, self.convention(), |metadata| match metadata {
            NodeMetadata::Cosem(level) => Some(LevelSource {
                transform: level.transform().to_affine_3d(),
                units: level.units(),
            }),
            _ => None,
        })
    }
}
