// Author: Lukas Bower
// Purpose: Recognise N5 viewer multiscale groups.
#![forbid(unsafe_code)]

use super::{assemble_levels, GroupParser, LevelSource, ScaleLevelPattern};
use crate::error::MetadataError;
use crate::metadata::{MultiscaleConvention, MultiscaleMetadata, NodeMetadata, PhysicalMetadata};
use crate::tree::TreeNode;

/// Group parser for N5 viewer pyramids: levels carry either current or
/// legacy single-scale metadata, and their transform is the physical
/// transform those records report.
#[derive(Debug, Clone, Default)]
pub struct N5ViewerMultiscaleParser {
    pattern: ScaleLevelPattern,
}

impl N5ViewerMultiscaleParser {
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

impl GroupParser for N5ViewerMultiscaleParser {
    fn convention(&self) -> MultiscaleConvention {
        MultiscaleConvention::N5Viewer
    }

    fn parse_metadata_group(&self, node: &TreeNode) -> Option<MultiscaleMetadata> {
        assemble_levels(&self.pattern, node, self.convention(), |metadata| match metadata {
            NodeMetadata::SingleScale(level) => Some(physical_level(level)),
            NodeMetadata::SingleScaleLegacy(level) => Some(physical_level(level)),
            _ => None,
        })
    }
}

// No validation: a level without a transform is kept with the identity.
fn physical_level(level: &dyn PhysicalMetadata) -> LevelSource {
    LevelSource {
        transform: level.physical_transform().unwrap_or_default(),
        units: level.units(),
    }
}
