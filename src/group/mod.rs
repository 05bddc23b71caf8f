// Author: Lukas Bower
// Purpose: Multiscale group recognition shared by every supported convention.
#![forbid(unsafe_code)]

//! Group parsers decide whether an interior node's children form a
//! multiscale pyramid.
//!
//! Every convention follows the same shape: children whose name is a scale
//! level *and* whose metadata has the convention's required shape become
//! candidates; candidates are ordered by numeric level; paths and transforms
//! are emitted index aligned. Conventions differ only in which metadata
//! qualifies and how its transform is read.

use std::collections::BTreeMap;

use log::{debug, trace};

use crate::metadata::{MultiscaleConvention, MultiscaleMetadata, NodeMetadata};
use crate::transform::AffineTransform3D;
use crate::tree::TreeNode;

mod cosem;
mod pattern;
mod viewer;

pub use cosem::CosemMultiscaleParser;
pub use pattern::{LevelKey, ScaleLevelPattern, DEFAULT_SCALE_LEVEL_PATTERN};
pub use viewer::N5ViewerMultiscaleParser;

/// Strategy recognising one multiscale convention.
pub trait GroupParser: Send + Sync {
    /// Convention this parser recognises.
    fn convention(&self) -> MultiscaleConvention;

    /// Inspect `node`'s children and build the aggregate, or `None` when the
    /// node is not a pyramid under this convention.
    fn parse_metadata_group(&self, node: &TreeNode) -> Option<MultiscaleMetadata>;
}

/// Per-level data a convention extracts from a qualifying child.
#[derive(Debug, Clone)]
pub(crate) struct LevelSource {
    pub(crate) transform: AffineTransform3D,
    pub(crate) units: Vec<String>,
}

/// Collect the scale levels under `node` accepted by `select` and assemble
/// the aggregate.
pub(crate) fn assemble_levels<F>(
    pattern: &ScaleLevelPattern,
    node: &TreeNode,
    convention: MultiscaleConvention,
    select: F,
) -> Option<MultiscaleMetadata>
where
    F: Fn(&NodeMetadata) -> Option<LevelSource>,
{
    let mut levels: BTreeMap<LevelKey, (&str, LevelSource)> = BTreeMap::new();
    for child in node.children() {
        let Some(key) = pattern.level_key(child.node_name()) else {
            continue;
        };
        match child.metadata().and_then(&select) {
            Some(source) => {
                levels.insert(key, (child.path(), source));
            }
            None => trace!(
                "skipping {}: named like a scale level but not {:?} level metadata",
                child.path(),
                convention
            ),
        }
    }

    if levels.is_empty() {
        return None;
    }

    let units = levels
        .values()
        .map(|(_, source)| &source.units)
        .find(|units| !units.is_empty())
        .cloned()
        .unwrap_or_default();
    let (paths, transforms): (Vec<String>, Vec<AffineTransform3D>) = levels
        .into_values()
        .map(|(path, source)| (path.to_owned(), source.transform))
        .unzip();

    let aggregate = MultiscaleMetadata::new(node.path(), convention, paths, transforms, units)?;
    debug!(
        "recognised {:?} multiscale group {} with {} levels",
        convention,
        aggregate.base_path(),
        aggregate.num_levels()
    );
    Some(aggregate)
}
