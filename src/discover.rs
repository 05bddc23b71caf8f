// Author: Lukas Bower
// Purpose: Bottom-up multiscale assembly over a populated storage tree.
#![forbid(unsafe_code)]

//! Once a discovery walk has built the tree and attached per-dataset
//! metadata, [`MultiscaleDiscoverer::parse_tree`] visits every interior node
//! children-first and attaches the aggregate of the first group parser that
//! recognises it. The tree must not change while the pass runs.

use log::{debug, trace};
use serde::Deserialize;

use crate::error::MetadataError;
use crate::group::{
    CosemMultiscaleParser, GroupParser, N5ViewerMultiscaleParser, ScaleLevelPattern,
    DEFAULT_SCALE_LEVEL_PATTERN,
};
use crate::metadata::{MultiscaleMetadata, NodeMetadata};
use crate::tree::TreeNode;

/// Group parser selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParserKind {
    /// [`CosemMultiscaleParser`].
    Cosem,
    /// [`N5ViewerMultiscaleParser`].
    N5Viewer,
}

/// Options controlling multiscale assembly.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiscoveryConfig {
    /// Pattern a child name must match to count as a scale level.
    pub scale_level_pattern: String,
    /// Replace metadata already attached to a recognised group.
    pub replace_existing: bool,
    /// Parsers to try, in order; the first match wins.
    pub parsers: Vec<ParserKind>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            scale_level_pattern: DEFAULT_SCALE_LEVEL_PATTERN.to_owned(),
            replace_existing: true,
            parsers: vec![ParserKind::Cosem, ParserKind::N5Viewer],
        }
    }
}

impl DiscoveryConfig {
    /// Parse a JSON configuration; omitted fields keep their defaults.
    pub fn from_json(data: &str) -> Result<Self, MetadataError> {
        Ok(serde_json::from_str(data)?)
    }
}

/// Runs the registered group parsers over a tree.
pub struct MultiscaleDiscoverer {
    parsers: Vec<Box<dyn GroupParser>>,
    replace_existing: bool,
}

impl std::fmt::Debug for MultiscaleDiscoverer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let conventions: Vec<_> = self.parsers.iter().map(|p| p.convention()).collect();
        f.debug_struct("MultiscaleDiscoverer")
            .field("parsers", &conventions)
            .field("replace_existing", &self.replace_existing)
            .finish()
    }
}

impl Default for MultiscaleDiscoverer {
    fn default() -> Self {
        Self {
            parsers: vec![
                Box::new(CosemMultiscaleParser::new()),
                Box::new(N5ViewerMultiscaleParser::new()),
            ],
            replace_existing: true,
        }
    }
}

impl MultiscaleDiscoverer {
    /// Discoverer with the COSEM and N5 viewer parsers, in that order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the parsers named in `config`, sharing one compiled pattern.
    pub fn from_config(config: &DiscoveryConfig) -> Result<Self, MetadataError> {
        let pattern = ScaleLevelPattern::new(&config.scale_level_pattern)?;
        let parsers = config
            .parsers
            .iter()
            .map(|kind| -> Box<dyn GroupParser> {
                match kind {
                    ParserKind::Cosem => Box::new(CosemMultiscaleParser::with_scale_level_pattern(
                        pattern.clone(),
                    )),
                    ParserKind::N5Viewer => Box::new(
                        N5ViewerMultiscaleParser::with_scale_level_pattern(pattern.clone()),
                    ),
                }
            })
            .collect();
        Ok(Self {
            parsers,
            replace_existing: config.replace_existing,
        })
    }

    /// Discoverer with caller-supplied parsers, tried in order.
    #[must_use]
    pub fn with_parsers(parsers: Vec<Box<dyn GroupParser>>, replace_existing: bool) -> Self {
        Self {
            parsers,
            replace_existing,
        }
    }

    /// First aggregate any parser produces for `node`.
    #[must_use]
    pub fn parse_node(&self, node: &TreeNode) -> Option<MultiscaleMetadata> {
        self.parsers
            .iter()
            .find_map(|parser| parser.parse_metadata_group(node))
    }

    /// Assemble multiscale metadata for every interior node under `root`,
    /// children before parents. Returns the number of groups recognised.
    pub fn parse_tree(&self, root: &mut TreeNode) -> usize {
        let mut recognised = 0;
        for child in root.children_mut().iter_mut() {
            recognised += self.parse_tree(child);
        }

        if root.is_dataset() || root.children().is_empty() {
            return recognised;
        }
        if !self.replace_existing && root.metadata().is_some() {
            trace!("keeping existing metadata on {}", root.path());
            return recognised;
        }

        match self.parse_node(root) {
            Some(aggregate) => {
                debug!(
                    "attaching {:?} multiscale metadata to {}",
                    aggregate.convention(),
                    root.path()
                );
                root.set_metadata(NodeMetadata::Multiscale(aggregate));
                recognised + 1
            }
            None => recognised,
        }
    }
}
