// Author: Lukas Bower
// Purpose: Crate root for N5 multiscale metadata discovery.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Metadata discovery for hierarchical N-dimensional array containers.
//!
//! A discovery walk produces a [`TreeNode`] tree mirroring the container's
//! groups and datasets, attaching a [`NodeMetadata`] record to each dataset.
//! [`MultiscaleDiscoverer`] then visits interior nodes bottom-up and, when a
//! node's children form a resolution pyramid under a supported convention,
//! attaches a [`MultiscaleMetadata`] aggregate to it.

pub mod discover;
pub mod error;
pub mod group;
pub mod metadata;
pub mod transform;
pub mod tree;

pub use discover::{DiscoveryConfig, MultiscaleDiscoverer, ParserKind};
pub use error::{MetadataError, Result};
pub use group::{CosemMultiscaleParser, GroupParser, N5ViewerMultiscaleParser, ScaleLevelPattern};
pub use metadata::{Metadata, MultiscaleConvention, MultiscaleMetadata, NodeMetadata, PhysicalMetadata};
pub use transform::AffineTransform3D;
pub use tree::TreeNode;
