// Author: Lukas Bower
// Purpose: Owned storage tree node carrying optional metadata and ordered children.
#![forbid(unsafe_code)]

//! In-memory storage hierarchy.
//!
//! A [`TreeNode`] knows nothing about metadata schemas: it holds a path, a
//! dataset flag, an optional [`NodeMetadata`] and its children in insertion
//! order. Structural operations never fail; removing an absent child is a
//! no-op because trees are built from possibly incomplete storage listings.

use std::fmt;

use log::{trace, warn};

use crate::metadata::{Metadata, NodeMetadata};

/// Node of a storage tree, identified by its path.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    path: String,
    is_dataset: bool,
    metadata: Option<NodeMetadata>,
    children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a childless node without metadata.
    #[must_use]
    pub fn new(path: impl Into<String>, is_dataset: bool) -> Self {
        Self {
            path: path.into(),
            is_dataset,
            metadata: None,
            children: Vec::new(),
        }
    }

    /// Storage path of the node.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Final path segment, or `""` for the root.
    ///
    /// A single leading `/` or `\` is stripped first so both separator styles
    /// name the same node; a trailing `/` is ignored.
    #[must_use]
    pub fn node_name(&self) -> &str {
        node_name(&self.path)
    }

    /// Whether a schema parser flagged this node as a dataset.
    #[must_use]
    pub fn is_dataset(&self) -> bool {
        self.is_dataset
    }

    /// Set the dataset flag.
    pub fn set_is_dataset(&mut self, is_dataset: bool) {
        self.is_dataset = is_dataset;
    }

    /// Attached metadata, if any.
    #[must_use]
    pub fn metadata(&self) -> Option<&NodeMetadata> {
        self.metadata.as_ref()
    }

    /// Attach or replace the metadata record.
    pub fn set_metadata(&mut self, metadata: impl Into<NodeMetadata>) {
        let metadata = metadata.into();
        if self.is_dataset && !metadata.is_dataset() {
            warn!(
                "dataset node {} given metadata without dataset attributes",
                self.path
            );
        }
        self.metadata = Some(metadata);
    }

    /// Detach and return the metadata record.
    pub fn take_metadata(&mut self) -> Option<NodeMetadata> {
        self.metadata.take()
    }

    /// Append an owned child. Paths are not de-duplicated.
    pub fn add(&mut self, child: TreeNode) {
        self.children.push(child);
    }

    /// Detach the first child with the same path as `child`; `None` if
    /// there is none. Metadata and descendants are not compared.
    pub fn remove(&mut self, child: &TreeNode) -> Option<TreeNode> {
        self.remove_path(&child.path)
    }

    /// Detach the first direct child with the given path.
    pub fn remove_path(&mut self, path: &str) -> Option<TreeNode> {
        let index = self.children.iter().position(|c| c.path == path)?;
        Some(self.children.remove(index))
    }

    /// Drop every child.
    pub fn remove_all_children(&mut self) {
        self.children.clear();
    }

    /// Children in insertion order.
    #[must_use]
    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    /// Live, mutable child collection.
    pub fn children_mut(&mut self) -> &mut Vec<TreeNode> {
        &mut self.children
    }

    /// First direct child whose node name is `name`.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.children.iter().find(|c| c.node_name() == name)
    }

    /// Depth-first search of the subtree (including `self`) for `path`.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&TreeNode> {
        self.depth_first().find(|node| node.path == path)
    }

    /// Mutable counterpart of [`Self::find`].
    pub fn find_mut(&mut self, path: &str) -> Option<&mut TreeNode> {
        if self.path == path {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|child| child.find_mut(path))
    }

    /// Pre-order iterator over the subtree, starting at `self`.
    pub fn depth_first(&self) -> DepthFirst<'_> {
        DepthFirst { stack: vec![self] }
    }

    /// Indented dump of the subtree: one line per node holding its path,
    /// indented one space per depth. Diagnostic output only.
    #[must_use]
    pub fn print_recursive(&self) -> String {
        let mut out = String::new();
        print_recursive_into(self, "", &mut out);
        out
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.node_name();
        if name.is_empty() {
            f.write_str("/")
        } else {
            f.write_str(name)
        }
    }
}

/// Pre-order traversal returned by [`TreeNode::depth_first`].
#[derive(Debug)]
pub struct DepthFirst<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

fn print_recursive_into(node: &TreeNode, prefix: &str, out: &mut String) {
    out.push_str(prefix);
    out.push_str(&node.path);
    out.push('\n');
    let child_prefix = format!("{prefix} ");
    for child in &node.children {
        trace!("print_recursive visiting {}", child.path);
        print_recursive_into(child, &child_prefix, out);
    }
}

/// Final segment of `path` after stripping one leading `/` or `\`.
#[must_use]
pub fn node_name(path: &str) -> &str {
    let relative = path
        .strip_prefix('/')
        .or_else(|| path.strip_prefix('\\'))
        .unwrap_or(path);
    let trimmed = relative.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}
