//! Directory forest built from listings.
//!
//! Each listing contributes one root. Nodes live in an arena addressed by
//! [`NodeIdx`]; a directory whose root-relative path was already seen under an
//! earlier root is shared rather than duplicated, so one node may be reachable
//! from several roots.

pub mod builder;
mod node;

pub use builder::{ListingBuilder, ListingOptions};
pub use node::DirectoryNode;

use crate::types::{DirectoryIdx, NodeIdx};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default)]
pub struct DirectoryForest {
    nodes: Vec<DirectoryNode>,
    roots: Vec<NodeIdx>,
    /// Root-relative path -> first node registered under it
    by_path: HashMap<String, NodeIdx>,
}

impl DirectoryForest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_root(&mut self, name: &str, row: DirectoryIdx) -> NodeIdx {
        let idx = NodeIdx(self.nodes.len());
        self.nodes
            .push(DirectoryNode::new(name, idx, String::new(), row));
        self.roots.push(idx);
        self.by_path.entry(String::new()).or_insert(idx);
        idx
    }

    /// Create a node under `parent` and register it in the path index.
    pub fn add_child(
        &mut self,
        parent: NodeIdx,
        name: &str,
        rel_path: String,
        row: DirectoryIdx,
        root: NodeIdx,
    ) -> NodeIdx {
        let idx = NodeIdx(self.nodes.len());
        self.by_path.entry(rel_path.clone()).or_insert(idx);
        self.nodes.push(DirectoryNode::new(name, root, rel_path, row));
        self.nodes[parent.0].children.push(idx);
        idx
    }

    /// Make an existing node reachable from `parent` as well.
    pub fn attach(&mut self, parent: NodeIdx, child: NodeIdx) {
        let children = &mut self.nodes[parent.0].children;
        if !children.contains(&child) {
            children.push(child);
        }
    }

    pub fn roots(&self) -> &[NodeIdx] {
        &self.roots
    }

    pub fn primary_root(&self) -> Option<NodeIdx> {
        self.roots.first().copied()
    }

    /// First root (primary, then named roots in listing order) called `name`
    pub fn find_root(&self, name: &str) -> Option<NodeIdx> {
        self.roots
            .iter()
            .copied()
            .find(|idx| self.nodes[idx.0].name == name)
    }

    pub fn find_child(&self, parent: NodeIdx, name: &str) -> Option<NodeIdx> {
        self.nodes[parent.0]
            .children
            .iter()
            .copied()
            .find(|idx| self.nodes[idx.0].name == name)
    }

    /// Node registered first under a root-relative path
    pub fn lookup(&self, rel_path: &str) -> Option<NodeIdx> {
        self.by_path.get(rel_path).copied()
    }

    pub fn node(&self, idx: NodeIdx) -> &DirectoryNode {
        &self.nodes[idx.0]
    }

    pub fn node_mut(&mut self, idx: NodeIdx) -> &mut DirectoryNode {
        &mut self.nodes[idx.0]
    }

    /// Nodes of the subtree at `start` in pre-order, each visited once.
    pub fn preorder(&self, start: NodeIdx) -> Vec<NodeIdx> {
        let mut order = Vec::new();
        let mut seen = HashSet::new();
        let mut pending = vec![start];
        while let Some(idx) = pending.pop() {
            if !seen.insert(idx) {
                continue;
            }
            order.push(idx);
            pending.extend(self.nodes[idx.0].children.iter().rev().copied());
        }
        order
    }
}
