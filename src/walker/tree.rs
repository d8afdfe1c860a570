// Mon Feb 02 2026 - Alex

use crate::walker::RootKind;
use std::fmt;

/// One resolved contribution: a field, an array element, or a root.
///
/// Children are kept in the order they were discovered. Use
/// [`ContributionNode::sorted_children`] for the size-ranked view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionNode {
    identifier: String,
    type_name: String,
    size: usize,
    array_length: Option<usize>,
    children: Vec<ContributionNode>,
}

impl ContributionNode {
    pub fn new(identifier: &str, type_name: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            type_name: type_name.to_string(),
            size: 0,
            array_length: None,
            children: Vec::new(),
        }
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_child(mut self, child: ContributionNode) -> Self {
        self.push_child(child);
        self
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn array_length(&self) -> Option<usize> {
        self.array_length
    }

    pub fn children(&self) -> &[ContributionNode] {
        &self.children
    }

    pub fn child(&self, identifier: &str) -> Option<&ContributionNode> {
        self.children.iter().find(|c| c.identifier == identifier)
    }

    /// Children largest first. Equal sizes keep discovery order.
    pub fn sorted_children(&self) -> Vec<&ContributionNode> {
        let mut sorted: Vec<&ContributionNode> = self.children.iter().collect();
        sorted.sort_by(|a, b| b.size.cmp(&a.size));
        sorted
    }

    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.node_count()).sum::<usize>()
    }

    pub(crate) fn add_size(&mut self, bytes: usize) {
        self.size = self.size.saturating_add(bytes);
    }

    pub(crate) fn set_array_length(&mut self, length: usize) {
        self.array_length = Some(length);
    }

    /// Appends a finished child and folds its size into this node.
    pub(crate) fn push_child(&mut self, child: ContributionNode) {
        self.size = self.size.saturating_add(child.size);
        self.children.push(child);
    }
}

impl fmt::Display for ContributionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.array_length {
            Some(length) => write!(f, "{} ({}:{}) : {}", self.identifier, self.type_name, length, self.size),
            None => write!(f, "{} ({}) : {}", self.identifier, self.type_name, self.size),
        }
    }
}

/// The result of walking one root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionTree {
    kind: RootKind,
    root: ContributionNode,
}

impl ContributionTree {
    pub fn new(kind: RootKind, root: ContributionNode) -> Self {
        Self { kind, root }
    }

    pub fn kind(&self) -> RootKind {
        self.kind
    }

    pub fn root(&self) -> &ContributionNode {
        &self.root
    }

    pub fn size(&self) -> usize {
        self.root.size
    }

    pub fn identifier(&self) -> &str {
        &self.root.identifier
    }

    pub fn type_name(&self) -> &str {
        &self.root.type_name
    }
}
