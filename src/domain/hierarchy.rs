//! The in-memory hierarchy store.
//!
//! The [`Hierarchy`] knows nothing about files or tables. It owns the
//! id → node arena and every mutation, and keeps each node's `parents` and
//! `children` lists as maintained inverses of one another.

use std::collections::{BTreeMap, BTreeSet};

use petgraph::{
    algo::{is_cyclic_directed, tarjan_scc},
    graphmap::DiGraphMap,
};
use thiserror::Error;
use tracing::debug;

use crate::domain::{Node, NodeId, NodeKind, ident};

/// Id given to the root of a freshly started hierarchy.
pub const DEFAULT_ROOT_ID: &str = "br-1";

/// An in-memory mapping of node id → node record.
///
/// Links are plain id references (arena style, never nested ownership). The
/// link graph is a DAG in general (multiple parents are permitted) and
/// imported data may even contain cycles or dangling references, so
/// traversals guard themselves with visited sets
/// ([`crate::domain::query`]) and skip ids that do not resolve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hierarchy {
    nodes: BTreeMap<NodeId, Node>,
}

/// Errors produced by hierarchy mutations and queries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A node with this id already exists; the store was not mutated.
    #[error("node id {0} already exists")]
    DuplicateId(NodeId),

    /// No node with this id exists.
    #[error("node {0} not found")]
    NotFound(NodeId),

    /// The node still has children and may not be deleted.
    #[error("node {0} has children and cannot be deleted")]
    HasChildren(NodeId),
}

impl Hierarchy {
    /// Creates an empty hierarchy.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
        }
    }

    /// Starts a new hierarchy containing a single category root with the
    /// default id [`DEFAULT_ROOT_ID`].
    #[must_use]
    pub fn with_root(name: &str) -> Self {
        let mut hierarchy = Self::new();
        hierarchy
            .add(
                NodeId::from(DEFAULT_ROOT_ID),
                name.to_string(),
                NodeKind::Category,
                String::new(),
                None,
            )
            .expect("an empty hierarchy cannot contain a duplicate id");
        hierarchy
    }

    /// Inserts a new node.
    ///
    /// When `parent` is given, the node is created with that single parent
    /// and is appended to the parent's `children`. A parent id that does not
    /// resolve leaves the new node linked only on its own side: imported
    /// stores may hold dangling references, and partial links are tolerated
    /// throughout.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateId`], leaving the store untouched, if
    /// `id` is already present.
    pub fn add(
        &mut self,
        id: NodeId,
        name: String,
        kind: NodeKind,
        definition: String,
        parent: Option<NodeId>,
    ) -> Result<(), StoreError> {
        if self.nodes.contains_key(&id) {
            return Err(StoreError::DuplicateId(id));
        }

        let mut node = Node::new(name, kind, definition);
        if let Some(parent_id) = parent {
            node.parents.push(parent_id.clone());
            if let Some(parent_node) = self.nodes.get_mut(&parent_id) {
                parent_node.children.push(id.clone());
            }
        }

        debug!(%id, "added node");
        self.nodes.insert(id, node);
        Ok(())
    }

    /// Updates a node's display name, and for entry nodes its definition.
    ///
    /// Non-entry kinds keep their definition untouched: only the entry kind
    /// carries a meaningful definition.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if `id` is absent.
    pub fn edit(
        &mut self,
        id: &NodeId,
        name: String,
        definition: Option<String>,
    ) -> Result<(), StoreError> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        node.name = name;
        if let Some(definition) = definition.filter(|_| node.kind.is_entry()) {
            node.definition = definition;
        }
        Ok(())
    }

    /// Deletes a childless node.
    ///
    /// Only the link from the *first* parent is severed; a multi-parent node
    /// leaves stale references behind in any further parents' `children`
    /// lists. The asymmetry is deliberate: deletion is always driven from a
    /// single navigation position.
    ///
    /// Returns the first parent's id as the new navigation focus, or `None`
    /// when the deleted node was a root.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if `id` is absent, or
    /// [`StoreError::HasChildren`], leaving the store untouched, if the node
    /// still has children.
    pub fn remove(&mut self, id: &NodeId) -> Result<Option<NodeId>, StoreError> {
        let node = self
            .nodes
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        if !node.is_leaf() {
            return Err(StoreError::HasChildren(id.clone()));
        }

        let focus = node.parents.first().cloned();
        if let Some(parent) = focus
            .as_ref()
            .and_then(|parent_id| self.nodes.get_mut(parent_id))
        {
            if let Some(index) = parent.children.iter().position(|child| child == id) {
                parent.children.remove(index);
            }
        }

        self.nodes.remove(id);
        debug!(%id, "removed node");
        Ok(focus)
    }

    /// The set of siblings of `id`: the union of every parent's `children`,
    /// minus the node itself.
    ///
    /// Parents that do not resolve are skipped. Duplicates across multiple
    /// parents collapse; ordering is the set's, not the parents'.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if `id` itself is absent.
    pub fn siblings(&self, id: &NodeId) -> Result<BTreeSet<NodeId>, StoreError> {
        let node = self
            .nodes
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        let mut siblings = BTreeSet::new();
        for parent_id in &node.parents {
            if let Some(parent) = self.nodes.get(parent_id) {
                siblings.extend(parent.children.iter().cloned());
            }
        }
        siblings.remove(id);
        Ok(siblings)
    }

    /// Looks up a node by id.
    #[must_use]
    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Whether a node with this id exists.
    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of nodes in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the store holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over `(id, node)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &Node)> {
        self.nodes.iter()
    }

    /// Iterates over all node ids in id order.
    pub fn ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.keys()
    }

    /// Ids of every node with no parents, in id order.
    pub fn roots(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.is_root())
            .map(|(id, _)| id)
    }

    /// Derives the next unique id from the ids currently in the store.
    ///
    /// See [`ident::next_id`] for the exact semantics.
    #[must_use]
    pub fn next_id(&self) -> NodeId {
        ident::next_id(self.ids())
    }

    /// Inserts a node record directly, replacing any node already stored
    /// under `id`.
    ///
    /// This is the parsers' construction path: rows are materialised as-is
    /// (a repeated id overwrites the earlier row) and child links are
    /// established afterwards by [`Hierarchy::link_children`].
    pub fn insert(&mut self, id: NodeId, node: Node) {
        self.nodes.insert(id, node);
    }

    /// Rebuilds every node's `children` list from the stored `parents`
    /// lists.
    ///
    /// Existing `children` lists are discarded. Parent ids that do not
    /// resolve are skipped.
    pub fn link_children(&mut self) {
        for node in self.nodes.values_mut() {
            node.children.clear();
        }

        let links: Vec<(NodeId, NodeId)> = self
            .nodes
            .iter()
            .flat_map(|(id, node)| {
                node.parents
                    .iter()
                    .map(move |parent| (parent.clone(), id.clone()))
            })
            .collect();

        for (parent_id, child_id) in links {
            if let Some(parent) = self.nodes.get_mut(&parent_id) {
                parent.children.push(child_id);
            }
        }
    }

    /// Whether the link graph contains any cycle.
    #[must_use]
    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.graph())
    }

    /// Returns all cycles in the link graph as sorted groups of ids.
    ///
    /// Mutations never create cycles, but imported data can.
    #[must_use]
    pub fn cycles(&self) -> Vec<Vec<NodeId>> {
        let graph = self.graph();
        let mut cycles = Vec::new();

        for component in tarjan_scc(&graph) {
            if component.len() > 1 {
                let mut ids: Vec<NodeId> = component.iter().map(|&id| NodeId::from(id)).collect();
                ids.sort();
                cycles.push(ids);
                continue;
            }

            let Some(&node) = component.first() else {
                continue;
            };

            if graph.contains_edge(node, node) {
                cycles.push(vec![NodeId::from(node)]);
            }
        }

        cycles.sort();
        cycles
    }

    /// Child → parent edge graph over the links that resolve.
    fn graph(&self) -> DiGraphMap<&str, ()> {
        let mut graph = DiGraphMap::new();
        for (id, node) in &self.nodes {
            graph.add_node(id.as_str());
            for parent in &node.parents {
                if self.nodes.contains_key(parent) {
                    graph.add_edge(id.as_str(), parent.as_str(), ());
                }
            }
        }
        graph
    }
}
