//! Read-only traversals over a hierarchy.
//!
//! Traversals follow plain id links and carry a visited set: the link graph
//! permits multiple parents, imported data can contain cycles, and either
//! link list may mention ids that do not resolve. Every walk terminates and
//! silently skips dangling references.

use std::collections::{BTreeSet, VecDeque};

use crate::domain::{Hierarchy, NodeId, NodeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

/// Every ancestor of `id`, nearest first (breadth-first up the parent
/// links). The node itself is not included.
#[must_use]
pub fn ancestors(hierarchy: &Hierarchy, id: &NodeId) -> Vec<NodeId> {
    walk(hierarchy, id, Direction::Up)
}

/// Every descendant of `id`, nearest first (breadth-first down the child
/// links). The node itself is not included.
#[must_use]
pub fn descendants(hierarchy: &Hierarchy, id: &NodeId) -> Vec<NodeId> {
    walk(hierarchy, id, Direction::Down)
}

/// The descendants of `id` whose kind equals `kind`.
#[must_use]
pub fn descendants_of_kind(hierarchy: &Hierarchy, id: &NodeId, kind: &NodeKind) -> Vec<NodeId> {
    descendants(hierarchy, id)
        .into_iter()
        .filter(|descendant| {
            hierarchy
                .get(descendant)
                .is_some_and(|node| &node.kind == kind)
        })
        .collect()
}

fn walk(hierarchy: &Hierarchy, start: &NodeId, direction: Direction) -> Vec<NodeId> {
    let mut visited: BTreeSet<&NodeId> = BTreeSet::new();
    let mut queue: VecDeque<&NodeId> = VecDeque::new();
    let mut reached = Vec::new();

    visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        let Some(node) = hierarchy.get(current) else {
            continue;
        };
        let links = match direction {
            Direction::Up => &node.parents,
            Direction::Down => &node.children,
        };
        for next in links {
            if !visited.insert(next) {
                continue;
            }
            if hierarchy.get(next).is_some() {
                reached.push(next.clone());
                queue.push_back(next);
            }
        }
    }

    reached
}
