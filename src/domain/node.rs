use std::{convert::Infallible, fmt, str::FromStr};

use crate::domain::NodeId;

/// One entry in a concept hierarchy.
///
/// Parent and child links are plain id references into the owning
/// [`Hierarchy`](crate::domain::Hierarchy). Either list may mention ids that
/// are absent from the store (imported data is not always consistent) and
/// consumers are expected to skip such dangling references rather than
/// fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Display label.
    pub name: String,
    /// Depth/kind label.
    pub kind: NodeKind,
    /// Free-text definition. Semantically meaningful only for entry nodes.
    pub definition: String,
    /// Ids of parent nodes, in insertion order. Empty for a root.
    pub parents: Vec<NodeId>,
    /// Ids of child nodes, maintained as the inverse of `parents` across the
    /// whole store.
    pub children: Vec<NodeId>,
}

impl Node {
    /// Constructs a node with no links.
    #[must_use]
    pub const fn new(name: String, kind: NodeKind, definition: String) -> Self {
        Self {
            name,
            kind,
            definition,
            parents: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Whether this node has no parents.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Whether this node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Category label denoting a node's depth/kind in the hierarchy.
///
/// The set is open: imported data may carry arbitrary labels, which are
/// preserved verbatim through [`NodeKind::Unrecognised`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Top-level category; the usual root kind.
    Category,
    /// Section within a category.
    Section,
    /// Topic within a section.
    Topic,
    /// Entry: the deepest kind, and the only one that carries a definition.
    Entry,
    /// A label outside the known set, preserved verbatim.
    Unrecognised(String),
}

impl NodeKind {
    /// The label as written in tabular form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Category => "category",
            Self::Section => "section",
            Self::Topic => "topic",
            Self::Entry => "entry",
            Self::Unrecognised(label) => label,
        }
    }

    /// Whether this kind is the entry (deepest) kind.
    #[must_use]
    pub const fn is_entry(&self) -> bool {
        matches!(self, Self::Entry)
    }

    /// Whether the label is one of the four known kinds.
    #[must_use]
    pub const fn is_recognised(&self) -> bool {
        !matches!(self, Self::Unrecognised(_))
    }

    /// The kind conventionally nested directly beneath this one.
    ///
    /// Entries and unrecognised labels fall through to [`NodeKind::Entry`].
    #[must_use]
    pub const fn child(&self) -> Self {
        match self {
            Self::Category => Self::Section,
            Self::Section => Self::Topic,
            _ => Self::Entry,
        }
    }
}

impl From<&str> for NodeKind {
    fn from(label: &str) -> Self {
        match label {
            "category" => Self::Category,
            "section" => Self::Section,
            "topic" => Self::Topic,
            "entry" => Self::Entry,
            other => Self::Unrecognised(other.to_string()),
        }
    }
}

impl FromStr for NodeKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("category", NodeKind::Category)]
    #[test_case("section", NodeKind::Section)]
    #[test_case("topic", NodeKind::Topic)]
    #[test_case("entry", NodeKind::Entry)]
    fn known_labels_round_trip(label: &str, expected: NodeKind) {
        let kind = NodeKind::from(label);
        assert_eq!(kind, expected);
        assert_eq!(kind.as_str(), label);
        assert!(kind.is_recognised());
    }

    #[test]
    fn arbitrary_labels_are_preserved() {
        let kind = NodeKind::from("appendix");
        assert_eq!(kind, NodeKind::Unrecognised("appendix".to_string()));
        assert_eq!(kind.as_str(), "appendix");
        assert!(!kind.is_recognised());
    }

    #[test]
    fn child_kinds_descend_to_entry() {
        assert_eq!(NodeKind::Category.child(), NodeKind::Section);
        assert_eq!(NodeKind::Section.child(), NodeKind::Topic);
        assert_eq!(NodeKind::Topic.child(), NodeKind::Entry);
        assert_eq!(NodeKind::Entry.child(), NodeKind::Entry);
        assert_eq!(
            NodeKind::Unrecognised("appendix".to_string()).child(),
            NodeKind::Entry
        );
    }

    #[test]
    fn fresh_node_is_root_and_leaf() {
        let node = Node::new("A".to_string(), NodeKind::Category, String::new());
        assert!(node.is_root());
        assert!(node.is_leaf());
    }
}
