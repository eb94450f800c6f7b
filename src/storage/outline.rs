//! Parsing of outline tables: nesting depth encoded by column position.
//!
//! Two heuristics here are deliberate and known to be ambiguous:
//!
//! - the cell immediately to the right of a node is taken as its definition
//!   whenever it is textual, even when that cell was meant as a sibling or
//!   child;
//! - the per-column "last seen node" record is only ever overwritten, never
//!   cleared, so a row that skips columns can adopt a stale node from an
//!   earlier row as its parent.
//!
//! Existing spreadsheets depend on both behaviours; changing either is a
//! product decision, not a parser fix.

use std::collections::BTreeMap;

use tracing::debug;

use super::table::{Cell, Table};
use crate::domain::{Hierarchy, Node, NodeId, NodeKind};

/// The kind assigned to nodes found at outline column `depth`.
fn kind_at_depth(depth: usize) -> NodeKind {
    match depth {
        0 => NodeKind::Category,
        1 => NodeKind::Section,
        2 => NodeKind::Topic,
        3 => NodeKind::Entry,
        _ => NodeKind::Unrecognised("unknown".to_string()),
    }
}

/// Builds a hierarchy from a headerless outline table.
///
/// Cells are visited row by row, left to right. Every textual cell that is
/// non-blank after trimming becomes a node with a fresh `N<counter>` id; the
/// counter is shared across the whole parse and never reused. A node's
/// parent is the most recently emitted node in the nearest populated column
/// strictly to its left; with no such column the node is a root. Its
/// definition is the trimmed content of the cell immediately to its right,
/// when that cell is textual.
#[must_use]
pub fn from_table(table: &Table) -> Hierarchy {
    let mut hierarchy = Hierarchy::new();
    let mut counter = 1usize;
    // Most recently emitted node per column index. Overwritten, never
    // cleared.
    let mut last_seen: BTreeMap<usize, NodeId> = BTreeMap::new();

    for row in &table.rows {
        for (column, cell) in row.iter().enumerate() {
            let Some(text) = cell.as_text() else {
                continue;
            };
            let name = text.trim();
            if name.is_empty() {
                continue;
            }

            let definition = row
                .get(column + 1)
                .and_then(Cell::as_text)
                .map(str::trim)
                .unwrap_or_default()
                .to_string();

            let id = NodeId::from(format!("N{counter}"));
            counter += 1;

            // Nearest populated column strictly to the left wins.
            let parent = (0..column)
                .rev()
                .find_map(|left| last_seen.get(&left))
                .cloned();

            let mut node = Node::new(name.to_string(), kind_at_depth(column), definition);
            node.parents.extend(parent);

            last_seen.insert(column, id.clone());
            hierarchy.insert(id, node);
        }
    }

    hierarchy.link_children();
    debug!(nodes = hierarchy.len(), "parsed outline table");
    hierarchy
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn cells(fields: &[&str]) -> Vec<Cell> {
        fields
            .iter()
            .map(|field| {
                if field.is_empty() {
                    Cell::Empty
                } else {
                    Cell::text(*field)
                }
            })
            .collect()
    }

    fn node_by_name<'a>(hierarchy: &'a Hierarchy, name: &str) -> (&'a NodeId, &'a Node) {
        hierarchy
            .iter()
            .find(|(_, node)| node.name == name)
            .unwrap_or_else(|| panic!("no node named {name}"))
    }

    #[test]
    fn parent_is_carried_from_the_previous_row() {
        let table = Table::headerless(vec![
            cells(&["A", "B", "C"]),
            cells(&["", "B2", "C2"]),
        ]);

        let hierarchy = from_table(&table);

        let (a_id, _) = node_by_name(&hierarchy, "A");
        let (_, b2) = node_by_name(&hierarchy, "B2");
        // Row 2's column 0 is empty, so B2's parent is the last node seen at
        // column 0: A, from row 1.
        assert_eq!(b2.parents, vec![a_id.clone()]);
    }

    #[test]
    fn ids_are_sequential_and_never_reused() {
        let table = Table::headerless(vec![
            cells(&["A", "B"]),
            cells(&["C", "D"]),
        ]);

        let hierarchy = from_table(&table);

        for (id, expected) in [("N1", "A"), ("N2", "B"), ("N3", "C"), ("N4", "D")] {
            assert_eq!(hierarchy.get(&NodeId::from(id)).unwrap().name, expected);
        }
    }

    #[test_case(0, NodeKind::Category)]
    #[test_case(1, NodeKind::Section)]
    #[test_case(2, NodeKind::Topic)]
    #[test_case(3, NodeKind::Entry)]
    fn kinds_follow_column_depth(depth: usize, expected: NodeKind) {
        let mut fields = vec![""; depth];
        fields.push("X");
        let hierarchy = from_table(&Table::headerless(vec![cells(&fields)]));

        let (_, node) = node_by_name(&hierarchy, "X");
        assert_eq!(node.kind, expected);
    }

    #[test]
    fn depth_beyond_the_table_is_unknown() {
        let table = Table::headerless(vec![cells(&["", "", "", "", "Deep"])]);
        let hierarchy = from_table(&table);
        let (_, node) = node_by_name(&hierarchy, "Deep");
        assert_eq!(node.kind, NodeKind::Unrecognised("unknown".to_string()));
    }

    #[test]
    fn definition_is_the_textual_right_neighbour() {
        // The neighbour rule is literal: B's own neighbour is C, so B's
        // "definition" is C's text even though C is also a node.
        let table = Table::headerless(vec![cells(&["A", "B", "C"])]);
        let hierarchy = from_table(&table);

        let (_, b) = node_by_name(&hierarchy, "B");
        assert_eq!(b.definition, "C");
        let (_, c) = node_by_name(&hierarchy, "C");
        assert_eq!(c.definition, "");
    }

    #[test]
    fn numeric_neighbour_is_not_a_definition() {
        let table = Table::headerless(vec![vec![Cell::text("A"), Cell::Number(3.0)]]);
        let hierarchy = from_table(&table);
        let (_, a) = node_by_name(&hierarchy, "A");
        assert_eq!(a.definition, "");
    }

    #[test]
    fn blank_cells_produce_no_nodes() {
        let table = Table::headerless(vec![cells(&["A", "   ", ""])]);
        let hierarchy = from_table(&table);
        assert_eq!(hierarchy.len(), 1);
    }

    #[test]
    fn children_are_linked_after_the_parse() {
        let table = Table::headerless(vec![
            cells(&["A"]),
            cells(&["", "B"]),
            cells(&["", "C"]),
        ]);

        let hierarchy = from_table(&table);

        let (a_id, a) = node_by_name(&hierarchy, "A");
        let (b_id, b) = node_by_name(&hierarchy, "B");
        let (c_id, _) = node_by_name(&hierarchy, "C");
        assert_eq!(a.children, vec![b_id.clone(), c_id.clone()]);
        assert_eq!(b.parents, vec![a_id.clone()]);
        assert!(a.is_root());
    }

    #[test]
    fn stale_deeper_column_survives_skipped_levels() {
        // Row 3 skips column 1, so D's parent lookup walks left from column
        // 2 and finds the stale column-1 record (B) rather than anything in
        // its own row. Known edge case, preserved.
        let table = Table::headerless(vec![
            cells(&["A", "B", "C"]),
            cells(&["A2"]),
            cells(&["", "", "D"]),
        ]);

        let hierarchy = from_table(&table);

        let (b_id, _) = node_by_name(&hierarchy, "B");
        let (_, d) = node_by_name(&hierarchy, "D");
        assert_eq!(d.parents, vec![b_id.clone()]);
    }
}
