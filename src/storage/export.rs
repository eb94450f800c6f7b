//! Serialisation of a hierarchy back into the flat relational form.

use super::{
    relational::{DEFINITION_COLUMN, ID_COLUMN, KIND_COLUMN, NAME_COLUMN, PARENT_PREFIX},
    table::{Cell, Table},
};
use crate::domain::Hierarchy;

/// Serialises `hierarchy` as a relational table.
///
/// The column set is dynamic: one parent-reference column per parent
/// position, up to the maximum observed across the store, recomputed on
/// every call. Each row fills only as many parent cells as the node has
/// parents; the rest stay empty.
#[must_use]
pub fn to_table(hierarchy: &Hierarchy) -> Table {
    let max_parents = hierarchy
        .iter()
        .map(|(_, node)| node.parents.len())
        .max()
        .unwrap_or(0);

    let mut header: Vec<String> = [ID_COLUMN, NAME_COLUMN, DEFINITION_COLUMN, KIND_COLUMN]
        .iter()
        .map(ToString::to_string)
        .collect();
    for position in 1..=max_parents {
        header.push(format!("{PARENT_PREFIX} {position}"));
    }

    let width = header.len();
    let rows = hierarchy
        .iter()
        .map(|(id, node)| {
            let mut row = vec![
                Cell::text(id.as_str()),
                Cell::text(node.name.as_str()),
                Cell::text(node.definition.as_str()),
                Cell::text(node.kind.as_str()),
            ];
            row.extend(node.parents.iter().map(|parent| Cell::text(parent.as_str())));
            row.resize(width, Cell::Empty);
            row
        })
        .collect();

    Table::with_header(header, rows)
}
