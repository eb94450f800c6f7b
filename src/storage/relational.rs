//! Parsing of relational tables: one row per node, with explicit id and
//! parent-reference columns.

use thiserror::Error;

use super::table::{Cell, Table};
use crate::domain::{Hierarchy, Node, NodeId, NodeKind};

/// Header of the identifier column.
pub const ID_COLUMN: &str = "id";
/// Header of the name column.
pub const NAME_COLUMN: &str = "name";
/// Header of the definition column. Optional on import.
pub const DEFINITION_COLUMN: &str = "definition";
/// Header of the type column.
pub const KIND_COLUMN: &str = "type";
/// Prefix shared by every parent-reference column (`parent 1`, `parent 2`,
/// …).
pub const PARENT_PREFIX: &str = "parent";

/// Errors raised when a table cannot be parsed as a relational hierarchy.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImportError {
    /// A required column is missing from the header row.
    ///
    /// Callers are expected to fall back to the outline parser on this error
    /// rather than abort the import.
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
}

/// Builds a hierarchy from a relational table.
///
/// Every non-missing value in a column whose header starts with
/// [`PARENT_PREFIX`] contributes one parent reference, in column order;
/// multiple parents are first class here. References that never resolve are
/// preserved on the node but get no child link. A row whose id repeats an
/// earlier row's replaces it; rows with no id at all are skipped.
///
/// # Errors
///
/// Returns [`ImportError::MissingColumn`] when the id, name, or type column
/// is absent (including when the table has no header row at all).
pub fn from_table(table: &Table) -> Result<Hierarchy, ImportError> {
    let headers = table
        .header
        .as_deref()
        .ok_or(ImportError::MissingColumn(ID_COLUMN))?;
    let column = |name: &'static str| {
        headers
            .iter()
            .position(|header| header == name)
            .ok_or(ImportError::MissingColumn(name))
    };

    let id_column = column(ID_COLUMN)?;
    let name_column = column(NAME_COLUMN)?;
    let kind_column = column(KIND_COLUMN)?;
    let definition_column = headers
        .iter()
        .position(|header| header == DEFINITION_COLUMN);
    let parent_columns: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, header)| header.starts_with(PARENT_PREFIX))
        .map(|(index, _)| index)
        .collect();

    let mut hierarchy = Hierarchy::new();
    for row in &table.rows {
        let id = row.get(id_column).map(Cell::to_field).unwrap_or_default();
        if id.is_empty() {
            continue;
        }

        let name = row.get(name_column).map(Cell::to_field).unwrap_or_default();
        let kind = NodeKind::from(
            row.get(kind_column)
                .map(Cell::to_field)
                .unwrap_or_default()
                .as_str(),
        );
        let definition = definition_column
            .and_then(|index| row.get(index))
            .map(Cell::to_field)
            .unwrap_or_default();

        let mut node = Node::new(name, kind, definition);
        node.parents = parent_columns
            .iter()
            .filter_map(|&index| row.get(index))
            .filter(|cell| !cell.is_empty())
            .map(|cell| NodeId::from(cell.to_field()))
            .collect();

        hierarchy.insert(NodeId::from(id), node);
    }

    hierarchy.link_children();
    Ok(hierarchy)
}
