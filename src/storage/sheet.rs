//! CSV file round-tripping for hierarchies.
//!
//! The interchange file is plain CSV. Import attempts the relational shape
//! first and, when its required columns are missing, re-reads the same file
//! without a header row and parses it as an outline.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, instrument};

use super::{
    outline, relational,
    table::{Cell, Table},
    to_table,
};
use crate::domain::Hierarchy;

/// Errors raised while reading a hierarchy file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A quoted field was never terminated.
    #[error("unterminated quoted field in {}", path.display())]
    UnterminatedQuote {
        /// Path of the offending file.
        path: PathBuf,
    },
}

/// Reads a CSV file into a [`Table`].
///
/// The first record becomes the header when `has_header` is set. Unquoted
/// cells that parse as finite numbers load as [`Cell::Number`]; blank
/// unquoted cells load as [`Cell::Empty`]; quoted cells are always textual.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a quoted field is left
/// unterminated.
pub fn read_table(path: &Path, has_header: bool) -> Result<Table, LoadError> {
    let content = fs::read_to_string(path)?;
    let records = parse_records(&content).ok_or_else(|| LoadError::UnterminatedQuote {
        path: path.to_path_buf(),
    })?;

    let mut records = records.into_iter();
    let header = if has_header {
        records.next().map(|record| {
            record
                .into_iter()
                .map(|field| field.value)
                .collect::<Vec<String>>()
        })
    } else {
        None
    };
    let rows = records
        .map(|record| record.into_iter().map(Field::into_cell).collect())
        .collect();

    Ok(Table { header, rows })
}

/// Writes a [`Table`] as CSV.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_table(path: &Path, table: &Table) -> io::Result<()> {
    let mut out = String::new();
    if let Some(header) = &table.header {
        push_record(&mut out, header.iter().map(String::as_str));
    }
    for row in &table.rows {
        let fields: Vec<String> = row.iter().map(Cell::to_field).collect();
        push_record(&mut out, fields.iter().map(String::as_str));
    }
    fs::write(path, out)
}

/// Loads a hierarchy from a spreadsheet file.
///
/// The relational shape is attempted first; if its required columns are
/// missing, the file is re-read without a header row and parsed as an
/// outline.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not well-formed CSV.
#[instrument]
pub fn load_hierarchy(path: &Path) -> Result<Hierarchy, LoadError> {
    let table = read_table(path, true)?;
    match relational::from_table(&table) {
        Ok(hierarchy) => {
            debug!(nodes = hierarchy.len(), "loaded relational table");
            Ok(hierarchy)
        }
        Err(error) => {
            debug!(%error, "not a relational table; falling back to outline");
            let table = read_table(path, false)?;
            let hierarchy = outline::from_table(&table);
            debug!(nodes = hierarchy.len(), "loaded outline table");
            Ok(hierarchy)
        }
    }
}

/// Writes `hierarchy` to `path` in the relational form.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_hierarchy(path: &Path, hierarchy: &Hierarchy) -> io::Result<()> {
    write_table(path, &to_table(hierarchy))
}

fn push_record<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
    let line = fields.map(csv_escape).collect::<Vec<_>>().join(",");
    out.push_str(&line);
    out.push('\n');
}

fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

/// One parsed CSV field, remembering whether it was quoted.
struct Field {
    value: String,
    quoted: bool,
}

impl Field {
    fn into_cell(self) -> Cell {
        if self.quoted {
            return Cell::Text(self.value);
        }
        if self.value.is_empty() {
            return Cell::Empty;
        }
        match self.value.parse::<f64>() {
            Ok(number) if number.is_finite() => Cell::Number(number),
            _ => Cell::Text(self.value),
        }
    }
}

/// Splits CSV content into records of fields.
///
/// Returns `None` when a quoted field runs past the end of the input.
fn parse_records(content: &str) -> Option<Vec<Vec<Field>>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut value = String::new();
    let mut quoted = false;
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    value.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                value.push(c);
            }
            continue;
        }

        match c {
            '"' if value.is_empty() && !quoted => {
                in_quotes = true;
                quoted = true;
            }
            ',' => {
                record.push(Field {
                    value: std::mem::take(&mut value),
                    quoted,
                });
                quoted = false;
            }
            '\n' => {
                record.push(Field {
                    value: std::mem::take(&mut value),
                    quoted,
                });
                quoted = false;
                records.push(std::mem::take(&mut record));
            }
            '\r' => {}
            _ => value.push(c),
        }
    }

    if in_quotes {
        return None;
    }
    if !value.is_empty() || quoted || !record.is_empty() {
        record.push(Field { value, quoted });
        records.push(record);
    }

    Some(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NodeId, NodeKind};

    fn write(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hierarchy.csv");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn reads_headered_table() {
        let (_dir, path) = write("id,name\nbr-1,Knowledge\n");

        let table = read_table(&path, true).unwrap();

        assert_eq!(table.header.as_deref().unwrap(), ["id", "name"]);
        assert_eq!(
            table.rows,
            vec![vec![Cell::text("br-1"), Cell::text("Knowledge")]]
        );
    }

    #[test]
    fn quoted_fields_keep_separators_and_quotes() {
        let (_dir, path) = write("\"a,b\",\"say \"\"hi\"\"\",\"line\nbreak\"\n");

        let table = read_table(&path, false).unwrap();

        assert_eq!(
            table.rows,
            vec![vec![
                Cell::text("a,b"),
                Cell::text("say \"hi\""),
                Cell::text("line\nbreak"),
            ]]
        );
    }

    #[test]
    fn unquoted_numbers_load_as_numbers() {
        let (_dir, path) = write("3,3.5,,text\n");

        let table = read_table(&path, false).unwrap();

        assert_eq!(
            table.rows,
            vec![vec![
                Cell::Number(3.0),
                Cell::Number(3.5),
                Cell::Empty,
                Cell::text("text"),
            ]]
        );
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        let (_dir, path) = write("\"never closed\n");
        assert!(matches!(
            read_table(&path, false),
            Err(LoadError::UnterminatedQuote { .. })
        ));
    }

    #[test]
    fn written_tables_read_back_identically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let table = Table::with_header(
            vec!["id".to_string(), "name".to_string()],
            vec![
                vec![Cell::text("a-1"), Cell::text("comma, quote \" and\nnewline")],
                vec![Cell::text("a-2"), Cell::Empty],
            ],
        );

        write_table(&path, &table).unwrap();
        let read_back = read_table(&path, true).unwrap();

        assert_eq!(read_back.header, table.header);
        assert_eq!(read_back.rows, table.rows);
    }

    #[test]
    fn load_prefers_the_relational_shape() {
        let (_dir, path) = write(
            "id,name,definition,type,parent 1\n\
             br-1,Knowledge,,category,\n\
             s-2,Logic,,section,br-1\n",
        );

        let hierarchy = load_hierarchy(&path).unwrap();

        assert_eq!(hierarchy.len(), 2);
        assert_eq!(
            hierarchy.get(&NodeId::from("s-2")).unwrap().parents,
            vec![NodeId::from("br-1")]
        );
    }

    #[test]
    fn load_falls_back_to_the_outline_shape() {
        let (_dir, path) = write("Knowledge,Logic\n,Language\n");

        let hierarchy = load_hierarchy(&path).unwrap();

        // Headerless outline: every cell becomes a node, N-ids assigned in
        // visit order.
        assert_eq!(hierarchy.len(), 3);
        let root = hierarchy.get(&NodeId::from("N1")).unwrap();
        assert_eq!(root.name, "Knowledge");
        assert_eq!(root.kind, NodeKind::Category);
        assert_eq!(
            root.children,
            vec![NodeId::from("N2"), NodeId::from("N3")]
        );
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hierarchy.csv");

        let mut original = Hierarchy::with_root("Knowledge");
        original
            .add(
                NodeId::from("e-2"),
                "Syllogism".to_string(),
                NodeKind::Entry,
                "A deductive form, with a comma".to_string(),
                Some(NodeId::from("br-1")),
            )
            .unwrap();

        save_hierarchy(&path, &original).unwrap();
        let reloaded = load_hierarchy(&path).unwrap();

        assert_eq!(reloaded, original);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_hierarchy(&dir.path().join("absent.csv"));
        assert!(matches!(result, Err(LoadError::Io(_))));
    }
}
