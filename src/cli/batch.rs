use std::{
    io::{self, Read},
    path::Path,
};

use taxa::domain::{Hierarchy, NodeId, NodeKind, StoreError};
use taxa::storage;
use tracing::instrument;

/// Reads entry names from stdin, one per line. The text before the first
/// `:` becomes the entry's name; the whole line is stored as its
/// definition.
#[derive(Debug, clap::Parser)]
pub struct Batch {
    /// Id of the parent node the entries are added beneath
    #[clap(long, short)]
    parent: NodeId,
}

impl Batch {
    #[instrument]
    pub fn run(self, file: &Path) -> anyhow::Result<()> {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;

        let mut hierarchy = storage::load_hierarchy(file)?;
        let count = add_entries(&mut hierarchy, &self.parent, &input)?;
        storage::save_hierarchy(file, &hierarchy)?;

        println!("Added {count} entries under {}", self.parent);
        Ok(())
    }
}

/// Adds one entry node per non-blank line, each with a freshly generated id.
fn add_entries(
    hierarchy: &mut Hierarchy,
    parent: &NodeId,
    input: &str,
) -> Result<usize, StoreError> {
    let mut count = 0;
    for line in input.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let id = hierarchy.next_id();
        let name = line.split_once(':').map_or(line, |(name, _)| name);
        hierarchy.add(
            id,
            name.to_string(),
            NodeKind::Entry,
            line.to_string(),
            Some(parent.clone()),
        )?;
        count += 1;
    }
    Ok(count)
}
