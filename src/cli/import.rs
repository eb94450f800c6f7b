use std::path::{Path, PathBuf};

use taxa::domain::NodeId;
use taxa::storage;
use tracing::instrument;

#[derive(Debug, clap::Parser)]
pub struct Import {
    /// Spreadsheet file to import (relational or outline shape)
    source: PathBuf,
}

impl Import {
    #[instrument]
    pub fn run(self, file: &Path) -> anyhow::Result<()> {
        let config = super::load_config();
        let hierarchy = storage::load_hierarchy(&self.source)?;

        if !config.allow_unrecognised {
            let unrecognised: Vec<&NodeId> = hierarchy
                .iter()
                .filter(|(_, node)| !node.kind.is_recognised())
                .map(|(id, _)| id)
                .collect();
            if !unrecognised.is_empty() {
                let ids: Vec<&str> = unrecognised.iter().map(|id| id.as_str()).collect();
                anyhow::bail!("unrecognised type labels on: {}", ids.join(", "));
            }
        }

        storage::save_hierarchy(file, &hierarchy)?;

        println!(
            "Imported {} nodes from {} into {}",
            hierarchy.len(),
            self.source.display(),
            file.display()
        );
        if let Some(root) = hierarchy.roots().next() {
            println!("Browse from root {root}");
        }
        Ok(())
    }
}
