use std::path::{Path, PathBuf};

use taxa::storage;
use tracing::instrument;

#[derive(Debug, clap::Parser)]
pub struct Export {
    /// Destination path; defaults to the configured export filename
    target: Option<PathBuf>,
}

impl Export {
    #[instrument]
    pub fn run(self, file: &Path) -> anyhow::Result<()> {
        let hierarchy = storage::load_hierarchy(file)?;

        let target = self
            .target
            .unwrap_or_else(|| PathBuf::from(super::load_config().export_filename));
        storage::save_hierarchy(&target, &hierarchy)?;

        println!(
            "Exported {} nodes to {}",
            hierarchy.len(),
            target.display()
        );
        Ok(())
    }
}
