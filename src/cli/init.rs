use std::path::Path;

use taxa::domain::{Hierarchy, hierarchy::DEFAULT_ROOT_ID};
use taxa::storage;
use tracing::instrument;

#[derive(Debug, clap::Parser)]
pub struct Init {
    /// Name of the root category
    name: String,

    /// Overwrite an existing hierarchy file
    #[arg(long)]
    force: bool,
}

impl Init {
    #[instrument]
    pub fn run(self, file: &Path) -> anyhow::Result<()> {
        if file.exists() && !self.force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                file.display()
            );
        }

        let hierarchy = Hierarchy::with_root(&self.name);
        storage::save_hierarchy(file, &hierarchy)?;

        println!(
            "Started new hierarchy in {} with root {DEFAULT_ROOT_ID}",
            file.display()
        );
        Ok(())
    }
}
