use std::path::Path;

use taxa::domain::NodeId;
use taxa::storage;
use tracing::instrument;

#[derive(Debug, clap::Parser)]
pub struct Edit {
    /// Id of the node to edit
    id: NodeId,

    /// New display name; the current name is kept when omitted
    #[clap(long, short)]
    name: Option<String>,

    /// New definition (applies to entry nodes only)
    #[clap(long, short)]
    definition: Option<String>,
}

impl Edit {
    #[instrument]
    pub fn run(self, file: &Path) -> anyhow::Result<()> {
        let mut hierarchy = storage::load_hierarchy(file)?;

        let name = self.name.unwrap_or_else(|| {
            hierarchy
                .get(&self.id)
                .map(|node| node.name.clone())
                .unwrap_or_default()
        });
        hierarchy.edit(&self.id, name, self.definition)?;
        storage::save_hierarchy(file, &hierarchy)?;

        println!("Updated node {}", self.id);
        Ok(())
    }
}
