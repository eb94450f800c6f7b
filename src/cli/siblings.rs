use std::path::Path;

use taxa::domain::NodeId;
use taxa::storage;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, clap::Parser)]
pub struct Siblings {
    /// Id of the node whose siblings to list
    id: NodeId,
}

impl Siblings {
    #[instrument]
    pub fn run(self, file: &Path) -> anyhow::Result<()> {
        let hierarchy = storage::load_hierarchy(file)?;

        let siblings = hierarchy.siblings(&self.id)?;
        if siblings.is_empty() {
            println!("{}", "(no siblings)".dim());
            return Ok(());
        }

        for id in siblings {
            let name = hierarchy
                .get(&id)
                .map_or_else(|| "(missing)".dim(), |node| node.name.clone());
            println!("{id}  {name}");
        }
        Ok(())
    }
}
