use std::path::Path;

use taxa::domain::{NodeId, NodeKind};
use taxa::storage;
use tracing::instrument;

#[derive(Debug, clap::Parser)]
pub struct Add {
    /// Display name of the new node
    name: String,

    /// Id of the parent node
    #[clap(long, short)]
    parent: Option<NodeId>,

    /// Kind label; defaults to one level beneath the parent's kind
    #[clap(long, short)]
    kind: Option<NodeKind>,

    /// Definition text (meaningful for entry nodes)
    #[clap(long, short)]
    definition: Option<String>,
}

impl Add {
    #[instrument]
    pub fn run(self, file: &Path) -> anyhow::Result<()> {
        let mut hierarchy = storage::load_hierarchy(file)?;

        let kind = match (self.kind, &self.parent) {
            (Some(kind), _) => kind,
            (None, Some(parent)) => hierarchy
                .get(parent)
                .map_or(NodeKind::Entry, |node| node.kind.child()),
            (None, None) => NodeKind::Category,
        };

        let id = hierarchy.next_id();
        hierarchy.add(
            id.clone(),
            self.name,
            kind,
            self.definition.unwrap_or_default(),
            self.parent,
        )?;
        storage::save_hierarchy(file, &hierarchy)?;

        println!("Added node {id}");
        Ok(())
    }
}
