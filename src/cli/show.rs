use std::path::Path;

use taxa::domain::{Hierarchy, NodeId, query};
use taxa::storage;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, clap::Parser)]
pub struct Show {
    /// Id of the node to display
    id: NodeId,
}

impl Show {
    #[instrument]
    pub fn run(self, file: &Path) -> anyhow::Result<()> {
        let hierarchy = storage::load_hierarchy(file)?;

        let Some(node) = hierarchy.get(&self.id) else {
            eprintln!("Node {} not found", self.id);
            std::process::exit(1);
        };

        println!("{} {}", node.name.info(), format!("({})", self.id).dim());
        println!("type: {}", node.kind);
        if !node.definition.is_empty() {
            println!("definition: {}", node.definition);
        }

        let ancestors = query::ancestors(&hierarchy, &self.id);
        if !ancestors.is_empty() {
            let path: Vec<String> = ancestors
                .iter()
                .rev()
                .map(|id| label(&hierarchy, id))
                .collect();
            println!("path: {}", path.join(" > "));
        }

        print_links("parents", &node.parents, &hierarchy);
        print_links("children", &node.children, &hierarchy);

        let siblings = hierarchy.siblings(&self.id)?;
        let siblings: Vec<NodeId> = siblings.into_iter().collect();
        print_links("siblings", &siblings, &hierarchy);

        Ok(())
    }
}

fn label(hierarchy: &Hierarchy, id: &NodeId) -> String {
    hierarchy
        .get(id)
        .map_or_else(|| format!("{id} (missing)"), |node| node.name.clone())
}

fn print_links(heading: &str, ids: &[NodeId], hierarchy: &Hierarchy) {
    if ids.is_empty() {
        println!("{heading}: {}", "(none)".dim());
        return;
    }
    println!("{heading}:");
    for id in ids {
        println!("  {id}  {}", label(hierarchy, id));
    }
}
