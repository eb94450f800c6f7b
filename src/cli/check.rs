use std::path::Path;

use taxa::domain::{Hierarchy, NodeId};
use taxa::storage;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, clap::Parser)]
pub struct Check {
    /// Suppress output when the hierarchy is healthy
    #[arg(long, short)]
    quiet: bool,
}

impl Check {
    #[instrument]
    pub fn run(self, file: &Path) -> anyhow::Result<()> {
        let hierarchy = storage::load_hierarchy(file)?;

        let cycles = hierarchy.cycles();
        let dangling = dangling_references(&hierarchy);

        for cycle in &cycles {
            let ids: Vec<&str> = cycle.iter().map(|id| id.as_str()).collect();
            println!("{} cycle: {}", "warning:".warning(), ids.join(" -> "));
        }
        for (id, reference) in &dangling {
            println!(
                "{} {id} references missing node {reference}",
                "warning:".warning()
            );
        }

        let issues = cycles.len() + dangling.len();
        if issues > 0 {
            anyhow::bail!("found {issues} issues");
        }
        if !self.quiet {
            println!("{} {} nodes, no issues", "ok:".success(), hierarchy.len());
        }
        Ok(())
    }
}

/// Every link (parent or child) that points at an id absent from the store.
fn dangling_references(hierarchy: &Hierarchy) -> Vec<(NodeId, NodeId)> {
    let mut dangling = Vec::new();
    for (id, node) in hierarchy.iter() {
        for reference in node.parents.iter().chain(&node.children) {
            if !hierarchy.contains(reference) {
                dangling.push((id.clone(), reference.clone()));
            }
        }
    }
    dangling
}

#[cfg(test)]
mod tests {
    use taxa::domain::{Node, NodeKind};
    use taxa::storage::save_hierarchy;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn healthy_store_passes() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("hierarchy.csv");
        save_hierarchy(&file, &Hierarchy::with_root("Knowledge")).unwrap();

        let check = Check { quiet: false };
        check.run(&file).expect("check should pass");
    }

    #[test]
    fn dangling_reference_fails_the_check() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("hierarchy.csv");
        let mut hierarchy = Hierarchy::new();
        let mut node = Node::new("A".to_string(), NodeKind::Entry, String::new());
        node.parents = vec![NodeId::from("missing")];
        hierarchy.insert(NodeId::from("e-1"), node);
        save_hierarchy(&file, &hierarchy).unwrap();

        let check = Check { quiet: false };
        assert!(check.run(&file).is_err());
    }

    #[test]
    fn cycle_fails_the_check() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("hierarchy.csv");
        let mut hierarchy = Hierarchy::new();
        let mut a = Node::new("A".to_string(), NodeKind::Topic, String::new());
        a.parents = vec![NodeId::from("b-1")];
        let mut b = Node::new("B".to_string(), NodeKind::Topic, String::new());
        b.parents = vec![NodeId::from("a-1")];
        hierarchy.insert(NodeId::from("a-1"), a);
        hierarchy.insert(NodeId::from("b-1"), b);
        hierarchy.link_children();
        save_hierarchy(&file, &hierarchy).unwrap();

        let check = Check { quiet: false };
        assert!(check.run(&file).is_err());
    }

    #[test]
    fn dangling_references_cover_both_directions() {
        let mut hierarchy = Hierarchy::new();
        let mut node = Node::new("A".to_string(), NodeKind::Topic, String::new());
        node.parents = vec![NodeId::from("gone-1")];
        node.children = vec![NodeId::from("gone-2")];
        hierarchy.insert(NodeId::from("a-1"), node);

        let dangling = dangling_references(&hierarchy);
        assert_eq!(dangling.len(), 2);
    }
}
