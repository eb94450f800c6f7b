use std::path::Path;

use taxa::domain::NodeId;
use taxa::storage;
use tracing::instrument;

#[derive(Debug, clap::Parser)]
pub struct Delete {
    /// Id of the node to delete
    id: NodeId,
}

impl Delete {
    #[instrument]
    pub fn run(self, file: &Path) -> anyhow::Result<()> {
        let mut hierarchy = storage::load_hierarchy(file)?;

        let focus = hierarchy.remove(&self.id)?;
        storage::save_hierarchy(file, &hierarchy)?;

        match focus {
            Some(parent) => println!("Deleted {}; focus moved to {parent}", self.id),
            None => println!("Deleted root {}", self.id),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use taxa::domain::{Hierarchy, NodeKind, hierarchy::DEFAULT_ROOT_ID};
    use taxa::storage::{load_hierarchy, save_hierarchy};
    use tempfile::tempdir;

    use super::*;

    fn seeded_file() -> (tempfile::TempDir, std::path::PathBuf) {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("hierarchy.csv");
        let mut hierarchy = Hierarchy::with_root("Knowledge");
        hierarchy
            .add(
                NodeId::from("s-2"),
                "Logic".to_string(),
                NodeKind::Section,
                String::new(),
                Some(NodeId::from(DEFAULT_ROOT_ID)),
            )
            .unwrap();
        save_hierarchy(&file, &hierarchy).unwrap();
        (tmp, file)
    }

    #[test]
    fn delete_run_removes_a_leaf() {
        let (_tmp, file) = seeded_file();

        let delete = Delete {
            id: NodeId::from("s-2"),
        };
        delete.run(&file).expect("delete command should succeed");

        let hierarchy = load_hierarchy(&file).unwrap();
        assert!(!hierarchy.contains(&NodeId::from("s-2")));
        assert!(
            hierarchy
                .get(&NodeId::from(DEFAULT_ROOT_ID))
                .unwrap()
                .children
                .is_empty()
        );
    }

    #[test]
    fn delete_run_refuses_a_node_with_children() {
        let (_tmp, file) = seeded_file();

        let delete = Delete {
            id: NodeId::from(DEFAULT_ROOT_ID),
        };
        assert!(delete.run(&file).is_err());

        let hierarchy = load_hierarchy(&file).unwrap();
        assert_eq!(hierarchy.len(), 2);
    }
}
