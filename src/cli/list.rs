use std::path::Path;

use anyhow::Context;
use taxa::domain::{Node, NodeId, NodeKind, query};
use taxa::storage;
use tracing::instrument;

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, clap::Parser)]
pub struct List {
    /// Restrict to nodes of this kind
    #[arg(long)]
    kind: Option<NodeKind>,

    /// Restrict to descendants of this node
    #[arg(long)]
    under: Option<NodeId>,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, serde::Serialize)]
struct Row<'a> {
    id: &'a str,
    name: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    definition: Option<&'a str>,
    parents: Vec<&'a str>,
}

impl<'a> Row<'a> {
    fn new(id: &'a NodeId, node: &'a Node) -> Self {
        Self {
            id: id.as_str(),
            name: &node.name,
            kind: node.kind.as_str(),
            definition: (!node.definition.is_empty()).then_some(node.definition.as_str()),
            parents: node.parents.iter().map(NodeId::as_str).collect(),
        }
    }
}

impl List {
    #[instrument]
    pub fn run(self, file: &Path) -> anyhow::Result<()> {
        let hierarchy = storage::load_hierarchy(file)?;

        let ids: Vec<NodeId> = match (&self.under, &self.kind) {
            (Some(under), Some(kind)) => query::descendants_of_kind(&hierarchy, under, kind),
            (Some(under), None) => query::descendants(&hierarchy, under),
            (None, Some(kind)) => hierarchy
                .iter()
                .filter(|(_, node)| &node.kind == kind)
                .map(|(id, _)| id.clone())
                .collect(),
            (None, None) => hierarchy.ids().cloned().collect(),
        };

        let selected: Vec<(&NodeId, &Node)> = ids
            .iter()
            .filter_map(|id| hierarchy.get(id).map(|node| (id, node)))
            .collect();

        match self.format {
            OutputFormat::Text => {
                for (id, node) in selected {
                    println!("{id}\t{}\t{}", node.kind, node.name);
                }
            }
            OutputFormat::Json => {
                let rows: Vec<Row> = selected
                    .into_iter()
                    .map(|(id, node)| Row::new(id, node))
                    .collect();
                serde_json::to_writer_pretty(std::io::stdout(), &rows)
                    .context("failed to render json output")?;
                println!();
            }
        }

        Ok(())
    }
}
