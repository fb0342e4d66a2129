//! `folio tree` command implementation.

use clap::{Args, ValueEnum};
use folio_tree::{Grouping, NodeId, NodeKind, OrderBy, SiteTree, build_site_tree};

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    #[command(flatten)]
    site: SiteArgs,

    /// Sort files by name or by title (overrides config).
    #[arg(long, value_enum)]
    order_by: Option<OrderArg>,

    /// Place directories before or after files (overrides config).
    #[arg(long, value_enum)]
    group: Option<GroupArg>,

    /// Print the tree as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    Path,
    Title,
}

#[derive(Clone, Copy, ValueEnum)]
enum GroupArg {
    DirsFirst,
    FilesFirst,
    None,
}

impl TreeArgs {
    /// Execute the tree command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or the site fails to load.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let mut settings = self.site.settings();
        settings.order_by = self.order_by.map(|order| match order {
            OrderArg::Path => OrderBy::Path,
            OrderArg::Title => OrderBy::Title,
        });
        settings.group = self.group.map(|group| match group {
            GroupArg::DirsFirst => Grouping::DirsFirst,
            GroupArg::FilesFirst => Grouping::FilesFirst,
            GroupArg::None => Grouping::None,
        });

        let (config, site) = self.site.load(&settings)?;
        let tree = build_site_tree(&site.entries, &config.tree_options());

        if self.json {
            output.line(&serde_json::to_string_pretty(&tree.items())?);
            return Ok(());
        }

        for line in outline(&tree, SiteTree::ROOT, 0) {
            output.line(&line);
        }
        Ok(())
    }
}

/// Indented text lines for the children of `id`.
fn outline(tree: &SiteTree, id: NodeId, depth: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for &child in tree.children(id) {
        let node = tree.node(child);
        let indent = "  ".repeat(depth);
        match node.kind() {
            NodeKind::Dir => {
                lines.push(format!("{indent}{}/", node.label()));
                lines.extend(outline(tree, child, depth + 1));
            }
            NodeKind::File | NodeKind::Root => {
                let url = node.url_path().unwrap_or_default();
                lines.push(format!("{indent}{}  {url}", node.label()));
            }
        }
    }
    lines
}
