//! `folio links` command implementation.

use clap::Args;
use folio_links::{LinkScanner, is_markdown_path};

use super::{SiteArgs, resolver};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the links command.
#[derive(Args)]
pub(crate) struct LinksArgs {
    #[command(flatten)]
    site: SiteArgs,

    /// Markdown file to check (default: every markdown file in the site).
    file: Option<String>,

    /// Fail when any link is unresolved.
    #[arg(long)]
    strict: bool,
}

impl LinksArgs {
    /// Execute the links command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails, or in strict mode when a link
    /// does not resolve.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (config, site) = self.site.load(&self.site.settings())?;
        let resolver = resolver(&config, &site);
        let scanner = LinkScanner::new(config.link_parser());

        let origins = match &self.file {
            Some(file) => vec![site.content_path(file)?],
            None => site
                .index
                .iter()
                .filter(|path| is_markdown_path(path))
                .map(str::to_owned)
                .collect(),
        };

        let mut total = 0;
        let mut broken = 0;
        for origin in &origins {
            let source = site.read(origin)?;
            let links = scanner.scan(&source);
            if links.is_empty() {
                continue;
            }

            output.line(origin);
            for link in links {
                total += 1;
                let resolved = resolver.resolve_as(&link.raw, origin, link.syntax, link.is_embed);
                if resolved.exists {
                    output.muted(&format!("  {} -> {}", link.raw, resolved.url));
                } else {
                    broken += 1;
                    output.warning(&format!("  {} (unresolved)", link.raw));
                }
            }
        }

        tracing::info!(files = origins.len(), links = total, broken, "Checked links");
        if broken == 0 {
            output.success(&format!("{total} links resolved"));
            return Ok(());
        }
        if self.strict {
            return Err(CliError::Validation(format!(
                "{broken} of {total} links are unresolved"
            )));
        }
        output.warning(&format!("{broken} of {total} links are unresolved"));
        Ok(())
    }
}
