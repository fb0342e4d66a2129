//! `folio resolve` command implementation.

use clap::Args;
use folio_links::LinkKind;

use super::{SiteArgs, SyntaxArg, default_syntax, resolver};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    #[command(flatten)]
    site: SiteArgs,

    /// Link as written, e.g. `[[post-1#Intro|Alias]]` or `../notes/a.md`.
    link: String,

    /// File containing the link (content path or file under the root).
    #[arg(short, long, default_value = "/README.md")]
    from: String,

    /// Link syntax (default: wiki in shortest mode, commonmark otherwise).
    #[arg(long, value_enum)]
    syntax: Option<SyntaxArg>,

    /// Treat the link as an embed.
    #[arg(long)]
    embed: bool,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or the site fails to load.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (config, site) = self.site.load(&self.site.settings())?;
        let resolver = resolver(&config, &site);
        let origin = site.content_path(&self.from)?;

        let syntax = self
            .syntax
            .map_or_else(|| default_syntax(config.resolve_options().match_mode), Into::into);
        let link = resolver.resolve_as(&self.link, &origin, syntax, self.embed);

        if self.json {
            output.line(&serde_json::to_string_pretty(&link)?);
            return Ok(());
        }

        output.line(&link.url);
        if let Some(path) = &link.matched_path {
            output.muted(&format!("file: {path}"));
        }
        if self.embed && link.kind == LinkKind::Internal {
            let file = link.matched_path.as_deref().unwrap_or(&link.url);
            output.muted(&format!(
                "embed: {}",
                config.embed_classifier().classify_path(file)
            ));
        }
        if !link.exists {
            output.warning(&format!("Unresolved link: {} (from {origin})", self.link));
        }
        Ok(())
    }
}
