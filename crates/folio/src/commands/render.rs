//! `folio render` command implementation.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use folio_links::RenderSession;
use folio_render::{Block, Pipeline, render_html};

use super::{SiteArgs, resolver};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    #[command(flatten)]
    site: SiteArgs,

    /// JSON document: the list of blocks produced by the markdown parser.
    input: PathBuf,

    /// Content path of the page being rendered.
    #[arg(short, long)]
    from: String,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or the input is not a valid document.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (config, site) = self.site.load(&self.site.settings())?;
        let origin = site.content_path(&self.from)?;

        let blocks: Vec<Block> = serde_json::from_str(&fs::read_to_string(&self.input)?)?;
        let resolver = resolver(&config, &site);
        let mut session = RenderSession::new(&resolver);
        let pipeline = Pipeline::standard_with(config.embed_classifier());

        let blocks = pipeline.run(blocks, &origin, &mut session);
        tracing::info!(
            origin = %origin,
            links = session.len(),
            cache_hits = session.hits(),
            "Rendered page"
        );

        output.line(&render_html(&blocks));
        Ok(())
    }
}
