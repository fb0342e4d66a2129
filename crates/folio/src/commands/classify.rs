//! `folio classify` command implementation.

use std::path::PathBuf;

use clap::Args;
use folio_config::Config;
use folio_links::{YoutubeMatcher, extension};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the classify command.
#[derive(Args)]
pub(crate) struct ClassifyArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Extensions (`pdf`, `.mp4`), file names, or YouTube URLs.
    #[arg(required = true)]
    targets: Vec<String>,
}

impl ClassifyArgs {
    /// Execute the classify command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails to load.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;
        let classifier = config.embed_classifier();
        let youtube = YoutubeMatcher::new();

        for target in &self.targets {
            if let Some(embed) = youtube.match_url(target) {
                output.line(&format!("{target}\tyoutube\t{}", embed.embed_url));
                continue;
            }
            let ext = extension(target).unwrap_or_else(|| target.trim_start_matches('.'));
            output.line(&format!("{target}\t{}", classifier.classify(ext)));
        }
        Ok(())
    }
}
