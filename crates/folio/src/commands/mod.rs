//! CLI command implementations.

pub(crate) mod classify;
pub(crate) mod links;
pub(crate) mod render;
pub(crate) mod resolve;
pub(crate) mod tree;

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use folio_config::{CliSettings, Config, LinkMatch};
use folio_links::{LinkResolver, LinkSyntax, MatchMode};

use crate::error::CliError;
use crate::site::Site;

pub(crate) use classify::ClassifyArgs;
pub(crate) use links::LinksArgs;
pub(crate) use render::RenderArgs;
pub(crate) use resolve::ResolveArgs;
pub(crate) use tree::TreeArgs;

/// Options shared by every command that works on a site directory.
#[derive(Args)]
pub(crate) struct SiteArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Site root directory.
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Site prefix such as /@user/project (overrides config).
    #[arg(long, env = "FOLIO_SITE_PREFIX")]
    prefix: Option<String>,

    /// Base URL for raw files (overrides config).
    #[arg(long)]
    raw_base: Option<String>,

    /// Wiki-link matching strategy (overrides config).
    #[arg(long = "match", value_enum)]
    link_match: Option<MatchArg>,

    /// Match every link syntax case-insensitively (overrides config).
    #[arg(long)]
    case_insensitive: Option<bool>,
}

impl SiteArgs {
    /// CLI settings from the shared flags.
    pub(crate) fn settings(&self) -> CliSettings {
        CliSettings {
            site_prefix: self.prefix.clone(),
            raw_base: self.raw_base.clone(),
            link_match: self.link_match.map(Into::into),
            case_insensitive: self.case_insensitive,
            ..CliSettings::default()
        }
    }

    /// Load configuration and scan the site root.
    pub(crate) fn load(&self, settings: &CliSettings) -> Result<(Config, Site), CliError> {
        let config = Config::load(self.config.as_deref(), Some(settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }
        let site = Site::load(&self.root)?;
        Ok((config, site))
    }
}

/// Build the resolver for a loaded site.
pub(crate) fn resolver<'a>(config: &Config, site: &'a Site) -> LinkResolver<'a> {
    LinkResolver::new(&site.index, &site.permalinks, &config.resolve_options())
        .with_parser(config.link_parser())
}

/// Wiki-link matching strategy flag.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum MatchArg {
    Shortest,
    Exact,
}

impl From<MatchArg> for LinkMatch {
    fn from(value: MatchArg) -> Self {
        match value {
            MatchArg::Shortest => Self::Shortest,
            MatchArg::Exact => Self::Exact,
        }
    }
}

/// Link syntax flag.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum SyntaxArg {
    Wiki,
    Commonmark,
    Html,
}

impl From<SyntaxArg> for LinkSyntax {
    fn from(value: SyntaxArg) -> Self {
        match value {
            SyntaxArg::Wiki => Self::Wiki,
            SyntaxArg::Commonmark => Self::CommonMark,
            SyntaxArg::Html => Self::Html,
        }
    }
}

/// Syntax assumed for bare targets: wiki-links in shortest mode.
pub(crate) fn default_syntax(mode: MatchMode) -> LinkSyntax {
    match mode {
        MatchMode::ShortestPossible => LinkSyntax::Wiki,
        MatchMode::Exact => LinkSyntax::CommonMark,
    }
}
