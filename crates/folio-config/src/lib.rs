//! Configuration management for Folio.
//!
//! Parses `folio.toml` with serde and discovers it in the current directory
//! or any parent. CLI settings are applied during load via [`CliSettings`].
//!
//! ```toml
//! [site]
//! prefix = "/@${FOLIO_USER}/notes"
//! raw_base = "https://raw.example.com/site-1"
//!
//! [links]
//! match = "shortest"
//! alias_divider = "|"
//!
//! [embeds]
//! video = ["webm", "mov"]
//! audio = ["ogg"]
//!
//! [tree]
//! order_by = "title"
//! group = "dirs-first"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `site.prefix` and `site.raw_base` support `${VAR}` (error if unset) and
//! `${VAR:-default}`.

mod expand;

use std::path::{Path, PathBuf};

use folio_links::{EmbedClassifier, LinkParser, MatchMode, ResolveOptions};
use folio_tree::{Grouping, OrderBy, TreeOptions};
use serde::Deserialize;

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "folio.toml";

/// CLI settings that override configuration file values.
///
/// Only `Some` values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the site prefix.
    pub site_prefix: Option<String>,
    /// Override the asset base URL.
    pub raw_base: Option<String>,
    /// Override wiki-link matching.
    pub link_match: Option<LinkMatch>,
    /// Override case-insensitive matching for all link syntaxes.
    pub case_insensitive: Option<bool>,
    /// Override the tree sort key.
    pub order_by: Option<OrderBy>,
    /// Override tree grouping.
    pub group: Option<Grouping>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub site: SiteConfig,
    pub links: LinksConfig,
    pub embeds: EmbedsConfig,
    pub tree: TreeConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Where the site is served.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// URL prefix such as `/@user/project`. Empty on custom domains.
    pub prefix: String,
    /// Base URL for raw (non-markdown) files. Defaults to the prefix.
    pub raw_base: Option<String>,
}

/// Wiki-link matching strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkMatch {
    /// Site-wide search for the file with the fewest path segments.
    #[default]
    Shortest,
    /// Only paths relative to the linking file.
    Exact,
}

impl From<LinkMatch> for MatchMode {
    fn from(value: LinkMatch) -> Self {
        match value {
            LinkMatch::Shortest => Self::ShortestPossible,
            LinkMatch::Exact => Self::Exact,
        }
    }
}

/// Link resolution configuration.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinksConfig {
    /// Wiki-link matching strategy.
    #[serde(rename = "match")]
    pub link_match: LinkMatch,
    /// Force case (in)sensitivity for every syntax. Unset keeps the
    /// per-syntax defaults: insensitive wiki-links, sensitive CommonMark.
    pub case_insensitive: Option<bool>,
    /// Wiki-link alias divider.
    pub alias_divider: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            link_match: LinkMatch::default(),
            case_insensitive: None,
            alias_divider: "|".to_owned(),
        }
    }
}

/// Extra media extensions for embeds.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmbedsConfig {
    /// Extensions embedded with `<video>` on top of `mp4`.
    pub video: Vec<String>,
    /// Extensions embedded with `<audio>` on top of `mp3`.
    pub audio: Vec<String>,
}

/// Navigation tree ordering.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TreeConfig {
    pub order_by: OrderBy,
    pub group: Grouping,
    pub case_insensitive: bool,
    pub numeric: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        let options = TreeOptions::default();
        Self {
            order_by: options.order_by,
            group: options.group,
            case_insensitive: options.case_insensitive,
            numeric: options.numeric,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.prefix`").
        field: String,
        /// Error message (e.g., "${`FOLIO_USER`} not set").
        message: String,
    },
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `folio.toml` in the current directory and its parents, falling
    /// back to defaults.
    ///
    /// CLI settings are applied last and validated with the rest.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if reading,
    /// parsing, expansion or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_from(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Search for the config file in `start` and its parents.
    #[must_use]
    pub fn discover_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.is_file())
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(prefix) = &settings.site_prefix {
            self.site.prefix.clone_from(prefix);
        }
        if let Some(raw_base) = &settings.raw_base {
            self.site.raw_base = Some(raw_base.clone());
        }
        if let Some(link_match) = settings.link_match {
            self.links.link_match = link_match;
        }
        if let Some(case_insensitive) = settings.case_insensitive {
            self.links.case_insensitive = Some(case_insensitive);
        }
        if let Some(order_by) = settings.order_by {
            self.tree.order_by = order_by;
        }
        if let Some(group) = settings.group {
            self.tree.group = group;
        }
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_links()?;
        Ok(())
    }

    fn validate_site(&self) -> Result<(), ConfigError> {
        let prefix = &self.site.prefix;
        if !prefix.is_empty() {
            if !prefix.starts_with('/') {
                return Err(ConfigError::Validation(
                    "site.prefix must start with /".to_owned(),
                ));
            }
            if prefix.ends_with('/') {
                return Err(ConfigError::Validation(
                    "site.prefix must not end with /".to_owned(),
                ));
            }
        }

        if let Some(raw_base) = &self.site.raw_base {
            require_http_url(raw_base, "site.raw_base")?;
        }

        Ok(())
    }

    fn validate_links(&self) -> Result<(), ConfigError> {
        let mut chars = self.links.alias_divider.chars();
        let (Some(divider), None) = (chars.next(), chars.next()) else {
            return Err(ConfigError::Validation(
                "links.alias_divider must be a single character".to_owned(),
            ));
        };
        if matches!(divider, '#' | '[' | ']') || divider.is_whitespace() {
            return Err(ConfigError::Validation(format!(
                "links.alias_divider cannot be '{divider}'"
            )));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.prefix = expand::expand_env(&self.site.prefix, "site.prefix")?;
        if let Some(raw_base) = &self.site.raw_base {
            self.site.raw_base = Some(expand::expand_env(raw_base, "site.raw_base")?);
        }
        Ok(())
    }

    /// Link resolution options.
    #[must_use]
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            site_prefix: self.site.prefix.clone(),
            match_mode: self.links.link_match.into(),
            case_insensitive: self.links.case_insensitive,
            asset_base: self.site.raw_base.clone(),
        }
    }

    /// Wiki-link parser with the configured alias divider.
    #[must_use]
    pub fn link_parser(&self) -> LinkParser {
        self.links
            .alias_divider
            .chars()
            .next()
            .map_or_else(LinkParser::default, LinkParser::new)
    }

    /// Embed classifier with the configured extra media types.
    #[must_use]
    pub fn embed_classifier(&self) -> EmbedClassifier {
        EmbedClassifier::new(&self.embeds.video, &self.embeds.audio)
    }

    /// Site tree options.
    #[must_use]
    pub fn tree_options(&self) -> TreeOptions {
        TreeOptions {
            order_by: self.tree.order_by,
            group: self.tree.group,
            case_insensitive: self.tree.case_insensitive,
            numeric: self.tree.numeric,
            site_prefix: self.site.prefix.clone(),
        }
    }
}
