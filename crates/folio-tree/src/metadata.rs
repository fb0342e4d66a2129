//! Page metadata from YAML frontmatter.
//!
//! Frontmatter is the YAML block between `---` fences at the very top of a
//! markdown file. Known keys are typed; everything else is kept in
//! [`PageMetadata::extra`] for templates and the UI.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use folio_links::{PermalinkMap, file_name, strip_markdown_extension};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::tree::FileEntry;

static WIKI_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\[\]]*?)\]\]").expect("invalid wiki-link regex"));

static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*?)\]\([^)]*?\)").expect("invalid markdown link regex"));

/// Page metadata parsed from frontmatter.
///
/// All fields are optional. `None` means the key was not set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    /// Page title (overrides heading extraction).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Short description for navigation and search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Vanity URL path replacing the path-derived URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,

    /// Any other frontmatter keys.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl PageMetadata {
    /// Parse metadata from YAML content.
    ///
    /// Empty content returns a default instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed.
    pub fn from_yaml(content: &str) -> Result<Self, MetadataError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(trimmed).map_err(MetadataError::Yaml)
    }

    /// Split a markdown file into frontmatter metadata and body.
    ///
    /// Files without a frontmatter block return default metadata and the
    /// whole source as body. An opening fence without a closing one is
    /// treated as body text.
    ///
    /// # Errors
    ///
    /// Returns an error if the frontmatter YAML is malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use folio_tree::PageMetadata;
    ///
    /// let source = "---\ntitle: Hello\n---\n# Heading\n";
    /// let (meta, body) = PageMetadata::from_markdown(source).unwrap();
    /// assert_eq!(meta.title.as_deref(), Some("Hello"));
    /// assert_eq!(body, "# Heading\n");
    /// ```
    pub fn from_markdown(source: &str) -> Result<(Self, &str), MetadataError> {
        let Some((yaml, body)) = split_frontmatter(source) else {
            return Ok((Self::default(), source));
        };
        Ok((Self::from_yaml(yaml)?, body))
    }

    /// Check if metadata has any non-default values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.permalink.is_none()
            && self.extra.is_empty()
    }
}

/// Error type for metadata operations.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// YAML parsing error.
    #[error("invalid frontmatter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Locate a leading `---` fenced block. Returns `(yaml, body)`.
fn split_frontmatter(source: &str) -> Option<(&str, &str)> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let rest = source
        .strip_prefix("---\n")
        .or_else(|| source.strip_prefix("---\r\n"))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let fence = line.trim_end_matches(['\r', '\n']);
        if fence == "---" || fence == "..." {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((yaml, body));
        }
        offset += line.len();
    }
    None
}

/// Title from a leading `# ` heading.
///
/// Only a level-one heading on the first non-blank line counts. Wiki-link
/// brackets, markdown links and emphasis markers are removed.
///
/// # Examples
///
/// ```
/// use folio_tree::extract_title;
///
/// assert_eq!(extract_title("\n# **Bold** [[Title]]\n").as_deref(), Some("Bold Title"));
/// assert_eq!(extract_title("Intro\n# Late heading"), None);
/// ```
#[must_use]
pub fn extract_title(body: &str) -> Option<String> {
    let first = body.trim_start().lines().next()?;
    let heading = first.strip_prefix('#')?;
    if !heading.starts_with([' ', '\t']) {
        return None;
    }

    let title = WIKI_LINK.replace_all(heading, |caps: &regex::Captures<'_>| {
        let inner = &caps[1];
        inner
            .rsplit_once('|')
            .map_or(inner, |(_, alias)| alias)
            .to_owned()
    });
    let title = MARKDOWN_LINK.replace_all(&title, "$1");
    let title: String = title
        .chars()
        .filter(|c| !matches!(c, '_' | '*' | '~' | '`' | '>'))
        .collect();
    let title = title.trim();

    (!title.is_empty()).then(|| title.to_owned())
}

/// Title to show for a page: frontmatter, then leading heading, then file
/// name without extension.
#[must_use]
pub fn resolve_title(path: &str, metadata: &PageMetadata, body: &str) -> String {
    metadata
        .title
        .clone()
        .or_else(|| extract_title(body))
        .unwrap_or_else(|| strip_markdown_extension(file_name(path)).to_owned())
}

/// Build a [`PermalinkMap`] from the permalinks declared in file metadata.
///
/// Empty permalinks are skipped, and when two pages claim the same
/// permalink the one listed first keeps it. Each skipped entry is logged.
pub fn permalinks_from_entries(entries: &[FileEntry]) -> PermalinkMap {
    let (map, rejected) = PermalinkMap::from_entries_lossy(entries.iter().filter_map(|entry| {
        entry
            .metadata
            .permalink
            .as_deref()
            .map(|permalink| (entry.path.as_str(), permalink))
    }));
    for err in &rejected {
        tracing::warn!(error = %err, "Ignoring permalink");
    }
    map
}
