//! Link resolution.
//!
//! Ties the parser, path resolver, matcher, permalink map and URL formatter
//! together. Resolution never fails: links that match nothing come back with
//! `exists == false` and the author's original target as URL.

use std::collections::HashMap;

use crate::index::FileIndex;
use crate::matcher::{FileMatcher, MatchMode};
use crate::parser::{LinkKind, LinkParser, LinkSyntax, LinkTarget};
use crate::path::resolve_path;
use crate::permalink::PermalinkMap;
use crate::url::UrlFormatter;

/// Options for [`resolve_link`] and [`LinkResolver`].
#[derive(Clone, Debug, Default)]
pub struct ResolveOptions {
    /// Site prefix such as `/@user/project`; empty on custom domains.
    pub site_prefix: String,
    /// How wiki-link targets are matched.
    pub match_mode: MatchMode,
    /// Override case-insensitive matching. By default wiki-links match
    /// case-insensitively and CommonMark/HTML links case-sensitively.
    pub case_insensitive: Option<bool>,
    /// Base URL for raw (non-markdown) assets. Defaults to the site prefix.
    pub asset_base: Option<String>,
}

impl ResolveOptions {
    /// Options with shortest-possible wiki-link matching.
    #[must_use]
    pub fn shortest_possible() -> Self {
        Self {
            match_mode: MatchMode::ShortestPossible,
            ..Self::default()
        }
    }

    /// Set the site prefix.
    #[must_use]
    pub fn with_site_prefix(mut self, prefix: &str) -> Self {
        prefix.clone_into(&mut self.site_prefix);
        self
    }
}

/// Outcome of resolving one link.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ResolvedLink {
    /// Final href/src.
    pub url: String,
    /// Indexed file the link resolved to.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub matched_path: Option<String>,
    /// `false` for links that matched nothing.
    pub exists: bool,
    /// Link classification.
    pub kind: LinkKind,
    /// Display text.
    pub label: String,
    /// Heading fragment as written.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub heading: Option<String>,
}

/// Reusable link resolver over one file index.
///
/// Holds the parser and formatter so callers resolving many links (a whole
/// render pass) configure them once.
#[derive(Clone, Debug)]
pub struct LinkResolver<'a> {
    index: &'a FileIndex,
    permalinks: &'a PermalinkMap,
    parser: LinkParser,
    formatter: UrlFormatter,
    match_mode: MatchMode,
    case_insensitive: Option<bool>,
}

impl<'a> LinkResolver<'a> {
    /// Create a resolver.
    #[must_use]
    pub fn new(index: &'a FileIndex, permalinks: &'a PermalinkMap, options: &ResolveOptions) -> Self {
        let mut formatter = UrlFormatter::new(&options.site_prefix);
        if let Some(base) = &options.asset_base {
            formatter = formatter.with_asset_base(base);
        }
        Self {
            index,
            permalinks,
            parser: LinkParser::default(),
            formatter,
            match_mode: options.match_mode,
            case_insensitive: options.case_insensitive,
        }
    }

    /// Replace the link parser (custom alias divider).
    #[must_use]
    pub fn with_parser(mut self, parser: LinkParser) -> Self {
        self.parser = parser;
        self
    }

    /// The formatter used for URLs.
    #[must_use]
    pub fn formatter(&self) -> &UrlFormatter {
        &self.formatter
    }

    /// The link parser.
    #[must_use]
    pub fn parser(&self) -> &LinkParser {
        &self.parser
    }

    /// The file index links are matched against.
    #[must_use]
    pub fn index(&self) -> &'a FileIndex {
        self.index
    }

    /// Resolve a bare link target.
    ///
    /// In shortest-possible mode the target is read as a wiki-link,
    /// otherwise as a CommonMark link.
    #[must_use]
    pub fn resolve(&self, raw: &str, origin: &str) -> ResolvedLink {
        let syntax = match self.match_mode {
            MatchMode::ShortestPossible => LinkSyntax::Wiki,
            MatchMode::Exact => LinkSyntax::CommonMark,
        };
        self.resolve_as(raw, origin, syntax, false)
    }

    /// Resolve a link written in a specific syntax.
    #[must_use]
    pub fn resolve_as(
        &self,
        raw: &str,
        origin: &str,
        syntax: LinkSyntax,
        is_embed: bool,
    ) -> ResolvedLink {
        let target = self.parser.parse(raw, syntax, is_embed);
        self.resolve_target(&target, origin)
    }

    /// Resolve an already parsed link.
    ///
    /// # Arguments
    ///
    /// * `target` - Parsed link
    /// * `origin` - Content path of the file containing the link
    #[must_use]
    pub fn resolve_target(&self, target: &LinkTarget, origin: &str) -> ResolvedLink {
        let label = target.display_text().to_owned();

        match target.kind {
            LinkKind::External | LinkKind::Mailto => {
                return ResolvedLink {
                    url: target.target.clone(),
                    matched_path: None,
                    exists: true,
                    kind: target.kind,
                    label,
                    heading: None,
                };
            }
            LinkKind::Anchor => {
                let heading = target.heading.clone().unwrap_or_default();
                return ResolvedLink {
                    url: self.formatter.anchor(&heading),
                    matched_path: None,
                    exists: true,
                    kind: LinkKind::Anchor,
                    label,
                    heading: Some(heading),
                };
            }
            LinkKind::Internal => {}
        }

        let heading = target.heading.as_deref();
        let candidate = resolve_path(&target.raw_path, origin);

        let matched = if candidate.is_empty() {
            // Empty path links to the origin page itself
            Some(crate::path::normalize_path(origin))
        } else {
            let (mode, case_insensitive) = self.matching_for(target.syntax);
            FileMatcher::new(self.index, case_insensitive)
                .find(&candidate, &target.raw_path, mode)
                .map(str::to_owned)
        };

        let Some(matched) = matched else {
            tracing::debug!(
                link = %target.raw,
                origin,
                syntax = %target.syntax,
                "Unresolved link"
            );
            return ResolvedLink {
                url: target.target.clone(),
                matched_path: None,
                exists: false,
                kind: LinkKind::Internal,
                label,
                heading: target.heading.clone(),
            };
        };

        let url = if let Some(permalink) = self.permalinks.get(&matched) {
            self.formatter.format_permalink(permalink, heading)
        } else {
            self.formatter.format(&matched, heading)
        };

        ResolvedLink {
            url,
            matched_path: Some(matched),
            exists: true,
            kind: LinkKind::Internal,
            label,
            heading: target.heading.clone(),
        }
    }

    /// Matching mode and case sensitivity for a syntax.
    fn matching_for(&self, syntax: LinkSyntax) -> (MatchMode, bool) {
        match syntax {
            LinkSyntax::Wiki => (self.match_mode, self.case_insensitive.unwrap_or(true)),
            LinkSyntax::CommonMark | LinkSyntax::Html => {
                (MatchMode::Exact, self.case_insensitive.unwrap_or(false))
            }
        }
    }
}

/// Resolve a single link.
///
/// Convenience wrapper building a [`LinkResolver`] for one call. Prefer a
/// long-lived resolver (or a [`RenderSession`]) when resolving many links.
///
/// # Examples
///
/// ```
/// use folio_links::{FileIndex, PermalinkMap, ResolveOptions, resolve_link};
///
/// let index = FileIndex::new(["/blog/post-1.md", "/blog/README.md", "/README.md"]);
/// let permalinks = PermalinkMap::new();
/// let options = ResolveOptions::shortest_possible();
///
/// let link = resolve_link("post-1", "/blog/other.md", &index, &permalinks, &options);
/// assert_eq!(link.url, "/blog/post-1");
/// assert!(link.exists);
/// ```
#[must_use]
pub fn resolve_link(
    raw: &str,
    origin: &str,
    index: &FileIndex,
    permalinks: &PermalinkMap,
    options: &ResolveOptions,
) -> ResolvedLink {
    LinkResolver::new(index, permalinks, options).resolve(raw, origin)
}

/// Memo key: origin, raw target, syntax, embed flag.
type SessionKey = (String, String, LinkSyntax, bool);

/// Per-render memoization of link resolutions.
///
/// Owned by one render pass and discarded with it; the cache never outlives
/// the file index it was built against.
#[derive(Debug)]
pub struct RenderSession<'r, 'a> {
    resolver: &'r LinkResolver<'a>,
    cache: HashMap<SessionKey, ResolvedLink>,
    hits: usize,
}

impl<'r, 'a> RenderSession<'r, 'a> {
    /// Start a session.
    #[must_use]
    pub fn new(resolver: &'r LinkResolver<'a>) -> Self {
        Self {
            resolver,
            cache: HashMap::new(),
            hits: 0,
        }
    }

    /// The underlying resolver.
    #[must_use]
    pub fn resolver(&self) -> &'r LinkResolver<'a> {
        self.resolver
    }

    /// Resolve a link, reusing an earlier result for the same input.
    pub fn resolve(
        &mut self,
        raw: &str,
        origin: &str,
        syntax: LinkSyntax,
        is_embed: bool,
    ) -> ResolvedLink {
        let key = (origin.to_owned(), raw.to_owned(), syntax, is_embed);
        if let Some(found) = self.cache.get(&key) {
            self.hits += 1;
            return found.clone();
        }
        let resolved = self.resolver.resolve_as(raw, origin, syntax, is_embed);
        self.cache.insert(key, resolved.clone());
        resolved
    }

    /// Resolve an already parsed link, memoized on its raw text.
    ///
    /// The label always comes from `target`, since links sharing a target
    /// can carry different text.
    pub fn resolve_target(&mut self, target: &LinkTarget, origin: &str) -> ResolvedLink {
        let key = (origin.to_owned(), target.raw.clone(), target.syntax, target.is_embed);
        if let Some(found) = self.cache.get(&key) {
            self.hits += 1;
            return ResolvedLink {
                label: target.display_text().to_owned(),
                ..found.clone()
            };
        }
        let resolved = self.resolver.resolve_target(target, origin);
        self.cache.insert(key, resolved.clone());
        resolved
    }

    /// Number of cached resolutions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Check whether nothing was resolved yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Number of lookups answered from the cache.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.hits
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_index() -> FileIndex {
        FileIndex::new([
            "/blog/post-1.md",
            "/blog/README.md",
            "/README.md",
            "/assets/sample.pdf",
        ])
    }

    fn shortest(raw: &str, origin: &str) -> ResolvedLink {
        let index = sample_index();
        let permalinks = PermalinkMap::new();
        resolve_link(raw, origin, &index, &permalinks, &ResolveOptions::shortest_possible())
    }

    #[test]
    fn test_unique_basename_resolves() {
        let link = shortest("post-1", "/blog/other.md");

        assert_eq!(
            link,
            ResolvedLink {
                url: "/blog/post-1".to_owned(),
                matched_path: Some("/blog/post-1.md".to_owned()),
                exists: true,
                kind: LinkKind::Internal,
                label: "post-1".to_owned(),
                heading: None,
            }
        );
    }

    #[test]
    fn test_basename_from_other_directory() {
        let link = shortest("post-1", "/projects/x.md");

        assert_eq!(link.url, "/blog/post-1");
    }

    #[test]
    fn test_readme_collapses_to_directory() {
        let link = shortest("README", "/blog/other.md");

        assert_eq!(link.matched_path.as_deref(), Some("/blog/README.md"));
        assert_eq!(link.url, "/blog");
    }

    #[test]
    fn test_absolute_readme_exact() {
        let index = sample_index();
        let permalinks = PermalinkMap::new();

        let link = resolve_link("/README", "/blog/other.md", &index, &permalinks, &ResolveOptions::default());

        assert_eq!(link.matched_path.as_deref(), Some("/README.md"));
        assert_eq!(link.url, "/");
    }

    #[test]
    fn test_unresolved_preserves_raw_target() {
        let link = shortest("[[nonexistent-page#Intro|Missing]]", "/blog/other.md");

        assert!(!link.exists);
        assert_eq!(link.url, "nonexistent-page#Intro");
        assert_eq!(link.label, "Missing");
        assert_eq!(link.matched_path, None);
    }

    #[test]
    fn test_case_permutations_resolve_identically() {
        let a = shortest("Post-1", "/blog/other.md");
        let b = shortest("POST-1", "/blog/other.md");
        let c = shortest("post-1", "/blog/other.md");

        assert_eq!(a.url, c.url);
        assert_eq!(b.url, c.url);
        assert!(a.exists && b.exists);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let first = shortest("post-1#Intro", "/blog/other.md");
        let second = shortest("post-1#Intro", "/blog/other.md");

        assert_eq!(first, second);
        assert_eq!(first.url, "/blog/post-1#intro");
    }

    #[test]
    fn test_commonmark_is_case_sensitive_by_default() {
        let index = sample_index();
        let permalinks = PermalinkMap::new();
        let resolver = LinkResolver::new(&index, &permalinks, &ResolveOptions::default());

        let link = resolver.resolve_as("Post-1.md", "/blog/other.md", LinkSyntax::CommonMark, false);

        assert!(!link.exists);
        assert_eq!(link.url, "Post-1.md");
    }

    #[test]
    fn test_commonmark_case_insensitive_override() {
        let index = sample_index();
        let permalinks = PermalinkMap::new();
        let options = ResolveOptions {
            case_insensitive: Some(true),
            ..ResolveOptions::default()
        };
        let resolver = LinkResolver::new(&index, &permalinks, &options);

        let link = resolver.resolve_as("Post-1.md", "/blog/other.md", LinkSyntax::CommonMark, false);

        assert_eq!(link.url, "/blog/post-1");
    }

    #[test]
    fn test_commonmark_does_not_search_site() {
        let index = sample_index();
        let permalinks = PermalinkMap::new();
        let resolver = LinkResolver::new(&index, &permalinks, &ResolveOptions::shortest_possible());

        let link = resolver.resolve_as("post-1.md", "/projects/x.md", LinkSyntax::CommonMark, false);

        assert!(!link.exists);
    }

    #[test]
    fn test_commonmark_relative_with_spaces() {
        let index = FileIndex::new(["/my notes/some page.md"]);
        let permalinks = PermalinkMap::new();
        let resolver = LinkResolver::new(&index, &permalinks, &ResolveOptions::default());

        let link = resolver.resolve_as(
            "some%20page.md#Deep%20Dive",
            "/my notes/README.md",
            LinkSyntax::CommonMark,
            false,
        );

        assert_eq!(link.url, "/my+notes/some+page#deep-dive");
    }

    #[test]
    fn test_external_passthrough() {
        let link = shortest("[[https://example.com/a?b=c|Example]]", "/README.md");

        assert_eq!(link.url, "https://example.com/a?b=c");
        assert_eq!(link.kind, LinkKind::External);
        assert!(link.exists);
    }

    #[test]
    fn test_mailto_passthrough() {
        let index = sample_index();
        let permalinks = PermalinkMap::new();

        let link = resolve_link("mailto:me@example.com", "/README.md", &index, &permalinks, &ResolveOptions::default());

        assert_eq!(link.kind, LinkKind::Mailto);
        assert_eq!(link.url, "mailto:me@example.com");
    }

    #[test]
    fn test_anchor_only() {
        let index = sample_index();
        let permalinks = PermalinkMap::new();

        let link = resolve_link("#Getting Started", "/README.md", &index, &permalinks, &ResolveOptions::default());

        assert_eq!(link.kind, LinkKind::Anchor);
        assert_eq!(link.url, "#getting-started");
        assert_eq!(link.matched_path, None);
    }

    #[test]
    fn test_empty_path_links_to_self() {
        let link = shortest("[[|Home]]", "/blog/post-1.md");

        assert_eq!(link.url, "/blog/post-1");
        assert_eq!(link.matched_path.as_deref(), Some("/blog/post-1.md"));
        assert_eq!(link.label, "Home");
    }

    #[test]
    fn test_asset_resolves_to_asset_url() {
        let index = sample_index();
        let permalinks = PermalinkMap::new();
        let options = ResolveOptions {
            asset_base: Some("https://raw.example.com/site-1".to_owned()),
            ..ResolveOptions::shortest_possible().with_site_prefix("/@john/notes")
        };

        let link = resolve_link("![[sample.pdf]]", "/blog/post-1.md", &index, &permalinks, &options);

        assert_eq!(link.url, "https://raw.example.com/site-1/assets/sample.pdf");
    }

    #[test]
    fn test_site_prefix() {
        let index = sample_index();
        let permalinks = PermalinkMap::new();
        let options = ResolveOptions::shortest_possible().with_site_prefix("/@john/notes");

        let root = resolve_link("/README", "/blog/post-1.md", &index, &permalinks, &options);
        let post = resolve_link("post-1", "/README.md", &index, &permalinks, &options);

        assert_eq!(root.url, "/@john/notes");
        assert_eq!(post.url, "/@john/notes/blog/post-1");
    }

    #[test]
    fn test_permalink_override() {
        let index = sample_index();
        let permalinks = PermalinkMap::from_entries([("/blog/post-1.md", "/my-post")]).unwrap();
        let options = ResolveOptions::shortest_possible().with_site_prefix("/@john/notes");

        let link = resolve_link("post-1#Intro", "/README.md", &index, &permalinks, &options);

        assert_eq!(link.url, "/@john/notes/my-post#intro");
        assert_eq!(link.matched_path.as_deref(), Some("/blog/post-1.md"));
    }

    #[test]
    fn test_custom_alias_divider() {
        let index = sample_index();
        let permalinks = PermalinkMap::new();
        let resolver = LinkResolver::new(&index, &permalinks, &ResolveOptions::shortest_possible())
            .with_parser(LinkParser::new(':'));

        let link = resolver.resolve("[[post-1:The post]]", "/README.md");

        assert_eq!(link.url, "/blog/post-1");
        assert_eq!(link.label, "The post");
    }

    #[test]
    fn test_render_session_memoizes() {
        let index = sample_index();
        let permalinks = PermalinkMap::new();
        let resolver = LinkResolver::new(&index, &permalinks, &ResolveOptions::shortest_possible());
        let mut session = RenderSession::new(&resolver);

        let first = session.resolve("post-1", "/README.md", LinkSyntax::Wiki, false);
        let second = session.resolve("post-1", "/README.md", LinkSyntax::Wiki, false);
        let embed = session.resolve("post-1", "/README.md", LinkSyntax::Wiki, true);

        assert_eq!(first, second);
        assert_eq!(embed.url, first.url);
        assert_eq!(session.len(), 2);
        assert_eq!(session.hits(), 1);
    }

    #[test]
    fn test_render_session_keeps_link_text_per_target() {
        let index = sample_index();
        let permalinks = PermalinkMap::new();
        let resolver = LinkResolver::new(&index, &permalinks, &ResolveOptions::default());
        let mut session = RenderSession::new(&resolver);
        let parser = LinkParser::default();

        let first = parser.parse_with_text("post-1.md", Some("First"), LinkSyntax::CommonMark, false);
        let second =
            parser.parse_with_text("post-1.md", Some("Second"), LinkSyntax::CommonMark, false);

        let a = session.resolve_target(&first, "/blog/other.md");
        let b = session.resolve_target(&second, "/blog/other.md");

        assert_eq!(a.label, "First");
        assert_eq!(b.label, "Second");
        assert_eq!(a.url, b.url);
        assert_eq!(session.hits(), 1);
    }
}
