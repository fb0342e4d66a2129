//! Link target parsing.
//!
//! Splits raw link strings from the three supported syntaxes into path,
//! heading and alias parts, and classifies what kind of link they are.

use std::fmt;

/// Syntax a link was written in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum LinkSyntax {
    /// Obsidian-style `[[target#heading|alias]]`.
    Wiki,
    /// `[text](target)` and `![alt](target)`.
    CommonMark,
    /// Raw HTML `href`/`src` attributes.
    Html,
}

impl LinkSyntax {
    /// Stable lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wiki => "wiki",
            Self::CommonMark => "commonmark",
            Self::Html => "html",
        }
    }
}

impl fmt::Display for LinkSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a link points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum LinkKind {
    /// `http(s)://`, protocol-relative `//` or `tel:` links. Passed through.
    External,
    /// `mailto:` links. Passed through.
    Mailto,
    /// Heading on the current page (`#section`).
    Anchor,
    /// Anything that must be matched against the file index.
    Internal,
}

impl LinkKind {
    /// Whether the link leaves the site and is emitted unchanged.
    #[must_use]
    pub fn is_passthrough(self) -> bool {
        matches!(self, Self::External | Self::Mailto)
    }
}

/// Explicit embed size given in place of alt text (`![[img.png|300x200]]`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels, if given.
    pub height: Option<u32>,
}

impl Dimensions {
    /// Parse `WIDTH` or `WIDTHxHEIGHT`, ignoring surrounding whitespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use folio_links::Dimensions;
    ///
    /// let dims = Dimensions::parse(" 300x200 ").unwrap();
    /// assert_eq!((dims.width, dims.height), (300, Some(200)));
    /// assert!(Dimensions::parse("a cat").is_none());
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let (width, height) = match text.split_once('x') {
            Some((w, h)) => (w, Some(h)),
            None => (text, None),
        };
        let width = parse_digits(width)?;
        let height = match height {
            Some(h) => Some(parse_digits(h)?),
            None => None,
        };
        Some(Self { width, height })
    }
}

fn parse_digits(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// A parsed link target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkTarget {
    /// The raw input as handed to the parser.
    pub raw: String,
    /// Link target with the alias removed. Emitted as-is for unresolved links.
    pub target: String,
    /// Path part (decoded, may be empty for "this page").
    pub raw_path: String,
    /// Heading fragment without the `#`.
    pub heading: Option<String>,
    /// Display text (wiki alias, CommonMark link text or image alt).
    pub alias: Option<String>,
    /// Whether the link is an embed (`![[...]]`, `![...](...)`).
    pub is_embed: bool,
    /// Link classification.
    pub kind: LinkKind,
    /// Syntax the link was written in.
    pub syntax: LinkSyntax,
    /// Explicit embed dimensions taken from the alias.
    pub dimensions: Option<Dimensions>,
}

impl LinkTarget {
    /// Text to display for the link.
    ///
    /// Falls back to the target (without alias) when no alias was given.
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.target)
    }
}

/// Parses raw link strings into [`LinkTarget`]s.
#[derive(Clone, Debug)]
pub struct LinkParser {
    alias_divider: char,
}

impl Default for LinkParser {
    fn default() -> Self {
        Self { alias_divider: '|' }
    }
}

impl LinkParser {
    /// Create a parser with a custom wiki-link alias divider.
    #[must_use]
    pub fn new(alias_divider: char) -> Self {
        Self { alias_divider }
    }

    /// Wiki-link alias divider.
    #[must_use]
    pub fn alias_divider(&self) -> char {
        self.alias_divider
    }

    /// Parse a raw link without separate display text.
    ///
    /// Wiki-links carry their alias inline, so this is the usual entry point
    /// for them.
    #[must_use]
    pub fn parse(&self, raw: &str, syntax: LinkSyntax, is_embed: bool) -> LinkTarget {
        self.parse_with_text(raw, None, syntax, is_embed)
    }

    /// Parse a raw link with optional display text (link text or image alt).
    ///
    /// For wiki-links `text` is only used when the link has no inline alias.
    #[must_use]
    pub fn parse_with_text(
        &self,
        raw: &str,
        text: Option<&str>,
        syntax: LinkSyntax,
        is_embed: bool,
    ) -> LinkTarget {
        match syntax {
            LinkSyntax::Wiki => self.parse_wiki(raw, text, is_embed),
            LinkSyntax::CommonMark | LinkSyntax::Html => {
                parse_commonmark(raw, text, syntax, is_embed)
            }
        }
    }

    fn parse_wiki(&self, raw: &str, text: Option<&str>, is_embed: bool) -> LinkTarget {
        let mut inner = raw.trim();
        let mut is_embed = is_embed;
        if let Some(rest) = inner.strip_prefix('!') {
            is_embed = true;
            inner = rest;
        }
        if let Some(rest) = inner.strip_prefix("[[") {
            inner = rest.strip_suffix("]]").unwrap_or(rest);
        }

        let (target, alias) = match inner.rsplit_once(self.alias_divider) {
            Some((left, alias)) => {
                // `\|` inside tables escapes the divider for the table, not for us
                let left = if self.alias_divider == '|' {
                    left.strip_suffix('\\').unwrap_or(left)
                } else {
                    left
                };
                (left, non_empty(alias))
            }
            None => (inner, None),
        };
        let target = target.trim();
        let alias = alias.or_else(|| text.and_then(non_empty));

        if let Some(kind) = passthrough_kind(target) {
            return LinkTarget {
                raw: raw.to_owned(),
                target: target.to_owned(),
                raw_path: target.to_owned(),
                heading: None,
                alias,
                is_embed,
                kind,
                syntax: LinkSyntax::Wiki,
                dimensions: None,
            };
        }

        let (path, heading) = match target.split_once('#') {
            Some((path, heading)) => (path.trim(), non_empty(heading)),
            None => (target, None),
        };

        let (alias, dimensions) = take_dimensions(alias, is_embed);
        LinkTarget {
            raw: raw.to_owned(),
            target: target.to_owned(),
            raw_path: path.to_owned(),
            kind: internal_kind(path, heading.as_deref()),
            heading,
            alias,
            is_embed,
            syntax: LinkSyntax::Wiki,
            dimensions,
        }
    }
}

fn parse_commonmark(
    raw: &str,
    text: Option<&str>,
    syntax: LinkSyntax,
    is_embed: bool,
) -> LinkTarget {
    let target = raw.trim();
    let alias = text.and_then(non_empty);

    if let Some(kind) = passthrough_kind(target) {
        return LinkTarget {
            raw: raw.to_owned(),
            target: target.to_owned(),
            raw_path: target.to_owned(),
            heading: None,
            alias,
            is_embed,
            kind,
            syntax,
            dimensions: None,
        };
    }

    let (path, heading) = match target.split_once('#') {
        Some((path, fragment)) => (path, non_empty(&decode_spaces(fragment))),
        None => (target, None),
    };
    let path = decode_spaces(path);

    let (alias, dimensions) = take_dimensions(alias, is_embed);
    LinkTarget {
        raw: raw.to_owned(),
        target: target.to_owned(),
        kind: internal_kind(&path, heading.as_deref()),
        raw_path: path,
        heading,
        alias,
        is_embed,
        syntax,
        dimensions,
    }
}

/// Classify links that bypass matching entirely.
fn passthrough_kind(target: &str) -> Option<LinkKind> {
    let lower = target.to_ascii_lowercase();
    if lower.starts_with("mailto:") {
        Some(LinkKind::Mailto)
    } else if lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("tel:")
        || lower.starts_with("//")
    {
        Some(LinkKind::External)
    } else {
        None
    }
}

fn internal_kind(path: &str, heading: Option<&str>) -> LinkKind {
    if path.is_empty() && heading.is_some() {
        LinkKind::Anchor
    } else {
        LinkKind::Internal
    }
}

/// Move a dimension-only alias on an embed into [`Dimensions`].
fn take_dimensions(
    alias: Option<String>,
    is_embed: bool,
) -> (Option<String>, Option<Dimensions>) {
    if !is_embed {
        return (alias, None);
    }
    match alias.as_deref().and_then(Dimensions::parse) {
        Some(dims) => (None, Some(dims)),
        None => (alias, None),
    }
}

fn decode_spaces(component: &str) -> String {
    component.replace("%20", " ")
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_owned())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn wiki(raw: &str) -> LinkTarget {
        LinkParser::default().parse(raw, LinkSyntax::Wiki, false)
    }

    fn commonmark(raw: &str) -> LinkTarget {
        LinkParser::default().parse(raw, LinkSyntax::CommonMark, false)
    }

    #[test]
    fn test_wiki_full_form() {
        let link = wiki("[[blog/post-1#Some Heading|the post]]");

        assert_eq!(link.raw_path, "blog/post-1");
        assert_eq!(link.heading.as_deref(), Some("Some Heading"));
        assert_eq!(link.alias.as_deref(), Some("the post"));
        assert_eq!(link.target, "blog/post-1#Some Heading");
        assert_eq!(link.kind, LinkKind::Internal);
        assert!(!link.is_embed);
    }

    #[test]
    fn test_wiki_without_brackets() {
        let link = wiki("post-1");

        assert_eq!(link.raw_path, "post-1");
        assert_eq!(link.heading, None);
        assert_eq!(link.alias, None);
        assert_eq!(link.display_text(), "post-1");
    }

    #[test]
    fn test_wiki_embed_prefix_sets_flag() {
        let link = wiki("![[image.png]]");

        assert!(link.is_embed);
        assert_eq!(link.raw_path, "image.png");
    }

    #[test]
    fn test_wiki_splits_on_last_divider() {
        let link = wiki("a|b|c");

        assert_eq!(link.raw_path, "a|b");
        assert_eq!(link.alias.as_deref(), Some("c"));
    }

    #[test]
    fn test_wiki_splits_on_first_hash() {
        let link = wiki("page#one#two");

        assert_eq!(link.raw_path, "page");
        assert_eq!(link.heading.as_deref(), Some("one#two"));
    }

    #[test]
    fn test_wiki_table_escaped_divider() {
        let link = wiki(r"[[post-1\|alias]]");

        assert_eq!(link.raw_path, "post-1");
        assert_eq!(link.alias.as_deref(), Some("alias"));
    }

    #[test]
    fn test_wiki_custom_divider() {
        let parser = LinkParser::new(':');

        let link = parser.parse("[[post-1:alias]]", LinkSyntax::Wiki, false);

        assert_eq!(link.raw_path, "post-1");
        assert_eq!(link.alias.as_deref(), Some("alias"));
    }

    #[test]
    fn test_wiki_empty_alias_and_heading_degrade() {
        let link = wiki("[[post-1#|]]");

        assert_eq!(link.raw_path, "post-1");
        assert_eq!(link.heading, None);
        assert_eq!(link.alias, None);
        assert_eq!(link.kind, LinkKind::Internal);
    }

    #[test]
    fn test_wiki_heading_only_is_anchor() {
        let link = wiki("[[#Intro]]");

        assert_eq!(link.kind, LinkKind::Anchor);
        assert_eq!(link.raw_path, "");
        assert_eq!(link.heading.as_deref(), Some("Intro"));
    }

    #[test]
    fn test_wiki_empty_target_is_self() {
        let link = wiki("[[|Home]]");

        assert_eq!(link.kind, LinkKind::Internal);
        assert_eq!(link.raw_path, "");
        assert_eq!(link.alias.as_deref(), Some("Home"));
    }

    #[test]
    fn test_wiki_external() {
        let link = wiki("[[https://example.com|site]]");

        assert_eq!(link.kind, LinkKind::External);
        assert_eq!(link.raw_path, "https://example.com");
        assert_eq!(link.alias.as_deref(), Some("site"));
    }

    #[test]
    fn test_wiki_embed_dimensions() {
        let link = wiki("![[photo.jpg|300x200]]");

        assert_eq!(
            link.dimensions,
            Some(Dimensions {
                width: 300,
                height: Some(200)
            })
        );
        assert_eq!(link.alias, None);
    }

    #[test]
    fn test_wiki_dimensions_ignored_for_links() {
        let link = wiki("[[post|300]]");

        assert_eq!(link.dimensions, None);
        assert_eq!(link.alias.as_deref(), Some("300"));
    }

    #[test]
    fn test_commonmark_decodes_spaces() {
        let link = commonmark("my%20notes/some%20page.md#Deep%20Dive");

        assert_eq!(link.raw_path, "my notes/some page.md");
        assert_eq!(link.heading.as_deref(), Some("Deep Dive"));
        assert_eq!(link.target, "my%20notes/some%20page.md#Deep%20Dive");
    }

    #[test]
    fn test_commonmark_passthrough() {
        assert_eq!(commonmark("https://example.com/a#b").kind, LinkKind::External);
        assert_eq!(commonmark("HTTP://EXAMPLE.COM").kind, LinkKind::External);
        assert_eq!(commonmark("//cdn.example.com/x.js").kind, LinkKind::External);
        assert_eq!(commonmark("tel:+123").kind, LinkKind::External);
        assert_eq!(commonmark("mailto:a@b.c").kind, LinkKind::Mailto);
    }

    #[test]
    fn test_commonmark_external_keeps_fragment() {
        let link = commonmark("https://example.com/a#b");

        assert_eq!(link.raw_path, "https://example.com/a#b");
        assert_eq!(link.heading, None);
    }

    #[test]
    fn test_commonmark_anchor() {
        let link = commonmark("#Section Two");

        assert_eq!(link.kind, LinkKind::Anchor);
        assert_eq!(link.heading.as_deref(), Some("Section Two"));
    }

    #[test]
    fn test_commonmark_stray_hash() {
        let link = commonmark("page.md#");

        assert_eq!(link.raw_path, "page.md");
        assert_eq!(link.heading, None);
        assert_eq!(link.kind, LinkKind::Internal);
    }

    #[test]
    fn test_commonmark_image_alt_dimensions() {
        let parser = LinkParser::default();

        let link = parser.parse_with_text("cat.png", Some("400"), LinkSyntax::CommonMark, true);

        assert_eq!(
            link.dimensions,
            Some(Dimensions {
                width: 400,
                height: None
            })
        );
        assert_eq!(link.alias, None);
    }

    #[test]
    fn test_commonmark_text_becomes_alias() {
        let parser = LinkParser::default();

        let link = parser.parse_with_text("post.md", Some("Read"), LinkSyntax::Html, false);

        assert_eq!(link.alias.as_deref(), Some("Read"));
        assert_eq!(link.syntax, LinkSyntax::Html);
    }

    #[test]
    fn test_dimensions_parse() {
        assert_eq!(
            Dimensions::parse("12"),
            Some(Dimensions {
                width: 12,
                height: None
            })
        );
        assert_eq!(Dimensions::parse("12x"), None);
        assert_eq!(Dimensions::parse("x12"), None);
        assert_eq!(Dimensions::parse("-1"), None);
        assert_eq!(Dimensions::parse(""), None);
    }
}
