//! Link target extraction from raw markdown.
//!
//! Used to build backlink lists without running the full render pipeline.

use std::collections::HashSet;

use regex::Regex;

use crate::parser::{LinkKind, LinkParser, LinkSyntax, LinkTarget};
use crate::path::resolve_path;

/// One link found in markdown source.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScannedLink {
    /// Link as written: the whole wiki-link, or a CommonMark destination.
    pub raw: String,
    /// Syntax the link was written in.
    pub syntax: LinkSyntax,
    /// `![[...]]` embed or `![](...)` image.
    pub is_embed: bool,
}

/// Scans markdown source for wiki-link and CommonMark link targets.
#[derive(Clone, Debug)]
pub struct LinkScanner {
    wiki: Regex,
    commonmark: Regex,
    parser: LinkParser,
}

impl Default for LinkScanner {
    fn default() -> Self {
        Self::new(LinkParser::default())
    }
}

impl LinkScanner {
    /// Create a scanner using `parser` for splitting targets.
    #[must_use]
    pub fn new(parser: LinkParser) -> Self {
        Self {
            wiki: Regex::new(r"!?\[\[([^\[\]]+?)\]\]").expect("invalid wiki-link regex"),
            commonmark: Regex::new(r"!?\[[^\]]*\]\(([^()]*)\)")
                .expect("invalid markdown link regex"),
            parser,
        }
    }

    /// Internal links in order of appearance, each with its syntax.
    ///
    /// Repeats of the same link (same text, syntax and embed flag) are
    /// dropped. Feed the results to
    /// [`LinkResolver::resolve_as`](crate::LinkResolver::resolve_as) to
    /// resolve them the way a render would.
    ///
    /// # Examples
    ///
    /// ```
    /// use folio_links::{LinkScanner, LinkSyntax};
    ///
    /// let links = LinkScanner::default().scan("[[post-1]] and ![a](img/a.png)");
    ///
    /// assert_eq!(links[0].raw, "[[post-1]]");
    /// assert_eq!(links[0].syntax, LinkSyntax::Wiki);
    /// assert_eq!(links[1].raw, "img/a.png");
    /// assert!(links[1].is_embed);
    /// ```
    #[must_use]
    pub fn scan(&self, source: &str) -> Vec<ScannedLink> {
        let mut seen = HashSet::new();
        self.targets(source)
            .into_iter()
            .map(|(link, _)| link)
            .filter(|link| seen.insert(link.clone()))
            .collect()
    }

    /// Extract unique link targets in order of appearance.
    ///
    /// External, `mailto:` and anchor-only links are skipped; embeds are
    /// included. Headings and aliases are removed. With a `base` content
    /// path, relative targets are resolved to absolute content paths;
    /// otherwise they are returned as written.
    ///
    /// # Examples
    ///
    /// ```
    /// use folio_links::LinkScanner;
    ///
    /// let scanner = LinkScanner::default();
    /// let source = "See [[post-1|the post]], ![](img/a.png) and [site](https://x.io).";
    ///
    /// assert_eq!(scanner.extract(source, None), vec!["post-1", "img/a.png"]);
    /// assert_eq!(
    ///     scanner.extract(source, Some("/blog/README.md")),
    ///     vec!["/blog/post-1", "/blog/img/a.png"]
    /// );
    /// ```
    #[must_use]
    pub fn extract(&self, source: &str, base: Option<&str>) -> Vec<String> {
        let mut seen = HashSet::new();
        self.targets(source)
            .into_iter()
            .map(|(_, target)| match base {
                Some(base) => resolve_path(&target.raw_path, base),
                None => target.raw_path,
            })
            .filter(|path| seen.insert(path.clone()))
            .collect()
    }

    /// Every internal link with a path, sorted by position.
    fn targets(&self, source: &str) -> Vec<(ScannedLink, LinkTarget)> {
        let mut found: Vec<(usize, ScannedLink, LinkTarget)> = Vec::new();

        for captures in self.wiki.captures_iter(source) {
            let (Some(whole), Some(inner)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            let is_embed = whole.as_str().starts_with('!');
            let target = self.parser.parse(inner.as_str(), LinkSyntax::Wiki, is_embed);
            if target.kind == LinkKind::Internal && !target.raw_path.is_empty() {
                let link = ScannedLink {
                    raw: whole.as_str().to_owned(),
                    syntax: LinkSyntax::Wiki,
                    is_embed,
                };
                found.push((whole.start(), link, target));
            }
        }

        for captures in self.commonmark.captures_iter(source) {
            let (Some(whole), Some(inner)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            let Some(destination) = link_destination(inner.as_str()) else {
                continue;
            };
            let is_embed = whole.as_str().starts_with('!');
            let target = self.parser.parse(destination, LinkSyntax::CommonMark, is_embed);
            if target.kind == LinkKind::Internal && !target.raw_path.is_empty() {
                let link = ScannedLink {
                    raw: destination.to_owned(),
                    syntax: LinkSyntax::CommonMark,
                    is_embed,
                };
                found.push((whole.start(), link, target));
            }
        }

        found.sort_by_key(|(pos, _, _)| *pos);
        found
            .into_iter()
            .map(|(_, link, target)| (link, target))
            .collect()
    }
}

/// Destination part of `(dest "title")`, without angle brackets.
fn link_destination(inner: &str) -> Option<&str> {
    let inner = inner.trim();
    let destination = if let Some(rest) = inner.strip_prefix('<') {
        rest.split_once('>').map_or(rest, |(dest, _)| dest)
    } else {
        inner.split_whitespace().next().unwrap_or_default()
    };
    (!destination.is_empty()).then_some(destination)
}
