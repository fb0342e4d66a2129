//! Wiki-link stage.
//!
//! Replaces [`Inline::WikiLink`] nodes with anchors or media elements:
//!
//! | Link | Output |
//! |------|--------|
//! | `[[page]]` | `<a href class="internal">` |
//! | `![[image.png]]` | `<img src alt class>` |
//! | `![[doc.pdf]]` | `<iframe width="100%" src title class>` |
//! | `![[clip.mp4]]`, `![[song.mp3]]` | `<video controls>`, `<audio controls>` |
//! | `![[note]]` | anchor with the `transclusion` class |
//! | `![[file.xyz]]` | anchor with the `unsupported` class |
//!
//! Unresolved targets get the extra `new` class. Resolved ones carry the
//! matched file in `data-resolved-file-path`.

use folio_links::{
    Dimensions, EmbedCategory, EmbedClassifier, LinkSyntax, ResolvedLink, file_name,
};

use crate::ast::{Block, Element, Inline};
use crate::stage::{Stage, StageContext};

pub(crate) const INTERNAL_CLASS: &str = "internal";
pub(crate) const NEW_CLASS: &str = "new";
pub(crate) const RESOLVED_PATH_ATTR: &str = "data-resolved-file-path";

/// Rewrites wiki-links and wiki embeds.
#[derive(Clone, Debug, Default)]
pub struct WikiLinkStage {
    classifier: EmbedClassifier,
}

impl WikiLinkStage {
    /// Create a stage with a custom embed classifier.
    #[must_use]
    pub fn new(classifier: EmbedClassifier) -> Self {
        Self { classifier }
    }

    fn rewrite(&self, raw: &str, is_embed: bool, cx: &mut StageContext<'_, '_, '_>) -> Inline {
        let target = cx
            .session
            .resolver()
            .parser()
            .parse(raw, LinkSyntax::Wiki, is_embed);
        let resolved = cx.session.resolve_target(&target, cx.origin);

        if resolved.kind.is_passthrough() {
            return Inline::Element(
                Element::new("a")
                    .attr("href", &resolved.url)
                    .child(Inline::text(&resolved.label)),
            );
        }

        if !target.is_embed {
            return Inline::Element(with_resolved_path(anchor(&resolved, None), &resolved));
        }

        let file = resolved
            .matched_path
            .as_deref()
            .unwrap_or(&target.raw_path);
        let display = target
            .alias
            .clone()
            .unwrap_or_else(|| file_stem(file).to_owned());

        let element = match self.classifier.classify_path(file) {
            EmbedCategory::Image => media(
                Element::new("img")
                    .attr("src", &resolved.url)
                    .attr("alt", display)
                    .attr("class", class_list(&resolved, None)),
                target.dimensions,
            ),
            EmbedCategory::Pdf => Element::new("iframe")
                .attr("width", "100%")
                .attr("src", &resolved.url)
                .attr("title", display)
                .attr("class", class_list(&resolved, None)),
            EmbedCategory::Video => player("video", &resolved, target.dimensions),
            EmbedCategory::Audio => player("audio", &resolved, None),
            EmbedCategory::MarkdownTransclusion => anchor(&resolved, Some("transclusion")),
            EmbedCategory::Unsupported => anchor(&resolved, Some("unsupported")),
        };

        Inline::Element(with_resolved_path(element, &resolved))
    }
}

impl Stage for WikiLinkStage {
    fn name(&self) -> &'static str {
        "wiki-links"
    }

    fn apply(&self, block: Block, cx: &mut StageContext<'_, '_, '_>) -> Block {
        block.map_inlines(&mut |inline| match inline {
            Inline::WikiLink { raw, is_embed } => self.rewrite(&raw, is_embed, cx),
            other => other,
        })
    }
}

/// `internal`, plus `new` for unresolved links and an optional marker.
pub(crate) fn class_list(resolved: &ResolvedLink, marker: Option<&str>) -> String {
    let mut classes = INTERNAL_CLASS.to_owned();
    if !resolved.exists {
        classes.push(' ');
        classes.push_str(NEW_CLASS);
    }
    if let Some(marker) = marker {
        classes.push(' ');
        classes.push_str(marker);
    }
    classes
}

/// Attach `data-resolved-file-path` when the link matched a file.
pub(crate) fn with_resolved_path(element: Element, resolved: &ResolvedLink) -> Element {
    element.attr_opt(RESOLVED_PATH_ATTR, resolved.matched_path.as_deref())
}

/// Add `width`, `height` and a matching inline style.
pub(crate) fn media(element: Element, dimensions: Option<Dimensions>) -> Element {
    let Some(Dimensions { width, height }) = dimensions else {
        return element;
    };
    let style = match height {
        Some(height) => format!("width: {width}px; height: {height}px"),
        None => format!("width: {width}px"),
    };
    element
        .attr("width", width.to_string())
        .attr_opt("height", height.map(|h| h.to_string()))
        .attr("style", style)
}

fn anchor(resolved: &ResolvedLink, marker: Option<&str>) -> Element {
    Element::new("a")
        .attr("href", &resolved.url)
        .attr("class", class_list(resolved, marker))
        .child(Inline::text(&resolved.label))
}

fn player(tag: &str, resolved: &ResolvedLink, dimensions: Option<Dimensions>) -> Element {
    let element = Element::new(tag)
        .attr("src", &resolved.url)
        .attr("class", class_list(resolved, None))
        .flag("controls");
    media(element, dimensions).child(Inline::text(format!(
        "Your browser does not support the {tag} tag."
    )))
}

/// File name without its last extension.
fn file_stem(path: &str) -> &str {
    let name = file_name(path);
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    }
}
