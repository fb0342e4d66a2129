//! Stage for `href`/`src` attributes on HTML elements.

use folio_links::LinkSyntax;

use crate::ast::{Block, Element, Inline};
use crate::stage::{Stage, StageContext};
use crate::wiki::RESOLVED_PATH_ATTR;

/// Tags whose `src` attribute points at a site file.
const SRC_TAGS: &[&str] = &["img", "video", "audio", "source", "iframe", "embed"];

/// Rewrites `<a href>` and media `src` attributes in inline HTML elements.
///
/// Targets resolve the same way as CommonMark links: exact and
/// case-sensitive. Only resolved links are rewritten.
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlLinkStage;

impl HtmlLinkStage {
    fn rewrite(mut element: Element, cx: &mut StageContext<'_, '_, '_>) -> Element {
        let tag = element.tag.to_ascii_lowercase();
        let (attr, is_embed) = if tag == "a" {
            ("href", false)
        } else if SRC_TAGS.contains(&tag.as_str()) {
            ("src", true)
        } else {
            return element;
        };

        let Some(raw) = element.get_attr(attr).map(str::to_owned) else {
            return element;
        };
        let resolved = cx.session.resolve(&raw, cx.origin, LinkSyntax::Html, is_embed);
        if !resolved.exists || resolved.kind.is_passthrough() {
            return element;
        }

        element.set_attr(attr, resolved.url);
        if let Some(path) = resolved.matched_path {
            element.set_attr(RESOLVED_PATH_ATTR, path);
        }
        element
    }
}

impl Stage for HtmlLinkStage {
    fn name(&self) -> &'static str {
        "html-links"
    }

    fn apply(&self, block: Block, cx: &mut StageContext<'_, '_, '_>) -> Block {
        let block = match block {
            Block::Element(element) => Block::Element(Self::rewrite(element, cx)),
            other => other,
        };
        block.map_inlines(&mut |inline| match inline {
            Inline::Element(element) => Inline::Element(Self::rewrite(element, cx)),
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use folio_links::{FileIndex, LinkResolver, PermalinkMap, RenderSession, ResolveOptions};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::stage::Pipeline;

    fn run(inline: Inline) -> Vec<Block> {
        let index = FileIndex::new(["/docs/guide.md", "/docs/img/chart.svg"]);
        let permalinks = PermalinkMap::new();
        let resolver = LinkResolver::new(&index, &permalinks, &ResolveOptions::default());
        let mut session = RenderSession::new(&resolver);

        Pipeline::new()
            .with_stage(HtmlLinkStage)
            .run(vec![Block::paragraph(vec![inline])], "/docs/README.md", &mut session)
    }

    #[test]
    fn test_href_rewritten() {
        let blocks = run(Inline::Element(
            Element::new("a")
                .attr("href", "guide.md#Setup")
                .child(Inline::text("Guide")),
        ));

        assert_eq!(
            blocks,
            vec![Block::paragraph(vec![Inline::Element(
                Element::new("a")
                    .attr("href", "/docs/guide#setup")
                    .child(Inline::text("Guide"))
                    .attr(RESOLVED_PATH_ATTR, "/docs/guide.md")
            )])]
        );
    }

    #[test]
    fn test_src_rewritten() {
        let blocks = run(Inline::Element(
            Element::new("img").attr("src", "img/chart.svg").attr("alt", "Chart"),
        ));

        let Block::Paragraph { children } = &blocks[0] else {
            panic!("expected paragraph");
        };
        let Inline::Element(img) = &children[0] else {
            panic!("expected element");
        };
        assert_eq!(img.get_attr("src"), Some("/docs/img/chart.svg"));
        assert_eq!(img.get_attr("alt"), Some("Chart"));
    }

    #[test]
    fn test_unresolved_and_external_untouched() {
        let missing = Inline::Element(Element::new("a").attr("href", "nope.md"));
        let external = Inline::Element(Element::new("a").attr("href", "https://example.com"));

        assert_eq!(run(missing.clone()), vec![Block::paragraph(vec![missing])]);
        assert_eq!(run(external.clone()), vec![Block::paragraph(vec![external])]);
    }

    #[test]
    fn test_other_tags_ignored() {
        let span = Inline::Element(Element::new("span").attr("src", "guide.md"));

        assert_eq!(run(span.clone()), vec![Block::paragraph(vec![span])]);
    }
}
