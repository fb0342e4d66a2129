//! CommonMark link and image stage.

use folio_links::LinkSyntax;

use crate::ast::{Block, Element, Inline};
use crate::stage::{Stage, StageContext};
use crate::wiki::{INTERNAL_CLASS, media, with_resolved_path};

/// Rewrites `[text](target)` and `![alt](target)` nodes.
///
/// Relative targets resolve against the page being rendered with exact
/// matching. Resolved links become `<a>` elements carrying
/// `data-resolved-file-path`; unresolved ones keep the author's target.
/// External and `mailto:` links are left alone.
///
/// Images always get the `internal` class. An alt text made only of
/// dimensions (`![300x200](a.png)`) sizes the image and is cleared.
#[derive(Clone, Copy, Debug, Default)]
pub struct CommonMarkLinkStage;

impl CommonMarkLinkStage {
    fn rewrite_link(
        url: String,
        title: Option<String>,
        children: Vec<Inline>,
        cx: &mut StageContext<'_, '_, '_>,
    ) -> Inline {
        let resolved = cx
            .session
            .resolve(&url, cx.origin, LinkSyntax::CommonMark, false);
        if resolved.kind.is_passthrough() || !resolved.exists {
            return Inline::Link {
                url,
                title,
                children,
            };
        }

        let mut element = with_resolved_path(
            Element::new("a")
                .attr("href", &resolved.url)
                .attr_opt("title", title),
            &resolved,
        );
        element.children = children;
        Inline::Element(element)
    }

    fn rewrite_image(
        url: &str,
        alt: String,
        title: Option<String>,
        cx: &mut StageContext<'_, '_, '_>,
    ) -> Inline {
        let target = cx.session.resolver().parser().parse_with_text(
            url,
            Some(&alt),
            LinkSyntax::CommonMark,
            true,
        );
        let resolved = cx.session.resolve_target(&target, cx.origin);
        let alt = if target.dimensions.is_some() {
            String::new()
        } else {
            alt
        };

        let element = Element::new("img")
            .attr("src", &resolved.url)
            .attr("alt", alt)
            .attr_opt("title", title)
            .attr("class", INTERNAL_CLASS);
        Inline::Element(with_resolved_path(
            media(element, target.dimensions),
            &resolved,
        ))
    }
}

impl Stage for CommonMarkLinkStage {
    fn name(&self) -> &'static str {
        "commonmark-links"
    }

    fn apply(&self, block: Block, cx: &mut StageContext<'_, '_, '_>) -> Block {
        block.map_inlines(&mut |inline| match inline {
            Inline::Link {
                url,
                title,
                children,
            } => Self::rewrite_link(url, title, children, cx),
            Inline::Image { url, alt, title } => Self::rewrite_image(&url, alt, title, cx),
            other => other,
        })
    }
}
