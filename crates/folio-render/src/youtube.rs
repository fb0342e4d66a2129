//! YouTube embed stage.

use folio_links::YoutubeMatcher;

use crate::ast::{Block, Element, Inline};
use crate::stage::{Stage, StageContext};

const CONTAINER_STYLE: &str = "position:relative;padding-bottom:56.25%";
const PLAYER_STYLE: &str = "position:absolute;top:0;left:0;width:100%;height:100%";
const PLAYER_ALLOW: &str =
    "accelerometer autoplay clipboard-write encrypted-media gyroscope picture-in-picture";

/// Turns a paragraph holding nothing but a YouTube link into a responsive
/// player.
#[derive(Clone, Debug, Default)]
pub struct YoutubeEmbedStage {
    matcher: YoutubeMatcher,
}

impl YoutubeEmbedStage {
    /// Create a stage with an explicit matcher.
    #[must_use]
    pub fn new(matcher: YoutubeMatcher) -> Self {
        Self { matcher }
    }

    fn player(&self, children: &[Inline]) -> Option<Element> {
        let [Inline::Link { url, .. }] = children else {
            return None;
        };
        let embed = self.matcher.match_url(url)?;

        tracing::debug!(video_id = %embed.video_id, "Embedding YouTube video");
        Some(
            Element::new("div").attr("style", CONTAINER_STYLE).child(Inline::Element(
                Element::new("iframe")
                    .attr("style", PLAYER_STYLE)
                    .attr("src", embed.embed_url)
                    .flag("allowfullscreen")
                    .attr("frameborder", "0")
                    .attr("allow", PLAYER_ALLOW),
            )),
        )
    }
}

impl Stage for YoutubeEmbedStage {
    fn name(&self) -> &'static str {
        "youtube-embeds"
    }

    fn apply(&self, block: Block, _cx: &mut StageContext<'_, '_, '_>) -> Block {
        match block {
            Block::Paragraph { children } => match self.player(&children) {
                Some(player) => Block::Element(player),
                None => Block::Paragraph { children },
            },
            other => other,
        }
    }
}
