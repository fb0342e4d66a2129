//! Link rewriting pipeline for parsed markdown.
//!
//! The host markdown parser hands over a small typed tree ([`Block`],
//! [`Inline`]). A [`Pipeline`] runs an explicit, ordered list of [`Stage`]s
//! over it, each rewriting links through a shared
//! [`RenderSession`](folio_links::RenderSession), and [`render_html`] writes
//! the result.
//!
//! # Example
//!
//! ```
//! use folio_links::{FileIndex, LinkResolver, PermalinkMap, RenderSession, ResolveOptions};
//! use folio_render::{Block, Inline, Pipeline, render_html};
//!
//! let index = FileIndex::new(["/blog/post-1.md", "/README.md"]);
//! let permalinks = PermalinkMap::new();
//! let resolver = LinkResolver::new(&index, &permalinks, &ResolveOptions::shortest_possible());
//! let mut session = RenderSession::new(&resolver);
//!
//! let blocks = vec![Block::paragraph(vec![Inline::WikiLink {
//!     raw: "[[post-1]]".to_owned(),
//!     is_embed: false,
//! }])];
//! let blocks = Pipeline::standard().run(blocks, "/README.md", &mut session);
//!
//! assert_eq!(
//!     render_html(&blocks),
//!     r#"<p><a href="/blog/post-1" class="internal" data-resolved-file-path="/blog/post-1.md">post-1</a></p>"#
//! );
//! ```

mod ast;
mod commonmark;
mod html;
mod html_attr;
mod stage;
mod wiki;
mod youtube;

pub use ast::{Block, Element, Inline};
pub use commonmark::CommonMarkLinkStage;
pub use html::{escape_html, render_html};
pub use html_attr::HtmlLinkStage;
pub use stage::{Pipeline, Stage, StageContext};
pub use wiki::WikiLinkStage;
pub use youtube::YoutubeEmbedStage;
