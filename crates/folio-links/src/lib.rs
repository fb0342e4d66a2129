//! Link and path resolution for published markdown sites.
//!
//! Turns links written against a loosely structured note tree into stable
//! site URLs. Three link syntaxes are understood:
//! - wiki-links (`[[target#heading|alias]]`, `![[embed]]`)
//! - CommonMark links and images (`[text](target)`)
//! - raw HTML `href`/`src` attributes
//!
//! # Architecture
//!
//! Resolution is a fixed chain of pure steps over an immutable
//! [`FileIndex`]:
//!
//! 1. [`LinkParser`] splits the raw target into path, heading and alias
//! 2. [`resolve_path`] resolves the path against the linking file
//! 3. [`FileMatcher`] matches the candidate against the index
//! 4. [`PermalinkMap`] substitutes author-declared vanity paths
//! 5. [`UrlFormatter`] produces the final URL
//!
//! [`LinkResolver`] bundles the chain; [`RenderSession`] memoizes it for
//! one render pass.
//!
//! # Example
//!
//! ```
//! use folio_links::{FileIndex, PermalinkMap, ResolveOptions, resolve_link};
//!
//! let index = FileIndex::new(["/blog/post-1.md", "/blog/README.md", "/README.md"]);
//! let permalinks = PermalinkMap::new();
//! let options = ResolveOptions::shortest_possible().with_site_prefix("/@john/notes");
//!
//! let link = resolve_link("[[README|Blog]]", "/blog/post-1.md", &index, &permalinks, &options);
//! assert_eq!(link.url, "/@john/notes/blog");
//! assert_eq!(link.label, "Blog");
//! ```

mod embed;
mod extract;
mod index;
mod matcher;
mod page;
mod parser;
mod path;
mod permalink;
mod resolve;
mod url;

pub use embed::{EmbedCategory, EmbedClassifier, YoutubeEmbed, YoutubeMatcher, classify_embed};
pub use extract::{LinkScanner, ScannedLink};
pub use index::FileIndex;
pub use matcher::{FileMatcher, MatchMode};
pub use page::find_page;
pub use parser::{Dimensions, LinkKind, LinkParser, LinkSyntax, LinkTarget};
pub use path::{
    extension, file_name, is_markdown_extension, is_markdown_path, normalize_path, parent_dir,
    resolve_path, segment_count, strip_markdown_extension,
};
pub use permalink::{PermalinkError, PermalinkMap};
pub use resolve::{LinkResolver, RenderSession, ResolveOptions, ResolvedLink, resolve_link};
pub use url::{UrlFormatter, slugify_heading};
