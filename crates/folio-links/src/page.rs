//! Request slug → content path lookup.

use crate::index::FileIndex;
use crate::path::{file_name, is_markdown_path, strip_markdown_extension};
use crate::permalink::PermalinkMap;
use crate::url::UrlFormatter;

/// Find the page served at a site-relative URL path.
///
/// Lookup order:
/// 1. a page whose permalink equals the slug
/// 2. a page whose URL equals the slug, preferring a plain file, then
///    `index.*`, then `README.*`
/// 3. for the home page only, the first markdown file in index order
///
/// # Arguments
///
/// * `slug` - Decoded URL path without site prefix (`""`, `"/"`, `"blog/post-1"`)
/// * `index` - Site file index
/// * `permalinks` - Declared permalinks
///
/// # Examples
///
/// ```
/// use folio_links::{FileIndex, PermalinkMap, find_page};
///
/// let index = FileIndex::new(["/blog/README.md", "/blog/index.md", "/about.md"]);
/// let permalinks = PermalinkMap::new();
///
/// assert_eq!(find_page("blog", &index, &permalinks), Some("/blog/index.md"));
/// assert_eq!(find_page("", &index, &permalinks), Some("/about.md"));
/// ```
#[must_use]
pub fn find_page<'a>(
    slug: &str,
    index: &'a FileIndex,
    permalinks: &PermalinkMap,
) -> Option<&'a str> {
    let slug = format!("/{}", slug.trim().trim_matches('/'));

    if let Some(path) = permalinks.content_path_for(&slug) {
        if let Some(found) = index.get(path, false) {
            return Some(found);
        }
        tracing::warn!(slug, path, "Permalink points at a file missing from the index");
    }

    let formatter = UrlFormatter::default();
    let found = index
        .iter()
        .filter(|path| is_markdown_path(path))
        .filter(|path| formatter.app_path(path) == slug)
        .min_by_key(|path| index_rank(path));
    if found.is_some() {
        return found;
    }

    if slug == "/" {
        let fallback = index.iter().find(|path| is_markdown_path(path));
        if let Some(path) = fallback {
            tracing::debug!(path, "No home page, falling back to first markdown file");
        }
        return fallback;
    }
    None
}

/// Plain files before `index.*` before `README.*`.
fn index_rank(path: &str) -> u8 {
    let stem = strip_markdown_extension(file_name(path));
    if stem.eq_ignore_ascii_case("readme") {
        2
    } else if stem.eq_ignore_ascii_case("index") {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FileIndex {
        FileIndex::new([
            "/README.md",
            "/blog/README.md",
            "/blog/post-1.md",
            "/docs.md",
            "/docs/index.md",
            "/assets/sample.pdf",
        ])
    }

    #[test]
    fn test_find_page_plain_file() {
        let index = sample();

        assert_eq!(
            find_page("/blog/post-1", &index, &PermalinkMap::new()),
            Some("/blog/post-1.md")
        );
    }

    #[test]
    fn test_find_page_directory_readme() {
        let index = sample();

        assert_eq!(
            find_page("blog/", &index, &PermalinkMap::new()),
            Some("/blog/README.md")
        );
    }

    #[test]
    fn test_find_page_prefers_plain_file_over_index() {
        let index = sample();

        assert_eq!(find_page("docs", &index, &PermalinkMap::new()), Some("/docs.md"));
    }

    #[test]
    fn test_find_page_home() {
        let index = sample();

        assert_eq!(find_page("", &index, &PermalinkMap::new()), Some("/README.md"));
    }

    #[test]
    fn test_find_page_home_fallback() {
        let index = FileIndex::new(["/b.md", "/a.pdf", "/c/a.md"]);

        assert_eq!(find_page("/", &index, &PermalinkMap::new()), Some("/b.md"));
    }

    #[test]
    fn test_find_page_permalink_first() {
        let index = sample();
        let permalinks = PermalinkMap::from_entries([("/blog/post-1.md", "/docs")]).unwrap();

        assert_eq!(find_page("docs", &index, &permalinks), Some("/blog/post-1.md"));
    }

    #[test]
    fn test_find_page_missing() {
        let index = sample();

        assert_eq!(find_page("nope", &index, &PermalinkMap::new()), None);
        assert_eq!(find_page("assets/sample.pdf", &index, &PermalinkMap::new()), None);
    }
}
