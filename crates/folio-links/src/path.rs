//! Lexical content-path helpers.
//!
//! Content paths are absolute, slash-separated strings rooted at the site
//! root (e.g. `/blog/post-1.md`). Nothing here touches the filesystem.

/// Extensions treated as markdown pages.
pub(crate) const MARKDOWN_EXTENSIONS: [&str; 2] = ["md", "mdx"];

/// Normalize a path lexically into an absolute content path.
///
/// Collapses empty and `.` segments, resolves `..` against the preceding
/// segment and converts backslashes to forward slashes. A `..` that would
/// climb above the root is dropped, so the result is clamped to the root.
///
/// # Examples
///
/// ```
/// use folio_links::normalize_path;
///
/// assert_eq!(normalize_path("blog//./post.md"), "/blog/post.md");
/// assert_eq!(normalize_path("../../etc/passwd"), "/etc/passwd");
/// assert_eq!(normalize_path(""), "/");
/// ```
pub fn normalize_path(path: &str) -> String {
    let path = path.trim().replace('\\', "/");
    let mut segments: Vec<&str> = Vec::new();
    push_segments(&mut segments, &path);
    join_segments(&segments)
}

/// Resolve a link path against the file that contains the link.
///
/// - Empty paths resolve to an empty string, meaning "the origin page itself".
/// - Paths with a leading `/` are taken from the site root.
/// - Anything else (including `./` and `../` prefixes) is resolved against
///   the directory of `origin`.
///
/// # Arguments
///
/// * `raw_path` - Link path as written by the author (already decoded)
/// * `origin` - Content path of the file containing the link
///
/// # Examples
///
/// ```
/// use folio_links::resolve_path;
///
/// assert_eq!(resolve_path("post-1", "/blog/README.md"), "/blog/post-1");
/// assert_eq!(resolve_path("../about", "/blog/post-1.md"), "/about");
/// assert_eq!(resolve_path("/projects/x", "/blog/post-1.md"), "/projects/x");
/// assert_eq!(resolve_path("", "/blog/post-1.md"), "");
/// ```
pub fn resolve_path(raw_path: &str, origin: &str) -> String {
    let raw_path = raw_path.trim().replace('\\', "/");
    if raw_path.is_empty() {
        return String::new();
    }
    if raw_path.starts_with('/') {
        return normalize_path(&raw_path);
    }

    let origin = origin.trim().replace('\\', "/");
    let mut segments: Vec<&str> = Vec::new();
    push_segments(&mut segments, parent_dir(&origin));
    push_segments(&mut segments, &raw_path);
    join_segments(&segments)
}

/// Directory part of a path (everything before the last `/`).
///
/// Returns an empty string for root-level files.
pub fn parent_dir(path: &str) -> &str {
    path.rsplit_once('/').map_or("", |(dir, _)| dir)
}

/// Final segment of a path.
pub fn file_name(path: &str) -> &str {
    path.rsplit_once('/').map_or(path, |(_, name)| name)
}

/// Extension of the final path segment, without the dot.
///
/// Dotfiles (`.env`) and names ending in a dot have no extension.
pub fn extension(path: &str) -> Option<&str> {
    let name = file_name(path);
    match name.rfind('.') {
        Some(0) | None => None,
        Some(pos) if pos + 1 == name.len() => None,
        Some(pos) => Some(&name[pos + 1..]),
    }
}

/// Strip a trailing `.md` or `.mdx` extension (case-insensitive).
pub fn strip_markdown_extension(path: &str) -> &str {
    match extension(path) {
        Some(ext) if is_markdown_extension(ext) => &path[..path.len() - ext.len() - 1],
        _ => path,
    }
}

/// Check whether an extension names a markdown page.
pub fn is_markdown_extension(ext: &str) -> bool {
    MARKDOWN_EXTENSIONS
        .iter()
        .any(|md| md.eq_ignore_ascii_case(ext))
}

/// Check whether a path refers to a page rather than a raw asset.
///
/// Paths without an extension are treated as pages.
pub fn is_markdown_path(path: &str) -> bool {
    extension(path).is_none_or(is_markdown_extension)
}

/// Number of non-empty segments in a path.
pub fn segment_count(path: &str) -> usize {
    path.split('/').filter(|s| !s.is_empty()).count()
}

fn push_segments<'a>(segments: &mut Vec<&'a str>, path: &'a str) {
    for component in path.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                // Climbing above the root is clamped
                segments.pop();
            }
            _ => segments.push(component),
        }
    }
}

fn join_segments(segments: &[&str]) -> String {
    format!("/{}", segments.join("/"))
}
