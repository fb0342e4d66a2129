//! Author-declared permalink overrides.
//!
//! A permalink replaces the path-derived part of a page URL. The map is
//! built from page frontmatter before a render pass and is read-only to the
//! resolver.

use std::collections::HashMap;

use crate::path::normalize_path;

/// Error building a [`PermalinkMap`].
#[derive(Debug, thiserror::Error)]
pub enum PermalinkError {
    /// Permalink is empty or whitespace.
    #[error("empty permalink for {path}")]
    Empty {
        /// Content path declaring the permalink.
        path: String,
    },
    /// Content path listed more than once.
    #[error("duplicate permalink entry for {path}")]
    Duplicate {
        /// Content path listed twice.
        path: String,
    },
    /// Two content paths declare the same permalink.
    #[error("permalink {permalink} declared by both {first} and {second}")]
    Conflict {
        /// The contested permalink.
        permalink: String,
        /// Content path that declared it first.
        first: String,
        /// Content path that declared it again.
        second: String,
    },
}

/// Content path → vanity URL path.
#[derive(Clone, Debug, Default)]
pub struct PermalinkMap {
    by_path: HashMap<String, String>,
    by_permalink: HashMap<String, String>,
}

impl PermalinkMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from `(content path, permalink)` pairs.
    ///
    /// Content paths are normalized like [`FileIndex`](crate::FileIndex)
    /// entries. Permalinks get a leading `/` and lose any trailing `/`.
    ///
    /// # Errors
    ///
    /// Returns the first [`PermalinkError`]: an empty permalink, a repeated
    /// content path, or a permalink claimed by two pages.
    pub fn from_entries<I, P, L>(entries: I) -> Result<Self, PermalinkError>
    where
        I: IntoIterator<Item = (P, L)>,
        P: AsRef<str>,
        L: AsRef<str>,
    {
        let (map, rejected) = Self::from_entries_lossy(entries);
        match rejected.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(map),
        }
    }

    /// Build a map from `(content path, permalink)` pairs, skipping bad ones.
    ///
    /// Entries are taken in order: the first page to claim a permalink (or
    /// to list a content path) keeps it. Every skipped entry is returned
    /// with the reason.
    pub fn from_entries_lossy<I, P, L>(entries: I) -> (Self, Vec<PermalinkError>)
    where
        I: IntoIterator<Item = (P, L)>,
        P: AsRef<str>,
        L: AsRef<str>,
    {
        let mut map = Self::new();
        let mut rejected = Vec::new();
        for (path, permalink) in entries {
            let path = normalize_path(path.as_ref());
            let Some(permalink) = normalize_permalink(permalink.as_ref()) else {
                rejected.push(PermalinkError::Empty { path });
                continue;
            };
            if map.by_path.contains_key(&path) {
                rejected.push(PermalinkError::Duplicate { path });
                continue;
            }
            if let Some(first) = map.by_permalink.get(&permalink) {
                rejected.push(PermalinkError::Conflict {
                    permalink,
                    first: first.clone(),
                    second: path,
                });
                continue;
            }
            map.by_permalink.insert(permalink.clone(), path.clone());
            map.by_path.insert(path, permalink);
        }
        (map, rejected)
    }

    /// Permalink declared for a content path.
    #[must_use]
    pub fn get(&self, content_path: &str) -> Option<&str> {
        self.by_path.get(content_path).map(String::as_str)
    }

    /// Content path that declared `permalink`.
    ///
    /// Trailing slashes and a missing leading slash are ignored.
    #[must_use]
    pub fn content_path_for(&self, permalink: &str) -> Option<&str> {
        let permalink = normalize_permalink(permalink)?;
        self.by_permalink.get(&permalink).map(String::as_str)
    }

    /// Permalink to redirect to when a page is requested by another URL.
    ///
    /// # Arguments
    ///
    /// * `content_path` - Page being served
    /// * `current_path` - Site-relative path the page was requested at
    ///
    /// # Returns
    ///
    /// The declared permalink if it differs from `current_path`, `None` if
    /// the page has no permalink or is already served at it.
    #[must_use]
    pub fn redirect_for(&self, content_path: &str, current_path: &str) -> Option<&str> {
        let permalink = self.get(content_path)?;
        let current = normalize_permalink(current_path).unwrap_or_else(|| "/".to_owned());
        (current != permalink).then_some(permalink)
    }

    /// Number of declared permalinks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    /// Check whether no permalinks are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }

    /// Iterate over `(content path, permalink)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_path.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Leading `/`, no trailing `/` except for the root. `None` when empty.
fn normalize_permalink(permalink: &str) -> Option<String> {
    let trimmed = permalink.trim();
    if trimmed.is_empty() {
        return None;
    }
    let inner = trimmed.trim_matches('/');
    Some(format!("/{inner}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_entries_normalizes() {
        let map = PermalinkMap::from_entries([("blog/post-1.md", "my-post/")]).unwrap();

        assert_eq!(map.get("/blog/post-1.md"), Some("/my-post"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_from_entries_rejects_empty() {
        let err = PermalinkMap::from_entries([("/a.md", "  ")]).unwrap_err();

        assert!(matches!(err, PermalinkError::Empty { path } if path == "/a.md"));
    }

    #[test]
    fn test_from_entries_rejects_duplicate_path() {
        let err = PermalinkMap::from_entries([("/a.md", "/x"), ("a.md", "/y")]).unwrap_err();

        assert!(matches!(err, PermalinkError::Duplicate { .. }));
    }

    #[test]
    fn test_from_entries_rejects_conflict() {
        let err = PermalinkMap::from_entries([("/a.md", "/x"), ("/b.md", "x/")]).unwrap_err();

        assert_eq!(
            err.to_string(),
            "permalink /x declared by both /a.md and /b.md"
        );
    }

    #[test]
    fn test_lossy_keeps_valid_entries() {
        let (map, rejected) = PermalinkMap::from_entries_lossy([
            ("/a.md", ""),
            ("/b.md", "/b-vanity"),
            ("/c.md", "/b-vanity"),
        ]);

        assert_eq!(map.get("/b.md"), Some("/b-vanity"));
        assert_eq!(map.content_path_for("/b-vanity"), Some("/b.md"));
        assert_eq!(map.len(), 1);
        assert_eq!(rejected.len(), 2);
        assert!(matches!(&rejected[0], PermalinkError::Empty { path } if path == "/a.md"));
        assert!(matches!(&rejected[1], PermalinkError::Conflict { second, .. } if second == "/c.md"));
    }

    #[test]
    fn test_root_permalink() {
        let map = PermalinkMap::from_entries([("/home.md", "/")]).unwrap();

        assert_eq!(map.get("/home.md"), Some("/"));
        assert_eq!(map.content_path_for(""), None);
        assert_eq!(map.content_path_for("/"), Some("/home.md"));
    }

    #[test]
    fn test_content_path_for() {
        let map = PermalinkMap::from_entries([("/blog/post-1.md", "/my-post")]).unwrap();

        assert_eq!(map.content_path_for("my-post/"), Some("/blog/post-1.md"));
        assert_eq!(map.content_path_for("/other"), None);
    }

    #[test]
    fn test_redirect_for() {
        let map = PermalinkMap::from_entries([("/blog/post-1.md", "/my-post")]).unwrap();

        assert_eq!(
            map.redirect_for("/blog/post-1.md", "/blog/post-1"),
            Some("/my-post")
        );
        assert_eq!(map.redirect_for("/blog/post-1.md", "/my-post/"), None);
        assert_eq!(map.redirect_for("/blog/other.md", "/blog/other"), None);
    }

    #[test]
    fn test_iter() {
        let map = PermalinkMap::from_entries([("/a.md", "/x")]).unwrap();

        let entries: Vec<_> = map.iter().collect();

        assert_eq!(entries, vec![("/a.md", "/x")]);
    }
}
