//! Queryable index of a site's published content paths.
//!
//! The index is built once per render pass from the site's file list and is
//! never mutated afterwards. Paths are stored normalized (leading `/`),
//! sorted and de-duplicated, with their original casing preserved.

use std::collections::HashMap;

use crate::path::{file_name, normalize_path, strip_markdown_extension};

/// Normalized, immutable set of content paths.
///
/// Besides exact lookups, the index keeps two case-folded views:
/// - full path → entries, for case-insensitive matching
/// - basename without `.md`/`.mdx` → entries, for wiki-link title search
///
/// Entry lists in both views are in index order, so the first element is the
/// lexicographically smallest path.
#[derive(Clone, Debug, Default)]
pub struct FileIndex {
    paths: Vec<String>,
    exact: HashMap<String, usize>,
    folded: HashMap<String, Vec<usize>>,
    stems: HashMap<String, Vec<usize>>,
}

impl FileIndex {
    /// Build an index from a list of content paths.
    ///
    /// Paths are normalized (see [`normalize_path`](crate::normalize_path)).
    /// Entries that normalize to the bare root are skipped.
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for path in paths {
            let path = normalize_path(path.as_ref());
            if path == "/" {
                tracing::warn!("Skipping empty path in file index");
                continue;
            }
            normalized.push(path);
        }
        normalized.sort();
        normalized.dedup();

        let mut exact = HashMap::with_capacity(normalized.len());
        let mut folded: HashMap<String, Vec<usize>> = HashMap::new();
        let mut stems: HashMap<String, Vec<usize>> = HashMap::new();

        for (i, path) in normalized.iter().enumerate() {
            exact.insert(path.clone(), i);
            folded.entry(path.to_lowercase()).or_default().push(i);
            let stem = strip_markdown_extension(file_name(path));
            stems.entry(stem.to_lowercase()).or_default().push(i);
        }

        Self {
            paths: normalized,
            exact,
            folded,
            stems,
        }
    }

    /// Number of indexed paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Check whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Iterate over all paths in index order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    /// Check whether an exact (case-sensitive) path is indexed.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.exact.contains_key(path)
    }

    /// Look up a path, optionally ignoring case.
    ///
    /// Returns the indexed path with its original casing. When several
    /// entries differ only by case, a case-insensitive lookup prefers the
    /// exact spelling and otherwise returns the first in index order.
    #[must_use]
    pub fn get(&self, path: &str, case_insensitive: bool) -> Option<&str> {
        if let Some(&i) = self.exact.get(path) {
            return Some(&self.paths[i]);
        }
        if !case_insensitive {
            return None;
        }
        self.folded
            .get(&path.to_lowercase())
            .and_then(|ids| ids.first())
            .map(|&i| self.paths[i].as_str())
    }

    /// Entries whose basename (without `.md`/`.mdx`) matches `stem`
    /// case-insensitively.
    pub(crate) fn with_stem(&self, stem: &str) -> impl Iterator<Item = &str> {
        self.stems
            .get(&stem.to_lowercase())
            .into_iter()
            .flatten()
            .map(|&i| self.paths[i].as_str())
    }
}

impl<S: AsRef<str>> FromIterator<S> for FileIndex {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter)
    }
}
