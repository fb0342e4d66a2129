//! Matching candidate paths against the file index.

use crate::index::FileIndex;
use crate::path::{
    extension, file_name, normalize_path, segment_count, strip_markdown_extension,
    MARKDOWN_EXTENSIONS,
};

/// How wiki-link targets are matched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum MatchMode {
    /// Path must resolve directly relative to the origin file.
    #[default]
    Exact,
    /// Fall back to suffix and basename search across the whole site.
    ShortestPossible,
}

/// Directory index names, tried when a link points at a directory.
const DIRECTORY_INDEXES: [&str; 2] = ["index", "README"];

/// Matches candidate paths against a [`FileIndex`].
#[derive(Clone, Copy, Debug)]
pub struct FileMatcher<'a> {
    index: &'a FileIndex,
    case_insensitive: bool,
}

impl<'a> FileMatcher<'a> {
    /// Create a matcher over `index`.
    #[must_use]
    pub fn new(index: &'a FileIndex, case_insensitive: bool) -> Self {
        Self {
            index,
            case_insensitive,
        }
    }

    /// Find the indexed file a link refers to.
    ///
    /// # Arguments
    ///
    /// * `candidate` - Absolute path produced by resolving the link against its origin
    /// * `raw_path` - Link path as written, used for site-wide search
    /// * `mode` - Matching mode
    ///
    /// # Returns
    ///
    /// The indexed path (original casing) or `None` when nothing matches.
    ///
    /// Directory indexes are tried last, so in shortest-possible mode a note
    /// named like a folder wins over that folder's `README`.
    #[must_use]
    pub fn find(&self, candidate: &str, raw_path: &str, mode: MatchMode) -> Option<&'a str> {
        if candidate.is_empty() {
            return None;
        }
        if let Some(found) = self.find_file(candidate) {
            return Some(found);
        }
        if mode == MatchMode::ShortestPossible
            && let Some(found) = self.find_shortest(raw_path)
        {
            return Some(found);
        }
        self.find_directory_index(candidate)
    }

    /// Direct lookup: the path itself, then `.md`/`.mdx` for extensionless
    /// paths.
    fn find_file(&self, candidate: &str) -> Option<&'a str> {
        if candidate != "/"
            && let Some(found) = self.get(candidate)
        {
            return Some(found);
        }
        if extension(candidate).is_some() {
            return None;
        }

        let base = candidate.trim_end_matches('/');
        if base.is_empty() {
            return None;
        }
        MARKDOWN_EXTENSIONS
            .iter()
            .find_map(|ext| self.get(&format!("{base}.{ext}")))
    }

    /// `README`/`index` of the directory a link points at.
    fn find_directory_index(&self, candidate: &str) -> Option<&'a str> {
        if extension(candidate).is_some() {
            return None;
        }
        let base = candidate.trim_end_matches('/');
        for name in DIRECTORY_INDEXES {
            for ext in MARKDOWN_EXTENSIONS {
                if let Some(found) = self.get(&format!("{base}/{name}.{ext}")) {
                    return Some(found);
                }
            }
        }
        None
    }

    fn get(&self, path: &str) -> Option<&'a str> {
        self.index.get(path, self.case_insensitive)
    }

    /// Site-wide search for wiki-link titles.
    fn find_shortest(&self, raw_path: &str) -> Option<&'a str> {
        let normalized = normalize_path(raw_path);
        let target = normalized.trim_start_matches('/');
        if target.is_empty() {
            return None;
        }

        let found = if target.contains('/') {
            let suffix = format!("/{}", self.fold(target));
            let suffix_stripped = format!("/{}", self.fold(strip_markdown_extension(target)));
            self.index
                .iter()
                .filter(|path| {
                    let folded = self.fold(path);
                    folded.ends_with(&suffix)
                        || self.fold(strip_markdown_extension(path)).ends_with(&suffix_stripped)
                })
                .min_by(|a, b| rank(a, b))
        } else {
            let stem = strip_markdown_extension(target);
            self.index
                .with_stem(stem)
                .filter(|path| {
                    self.case_insensitive || strip_markdown_extension(file_name(path)) == stem
                })
                .min_by(|a, b| rank(a, b))
        };

        if let Some(path) = found {
            tracing::debug!(link = target, path, "Matched link by site-wide search");
        }
        found
    }

    fn fold(&self, text: &str) -> String {
        if self.case_insensitive {
            text.to_lowercase()
        } else {
            text.to_owned()
        }
    }
}

/// Fewest segments first, then lexicographic.
fn rank(a: &str, b: &str) -> std::cmp::Ordering {
    segment_count(a)
        .cmp(&segment_count(b))
        .then_with(|| a.cmp(b))
}
