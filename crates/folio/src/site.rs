//! Loading a site from a directory on disk.

use std::fs;
use std::path::{Path, PathBuf};

use folio_links::{FileIndex, PermalinkMap, is_markdown_path, normalize_path};
use folio_tree::{FileEntry, PageMetadata, permalinks_from_entries, resolve_title};

use crate::error::CliError;

/// Published files of one site with the indexes the engine works on.
pub(crate) struct Site {
    root: PathBuf,
    pub(crate) entries: Vec<FileEntry>,
    pub(crate) index: FileIndex,
    pub(crate) permalinks: PermalinkMap,
}

impl Site {
    /// Scan `root` and read frontmatter of every markdown file.
    ///
    /// Hidden files and directories are skipped. Files with malformed
    /// frontmatter are kept with default metadata, and unusable permalinks
    /// are dropped with a warning.
    pub(crate) fn load(root: &Path) -> Result<Self, CliError> {
        if !root.is_dir() {
            return Err(CliError::Validation(format!(
                "site root {} is not a directory",
                root.display()
            )));
        }

        let mut paths = Vec::new();
        scan_directory(root, "", &mut paths);
        paths.sort();

        let entries = paths
            .iter()
            .map(|content_path| load_entry(root, content_path))
            .collect::<Vec<_>>();
        let index = FileIndex::new(entries.iter().map(|entry| entry.path.as_str()));
        let permalinks = permalinks_from_entries(&entries);

        tracing::info!(
            root = %root.display(),
            files = index.len(),
            permalinks = permalinks.len(),
            "Loaded site"
        );

        Ok(Self {
            root: root.to_path_buf(),
            entries,
            index,
            permalinks,
        })
    }

    /// Content path (`/dir/file.md`) of a file given on the command line.
    ///
    /// Paths that already look like content paths are normalized as-is.
    pub(crate) fn content_path(&self, arg: &str) -> Result<String, CliError> {
        let fs_path = Path::new(arg);
        if !fs_path.exists() {
            return Ok(normalize_path(arg));
        }

        let absolute = fs::canonicalize(fs_path)?;
        let root = fs::canonicalize(&self.root)?;
        let relative = absolute
            .strip_prefix(&root)
            .map_err(|_| CliError::OutsideRoot {
                path: absolute.clone(),
                root: root.clone(),
            })?;
        Ok(normalize_path(&relative.to_string_lossy()))
    }

    /// Read a file by content path.
    pub(crate) fn read(&self, content_path: &str) -> Result<String, CliError> {
        let relative = content_path.trim_start_matches('/');
        Ok(fs::read_to_string(self.root.join(relative))?)
    }
}

fn scan_directory(dir: &Path, prefix: &str, paths: &mut Vec<String>) {
    let Ok(entries) = fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "Skipping unreadable directory");
        return;
    };

    for entry in entries.filter_map(Result::ok) {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let content_path = format!("{prefix}/{name}");
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            scan_directory(&entry.path(), &content_path, paths);
        } else {
            paths.push(content_path);
        }
    }
}

fn load_entry(root: &Path, content_path: &str) -> FileEntry {
    let entry = FileEntry::new(content_path);
    if !is_markdown_path(content_path) {
        return entry;
    }

    let source = match fs::read_to_string(root.join(content_path.trim_start_matches('/'))) {
        Ok(source) => source,
        Err(e) => {
            tracing::warn!(path = content_path, error = %e, "Failed to read file");
            return entry;
        }
    };
    let (metadata, body) = match PageMetadata::from_markdown(&source) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(path = content_path, error = %e, "Ignoring invalid frontmatter");
            (PageMetadata::default(), source.as_str())
        }
    };

    let title = resolve_title(content_path, &metadata, body);
    entry.with_title(title).with_metadata(metadata)
}
