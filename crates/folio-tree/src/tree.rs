//! Site navigation tree.
//!
//! Turns a flat list of published files into an ordered, nested tree of
//! directories and files.
//!
//! # Architecture
//!
//! Nodes are stored in a flat `Vec<SiteTreeNode>` with parent/children
//! relationships tracked by [`NodeId`]s. This provides:
//! - O(1) path lookups via a `HashMap` index
//! - O(d) breadcrumb building where d is the node depth
//! - cheap rebuilds: nothing is mutated after [`SiteTreeBuilder::build`]

use std::cmp::Ordering;
use std::collections::HashMap;

use folio_links::{UrlFormatter, extension, normalize_path};
use serde::{Deserialize, Serialize};

use crate::compare::natural_cmp;
use crate::metadata::PageMetadata;

/// A published file to place in the tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Content path (`blog/post-1.md`, leading `/` optional).
    pub path: String,
    /// Precomputed URL; derived from the path when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_path: Option<String>,
    /// Display title; falls back to the metadata title, then the file name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Frontmatter metadata.
    #[serde(default)]
    pub metadata: PageMetadata,
}

impl FileEntry {
    /// Create an entry with only a path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Set the display title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set a precomputed URL.
    #[must_use]
    pub fn with_url_path(mut self, url_path: impl Into<String>) -> Self {
        self.url_path = Some(url_path.into());
        self
    }

    /// Set the metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: PageMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Sort key for files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderBy {
    /// File name.
    #[default]
    Path,
    /// Display label.
    Title,
}

/// Whether directories and files are grouped before sorting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Grouping {
    #[default]
    DirsFirst,
    FilesFirst,
    None,
}

/// Options for [`build_site_tree`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeOptions {
    pub order_by: OrderBy,
    pub group: Grouping,
    /// Ignore letter case when comparing labels.
    pub case_insensitive: bool,
    /// Compare digit runs by value.
    pub numeric: bool,
    /// Site prefix such as `/@user/project`.
    pub site_prefix: String,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            order_by: OrderBy::Path,
            group: Grouping::DirsFirst,
            case_insensitive: true,
            numeric: true,
            site_prefix: String::new(),
        }
    }
}

/// Index of a node in a [`SiteTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position in the arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Node discriminant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Root,
    Dir,
    File,
}

/// Directory node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirNode {
    /// Directory name.
    pub name: String,
    /// Slash-joined names of all ancestors and this directory.
    pub path: String,
    /// Site URL of the directory.
    pub url_path: String,
    /// Capitalized name.
    pub label: String,
}

/// File (leaf) node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileNode {
    /// File name including extension.
    pub name: String,
    /// Content path without leading slash.
    pub path: String,
    /// Site URL of the file.
    pub url_path: String,
    /// Display title.
    pub label: String,
    /// Frontmatter metadata.
    pub metadata: PageMetadata,
}

/// A node of the site tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SiteTreeNode {
    Root,
    Dir(DirNode),
    File(FileNode),
}

impl SiteTreeNode {
    /// Node discriminant.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Root => NodeKind::Root,
            Self::Dir(_) => NodeKind::Dir,
            Self::File(_) => NodeKind::File,
        }
    }

    /// Directory or file name; empty for the root.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Root => "",
            Self::Dir(dir) => &dir.name,
            Self::File(file) => &file.name,
        }
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Root => "root",
            Self::Dir(dir) => &dir.label,
            Self::File(file) => &file.label,
        }
    }

    /// Content path; `None` for the root.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Root => None,
            Self::Dir(dir) => Some(&dir.path),
            Self::File(file) => Some(&file.path),
        }
    }

    /// Site URL; `None` for the root.
    #[must_use]
    pub fn url_path(&self) -> Option<&str> {
        match self {
            Self::Root => None,
            Self::Dir(dir) => Some(&dir.url_path),
            Self::File(file) => Some(&file.url_path),
        }
    }
}

/// Nested, serializable view of a subtree for the UI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeItem {
    pub kind: NodeKind,
    pub name: String,
    pub label: String,
    pub path: String,
    pub url_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PageMetadata>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeItem>,
}

/// Ordered navigation tree.
///
/// Built by [`SiteTreeBuilder`] or [`build_site_tree`]; immutable afterwards.
#[derive(Clone, Debug)]
pub struct SiteTree {
    nodes: Vec<SiteTreeNode>,
    children: Vec<Vec<NodeId>>,
    parents: Vec<Option<NodeId>>,
    dir_index: HashMap<String, NodeId>,
    file_index: HashMap<String, NodeId>,
}

impl SiteTree {
    /// The root node id.
    pub const ROOT: NodeId = NodeId(0);

    /// Node by id.
    ///
    /// Ids are only handed out by this tree, so lookups always succeed.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &SiteTreeNode {
        &self.nodes[id.0]
    }

    /// Ordered children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.children[id.0]
    }

    /// Parent of a node; `None` for the root.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents[id.0]
    }

    /// Find a node by content path.
    ///
    /// An extensionless file can share its path with a directory (`a` and
    /// `a/`); the directory is returned then. Use [`Self::get_file`] to
    /// reach the file.
    ///
    /// # Arguments
    ///
    /// * `path` - Directory or file path, leading/trailing `/` ignored (`""` is the root)
    #[must_use]
    pub fn get(&self, path: &str) -> Option<NodeId> {
        let key = path.trim().trim_matches('/');
        if key.is_empty() {
            return Some(Self::ROOT);
        }
        self.dir_index
            .get(key)
            .or_else(|| self.file_index.get(key))
            .copied()
    }

    /// Find a file node by content path.
    #[must_use]
    pub fn get_file(&self, path: &str) -> Option<NodeId> {
        self.file_index
            .get(path.trim().trim_matches('/'))
            .copied()
    }

    /// Find a directory node by path; `""` is the root.
    #[must_use]
    pub fn get_dir(&self, path: &str) -> Option<NodeId> {
        let key = path.trim().trim_matches('/');
        if key.is_empty() {
            return Some(Self::ROOT);
        }
        self.dir_index.get(key).copied()
    }

    /// Total number of nodes, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check whether the tree holds nothing but the root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// All file nodes in depth-first display order.
    #[must_use]
    pub fn files(&self) -> Vec<&FileNode> {
        let mut files = Vec::new();
        let mut stack = vec![Self::ROOT];
        while let Some(id) = stack.pop() {
            if let SiteTreeNode::File(file) = self.node(id) {
                files.push(file);
            }
            stack.extend(self.children(id).iter().rev());
        }
        files
    }

    /// Ancestors of a node from the top level down, excluding the root and
    /// the node itself.
    #[must_use]
    pub fn breadcrumbs(&self, id: NodeId) -> Vec<NodeId> {
        let mut crumbs = Vec::new();
        let mut current = self.parent(id);
        while let Some(parent) = current {
            if parent == Self::ROOT {
                break;
            }
            crumbs.push(parent);
            current = self.parent(parent);
        }
        crumbs.reverse();
        crumbs
    }

    /// Nested view of the root's children.
    #[must_use]
    pub fn items(&self) -> Vec<TreeItem> {
        self.children(Self::ROOT)
            .iter()
            .map(|&id| self.item(id))
            .collect()
    }

    /// Nested view of one node.
    #[must_use]
    pub fn item(&self, id: NodeId) -> TreeItem {
        let node = self.node(id);
        TreeItem {
            kind: node.kind(),
            name: node.name().to_owned(),
            label: node.label().to_owned(),
            path: node.path().unwrap_or_default().to_owned(),
            url_path: node.url_path().unwrap_or_default().to_owned(),
            metadata: match node {
                SiteTreeNode::File(file) if !file.metadata.is_empty() => {
                    Some(file.metadata.clone())
                }
                _ => None,
            },
            children: self.children(id).iter().map(|&c| self.item(c)).collect(),
        }
    }
}

/// Incrementally builds a [`SiteTree`].
pub struct SiteTreeBuilder {
    options: TreeOptions,
    formatter: UrlFormatter,
    nodes: Vec<SiteTreeNode>,
    children: Vec<Vec<NodeId>>,
    parents: Vec<Option<NodeId>>,
    dirs: HashMap<String, NodeId>,
    files: HashMap<String, NodeId>,
}

impl SiteTreeBuilder {
    /// Create a builder holding only the root node.
    #[must_use]
    pub fn new(options: TreeOptions) -> Self {
        let formatter = UrlFormatter::new(&options.site_prefix);
        Self {
            options,
            formatter,
            nodes: vec![SiteTreeNode::Root],
            children: vec![Vec::new()],
            parents: vec![None],
            dirs: HashMap::new(),
            files: HashMap::new(),
        }
    }

    /// Add a file, creating its directories as needed.
    ///
    /// # Returns
    ///
    /// Id of the file node, or `None` if the path is empty or was already
    /// added.
    pub fn add_file(&mut self, entry: FileEntry) -> Option<NodeId> {
        let content_path = normalize_path(&entry.path);
        let path = content_path.trim_start_matches('/');
        if path.is_empty() {
            tracing::warn!(path = %entry.path, "Skipping tree entry with empty path");
            return None;
        }
        if self.files.contains_key(path) {
            tracing::warn!(path, "Skipping duplicate tree entry");
            return None;
        }

        let mut parent = SiteTree::ROOT;
        let mut dir_path = String::new();
        let segments: Vec<&str> = path.split('/').collect();
        let (name, dirs) = segments.split_last()?;
        for dir in dirs {
            if !dir_path.is_empty() {
                dir_path.push('/');
            }
            dir_path.push_str(dir);
            parent = self.get_or_create_dir(parent, dir, &dir_path);
        }

        let label = entry
            .title
            .clone()
            .or_else(|| entry.metadata.title.clone())
            .unwrap_or_else(|| strip_extension(name).to_owned());
        let url_path = match (&entry.url_path, &entry.metadata.permalink) {
            (Some(url), _) => url.clone(),
            (None, Some(permalink)) => self.formatter.format_permalink(permalink, None),
            (None, None) => self.formatter.format(&content_path, None),
        };

        let id = self.push(
            parent,
            SiteTreeNode::File(FileNode {
                name: (*name).to_owned(),
                path: path.to_owned(),
                url_path,
                label,
                metadata: entry.metadata,
            }),
        );
        self.files.insert(path.to_owned(), id);
        Some(id)
    }

    fn get_or_create_dir(&mut self, parent: NodeId, name: &str, path: &str) -> NodeId {
        if let Some(&id) = self.dirs.get(path) {
            return id;
        }
        let id = self.push(
            parent,
            SiteTreeNode::Dir(DirNode {
                name: name.to_owned(),
                path: path.to_owned(),
                url_path: self.formatter.format_dir(path),
                label: capitalize(name),
            }),
        );
        self.dirs.insert(path.to_owned(), id);
        id
    }

    fn push(&mut self, parent: NodeId, node: SiteTreeNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.children.push(Vec::new());
        self.parents.push(Some(parent));
        self.children[parent.0].push(id);
        id
    }

    /// Sort every child list and freeze the tree.
    #[must_use]
    pub fn build(mut self) -> SiteTree {
        let nodes = &self.nodes;
        let options = &self.options;
        for children in &mut self.children {
            children.sort_by(|&a, &b| compare_nodes(&nodes[a.0], &nodes[b.0], options));
        }

        tracing::debug!(
            files = self.files.len(),
            dirs = self.dirs.len(),
            "Built site tree"
        );

        SiteTree {
            nodes: self.nodes,
            children: self.children,
            parents: self.parents,
            dir_index: self.dirs,
            file_index: self.files,
        }
    }
}

/// Build a site tree from a flat file list.
///
/// # Examples
///
/// ```
/// use folio_tree::{FileEntry, SiteTree, TreeOptions, build_site_tree};
///
/// let entries = vec![FileEntry::new("blog/post-1.md"), FileEntry::new("README.md")];
/// let tree = build_site_tree(&entries, &TreeOptions::default());
///
/// let top: Vec<&str> = tree
///     .children(SiteTree::ROOT)
///     .iter()
///     .map(|&id| tree.node(id).name())
///     .collect();
/// assert_eq!(top, vec!["blog", "README.md"]);
/// ```
#[must_use]
pub fn build_site_tree(entries: &[FileEntry], options: &TreeOptions) -> SiteTree {
    let mut builder = SiteTreeBuilder::new(options.clone());
    for entry in entries {
        builder.add_file(entry.clone());
    }
    builder.build()
}

fn compare_nodes(a: &SiteTreeNode, b: &SiteTreeNode, options: &TreeOptions) -> Ordering {
    group_rank(a, options.group)
        .cmp(&group_rank(b, options.group))
        .then_with(|| {
            let (ka, kb) = (sort_key(a, options.order_by), sort_key(b, options.order_by));
            natural_cmp(ka, kb, options.numeric, options.case_insensitive)
                .then_with(|| ka.cmp(kb))
        })
        .then_with(|| a.name().cmp(b.name()))
        .then_with(|| kind_rank(a).cmp(&kind_rank(b)))
}

fn group_rank(node: &SiteTreeNode, group: Grouping) -> u8 {
    match (group, node) {
        (Grouping::DirsFirst, SiteTreeNode::File(_))
        | (Grouping::FilesFirst, SiteTreeNode::Dir(_)) => 1,
        _ => 0,
    }
}

/// Dirs always sort by label; files by label or name.
fn sort_key(node: &SiteTreeNode, order_by: OrderBy) -> &str {
    match (node, order_by) {
        (SiteTreeNode::File(file), OrderBy::Path) => &file.name,
        _ => node.label(),
    }
}

fn kind_rank(node: &SiteTreeNode) -> u8 {
    match node {
        SiteTreeNode::Root => 0,
        SiteTreeNode::Dir(_) => 1,
        SiteTreeNode::File(_) => 2,
    }
}

fn strip_extension(name: &str) -> &str {
    match extension(name) {
        Some(ext) => &name[..name.len() - ext.len() - 1],
        None => name,
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn names(tree: &SiteTree, id: NodeId) -> Vec<String> {
        tree.children(id)
            .iter()
            .map(|&c| tree.node(c).name().to_owned())
            .collect()
    }

    fn build(paths: &[&str], options: &TreeOptions) -> SiteTree {
        let entries: Vec<FileEntry> = paths.iter().map(|p| FileEntry::new(*p)).collect();
        build_site_tree(&entries, options)
    }

    #[test]
    fn test_dirs_first() {
        let tree = build(&["blog/post-1.md", "README.md"], &TreeOptions::default());

        assert_eq!(names(&tree, SiteTree::ROOT), vec!["blog", "README.md"]);
        assert_eq!(tree.node(tree.children(SiteTree::ROOT)[0]).kind(), NodeKind::Dir);
    }

    #[test]
    fn test_files_first() {
        let options = TreeOptions {
            group: Grouping::FilesFirst,
            ..TreeOptions::default()
        };

        let tree = build(&["blog/post-1.md", "README.md"], &options);

        assert_eq!(names(&tree, SiteTree::ROOT), vec!["README.md", "blog"]);
    }

    #[test]
    fn test_no_grouping_interleaves() {
        let options = TreeOptions {
            group: Grouping::None,
            ..TreeOptions::default()
        };

        let tree = build(&["b/x.md", "a.md", "c.md"], &options);

        // Dir "b" sorts by its label "B"
        assert_eq!(names(&tree, SiteTree::ROOT), vec!["a.md", "b", "c.md"]);
    }

    #[test]
    fn test_numeric_order() {
        let tree = build(
            &["page-10.md", "page-2.md", "page-1.md"],
            &TreeOptions::default(),
        );

        assert_eq!(
            names(&tree, SiteTree::ROOT),
            vec!["page-1.md", "page-2.md", "page-10.md"]
        );
    }

    #[test]
    fn test_non_numeric_order() {
        let options = TreeOptions {
            numeric: false,
            ..TreeOptions::default()
        };

        let tree = build(&["page-10.md", "page-2.md"], &options);

        assert_eq!(names(&tree, SiteTree::ROOT), vec!["page-10.md", "page-2.md"]);
    }

    #[test]
    fn test_case_insensitive_with_total_order() {
        let tree = build(&["b.md", "a.md", "B.md", "A.md"], &TreeOptions::default());

        assert_eq!(
            names(&tree, SiteTree::ROOT),
            vec!["A.md", "a.md", "B.md", "b.md"]
        );
    }

    #[test]
    fn test_case_sensitive() {
        let options = TreeOptions {
            case_insensitive: false,
            ..TreeOptions::default()
        };

        let tree = build(&["b.md", "C.md", "a.md"], &options);

        assert_eq!(names(&tree, SiteTree::ROOT), vec!["C.md", "a.md", "b.md"]);
    }

    #[test]
    fn test_order_by_title() {
        let entries = vec![
            FileEntry::new("a.md").with_title("Zebra"),
            FileEntry::new("b.md").with_title("Apple"),
        ];
        let options = TreeOptions {
            order_by: OrderBy::Title,
            ..TreeOptions::default()
        };

        let tree = build_site_tree(&entries, &options);

        assert_eq!(names(&tree, SiteTree::ROOT), vec!["b.md", "a.md"]);
    }

    #[test]
    fn test_order_is_stable_across_rebuilds() {
        let paths = ["x/2.md", "x/10.md", "README.md", "a/b/c.md", "A.md", "a.md"];

        let first = build(&paths, &TreeOptions::default()).items();
        let mut reversed = paths;
        reversed.reverse();
        let second = build(&reversed, &TreeOptions::default()).items();

        assert_eq!(first, second);
    }

    #[test]
    fn test_dir_nodes() {
        let options = TreeOptions {
            site_prefix: "/@john/notes".to_owned(),
            ..TreeOptions::default()
        };

        let tree = build(&["guide/quick start/01-intro.md"], &options);
        let id = tree.get("guide/quick start").unwrap();

        let SiteTreeNode::Dir(dir) = tree.node(id) else {
            panic!("expected dir");
        };
        assert_eq!(dir.name, "quick start");
        assert_eq!(dir.path, "guide/quick start");
        assert_eq!(dir.label, "Quick start");
        assert_eq!(dir.url_path, "/@john/notes/guide/quick+start");
    }

    #[test]
    fn test_file_nodes() {
        let options = TreeOptions {
            site_prefix: "/@john/notes".to_owned(),
            ..TreeOptions::default()
        };
        let entries = vec![
            FileEntry::new("/blog/README.md"),
            FileEntry::new("blog/post-1.md").with_metadata(PageMetadata {
                title: Some("First Post".to_owned()),
                ..Default::default()
            }),
            FileEntry::new("files/report.pdf"),
        ];

        let tree = build_site_tree(&entries, &options);

        let SiteTreeNode::File(readme) = tree.node(tree.get("blog/README.md").unwrap()) else {
            panic!("expected file");
        };
        assert_eq!(readme.label, "README");
        assert_eq!(readme.url_path, "/@john/notes/blog");

        let post = tree.node(tree.get("/blog/post-1.md").unwrap());
        assert_eq!(post.label(), "First Post");
        assert_eq!(post.url_path(), Some("/@john/notes/blog/post-1"));

        let pdf = tree.node(tree.get("files/report.pdf").unwrap());
        assert_eq!(pdf.label(), "report");
        assert_eq!(pdf.url_path(), Some("/@john/notes/files/report.pdf"));
    }

    #[test]
    fn test_file_url_from_entry_and_permalink() {
        let entries = vec![
            FileEntry::new("a.md").with_url_path("/custom"),
            FileEntry::new("b.md").with_metadata(PageMetadata {
                permalink: Some("/vanity".to_owned()),
                ..Default::default()
            }),
        ];

        let tree = build_site_tree(&entries, &TreeOptions::default());

        assert_eq!(tree.node(tree.get("a.md").unwrap()).url_path(), Some("/custom"));
        assert_eq!(tree.node(tree.get("b.md").unwrap()).url_path(), Some("/vanity"));
    }

    #[test]
    fn test_skips_empty_and_duplicate_paths() {
        let tree = build(&["", "/", "a.md", "/a.md"], &TreeOptions::default());

        assert_eq!(tree.len(), 2);
        assert_eq!(names(&tree, SiteTree::ROOT), vec!["a.md"]);
    }

    #[test]
    fn test_file_and_directory_sharing_a_path() {
        let tree = build(&["notes", "notes/a.md"], &TreeOptions::default());

        let dir = tree.get("notes").unwrap();
        let file = tree.get_file("notes").unwrap();

        assert_eq!(tree.node(dir).kind(), NodeKind::Dir);
        assert_eq!(tree.node(file).kind(), NodeKind::File);
        assert_eq!(tree.get_dir("/notes/"), Some(dir));
        assert_eq!(tree.get_file("notes/a.md"), tree.get("notes/a.md"));
        assert_eq!(tree.get_file("missing"), None);
    }

    #[test]
    fn test_get_root_and_missing() {
        let tree = build(&["a.md"], &TreeOptions::default());

        assert_eq!(tree.get(""), Some(SiteTree::ROOT));
        assert_eq!(tree.get("missing.md"), None);
        assert_eq!(tree.node(SiteTree::ROOT).kind(), NodeKind::Root);
    }

    #[test]
    fn test_empty_tree() {
        let tree = build(&[], &TreeOptions::default());

        assert!(tree.is_empty());
        assert!(tree.items().is_empty());
    }

    #[test]
    fn test_breadcrumbs() {
        let tree = build(&["a/b/c.md"], &TreeOptions::default());
        let file = tree.get("a/b/c.md").unwrap();

        let crumbs: Vec<&str> = tree
            .breadcrumbs(file)
            .into_iter()
            .map(|id| tree.node(id).name())
            .collect();

        assert_eq!(crumbs, vec!["a", "b"]);
        assert!(tree.breadcrumbs(SiteTree::ROOT).is_empty());
    }

    #[test]
    fn test_files_in_display_order() {
        let tree = build(&["z.md", "b/y.md", "a/x.md"], &TreeOptions::default());

        let files: Vec<&str> = tree.files().iter().map(|f| f.path.as_str()).collect();

        assert_eq!(files, vec!["a/x.md", "b/y.md", "z.md"]);
    }

    #[test]
    fn test_items_serialize() {
        let tree = build(&["blog/post-1.md"], &TreeOptions::default());

        let json = serde_json::to_value(tree.items()).unwrap();

        assert_eq!(
            json,
            serde_json::json!([{
                "kind": "dir",
                "name": "blog",
                "label": "Blog",
                "path": "blog",
                "urlPath": "/blog",
                "children": [{
                    "kind": "file",
                    "name": "post-1.md",
                    "label": "post-1",
                    "path": "blog/post-1.md",
                    "urlPath": "/blog/post-1"
                }]
            }])
        );
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("b.tar.gz"), "b.tar");
        assert_eq!(strip_extension(".env"), ".env");
    }
}
