//! Navigation tree building for Folio sites.
//!
//! This crate provides:
//! - [`build_site_tree`] / [`SiteTreeBuilder`]: flat file list → ordered tree
//! - [`PageMetadata`]: YAML frontmatter parsing and title extraction
//! - [`permalinks_from_entries`]: permalink map for the link resolver
//!
//! # Quick Start
//!
//! ```
//! use folio_tree::{FileEntry, Grouping, TreeOptions, build_site_tree};
//!
//! let entries = vec![
//!     FileEntry::new("README.md"),
//!     FileEntry::new("guide/02-install.md"),
//!     FileEntry::new("guide/10-faq.md"),
//! ];
//! let options = TreeOptions {
//!     group: Grouping::DirsFirst,
//!     site_prefix: "/@john/docs".to_owned(),
//!     ..TreeOptions::default()
//! };
//!
//! let tree = build_site_tree(&entries, &options);
//! let items = tree.items();
//! assert_eq!(items[0].url_path, "/@john/docs/guide");
//! assert_eq!(items[0].children[1].label, "10-faq");
//! ```

mod compare;
mod metadata;
mod tree;

pub use metadata::{
    MetadataError, PageMetadata, extract_title, permalinks_from_entries, resolve_title,
};
pub use tree::{
    DirNode, FileEntry, FileNode, Grouping, NodeId, NodeKind, OrderBy, SiteTree, SiteTreeBuilder,
    SiteTreeNode, TreeItem, TreeOptions, build_site_tree,
};
