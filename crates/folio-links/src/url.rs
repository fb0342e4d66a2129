//! Content path → site URL formatting.
//!
//! Pages lose their `.md`/`.mdx` extension, directory indexes (`index`,
//! `README`) collapse to their parent, and the site prefix is prepended.
//! Raw assets keep their file name and are served from the asset base.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::path::{file_name, is_markdown_path, parent_dir, strip_markdown_extension};

/// Characters escaped by `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// File stems that stand for their parent directory.
const INDEX_STEMS: [&str; 2] = ["index", "readme"];

/// Convert a heading into its URL fragment slug.
///
/// Lowercases, keeps letters, digits, `-` and `_`, and turns each run of
/// whitespace into a single `-`. Other characters are dropped without
/// interrupting a whitespace run.
///
/// # Examples
///
/// ```
/// use folio_links::slugify_heading;
///
/// assert_eq!(slugify_heading("Getting Started"), "getting-started");
/// assert_eq!(
///     slugify_heading("Some.Heading.With-♥-Unicode and spaces"),
///     "someheadingwith--unicode-and-spaces"
/// );
/// ```
pub fn slugify_heading(heading: &str) -> String {
    let mut slug = String::with_capacity(heading.len());
    let mut pending_dash = false;
    for ch in heading.trim().chars() {
        if ch.is_whitespace() {
            pending_dash = true;
        } else if ch.is_alphanumeric() || ch == '-' || ch == '_' {
            if pending_dash {
                slug.push('-');
                pending_dash = false;
            }
            slug.extend(ch.to_lowercase());
        }
    }
    slug
}

/// Percent-encode one path component for a page URL (spaces as `+`).
fn encode_page_component(component: &str) -> String {
    utf8_percent_encode(component, COMPONENT)
        .to_string()
        .replace("%20", "+")
}

/// Percent-encode one path component for an asset URL (spaces as `%20`).
fn encode_asset_component(component: &str) -> String {
    utf8_percent_encode(component, COMPONENT).to_string()
}

fn encode_path(path: &str, encode: fn(&str) -> String) -> String {
    path.split('/').map(encode).collect::<Vec<_>>().join("/")
}

/// Formats content paths into site URLs.
#[derive(Clone, Debug, Default)]
pub struct UrlFormatter {
    site_prefix: String,
    asset_base: Option<String>,
}

impl UrlFormatter {
    /// Create a formatter for a site prefix such as `/@user/project`.
    ///
    /// An empty prefix means the site is served from the domain root.
    #[must_use]
    pub fn new(site_prefix: &str) -> Self {
        Self {
            site_prefix: site_prefix.trim().trim_end_matches('/').to_owned(),
            asset_base: None,
        }
    }

    /// Serve raw assets from `base` instead of the site prefix.
    #[must_use]
    pub fn with_asset_base(mut self, base: &str) -> Self {
        let base = base.trim().trim_end_matches('/');
        self.asset_base = (!base.is_empty()).then(|| base.to_owned());
        self
    }

    /// Site prefix without trailing slash.
    #[must_use]
    pub fn site_prefix(&self) -> &str {
        &self.site_prefix
    }

    /// Site-relative, unencoded URL path of a page.
    ///
    /// # Examples
    ///
    /// ```
    /// use folio_links::UrlFormatter;
    ///
    /// let formatter = UrlFormatter::default();
    /// assert_eq!(formatter.app_path("/blog/README.md"), "/blog");
    /// assert_eq!(formatter.app_path("/blog/post-1.md"), "/blog/post-1");
    /// assert_eq!(formatter.app_path("/index.mdx"), "/");
    /// ```
    #[must_use]
    pub fn app_path(&self, content_path: &str) -> String {
        let stripped = strip_markdown_extension(content_path);
        let collapsed = if INDEX_STEMS
            .iter()
            .any(|stem| file_name(stripped).eq_ignore_ascii_case(stem))
        {
            parent_dir(stripped)
        } else {
            stripped
        };
        let collapsed = collapsed.trim_matches('/');
        format!("/{collapsed}")
    }

    /// Site-relative, encoded URL path of a page.
    #[must_use]
    pub fn page_path(&self, content_path: &str) -> String {
        encode_path(&self.app_path(content_path), encode_page_component)
    }

    /// Full URL of a page, with optional heading fragment.
    #[must_use]
    pub fn format_page(&self, content_path: &str, heading: Option<&str>) -> String {
        let url = self.with_prefix(&self.page_path(content_path));
        append_heading(url, heading)
    }

    /// Full URL of a page served at an author-declared permalink.
    #[must_use]
    pub fn format_permalink(&self, permalink: &str, heading: Option<&str>) -> String {
        let permalink = format!("/{}", permalink.trim().trim_matches('/'));
        let url = self.with_prefix(&permalink);
        append_heading(url, heading)
    }

    /// Full URL of a raw asset.
    ///
    /// Assets keep their extension and are never collapsed.
    #[must_use]
    pub fn format_asset(&self, content_path: &str) -> String {
        let path = format!("/{}", content_path.trim_matches('/'));
        let encoded = encode_path(&path, encode_asset_component);
        let base = self.asset_base.as_deref().unwrap_or(&self.site_prefix);
        format!("{base}{encoded}")
    }

    /// Full URL of a directory in the site tree.
    #[must_use]
    pub fn format_dir(&self, dir_path: &str) -> String {
        let path = format!("/{}", dir_path.trim_matches('/'));
        self.with_prefix(&encode_path(&path, encode_page_component))
    }

    /// Full URL of a content path, picking page or asset formatting by
    /// extension.
    #[must_use]
    pub fn format(&self, content_path: &str, heading: Option<&str>) -> String {
        if is_markdown_path(content_path) {
            self.format_page(content_path, heading)
        } else {
            self.format_asset(content_path)
        }
    }

    /// Fragment-only URL for a heading on the current page.
    #[must_use]
    pub fn anchor(&self, heading: &str) -> String {
        format!("#{}", slugify_heading(heading))
    }

    fn with_prefix(&self, path: &str) -> String {
        if path == "/" {
            if self.site_prefix.is_empty() {
                "/".to_owned()
            } else {
                self.site_prefix.clone()
            }
        } else {
            format!("{}{path}", self.site_prefix)
        }
    }
}

fn append_heading(mut url: String, heading: Option<&str>) -> String {
    if let Some(heading) = heading {
        let slug = slugify_heading(heading);
        if !slug.is_empty() {
            url.push('#');
            url.push_str(&slug);
        }
    }
    url
}
