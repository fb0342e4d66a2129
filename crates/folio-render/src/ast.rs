//! Typed document tree handed over by the host markdown parser.
//!
//! Only the node types the link pipeline cares about are modelled. Anything
//! else reaches us as raw HTML and is passed through untouched.

/// Block-level node.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "kebab-case"))]
pub enum Block {
    Paragraph {
        children: Vec<Inline>,
    },
    Heading {
        level: u8,
        children: Vec<Inline>,
    },
    /// Raw HTML block.
    Html {
        value: String,
    },
    /// Element produced by a pipeline stage (e.g. an embed container).
    Element(Element),
}

impl Block {
    /// Paragraph from inline children.
    #[must_use]
    pub fn paragraph(children: Vec<Inline>) -> Self {
        Self::Paragraph { children }
    }

    /// Apply `f` to every inline, depth first, rebuilding the block.
    ///
    /// Children of links and elements are visited before their parent.
    #[must_use]
    pub fn map_inlines(self, f: &mut impl FnMut(Inline) -> Inline) -> Self {
        match self {
            Self::Paragraph { children } => Self::Paragraph {
                children: map_all(children, f),
            },
            Self::Heading { level, children } => Self::Heading {
                level,
                children: map_all(children, f),
            },
            Self::Element(element) => Self::Element(element.map_children(f)),
            Self::Html { .. } => self,
        }
    }
}

/// Inline node.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "kebab-case"))]
pub enum Inline {
    Text {
        value: String,
    },
    /// CommonMark link `[text](url "title")`.
    Link {
        url: String,
        #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
        title: Option<String>,
        children: Vec<Inline>,
    },
    /// CommonMark image `![alt](url "title")`.
    Image {
        url: String,
        alt: String,
        #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
        title: Option<String>,
    },
    /// Wiki-link as written, brackets included (`[[a|b]]`, `![[c.png]]`).
    WikiLink {
        raw: String,
        #[cfg_attr(feature = "serde", serde(default))]
        is_embed: bool,
    },
    /// HTML element with attributes, either from inline HTML or produced by
    /// a stage.
    Element(Element),
    /// Raw inline HTML.
    Html {
        value: String,
    },
}

impl Inline {
    /// Text node.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    /// Plain text content, concatenated over all descendants.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text { value } => out.push_str(value),
            Self::Link { children, .. } => children.iter().for_each(|c| c.collect_text(out)),
            Self::Element(element) => element.children.iter().for_each(|c| c.collect_text(out)),
            Self::Image { alt, .. } => out.push_str(alt),
            Self::WikiLink { .. } | Self::Html { .. } => {}
        }
    }

    fn map_with(self, f: &mut impl FnMut(Inline) -> Inline) -> Self {
        let node = match self {
            Self::Link {
                url,
                title,
                children,
            } => Self::Link {
                url,
                title,
                children: map_all(children, f),
            },
            Self::Element(element) => Self::Element(element.map_children(f)),
            other => other,
        };
        f(node)
    }
}

fn map_all(children: Vec<Inline>, f: &mut impl FnMut(Inline) -> Inline) -> Vec<Inline> {
    children.into_iter().map(|child| child.map_with(f)).collect()
}

/// HTML element.
///
/// Attributes keep insertion order. A `None` value renders as a bare boolean
/// attribute (`controls`, `allowfullscreen`).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element {
    pub tag: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attrs: Vec<(String, Option<String>)>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<Inline>,
}

impl Element {
    /// Element without attributes or children.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute with a value.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), Some(value.into())));
        self
    }

    /// Add an attribute if `value` is `Some`.
    #[must_use]
    pub fn attr_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Add a boolean attribute.
    #[must_use]
    pub fn flag(mut self, name: impl Into<String>) -> Self {
        self.attrs.push((name.into(), None));
        self
    }

    /// Append a child.
    #[must_use]
    pub fn child(mut self, child: Inline) -> Self {
        self.children.push(child);
        self
    }

    /// Value of an attribute, if present with a value.
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .and_then(|(_, v)| v.as_deref())
    }

    /// Replace (or add) an attribute value.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = Some(value.into());
        match self.attrs.iter_mut().find(|(n, _)| n.eq_ignore_ascii_case(name)) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name.to_owned(), value)),
        }
    }

    /// Whether the tag never has children or a closing tag.
    #[must_use]
    pub fn is_void(&self) -> bool {
        matches!(
            self.tag.to_ascii_lowercase().as_str(),
            "img" | "br" | "hr" | "source" | "embed" | "input" | "track" | "wbr"
        )
    }

    fn map_children(mut self, f: &mut impl FnMut(Inline) -> Inline) -> Self {
        self.children = map_all(self.children, f);
        self
    }
}
