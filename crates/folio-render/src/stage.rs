//! Ordered rewrite stages over the document tree.

use std::fmt;

use folio_links::{EmbedClassifier, RenderSession};

use crate::ast::Block;
use crate::commonmark::CommonMarkLinkStage;
use crate::html_attr::HtmlLinkStage;
use crate::wiki::WikiLinkStage;
use crate::youtube::YoutubeEmbedStage;

/// State shared by all stages of one render.
pub struct StageContext<'s, 'r, 'a> {
    /// Content path of the page being rendered.
    pub origin: &'s str,
    /// Memoized link resolution for this render.
    pub session: &'s mut RenderSession<'r, 'a>,
}

/// One rewrite pass over the document.
///
/// Stages are pure with respect to the document: they take a block and
/// return its replacement. Link lookups go through the shared
/// [`RenderSession`] so repeated targets resolve once per render.
///
/// # Example
///
/// ```
/// use folio_render::{Block, Inline, Stage, StageContext};
///
/// struct Shout;
///
/// impl Stage for Shout {
///     fn name(&self) -> &'static str { "shout" }
///
///     fn apply(&self, block: Block, _cx: &mut StageContext<'_, '_, '_>) -> Block {
///         block.map_inlines(&mut |inline| match inline {
///             Inline::Text { value } => Inline::text(value.to_uppercase()),
///             other => other,
///         })
///     }
/// }
/// ```
pub trait Stage: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Rewrite one top-level block.
    fn apply(&self, block: Block, cx: &mut StageContext<'_, '_, '_>) -> Block;
}

/// Explicit ordered list of stages.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stage_names())
            .finish()
    }
}

impl Pipeline {
    /// Empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard link pipeline with default embed settings.
    ///
    /// Order: raw HTML attributes, wiki-links, CommonMark links and images,
    /// YouTube paragraphs. YouTube runs last so it sees links whose URLs
    /// earlier stages left untouched.
    #[must_use]
    pub fn standard() -> Self {
        Self::standard_with(EmbedClassifier::default())
    }

    /// The standard link pipeline classifying wiki embeds with `classifier`.
    #[must_use]
    pub fn standard_with(classifier: EmbedClassifier) -> Self {
        Self::new()
            .with_stage(HtmlLinkStage)
            .with_stage(WikiLinkStage::new(classifier))
            .with_stage(CommonMarkLinkStage)
            .with_stage(YoutubeEmbedStage::default())
    }

    /// Append a stage.
    #[must_use]
    pub fn with_stage(mut self, stage: impl Stage + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Names of the stages in run order.
    #[must_use]
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Number of stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Check whether the pipeline has no stages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run every stage over the whole document, one stage at a time.
    pub fn run(
        &self,
        blocks: Vec<Block>,
        origin: &str,
        session: &mut RenderSession<'_, '_>,
    ) -> Vec<Block> {
        let mut cx = StageContext { origin, session };
        let mut blocks = blocks;
        for stage in &self.stages {
            blocks = blocks
                .into_iter()
                .map(|block| stage.apply(block, &mut cx))
                .collect();
            tracing::debug!(stage = stage.name(), origin, "Applied stage");
        }
        blocks
    }
}
