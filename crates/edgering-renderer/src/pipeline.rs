//! Full transform: annotate, scan tables, render, rewrite tables, size images.

use std::path::PathBuf;

use crate::annotate::{Annotator, KnownLinks};
use crate::image_attrs::{ImageAttributeInjector, ImageProbe};
use crate::render::{PulldownRenderer, Render, RenderError};
use crate::tables::{TableRegistry, TableRewriter, TableScanner};

/// Output of [`Pipeline::transform_with_report`].
#[derive(Clone, Debug)]
pub struct Transformed {
    /// Final HTML.
    pub html: String,
    /// Table metadata recorded for this render.
    pub tables: TableRegistry,
    /// Warnings from the table scanner (unterminated blocks and the like).
    pub warnings: Vec<String>,
}

/// Markdown pipeline with compact tables, link classes and image sizes.
///
/// Every call to [`transform`](Self::transform) runs, in order:
///
/// 1. annotation passes ([`Annotator`]),
/// 2. table scanning ([`TableScanner`]),
/// 3. the base renderer ([`Render`]), exactly once,
/// 4. table rewriting ([`TableRewriter`]) with this call's registry,
/// 5. image size injection, when a document root is configured.
///
/// The pipeline holds configuration only, so one instance can serve any
/// number of renders.
///
/// # Example
///
/// ```
/// use edgering_renderer::Pipeline;
///
/// let html = Pipeline::new()
///     .transform("[Name;Ada\nRole;Engineer]")
///     .unwrap();
///
/// assert!(html.contains(r#"<table class="tbl_MD">"#));
/// assert!(html.contains("<th>Role</th><td>Engineer</td>"));
/// ```
#[derive(Debug)]
pub struct Pipeline<R: Render = PulldownRenderer> {
    renderer: R,
    annotator: Option<Annotator>,
    tables: TableRewriter,
    images: Option<ImageAttributeInjector>,
}

impl Pipeline<PulldownRenderer> {
    /// Pipeline using [`PulldownRenderer`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_renderer(PulldownRenderer::new())
    }
}

impl Default for Pipeline<PulldownRenderer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Render> Pipeline<R> {
    /// Pipeline using a custom base renderer.
    #[must_use]
    pub fn with_renderer(renderer: R) -> Self {
        Self {
            renderer,
            annotator: None,
            tables: TableRewriter::new(),
            images: None,
        }
    }

    /// Use `links` instead of the process-wide known-link table.
    #[must_use]
    pub fn with_known_links(mut self, links: KnownLinks) -> Self {
        self.annotator = Some(Annotator::new(links));
        self
    }

    /// Styling class for converted tables (default `tbl_MD`).
    #[must_use]
    pub fn with_table_class(mut self, class: impl Into<String>) -> Self {
        self.tables = TableRewriter::with_class(class);
        self
    }

    /// Enable image size injection for files below `root`.
    #[must_use]
    pub fn with_document_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.images = Some(ImageAttributeInjector::new(root));
        self
    }

    /// Enable image size injection with a custom probe.
    #[must_use]
    pub fn with_probe(mut self, root: impl Into<PathBuf>, probe: impl ImageProbe + 'static) -> Self {
        self.images = Some(ImageAttributeInjector::with_probe(root, probe));
        self
    }

    /// Run the annotation passes only.
    #[must_use]
    pub fn annotate(&self, text: &str) -> String {
        match &self.annotator {
            Some(annotator) => annotator.annotate(text),
            None => Annotator::new(KnownLinks::global()).annotate(text),
        }
    }

    /// Transform markdown to HTML.
    pub fn transform(&self, text: &str) -> Result<String, RenderError> {
        self.transform_with_report(text).map(|t| t.html)
    }

    /// Transform markdown to HTML, keeping table metadata and warnings.
    pub fn transform_with_report(&self, text: &str) -> Result<Transformed, RenderError> {
        let annotated = self.annotate(text);

        let mut scanner = TableScanner::new();
        let markdown = scanner.process(&annotated);
        let warnings = scanner.warnings().to_vec();
        let registry = scanner.into_registry();

        let html = self.renderer.render(&markdown)?;
        let html = self.tables.rewrite(&html, &registry);
        let html = match &self.images {
            Some(injector) => injector.inject(&html),
            None => html,
        };

        for warning in &warnings {
            tracing::warn!(warning = %warning, "Compact table not converted");
        }
        tracing::debug!(tables = registry.len(), "Transform completed");

        Ok(Transformed {
            html,
            tables: registry,
            warnings,
        })
    }
}

/// Transform markdown with the default pipeline.
///
/// The default pipeline has no document root, so `<img>` tags are left
/// without `width`/`height`. Use [`Pipeline::with_document_root`] to add
/// image sizes.
///
/// ```
/// let html = edgering_renderer::transform("[file.png](/gallery)").unwrap();
/// assert_eq!(html, "<p><a href=\"/gallery\"><img src=\"file.png\" alt=\"\" /></a></p>\n");
/// ```
pub fn transform(text: &str) -> Result<String, RenderError> {
    Pipeline::new().transform(text)
}
