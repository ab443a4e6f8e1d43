//! Markdown-to-HTML renderer boundary.

use pulldown_cmark::{Options, Parser, html};

/// Error raised by a [`Render`] implementation.
///
/// A failed render aborts the whole transform.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The markdown backend rejected the input.
    #[error("Render failed: {0}")]
    Backend(String),
}

/// Base markdown renderer used between the pre- and post-render passes.
///
/// Implemented by [`PulldownRenderer`] and by any closure of the shape
/// `Fn(&str) -> Result<String, RenderError>`.
///
/// ```
/// use edgering_renderer::{Render, RenderError};
///
/// let upper = |text: &str| -> Result<String, RenderError> { Ok(text.to_uppercase()) };
/// assert_eq!(upper.render("hi").unwrap(), "HI");
/// ```
pub trait Render {
    /// Render markdown to HTML.
    fn render(&self, markdown: &str) -> Result<String, RenderError>;
}

impl<F> Render for F
where
    F: Fn(&str) -> Result<String, RenderError>,
{
    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        self(markdown)
    }
}

/// Renderer backed by `pulldown-cmark`'s HTML writer.
#[derive(Clone, Copy, Debug)]
pub struct PulldownRenderer {
    gfm: bool,
}

impl PulldownRenderer {
    /// Create a renderer with GFM extensions enabled.
    #[must_use]
    pub fn new() -> Self {
        Self { gfm: true }
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// GFM is enabled by default and required for compact tables, which
    /// are rewritten to pipe tables before rendering.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Parser options for the current configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_FOOTNOTES
        } else {
            Options::empty()
        }
    }
}

impl Default for PulldownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Render for PulldownRenderer {
    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut output, Parser::new_ext(markdown, self.parser_options()));
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_renders_paragraph() {
        let html = PulldownRenderer::new().render("**Bold** text").unwrap();
        assert_eq!(html, "<p><strong>Bold</strong> text</p>\n");
    }

    #[test]
    fn test_renders_pipe_table() {
        let html = PulldownRenderer::new()
            .render("A|B\n-------- | --------\nC|D")
            .unwrap();

        assert!(html.starts_with("<table><thead><tr><th>A</th><th>B</th></tr></thead>"));
        assert!(html.contains("<td>C</td><td>D</td>"));
    }

    #[test]
    fn test_tables_need_gfm() {
        let html = PulldownRenderer::new()
            .with_gfm(false)
            .render("A|B\n-|-\nC|D")
            .unwrap();
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn test_closure_renderer_error() {
        let failing = |_: &str| -> Result<String, RenderError> {
            Err(RenderError::Backend("boom".to_owned()))
        };
        let err = failing.render("text").unwrap_err();
        assert_eq!(err.to_string(), "Render failed: boom");
    }
}
