//! Pre-render annotation passes.
//!
//! Each pass is a pure text rewrite over the markdown source. Passes run in
//! [`Pass::ORDER`]; later passes see the output of earlier ones, so the
//! email shortcut runs before the generic `<url>` shortcut, and the link
//! class passes skip links that already carry an attribute block.
//!
//! ```
//! use edgering_renderer::{Annotator, KnownLinks};
//!
//! let annotator = Annotator::new(KnownLinks::new());
//! let text = annotator.annotate("Mail <a@b.co> or follow [us](https://facebook.com/us).");
//!
//! assert_eq!(
//!     text,
//!     "Mail [a@b.co](mailto:a@b.co){.lnkMail} or follow [us](https://facebook.com/us){.lnkFB}."
//! );
//! ```

mod images;
mod known_links;
mod links;

pub use images::{image_aligns, nested_images};
pub use known_links::{KnownLinks, add_known_link, known_links, remove_known_link};
pub use links::{email_shortcuts, known_platform_links, pdf_links, url_shortcuts};

/// A single annotation pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pass {
    /// `<addr@domain.tld>` to a `mailto:` link with `{.lnkMail}`.
    EmailShortcuts,
    /// `<http…>` to a markdown link.
    UrlShortcuts,
    /// `{.lnk<Class>}` on links to known platforms.
    KnownPlatformLinks,
    /// `{.lnkPDF}` on links to PDF files.
    PdfLinks,
    /// `[file.png](href)` to `[![](file.png)](href)`.
    NestedImages,
    /// `![alt](src)[c]` to `![alt](src){.ImgAlignCenter}`.
    ImageAligns,
}

impl Pass {
    /// Order in which passes are applied.
    pub const ORDER: [Pass; 6] = [
        Pass::EmailShortcuts,
        Pass::UrlShortcuts,
        Pass::KnownPlatformLinks,
        Pass::PdfLinks,
        Pass::NestedImages,
        Pass::ImageAligns,
    ];

    /// Short name used in logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Pass::EmailShortcuts => "email-shortcuts",
            Pass::UrlShortcuts => "url-shortcuts",
            Pass::KnownPlatformLinks => "known-platform-links",
            Pass::PdfLinks => "pdf-links",
            Pass::NestedImages => "nested-images",
            Pass::ImageAligns => "image-aligns",
        }
    }

    /// Apply this pass to `text`.
    #[must_use]
    pub fn apply(self, text: &str, links: &KnownLinks) -> String {
        match self {
            Pass::EmailShortcuts => email_shortcuts(text),
            Pass::UrlShortcuts => url_shortcuts(text),
            Pass::KnownPlatformLinks => known_platform_links(text, links),
            Pass::PdfLinks => pdf_links(text),
            Pass::NestedImages => nested_images(text),
            Pass::ImageAligns => image_aligns(text),
        }
    }
}

/// Applies every annotation pass in order.
#[derive(Clone, Debug, Default)]
pub struct Annotator {
    links: KnownLinks,
}

impl Annotator {
    /// Create an annotator using `links` for platform link classes.
    #[must_use]
    pub fn new(links: KnownLinks) -> Self {
        Self { links }
    }

    /// Known-link table used by this annotator.
    #[must_use]
    pub fn links(&self) -> &KnownLinks {
        &self.links
    }

    /// Run all passes over `text`.
    #[must_use]
    pub fn annotate(&self, text: &str) -> String {
        Pass::ORDER.iter().fold(text.to_owned(), |text, pass| {
            let result = pass.apply(&text, &self.links);
            if result != text {
                tracing::trace!(pass = pass.name(), "Annotation pass rewrote text");
            }
            result
        })
    }
}

/// Run all passes over `text` with the process-wide known-link table.
#[must_use]
pub fn annotate(text: &str) -> String {
    Annotator::new(KnownLinks::global()).annotate(text)
}
