//! Width and height injection for rendered `<img>` tags.
//!
//! Local images found below the document root get their pixel dimensions
//! added to the tag, so browsers can reserve space before they load.
//! Anything that can't be resolved or decoded is left exactly as rendered.

use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::{Captures, Regex};

static IMG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<img\b[^>]*>").unwrap());

static SRC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\ssrc\s*=\s*"([^"]*)""#).unwrap());

static SIZE_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s(?:width|height)\s*=").unwrap());

/// Pixel dimensions of an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    /// HTML attribute string, e.g. `width="640" height="480"`.
    #[must_use]
    pub fn to_attributes(self) -> String {
        format!(r#"width="{}" height="{}""#, self.width, self.height)
    }
}

/// Error probing an image file.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// No regular file at the resolved path.
    #[error("Image not found: {}", .0.display())]
    NotFound(PathBuf),
    /// The file could not be read or decoded.
    #[error("Failed to read image dimensions: {0}")]
    Image(#[from] image::ImageError),
}

/// Reads the dimensions of an image file.
pub trait ImageProbe: Send + Sync {
    /// Probe the image at `path`.
    fn probe(&self, path: &Path) -> Result<Dimensions, ProbeError>;
}

/// [`ImageProbe`] backed by the `image` crate.
///
/// Only the image header is decoded.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageDimensionProbe;

impl ImageProbe for ImageDimensionProbe {
    fn probe(&self, path: &Path) -> Result<Dimensions, ProbeError> {
        if !path.is_file() {
            return Err(ProbeError::NotFound(path.to_path_buf()));
        }
        let (width, height) = image::image_dimensions(path)?;
        Ok(Dimensions { width, height })
    }
}

/// Injects `width`/`height` attributes into `<img>` tags.
///
/// Sources are resolved as absolute paths below the document root:
/// `src="img/a.png"` and `src="/img/a.png"` both map to
/// `<root>/img/a.png`. Remote URLs, data URIs, paths escaping the root and
/// tags that already have a size are skipped.
pub struct ImageAttributeInjector {
    document_root: PathBuf,
    probe: Box<dyn ImageProbe>,
}

impl ImageAttributeInjector {
    /// Create an injector probing files with [`ImageDimensionProbe`].
    #[must_use]
    pub fn new(document_root: impl Into<PathBuf>) -> Self {
        Self::with_probe(document_root, ImageDimensionProbe)
    }

    /// Create an injector with a custom probe.
    #[must_use]
    pub fn with_probe(document_root: impl Into<PathBuf>, probe: impl ImageProbe + 'static) -> Self {
        Self {
            document_root: document_root.into(),
            probe: Box::new(probe),
        }
    }

    /// Directory that image sources are resolved against.
    #[must_use]
    pub fn document_root(&self) -> &Path {
        &self.document_root
    }

    /// Add dimensions to every resolvable `<img>` tag in `html`.
    #[must_use]
    pub fn inject(&self, html: &str) -> String {
        IMG_RE
            .replace_all(html, |caps: &Captures| {
                let tag = &caps[0];
                match self.attributes_for(tag) {
                    // `<img` is four bytes; IMG_RE guarantees the prefix.
                    Some(attrs) => format!("<img {attrs}{}", &tag[4..]),
                    None => tag.to_owned(),
                }
            })
            .into_owned()
    }

    fn attributes_for(&self, tag: &str) -> Option<String> {
        if SIZE_ATTR_RE.is_match(tag) {
            return None;
        }
        let src = SRC_RE.captures(tag)?.get(1)?.as_str();
        let path = self.resolve(src)?;

        match self.probe.probe(&path) {
            Ok(dimensions) => Some(dimensions.to_attributes()),
            Err(e) => {
                tracing::debug!(src, error = %e, "Image size not injected");
                None
            }
        }
    }

    /// Map an `<img>` source to a file below the document root.
    fn resolve(&self, src: &str) -> Option<PathBuf> {
        if src.is_empty() || src.contains("://") || src.starts_with("//") || src.starts_with("data:")
        {
            return None;
        }

        let src = src.split(['?', '#']).next().unwrap_or(src);
        let relative = Path::new(src.trim_start_matches('/'));
        if relative.as_os_str().is_empty()
            || relative
                .components()
                .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return None;
        }

        Some(self.document_root.join(relative))
    }
}

impl std::fmt::Debug for ImageAttributeInjector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageAttributeInjector")
            .field("document_root", &self.document_root)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};

    /// Probe reporting fixed dimensions and recording requested paths.
    #[derive(Clone, Default)]
    struct FixedProbe {
        requested: Arc<Mutex<Vec<PathBuf>>>,
    }

    impl ImageProbe for FixedProbe {
        fn probe(&self, path: &Path) -> Result<Dimensions, ProbeError> {
            self.requested.lock().unwrap().push(path.to_path_buf());
            Ok(Dimensions {
                width: 640,
                height: 480,
            })
        }
    }

    #[test]
    fn test_dimensions_to_attributes() {
        let dims = Dimensions {
            width: 3,
            height: 2,
        };
        assert_eq!(dims.to_attributes(), r#"width="3" height="2""#);
    }

    #[test]
    fn test_injects_after_img() {
        let injector = ImageAttributeInjector::with_probe("/srv/www", FixedProbe::default());
        assert_eq!(injector.document_root(), Path::new("/srv/www"));

        assert_eq!(
            injector.inject(r#"<p><img src="/a.png" alt="A" /></p>"#),
            r#"<p><img width="640" height="480" src="/a.png" alt="A" /></p>"#
        );
    }

    #[test]
    fn test_relative_src_resolves_from_root() {
        let probe = FixedProbe::default();
        let injector = ImageAttributeInjector::with_probe("/srv/www", probe.clone());

        let _ = injector.inject(r#"<img src="img/a.png?v=2">"#);

        assert_eq!(
            *probe.requested.lock().unwrap(),
            vec![PathBuf::from("/srv/www/img/a.png")]
        );
    }

    #[test]
    fn test_skipped_sources_are_not_probed() {
        let probe = FixedProbe::default();
        let injector = ImageAttributeInjector::with_probe("/srv/www", probe.clone());
        let html = concat!(
            r#"<img src="">"#,
            r#"<img src="https://example.com/a.png">"#,
            r#"<img src="//cdn.example.com/a.png">"#,
            r#"<img src="data:image/png;base64,AAAA">"#,
            r#"<img src="../secret.png">"#,
            r#"<img src="/">"#,
            r#"<img alt="no source">"#,
            r#"<img width="1" src="/sized.png">"#,
        );

        assert_eq!(injector.inject(html), html);
        assert!(probe.requested.lock().unwrap().is_empty());
    }

    #[test]
    fn test_real_probe_reads_png() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("img")).unwrap();
        image::RgbImage::new(3, 2)
            .save(dir.path().join("img/pixel.png"))
            .unwrap();

        let injector = ImageAttributeInjector::new(dir.path());
        assert_eq!(
            injector.inject(r#"<img src="img/pixel.png" alt="">"#),
            r#"<img width="3" height="2" src="img/pixel.png" alt="">"#
        );
    }

    #[test]
    fn test_missing_file_left_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let injector = ImageAttributeInjector::new(dir.path());

        let html = r#"<img src="/missing.png">"#;
        assert_eq!(injector.inject(html), html);
    }

    #[test]
    fn test_undecodable_file_left_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("fake.png"), b"not an image").unwrap();
        let injector = ImageAttributeInjector::new(dir.path());

        let html = r#"<img src="/fake.png">"#;
        assert_eq!(injector.inject(html), html);
    }

    #[test]
    fn test_probe_not_found_error() {
        let err = ImageDimensionProbe
            .probe(Path::new("/definitely/missing.png"))
            .unwrap_err();
        assert!(matches!(err, ProbeError::NotFound(_)));
    }
}
