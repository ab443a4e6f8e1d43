//! Markdown pipeline with compact tables, link classes and image sizes.
//!
//! This crate wraps a base markdown renderer with extra source syntax and
//! HTML touch-ups:
//!
//! - compact tables written as `[a;b` ... `c;d]` blocks ([`tables`]),
//! - link classes for e-mail, social platform and PDF links, nested image
//!   links and legacy image alignment tags ([`annotate`]),
//! - `width`/`height` attributes for local images ([`ImageAttributeInjector`]).
//!
//! # Architecture
//!
//! [`Pipeline`] applies text passes before rendering and HTML passes after:
//!
//! ```text
//! markdown -> Annotator -> TableScanner -> Render -> TableRewriter -> ImageAttributeInjector -> html
//!                               |                         ^
//!                               +----- TableRegistry -----+
//! ```
//!
//! The [`TableRegistry`] produced by the scanner is owned by a single
//! transform and handed to the rewriter; nothing is shared between renders
//! except configuration such as the [`KnownLinks`] table.
//!
//! # Example
//!
//! ```
//! use edgering_renderer::{KnownLinks, Pipeline};
//!
//! let mut links = KnownLinks::new();
//! links.add("github", "GH");
//!
//! let html = Pipeline::new()
//!     .with_known_links(links)
//!     .transform("[Code](https://github.com/example)")
//!     .unwrap();
//!
//! assert_eq!(html, "<p><a href=\"https://github.com/example\">Code</a>{.lnkGH}</p>\n");
//! ```

pub mod annotate;
mod image_attrs;
mod pipeline;
mod render;
pub mod tables;

pub use annotate::{Annotator, KnownLinks, Pass, add_known_link, known_links, remove_known_link};
pub use image_attrs::{Dimensions, ImageAttributeInjector, ImageDimensionProbe, ImageProbe, ProbeError};
pub use pipeline::{Pipeline, Transformed, transform};
pub use render::{PulldownRenderer, Render, RenderError};
pub use tables::{
    DEFAULT_TABLE_CLASS, TableMeta, TableRegistry, TableRewriter, TableScanner, rewrite_tables,
    scan,
};
