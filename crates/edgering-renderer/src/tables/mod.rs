//! Compact table blocks.
//!
//! A compact table is a bracket-delimited block of lines using `;` or `|`
//! as the column delimiter:
//!
//! ```markdown
//! [Key;Value
//! Host;example.com
//! Port;443]
//! ```
//!
//! # Architecture
//!
//! Tables use two-phase processing around the markdown renderer:
//!
//! 1. **Scanning** ([`TableScanner`]): rewrites blocks to pipe tables,
//!    synthesizing a separator row when the block has none, and records a
//!    [`TableMeta`] per block in a [`TableRegistry`].
//!
//! 2. **Rewriting** ([`TableRewriter`]): adds the styling class to each
//!    rendered `<table>` and, for blocks without an explicit header, makes
//!    the first column the header.
//!
//! The registry is the only link between the two phases and belongs to a
//! single render.
//!
//! # Usage
//!
//! ```
//! use edgering_renderer::{PulldownRenderer, Render, TableRewriter, TableScanner};
//!
//! let mut scanner = TableScanner::new();
//! let markdown = scanner.process("[Host;example.com\nPort;443]");
//! let registry = scanner.into_registry();
//!
//! let html = PulldownRenderer::new().render(&markdown).unwrap();
//! let html = TableRewriter::new().rewrite(&html, &registry);
//!
//! assert!(html.contains(r#"<table class="tbl_MD">"#));
//! assert!(html.contains("<th>Port</th>"));
//! assert!(!html.contains("<thead>"));
//! ```

mod fence;
mod registry;
mod rewriter;
mod scanner;

pub use registry::{TableMeta, TableRegistry};
pub use rewriter::{DEFAULT_TABLE_CLASS, TableRewriter, rewrite_tables};
pub use scanner::{TableScanner, scan};
