//! Post-render table rewriter.
//!
//! Pairs every rendered `<table>` with the registry entry recorded by the
//! scanner, adds the styling class and, for headerless tables, turns the
//! first column into header cells.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::registry::TableRegistry;

/// Styling class injected into converted tables by default.
pub const DEFAULT_TABLE_CLASS: &str = "tbl_MD";

static TABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<table[^>]*>.*?</table>").unwrap());

static THEAD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?thead(?:\s[^>]*)?>").unwrap());

static TH_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<th(\s[^>]*)?>").unwrap());

static TH_CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</th>").unwrap());

static ROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)(<tr(?:\s[^>]*)?>)(.*?)(</tr>)").unwrap());

static TD_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<td(\s[^>]*)?>").unwrap());

/// Rewrites rendered tables using metadata from the scanner.
///
/// # Example
///
/// ```
/// use edgering_renderer::{TableMeta, TableRegistry, TableRewriter};
///
/// let registry: TableRegistry = [TableMeta {
///     has_explicit_header: false,
///     start_line: 0,
///     end_line: 1,
/// }]
/// .into_iter()
/// .collect();
///
/// let html = TableRewriter::new().rewrite(
///     "<table><tr><td>Key</td><td>Value</td></tr></table>",
///     &registry,
/// );
/// assert_eq!(
///     html,
///     r#"<table class="tbl_MD"><tr><th>Key</th><td>Value</td></tr></table>"#
/// );
/// ```
#[derive(Clone, Debug)]
pub struct TableRewriter {
    class: String,
}

impl TableRewriter {
    /// Create a rewriter using [`DEFAULT_TABLE_CLASS`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_class(DEFAULT_TABLE_CLASS)
    }

    /// Create a rewriter injecting a custom styling class.
    #[must_use]
    pub fn with_class(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
        }
    }

    /// Styling class injected into each table.
    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Rewrite every `<table>` in `html` against `registry`.
    ///
    /// The `i`-th table is paired with the `i`-th registry entry. Tables
    /// beyond the end of the registry are treated as headerless and extra
    /// entries are ignored. An empty registry leaves `html` untouched.
    #[must_use]
    pub fn rewrite(&self, html: &str, registry: &TableRegistry) -> String {
        if registry.is_empty() {
            return html.to_owned();
        }

        let mut output = String::with_capacity(html.len() + registry.len() * 32);
        let mut last_end = 0;
        let mut count = 0;

        for (index, table) in TABLE_RE.find_iter(html).enumerate() {
            output.push_str(&html[last_end..table.start()]);
            output.push_str(&self.rewrite_table(
                table.as_str(),
                registry.has_explicit_header(index),
            ));
            last_end = table.end();
            count = index + 1;
        }
        output.push_str(&html[last_end..]);

        if count != registry.len() {
            tracing::warn!(
                rendered = count,
                registered = registry.len(),
                "Rendered table count differs from compact table blocks"
            );
        }

        output
    }

    fn rewrite_table(&self, table: &str, has_explicit_header: bool) -> String {
        // TABLE_RE guarantees the six-byte `<table` prefix.
        let mut result = format!("<table class=\"{}\"{}", self.class, &table[6..]);

        if !has_explicit_header {
            result = promote_first_column(&result);
        }

        result
    }
}

impl Default for TableRewriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Rewrite tables with the default styling class.
#[must_use]
pub fn rewrite_tables(html: &str, registry: &TableRegistry) -> String {
    TableRewriter::new().rewrite(html, registry)
}

/// Drop the header section and make the first cell of each row a header.
fn promote_first_column(table: &str) -> String {
    let table = THEAD_RE.replace_all(table, "");
    let table = TH_OPEN_RE.replace_all(&table, "<td$1>");
    let table = TH_CLOSE_RE.replace_all(&table, "</td>");

    ROW_RE
        .replace_all(&table, |caps: &Captures| {
            format!("{}{}{}", &caps[1], promote_first_cell(&caps[2]), &caps[3])
        })
        .into_owned()
}

/// Turn the first `<td>` of a row into `<th>`, closing tag included.
fn promote_first_cell(row: &str) -> String {
    let Some(open) = TD_OPEN_RE.captures(row) else {
        return row.to_owned();
    };
    let Some(whole) = open.get(0) else {
        return row.to_owned();
    };
    let attrs = open.get(1).map_or("", |m| m.as_str());

    let rest = &row[whole.end()..];
    let Some(close) = rest.to_ascii_lowercase().find("</td>") else {
        return row.to_owned();
    };

    format!(
        "{}<th{attrs}>{}</th>{}",
        &row[..whole.start()],
        &rest[..close],
        &rest[close + "</td>".len()..]
    )
}
