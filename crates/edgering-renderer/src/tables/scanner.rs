//! Line-block scanner for compact table syntax.
//!
//! Converts bracket-delimited blocks into pipe tables before rendering:
//!
//! ```text
//! [Name;Role          Name|Role
//! Ada;Engineer    ->  -------- | --------
//! Linus;Maintainer]   Ada|Engineer
//!                     Linus|Maintainer
//! ```
//!
//! Every converted block appends one [`TableMeta`] to the registry, in
//! document order, so the post-render rewriter can tell which rendered
//! tables had an explicit header row.

use super::fence::{FenceLine, FenceTracker};
use super::registry::{TableMeta, TableRegistry};

/// Cell used when synthesizing a header separator row.
const SEPARATOR_CELL: &str = "--------";

/// Scanner that rewrites compact `[ ... ]` blocks into pipe tables.
///
/// # Example
///
/// ```
/// use edgering_renderer::TableScanner;
///
/// let mut scanner = TableScanner::new();
/// let output = scanner.process("[A;B\nC;D]");
///
/// assert_eq!(output, "A|B\n-------- | --------\nC|D");
///
/// let registry = scanner.into_registry();
/// assert_eq!(registry.len(), 1);
/// assert!(!registry.has_explicit_header(0));
/// ```
#[derive(Debug, Default)]
pub struct TableScanner {
    fence: FenceTracker,
    registry: TableRegistry,
    warnings: Vec<String>,
}

impl TableScanner {
    /// Create a scanner with an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewrite every closed line block in `input`.
    ///
    /// Input without a `[` is returned unchanged. Blocks that never close
    /// are left as literal text and reported through [`warnings`](Self::warnings).
    #[must_use]
    pub fn process(&mut self, input: &str) -> String {
        if !input.contains('[') {
            return input.to_owned();
        }

        let mut lines: Vec<String> = input.split('\n').map(str::to_owned).collect();
        let mut open: Option<usize> = None;

        for idx in 0..lines.len() {
            let position = self.fence.classify(&lines[idx]);
            if position.is_code() {
                if position == FenceLine::Open
                    && let Some(start) = open.take()
                {
                    self.warn_unterminated(start);
                }
                continue;
            }

            let trimmed = lines[idx].trim();
            if trimmed.is_empty() {
                continue;
            }

            if trimmed.starts_with('[') && !trimmed.contains(']') {
                if let Some(previous) = open.replace(idx) {
                    self.warnings.push(format!(
                        "line {}: `[` block superseded by line {}, left as text",
                        previous + 1,
                        idx + 1
                    ));
                }
                continue;
            }

            if trimmed.ends_with(']')
                && let Some(start) = open.take()
            {
                let meta = close_block(&mut lines, start, idx);
                tracing::debug!(
                    start_line = meta.start_line,
                    end_line = meta.end_line,
                    has_explicit_header = meta.has_explicit_header,
                    "Converted compact table block"
                );
                self.registry.push(meta);
            }
        }

        if let Some(start) = open {
            self.warn_unterminated(start);
        }

        lines.join("\n")
    }

    /// Warnings generated while scanning.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Consume the scanner and return the collected table metadata.
    #[must_use]
    pub fn into_registry(self) -> TableRegistry {
        self.registry
    }

    fn warn_unterminated(&mut self, start: usize) {
        tracing::debug!(start_line = start, "Unterminated table block left as text");
        self.warnings.push(format!(
            "line {}: unterminated `[` block (missing closing `]`), left as text",
            start + 1
        ));
    }
}

/// Rewrite a compact table in text and return its metadata.
///
/// Convenience wrapper around [`TableScanner`] for callers that don't need
/// the scanner warnings.
///
/// ```
/// let (text, registry) = edgering_renderer::scan("[A|B\n-|-\n1|2]");
///
/// assert_eq!(text, "A|B\n-|-\n1|2");
/// assert!(registry.has_explicit_header(0));
/// ```
#[must_use]
pub fn scan(text: &str) -> (String, TableRegistry) {
    let mut scanner = TableScanner::new();
    let output = scanner.process(text);
    (output, scanner.into_registry())
}

/// Convert lines `start..=end` into a pipe table in place.
///
/// The table is separated from neighbouring text by blank lines, as a pipe
/// table can neither interrupt a paragraph nor end without one.
fn close_block(lines: &mut [String], start: usize, end: usize) -> TableMeta {
    let closing = lines[end].trim();
    lines[end] = closing.strip_suffix(']').unwrap_or(closing).to_owned();

    let opening = lines[start].trim_start();
    lines[start] = opening.strip_prefix('[').unwrap_or(opening).to_owned();

    for line in &mut lines[start..=end] {
        if !line.contains('|') {
            *line = line.replace(';', "|");
        }
    }

    let has_explicit_header = lines
        .get(start + 1)
        .is_some_and(|next| is_separator_row(next, column_count(&lines[start])));

    if !has_explicit_header {
        let separator = separator_row(&lines[start]);
        let header = &mut lines[start];
        header.push('\n');
        header.push_str(&separator);
    }

    if start > 0 && needs_gap(&lines[start - 1]) {
        lines[start].insert(0, '\n');
    }
    if lines.get(end + 1).is_some_and(|next| needs_gap(next)) {
        lines[end].push('\n');
    }

    TableMeta {
        has_explicit_header,
        start_line: start,
        end_line: end,
    }
}

/// Whether a blank line must separate `line` from an adjacent table.
fn needs_gap(line: &str) -> bool {
    !line.trim().is_empty() && !line.ends_with('\n')
}

/// Number of cells in a pipe row, outer pipes excluded.
fn column_count(row: &str) -> usize {
    row.trim().trim_matches('|').matches('|').count() + 1
}

/// Whether a row is a header delimiter row with `columns` cells.
///
/// Every cell must look like `---`, `:--`, `--:` or `:-:`, so data rows
/// that merely start with `-` or `:` don't count.
fn is_separator_row(line: &str, columns: usize) -> bool {
    let cells: Vec<&str> = line.trim().trim_matches('|').split('|').collect();
    cells.len() == columns
        && cells.iter().all(|cell| {
            let cell = cell.trim();
            let cell = cell.strip_prefix(':').unwrap_or(cell);
            let cell = cell.strip_suffix(':').unwrap_or(cell);
            !cell.is_empty() && cell.chars().all(|c| c == '-')
        })
}

/// Build a separator row with one cell per column of `header`.
fn separator_row(header: &str) -> String {
    let row = vec![SEPARATOR_CELL; column_count(header)].join(" | ");

    if header.trim().starts_with('|') {
        format!("| {row} |")
    } else {
        row
    }
}
