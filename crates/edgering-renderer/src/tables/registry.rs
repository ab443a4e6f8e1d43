//! Per-render table metadata.

/// Metadata for one compact table block, recorded when the block closes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableMeta {
    /// Whether the block supplied its own header separator row.
    pub has_explicit_header: bool,
    /// Line of the opening `[` (0-indexed, in the scanned text).
    pub start_line: usize,
    /// Line of the closing `]` (0-indexed, in the scanned text).
    pub end_line: usize,
}

/// Ordered table metadata for a single render.
///
/// Entry `i` describes the `i`-th `<table>` the renderer produces from the
/// scanned text. The registry is created by [`scan`](super::scan) and
/// consumed by [`rewrite_tables`](super::rewrite_tables); it must never
/// outlive the render it was created for.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableRegistry {
    entries: Vec<TableMeta>,
}

impl TableRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append metadata for the next table in document order.
    pub fn push(&mut self, meta: TableMeta) {
        self.entries.push(meta);
    }

    /// Metadata for the `index`-th table, if one was recorded.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TableMeta> {
        self.entries.get(index)
    }

    /// Whether the `index`-th table keeps its header row.
    ///
    /// Tables without a registry entry are treated as headerless.
    #[must_use]
    pub fn has_explicit_header(&self, index: usize) -> bool {
        self.get(index).is_some_and(|meta| meta.has_explicit_header)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TableMeta> {
        self.entries.iter()
    }
}

impl FromIterator<TableMeta> for TableRegistry {
    fn from_iter<I: IntoIterator<Item = TableMeta>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
