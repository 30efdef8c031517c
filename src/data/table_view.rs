use anyhow::{anyhow, Result};
use std::sync::Arc;
use tracing::debug;

use crate::data::datatable::{DataRow, DataTable};
use crate::data::datavalue_compare::compare_cells;

/// Active sort on a view: source column index plus direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub column: usize,
    pub ascending: bool,
}

/// A view over a DataTable that filters and sorts rows without modifying the
/// underlying data. Row visibility and display order live here; the source
/// table only stores cells.
///
/// When no row survives the filter the view raises its empty-state flag, the
/// rendering layer's single "no items found" placeholder row. The flag clears
/// as soon as a filter matches again.
#[derive(Clone)]
pub struct TableView {
    /// The underlying immutable data source
    source: Arc<DataTable>,

    /// Row indices that are visible, in display order
    visible_rows: Vec<usize>,

    /// Case-folded text filter currently applied, if any
    filter: Option<String>,

    /// Sort currently applied, if any
    sort: Option<SortKey>,

    /// Set when the filter left zero visible rows
    empty_state: bool,
}

impl TableView {
    /// Create a new view showing all rows of the table
    pub fn new(source: Arc<DataTable>) -> Self {
        let row_count = source.row_count();
        Self {
            source,
            visible_rows: (0..row_count).collect(),
            filter: None,
            sort: None,
            empty_state: false,
        }
    }

    /// Swap in a new source table (after a mutation such as a delete),
    /// re-deriving visibility and order from the current filter and sort.
    pub fn set_source(&mut self, source: Arc<DataTable>) {
        self.source = source;
        self.reapply();
    }

    /// Filter rows by case-insensitive substring match against the
    /// concatenated cell text of each row. An empty query shows all rows.
    pub fn apply_text_filter(&mut self, query: &str) {
        let query = query.trim().to_lowercase();
        self.filter = if query.is_empty() { None } else { Some(query) };
        self.reapply();
        debug!(
            "Filter {:?} left {} of {} rows visible",
            self.filter,
            self.visible_rows.len(),
            self.source.row_count()
        );
    }

    /// Drop the text filter, keeping any sort
    pub fn clear_filter(&mut self) {
        self.filter = None;
        self.reapply();
    }

    /// Sort visible rows by a column. The sort is stable, so rows with equal
    /// keys keep their relative order, and it survives later filter changes.
    ///
    /// Sorting by a column the table does not have is the one fault this
    /// layer reports instead of ignoring.
    pub fn apply_sort(&mut self, column: usize, ascending: bool) -> Result<()> {
        if column >= self.source.column_count() {
            return Err(anyhow!("Column index {} out of bounds", column));
        }

        self.sort = Some(SortKey { column, ascending });
        self.sort_visible();
        Ok(())
    }

    /// Drop the sort, restoring source row order for the current filter
    pub fn clear_sort(&mut self) {
        self.sort = None;
        self.reapply();
    }

    /// Re-derive visible rows from the source, then re-apply the sort
    fn reapply(&mut self) {
        self.visible_rows = (0..self.source.row_count())
            .filter(|&idx| match (&self.filter, self.source.rows.get(idx)) {
                (Some(query), Some(row)) => row.search_text().to_lowercase().contains(query),
                _ => true,
            })
            .collect();

        self.empty_state = self.visible_rows.is_empty();
        self.sort_visible();
    }

    fn sort_visible(&mut self) {
        if let Some(SortKey { column, ascending }) = self.sort {
            let source = &self.source;
            // Vec::sort_by is stable; ties keep their current order
            self.visible_rows.sort_by(|&a, &b| {
                let val_a = source.get_value(a, column);
                let val_b = source.get_value(b, column);
                let cmp = match (val_a, val_b) {
                    (Some(a), Some(b)) => compare_cells(a, b),
                    (None, None) => std::cmp::Ordering::Equal,
                    (None, _) => std::cmp::Ordering::Less,
                    (_, None) => std::cmp::Ordering::Greater,
                };
                if ascending {
                    cmp
                } else {
                    cmp.reverse()
                }
            });
        }
    }

    /// Number of visible rows
    pub fn row_count(&self) -> usize {
        self.visible_rows.len()
    }

    /// Whether the "no items found" placeholder row should be shown.
    /// At most one placeholder exists at a time; it is a view flag, not a
    /// row in the source table.
    pub fn empty_state(&self) -> bool {
        self.empty_state
    }

    pub fn filter_text(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn sort_key(&self) -> Option<SortKey> {
        self.sort
    }

    /// Get a visible row by display position
    pub fn get_row(&self, index: usize) -> Option<&DataRow> {
        let row_idx = *self.visible_rows.get(index)?;
        self.source.rows.get(row_idx)
    }

    /// Source index of a visible row by display position
    pub fn source_row_index(&self, index: usize) -> Option<usize> {
        self.visible_rows.get(index).copied()
    }

    /// Visible row indices into the source table, in display order
    pub fn visible_row_indices(&self) -> &[usize] {
        &self.visible_rows
    }

    pub fn column_names(&self) -> Vec<String> {
        self.source.column_names()
    }

    pub fn column_count(&self) -> usize {
        self.source.column_count()
    }

    /// Get the source DataTable
    pub fn source(&self) -> &DataTable {
        &self.source
    }
}
