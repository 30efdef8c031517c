use anyhow::{anyhow, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::data::data_exporter::DataExporter;
use crate::data::datatable::{DataRow, DataTable};
use crate::data::table_view::TableView;
use crate::debouncer::Debouncer;
use crate::notifications::{NotificationCenter, DEFAULT_NOTIFICATION_TTL_MS};

/// Debounce window for the live search box, in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Synchronous yes/no capability the host environment provides, e.g. a modal
/// dialog. The event loop stops dispatching until the user answers; that is
/// the host's concern, not this controller's.
pub trait ConfirmPrompt {
    fn confirm(&mut self, message: &str) -> bool;
}

/// One controller per page session, owning the view, the search debouncer,
/// the notification banners and the item-count label. All table operations
/// the UI offers go through here; the UI never touches row visibility or
/// order directly.
pub struct TableViewController {
    view: TableView,
    debouncer: Debouncer,
    notifications: NotificationCenter,
    item_count: String,
}

impl TableViewController {
    pub fn new(source: Arc<DataTable>) -> Self {
        let view = TableView::new(source);
        let mut controller = Self {
            view,
            debouncer: Debouncer::new(DEFAULT_DEBOUNCE_MS),
            notifications: NotificationCenter::new(DEFAULT_NOTIFICATION_TTL_MS),
            item_count: String::new(),
        };
        controller.update_item_count();
        controller
    }

    pub fn with_debounce_ms(mut self, delay_ms: u64) -> Self {
        self.debouncer = Debouncer::new(delay_ms);
        self
    }

    pub fn with_notification_ttl_ms(mut self, ttl_ms: u64) -> Self {
        self.notifications = NotificationCenter::new(ttl_ms);
        self
    }

    /// Feed a keystroke's worth of search text into the debouncer. The
    /// actual filter pass runs from `tick` once typing goes quiet.
    pub fn search_input_changed(&mut self, text: &str) {
        self.debouncer.schedule(text);
    }

    /// Event-loop heartbeat: run the coalesced filter pass when due and
    /// expire stale notification banners. Returns true when a pass ran.
    pub fn tick(&mut self) -> bool {
        self.notifications.sweep();
        if let Some(query) = self.debouncer.poll() {
            self.filter_now(&query);
            true
        } else {
            false
        }
    }

    /// Apply a filter immediately, bypassing the debounce window
    pub fn filter_now(&mut self, query: &str) {
        debug!("Filter pass: {:?}", query);
        self.view.apply_text_filter(query);
        self.update_item_count();
    }

    /// Sort by column index. Errors when the column does not exist; every
    /// other operation here degrades to a no-op instead.
    pub fn sort(&mut self, column: usize, ascending: bool) -> Result<()> {
        self.view.apply_sort(column, ascending)?;
        info!(
            "Sorted by column {} {}",
            column,
            if ascending { "ascending" } else { "descending" }
        );
        Ok(())
    }

    /// Export the visible rows to a CSV file and post a banner with the
    /// outcome
    pub fn export_csv<P: AsRef<Path>>(&mut self, path: P) -> Result<String> {
        match DataExporter::export_to_csv(&self.view, path) {
            Ok(summary) => {
                self.notifications.success(summary.clone());
                Ok(summary)
            }
            Err(e) => {
                self.notifications.error(format!("Export failed: {}", e));
                Err(e)
            }
        }
    }

    /// Plain-text rendering of the visible rows for the host's print path
    pub fn print_text(&self) -> String {
        DataExporter::print_text(&self.view)
    }

    /// Recompute the pluralized item-count label from the visible rows
    pub fn update_item_count(&mut self) {
        let count = self.view.row_count();
        self.item_count = format!("{} item{}", count, if count == 1 { "" } else { "s" });
    }

    pub fn item_count_label(&self) -> &str {
        &self.item_count
    }

    /// Ask the host to confirm deleting the named item. Blocks inside the
    /// host's modal until answered.
    pub fn confirm_delete(&mut self, prompt: &mut dyn ConfirmPrompt, item_name: &str) -> bool {
        prompt.confirm(&format!(
            "Are you sure you want to delete \"{}\"?",
            item_name
        ))
    }

    /// Delete the item at a visible row position, after confirmation.
    /// Returns Ok(false) when the user declines.
    pub fn delete_item(
        &mut self,
        prompt: &mut dyn ConfirmPrompt,
        visible_index: usize,
    ) -> Result<bool> {
        let source_index = self
            .view
            .source_row_index(visible_index)
            .ok_or_else(|| anyhow!("No row at position {}", visible_index))?;

        let item_name = self
            .view
            .source()
            .get_value(source_index, 0)
            .map(|v| v.to_string())
            .unwrap_or_default();

        if !self.confirm_delete(prompt, &item_name) {
            return Ok(false);
        }

        let mut table = self.view.source().clone();
        table.remove_row(source_index);
        self.view.set_source(Arc::new(table));
        self.update_item_count();

        info!("Deleted item {:?}", item_name);
        self.notifications
            .success(format!("Deleted \"{}\"", item_name));
        Ok(true)
    }

    /// Append a new item row to the backing table and re-derive the view.
    /// The current filter still applies, so the new row may not be visible.
    pub fn append_row(&mut self, row: DataRow) -> Result<()> {
        let name = row.get(0).map(|v| v.to_string()).unwrap_or_default();
        let mut table = self.view.source().clone();
        table.add_row(row)?;
        self.view.set_source(Arc::new(table));
        self.update_item_count();

        info!("Added item {:?}", name);
        self.notifications.success(format!("Added \"{}\"", name));
        Ok(())
    }

    pub fn view(&self) -> &TableView {
        &self.view
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationCenter {
        &mut self.notifications
    }

    pub fn is_search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}
