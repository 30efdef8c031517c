use anyhow::{anyhow, Result};
use std::sync::Arc;

use inventory_tui::config::config::Config;
use inventory_tui::data::loaders::InventoryLoader;
use inventory_tui::logging;
use inventory_tui::status::StatusThresholds;
use inventory_tui::tui::App;
use inventory_tui::view_controller::TableViewController;

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow!("Usage: inventory-tui <inventory.csv|inventory.json>"))?;

    logging::init_tracing()?;
    let config = Config::load().unwrap_or_default();

    let thresholds = StatusThresholds {
        low_stock: config.behavior.low_stock_threshold,
        expiry_warning_days: config.behavior.expiry_warning_days,
    };
    let table = InventoryLoader::load_inventory(&path, &thresholds)?;

    let controller = TableViewController::new(Arc::new(table))
        .with_debounce_ms(config.behavior.debounce_ms)
        .with_notification_ttl_ms(config.behavior.notification_ttl_ms);

    let mut terminal = ratatui::init();
    let result = App::new(controller, config).run(&mut terminal);
    ratatui::restore();
    result
}
