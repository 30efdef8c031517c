use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

use crate::data::datatable::{DataColumn, DataRow, DataTable, DataValue};
use crate::status::{ItemStatus, StatusThresholds};

/// Loads inventory files into DataTable form
pub struct InventoryLoader;

impl InventoryLoader {
    /// Load a CSV file directly into a DataTable with per-cell type inference
    pub fn load_csv<P: AsRef<Path>>(path: P, table_name: &str) -> Result<DataTable> {
        let path = path.as_ref();
        info!("Loading {} into DataTable", path.display());

        let file = File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let mut reader = csv::Reader::from_reader(file);

        let headers = reader.headers()?.clone(); // Clone to release the borrow
        let mut table = DataTable::new(table_name);

        for header in headers.iter() {
            table.add_column(DataColumn::new(header.to_string()));
        }

        for result in reader.records() {
            let record = result?;
            let values: Vec<DataValue> = record
                .iter()
                .map(DataValue::infer_from_string)
                .collect();
            table.add_row(DataRow::new(values))?;
        }

        table.infer_column_types();

        info!(
            "Load complete: {} rows, {} columns",
            table.row_count(),
            table.column_count()
        );
        Ok(table)
    }

    /// Load a JSON array of flat objects into a DataTable. Column order
    /// follows the first object's keys.
    pub fn load_json<P: AsRef<Path>>(path: P, table_name: &str) -> Result<DataTable> {
        let path = path.as_ref();
        info!("Loading {} into DataTable", path.display());

        let file = File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let data: Value = serde_json::from_reader(file)?;

        let items = data
            .as_array()
            .ok_or_else(|| anyhow!("Expected a JSON array of objects"))?;

        let mut table = DataTable::new(table_name);

        let first = match items.first() {
            Some(v) => v
                .as_object()
                .ok_or_else(|| anyhow!("Expected JSON objects in array"))?,
            None => return Ok(table),
        };
        let headers: Vec<String> = first.keys().cloned().collect();
        for header in &headers {
            table.add_column(DataColumn::new(header.clone()));
        }

        for item in items {
            let obj = item
                .as_object()
                .ok_or_else(|| anyhow!("Expected JSON objects in array"))?;
            let values: Vec<DataValue> = headers
                .iter()
                .map(|h| match obj.get(h) {
                    Some(Value::String(s)) => DataValue::infer_from_string(s),
                    Some(Value::Number(n)) => {
                        if let Some(i) = n.as_i64() {
                            DataValue::Integer(i)
                        } else {
                            DataValue::Float(n.as_f64().unwrap_or(0.0))
                        }
                    }
                    Some(Value::Bool(b)) => DataValue::Boolean(*b),
                    Some(Value::Null) | None => DataValue::Null,
                    Some(other) => DataValue::String(other.to_string()),
                })
                .collect();
            table.add_row(DataRow::new(values))?;
        }

        table.infer_column_types();
        Ok(table)
    }

    /// Load an inventory file by extension and append the computed trailing
    /// Status column
    pub fn load_inventory<P: AsRef<Path>>(
        path: P,
        thresholds: &StatusThresholds,
    ) -> Result<DataTable> {
        let path = path.as_ref();
        let mut table = match path.extension().and_then(|e| e.to_str()) {
            Some("csv") => Self::load_csv(path, "inventory")?,
            Some("json") => Self::load_json(path, "inventory")?,
            other => {
                return Err(anyhow!(
                    "Unsupported inventory file type: {:?} ({})",
                    other,
                    path.display()
                ))
            }
        };
        Self::append_status_column(&mut table, thresholds);
        Ok(table)
    }

    /// Append a presentational Status badge column derived from the expiry
    /// and quantity columns. It is the trailing column by convention and the
    /// exporter drops it.
    pub fn append_status_column(table: &mut DataTable, thresholds: &StatusThresholds) {
        if table.get_column_index("Status").is_some() {
            return;
        }

        let expiry_col = table
            .get_column_index("Expiry")
            .or_else(|| table.get_column_index("expiry"))
            .or_else(|| table.get_column_index("expiry_date"));
        let qty_col = table
            .get_column_index("Quantity")
            .or_else(|| table.get_column_index("Qty"))
            .or_else(|| table.get_column_index("quantity"));

        debug!(
            "Deriving Status column (expiry col {:?}, quantity col {:?})",
            expiry_col, qty_col
        );

        let badges: Vec<DataValue> = (0..table.row_count())
            .map(|row| {
                let expiry = expiry_col.and_then(|c| table.get_value(row, c)).cloned();
                let quantity = qty_col.and_then(|c| table.get_value(row, c)).cloned();
                let status = ItemStatus::evaluate(expiry.as_ref(), quantity.as_ref(), thresholds);
                DataValue::String(status.label().to_string())
            })
            .collect();

        table.add_column(DataColumn::new("Status"));
        for (row, badge) in badges.into_iter().enumerate() {
            table.rows[row].values.push(badge);
        }
    }
}
