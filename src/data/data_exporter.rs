use anyhow::{anyhow, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::data::table_view::TableView;

/// Default filename used when the caller does not pick one
pub const DEFAULT_EXPORT_FILENAME: &str = "inventory.csv";

/// Writes the visible rows of a view out as CSV or plain text
pub struct DataExporter;

impl DataExporter {
    /// Export the currently visible rows of a view to a CSV file.
    ///
    /// The header line carries every column name. Data lines drop the last
    /// column, which by table convention holds presentational
    /// status/action content rather than data.
    pub fn export_to_csv<P: AsRef<Path>>(view: &TableView, path: P) -> Result<String> {
        let path = path.as_ref();
        let csv = Self::csv_text(view)?;

        let mut file = File::create(path)?;
        file.write_all(csv.as_bytes())?;

        info!(
            "Exported {} visible rows to {}",
            view.row_count(),
            path.display()
        );
        Ok(format!(
            "Exported {} rows to {}",
            view.row_count(),
            path.display()
        ))
    }

    /// Build the CSV document for the visible rows of a view.
    ///
    /// Fields containing a comma are wrapped in double quotes with embedded
    /// quotes doubled. Embedded newlines are not escaped; inventory cells
    /// are single-line by construction.
    pub fn csv_text(view: &TableView) -> Result<String> {
        let headers = view.column_names();
        if headers.is_empty() {
            return Err(anyhow!("No table to export"));
        }

        let mut lines = Vec::with_capacity(view.row_count() + 1);
        lines.push(headers.join(","));

        let data_columns = headers.len().saturating_sub(1);
        for i in 0..view.row_count() {
            if let Some(row) = view.get_row(i) {
                let fields: Vec<String> = row
                    .values
                    .iter()
                    .take(data_columns)
                    .map(|v| Self::escape_csv_field(&v.to_string()))
                    .collect();
                lines.push(fields.join(","));
            }
        }

        Ok(lines.join("\n"))
    }

    /// Plain-text listing of the visible rows, used for the print path.
    /// No layout beyond aligned columns.
    pub fn print_text(view: &TableView) -> String {
        let headers = view.column_names();
        let mut rows: Vec<Vec<String>> = vec![headers.clone()];
        for i in 0..view.row_count() {
            if let Some(row) = view.get_row(i) {
                rows.push(row.values.iter().map(|v| v.to_string()).collect());
            }
        }

        let mut widths = vec![0usize; headers.len()];
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.len());
                }
            }
        }

        let mut out = String::new();
        for (r, row) in rows.iter().enumerate() {
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    out.push_str("  ");
                }
                out.push_str(&format!("{:<width$}", cell, width = widths[i]));
            }
            out.push('\n');
            if r == 0 {
                let total: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
                out.push_str(&"-".repeat(total));
                out.push('\n');
            }
        }
        out
    }

    /// Quote a field only when it contains a comma, doubling any embedded
    /// double quotes inside the wrapped field
    fn escape_csv_field(field: &str) -> String {
        if field.contains(',') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_only_on_comma() {
        assert_eq!(DataExporter::escape_csv_field("Milk"), "Milk");
        assert_eq!(DataExporter::escape_csv_field("Milk, 2%"), "\"Milk, 2%\"");
        assert_eq!(
            DataExporter::escape_csv_field("say \"hi\", ok"),
            "\"say \"\"hi\"\", ok\""
        );
        // A quote without a comma stays unwrapped
        assert_eq!(DataExporter::escape_csv_field("6\" pan"), "6\" pan");
    }
}
