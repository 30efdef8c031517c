use std::sync::Arc;

use inventory_tui::data::datatable::{DataColumn, DataRow, DataTable, DataValue};
use inventory_tui::data::table_view::TableView;

fn pantry_table() -> DataTable {
    let mut table = DataTable::new("pantry");
    table.add_column(DataColumn::new("Name"));
    table.add_column(DataColumn::new("Quantity"));
    table.add_column(DataColumn::new("Status"));

    let rows = [
        ("Milk, 2%", 3, "Good"),
        ("Eggs", 12, "Good"),
        ("Butter", 1, "Low Stock"),
        ("Oat milk", 2, "Expiring"),
    ];
    for (name, qty, status) in rows {
        table
            .add_row(DataRow::new(vec![
                DataValue::String(name.to_string()),
                DataValue::Integer(qty),
                DataValue::String(status.to_string()),
            ]))
            .unwrap();
    }
    table
}

fn visible_names(view: &TableView) -> Vec<String> {
    (0..view.row_count())
        .filter_map(|i| view.get_row(i))
        .map(|r| r.values[0].to_string())
        .collect()
}

#[test]
fn test_filter_is_case_insensitive_substring() {
    let mut view = TableView::new(Arc::new(pantry_table()));

    view.apply_text_filter("MILK");
    assert_eq!(visible_names(&view), vec!["Milk, 2%", "Oat milk"]);

    // Matches can come from any cell, not just the name
    view.apply_text_filter("low stock");
    assert_eq!(visible_names(&view), vec!["Butter"]);
}

#[test]
fn test_empty_query_shows_all_rows() {
    let mut view = TableView::new(Arc::new(pantry_table()));
    view.apply_text_filter("eggs");
    assert_eq!(view.row_count(), 1);

    view.apply_text_filter("");
    assert_eq!(view.row_count(), 4);
    assert!(!view.empty_state());
}

#[test]
fn test_empty_state_is_single_and_idempotent() {
    let mut view = TableView::new(Arc::new(pantry_table()));

    view.apply_text_filter("no such item");
    assert_eq!(view.row_count(), 0);
    assert!(view.empty_state());

    // A second zero-result pass must not stack a second placeholder
    view.apply_text_filter("still nothing");
    assert_eq!(view.row_count(), 0);
    assert!(view.empty_state());

    // The placeholder clears once matches reappear
    view.apply_text_filter("eggs");
    assert!(!view.empty_state());
    assert_eq!(view.row_count(), 1);
}

#[test]
fn test_sort_desc_reverses_asc_without_ties() {
    let mut view = TableView::new(Arc::new(pantry_table()));

    view.apply_sort(1, true).unwrap();
    let ascending = visible_names(&view);
    assert_eq!(ascending, vec!["Butter", "Oat milk", "Milk, 2%", "Eggs"]);

    view.apply_sort(1, false).unwrap();
    let descending = visible_names(&view);
    let mut reversed = ascending.clone();
    reversed.reverse();
    assert_eq!(descending, reversed);
}

#[test]
fn test_numeric_strings_sort_numerically() {
    let mut table = DataTable::new("quantities");
    table.add_column(DataColumn::new("Qty"));
    for s in ["9", "10", "2"] {
        table
            .add_row(DataRow::new(vec![DataValue::String(s.to_string())]))
            .unwrap();
    }

    let mut view = TableView::new(Arc::new(table));
    view.apply_sort(0, true).unwrap();

    let order: Vec<String> = (0..view.row_count())
        .filter_map(|i| view.get_row(i))
        .map(|r| r.values[0].to_string())
        .collect();
    assert_eq!(order, vec!["2", "9", "10"]);
}

#[test]
fn test_sort_out_of_range_column_is_an_error() {
    let mut view = TableView::new(Arc::new(pantry_table()));
    assert!(view.apply_sort(99, true).is_err());
    // The view is untouched by the failed sort
    assert_eq!(view.row_count(), 4);
    assert!(view.sort_key().is_none());
}

#[test]
fn test_sort_survives_filter_changes() {
    let mut view = TableView::new(Arc::new(pantry_table()));
    view.apply_sort(1, false).unwrap();
    view.apply_text_filter("milk");
    assert_eq!(visible_names(&view), vec!["Milk, 2%", "Oat milk"]);

    view.apply_text_filter("");
    assert_eq!(visible_names(&view), vec!["Eggs", "Milk, 2%", "Oat milk", "Butter"]);
}

#[test]
fn test_sort_is_stable_for_equal_keys() {
    let mut table = DataTable::new("ties");
    table.add_column(DataColumn::new("Name"));
    table.add_column(DataColumn::new("Qty"));
    for (name, qty) in [("a", 1), ("b", 1), ("c", 1), ("d", 0)] {
        table
            .add_row(DataRow::new(vec![
                DataValue::String(name.to_string()),
                DataValue::Integer(qty),
            ]))
            .unwrap();
    }

    let mut view = TableView::new(Arc::new(table));
    view.apply_sort(1, true).unwrap();
    assert_eq!(visible_names(&view), vec!["d", "a", "b", "c"]);
}
