//! Data layer for the DataTable/TableView architecture
//!
//! This module separates data storage from presentation: the table stores
//! cells, the view owns visibility and display order, and the exporter and
//! loaders work against those two.

pub mod data_exporter;
pub mod datatable;
pub mod datavalue_compare;
pub mod loaders;
pub mod table_view;
