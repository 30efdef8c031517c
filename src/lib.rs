pub mod config;
pub mod data;
pub mod debouncer;
pub mod logging;
pub mod notifications;
pub mod status;
pub mod tui;
pub mod view_controller;
