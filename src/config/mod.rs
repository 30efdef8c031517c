//! Configuration module
//!
//! Settings and key bindings, persisted as TOML under the platform config
//! directory.

pub mod config;
pub mod key_bindings;
