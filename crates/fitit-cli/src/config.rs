//! Layered configuration: built-in defaults, then the TOML config file, then `--set` values,
//! then dedicated command-line flags.

pub mod builder;
pub mod defaults;
pub mod file;
pub mod models;
