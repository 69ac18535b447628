//! Command Line Interface module
//!
//! One submodule per command:
//! - `search`: Track search with live/fallback source reporting
//! - `suggest`: Autocomplete suggestions for a query prefix
//! - `config`: Show and manage configuration

pub mod config;
pub mod search;
pub mod suggest;
