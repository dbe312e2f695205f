//! Setlist CLI Library
//!
//! Terminal front-end for the Setlist catalog. Holds configuration loading and
//! the gated commands; `main.rs` only parses arguments and prints results.

pub mod app;
pub mod config;
pub mod error;
pub mod navigator;

pub use app::{App, SongChanges, Status};
pub use config::CliConfig;
pub use error::{CliError, Result};
pub use navigator::TerminalNavigator;
