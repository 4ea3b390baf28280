//! Logging for the dataset splitter
//!
//! This module provides:
//! - Bracketed log formatting with span context
//! - stderr output, plus an optional timestamped log file

mod formatter;
mod setup;

pub use setup::setup_logging;
