//! Logging module for the dataset split tool
//!
//! This module provides:
//! - Custom log formatting with bracketed output
//! - Dual logging (file + stderr)
//! - Log file management with timestamps

mod formatter;
mod setup;

// Re-export the public API
pub use setup::setup_logging;
