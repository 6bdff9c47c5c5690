//! # User Interface
//!
//! Colored terminal output with clickable file links, prompts and reports.

pub mod log;
pub mod prompt;
pub mod report;

pub use log::{debug, error, format_size, header, info, path_link, success, warn, Log};
