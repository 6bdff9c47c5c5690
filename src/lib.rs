//! # vmreap Library
//!
//! Reconciles the VM files a Hyper-V host has registered against the files
//! present on disk, reports orphans with a best guess at their former owner,
//! and deletes them under per-file confirmation.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod deletion;
pub mod error;
pub mod host;
pub mod reconcile;
pub mod ui;
