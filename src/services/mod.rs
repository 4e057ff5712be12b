//! External service interactions
//!
//! This module contains services for interacting with external systems:
//! - Durable key-value storage for contacts and history
//! - System clipboard
//! - Export file writing

pub mod clipboard;
pub mod export;
pub mod storage;

pub use clipboard::copy_to_clipboard;
pub use export::{csv_export_filename, json_export_filename, write_export};
pub use storage::{FileStore, KvStore, MemoryStore};
