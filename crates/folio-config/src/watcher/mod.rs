//! File watcher for live config and preference reload.
//!
//! Uses the `notify` crate to watch a single file for changes,
//! with a debounce window to avoid rapid reloads.

mod file_watcher;


pub use file_watcher::{FileWatcher, DEFAULT_DEBOUNCE};
