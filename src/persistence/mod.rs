//! Persistence layer: the calendar lives in a single JSON document on disk.
//!
//! The whole mapping is read once at startup and rewritten in full after
//! every successful mutation; there is no incremental persistence.

pub mod json_file;

pub use json_file::JsonFileStorage;
