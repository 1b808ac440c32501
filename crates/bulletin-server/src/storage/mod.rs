//! Storage layer
//!
//! A single SQLite file holding the `events` table.

pub mod db;

pub use db::Database;
