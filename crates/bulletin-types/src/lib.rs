//! Bulletin Types - Pure type definitions shared by the bulletin service
//!
//! This crate contains only data types and their JSON shapes, with no async
//! runtime or database dependencies.

pub mod event;
pub mod message;

pub use event::*;
pub use message::*;
