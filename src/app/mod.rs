//! Demo chat screen hosting a list of message rows.
//!
//! - `core`: MessageListApp and row list reconciliation
//! - `events`: per-frame intent application and row event processing
//! - `update`: eframe update loop, shortcuts and rendering

pub mod core;
pub mod events;
pub mod update;

pub use core::MessageListApp;
