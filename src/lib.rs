//! Message row library.
//!
//! A chat message row that follows a shared message store through its event
//! stream, derives what to show, and turns clicks into dispatcher intents.

pub mod app;
pub mod config;
pub mod demo;
pub mod dispatch;
pub mod message;
pub mod protocol;
pub mod row;
pub mod store;
pub mod ui;
