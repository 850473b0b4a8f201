//! egui rendering for message rows.
//!
//! - `message_row`: draws a derived view and reports clicks
//! - `theme`: colour schemes

pub mod message_row;
pub mod theme;

pub use message_row::render_row;
pub use theme::RowTheme;
