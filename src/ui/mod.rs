//! Terminal UI: a full-screen game view driven by key presses.

mod app;
pub mod board_widget;
mod game_view;

pub use app::{App, SessionEnd};
pub use game_view::Notice;
