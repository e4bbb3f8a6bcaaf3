pub mod tui;

pub use tui::create_progress_bar;
