//! UI layer: one panel per wizard step plus the blocking notice dialog.

pub mod app;

pub use app::EntryGuiApp;
