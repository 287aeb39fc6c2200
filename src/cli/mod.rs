//! Command-line surface.

pub mod app;

pub use app::Cli;
