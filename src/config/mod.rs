//! Configuration management module.

pub mod paths;
pub mod store;

pub use store::{ConfigStore, FromConfigValue};
