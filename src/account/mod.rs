//! Account lifecycle and code generation.

pub mod manager;

pub use manager::{AccountManager, CODE_DIGITS, TIME_STEP_SECS};
