//! Asynchronous status notifications.

pub mod dispatcher;
pub mod message;

pub use dispatcher::NotificationDispatcher;
pub use message::{NotificationMessage, Priority};
