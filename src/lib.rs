pub mod account;
pub mod cli;
pub mod config;
pub mod http;
pub mod notify;
pub mod otp;
pub mod registry;
pub mod telemetry;
