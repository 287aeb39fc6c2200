//! HTTP transport collaborator.

pub mod client;

pub use client::{HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, ReqwestClient};
