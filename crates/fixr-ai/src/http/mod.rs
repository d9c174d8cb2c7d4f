//! HTTP transport to the AI backend.
//!
//! Implements `MessageTransport` over the backend's JSON chat endpoint
//! and multipart image-analysis endpoint.

mod api;
mod client;
mod config;
mod decode;

pub use client::HttpTransport;
pub use config::HttpTransportConfig;
