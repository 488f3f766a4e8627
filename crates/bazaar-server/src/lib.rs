#![forbid(unsafe_code)]

//! HTTP surface and services for the bazaar e-commerce backend.

mod config;
mod http;
pub mod services;

pub use config::ApiConfig;
pub use http::{build_router, AppState};
