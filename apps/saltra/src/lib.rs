//! Typed data-access layer for the Saltra leads dashboard.
//!
//! `ApiClient` wraps the backend REST API: one async method per resource, all
//! funnelled through a single request helper that fails fast with `ApiError`.
//! The `leads` and `models` modules hold the entity shapes and the lead field
//! constraints.

pub mod api;
pub mod client;
pub mod config;
pub mod errors;
pub mod leads;
pub mod models;

pub use api::{LeadPage, LeadQuery};
pub use client::{ApiClient, CachePolicy, RequestOptions};
pub use config::Config;
pub use errors::{ApiError, ErrorKind};
