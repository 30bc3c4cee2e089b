//! Service Layer
//!
//! Application services that wrap the domain filter with metrics and logging.

pub mod filter_service;

pub use filter_service::FilterService;
