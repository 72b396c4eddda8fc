//! Infrastructure layer - External service implementations

pub mod api_key;
pub mod cache;
pub mod fx_source;
pub mod logging;
pub mod observability;
pub mod quote;
