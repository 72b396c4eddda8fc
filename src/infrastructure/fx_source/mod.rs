//! Upstream rate sources

mod fastforex;

pub use fastforex::{FastForexConfig, FastForexSource, FASTFOREX_API_URL, SUPPORTED_FIAT_CURRENCIES};
