//! Quote infrastructure - the cache-backed read path and the rate updater

mod reader;
mod service;
mod updater;

pub use reader::QuoteReader;
pub use service::{QuoteService, UsageRecordingPolicy};
pub use updater::{QuoteUpdater, UpdaterConfig, UPDATE_INTERVAL};
