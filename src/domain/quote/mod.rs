//! Quote domain - currency pairs, cached rates and the upstream source port

mod entity;
mod pair;
mod source;

pub use entity::{CachedRate, QuoteResponse, RateResult, UpstreamRate};
pub use pair::{parse_pair_list, CurrencyPair};
pub use source::{RateSource, DEFAULT_BASE_CURRENCIES};

#[cfg(test)]
pub use source::MockRateSource;
