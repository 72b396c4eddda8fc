//! Cache domain - time-boxed key/value port shared by quotas and rates

mod key;
mod repository;

pub use key::{api_key_key, rate_key};
pub use repository::{Cache, CacheExt};

#[cfg(test)]
pub use repository::mock::MockCache;
