//! API key infrastructure
//!
//! Quota admission plus the persistent store adapters behind it.

mod factory;
mod gate;
mod postgres_repository;
mod repository;

pub use factory::{create_api_key_repository, ApiKeySeed, StoreConfig, StoreType};
pub use gate::ApiKeyGate;
pub use postgres_repository::PostgresApiKeyRepository;
pub use repository::InMemoryApiKeyRepository;
