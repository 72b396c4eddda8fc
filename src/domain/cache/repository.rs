//! Cache trait definition

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::domain::DomainError;

/// Key/value cache with an independent TTL per entry
///
/// This trait uses JSON strings internally to be dyn-compatible.
/// Use the helper methods for typed get/set operations.
#[async_trait]
pub trait Cache: Send + Sync + Debug {
    /// Gets a raw JSON value from the cache
    ///
    /// Missing and expired keys yield `Ok(None)`.
    async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Sets a raw JSON value in the cache with a TTL
    ///
    /// TTLs are honoured to millisecond precision by every backend.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError>;

    /// Removes a value from the cache, returning whether it existed
    async fn delete(&self, key: &str) -> Result<bool, DomainError>;

    /// Checks if a key exists in the cache
    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        Ok(self.get_raw(key).await?.is_some())
    }

    /// Gets the remaining TTL for a key
    async fn ttl(&self, key: &str) -> Result<Option<Duration>, DomainError>;

    /// Round-trips a sentinel to verify the backend is reachable
    async fn ping(&self) -> Result<(), DomainError> {
        self.exists("__ping__").await.map(|_| ())
    }
}

/// Extension trait providing typed get/set operations
pub trait CacheExt: Cache {
    /// Gets a typed value from the cache
    fn get<'a, V>(
        &'a self,
        key: &'a str,
    ) -> impl std::future::Future<Output = Result<Option<V>, DomainError>> + Send
    where
        V: DeserializeOwned + Send,
    {
        async move {
            match self.get_raw(key).await? {
                Some(data) => {
                    let value: V = serde_json::from_str(&data).map_err(|e| {
                        DomainError::cache(format!(
                            "Failed to deserialize cache value for '{}': {}",
                            key, e
                        ))
                    })?;
                    Ok(Some(value))
                }
                None => Ok(None),
            }
        }
    }

    /// Sets a typed value in the cache with a TTL
    fn set<'a, V>(
        &'a self,
        key: &'a str,
        value: &'a V,
        ttl: Duration,
    ) -> impl std::future::Future<Output = Result<(), DomainError>> + Send
    where
        V: Serialize + Send + Sync,
    {
        async move {
            let data = serde_json::to_string(value).map_err(|e| {
                DomainError::cache(format!(
                    "Failed to serialize cache value for '{}': {}",
                    key, e
                ))
            })?;
            self.set_raw(key, &data, ttl).await
        }
    }

    /// Removes a value from the cache
    fn remove<'a>(
        &'a self,
        key: &'a str,
    ) -> impl std::future::Future<Output = Result<(), DomainError>> + Send {
        async move { self.delete(key).await.map(|_| ()) }
    }
}

// Blanket implementation for all types implementing Cache
impl<T: Cache + ?Sized> CacheExt for T {}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock cache for testing
    ///
    /// Records the TTL of every write and counts every call so tests can
    /// assert that a code path never touched the cache.
    #[derive(Debug)]
    pub struct MockCache {
        entries: Mutex<HashMap<String, (String, Option<Duration>)>>,
        error: Mutex<Option<String>>,
        failing_key: Mutex<Option<String>>,
        set_error: Mutex<Option<String>>,
        calls: Mutex<usize>,
        writes: Mutex<Vec<String>>,
    }

    impl Default for MockCache {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockCache {
        pub fn new() -> Self {
            Self {
                entries: Mutex::new(HashMap::new()),
                error: Mutex::new(None),
                failing_key: Mutex::new(None),
                set_error: Mutex::new(None),
                calls: Mutex::new(0),
                writes: Mutex::new(Vec::new()),
            }
        }

        pub fn with_entry<V: Serialize>(self, key: &str, value: &V, ttl: Option<Duration>) -> Self {
            let json = serde_json::to_string(value).unwrap();
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), (json, ttl));
            self
        }

        pub fn with_raw_entry(self, key: &str, raw: &str) -> Self {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), (raw.to_string(), None));
            self
        }

        /// Fails every operation
        pub fn with_error(self, error: impl Into<String>) -> Self {
            *self.error.lock().unwrap() = Some(error.into());
            self
        }

        /// Fails writes only
        pub fn with_set_error(self, error: impl Into<String>) -> Self {
            *self.set_error.lock().unwrap() = Some(error.into());
            self
        }

        /// Fails writes to a single key
        pub fn with_failing_key(self, key: impl Into<String>) -> Self {
            *self.failing_key.lock().unwrap() = Some(key.into());
            self
        }

        pub fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }

        /// Keys written so far, in write order
        pub fn writes(&self) -> Vec<String> {
            self.writes.lock().unwrap().clone()
        }

        pub fn entry<V: DeserializeOwned>(&self, key: &str) -> Option<V> {
            self.entries
                .lock()
                .unwrap()
                .get(key)
                .map(|(json, _)| serde_json::from_str(json).unwrap())
        }

        pub fn entry_ttl(&self, key: &str) -> Option<Duration> {
            self.entries
                .lock()
                .unwrap()
                .get(key)
                .and_then(|(_, ttl)| *ttl)
        }

        fn check_error(&self) -> Result<(), DomainError> {
            *self.calls.lock().unwrap() += 1;

            if let Some(error) = self.error.lock().unwrap().clone() {
                return Err(DomainError::cache(error));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl Cache for MockCache {
        async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError> {
            self.check_error()?;
            let entries = self.entries.lock().unwrap();

            Ok(entries.get(key).map(|(json, _)| json.clone()))
        }

        async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError> {
            self.check_error()?;

            if let Some(error) = self.set_error.lock().unwrap().clone() {
                return Err(DomainError::cache(error));
            }

            if self.failing_key.lock().unwrap().as_deref() == Some(key) {
                return Err(DomainError::cache(format!("Failed to set key '{}'", key)));
            }

            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), (value.to_string(), Some(ttl)));
            self.writes.lock().unwrap().push(key.to_string());
            Ok(())
        }

        async fn delete(&self, key: &str) -> Result<bool, DomainError> {
            self.check_error()?;
            Ok(self.entries.lock().unwrap().remove(key).is_some())
        }

        async fn ttl(&self, key: &str) -> Result<Option<Duration>, DomainError> {
            self.check_error()?;
            Ok(self.entry_ttl(key))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_cache_set_get() {
            let cache = MockCache::new();
            cache
                .set("key1", &"value1", Duration::from_secs(60))
                .await
                .unwrap();

            let result: Option<String> = cache.get("key1").await.unwrap();
            assert_eq!(result, Some("value1".to_string()));
            assert_eq!(cache.entry_ttl("key1"), Some(Duration::from_secs(60)));
        }

        #[tokio::test]
        async fn test_mock_cache_get_missing() {
            let cache = MockCache::new();

            let result: Option<String> = cache.get("missing").await.unwrap();
            assert!(result.is_none());
        }

        #[tokio::test]
        async fn test_mock_cache_remove() {
            let cache = MockCache::new();
            cache
                .set("key1", &"value1", Duration::from_secs(60))
                .await
                .unwrap();

            cache.remove("key1").await.unwrap();

            let result: Option<String> = cache.get("key1").await.unwrap();
            assert!(result.is_none());
        }

        #[tokio::test]
        async fn test_mock_cache_with_error() {
            let cache = MockCache::new().with_error("Test error");

            let result: Result<Option<String>, _> = cache.get("key").await;
            assert!(result.is_err());
            assert_eq!(cache.calls(), 1);
        }

        #[tokio::test]
        async fn test_mock_cache_failing_key() {
            let cache = MockCache::new().with_failing_key("bad");

            cache
                .set("good", &1, Duration::from_secs(1))
                .await
                .unwrap();
            assert!(cache.set("bad", &2, Duration::from_secs(1)).await.is_err());
            assert_eq!(cache.writes(), vec!["good".to_string()]);
        }

        #[tokio::test]
        async fn test_typed_get_reports_corrupt_value() {
            let cache = MockCache::new().with_raw_entry("key", "{not json");

            let result: Result<Option<u32>, _> = cache.get("key").await;
            let err = result.unwrap_err();
            assert!(matches!(err, DomainError::Cache { .. }));
            assert!(err.to_string().contains("'key'"));
        }
    }
}
