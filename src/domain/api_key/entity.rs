//! API Key entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Quota tier of an API key
///
/// Stored as a small integer code in the persistent store (0, 1, 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApiKeyTier {
    #[default]
    Undefined,
    Unlimited,
    Limited,
}

impl ApiKeyTier {
    /// Maps a store code to a tier; unknown codes are `Undefined`
    pub fn from_code(code: i16) -> Self {
        match code {
            1 => Self::Unlimited,
            2 => Self::Limited,
            _ => Self::Undefined,
        }
    }

    pub fn code(&self) -> i16 {
        match self {
            Self::Undefined => 0,
            Self::Unlimited => 1,
            Self::Limited => 2,
        }
    }

    /// Whether requests under this tier count against the quota
    ///
    /// Only `Limited` is enforced; `Undefined` passes like `Unlimited`.
    pub fn is_limited(&self) -> bool {
        matches!(self, Self::Limited)
    }
}

impl std::fmt::Display for ApiKeyTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Undefined => write!(f, "undefined"),
            Self::Unlimited => write!(f, "unlimited"),
            Self::Limited => write!(f, "limited"),
        }
    }
}

/// Durable API key record, owned by the persistent store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiKey {
    /// Surrogate row id
    pub id: i64,
    /// Identifier presented by clients
    pub api_key_id: String,
    pub user_id: String,
    pub tier: ApiKeyTier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<DateTime<Utc>>,
}

impl ApiKey {
    pub fn new(api_key_id: impl Into<String>, user_id: impl Into<String>, tier: ApiKeyTier) -> Self {
        Self {
            id: 0,
            api_key_id: api_key_id.into(),
            user_id: user_id.into(),
            tier,
            expiration: None,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn with_expiration(mut self, expiration: DateTime<Utc>) -> Self {
        self.expiration = Some(expiration);
        self
    }
}
