use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not authorized: {message}")]
    NotAuthorized { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Too many requests: {message}")]
    TooManyRequests { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Cache error: {message}")]
    Cache { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Provider error: {provider} - {message}")]
    Provider { provider: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Caller-facing classification of a [`DomainError`]
///
/// Transport and serialization failures of any collaborator (cache, store,
/// upstream source) collapse into `Internal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotAuthorized,
    NotFound,
    TooManyRequests,
    InvalidParameter,
    Internal,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAuthorized => write!(f, "not_authorized"),
            Self::NotFound => write!(f, "not_found"),
            Self::TooManyRequests => write!(f, "too_many_requests"),
            Self::InvalidParameter => write!(f, "invalid_parameter"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

impl DomainError {
    pub fn not_authorized(message: impl Into<String>) -> Self {
        Self::NotAuthorized {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn too_many_requests(message: impl Into<String>) -> Self {
        Self::TooManyRequests {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn cache(message: impl Into<String>) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Classifies this error for callers
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotAuthorized { .. } => ErrorKind::NotAuthorized,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::TooManyRequests { .. } => ErrorKind::TooManyRequests,
            Self::Validation { .. } => ErrorKind::InvalidParameter,
            Self::Cache { .. }
            | Self::Storage { .. }
            | Self::Provider { .. }
            | Self::Configuration { .. }
            | Self::Internal { .. } => ErrorKind::Internal,
        }
    }
}
