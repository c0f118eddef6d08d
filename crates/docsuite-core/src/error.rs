//! Application-wide error type.
//!
//! Every crate in the workspace funnels its failures into [`AppError`];
//! the API layer is the only place that turns one into an HTTP status.

use std::fmt;
use thiserror::Error;

/// Broad failure category carried by every [`AppError`].
///
/// The HTTP mapping lives in `docsuite-api`; everything below that layer
/// only decides the kind and a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Request payload or parameters failed validation.
    Validation,
    /// Missing or unusable credentials.
    Authentication,
    /// Authenticated caller lacks the required role.
    Authorization,
    /// Referenced entity does not exist (or is outside the caller's view).
    NotFound,
    /// Unique-key collision: duplicate group name, duplicate grant triple.
    Conflict,
    /// Query or transaction failure reported by Postgres.
    Database,
    /// Redis or in-memory cache failure.
    Cache,
    /// Filesystem access failure (attachment reads, mostly).
    Storage,
    /// JSON encode/decode failure.
    Serialization,
    /// Bad or missing configuration at startup.
    Configuration,
    /// Dependency is down; the caller may retry later.
    ServiceUnavailable,
    /// Anything we did not anticipate. Logged, never shown verbatim.
    Internal,
}

impl ErrorKind {
    /// Stable tag used in logs and API error bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION",
            Self::Authentication => "AUTHENTICATION",
            Self::Authorization => "AUTHORIZATION",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::Database => "DATABASE",
            Self::Cache => "CACHE",
            Self::Storage => "STORAGE",
            Self::Serialization => "SERIALIZATION",
            Self::Configuration => "CONFIGURATION",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The error type returned by every fallible operation in the workspace.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
    /// Underlying cause, kept for logging. Dropped on clone.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

macro_rules! kind_constructors {
    ($($(#[$doc:meta])* $name:ident => $kind:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $name(message: impl Into<String>) -> Self {
                Self::new(ErrorKind::$kind, message)
            }
        )*
    };
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Like [`AppError::new`] but retaining the original error as `source`.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        let mut err = Self::new(kind, message);
        err.source = Some(Box::new(source));
        err
    }

    kind_constructors! {
        /// Shorthand for a [`ErrorKind::Validation`] error.
        validation => Validation,
        /// Shorthand for a [`ErrorKind::Authentication`] error.
        authentication => Authentication,
        /// Shorthand for a [`ErrorKind::Authorization`] error.
        authorization => Authorization,
        /// Shorthand for a [`ErrorKind::NotFound`] error.
        not_found => NotFound,
        /// Shorthand for a [`ErrorKind::Conflict`] error.
        conflict => Conflict,
        /// Shorthand for a [`ErrorKind::Database`] error.
        database => Database,
        /// Shorthand for a [`ErrorKind::Cache`] error.
        cache => Cache,
        /// Shorthand for a [`ErrorKind::Storage`] error.
        storage => Storage,
        /// Shorthand for a [`ErrorKind::Configuration`] error.
        configuration => Configuration,
        /// Shorthand for a [`ErrorKind::ServiceUnavailable`] error.
        service_unavailable => ServiceUnavailable,
        /// Shorthand for a [`ErrorKind::Internal`] error.
        internal => Internal,
    }
}

// Manual impl: boxed sources are not Clone, so a clone carries the kind
// and message only.
impl Clone for AppError {
    fn clone(&self) -> Self {
        Self::new(self.kind, self.message.clone())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorKind::Serialization, err.to_string(), err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Storage, err.to_string(), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(ErrorKind::Configuration, err.to_string(), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_tag_and_message() {
        let err = AppError::conflict("group name already taken");
        assert_eq!(err.to_string(), "CONFLICT: group name already taken");
    }

    #[test]
    fn clone_drops_source_but_keeps_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = AppError::with_source(ErrorKind::Storage, "attachment missing", io);
        let cloned = err.clone();
        assert_eq!(cloned.kind, ErrorKind::Storage);
        assert!(cloned.source.is_none());
    }
}
