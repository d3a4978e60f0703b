//! # Store Error Types
//!
//! Error types for storage operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds path/key context                      │
//! │       │                                                                 │
//! │       ├── load: logged, field falls back to its default                 │
//! │       │                                                                 │
//! │       └── save: returned to the form controller, which logs it          │
//! │                                                                         │
//! │  Nothing here ever stops the form from rendering.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A value could not be encoded as JSON.
    #[error("Failed to serialize {what}: {source}")]
    Serialize {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    /// Stored data exists but cannot be decoded.
    ///
    /// ## When This Occurs
    /// - The store file was hand-edited or truncated
    /// - A line item list is not a JSON array
    /// - A tax rate is not a number, or is negative
    #[error("Corrupt data in {location}: {reason}")]
    Corrupt { location: String, reason: String },
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::Corrupt {
            location: "invoice-tax-rate".to_string(),
            reason: "not a number".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Corrupt data in invoice-tax-rate: not a number"
        );

        let err = StoreError::Io {
            path: PathBuf::from("/tmp/invoice.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "I/O error on /tmp/invoice.json: denied");
    }
}
