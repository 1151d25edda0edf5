//! Error types for the ban store.

use thiserror::Error;

/// Errors surfaced by ban store operations.
///
/// Read-path corruption never appears here; it is logged and healed.
/// What remains are failures to touch the file at all, or to write it.
#[derive(Debug, Error)]
pub enum BanStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl BanStoreError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "io_error",
            Self::Serialize(_) => "serialize_error",
        }
    }
}

/// Result type for ban store operations.
pub type BanStoreResult<T> = Result<T, BanStoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let io = BanStoreError::from(std::io::Error::other("disk full"));
        assert_eq!(io.error_code(), "io_error");
        assert!(io.to_string().contains("disk full"));

        let ser = BanStoreError::from(serde_json::from_str::<u8>("x").unwrap_err());
        assert_eq!(ser.error_code(), "serialize_error");
    }
}
