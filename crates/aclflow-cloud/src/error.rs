//! Store layer error types

use aclflow_core::ValidationError;
use thiserror::Error;

/// ACL store errors
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Invalid ACL policy: {0}")]
    InvalidAcl(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CloudError {
    /// Collapse a validation error list into a single store error.
    pub fn invalid_acl(errors: &[ValidationError]) -> Self {
        let joined = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Self::InvalidAcl(joined)
    }
}

pub type Result<T> = std::result::Result<T, CloudError>;
