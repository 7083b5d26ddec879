//! Validation errors for ACL policy documents

use thiserror::Error;

/// A single structural defect found while validating a policy document.
///
/// Validation is not fail-fast: `parse` returns every defect it finds in one
/// list. The exception is `Malformed`, which short-circuits everything else
/// because no structure can be inspected at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("malformed policy document: {0}")]
    Malformed(String),

    #[error("Owner block is missing")]
    MissingOwner,

    #[error("Owner has no ID")]
    MissingOwnerId,

    #[error("AccessControlList contains no Grant entries")]
    NoGrants,

    #[error("Grant has no Grantee")]
    MissingGrantee,

    #[error("Grantee has no type attribute")]
    MissingGranteeType,

    #[error("unrecognized grantee type: {0:?}")]
    UnknownGranteeType(String),

    #[error("grantee of type \"user\" has no ID")]
    MissingGranteeId,

    #[error("grantee of type \"anonymous\" has no URI")]
    MissingGranteeUri,

    #[error("Grant has no Permission")]
    MissingPermission,

    #[error("unrecognized permission: {0:?}")]
    UnknownPermission(String),
}

impl From<quick_xml::Error> for ValidationError {
    fn from(err: quick_xml::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for ValidationError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Self::Malformed(err.to_string())
    }
}

impl From<quick_xml::escape::EscapeError> for ValidationError {
    fn from(err: quick_xml::escape::EscapeError) -> Self {
        Self::Malformed(err.to_string())
    }
}
