//! ACL policy parser and validator
//!
//! Parsing happens in two stages: a lenient event walk over the raw markup
//! (`raw` module) followed by validation into the typed model. Validation is
//! not fail-fast — every structural defect is collected and returned in one
//! list, so a user fixing a hand-written policy sees all problems at once.
//! Only unparsable markup short-circuits to a single error.

mod raw;

use crate::error::ValidationError;
use crate::model::{AclDocument, Grant, Grantee, GranteeType, Owner, Permission};

/// Parse and validate a raw policy document.
///
/// On success the returned document preserves the original grant order; use
/// [`crate::canonicalize`] to normalize it. Pure function over its input.
pub fn parse(text: &str) -> Result<AclDocument, Vec<ValidationError>> {
    let policy = match raw::read_document(text) {
        Ok(Some(policy)) => policy,
        Ok(None) => {
            return Err(vec![ValidationError::Malformed(
                "missing <AccessControlPolicy> root element".to_string(),
            )]);
        }
        Err(err) => return Err(vec![err]),
    };

    let doc = validate(policy)?;
    tracing::debug!("parsed ACL policy with {} grants", doc.grants.len());
    Ok(doc)
}

fn validate(policy: raw::RawPolicy) -> Result<AclDocument, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let owner = match policy.owner {
        None => {
            errors.push(ValidationError::MissingOwner);
            None
        }
        Some(owner) => match owner.id.filter(|id| !id.is_empty()) {
            None => {
                errors.push(ValidationError::MissingOwnerId);
                None
            }
            Some(id) => Some(Owner {
                id,
                display_name: owner.display_name,
            }),
        },
    };

    let raw_grants = policy.acl.map(|acl| acl.grants).unwrap_or_default();
    if raw_grants.is_empty() {
        errors.push(ValidationError::NoGrants);
    }

    let mut grants = Vec::with_capacity(raw_grants.len());
    for raw_grant in raw_grants {
        let grantee = validate_grantee(raw_grant.grantee, &mut errors);

        let permission = match raw_grant.permission {
            None => {
                errors.push(ValidationError::MissingPermission);
                None
            }
            Some(value) => match Permission::parse(&value) {
                None => {
                    errors.push(ValidationError::UnknownPermission(value));
                    None
                }
                Some(permission) => Some(permission),
            },
        };

        if let (Some(grantee), Some(permission)) = (grantee, permission) {
            grants.push(Grant {
                grantee,
                permission,
            });
        }
    }

    match owner {
        Some(owner) if errors.is_empty() => Ok(AclDocument { owner, grants }),
        _ => Err(errors),
    }
}

fn validate_grantee(
    grantee: Option<raw::RawGrantee>,
    errors: &mut Vec<ValidationError>,
) -> Option<Grantee> {
    let grantee = match grantee {
        None => {
            errors.push(ValidationError::MissingGrantee);
            return None;
        }
        Some(grantee) => grantee,
    };

    let kind = match grantee.kind.as_deref() {
        None => {
            errors.push(ValidationError::MissingGranteeType);
            return None;
        }
        Some(attr) => match GranteeType::from_attr(attr) {
            None => {
                errors.push(ValidationError::UnknownGranteeType(attr.to_string()));
                return None;
            }
            Some(kind) => kind,
        },
    };

    match kind {
        GranteeType::CanonicalUser => match grantee.id.filter(|id| !id.is_empty()) {
            None => {
                errors.push(ValidationError::MissingGranteeId);
                None
            }
            Some(id) => Some(Grantee::CanonicalUser {
                id,
                display_name: grantee.display_name,
            }),
        },
        GranteeType::AnonymousGroup => match grantee.uri.filter(|uri| !uri.is_empty()) {
            None => {
                errors.push(ValidationError::MissingGranteeUri);
                None
            }
            Some(uri) => Some(Grantee::AnonymousGroup { uri }),
        },
    }
}
