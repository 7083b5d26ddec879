//! Canonical ordering of grant lists
//!
//! Storage backends return grants in an arbitrary order. Before a policy is
//! persisted or compared, its grants are rewritten into one fixed order so
//! that two policies with the same grant set always serialize identically.

use crate::model::{AclDocument, GranteeType, Permission};

/// Permission priority sequence. Outer ordering key of the canonical form.
pub const PERMISSION_ORDER: [Permission; 5] = [
    Permission::FullControl,
    Permission::Write,
    Permission::Read,
    Permission::WriteAcp,
    Permission::ReadAcp,
];

/// Grantee-type priority sequence. Inner ordering key of the canonical form.
pub const GRANTEE_TYPE_ORDER: [GranteeType; 2] =
    [GranteeType::CanonicalUser, GranteeType::AnonymousGroup];

/// Rewrite the grant list into canonical order under the default priority
/// sequences. Total over validated documents: every grant carries a member
/// of both closed sets, so no grant can be dropped.
pub fn canonicalize(doc: &AclDocument) -> AclDocument {
    canonicalize_with(doc, &PERMISSION_ORDER, &GRANTEE_TYPE_ORDER)
}

/// Canonicalize under explicit priority sequences.
///
/// Grants are grouped by `(permission, grantee type)` bucket, buckets emitted
/// permission-major, and grants within one bucket keep their original
/// relative order (stable grouping). Idempotent, and invariant under any
/// permutation of the input grant list.
pub fn canonicalize_with(
    doc: &AclDocument,
    permission_order: &[Permission],
    grantee_type_order: &[GranteeType],
) -> AclDocument {
    let mut grants = Vec::with_capacity(doc.grants.len());
    for permission in permission_order {
        for grantee_type in grantee_type_order {
            grants.extend(
                doc.grants
                    .iter()
                    .filter(|g| {
                        g.permission == *permission && g.grantee.grantee_type() == *grantee_type
                    })
                    .cloned(),
            );
        }
    }

    AclDocument {
        owner: doc.owner.clone(),
        grants,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Grant, Grantee, Owner};

    const ALL_USERS: &str = "http://cam.qcloud.com/groups/global/AllUsers";

    fn doc(grants: Vec<Grant>) -> AclDocument {
        AclDocument {
            owner: Owner::new("100000000001"),
            grants,
        }
    }

    #[test]
    fn test_canonicalize_is_idempotent() {
        let d = doc(vec![
            Grant::new(Grantee::anonymous(ALL_USERS), Permission::Write),
            Grant::new(Grantee::user("200000000002"), Permission::Read),
            Grant::new(Grantee::user("300000000003"), Permission::FullControl),
        ]);

        let once = canonicalize(&d);
        let twice = canonicalize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_canonicalize_is_order_invariant() {
        let old = doc(vec![
            Grant::new(Grantee::user("200000000002"), Permission::Read),
            Grant::new(Grantee::anonymous(ALL_USERS), Permission::Write),
        ]);
        let new = doc(vec![
            Grant::new(Grantee::anonymous(ALL_USERS), Permission::Write),
            Grant::new(Grantee::user("200000000002"), Permission::Read),
        ]);

        assert_eq!(canonicalize(&old), canonicalize(&new));

        // WRITE outranks READ in the fixed permission sequence, so the
        // anonymous WRITE grant leads the canonical form.
        let canonical = canonicalize(&old);
        assert_eq!(canonical.grants[0].permission, Permission::Write);
        assert_eq!(canonical.grants[1].permission, Permission::Read);
    }

    #[test]
    fn test_user_grants_precede_anonymous_within_a_permission() {
        let d = doc(vec![
            Grant::new(Grantee::anonymous(ALL_USERS), Permission::Read),
            Grant::new(Grantee::user("200000000002"), Permission::Read),
        ]);

        let canonical = canonicalize(&d);
        assert_eq!(
            canonical.grants[0].grantee,
            Grantee::user("200000000002")
        );
        assert_eq!(canonical.grants[1].grantee, Grantee::anonymous(ALL_USERS));
    }

    // Grouping must be stable: grants sharing a (permission, type) bucket
    // keep their relative input order, so inputs that already agree on a
    // partial order canonicalize identically.
    #[test]
    fn test_equal_keyed_grants_keep_relative_order() {
        let d = doc(vec![
            Grant::new(Grantee::user("a"), Permission::Read),
            Grant::new(Grantee::user("b"), Permission::Read),
            Grant::new(Grantee::user("c"), Permission::Read),
        ]);

        let canonical = canonicalize(&d);
        let ids: Vec<_> = canonical
            .grants
            .iter()
            .map(|g| match &g.grantee {
                Grantee::CanonicalUser { id, .. } => id.as_str(),
                Grantee::AnonymousGroup { uri } => uri.as_str(),
            })
            .collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn test_owner_passes_through_unchanged() {
        let mut d = doc(vec![Grant::new(
            Grantee::user("200000000002"),
            Permission::Read,
        )]);
        d.owner.display_name = Some("owner-name".to_string());

        assert_eq!(canonicalize(&d).owner, d.owner);
    }

    #[test]
    fn test_duplicate_grants_all_survive() {
        let g = Grant::new(Grantee::user("200000000002"), Permission::Read);
        let d = doc(vec![g.clone(), g.clone()]);

        assert_eq!(canonicalize(&d).grants.len(), 2);
    }

    // The priority sequences are injectable so the tie-break logic can be
    // probed in isolation.
    #[test]
    fn test_alternative_priority_sequences() {
        let d = doc(vec![
            Grant::new(Grantee::user("200000000002"), Permission::FullControl),
            Grant::new(Grantee::anonymous(ALL_USERS), Permission::Read),
        ]);

        let reversed_permissions = [
            Permission::ReadAcp,
            Permission::WriteAcp,
            Permission::Read,
            Permission::Write,
            Permission::FullControl,
        ];
        let reversed_types = [GranteeType::AnonymousGroup, GranteeType::CanonicalUser];

        let canonical = canonicalize_with(&d, &reversed_permissions, &reversed_types);
        assert_eq!(canonical.grants[0].permission, Permission::Read);
        assert_eq!(canonical.grants[1].permission, Permission::FullControl);
    }
}
