//! ACL store abstraction
//!
//! The trait mirrors the two calls every supported storage service exposes
//! for bucket ACLs: fetch the current policy document, and replace it with
//! either a full document or a canned keyword the service expands itself.

use crate::error::{CloudError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;

/// Canned ACL keywords accepted by the storage service in place of a full
/// policy body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CannedAcl {
    Private,
    PublicRead,
    PublicReadWrite,
}

impl CannedAcl {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::PublicRead => "public-read",
            Self::PublicReadWrite => "public-read-write",
        }
    }
}

impl std::fmt::Display for CannedAcl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a `put_acl` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AclRequest {
    /// Short-form keyword; the service derives the grant list itself.
    Canned(CannedAcl),
    /// Full policy document text.
    Body(String),
}

/// Remote ACL store for a storage service.
///
/// Implementations perform the actual network (or filesystem) calls; the
/// engine above them only ever sees raw policy text.
#[async_trait]
pub trait AclStore: Send + Sync {
    /// Store name for logs and UI
    fn name(&self) -> &str;

    /// Fetch the raw ACL policy document of a resource
    async fn get_acl(&self, resource_id: &str) -> Result<String>;

    /// Replace the ACL of a resource
    async fn put_acl(&self, resource_id: &str, acl: &AclRequest) -> Result<()>;
}

/// File-backed store: one policy document per resource id under a root
/// directory. Backs local development and tests; real providers implement
/// [`AclStore`] against their service API instead.
///
/// A canned keyword is recorded verbatim — a real service expands it server
/// side, so a freshly canned resource reads back as non-policy text and the
/// reconciler conservatively treats it as changed.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, resource_id: &str) -> PathBuf {
        self.root.join(format!("{resource_id}.xml"))
    }
}

#[async_trait]
impl AclStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn get_acl(&self, resource_id: &str) -> Result<String> {
        let path = self.path_for(resource_id);
        match fs::read_to_string(&path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(CloudError::ResourceNotFound(resource_id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn put_acl(&self, resource_id: &str, acl: &AclRequest) -> Result<()> {
        let body = match acl {
            AclRequest::Canned(canned) => canned.as_str(),
            AclRequest::Body(text) => text.as_str(),
        };

        fs::create_dir_all(&self.root).await?;
        let path = self.path_for(resource_id);
        fs::write(&path, body).await?;
        tracing::debug!("wrote ACL for {} to {}", resource_id, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLICY: &str = r#"<AccessControlPolicy>
        <Owner><ID>100000000001</ID></Owner>
        <AccessControlList>
            <Grant>
                <Grantee type="user"><ID>200000000002</ID></Grantee>
                <Permission>READ</Permission>
            </Grant>
        </AccessControlList>
    </AccessControlPolicy>"#;

    #[tokio::test]
    async fn test_put_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store
            .put_acl("bucket-a", &AclRequest::Body(POLICY.to_string()))
            .await
            .unwrap();
        let text = store.get_acl("bucket-a").await.unwrap();
        assert_eq!(text, POLICY);
    }

    #[tokio::test]
    async fn test_missing_resource_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let err = store.get_acl("nope").await.unwrap_err();
        assert!(matches!(err, CloudError::ResourceNotFound(_)));
    }

    #[tokio::test]
    async fn test_canned_keyword_is_recorded_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store
            .put_acl("bucket-a", &AclRequest::Canned(CannedAcl::PublicRead))
            .await
            .unwrap();
        assert_eq!(store.get_acl("bucket-a").await.unwrap(), "public-read");
    }
}
