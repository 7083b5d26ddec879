//! Typed model of an ACL policy document
//!
//! A document is parsed once into these types and is immutable afterwards.
//! The grantee kind is decided at parse time as a closed two-variant union;
//! downstream code matches on the variant instead of re-inspecting markup.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A complete ACL policy: the owning account plus one or more grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclDocument {
    pub owner: Owner,
    pub grants: Vec<Grant>,
}

/// Owning account of the resource the policy is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    /// Account identifier. Non-empty after a successful parse.
    pub id: String,
    pub display_name: Option<String>,
}

impl Owner {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
        }
    }
}

/// One (grantee, permission) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    pub grantee: Grantee,
    pub permission: Permission,
}

impl Grant {
    pub fn new(grantee: Grantee, permission: Permission) -> Self {
        Self {
            grantee,
            permission,
        }
    }
}

/// Subject of a grant: an identified account or a well-known group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Grantee {
    /// `type="user"` — identified by account ID.
    CanonicalUser {
        id: String,
        display_name: Option<String>,
    },
    /// `type="anonymous"` — identified by a well-known group URI
    /// (e.g. the "all users" group).
    AnonymousGroup { uri: String },
}

impl Grantee {
    pub fn user(id: impl Into<String>) -> Self {
        Self::CanonicalUser {
            id: id.into(),
            display_name: None,
        }
    }

    pub fn user_named(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self::CanonicalUser {
            id: id.into(),
            display_name: Some(display_name.into()),
        }
    }

    pub fn anonymous(uri: impl Into<String>) -> Self {
        Self::AnonymousGroup { uri: uri.into() }
    }

    pub fn grantee_type(&self) -> GranteeType {
        match self {
            Self::CanonicalUser { .. } => GranteeType::CanonicalUser,
            Self::AnonymousGroup { .. } => GranteeType::AnonymousGroup,
        }
    }
}

/// Discriminant of a [`Grantee`], carried by the `type` attribute on the
/// `<Grantee>` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GranteeType {
    CanonicalUser,
    AnonymousGroup,
}

impl GranteeType {
    /// The wire value of the `type` attribute.
    pub const fn as_attr(&self) -> &'static str {
        match self {
            Self::CanonicalUser => "user",
            Self::AnonymousGroup => "anonymous",
        }
    }

    /// Parse the `type` attribute. Returns `None` for anything outside the
    /// closed set; the caller reports the offending value.
    pub fn from_attr(attr: &str) -> Option<Self> {
        match attr {
            "user" => Some(Self::CanonicalUser),
            "anonymous" => Some(Self::AnonymousGroup),
            _ => None,
        }
    }
}

impl fmt::Display for GranteeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_attr())
    }
}

/// Closed permission enumeration of the storage service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    FullControl,
    Write,
    Read,
    WriteAcp,
    ReadAcp,
}

impl Permission {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FullControl => "FULL_CONTROL",
            Self::Write => "WRITE",
            Self::Read => "READ",
            Self::WriteAcp => "WRITE_ACP",
            Self::ReadAcp => "READ_ACP",
        }
    }

    /// Parse the wire value. Returns `None` for anything outside the closed
    /// set; the caller reports the offending value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "FULL_CONTROL" => Some(Self::FullControl),
            "WRITE" => Some(Self::Write),
            "READ" => Some(Self::Read),
            "WRITE_ACP" => Some(Self::WriteAcp),
            "READ_ACP" => Some(Self::ReadAcp),
            _ => None,
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
