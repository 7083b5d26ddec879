//! aclflow ACL engine
//!
//! This crate turns raw `<AccessControlPolicy>` documents into a typed model,
//! rewrites grant lists into a canonical order, and decides whether two
//! policies describe the same effective permissions. It never talks to a
//! storage service itself; the store layer lives in `aclflow-cloud`.
//!
//! # Pipeline
//!
//! ```text
//! raw XML ──> parse ──> AclDocument ──┬──> canonicalize ──> serialize ──> canonical XML
//!                                     └──> equivalent(a, b) ──> bool
//! ```
//!
//! All four operations are pure, synchronous functions; callers may invoke
//! them from any number of tasks without coordination.

pub mod canonical;
pub mod equivalence;
pub mod error;
pub mod model;
pub mod parser;
pub mod serializer;

// Re-exports
pub use canonical::{GRANTEE_TYPE_ORDER, PERMISSION_ORDER, canonicalize, canonicalize_with};
pub use equivalence::equivalent;
pub use error::ValidationError;
pub use model::{AclDocument, Grant, Grantee, GranteeType, Owner, Permission};
pub use parser::parse;
pub use serializer::serialize;
