//! aclflow store layer
//!
//! Connects the pure ACL engine in `aclflow-core` to remote storage
//! services. Providers implement the [`AclStore`] trait; the
//! [`Reconciler`] uses it to decide whether a resource's stored ACL
//! needs updating, suppressing the update when the stored and desired
//! policies are semantically equivalent.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │                aclflow CLI                │
//! └────────────────────┬─────────────────────┘
//!                      │
//! ┌────────────────────▼─────────────────────┐
//! │              aclflow-cloud                │
//! │  Reconciler ── plan / apply               │
//! │  trait AclStore { get_acl / put_acl }     │
//! └────────────────────┬─────────────────────┘
//!                      │
//!         ┌────────────▼────────────┐
//!         │  FileStore / providers  │
//!         └─────────────────────────┘
//! ```

pub mod action;
pub mod error;
pub mod reconcile;
pub mod store;

// Re-exports
pub use action::{Action, ActionResult, ActionType, ApplyResult, Plan, PlanSummary};
pub use error::{CloudError, Result};
pub use reconcile::Reconciler;
pub use store::{AclRequest, AclStore, CannedAcl, FileStore};
