//! ACL reconciliation
//!
//! Compares the stored ACL of a resource with the locally desired one and
//! plans the minimal action: nothing when both describe the same effective
//! permissions, otherwise one update carrying the canonical serialization
//! of the desired policy. The canonical body keeps remote reads diffable
//! against local files regardless of the order the service returns grants in.

use crate::action::{Action, ActionType, ApplyResult, Plan};
use crate::error::{CloudError, Result};
use crate::store::{AclRequest, AclStore};
use aclflow_core::{canonicalize, equivalent, parse, serialize};

/// Drives plan/apply for one ACL store.
pub struct Reconciler<S: AclStore> {
    store: S,
}

impl<S: AclStore> Reconciler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Plan the action needed to bring `resource_id`'s ACL to `desired`
    /// (raw policy text).
    ///
    /// The desired text must validate — a locally authored policy is
    /// rejected here, before any store call. The stored side is allowed to
    /// be missing or malformed; "cannot determine equivalence" conservatively
    /// plans an update.
    pub async fn plan(&self, resource_id: &str, desired: &str) -> Result<Plan> {
        let desired_doc = parse(desired).map_err(|errors| CloudError::invalid_acl(&errors))?;
        let canonical_body = serialize(&canonicalize(&desired_doc));

        let stored_doc = match self.store.get_acl(resource_id).await {
            Ok(text) => match parse(&text) {
                Ok(doc) => Some(doc),
                Err(errors) => {
                    tracing::warn!(
                        "stored ACL of {} did not parse ({} errors), treating as changed",
                        resource_id,
                        errors.len()
                    );
                    None
                }
            },
            Err(CloudError::ResourceNotFound(_)) => None,
            Err(e) => return Err(e),
        };

        let action = match stored_doc {
            Some(stored) if equivalent(&stored, &desired_doc) => {
                tracing::debug!("ACL of {} is up to date", resource_id);
                Action {
                    action_type: ActionType::NoOp,
                    resource_id: resource_id.to_string(),
                    description: format!("ACL of {resource_id} is up to date"),
                    body: None,
                }
            }
            _ => Action {
                action_type: ActionType::Update,
                resource_id: resource_id.to_string(),
                description: format!("replace ACL of {resource_id}"),
                body: Some(canonical_body),
            },
        };

        Ok(Plan::new(vec![action]))
    }

    /// Apply a previously computed plan through the store.
    pub async fn apply(&self, plan: &Plan) -> Result<ApplyResult> {
        let mut result = ApplyResult::new();
        let start = std::time::Instant::now();

        for action in &plan.actions {
            match action.action_type {
                ActionType::Update => {
                    let Some(body) = &action.body else {
                        result.add_failure(
                            action.resource_id.clone(),
                            "update action carries no policy body".to_string(),
                        );
                        continue;
                    };

                    tracing::info!("Updating ACL: {}", action.resource_id);
                    match self
                        .store
                        .put_acl(&action.resource_id, &AclRequest::Body(body.clone()))
                        .await
                    {
                        Ok(()) => result
                            .add_success(action.resource_id.clone(), action.description.clone()),
                        Err(e) => result.add_failure(action.resource_id.clone(), e.to_string()),
                    }
                }
                ActionType::NoOp => {
                    // Nothing to do
                }
            }
        }

        result.applied_at = chrono::Utc::now();
        result.duration_ms = start.elapsed().as_millis() as u64;
        Ok(result)
    }
}
