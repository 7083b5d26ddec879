//! Plan/apply vocabulary for ACL reconciliation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A planned action on one resource's ACL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    /// Type of action to perform
    pub action_type: ActionType,

    /// Resource identifier (bucket name)
    pub resource_id: String,

    /// Description of the action
    pub description: String,

    /// Canonical policy body to upload; `None` for no-op actions
    pub body: Option<String>,
}

/// Type of action to perform. An ACL always exists on a live resource, so
/// unlike general resource plans there is nothing to create or delete —
/// an update rewrites the whole grant list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Replace the stored ACL
    Update,
    /// Stored and desired ACLs are equivalent
    NoOp,
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionType::Update => write!(f, "update"),
            ActionType::NoOp => write!(f, "no-op"),
        }
    }
}

/// Plan containing all actions to be applied
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    /// List of actions to perform
    pub actions: Vec<Action>,

    /// Whether the plan has any changes
    pub has_changes: bool,
}

impl Plan {
    pub fn new(actions: Vec<Action>) -> Self {
        let has_changes = actions.iter().any(|a| a.action_type != ActionType::NoOp);
        Self {
            actions,
            has_changes,
        }
    }

    /// Summary of the plan
    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            update: self
                .actions
                .iter()
                .filter(|a| a.action_type == ActionType::Update)
                .count(),
            no_change: self
                .actions
                .iter()
                .filter(|a| a.action_type == ActionType::NoOp)
                .count(),
        }
    }
}

/// Summary of planned actions
#[derive(Debug, Clone)]
pub struct PlanSummary {
    pub update: usize,
    pub no_change: usize,
}

impl std::fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to update, {} unchanged", self.update, self.no_change)
    }
}

/// Result of applying a plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyResult {
    /// Successfully applied actions
    pub succeeded: Vec<ActionResult>,

    /// Failed actions
    pub failed: Vec<ActionResult>,

    /// When the apply finished
    pub applied_at: DateTime<Utc>,

    /// Total execution time in milliseconds
    pub duration_ms: u64,
}

impl ApplyResult {
    pub fn new() -> Self {
        Self {
            succeeded: Vec::new(),
            failed: Vec::new(),
            applied_at: Utc::now(),
            duration_ms: 0,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn add_success(&mut self, resource_id: String, message: String) {
        self.succeeded.push(ActionResult {
            resource_id,
            message,
            error: None,
        });
    }

    pub fn add_failure(&mut self, resource_id: String, error: String) {
        self.failed.push(ActionResult {
            resource_id,
            message: String::new(),
            error: Some(error),
        });
    }
}

impl Default for ApplyResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a single action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResult {
    /// Resource the action targeted
    pub resource_id: String,

    /// Success message
    pub message: String,

    /// Error message if failed
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(action_type: ActionType, resource_id: &str) -> Action {
        Action {
            action_type,
            resource_id: resource_id.to_string(),
            description: String::new(),
            body: None,
        }
    }

    #[test]
    fn test_plan_with_only_noops_has_no_changes() {
        let plan = Plan::new(vec![
            action(ActionType::NoOp, "bucket-a"),
            action(ActionType::NoOp, "bucket-b"),
        ]);
        assert!(!plan.has_changes);
        assert_eq!(plan.summary().to_string(), "0 to update, 2 unchanged");
    }

    #[test]
    fn test_plan_with_an_update_has_changes() {
        let plan = Plan::new(vec![
            action(ActionType::Update, "bucket-a"),
            action(ActionType::NoOp, "bucket-b"),
        ]);
        assert!(plan.has_changes);
        assert_eq!(plan.summary().to_string(), "1 to update, 1 unchanged");
    }
}
