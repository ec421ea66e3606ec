use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Flag, Namespace, Pod, PodName, PodPhase};

/// Grace handling requested for a single delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GracePeriod {
    /// Leave the orchestrator's default grace period in place.
    Default,
    /// Force a zero-second grace period.
    Immediate,
}

impl GracePeriod {
    /// Pending pods are removed immediately; everything else keeps the default.
    pub fn for_phase(phase: PodPhase) -> Self {
        match phase {
            PodPhase::Pending => GracePeriod::Immediate,
            _ => GracePeriod::Default,
        }
    }

    /// Explicit override in seconds, if any.
    pub fn seconds(&self) -> Option<u32> {
        match self {
            GracePeriod::Default => None,
            GracePeriod::Immediate => Some(0),
        }
    }
}

/// Fully resolved delete call for one pod.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRequest {
    pub namespace: Namespace,
    pub name: PodName,
    pub grace: GracePeriod,
    /// Ask the orchestrator to validate the delete without persisting it.
    #[serde(default)]
    pub dry_run: Flag,
}

impl DeleteRequest {
    /// Build the request for `pod`, picking grace handling from its phase.
    pub fn for_pod(namespace: impl Into<Namespace>, pod: &Pod, dry_run: Flag) -> Self {
        Self {
            namespace: namespace.into(),
            name: pod.name.clone(),
            grace: GracePeriod::for_phase(pod.phase),
            dry_run,
        }
    }
}

impl fmt::Display for DeleteRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Result of one removal attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "outcome")]
pub enum RemovalOutcome {
    Removed { pod: PodName },
    Failed { pod: PodName, reason: String },
}

impl RemovalOutcome {
    pub fn pod(&self) -> &str {
        match self {
            RemovalOutcome::Removed { pod } | RemovalOutcome::Failed { pod, .. } => pod,
        }
    }

    pub fn is_removed(&self) -> bool {
        matches!(self, RemovalOutcome::Removed { .. })
    }
}
