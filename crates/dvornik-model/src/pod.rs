use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Labels, PodName};

/// Lifecycle phase reported by the orchestrator for a pod.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PodPhase {
    Pending,
    Running,
    Succeeded,
    Failed,
    Unknown,
}

impl PodPhase {
    /// Map the raw `status.phase` string to a phase.
    ///
    /// Anything missing or unrecognised is [`PodPhase::Unknown`].
    pub fn from_status(raw: Option<&str>) -> Self {
        match raw {
            Some("Pending") => Self::Pending,
            Some("Running") => Self::Running,
            Some("Succeeded") => Self::Succeeded,
            Some("Failed") => Self::Failed,
            _ => Self::Unknown,
        }
    }

    /// Returns the phase as the orchestrator spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            PodPhase::Pending => "Pending",
            PodPhase::Running => "Running",
            PodPhase::Succeeded => "Succeeded",
            PodPhase::Failed => "Failed",
            PodPhase::Unknown => "Unknown",
        }
    }
}

impl Default for PodPhase {
    fn default() -> Self {
        Self::Unknown
    }
}

impl fmt::Display for PodPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only snapshot of a pod as observed at list time.
///
/// The collector never mutates a pod; it only decides whether to ask the orchestrator to delete it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pod {
    /// Pod name, unique within its namespace.
    pub name: PodName,
    /// Creation instant.
    ///
    /// `None` when the orchestrator did not report one; such a pod is never old enough to collect.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    /// Current lifecycle phase.
    #[serde(default)]
    pub phase: PodPhase,
    /// Labels attached to the pod.
    #[serde(default, skip_serializing_if = "Labels::is_empty")]
    pub labels: Labels,
}

impl Pod {
    /// Create a pod snapshot without labels.
    pub fn new(name: impl Into<PodName>, phase: PodPhase, created_at: OffsetDateTime) -> Self {
        Self {
            name: name.into(),
            created_at: Some(created_at),
            phase,
            labels: Labels::default(),
        }
    }

    /// Attach a label, builder-style.
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key, value);
        self
    }
}
