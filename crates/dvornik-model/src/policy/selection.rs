use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{ExemptionPolicy, ModelError, PodPhase};

/// Which pods a run may collect.
///
/// - `Exempting` collects `Running` pods and honours the local [`ExemptionPolicy`].
/// - `RemoteFiltered` collects `Running` and `Pending` pods; label filtering is done by the
///   orchestrator through `label_selector` when listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "mode")]
pub enum SelectionPolicy {
    Exempting {
        #[serde(default)]
        exemptions: ExemptionPolicy,
    },
    RemoteFiltered {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label_selector: Option<String>,
    },
}

impl SelectionPolicy {
    const EXEMPTING_PHASES: &'static [PodPhase] = &[PodPhase::Running];
    const REMOTE_FILTERED_PHASES: &'static [PodPhase] = &[PodPhase::Running, PodPhase::Pending];

    /// Phases a pod must be in to be collected.
    pub fn eligible_phases(&self) -> &'static [PodPhase] {
        match self {
            SelectionPolicy::Exempting { .. } => Self::EXEMPTING_PHASES,
            SelectionPolicy::RemoteFiltered { .. } => Self::REMOTE_FILTERED_PHASES,
        }
    }

    pub fn is_eligible_phase(&self, phase: PodPhase) -> bool {
        self.eligible_phases().contains(&phase)
    }

    /// Local exemption rules; `None` when filtering is delegated to the orchestrator.
    pub fn exemptions(&self) -> Option<&ExemptionPolicy> {
        match self {
            SelectionPolicy::Exempting { exemptions } => Some(exemptions),
            SelectionPolicy::RemoteFiltered { .. } => None,
        }
    }

    /// Label selector passed through to the list call.
    pub fn label_selector(&self) -> Option<&str> {
        match self {
            SelectionPolicy::Exempting { .. } => None,
            SelectionPolicy::RemoteFiltered { label_selector } => label_selector.as_deref(),
        }
    }

    /// Returns the policy mode as a static string.
    pub fn mode(&self) -> &'static str {
        match self {
            SelectionPolicy::Exempting { .. } => SelectionMode::Exempting.as_str(),
            SelectionPolicy::RemoteFiltered { .. } => SelectionMode::RemoteFiltered.as_str(),
        }
    }
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        SelectionPolicy::Exempting {
            exemptions: ExemptionPolicy::none(),
        }
    }
}

/// Bare policy mode, as named in configuration.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    #[default]
    Exempting,
    RemoteFiltered,
}

impl SelectionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionMode::Exempting => "exempting",
            SelectionMode::RemoteFiltered => "remote-filtered",
        }
    }
}

impl FromStr for SelectionMode {
    type Err = ModelError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exempting" => Ok(Self::Exempting),
            "remote-filtered" | "remote_filtered" => Ok(Self::RemoteFiltered),
            _ => Err(ModelError::UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
