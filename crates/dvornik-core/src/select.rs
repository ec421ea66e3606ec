//! Staleness and exemption decisions.
//!
//! Each pod goes through three checks, in order: phase, age, exemption. The first
//! failing check decides; the result is a stable filter over the snapshot.
use std::fmt;

use dvornik_model::{Pod, PodPhase, SelectionPolicy, StalenessThreshold};
use tracing::{debug, instrument};

/// Why a pod was or was not selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Eligible,
    PhaseNotEligible(PodPhase),
    MissingCreationTime,
    TooYoung,
    Exempt { key: String, value: String },
}

impl Decision {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Decision::Eligible)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Eligible => f.write_str("eligible"),
            Decision::PhaseNotEligible(phase) => write!(f, "phase {phase} is not collected"),
            Decision::MissingCreationTime => f.write_str("no creation timestamp"),
            Decision::TooYoung => f.write_str("younger than threshold"),
            Decision::Exempt { key, value } => write!(f, "exempt by label {key}={value}"),
        }
    }
}

/// Applies one [`SelectionPolicy`] against one [`StalenessThreshold`].
///
/// Both are fixed for the lifetime of the selector, so every pod of a run is judged against the same cutoff.
#[derive(Debug, Clone)]
pub struct Selector<'a> {
    threshold: StalenessThreshold,
    policy: &'a SelectionPolicy,
}

impl<'a> Selector<'a> {
    pub fn new(threshold: StalenessThreshold, policy: &'a SelectionPolicy) -> Self {
        Self { threshold, policy }
    }

    pub fn threshold(&self) -> StalenessThreshold {
        self.threshold
    }

    /// Decide for a single pod.
    pub fn decide(&self, pod: &Pod) -> Decision {
        if !self.policy.is_eligible_phase(pod.phase) {
            return Decision::PhaseNotEligible(pod.phase);
        }
        let Some(created_at) = pod.created_at else {
            return Decision::MissingCreationTime;
        };
        if !self.threshold.is_stale(created_at) {
            return Decision::TooYoung;
        }
        if let Some(exemptions) = self.policy.exemptions() {
            if let Some((key, value)) = exemptions.matching_rule(&pod.labels) {
                return Decision::Exempt {
                    key: key.to_string(),
                    value: value.to_string(),
                };
            }
        }
        Decision::Eligible
    }

    /// Keep the eligible pods, preserving snapshot order.
    #[instrument(level = "debug", skip_all, fields(mode = self.policy.mode(), threshold = %self.threshold, total = snapshot.len()))]
    pub fn select(&self, snapshot: &[Pod]) -> Vec<Pod> {
        snapshot
            .iter()
            .filter(|pod| {
                let decision = self.decide(pod);
                debug!(pod = %pod.name, phase = %pod.phase, %decision, "pod evaluated");
                decision.is_eligible()
            })
            .cloned()
            .collect()
    }
}
