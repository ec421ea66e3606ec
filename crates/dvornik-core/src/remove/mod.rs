//! Removal of selected pods.
//!
//! Pods are deleted one at a time in snapshot order. Pending pods get a zero grace
//! period; everything else keeps the orchestrator default.
mod report;
pub use report::Report;

use std::io::Write;

use dvornik_model::{DeleteRequest, Flag, Pod, RemovalOutcome};
use tracing::{error, info, instrument, warn};

use crate::{api::PodApi, error::CoreError, params::DeleteErrorPolicy};

/// Issues delete calls for eligible pods through a [`PodApi`].
pub struct Remover<'a, A: PodApi + ?Sized> {
    api: &'a A,
    namespace: &'a str,
    dry_run: Flag,
    on_error: DeleteErrorPolicy,
}

impl<'a, A: PodApi + ?Sized> Remover<'a, A> {
    pub fn new(api: &'a A, namespace: &'a str) -> Self {
        Self {
            api,
            namespace,
            dry_run: Flag::disabled(),
            on_error: DeleteErrorPolicy::default(),
        }
    }

    pub fn with_dry_run(mut self, dry_run: Flag) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_delete_error_policy(mut self, policy: DeleteErrorPolicy) -> Self {
        self.on_error = policy;
        self
    }

    /// Delete every pod in `eligible`, writing progress to `report`.
    ///
    /// Returns one outcome per pod, in input order. With [`DeleteErrorPolicy::Abort`]
    /// the first failed delete is returned as [`CoreError::Delete`] and later pods are not touched.
    #[instrument(level = "debug", skip_all, fields(backend = self.api.name(), namespace = %self.namespace, count = eligible.len()))]
    pub async fn remove<W: Write>(
        &self,
        eligible: &[Pod],
        report: &mut Report<W>,
    ) -> Result<Vec<RemovalOutcome>, CoreError> {
        let mut outcomes = Vec::with_capacity(eligible.len());
        if eligible.is_empty() {
            return Ok(outcomes);
        }
        report.header()?;

        for pod in eligible {
            let req = DeleteRequest::for_pod(self.namespace, pod, self.dry_run);
            match self.api.delete(&req).await {
                Ok(()) => {
                    info!(pod = %req.name, grace = ?req.grace, dry_run = %req.dry_run, "pod deleted");
                    report.removed(&req.name)?;
                    outcomes.push(RemovalOutcome::Removed { pod: req.name });
                }
                Err(e) => match self.on_error {
                    DeleteErrorPolicy::Abort => {
                        error!(pod = %req.name, error = %e, "delete failed, aborting run");
                        return Err(CoreError::Delete {
                            pod: req.name,
                            source: e,
                        });
                    }
                    DeleteErrorPolicy::Continue => {
                        warn!(pod = %req.name, error = %e, "delete failed, continuing");
                        outcomes.push(RemovalOutcome::Failed {
                            pod: req.name,
                            reason: e.to_string(),
                        });
                    }
                },
            }
        }
        Ok(outcomes)
    }
}
