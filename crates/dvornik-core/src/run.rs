//! One collection pass: list → select → remove → report.
use std::io::Write;

use dvornik_model::{RemovalOutcome, StalenessThreshold};
use time::OffsetDateTime;
use tracing::{info, instrument};

use crate::{
    api::PodApi,
    error::CoreError,
    params::{ConfigError, RunParameters},
    remove::{Remover, Report},
    select::Selector,
};

/// Counters of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub threshold: StalenessThreshold,
    pub listed: usize,
    pub eligible: usize,
    pub outcomes: Vec<RemovalOutcome>,
}

impl RunSummary {
    pub fn removed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_removed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.removed()
    }
}

/// Execute a single run against `api`, writing the report to `out`.
///
/// `now` is the only clock reading of the run; the staleness threshold is derived from it once.
#[instrument(level = "info", skip_all, fields(backend = api.name(), namespace = %params.namespace()))]
pub async fn run<A, W>(
    api: &A,
    params: &RunParameters,
    now: OffsetDateTime,
    out: W,
) -> Result<RunSummary, CoreError>
where
    A: PodApi + ?Sized,
    W: Write,
{
    let threshold =
        StalenessThreshold::new(now, params.max_age()).map_err(ConfigError::from)?;
    let policy = params.policy();
    info!(
        %threshold,
        mode = policy.mode(),
        label_selector = policy.label_selector().unwrap_or(""),
        exemptions = policy.exemptions().map_or(0, |e| e.len()),
        dry_run = %params.dry_run(),
        "starting run"
    );

    let snapshot = api
        .list(params.namespace(), policy.label_selector())
        .await
        .map_err(|source| CoreError::List {
            namespace: params.namespace().to_string(),
            source,
        })?;

    let eligible = Selector::new(threshold, policy).select(&snapshot);
    info!(listed = snapshot.len(), eligible = eligible.len(), "pods selected");

    let mut report = Report::new(out).dry_run(params.dry_run());
    let outcomes = Remover::new(api, params.namespace())
        .with_dry_run(params.dry_run())
        .with_delete_error_policy(params.on_delete_error())
        .remove(&eligible, &mut report)
        .await?;

    let summary = RunSummary {
        threshold,
        listed: snapshot.len(),
        eligible: eligible.len(),
        outcomes,
    };
    info!(
        removed = summary.removed(),
        failed = summary.failed(),
        "run finished"
    );

    if summary.failed() > 0 {
        return Err(CoreError::PartialRemoval {
            failed: summary.failed(),
            total: summary.eligible,
        });
    }
    Ok(summary)
}
