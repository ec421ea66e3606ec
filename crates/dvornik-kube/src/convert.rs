use k8s_openapi::api::core::v1::Pod as KubePod;
use kube::api::DeleteParams;
use time::OffsetDateTime;

use dvornik_core::PodApiError;
use dvornik_model::{DeleteRequest, Labels, Pod, PodPhase};

/// Project a Kubernetes pod onto the collector's snapshot type.
///
/// Fails only when the pod has no name.
pub fn pod_from_kube(pod: &KubePod) -> Result<Pod, PodApiError> {
    let name = pod
        .metadata
        .name
        .clone()
        .ok_or_else(|| PodApiError::InvalidResponse("pod without metadata.name".into()))?;

    let created_at = pod
        .metadata
        .creation_timestamp
        .as_ref()
        .and_then(|t| OffsetDateTime::from_unix_timestamp(t.0.timestamp()).ok());

    let phase = PodPhase::from_status(pod.status.as_ref().and_then(|s| s.phase.as_deref()));
    let labels = pod
        .metadata
        .labels
        .clone()
        .map(Labels::from)
        .unwrap_or_default();

    Ok(Pod {
        name,
        created_at,
        phase,
        labels,
    })
}

/// Delete options for one request.
///
/// Only `Immediate` grace sets `gracePeriodSeconds`; otherwise the server default applies.
pub fn delete_params(req: &DeleteRequest) -> DeleteParams {
    DeleteParams {
        dry_run: req.dry_run.is_enabled(),
        grace_period_seconds: req.grace.seconds(),
        ..DeleteParams::default()
    }
}
