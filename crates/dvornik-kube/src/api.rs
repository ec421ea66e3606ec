use async_trait::async_trait;
use k8s_openapi::api::core::v1::Pod as KubePod;
use kube::{
    Api, Client,
    api::ListParams,
};
use tracing::{debug, instrument, trace};

use dvornik_core::{PodApi, PodApiError};
use dvornik_model::{DeleteRequest, Pod};

use crate::convert::{delete_params, pod_from_kube};

/// [`PodApi`] over the Kubernetes core/v1 pods endpoint.
#[derive(Clone)]
pub struct KubePodApi {
    client: Client,
}

impl KubePodApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn pods(&self, namespace: &str) -> Api<KubePod> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

#[async_trait]
impl PodApi for KubePodApi {
    fn name(&self) -> &'static str {
        "kubernetes"
    }

    #[instrument(level = "debug", skip(self))]
    async fn list(
        &self,
        namespace: &str,
        label_selector: Option<&str>,
    ) -> Result<Vec<Pod>, PodApiError> {
        let params = match label_selector {
            Some(selector) => ListParams::default().labels(selector),
            None => ListParams::default(),
        };
        let list = self.pods(namespace).list(&params).await.map_err(api_error)?;
        debug!(count = list.items.len(), "pods listed");

        list.items.iter().map(pod_from_kube).collect()
    }

    #[instrument(level = "debug", skip(self, req), fields(pod = %req))]
    async fn delete(&self, req: &DeleteRequest) -> Result<(), PodApiError> {
        let params = delete_params(req);
        trace!(grace_period_seconds = ?params.grace_period_seconds, dry_run = params.dry_run, "sending delete");

        self.pods(&req.namespace)
            .delete(&req.name, &params)
            .await
            .map(|_| ())
            .map_err(api_error)
    }
}

fn api_error(err: kube::Error) -> PodApiError {
    match err {
        kube::Error::Api(resp) if resp.code == 404 => PodApiError::NotFound(resp.message),
        kube::Error::Api(resp) => PodApiError::Rejected {
            code: resp.code,
            message: resp.message,
        },
        other => PodApiError::Transport(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::core::ErrorResponse;
    use serde_json::json;

    fn api_status(code: u16, message: &str) -> kube::Error {
        let resp: ErrorResponse = serde_json::from_value(json!({
            "status": "Failure",
            "message": message,
            "reason": "",
            "code": code
        }))
        .unwrap();
        kube::Error::Api(resp)
    }

    #[test]
    fn not_found_status_maps_to_not_found() {
        let err = api_error(api_status(404, "pods \"web-0\" not found"));
        assert!(matches!(err, PodApiError::NotFound(ref msg) if msg.contains("web-0")));
    }

    #[test]
    fn other_statuses_keep_their_code() {
        for code in [403, 409, 500] {
            let err = api_error(api_status(code, "nope"));
            assert!(
                matches!(err, PodApiError::Rejected { code: c, .. } if c == code),
                "expected Rejected({code}), got {err:?}"
            );
        }
    }

    #[test]
    fn non_api_errors_are_transport_errors() {
        let err = api_error(kube::Error::Service("connection refused".into()));
        assert!(matches!(err, PodApiError::Transport(ref msg) if msg.contains("connection refused")));
    }
}
