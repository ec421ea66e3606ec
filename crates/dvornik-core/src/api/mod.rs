//! Seam between the collector and the orchestrator.
//!
//! The core only needs two remote calls: list the pods of a namespace once,
//! then delete eligible pods one by one. Backends implement [`PodApi`].
mod error;
pub use error::PodApiError;

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;
use dvornik_model::{DeleteRequest, Pod};

/// Remote pod collection used by a run.
#[async_trait]
pub trait PodApi: Send + Sync {
    /// Backend name used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// List pods in `namespace`, in the order the orchestrator returns them.
    ///
    /// `label_selector` is passed through to the orchestrator unchanged.
    async fn list(
        &self,
        namespace: &str,
        label_selector: Option<&str>,
    ) -> Result<Vec<Pod>, PodApiError>;

    /// Delete one pod with the grace handling carried by `req`.
    async fn delete(&self, req: &DeleteRequest) -> Result<(), PodApiError>;
}
