//! Kubernetes backend for the collector.
//!
//! Builds a cluster session and exposes the namespaced pod collection through
//! [`dvornik_core::PodApi`].
mod error;
pub use error::KubeError;

mod convert;
pub use convert::{delete_params, pod_from_kube};

mod session;
pub use session::connect;

mod api;
pub use api::KubePodApi;
