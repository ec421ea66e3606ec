use thiserror::Error;

#[derive(Debug, Error)]
pub enum KubeError {
    #[error("failed to load kubeconfig {path}: {reason}")]
    Kubeconfig { path: String, reason: String },

    #[error("no usable cluster configuration: {0}")]
    NoConfig(String),

    #[error("failed to build cluster client: {0}")]
    Client(String),
}
