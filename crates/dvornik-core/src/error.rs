use thiserror::Error;

use crate::{api::PodApiError, params::ConfigError};

/// Terminal failure of a collection run.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to list pods in namespace '{namespace}': {source}")]
    List {
        namespace: String,
        source: PodApiError,
    },

    #[error("failed to delete pod '{pod}': {source}")]
    Delete { pod: String, source: PodApiError },

    #[error("{failed} of {total} pod deletions failed")]
    PartialRemoval { failed: usize, total: usize },

    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),
}
