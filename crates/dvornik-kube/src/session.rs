use std::path::Path;

use kube::{
    Client, Config,
    config::{KubeConfigOptions, Kubeconfig},
};
use tracing::{debug, info, warn};

use crate::KubeError;

/// Build a cluster client.
///
/// With an explicit `kubeconfig` the file is tried first and the in-cluster service
/// account is the fallback. Without one, the usual inference applies
/// (`KUBECONFIG`, `~/.kube/config`, then in-cluster).
pub async fn connect(kubeconfig: Option<&Path>) -> Result<Client, KubeError> {
    let config = match kubeconfig {
        Some(path) => match from_file(path).await {
            Ok(config) => {
                info!(path = %path.display(), "using kubeconfig");
                config
            }
            Err(e) => {
                warn!(error = %e, "kubeconfig unusable, falling back to in-cluster config");
                Config::incluster().map_err(|e| KubeError::NoConfig(e.to_string()))?
            }
        },
        None => Config::infer()
            .await
            .map_err(|e| KubeError::NoConfig(e.to_string()))?,
    };
    debug!(cluster = %config.cluster_url, "cluster config resolved");

    Client::try_from(config).map_err(|e| KubeError::Client(e.to_string()))
}

async fn from_file(path: &Path) -> Result<Config, KubeError> {
    let kubeconfig_err = |reason: String| KubeError::Kubeconfig {
        path: path.display().to_string(),
        reason,
    };
    let kubeconfig = Kubeconfig::read_from(path).map_err(|e| kubeconfig_err(e.to_string()))?;
    Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
        .await
        .map_err(|e| kubeconfig_err(e.to_string()))
}
