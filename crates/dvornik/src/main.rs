//! `dvornik`: deletes stale pods from one namespace, once.
//!
//! Configuration comes from `DVORNIK_*` environment variables (see [`config::Settings`]).
//! The run report goes to stdout; logs go to stderr. Any error exits non-zero.
mod config;

use std::io;

use anyhow::Context;
use time::OffsetDateTime;
use tracing::info;

use dvornik_core::run;
use dvornik_kube::{KubePodApi, connect};
use dvornik_observe::{init_local_offset, init_logger};

use crate::config::Settings;

fn main() -> anyhow::Result<()> {
    // 1) settings
    let settings = Settings::from_env().context("failed to read DVORNIK_* environment")?;

    // 2) logger
    init_local_offset();
    let logger = settings.logger().context("invalid logger configuration")?;
    init_logger(&logger)?;

    // 3) run parameters, validated before any remote call
    let params = settings
        .run_parameters()
        .context("invalid run configuration")?;
    info!(
        namespace = params.namespace(),
        max_age_min = params.max_age().whole_minutes(),
        policy = params.policy().mode(),
        "configuration loaded"
    );

    // 4) single-threaded runtime: one list, then one delete per pod
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;

    rt.block_on(async {
        let client = connect(settings.kubeconfig().as_deref())
            .await
            .context("failed to set up cluster session")?;
        let api = KubePodApi::new(client);

        let summary = run(&api, &params, OffsetDateTime::now_utc(), io::stdout().lock()).await?;
        info!(
            listed = summary.listed,
            removed = summary.removed(),
            "done"
        );
        Ok::<(), anyhow::Error>(())
    })
}
