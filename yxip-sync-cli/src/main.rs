//! Batch entry point for yxip-sync.
//!
//! One run walks the whole pipeline: fetch latency tables from the
//! measurement sites, pick the fastest IPs per operator, write the
//! snapshot file, then reconcile the managed Cloudflare records.
//! The process exits non-zero only when configuration or credentials
//! are unusable; partial DNS failures are reported in the summary.

mod config;

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use yxip_sync_core::sources::{Cf090227Source, HostmonitSource, Ip164746Source};
use yxip_sync_core::{
    ReconcileOptions, Reconciler, SelectOptions, SourceAdapter, aggregate, select, write_snapshot,
};
use yxip_sync_provider::{CloudflareZoneClient, ZoneApi};

use config::Config;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    run(config).await
}

async fn run(config: Config) -> ExitCode {
    tracing::info!("Starting yxip-sync for {}", config.hostname);

    // 注册顺序固定：聚合与去重依赖稳定的输入顺序
    let adapters: Vec<Arc<dyn SourceAdapter>> = vec![
        Arc::new(Cf090227Source::new()),
        Arc::new(HostmonitSource::new()),
        Arc::new(Ip164746Source::new()),
    ];

    let candidates = aggregate(&adapters).await;
    if candidates.is_empty() {
        tracing::warn!("No candidates from any source; managed records will be cleared");
    }

    let result = select(
        &candidates,
        &SelectOptions {
            top_k: config.top_k,
            max_latency_ms: Some(config.max_latency_ms),
        },
    );
    tracing::info!(
        "Selected {} candidates (mobile {}, unicom {}, telecom {})",
        result.total(),
        result.mobile.len(),
        result.unicom.len(),
        result.telecom.len()
    );

    // 快照写失败不阻塞调和
    if let Err(e) = write_snapshot(&config.snapshot_path, &result) {
        tracing::error!(
            "Failed to write snapshot {}: {e}",
            config.snapshot_path.display()
        );
    }

    let zone: Arc<dyn ZoneApi> = Arc::new(CloudflareZoneClient::new(
        config.api_token,
        config.api_email,
        config.zone_id,
    ));

    if !token_allows_run(&zone.verify_token().await) {
        return ExitCode::FAILURE;
    }

    let reconciler = Reconciler::new(zone, ReconcileOptions::new(config.hostname, config.ttl));
    let summary = reconciler.reconcile(&result).await;

    if summary.failed > 0 {
        tracing::warn!("Run finished with {} failed DNS calls", summary.failed);
    }
    ExitCode::SUCCESS
}

/// 只有接口明确判定 token 失活才中止运行；校验接口本身不可用按瞬时
/// 故障处理，照常继续，由调和阶段自行失败计数
fn token_allows_run(outcome: &yxip_sync_provider::Result<bool>) -> bool {
    match outcome {
        Ok(true) => {
            tracing::debug!("Cloudflare API token verified");
            true
        }
        Ok(false) => {
            tracing::error!("Cloudflare API token is not active");
            false
        }
        Err(e) => {
            tracing::warn!("Token verification unavailable, continuing: {e}");
            true
        }
    }
}
