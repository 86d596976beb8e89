//! DNS zone 调和
//!
//! 把 zone 内托管主机名下的 A 记录集合驱动到与选优结果一致：
//! Clearing（清空旧记录）→ Settling（等待删除可见）→ Syncing（幂等补建）。
//!
//! 全程尽力而为：单条删除/创建失败只计数并继续，任何阶段都不重试。
//! 相邻写调用之间的固定停顿是正确性要求（供应商限速），不是优化。

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use yxip_sync_provider::{CreateRecordRequest, ProviderError, ZoneApi, ZoneRecord};

use crate::types::{ReconcileSummary, SelectionResult};

/// Clearing 阶段每次删除之间的停顿
const DEFAULT_DELETE_PAUSE: Duration = Duration::from_millis(300);
/// Clearing 结束后等待删除在供应商侧可见的窗口
const DEFAULT_SETTLE_PAUSE: Duration = Duration::from_secs(3);
/// Syncing 阶段每次创建之间的停顿
const DEFAULT_CREATE_PAUSE: Duration = Duration::from_millis(300);

/// 单次 list 调用的页大小
const LIST_PAGE_SIZE: u32 = 100;

/// 调和参数
#[derive(Debug, Clone)]
pub struct ReconcileOptions {
    /// 托管主机名；它本身及其所有子域下的记录都视为本工具所有、可随时删除
    pub hostname: String,
    /// 新建记录的 TTL（秒）
    pub ttl: u32,
    /// 删除节流间隔
    pub delete_pause: Duration,
    /// 删除后的一致性等待窗口
    pub settle_pause: Duration,
    /// 创建节流间隔
    pub create_pause: Duration,
}

impl ReconcileOptions {
    /// 以默认节流间隔构造
    #[must_use]
    pub fn new(hostname: impl Into<String>, ttl: u32) -> Self {
        Self {
            hostname: hostname.into(),
            ttl,
            delete_pause: DEFAULT_DELETE_PAUSE,
            settle_pause: DEFAULT_SETTLE_PAUSE,
            create_pause: DEFAULT_CREATE_PAUSE,
        }
    }

    /// 关闭所有停顿（测试用）
    #[must_use]
    pub fn without_pacing(mut self) -> Self {
        self.delete_pause = Duration::ZERO;
        self.settle_pause = Duration::ZERO;
        self.create_pause = Duration::ZERO;
        self
    }
}

/// Zone 调和器
///
/// 对同一 zone 的并发运行必须由调用方串行化（外部调度器锁）；
/// 运行期间假定独占托管主机名下的全部记录。
pub struct Reconciler {
    zone: Arc<dyn ZoneApi>,
    opts: ReconcileOptions,
}

impl Reconciler {
    #[must_use]
    pub fn new(zone: Arc<dyn ZoneApi>, opts: ReconcileOptions) -> Self {
        Self { zone, opts }
    }

    /// Drive the zone to match `result`. Always runs to completion;
    /// failures are recorded in the returned counts.
    pub async fn reconcile(&self, result: &SelectionResult) -> ReconcileSummary {
        let mut summary = ReconcileSummary::default();

        log::info!(
            "开始调和 {}：{} 条候选",
            self.opts.hostname,
            result.total()
        );

        self.clear_managed_records(&mut summary).await;

        if !self.opts.settle_pause.is_zero() {
            log::debug!("等待删除生效 ({:?})", self.opts.settle_pause);
            sleep(self.opts.settle_pause).await;
        }

        self.sync_records(result, &mut summary).await;

        log::info!(
            "调和完成: 清除 {} / 新建 {} / 跳过 {} / 失败 {}",
            summary.cleared,
            summary.created,
            summary.skipped,
            summary.failed
        );
        summary
    }

    /// 记录是否归本工具所有：与托管主机名相同，或是其子域
    fn is_managed(&self, record_name: &str) -> bool {
        record_name == self.opts.hostname
            || record_name
                .strip_suffix(&self.opts.hostname)
                .is_some_and(|prefix| prefix.ends_with('.'))
    }

    /// Clearing：列出并删除托管主机名下的所有记录
    async fn clear_managed_records(&self, summary: &mut ReconcileSummary) {
        let mut owned: Vec<ZoneRecord> = Vec::new();
        let mut page = 1;

        loop {
            match self.zone.list_records(page, LIST_PAGE_SIZE).await {
                Ok(record_page) => {
                    owned.extend(
                        record_page
                            .items
                            .into_iter()
                            .filter(|r| self.is_managed(&r.name)),
                    );
                    if !record_page.has_more {
                        break;
                    }
                    page += 1;
                }
                Err(e) => {
                    // 列不出来就清不了；跳过 Clearing，Syncing 仍然执行
                    log_provider_error("列出 DNS 记录失败", &e);
                    summary.failed += 1;
                    return;
                }
            }
        }

        log::info!("找到 {} 条托管记录需要删除", owned.len());

        for record in owned {
            match self.zone.delete_record(&record.id).await {
                Ok(()) => {
                    summary.cleared += 1;
                    log::info!("已删除 {} {} -> {}", record.record_type, record.name, record.content);
                }
                Err(e) => {
                    summary.failed += 1;
                    log_provider_error(&format!("删除记录 {} 失败", record.id), &e);
                }
            }
            if !self.opts.delete_pause.is_zero() {
                sleep(self.opts.delete_pause).await;
            }
        }
    }

    /// Syncing：按固定运营商顺序展开候选，逐个幂等补建 A 记录
    async fn sync_records(&self, result: &SelectionResult, summary: &mut ReconcileSummary) {
        for record in result.flattened() {
            // 创建前再校验一次，坏 IP 不打网络调用
            if record.ip.parse::<Ipv4Addr>().is_err() {
                summary.failed += 1;
                log::warn!("跳过非法 IPv4: {:?}", record.ip);
                continue;
            }

            match self
                .zone
                .find_records(&self.opts.hostname, "A", &record.ip)
                .await
            {
                Ok(existing) if !existing.is_empty() => {
                    summary.skipped += 1;
                    log::debug!("记录已存在，跳过: {}", record.ip);
                    continue;
                }
                Ok(_) => {}
                Err(e) => {
                    summary.failed += 1;
                    log_provider_error(&format!("查询记录 {} 失败", record.ip), &e);
                    continue;
                }
            }

            let request =
                CreateRecordRequest::a(&self.opts.hostname, &record.ip, self.opts.ttl);
            match self.zone.create_record(&request).await {
                Ok(created) => {
                    summary.created += 1;
                    log::info!("已创建 A {} -> {}", created.name, created.content);
                }
                // 查询与创建之间被别处补上也算已存在，终态一致
                Err(ProviderError::RecordExists { .. }) => {
                    summary.skipped += 1;
                    log::debug!("记录已存在（创建竞争），跳过: {}", record.ip);
                }
                Err(e) => {
                    summary.failed += 1;
                    log_provider_error(&format!("创建记录 {} 失败", record.ip), &e);
                }
            }

            if !self.opts.create_pause.is_zero() {
                sleep(self.opts.create_pause).await;
            }
        }
    }
}

/// 按错误性质分级记录
fn log_provider_error(context: &str, e: &ProviderError) {
    if e.is_expected() {
        log::warn!("{context}: {e}");
    } else {
        log::error!("{context}: {e}");
    }
}
