//! 测速数据源适配器
//!
//! 每个源站一个适配器，显式注册、固定顺序轮询（聚合阶段的去重依赖稳定的
//! 输入顺序）。适配器只负责把页面还原成 [`RawCandidate`] 行；延迟解析、
//! IP 校验和运营商分类都在聚合阶段完成。

mod cf090227;
mod hostmonit;
mod html;
mod ip164746;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{CoreError, CoreResult};
use crate::types::RawCandidate;

pub use cf090227::Cf090227Source;
pub use hostmonit::HostmonitSource;
pub use ip164746::Ip164746Source;

pub(crate) use html::{parse_latency_ms, row_cells, table_rows, table_rows_with_class};

/// 源站要求浏览器 UA，否则部分站点返回空表
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// 创建带超时与 UA 的 HTTP Client
pub(crate) fn create_http_client() -> Client {
    Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .expect("Failed to create HTTP client")
}

/// 抓取页面正文；非 2xx 状态与传输错误统一为 `SourceFetch`
pub(crate) async fn fetch_document(
    client: &Client,
    source: &'static str,
    url: &str,
) -> CoreResult<String> {
    log::debug!("GET {url}");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| CoreError::SourceFetch {
            source_name: source,
            detail: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(CoreError::SourceFetch {
            source_name: source,
            detail: format!("status code: {status}"),
        });
    }

    response.text().await.map_err(|e| CoreError::SourceFetch {
        source_name: source,
        detail: format!("读取响应失败: {e}"),
    })
}

/// 测速数据源适配器
///
/// 约定：`fetch` 只在整页抓取/解析层面失败时返回错误（调用方降级为空贡献）；
/// 行级别的脏数据原样返回，由聚合阶段静默丢弃。
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// 源站标识符（日志用）
    fn name(&self) -> &'static str;

    /// 抓取并还原候选行，可能为空
    async fn fetch(&self) -> CoreResult<Vec<RawCandidate>>;
}
