//! Cloudflare Zone API 客户端

mod error;
mod http;
mod provider;
mod types;

use std::time::Duration;

use reqwest::Client;

pub(crate) use types::{CloudflareDnsRecord, CloudflareResponse};

pub(crate) const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";
/// Cloudflare DNS Records API 单页最大记录数
pub(crate) const MAX_PAGE_SIZE_RECORDS: u32 = 100;

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// 创建带超时配置的 HTTP Client
fn create_http_client() -> Client {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .expect("Failed to create HTTP client")
}

/// Cloudflare Zone API 客户端
///
/// 固定作用于一个 zone；所有记录操作都在该 zone 范围内。
pub struct CloudflareZoneClient {
    pub(crate) client: Client,
    pub(crate) api_token: String,
    /// 旧版 API Key 场景下需要附带的账户邮箱（`X-Auth-Email`）
    pub(crate) api_email: Option<String>,
    pub(crate) zone_id: String,
}

impl CloudflareZoneClient {
    #[must_use]
    pub fn new(api_token: String, api_email: Option<String>, zone_id: String) -> Self {
        Self {
            client: create_http_client(),
            api_token,
            api_email,
            zone_id,
        }
    }
}
