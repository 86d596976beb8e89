//! Cloudflare HTTP 请求方法

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, Result};
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::{CF_API_BASE, CloudflareResponse, CloudflareZoneClient};

impl CloudflareZoneClient {
    /// 附加认证头
    ///
    /// 始终发送 Bearer Token；配置了邮箱时额外发送 `X-Auth-Email`
    /// （旧版 Global API Key 两者都要求）。
    fn with_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header("Authorization", format!("Bearer {}", self.api_token));
        match &self.api_email {
            Some(email) => builder.header("X-Auth-Email", email),
            None => builder,
        }
    }

    fn map_send_error(&self, e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            self.timeout_error(e)
        } else {
            self.network_error(e)
        }
    }

    /// 读取响应体并解包 Cloudflare 通用 envelope
    async fn unwrap_envelope<T: for<'de> Deserialize<'de>>(
        &self,
        response: Response,
        context: ErrorContext,
    ) -> Result<CloudflareResponse<T>> {
        let status = response.status();
        log::debug!("Response Status: {status}");

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());
            return Err(ProviderError::RateLimited {
                provider: self.provider_name().to_string(),
                retry_after,
                raw_message: None,
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| self.network_error(format!("读取响应失败: {e}")))?;

        log::debug!("Response Body: {response_text}");

        let cf_response: CloudflareResponse<T> =
            serde_json::from_str(&response_text).map_err(|e| {
                log::error!("JSON 解析失败: {e}");
                log::error!("原始响应: {response_text}");
                self.parse_error(e)
            })?;

        if !cf_response.success {
            let (code, message) = cf_response
                .errors
                .and_then(|errors| {
                    errors
                        .first()
                        .map(|e| (e.code.to_string(), e.message.clone()))
                })
                .unwrap_or_else(|| (String::new(), "Unknown error".to_string()));
            log::error!("API 错误: {message}");
            return Err(self.map_error(RawApiError::with_code(code, message), context));
        }

        Ok(cf_response)
    }

    /// 执行 GET 请求，返回 result 字段
    pub(crate) async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        context: ErrorContext,
    ) -> Result<T> {
        let url = format!("{CF_API_BASE}{path}");
        log::debug!("GET {url}");

        let response = self
            .with_auth(self.client.get(&url))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let cf_response = self.unwrap_envelope(response, context).await?;
        cf_response
            .result
            .ok_or_else(|| self.parse_error("响应中缺少 result 字段"))
    }

    /// 执行 GET 请求（列表），返回 (items, total_count)
    pub(crate) async fn get_list<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        context: ErrorContext,
    ) -> Result<(Vec<T>, u32)> {
        let url = format!("{CF_API_BASE}{path}");
        log::debug!("GET {url}");

        let response = self
            .with_auth(self.client.get(&url))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let cf_response: CloudflareResponse<Vec<T>> =
            self.unwrap_envelope(response, context).await?;
        let total_count = cf_response.result_info.map_or(0, |i| i.total_count);
        let items = cf_response.result.unwrap_or_default();

        Ok((items, total_count))
    }

    /// 执行 POST 请求
    pub(crate) async fn post<T: for<'de> Deserialize<'de>, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        context: ErrorContext,
    ) -> Result<T> {
        let url = format!("{CF_API_BASE}{path}");
        log::debug!("POST {url}");

        let response = self
            .with_auth(self.client.post(&url))
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let cf_response = self.unwrap_envelope(response, context).await?;
        cf_response
            .result
            .ok_or_else(|| self.parse_error("响应中缺少 result 字段"))
    }

    /// 执行 DELETE 请求
    pub(crate) async fn delete(&self, path: &str, context: ErrorContext) -> Result<()> {
        let url = format!("{CF_API_BASE}{path}");
        log::debug!("DELETE {url}");

        let response = self
            .with_auth(self.client.delete(&url))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let _: CloudflareResponse<serde_json::Value> =
            self.unwrap_envelope(response, context).await?;
        Ok(())
    }
}
