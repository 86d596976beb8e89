use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{CreateRecordRequest, RecordPage, ZoneRecord};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// 错误码（各 Provider 格式不同）
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// 错误上下文信息（内部使用）
/// 用于在映射错误时提供额外信息
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// 记录名称（用于 `RecordExists` 等错误）
    pub record_name: Option<String>,
    /// 记录 ID（用于 `RecordNotFound` 等错误）
    pub record_id: Option<String>,
    /// Zone 标识（用于 `ZoneNotFound` 等错误）
    pub zone: Option<String>,
}

/// Provider 错误映射 Trait（内部使用）
/// 各 Provider 实现此 trait 以将原始 API 错误映射到统一错误类型
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 快捷方法：网络错误
    fn network_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::NetworkError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：超时错误
    fn timeout_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::Timeout {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// DNS Zone API 能力接口
///
/// 面向单个托管 zone 的记录读写能力。调和流程只依赖这一接口，
/// 不关心具体云平台；测试用内存实现替换。
#[async_trait]
pub trait ZoneApi: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// 验证凭证是否有效
    ///
    /// `Ok(false)` 仅表示接口明确判定凭证失活；传输失败必须上抛为 `Err`
    async fn verify_token(&self) -> Result<bool>;

    /// 列出 zone 内的 DNS 记录（分页）
    async fn list_records(&self, page: u32, per_page: u32) -> Result<RecordPage>;

    /// 按 (name, type, content) 精确查找记录
    ///
    /// 幂等创建的前置查询：返回空表示记录不存在。
    async fn find_records(
        &self,
        name: &str,
        record_type: &str,
        content: &str,
    ) -> Result<Vec<ZoneRecord>>;

    /// 创建 DNS 记录
    async fn create_record(&self, req: &CreateRecordRequest) -> Result<ZoneRecord>;

    /// 删除 DNS 记录
    async fn delete_record(&self, record_id: &str) -> Result<()>;
}
