//! Cloudflare ZoneApi trait 实现

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Result;
use crate::traits::{ErrorContext, ZoneApi};
use crate::types::{CreateRecordRequest, RecordPage, ZoneRecord};

use super::{CloudflareDnsRecord, CloudflareZoneClient, MAX_PAGE_SIZE_RECORDS};

impl CloudflareZoneClient {
    /// 将 Cloudflare 记录转换为 `ZoneRecord`
    fn cf_record_to_zone_record(cf_record: CloudflareDnsRecord) -> ZoneRecord {
        ZoneRecord {
            id: cf_record.id,
            name: cf_record.name,
            record_type: cf_record.record_type,
            content: cf_record.content,
            ttl: cf_record.ttl,
            proxied: cf_record.proxied,
        }
    }

    fn zone_context(&self) -> ErrorContext {
        ErrorContext {
            zone: Some(self.zone_id.clone()),
            ..ErrorContext::default()
        }
    }
}

#[async_trait]
impl ZoneApi for CloudflareZoneClient {
    fn id(&self) -> &'static str {
        "cloudflare"
    }

    async fn verify_token(&self) -> Result<bool> {
        #[derive(Deserialize)]
        struct VerifyResponse {
            status: String,
        }

        // 传输层失败原样上抛，Ok(false) 只代表接口明确返回了非激活状态
        let resp = self
            .get::<VerifyResponse>("/user/tokens/verify", ErrorContext::default())
            .await?;
        Ok(resp.status == "active")
    }

    async fn list_records(&self, page: u32, per_page: u32) -> Result<RecordPage> {
        let per_page = per_page.clamp(1, MAX_PAGE_SIZE_RECORDS);
        let url = format!(
            "/zones/{}/dns_records?page={}&per_page={}",
            self.zone_id,
            page.max(1),
            per_page
        );

        let (cf_records, total_count): (Vec<CloudflareDnsRecord>, u32) =
            self.get_list(&url, self.zone_context()).await?;

        let records = cf_records
            .into_iter()
            .map(Self::cf_record_to_zone_record)
            .collect();

        Ok(RecordPage::new(records, page.max(1), per_page, total_count))
    }

    async fn find_records(
        &self,
        name: &str,
        record_type: &str,
        content: &str,
    ) -> Result<Vec<ZoneRecord>> {
        let url = format!(
            "/zones/{}/dns_records?name={name}&type={record_type}&content={content}",
            self.zone_id
        );

        let context = ErrorContext {
            record_name: Some(name.to_string()),
            zone: Some(self.zone_id.clone()),
            ..ErrorContext::default()
        };

        let (cf_records, _): (Vec<CloudflareDnsRecord>, u32) =
            self.get_list(&url, context).await?;

        Ok(cf_records
            .into_iter()
            .map(Self::cf_record_to_zone_record)
            .collect())
    }

    async fn create_record(&self, req: &CreateRecordRequest) -> Result<ZoneRecord> {
        #[derive(serde::Serialize)]
        struct CreateRecordBody<'a> {
            #[serde(rename = "type")]
            record_type: &'a str,
            name: &'a str,
            content: &'a str,
            ttl: u32,
            #[serde(skip_serializing_if = "Option::is_none")]
            proxied: Option<bool>,
        }

        let body = CreateRecordBody {
            record_type: &req.record_type,
            name: &req.name,
            content: &req.content,
            ttl: req.ttl,
            proxied: req.proxied,
        };

        let context = ErrorContext {
            record_name: Some(req.name.clone()),
            zone: Some(self.zone_id.clone()),
            ..ErrorContext::default()
        };

        let cf_record: CloudflareDnsRecord = self
            .post(
                &format!("/zones/{}/dns_records", self.zone_id),
                &body,
                context,
            )
            .await?;

        Ok(Self::cf_record_to_zone_record(cf_record))
    }

    async fn delete_record(&self, record_id: &str) -> Result<()> {
        let context = ErrorContext {
            record_id: Some(record_id.to_string()),
            zone: Some(self.zone_id.clone()),
            ..ErrorContext::default()
        };

        self.delete(
            &format!("/zones/{}/dns_records/{record_id}", self.zone_id),
            context,
        )
        .await
    }
}
