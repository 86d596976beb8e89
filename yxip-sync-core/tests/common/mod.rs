//! 共享测试工具：内存版 ZoneApi

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use yxip_sync_provider::{
    CreateRecordRequest, ProviderError, RecordPage, Result, ZoneApi, ZoneRecord,
};

use yxip_sync_core::types::{CandidateRecord, OperatorTag, SelectionResult};

/// 内存 zone，带可编排的失败注入与调用计数
#[derive(Default)]
pub struct MockZone {
    records: Mutex<Vec<ZoneRecord>>,
    next_id: AtomicUsize,
    /// 删除这些 id 时返回网络错误
    pub fail_delete_ids: Mutex<HashSet<String>>,
    /// 创建这些 content 时返回网络错误
    pub fail_create_contents: Mutex<HashSet<String>>,
    /// `list_records` 直接失败
    pub fail_list: Mutex<bool>,
    pub find_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
}

impl MockZone {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置一条 A 记录
    pub fn seed_a(&self, name: &str, ip: &str) -> String {
        let id = format!("rec-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        self.records
            .lock()
            .unwrap()
            .push(ZoneRecord {
                id: id.clone(),
                name: name.to_string(),
                record_type: "A".to_string(),
                content: ip.to_string(),
                ttl: 60,
                proxied: Some(false),
            });
        id
    }

    /// 当前 zone 内指定名字的 A 记录内容（排序后，便于断言）
    pub fn a_contents(&self, name: &str) -> Vec<String> {
        let mut contents: Vec<String> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.name == name && r.record_type == "A")
            .map(|r| r.content.clone())
            .collect();
        contents.sort();
        contents
    }

    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    fn network_error(detail: &str) -> ProviderError {
        ProviderError::NetworkError {
            provider: "mock".to_string(),
            detail: detail.to_string(),
        }
    }
}

#[async_trait]
impl ZoneApi for MockZone {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn verify_token(&self) -> Result<bool> {
        Ok(true)
    }

    async fn list_records(&self, page: u32, per_page: u32) -> Result<RecordPage> {
        if *self.fail_list.lock().unwrap() {
            return Err(Self::network_error("list unavailable"));
        }

        let records = self.records.lock().unwrap();
        let total = u32::try_from(records.len()).unwrap();
        let start = ((page.max(1) - 1) * per_page) as usize;
        let items: Vec<ZoneRecord> = records
            .iter()
            .skip(start)
            .take(per_page as usize)
            .cloned()
            .collect();
        Ok(RecordPage::new(items, page.max(1), per_page, total))
    }

    async fn find_records(
        &self,
        name: &str,
        record_type: &str,
        content: &str,
    ) -> Result<Vec<ZoneRecord>> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.name == name && r.record_type == record_type && r.content == content)
            .cloned()
            .collect())
    }

    async fn create_record(&self, req: &CreateRecordRequest) -> Result<ZoneRecord> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);

        if self
            .fail_create_contents
            .lock()
            .unwrap()
            .contains(&req.content)
        {
            return Err(Self::network_error("create refused"));
        }

        let mut records = self.records.lock().unwrap();
        // 与 Cloudflare 81058 对齐：完全相同的 (name, type, content) 视为已存在
        if records.iter().any(|r| {
            r.name == req.name && r.record_type == req.record_type && r.content == req.content
        }) {
            return Err(ProviderError::RecordExists {
                provider: "mock".to_string(),
                record_name: req.name.clone(),
                raw_message: None,
            });
        }

        let record = ZoneRecord {
            id: format!("rec-{}", self.next_id.fetch_add(1, Ordering::SeqCst)),
            name: req.name.clone(),
            record_type: req.record_type.clone(),
            content: req.content.clone(),
            ttl: req.ttl,
            proxied: req.proxied,
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn delete_record(&self, record_id: &str) -> Result<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_delete_ids.lock().unwrap().contains(record_id) {
            return Err(Self::network_error("delete refused"));
        }

        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != record_id);
        if records.len() == before {
            return Err(ProviderError::RecordNotFound {
                provider: "mock".to_string(),
                record_id: record_id.to_string(),
                raw_message: None,
            });
        }
        Ok(())
    }
}

/// 构造一条候选
pub fn candidate(ip: &str, label: &str, latency_ms: f64, operator: OperatorTag) -> CandidateRecord {
    CandidateRecord {
        ip: ip.to_string(),
        label: label.to_string(),
        latency_ms,
        operator,
    }
}

/// 只含移动候选的选优结果
pub fn mobile_result(ips: &[&str]) -> SelectionResult {
    SelectionResult {
        mobile: ips
            .iter()
            .enumerate()
            .map(|(i, ip)| candidate(ip, "移动", 10.0 + i as f64, OperatorTag::Mobile))
            .collect(),
        ..SelectionResult::default()
    }
}
