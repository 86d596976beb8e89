//! 多源聚合
//!
//! 按注册顺序逐个轮询适配器，把原始行清洗为 [`CandidateRecord`]。
//! 任意子集的适配器失败都不会中止本次运行：失败的源贡献零条记录。

use std::net::Ipv4Addr;
use std::sync::Arc;

use crate::classify::classify;
use crate::sources::{SourceAdapter, parse_latency_ms};
use crate::types::{CandidateRecord, RawCandidate};

/// Poll every adapter in order and merge the surviving rows.
///
/// Row-level failures are dropped silently (with a `debug` log): unparsable
/// latency text and malformed IPv4 content. Adapter-level failures degrade to
/// an empty contribution with a `warn` log. Output order follows adapter
/// registration order; downstream selection re-sorts.
pub async fn aggregate(adapters: &[Arc<dyn SourceAdapter>]) -> Vec<CandidateRecord> {
    let mut records = Vec::new();

    for adapter in adapters {
        match adapter.fetch().await {
            Ok(rows) => {
                let fetched = rows.len();
                let before = records.len();
                records.extend(rows.iter().filter_map(candidate_from_raw));
                log::info!(
                    "{}: 抓取 {fetched} 行，保留 {} 条候选",
                    adapter.name(),
                    records.len() - before
                );
            }
            Err(e) => {
                log::warn!("{} 抓取失败，本源贡献为空: {e}", adapter.name());
            }
        }
    }

    records
}

/// 单行清洗：延迟解析 + IPv4 校验 + 运营商分类
fn candidate_from_raw(raw: &RawCandidate) -> Option<CandidateRecord> {
    let Some(latency_ms) = parse_latency_ms(&raw.latency_text) else {
        log::debug!("丢弃行（延迟无法解析）: {:?} {:?}", raw.ip, raw.latency_text);
        return None;
    };

    if raw.ip.parse::<Ipv4Addr>().is_err() {
        log::debug!("丢弃行（非法 IPv4）: {:?}", raw.ip);
        return None;
    }

    Some(CandidateRecord {
        ip: raw.ip.clone(),
        label: raw.label.clone(),
        latency_ms,
        operator: classify(&raw.label),
    })
}
