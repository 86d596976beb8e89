//! 每运营商 Top-K 选优

use std::cmp::Ordering;

use crate::types::{CandidateRecord, OperatorTag, SelectionResult};

/// 选优参数
#[derive(Debug, Clone)]
pub struct SelectOptions {
    /// 每运营商保留的最大候选数
    pub top_k: usize,
    /// 延迟上限（毫秒，严格小于）；`None` 不设上限
    pub max_latency_ms: Option<f64>,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            top_k: 10,
            max_latency_ms: None,
        }
    }
}

/// Filter, dedup, partition, sort and truncate candidates per operator.
///
/// - `Other` records never participate.
/// - Dedup is by `ip` within each operator; the **first occurrence wins**,
///   which is deterministic because adapters are polled in a fixed order.
/// - Sort is ascending by `latency_ms`, ties broken lexicographically by `ip`.
/// - `top_k = 0` and empty partitions are valid degenerate outcomes.
#[must_use]
pub fn select(records: &[CandidateRecord], opts: &SelectOptions) -> SelectionResult {
    let mut result = SelectionResult::default();

    for record in records {
        if let Some(max) = opts.max_latency_ms
            && record.latency_ms >= max
        {
            continue;
        }

        // Other 没有分区，直接落选
        let Some(bucket) = result.operator_mut(record.operator) else {
            continue;
        };

        if bucket.iter().any(|existing| existing.ip == record.ip) {
            continue;
        }
        bucket.push(record.clone());
    }

    for tag in OperatorTag::SELECTABLE {
        if let Some(bucket) = result.operator_mut(tag) {
            bucket.sort_by(|a, b| {
                a.latency_ms
                    .partial_cmp(&b.latency_ms)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| a.ip.cmp(&b.ip))
            });
            bucket.truncate(opts.top_k);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;

    fn rec(ip: &str, label: &str, latency_ms: f64) -> CandidateRecord {
        CandidateRecord {
            ip: ip.to_string(),
            label: label.to_string(),
            latency_ms,
            operator: classify(label),
        }
    }

    fn opts(top_k: usize) -> SelectOptions {
        SelectOptions {
            top_k,
            max_latency_ms: None,
        }
    }

    #[test]
    fn dedup_first_occurrence_wins() {
        // 重复 IP 只保留先见的那条，连同其延迟
        let records = vec![
            rec("1.1.1.1", "CM-移动", 20.0),
            rec("2.2.2.2", "联通CU", 15.0),
            rec("1.1.1.1", "移动", 18.0),
        ];
        let result = select(&records, &opts(10));

        assert_eq!(result.mobile.len(), 1);
        assert_eq!(result.mobile[0].ip, "1.1.1.1");
        assert!((result.mobile[0].latency_ms - 20.0).abs() < f64::EPSILON);

        assert_eq!(result.unicom.len(), 1);
        assert_eq!(result.unicom[0].ip, "2.2.2.2");

        assert!(result.telecom.is_empty());
    }

    #[test]
    fn sorted_ascending_by_latency() {
        let records = vec![
            rec("3.3.3.3", "电信", 50.0),
            rec("1.1.1.1", "电信", 10.0),
            rec("2.2.2.2", "电信", 30.0),
        ];
        let result = select(&records, &opts(10));
        let latencies: Vec<f64> = result.telecom.iter().map(|r| r.latency_ms).collect();
        assert_eq!(latencies, [10.0, 30.0, 50.0]);
    }

    #[test]
    fn latency_ties_break_by_ip() {
        let records = vec![
            rec("9.9.9.9", "移动", 25.0),
            rec("1.1.1.1", "移动", 25.0),
        ];
        let result = select(&records, &opts(10));
        let ips: Vec<&str> = result.mobile.iter().map(|r| r.ip.as_str()).collect();
        assert_eq!(ips, ["1.1.1.1", "9.9.9.9"]);
    }

    #[test]
    fn truncates_to_top_k() {
        let records: Vec<CandidateRecord> = (0..20)
            .map(|i| rec(&format!("10.0.0.{i}"), "移动", f64::from(i)))
            .collect();
        let result = select(&records, &opts(10));
        assert_eq!(result.mobile.len(), 10);
        // 保留的是延迟最低的 K 个
        assert!((result.mobile[9].latency_ms - 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn no_duplicate_ips_per_operator() {
        let records = vec![
            rec("1.1.1.1", "移动", 20.0),
            rec("1.1.1.1", "移动广州", 5.0),
            rec("1.1.1.1", "CMCC", 8.0),
        ];
        let result = select(&records, &opts(10));
        assert_eq!(result.mobile.len(), 1);
    }

    #[test]
    fn other_records_are_discarded() {
        let records = vec![rec("4.4.4.4", "教育网", 1.0), rec("5.5.5.5", "", 2.0)];
        let result = select(&records, &opts(10));
        assert!(result.is_empty());
    }

    #[test]
    fn k_zero_yields_all_empty() {
        let records = vec![rec("1.1.1.1", "移动", 20.0)];
        let result = select(&records, &opts(0));
        assert!(result.is_empty());
    }

    #[test]
    fn empty_input_yields_empty_result() {
        let result = select(&[], &opts(10));
        assert!(result.is_empty());
    }

    #[test]
    fn max_latency_cutoff_is_strict() {
        let records = vec![
            rec("1.1.1.1", "移动", 99.9),
            rec("2.2.2.2", "移动", 100.0),
            rec("3.3.3.3", "移动", 150.0),
        ];
        let result = select(
            &records,
            &SelectOptions {
                top_k: 10,
                max_latency_ms: Some(100.0),
            },
        );
        let ips: Vec<&str> = result.mobile.iter().map(|r| r.ip.as_str()).collect();
        assert_eq!(ips, ["1.1.1.1"]);
    }

    #[test]
    fn same_ip_in_different_operators_is_kept() {
        // 去重按运营商分区进行，跨分区允许相同 IP
        let records = vec![
            rec("1.1.1.1", "移动", 20.0),
            rec("1.1.1.1", "电信", 30.0),
        ];
        let result = select(&records, &opts(10));
        assert_eq!(result.mobile.len(), 1);
        assert_eq!(result.telecom.len(), 1);
    }
}
