//! ip.164746.xyz 适配器

use async_trait::async_trait;
use reqwest::Client;

use crate::error::CoreResult;
use crate::types::RawCandidate;

use super::{SourceAdapter, create_http_client, fetch_document, row_cells, table_rows};

const SOURCE_NAME: &str = "ip.164746.xyz";
const DEFAULT_URL: &str = "https://ip.164746.xyz/";

/// ip.164746.xyz：五列表格，IP 在第 1 列、延迟在第 5 列，没有线路列。
///
/// 行的 `label` 为空，分类恒为 `Other`，因此该源只对日志/快照之外的
/// 观察有意义，不会进入选优结果 — 与上游行为一致。
pub struct Ip164746Source {
    client: Client,
    url: String,
}

impl Ip164746Source {
    #[must_use]
    pub fn new() -> Self {
        Self::with_url(DEFAULT_URL.to_string())
    }

    /// 指定抓取地址（测试用）
    #[must_use]
    pub fn with_url(url: String) -> Self {
        Self {
            client: create_http_client(),
            url,
        }
    }

    fn parse(html: &str) -> Vec<RawCandidate> {
        let mut rows = Vec::new();
        for row in table_rows(html) {
            let cells = row_cells(row);
            if cells.len() >= 5 {
                rows.push(RawCandidate {
                    label: String::new(),
                    ip: cells[0].clone(),
                    latency_text: cells[4].clone(),
                });
            }
        }
        rows
    }
}

impl Default for Ip164746Source {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SourceAdapter for Ip164746Source {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn fetch(&self) -> CoreResult<Vec<RawCandidate>> {
        let html = fetch_document(&self.client, SOURCE_NAME, &self.url).await?;
        Ok(Self::parse(&html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ip_and_latency_columns() {
        let html = r"<table>
            <tr><td>104.17.1.1</td><td>US</td><td>99%</td><td>1.2MB/s</td><td>150.55ms</td></tr>
            <tr><td>104.17.2.2</td><td>SG</td><td>98%</td><td>0.9MB/s</td><td>88ms</td></tr>
            <tr><td>短行</td><td>x</td></tr>
        </table>";

        let rows = Ip164746Source::parse(html);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].ip, "104.17.1.1");
        assert_eq!(rows[0].latency_text, "150.55ms");
        assert!(rows[0].label.is_empty());
    }
}
