//! stock.hostmonit.com CloudFlareYes 适配器

use async_trait::async_trait;
use reqwest::Client;

use crate::error::CoreResult;
use crate::types::RawCandidate;

use super::{SourceAdapter, create_http_client, fetch_document, row_cells, table_rows_with_class};

const SOURCE_NAME: &str = "stock.hostmonit.com";
const DEFAULT_URL: &str = "https://stock.hostmonit.com/CloudFlareYes";

/// 数据行的 class 标记（element-ui 表格）
const ROW_CLASS: &str = "el-table__row";

/// CloudFlareYes：`el-table__row` 行，列依次为线路名、IP、延迟
pub struct HostmonitSource {
    client: Client,
    url: String,
}

impl HostmonitSource {
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
        for row in table_rows_with_class(html, ROW_CLASS) {
            let cells = row_cells(row);
            if cells.len() >= 3 {
                rows.push(RawCandidate {
                    label: cells[0].clone(),
                    ip: cells[1].clone(),
                    latency_text: cells[2].clone(),
                });
            }
        }
        rows
    }
}

impl Default for HostmonitSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SourceAdapter for HostmonitSource {
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
    fn only_data_rows_are_kept() {
        let html = r#"<table>
            <tr class="header-row"><td>线路</td><td>IP</td><td>延迟</td></tr>
            <tr class="el-table__row"><td>联通</td><td>172.64.1.1</td><td>35.2 ms</td></tr>
            <tr class="el-table__row el-table__row--striped"><td>移动</td><td>172.64.2.2</td><td>60ms</td></tr>
        </table>"#;

        let rows = HostmonitSource::parse(html);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, "联通");
        assert_eq!(rows[0].latency_text, "35.2 ms");
        assert_eq!(rows[1].ip, "172.64.2.2");
    }
}
