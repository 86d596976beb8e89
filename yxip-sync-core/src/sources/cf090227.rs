//! cf.090227.xyz 适配器

use async_trait::async_trait;
use reqwest::Client;

use crate::error::CoreResult;
use crate::types::RawCandidate;

use super::{SourceAdapter, create_http_client, fetch_document, row_cells, table_rows};

const SOURCE_NAME: &str = "cf.090227.xyz";
const DEFAULT_URL: &str = "https://cf.090227.xyz/";

/// cf.090227.xyz：三列表格 — 线路名、IP、延迟
pub struct Cf090227Source {
    client: Client,
    url: String,
}

impl Cf090227Source {
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

impl Default for Cf090227Source {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SourceAdapter for Cf090227Source {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn fetch(&self) -> CoreResult<Vec<RawCandidate>> {
        let html = fetch_document(&self.client, SOURCE_NAME, &self.url).await?;
        Ok(Self::parse(&html))
    }
}
