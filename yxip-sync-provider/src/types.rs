use serde::{Deserialize, Serialize};

/// A DNS record as it exists inside the managed zone.
///
/// Record identity for reconciliation purposes is the `(name, record_type,
/// content)` triple; `id` is the provider-assigned handle used for deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneRecord {
    /// Provider-specific record identifier.
    pub id: String,
    /// Fully-qualified record name (e.g., `"fast.example.com"`).
    pub name: String,
    /// Record type string as reported by the provider (e.g., `"A"`).
    pub record_type: String,
    /// Record value. For A records this is the IPv4 address.
    pub content: String,
    /// Time-to-live in seconds.
    pub ttl: u32,
    /// Whether the record is proxied through the provider's edge, if the
    /// provider reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
}

/// Request payload for creating a DNS record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRecordRequest {
    /// Fully-qualified record name.
    pub name: String,
    /// Record type string (e.g., `"A"`).
    pub record_type: String,
    /// Record value.
    pub content: String,
    /// Time-to-live in seconds.
    pub ttl: u32,
    /// Whether to proxy the record through the provider's edge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
}

impl CreateRecordRequest {
    /// A record 创建请求的快捷构造。
    #[must_use]
    pub fn a(name: impl Into<String>, address: impl Into<String>, ttl: u32) -> Self {
        Self {
            name: name.into(),
            record_type: "A".to_string(),
            content: address.into(),
            ttl,
            proxied: Some(false),
        }
    }
}

/// One page of zone records.
///
/// Pages are 1-indexed. [`has_more`](Self::has_more) is computed from the
/// total count so callers can walk the zone without a second counting call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordPage {
    /// Records in the current page.
    pub items: Vec<ZoneRecord>,
    /// Current page number.
    pub page: u32,
    /// Page size used for this request.
    pub per_page: u32,
    /// Total number of records across all pages.
    pub total_count: u32,
    /// Whether there are more pages after this one.
    pub has_more: bool,
}

impl RecordPage {
    /// Create a new page, automatically computing [`has_more`](Self::has_more).
    pub fn new(items: Vec<ZoneRecord>, page: u32, per_page: u32, total_count: u32) -> Self {
        let has_more = (page * per_page) < total_count;
        Self {
            items,
            page,
            per_page,
            total_count,
            has_more,
        }
    }
}
