use serde::{Deserialize, Serialize};

/// Network operator (ISP) tag derived from a candidate's free-text line label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatorTag {
    /// 中国移动
    Mobile,
    /// 中国联通
    Unicom,
    /// 中国电信
    Telecom,
    /// 无法识别的线路；永远不参与选优和 DNS 同步
    Other,
}

impl OperatorTag {
    /// 参与选优的运营商，固定顺序（同时是调和时的展开顺序）。
    pub const SELECTABLE: [Self; 3] = [Self::Mobile, Self::Unicom, Self::Telecom];

    /// 快照中使用的中文线路名
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Mobile => "移动",
            Self::Unicom => "联通",
            Self::Telecom => "电信",
            Self::Other => "其他",
        }
    }

    /// 稳定的英文标识（日志、序列化）
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Unicom => "unicom",
            Self::Telecom => "telecom",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for OperatorTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One raw row as produced by a source adapter, before any validation.
///
/// `latency_text` is kept verbatim; the aggregator parses it and silently
/// drops rows it cannot understand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCandidate {
    /// 线路名（可为空，例如源站没有线路列）
    pub label: String,
    /// 候选 IP 原文
    pub ip: String,
    /// 延迟原文，如 `"42ms"`、`"42.5 毫秒"`
    pub latency_text: String,
}

/// A validated, classified candidate endpoint. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateRecord {
    /// IPv4 地址（已通过格式校验）
    pub ip: String,
    /// 线路名原文
    pub label: String,
    /// 延迟（毫秒，非负）
    pub latency_ms: f64,
    /// 运营商分类
    pub operator: OperatorTag,
}

/// Per-operator top-K selection. `Other` is always excluded.
///
/// Invariants (established by [`select`](crate::select::select)): within each
/// operator the sequence is ascending by `latency_ms`, contains no duplicate
/// `ip`, and has at most K entries.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SelectionResult {
    pub mobile: Vec<CandidateRecord>,
    pub unicom: Vec<CandidateRecord>,
    pub telecom: Vec<CandidateRecord>,
}

impl SelectionResult {
    /// 指定运营商的候选序列（`Other` 恒为空）
    #[must_use]
    pub fn operator(&self, tag: OperatorTag) -> &[CandidateRecord] {
        match tag {
            OperatorTag::Mobile => &self.mobile,
            OperatorTag::Unicom => &self.unicom,
            OperatorTag::Telecom => &self.telecom,
            OperatorTag::Other => &[],
        }
    }

    pub(crate) fn operator_mut(&mut self, tag: OperatorTag) -> Option<&mut Vec<CandidateRecord>> {
        match tag {
            OperatorTag::Mobile => Some(&mut self.mobile),
            OperatorTag::Unicom => Some(&mut self.unicom),
            OperatorTag::Telecom => Some(&mut self.telecom),
            OperatorTag::Other => None,
        }
    }

    /// 按固定运营商顺序迭代 (移动 → 联通 → 电信)
    pub fn iter(&self) -> impl Iterator<Item = (OperatorTag, &[CandidateRecord])> {
        OperatorTag::SELECTABLE
            .into_iter()
            .map(|tag| (tag, self.operator(tag)))
    }

    /// 按固定运营商顺序展开全部候选
    pub fn flattened(&self) -> impl Iterator<Item = &CandidateRecord> {
        self.iter().flat_map(|(_, records)| records.iter())
    }

    /// 候选总数
    #[must_use]
    pub fn total(&self) -> usize {
        self.mobile.len() + self.unicom.len() + self.telecom.len()
    }

    /// 是否为空结果（合法的退化情况，不是错误）
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Aggregate counts returned by one reconciliation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileSummary {
    /// Clearing 阶段成功删除的记录数
    pub cleared: usize,
    /// Syncing 阶段新建的记录数
    pub created: usize,
    /// Syncing 阶段已存在而跳过的记录数
    pub skipped: usize,
    /// 两个阶段中记录的失败总数（删除失败、创建失败、非法 IP）
    pub failed: usize,
}
