//! 线路名 → 运营商分类

use crate::types::OperatorTag;

/// 运营商关键词表，按优先级排列。
///
/// 匹配顺序是移动 → 联通 → 电信，先命中先得：一个同时包含多家关键词的
/// 线路名归属最先检查到的运营商。这是有意保留的决断规则，不要“修复”。
/// 关键词全部为大写形式，与大写化后的线路名做子串匹配。
const OPERATOR_KEYWORDS: &[(OperatorTag, &[&str])] = &[
    (OperatorTag::Mobile, &["移动", "CMCC", "CM"]),
    (OperatorTag::Unicom, &["联通", "CUCC", "CU", "网通"]),
    (OperatorTag::Telecom, &["电信", "CTCC", "CT"]),
];

/// Classify a free-text line label into an [`OperatorTag`].
///
/// Case-insensitive substring match against the fixed keyword table.
/// Pure and total: no label fails to classify — anything unrecognized is
/// [`OperatorTag::Other`].
#[must_use]
pub fn classify(label: &str) -> OperatorTag {
    let upper = label.to_uppercase();
    for (tag, keywords) in OPERATOR_KEYWORDS {
        if keywords.iter().any(|keyword| upper.contains(keyword)) {
            return *tag;
        }
    }
    OperatorTag::Other
}
