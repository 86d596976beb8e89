//! 正则表格抽取
//!
//! 源站都是简单的服务端渲染表格，这里用正则把 `<tr>`/`<td>` 还原成纯文本
//! 单元格，并提供与各站共用的延迟文本解析。

use std::sync::LazyLock;

use regex::Regex;

static TR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<tr[^>]*>(.*?)</tr>").expect("invalid <tr> regex"));

static TD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<td[^>]*>(.*?)</td>").expect("invalid <td> regex"));

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("invalid tag regex"));

/// 延迟文本模式：`digits(.digits)? (ms|毫秒)?`，锚定行首
static LATENCY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)?)\s*(?:ms|毫秒)?").expect("invalid latency regex")
});

/// 抽取全部 `<tr>` 行（内容部分）
pub(crate) fn table_rows(html: &str) -> Vec<&str> {
    TR_RE
        .captures_iter(html)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// 抽取 class 包含指定子串的 `<tr>` 行
pub(crate) fn table_rows_with_class<'a>(html: &'a str, class: &str) -> Vec<&'a str> {
    TR_RE
        .captures_iter(html)
        .filter_map(|caps| {
            let row = caps.get(0)?.as_str();
            let open_tag_end = row.find('>')?;
            if row[..open_tag_end].contains(class) {
                caps.get(1).map(|m| m.as_str())
            } else {
                None
            }
        })
        .collect()
}

/// 抽取一行内的 `<td>` 单元格，剥掉内部标签并还原常见实体
pub(crate) fn row_cells(row: &str) -> Vec<String> {
    TD_RE
        .captures_iter(row)
        .filter_map(|caps| caps.get(1).map(|m| strip_markup(m.as_str())))
        .collect()
}

fn strip_markup(cell: &str) -> String {
    let text = TAG_RE.replace_all(cell, "");
    text.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .trim()
        .to_string()
}

/// 解析延迟文本为毫秒数
///
/// 与源站展示一致：数字开头、可选小数、可选 `ms`/`毫秒` 单位。
/// 无法解析（如 `"n/a"`、`"-"`、空串）返回 `None`，行被丢弃。
pub(crate) fn parse_latency_ms(text: &str) -> Option<f64> {
    let caps = LATENCY_RE.captures(text.trim())?;
    caps.get(1)?.as_str().parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_and_cells_from_simple_table() {
        let html = r"<table>
            <tr><th>线路</th><th>IP</th><th>延迟</th></tr>
            <tr><td>移动</td><td>1.1.1.1</td><td>20ms</td></tr>
            <tr><td><span>联通</span></td><td>2.2.2.2</td><td>15 ms</td></tr>
        </table>";

        let rows = table_rows(html);
        assert_eq!(rows.len(), 3);
        // 表头行没有 <td>
        assert!(row_cells(rows[0]).is_empty());
        assert_eq!(row_cells(rows[1]), ["移动", "1.1.1.1", "20ms"]);
        // 嵌套标签被剥掉
        assert_eq!(row_cells(rows[2]), ["联通", "2.2.2.2", "15 ms"]);
    }

    #[test]
    fn rows_filtered_by_class() {
        let html = r#"<tr class="el-table__row"><td>电信</td></tr>
            <tr class="header"><td>线路</td></tr>
            <tr class="el-table__row striped"><td>移动</td></tr>"#;

        let rows = table_rows_with_class(html, "el-table__row");
        assert_eq!(rows.len(), 2);
        assert_eq!(row_cells(rows[0]), ["电信"]);
    }

    #[test]
    fn class_match_does_not_scan_cell_content() {
        // class 子串只在起始标签内匹配，不受单元格正文干扰
        let html = r"<tr><td>el-table__row</td></tr>";
        assert!(table_rows_with_class(html, "el-table__row").is_empty());
    }

    #[test]
    fn latency_accepts_units_and_decimals() {
        assert_eq!(parse_latency_ms("20ms"), Some(20.0));
        assert_eq!(parse_latency_ms("15.5 ms"), Some(15.5));
        assert_eq!(parse_latency_ms("42毫秒"), Some(42.0));
        assert_eq!(parse_latency_ms("88"), Some(88.0));
        assert_eq!(parse_latency_ms("  7ms "), Some(7.0));
    }

    #[test]
    fn latency_rejects_garbage() {
        assert_eq!(parse_latency_ms("n/a"), None);
        assert_eq!(parse_latency_ms("-"), None);
        assert_eq!(parse_latency_ms(""), None);
        // 锚定行首：前缀非数字即失败
        assert_eq!(parse_latency_ms("约20ms"), None);
        assert_eq!(parse_latency_ms("-5ms"), None);
    }

    #[test]
    fn entities_are_decoded() {
        assert_eq!(row_cells("<td>A&nbsp;&amp;&nbsp;B</td>"), ["A & B"]);
    }
}
