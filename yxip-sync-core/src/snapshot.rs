//! 选优结果快照
//!
//! 人类可读的文本工件，每个运营商一个块：
//!
//! ```text
//! # 移动 IP列表 (共2个)
//! 1.1.1.1#广东移动-20ms
//! 2.2.2.2#CMCC-25.5ms
//!
//! # 联通 IP列表 (共0个)
//! ...
//! ```
//!
//! 写入总是整文件覆盖，绝不追加。写失败只记录错误，不阻塞后续调和。

use std::fs;
use std::path::Path;

use crate::error::CoreResult;
use crate::types::SelectionResult;

/// 渲染快照文本（与 IO 分离，便于测试格式）
#[must_use]
pub fn format_snapshot(result: &SelectionResult) -> String {
    let mut out = String::new();
    for (tag, records) in result.iter() {
        out.push_str(&format!("# {} IP列表 (共{}个)\n", tag.label(), records.len()));
        for record in records {
            out.push_str(&format!(
                "{}#{}-{}ms\n",
                record.ip,
                record.label,
                format_latency(record.latency_ms)
            ));
        }
        out.push('\n');
    }
    out
}

/// 整数延迟不带小数点，小数延迟原样输出（与源站展示一致）
fn format_latency(latency_ms: f64) -> String {
    if latency_ms.fract() == 0.0 {
        format!("{latency_ms:.0}")
    } else {
        latency_ms.to_string()
    }
}

/// 覆盖写出快照文件
pub fn write_snapshot(path: &Path, result: &SelectionResult) -> CoreResult<()> {
    fs::write(path, format_snapshot(result))?;
    log::info!("快照已写入 {} ({} 条候选)", path.display(), result.total());
    Ok(())
}
