//! # 几何变化表
//!
//! 将每个内坐标参数的首末值并排列出。
//!
//! ## 依赖关系
//! - 被 `commands/monitor.rs` 使用
//! - 使用 `models/geometry.rs`

use crate::models::geometry::{parameter_changes, GeometryDeltaRecord};
use crate::report::energy::RULE;
use std::fmt::Write;

const ARROW: &str = "\u{27F6}";

/// 生成几何变化表；没有内坐标快照时返回 None
pub fn render_geometry_changes(records: &[GeometryDeltaRecord]) -> Option<String> {
    let changes = parameter_changes(records);
    if changes.is_empty() {
        return None;
    }

    let header = format!(
        "{:<10} {:>12} {} {:>12}",
        "Parameter", "Old value", ARROW, "New value"
    );
    let rule: String = std::iter::repeat(RULE)
        .take(header.chars().count())
        .collect();

    let mut out = String::from("Change of geometry during the optimisation:\n\n");
    writeln!(out, "{}", header).ok();
    writeln!(out, "{}", rule).ok();
    for change in &changes {
        writeln!(
            out,
            "{:<10} {:>12.6} {} {:>12.6}",
            change.name, change.old, ARROW, change.new
        )
        .ok();
    }
    write!(out, "{}", rule).ok();

    Some(out)
}
