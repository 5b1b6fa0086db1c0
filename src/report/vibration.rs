//! # 振动频率列表
//!
//! ```text
//! Vibrations:
//!  ν_01 =  1648.12  cm⁻¹
//!  ν_02 =    45.68i cm⁻¹
//! ```
//! 小数点对齐，虚频保留后缀 `i`。
//!
//! ## 依赖关系
//! - 被 `commands/monitor.rs` 使用
//! - 使用 `models/vibration.rs`

use crate::models::vibration::VibrationTable;
use std::fmt::Write;

/// 生成振动频率列表
pub fn render_vibrations(table: &VibrationTable) -> String {
    let mut out = String::from("Vibrations:");
    for (index, record) in table {
        let formatted = record.frequency.formatted();
        let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), ""));
        write!(
            out,
            "\n \u{03BD}_{:02} = {:>5}.{:<3} cm\u{207B}\u{00B9}",
            index, whole, fraction
        )
        .ok();
    }
    out
}
