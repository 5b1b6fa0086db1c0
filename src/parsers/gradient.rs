//! # 分子梯度范数解析器
//!
//! 每次梯度计算后 CFOUR 打印一行 `Molecular gradient norm`，
//! 取该行最后一个字段。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用

use crate::error::{MonitorError, Result};
use crate::parsers::parse_field;

const GRADIENT_LABEL: &str = "Molecular gradient norm";

/// 按出现顺序收集梯度范数
pub fn parse_gradient_norms(content: &str) -> Result<Vec<f64>> {
    content
        .lines()
        .filter(|line| line.contains(GRADIENT_LABEL))
        .map(|line| {
            let last = line.split_whitespace().last().ok_or_else(|| {
                MonitorError::inconsistent("gradient norm", line, "empty line")
            })?;
            parse_field("gradient norm", line, last)
        })
        .collect()
}
