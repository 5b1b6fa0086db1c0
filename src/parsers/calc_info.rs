//! # CFOUR 参数表解析器
//!
//! 在输出文件头部的参数表中查找每个已知键。
//!
//! ## 参数表格式
//! ```text
//!   CALCLEVEL        ICLLVL          CCSD(T)
//!   BASIS            IBASIS          PVTZ
//!   GEO_CONV         ICONTL          5
//! ```
//! 值是代码之后的第一个字段（字段之间至少三个空格）。
//! 遇到 `Job Title` 行即停止扫描。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/calculation.rs`

use crate::models::{CalculationInfo, InfoKey};
use regex::Regex;
use std::sync::OnceLock;

const HEADER_END: &str = "Job Title";

static KEY_PATTERNS: OnceLock<Vec<(InfoKey, Regex)>> = OnceLock::new();

fn key_patterns() -> &'static [(InfoKey, Regex)] {
    KEY_PATTERNS.get_or_init(|| {
        InfoKey::ALL
            .iter()
            .map(|&key| {
                let pattern = format!(
                    r"\s{}\s+{}\s+(?P<value>\S+(?: {{1,2}}\S+)*)",
                    regex::escape(key.label()),
                    regex::escape(key.code())
                );
                (key, Regex::new(&pattern).unwrap())
            })
            .collect()
    })
}

/// 从日志文本提取计算参数
pub fn parse_calc_info(content: &str) -> CalculationInfo {
    let mut info = CalculationInfo::new();

    for line in content.lines() {
        if line.contains(HEADER_END) {
            break;
        }
        for (key, re) in key_patterns() {
            if let Some(caps) = re.captures(line) {
                info.set(*key, caps["value"].trim());
            }
        }
    }

    info
}
