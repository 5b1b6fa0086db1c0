//! # 振动模式数据模型
//!
//! 频率（虚频用后缀标记而非负号）与每个原子的位移向量。
//!
//! ## 依赖关系
//! - 被 `parsers/quadrature.rs` 构建
//! - 被 `report/vibration.rs`, `export/xyz.rs`, `models/vpt2.rs` 读取

use crate::error::{MonitorError, Result};
use std::collections::BTreeMap;

/// 虚频后缀
pub const IMAGINARY_MARKER: char = 'i';

/// 振动频率 (cm⁻¹)
#[derive(Debug, Clone, PartialEq)]
pub struct Frequency {
    /// 频率绝对值
    pub wavenumber: f64,

    /// 是否为虚频
    pub imaginary: bool,
}

impl Frequency {
    /// 解析如 `1234.5678` 或 `45.1234i` 的频率字符串
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let imaginary = trimmed.ends_with(IMAGINARY_MARKER);
        let number = trimmed.trim_end_matches(IMAGINARY_MARKER);
        let wavenumber: f64 = number.parse().map_err(|_| {
            MonitorError::inconsistent("frequency", raw, "value is not a number")
        })?;
        Ok(Frequency {
            wavenumber,
            imaginary,
        })
    }

    /// 两位小数，虚频保留后缀
    pub fn formatted(&self) -> String {
        if self.imaginary {
            format!("{:.2}{}", self.wavenumber, IMAGINARY_MARKER)
        } else {
            format!("{:.2}", self.wavenumber)
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.formatted())
    }
}

/// 振动模式中的一个原子
#[derive(Debug, Clone, PartialEq)]
pub struct ModeAtom {
    pub element: String,

    /// 平衡位置 (Å)
    pub position: [f64; 3],

    /// 位移向量（已换算单位）
    pub displacement: [f64; 3],
}

/// 单个振动模式
#[derive(Debug, Clone, PartialEq)]
pub struct VibrationRecord {
    pub frequency: Frequency,
    pub atoms: Vec<ModeAtom>,
}

/// 振动表：1 起始的模式编号 -> 模式
pub type VibrationTable = BTreeMap<usize, VibrationRecord>;
