//! # 能量迭代数据模型
//!
//! 每个优化循环（或单点计算）记录至多三个级别的能量：SCF、第二级、第三级。
//!
//! ## 依赖关系
//! - 被 `parsers/energy.rs` 构建
//! - 被 `report/energy.rs`, `export/` 读取

/// 每次迭代最多的能量级别数
pub const MAX_LEVELS: usize = 3;

/// 单次迭代的能量
///
/// `None` 表示该级别的能量预期会出现但尚未打印（占位符），
/// 只会出现在已有数值之后。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnergyIteration {
    values: Vec<Option<f64>>,
}

impl EnergyIteration {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从完整数值构造（测试与导出用）
    pub fn from_values(values: &[Option<f64>]) -> Self {
        EnergyIteration {
            values: values.iter().take(MAX_LEVELS).copied().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.values.len() >= MAX_LEVELS
    }

    /// 追加一个数值，超过最大级别数时返回 false
    pub(crate) fn push(&mut self, value: Option<f64>) -> bool {
        if self.is_full() {
            return false;
        }
        self.values.push(value);
        true
    }

    /// 第 `level` 级能量（0 = SCF）
    pub fn get(&self, level: usize) -> Option<f64> {
        self.values.get(level).copied().flatten()
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// 最高的已填充级别索引
    pub fn highest_populated(&self) -> Option<usize> {
        self.values.iter().rposition(|v| v.is_some())
    }

    /// 最后一个已填充的能量
    pub fn last_populated(&self) -> Option<f64> {
        self.values.iter().rev().find_map(|v| *v)
    }
}

/// 能量表：每个优化循环一项
pub type EnergyTable = Vec<EnergyIteration>;

/// 全表中最高的已填充级别索引
pub fn populated_levels(table: &[EnergyIteration]) -> Option<usize> {
    table.iter().filter_map(|it| it.highest_populated()).max()
}
