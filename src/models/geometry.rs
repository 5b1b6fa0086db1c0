//! # 分子几何数据模型
//!
//! 两种几何表示：
//! - Z-矩阵内坐标快照 (`GeometryDeltaRecord`)
//! - 笛卡尔坐标 (`CartesianGeometry`)，单位 Å
//!
//! ## 依赖关系
//! - 被 `parsers/zmatrix.rs`, `parsers/cartesian.rs` 构建
//! - 被 `report/`, `export/xyz.rs`, `models/vpt2.rs` 读取

use serde::Serialize;

/// 1 bohr = 0.52917721092 Å
pub const ANGSTROM_PER_BOHR: f64 = 0.52917721092;

/// 1 Å = 1 / 0.52917721092 bohr
pub const BOHR_PER_ANGSTROM: f64 = 1.0 / ANGSTROM_PER_BOHR;

/// bohr -> Å
pub fn bohr_to_angstrom(value: f64) -> f64 {
    value * ANGSTROM_PER_BOHR
}

/// Å -> bohr
pub fn angstrom_to_bohr(value: f64) -> f64 {
    value * BOHR_PER_ANGSTROM
}

/// 笛卡尔坐标中的原子
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Atom {
    /// 元素符号（首字母大写）
    pub element: String,

    /// 坐标 [x, y, z] (Å)
    pub position: [f64; 3],
}

impl Atom {
    pub fn new(element: impl Into<String>, position: [f64; 3]) -> Self {
        Atom {
            element: element.into(),
            position,
        }
    }

    /// CFOUR 用 X 表示哑原子
    pub fn is_dummy(&self) -> bool {
        self.element == "X"
    }

    pub fn position_bohr(&self) -> [f64; 3] {
        self.position.map(angstrom_to_bohr)
    }
}

/// 单个笛卡尔几何
pub type CartesianGeometry = Vec<Atom>;

/// 每个优化循环一个笛卡尔几何
pub type GeometryTable = Vec<CartesianGeometry>;

/// Z-矩阵参数值
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub value: f64,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Parameter {
            name: name.into(),
            value,
        }
    }
}

/// 一次迭代的内坐标快照，参数顺序在整个运行中保持不变
pub type GeometryDeltaRecord = Vec<Parameter>;

/// 首末快照的参数变化
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterChange {
    pub name: String,
    pub old: f64,
    pub new: f64,
}

/// 按位置配对首个与最后一个快照
pub fn parameter_changes(records: &[GeometryDeltaRecord]) -> Vec<ParameterChange> {
    let (Some(first), Some(last)) = (records.first(), records.last()) else {
        return Vec::new();
    };

    first
        .iter()
        .zip(last.iter())
        .map(|(old, new)| ParameterChange {
            name: old.name.clone(),
            old: old.value,
            new: new.value,
        })
        .collect()
}
