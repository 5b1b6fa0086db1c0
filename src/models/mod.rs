//! # 数据模型模块
//!
//! 定义从 CFOUR 输出中提取的结构化记录。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `report/`, `export/` 和 `commands/` 使用
//! - 子模块: calculation, energy, geometry, vibration, vpt2

pub mod calculation;
pub mod energy;
pub mod geometry;
pub mod vibration;
pub mod vpt2;

pub use calculation::{CalculationInfo, InfoKey, LevelOfTheory, ReferenceKind, RunKind};
pub use energy::{EnergyIteration, EnergyTable};
pub use geometry::{Atom, CartesianGeometry, GeometryDeltaRecord, GeometryTable, Parameter};
pub use vibration::{Frequency, ModeAtom, VibrationRecord, VibrationTable};
