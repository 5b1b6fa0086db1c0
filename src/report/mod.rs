//! # 报告渲染模块
//!
//! 将收集到的记录渲染为列对齐的纯文本表格，只读不改数据。
//!
//! ## 依赖关系
//! - 被 `commands/monitor.rs` 使用
//! - 使用 `models/`
//! - 子模块: energy, geometry, vibration

pub mod energy;
pub mod geometry;
pub mod vibration;

pub use energy::{render_energy_table, render_single_point, NOT_AVAILABLE};
pub use geometry::render_geometry_changes;
pub use vibration::render_vibrations;
