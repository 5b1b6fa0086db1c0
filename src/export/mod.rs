//! # 导出模块
//!
//! 将收集到的记录写出到文件。
//!
//! ## 支持格式
//! - 多帧 XYZ 轨迹 (`opt.xyz`, `vib.xyz`)
//! - 能量表 CSV
//! - 能量收敛图 PNG
//!
//! ## 依赖关系
//! - 被 `commands/monitor.rs` 调用
//! - 子模块: xyz, energy_csv, plot

pub mod energy_csv;
pub mod plot;
pub mod xyz;

pub use energy_csv::energies_to_csv;
pub use plot::generate_convergence_plot;
pub use xyz::{write_opt_trajectory, write_vib_trajectory, WriteOutcome};
