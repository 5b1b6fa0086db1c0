//! # 能量表 CSV 导出
//!
//! 每次迭代一行；尚未打印的能量与缺失的梯度留空。
//!
//! ## 依赖关系
//! - 被 `commands/monitor.rs` 调用
//! - 使用 `csv` + `serde` 写入

use crate::error::{MonitorError, Result};
use crate::models::EnergyIteration;

use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct EnergyRow {
    iteration: usize,
    scf: Option<f64>,
    level2: Option<f64>,
    level3: Option<f64>,
    gradient_norm: Option<f64>,
}

/// 导出能量表为 CSV
pub fn energies_to_csv(
    energies: &[EnergyIteration],
    gradients: &[f64],
    output_path: &Path,
) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for (i, iteration) in energies.iter().enumerate() {
        wtr.serialize(EnergyRow {
            iteration: i + 1,
            scf: iteration.get(0),
            level2: iteration.get(1),
            level3: iteration.get(2),
            gradient_norm: gradients.get(i).copied(),
        })?;
    }

    wtr.flush().map_err(|e| MonitorError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
