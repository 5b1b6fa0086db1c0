//! # 能量收敛图
//!
//! 使用 `plotters` 绘制每次迭代最终能量随迭代次数的变化。
//!
//! ## 依赖关系
//! - 被 `commands/monitor.rs` 调用
//! - 使用 `models/energy.rs`

use crate::error::{MonitorError, Result};
use crate::models::energy::populated_levels;
use crate::models::EnergyIteration;

use plotters::prelude::*;
use std::path::Path;

/// 全表最高级别的能量；该级别尚未打印的迭代不画
pub fn convergence_series(energies: &[EnergyIteration]) -> Vec<(f64, f64)> {
    let Some(top) = populated_levels(energies) else {
        return Vec::new();
    };
    energies
        .iter()
        .enumerate()
        .filter_map(|(i, it)| it.get(top).map(|e| ((i + 1) as f64, e)))
        .collect()
}

/// 生成收敛图 (PNG)
pub fn generate_convergence_plot(energies: &[EnergyIteration], output_path: &Path) -> Result<()> {
    let data = convergence_series(energies);
    if data.is_empty() {
        return Err(MonitorError::PlotError("No data to plot".to_string()));
    }

    let y_min = data.iter().map(|(_, y)| *y).fold(f64::INFINITY, f64::min);
    let y_max = data.iter().map(|(_, y)| *y).fold(f64::NEG_INFINITY, f64::max);
    let y_margin = ((y_max - y_min).abs() * 0.1).max(1e-6);
    let x_max = data.len() as f64;

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| MonitorError::PlotError(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Energy Convergence", ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(90)
        .build_cartesian_2d(0.5..(x_max + 0.5), (y_min - y_margin)..(y_max + y_margin))
        .map_err(|e| MonitorError::PlotError(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("Iteration")
        .y_desc("Energy (a.u.)")
        .draw()
        .map_err(|e| MonitorError::PlotError(e.to_string()))?;

    chart
        .draw_series(LineSeries::new(data.iter().copied(), BLUE.stroke_width(2)))
        .map_err(|e| MonitorError::PlotError(e.to_string()))?;

    chart
        .draw_series(data.iter().map(|&(x, y)| Circle::new((x, y), 4, BLUE.filled())))
        .map_err(|e| MonitorError::PlotError(e.to_string()))?;

    root.present()
        .map_err(|e| MonitorError::PlotError(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_skips_pending_levels() {
        let energies = vec![
            EnergyIteration::from_values(&[Some(-76.0), Some(-76.2)]),
            EnergyIteration::from_values(&[Some(-76.01), None]),
            EnergyIteration::from_values(&[Some(-76.02), Some(-76.21)]),
        ];
        let series = convergence_series(&energies);
        assert_eq!(series, vec![(1.0, -76.2), (3.0, -76.21)]);
    }

    #[test]
    fn test_series_scf_only_run() {
        let energies = vec![
            EnergyIteration::from_values(&[Some(-76.0)]),
            EnergyIteration::from_values(&[Some(-76.01)]),
        ];
        assert_eq!(convergence_series(&energies), vec![(1.0, -76.0), (2.0, -76.01)]);
    }

    #[test]
    fn test_empty_plot_is_error() {
        let dir = std::env::temp_dir().join("c4mon_empty_plot.png");
        assert!(generate_convergence_plot(&[], &dir).is_err());
    }
}
