//! # 能量收敛表
//!
//! ```text
//! Iter     E(SCF)/a.u.    E(CCSD)/a.u.  -lg|ΔE|  |Grad|/a.u.
//! ——————————————————————————————————————————————————————————
//! 1     -76.027053549   -76.240000000        -    0.0123456
//! 2     -76.027100000               -        -    0.0012345
//! ```
//! 列数由全表中最高的已填充级别决定；尚未打印的能量显示为 `-`。
//!
//! ## 依赖关系
//! - 被 `commands/monitor.rs` 使用
//! - 使用 `models/energy.rs`

use crate::models::energy::{populated_levels, EnergyIteration, MAX_LEVELS};
use std::fmt::Write;

/// 没有任何能量时的提示
pub const NOT_AVAILABLE: &str = "No energies found as of yet.";

/// 省略行标记
pub const ELLIPSIS: &str = "\u{22EE}";

/// 表格装饰线字符
pub const RULE: char = '\u{2014}';

const DIFF_HEADER: &str = "-lg|\u{0394}E|";
const GRAD_HEADER: &str = "|Grad|/a.u.";
const MISSING: &str = "-";

/// 能量列的最小宽度
const ENERGY_WIDTH: usize = 14;

/// 短模式下首尾各显示的迭代数
const SHORT_EDGE: usize = 3;

/// 计算要显示的迭代索引；`None` 表示省略行
///
/// 短模式且迭代数超过 6 时只显示前三个和后三个。
pub fn display_window(len: usize, short: bool) -> Vec<Option<usize>> {
    if short && len > 2 * SHORT_EDGE {
        (0..SHORT_EDGE)
            .map(Some)
            .chain(std::iter::once(None))
            .chain((len - SHORT_EDGE..len).map(Some))
            .collect()
    } else {
        (0..len).map(Some).collect()
    }
}

/// 收敛诊断值 -log10|ΔE|
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Diagnostic {
    /// 第一次迭代没有前值
    First,
    /// 本次或上次迭代缺少比较列的能量
    Pending,
    /// ΔE 恰好为零
    Unchanged,
    Value(f64),
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::First | Diagnostic::Pending => write!(f, "{}", MISSING),
            Diagnostic::Unchanged => write!(f, "N/A"),
            Diagnostic::Value(v) => write!(f, "{:.2}", v),
        }
    }
}

/// 用最高已填充列比较第 `i` 次与第 `i-1` 次迭代
pub fn convergence_diagnostic(table: &[EnergyIteration], i: usize, column: usize) -> Diagnostic {
    if i == 0 {
        return Diagnostic::First;
    }
    let (Some(current), Some(previous)) = (
        table.get(i).and_then(|it| it.get(column)),
        table.get(i - 1).and_then(|it| it.get(column)),
    ) else {
        return Diagnostic::Pending;
    };

    let diff = (current - previous).abs();
    if diff == 0.0 {
        Diagnostic::Unchanged
    } else {
        Diagnostic::Value(-diff.log10())
    }
}

/// 梯度范数与能量按迭代序号对齐；最后一个几何可能没有对应的梯度
fn gradient_cell(gradients: &[f64], i: usize) -> String {
    gradients
        .get(i)
        .map(|g| format!("{:.7}", g))
        .unwrap_or_else(|| MISSING.to_string())
}

fn energy_cell(iteration: &EnergyIteration, level: usize, width: usize) -> String {
    match iteration.get(level) {
        Some(e) => format!("{:>width$.9}", e),
        None => format!("{:^width$}", MISSING),
    }
}

/// 生成优化过程的能量收敛表
pub fn render_energy_table(
    table: &[EnergyIteration],
    gradients: &[f64],
    labels: [&str; MAX_LEVELS],
    short: bool,
) -> String {
    let Some(top) = populated_levels(table) else {
        return NOT_AVAILABLE.to_string();
    };
    // 列宽取标签长度，例如 E(CCSD(T))/a.u. 比数值更宽
    let widths: Vec<usize> = labels
        .iter()
        .take(top + 1)
        .map(|label| label.chars().count().max(ENERGY_WIDTH))
        .collect();

    let mut header = format!("{:<4}", "Iter");
    for (label, &width) in labels.iter().zip(&widths) {
        write!(header, "  {:>width$}", label).ok();
    }
    write!(header, "  {:>7}  {:>11}", DIFF_HEADER, GRAD_HEADER).ok();

    let rule: String = std::iter::repeat(RULE)
        .take(header.chars().count())
        .collect();

    let mut out = String::new();
    writeln!(out, "{}", header).ok();
    writeln!(out, "{}", rule).ok();

    for slot in display_window(table.len(), short) {
        let Some(i) = slot else {
            let mut row = format!("{:^4}", ELLIPSIS);
            for &width in &widths {
                write!(row, "  {:^width$}", ELLIPSIS).ok();
            }
            write!(row, "  {:^7}  {:^11}", ELLIPSIS, ELLIPSIS).ok();
            writeln!(out, "{}", row).ok();
            continue;
        };

        let iteration = &table[i];
        let mut row = format!("{:<4}", i + 1);
        for (level, &width) in widths.iter().enumerate() {
            write!(row, "  {}", energy_cell(iteration, level, width)).ok();
        }
        write!(
            row,
            "  {:>7}  {:>11}",
            convergence_diagnostic(table, i, top).to_string(),
            gradient_cell(gradients, i)
        )
        .ok();
        writeln!(out, "{}", row).ok();
    }

    write!(out, "{}", rule).ok();
    out
}

/// 单点计算的能量列表
pub fn render_single_point(table: &[EnergyIteration], labels: [&str; MAX_LEVELS]) -> String {
    let Some(iteration) = table.first() else {
        return NOT_AVAILABLE.to_string();
    };

    let names = ["SCF energy E[SCF]", "E[2]", "E[3]"];
    let mut out = String::from("Energies:");
    for (level, value) in iteration.values().iter().enumerate() {
        let Some(value) = value else { continue };
        let name = match level {
            0 => names[0].to_string(),
            _ => {
                let method = labels[level]
                    .trim_start_matches("E(")
                    .trim_end_matches(")/a.u.");
                format!("{} energy E[{}]", method, method)
            }
        };
        write!(out, "\n{:<26}= {:.10}", name, value).ok();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELS: [&str; 3] = ["E(SCF)/a.u.", "E(CCSD)/a.u.", "E(CCSD(T))/a.u."];

    fn iter(values: &[Option<f64>]) -> EnergyIteration {
        EnergyIteration::from_values(values)
    }

    fn converging(n: usize) -> Vec<EnergyIteration> {
        (0..n)
            .map(|i| iter(&[Some(-76.0 - 0.01 / (i + 1) as f64), Some(-76.2 - 0.01 / (i + 1) as f64)]))
            .collect()
    }

    #[test]
    fn test_window_short_mode_ten_iterations() {
        let window = display_window(10, true);
        assert_eq!(
            window,
            vec![Some(0), Some(1), Some(2), None, Some(7), Some(8), Some(9)]
        );
        assert_eq!(window.iter().filter(|w| w.is_none()).count(), 1);
    }

    #[test]
    fn test_window_short_mode_five_iterations() {
        let window = display_window(5, true);
        assert_eq!(window, (0..5).map(Some).collect::<Vec<_>>());
    }

    #[test]
    fn test_window_full_mode() {
        assert_eq!(display_window(10, false).len(), 10);
        assert!(display_window(0, true).is_empty());
    }

    #[test]
    fn test_diagnostic_values() {
        let table = vec![
            iter(&[Some(-1.0)]),
            iter(&[Some(-1.001)]),
            iter(&[Some(-1.001)]),
        ];
        assert_eq!(convergence_diagnostic(&table, 0, 0), Diagnostic::First);
        match convergence_diagnostic(&table, 1, 0) {
            Diagnostic::Value(v) => assert!((v - 3.0).abs() < 1e-6),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(convergence_diagnostic(&table, 2, 0), Diagnostic::Unchanged);
        assert_eq!(Diagnostic::Unchanged.to_string(), "N/A");
        assert_eq!(Diagnostic::First.to_string(), "-");
    }

    #[test]
    fn test_diagnostic_pending_column() {
        let table = vec![iter(&[Some(-1.0), Some(-1.2)]), iter(&[Some(-1.1), None])];
        assert_eq!(convergence_diagnostic(&table, 1, 1), Diagnostic::Pending);
    }

    #[test]
    fn test_empty_table_message() {
        assert_eq!(render_energy_table(&[], &[], LABELS, false), NOT_AVAILABLE);
    }

    #[test]
    fn test_header_has_populated_columns_only() {
        let table = vec![iter(&[Some(-1.0), None]), iter(&[Some(-1.1)])];
        let out = render_energy_table(&table, &[], LABELS, false);
        let header = out.lines().next().unwrap();
        assert!(header.contains("E(SCF)/a.u."));
        assert!(!header.contains("E(CCSD)/a.u."));
        assert!(header.contains("-lg|ΔE|"));
        assert!(header.contains("|Grad|/a.u."));
    }

    #[test]
    fn test_pending_energy_is_marked_not_zero() {
        let table = vec![
            iter(&[Some(-76.1), Some(-76.3)]),
            iter(&[Some(-76.2), None]),
            iter(&[Some(-76.25), Some(-76.4)]),
        ];
        let out = render_energy_table(&table, &[0.01, 0.001, 0.0001], LABELS, false);
        let lines: Vec<_> = out.lines().collect();
        // header, rule, 3 rows, rule
        assert_eq!(lines.len(), 6);
        let row2 = lines[3];
        assert!(row2.starts_with("2"));
        assert!(!row2.contains("0.000000000"));
        assert!(row2.contains("-76.200000000"));
        assert!(lines[4].contains("-76.400000000"));
    }

    #[test]
    fn test_columns_line_up_with_wide_labels() {
        let table = vec![
            iter(&[Some(-238.1), Some(-238.831886924899), Some(-238.851462847707)]),
            iter(&[Some(-238.11), None]),
            iter(&[Some(-238.12), Some(-238.84), Some(-238.86)]),
        ];
        let out = render_energy_table(&table, &[0.01, 0.001, 0.0001], LABELS, false);
        let lines: Vec<_> = out.lines().collect();
        let width = lines[0].chars().count();
        assert!(lines[0].contains("E(CCSD(T))/a.u."));
        for line in &lines {
            assert_eq!(line.chars().count(), width, "misaligned: {line}");
        }
    }

    #[test]
    fn test_gradient_offset_tolerated() {
        let table = converging(3);
        let out = render_energy_table(&table, &[0.01, 0.001], LABELS, false);
        let last_row = out.lines().nth(4).unwrap();
        assert!(last_row.trim_end().ends_with('-'));
        assert!(out.lines().nth(3).unwrap().contains("0.0010000"));
    }

    #[test]
    fn test_short_mode_renders_six_rows_and_ellipsis() {
        let table = converging(10);
        let out = render_energy_table(&table, &[], LABELS, true);
        let rows: Vec<_> = out.lines().skip(2).collect();
        // 6 iterations + ellipsis + closing rule
        assert_eq!(rows.len(), 8);
        assert!(rows[3].contains(ELLIPSIS));
        let numbers: Vec<_> = rows
            .iter()
            .filter_map(|r| r.split_whitespace().next())
            .filter_map(|t| t.parse::<usize>().ok())
            .collect();
        assert_eq!(numbers, vec![1, 2, 3, 8, 9, 10]);
    }

    #[test]
    fn test_single_point_listing() {
        let table = vec![iter(&[Some(-76.0), Some(-76.2), Some(-76.25)])];
        let out = render_single_point(&table, LABELS);
        assert!(out.contains("SCF energy E[SCF]         = -76.0000000000"));
        assert!(out.contains("CCSD energy E[CCSD]"));
        assert!(out.contains("CCSD(T) energy E[CCSD(T)] = -76.2500000000"));
    }
}
