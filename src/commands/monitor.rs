//! # monitor 子命令实现
//!
//! 读取 CFOUR 主输出，判断计算类型并调用相应的解析器与报告。
//!
//! ## 流程
//! 1. 解析头部参数表，判断计算类型
//! 2. 按类型收集能量、梯度、几何与振动
//! 3. 输出文本报告，按需写出 opt.xyz / vib.xyz / CSV / PNG
//! 4. 尚无任何数据时输出系统状态
//!
//! ## 依赖关系
//! - 使用 `cli/monitor.rs` 定义的参数
//! - 使用 `parsers/`, `report/`, `export/`
//! - 使用 `utils/output.rs`, `utils/system.rs`, `utils/timing.rs`

use crate::cli::monitor::MonitorArgs;
use crate::error::{MonitorError, Result};
use crate::export::{self, WriteOutcome};
use crate::models::{
    CalculationInfo, EnergyTable, GeometryDeltaRecord, GeometryTable, InfoKey, RunKind,
    VibrationTable,
};
use crate::parsers::{
    self, calc_info, cartesian, energy::EnergyStrategy, gradient, quadrature, status, zmatrix,
};
use crate::report;
use crate::utils::{output, system, timing};

use std::fmt::Write;
use std::path::Path;

/// 一次扫描得到的全部记录
pub struct RunData {
    pub info: CalculationInfo,
    pub kind: RunKind,
    pub strategy: EnergyStrategy,
    pub energies: EnergyTable,
    pub gradients: Vec<f64>,
    pub steps: Vec<GeometryDeltaRecord>,
    pub geometries: GeometryTable,
    pub vibrations: VibrationTable,
    pub finished: bool,
    pub zero_point_energy: Option<f64>,
    pub displacements: usize,
}

impl RunData {
    /// 频率计算之前是否先做了几何优化
    pub fn has_optimisation(&self) -> bool {
        has_optimisation(&self.info, self.kind)
    }

    /// 是否尚未产生任何结构化数据
    pub fn is_empty(&self) -> bool {
        self.energies.is_empty() && self.geometries.is_empty() && self.vibrations.is_empty()
    }
}

/// 判断计算类型；无法判断时附带参数表
pub fn classify(info: &CalculationInfo) -> Result<RunKind> {
    info.run_kind().ok_or_else(|| {
        let mut dump = String::from("Parameters found in the log header:");
        for (key, value) in info.iter() {
            write!(dump, "\n  {:<12} {}", key.label(), value).ok();
        }
        MonitorError::UnknownCalculationType(dump)
    })
}

fn has_optimisation(info: &CalculationInfo, kind: RunKind) -> bool {
    match kind {
        RunKind::Optimization => true,
        RunKind::Frequency => info.is_geometry_search(),
        RunKind::SinglePoint => false,
    }
}

/// 扫描日志文本及同目录的伴随文件
pub fn harvest(content: &str, log_dir: &Path) -> Result<RunData> {
    let content = parsers::complete_lines(content);
    let info = calc_info::parse_calc_info(content);
    let kind = classify(&info)?;
    let strategy = EnergyStrategy::select(&info);
    let energies = parsers::energy::parse_energies(content, &strategy)?;
    let geometries = cartesian::parse_cartesian_geometries(content)?;

    let (gradients, steps) = if has_optimisation(&info, kind) {
        (
            gradient::parse_gradient_norms(content)?,
            zmatrix::parse_zmatrix_steps(content)?,
        )
    } else {
        (Vec::new(), Vec::new())
    };

    let (vibrations, zero_point_energy, displacements) = match kind {
        RunKind::Frequency => {
            let vibrations = match geometries.last() {
                Some(geometry) => quadrature::read_vibrations(log_dir, geometry)?,
                None => VibrationTable::new(),
            };
            (
                vibrations,
                status::zero_point_energy(content)?,
                status::displacement_count(content),
            )
        }
        _ => (VibrationTable::new(), None, 0),
    };

    Ok(RunData {
        finished: status::is_finished(content),
        info,
        kind,
        strategy,
        energies,
        gradients,
        steps,
        geometries,
        vibrations,
        zero_point_energy,
        displacements,
    })
}

/// 计算类型与理论级别等摘要行
pub fn summary_lines(info: &CalculationInfo, kind: RunKind) -> Vec<String> {
    let mut lines = Vec::new();
    match kind {
        RunKind::Frequency => {
            lines.push(format!("Calculation type: {}", kind));
            let method = match info.get(InfoKey::Anharmonic) {
                "OFF" => "Double harmonic approximation",
                other => other,
            };
            lines.push(format!("Method: {}", method));
        }
        RunKind::Optimization => lines.push(format!(
            "Calculation type: {} (geometric convergence crit.: 10E-{} H)",
            kind,
            info.get(InfoKey::GeometryConvergence)
        )),
        RunKind::SinglePoint => lines.push(format!("Calculation type: {}", kind)),
    }
    lines.push(format!(
        "Level of theory: {}/{} with {} reference",
        info.get(InfoKey::Level),
        info.get(InfoKey::Basis),
        info.get(InfoKey::Reference)
    ));
    lines.push(format!(
        "Charge: {}, Multiplicity: {}",
        info.get(InfoKey::Charge),
        info.get(InfoKey::Multiplicity)
    ));
    lines
}

fn finished_message(finished: bool) -> &'static str {
    if finished {
        "Calculation terminated successfully."
    } else {
        "Calculation is not finished yet..."
    }
}

/// 生成文本报告（不含文件写出的提示）
pub fn render_report(data: &RunData, short: bool) -> String {
    let labels = data.strategy.labels();
    let mut sections = Vec::new();

    if data.has_optimisation() {
        sections.push(report::render_energy_table(
            &data.energies,
            &data.gradients,
            labels,
            short,
        ));
        if let Some(table) = report::render_geometry_changes(&data.steps) {
            sections.push(table);
        }
    } else {
        sections.push(report::render_single_point(&data.energies, labels));
    }

    if data.kind == RunKind::Frequency {
        sections.push(format!("{} displacements were done.", data.displacements));
    }

    if data.kind != RunKind::SinglePoint {
        sections.push(finished_message(data.finished).to_string());
    }

    if data.kind == RunKind::Frequency && !data.vibrations.is_empty() {
        sections.push(report::render_vibrations(&data.vibrations));
        if let Some(zpe) = data.zero_point_energy {
            sections.push(format!("Zero-point Energy: {:.2} kJ/mol", zpe));
        }
    }

    sections.join("\n\n")
}

fn print_timing(log_path: &Path, log_dir: &Path) {
    match timing::TimeInfo::read(log_path, log_dir) {
        Some(t) => {
            println!("Start time:  {}", timing::format_timestamp(t.start));
            println!(
                "Last Change: {} (running for {})",
                timing::format_timestamp(t.last_change),
                timing::format_duration(t.running_for())
            );
        }
        None => output::print_skip("No timing information (FILES file missing)"),
    }
}

fn print_system_status() {
    println!("\nCurrent CPU status:");
    println!("Temp:     {}", system::cpu_temperature());
    println!("used Mem: {}", system::used_memory());
}

fn report_write(outcome: WriteOutcome, what: &str) {
    match outcome {
        WriteOutcome::Written { path, frames } => output::print_success(&format!(
            "Wrote {} {} frame(s) to '{}'",
            frames,
            what,
            path.display()
        )),
        WriteOutcome::NothingWritten => {
            output::print_skip(&format!("No {} data to write", what))
        }
    }
}

/// 执行 monitor
pub fn execute(args: MonitorArgs) -> Result<()> {
    let content = parsers::read_log(&args.output)?;
    let log_dir = match args.output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => Path::new(".").to_path_buf(),
    };

    let data = harvest(&content, &log_dir)?;

    output::print_header(&format!("CFOUR run: {}", args.output.display()));
    if !args.short {
        print_timing(&args.output, &log_dir);
        println!();
    }
    for line in summary_lines(&data.info, data.kind) {
        println!("{}", line);
    }
    if data.info.lacks_frozen_core() {
        output::print_warning(
            "No Frozen Core setting detected. ARE YOU SURE THIS IS WHAT YOU WANT?",
        );
    }
    println!();
    println!("{}", render_report(&data, args.short));

    if args.opt && data.has_optimisation() {
        let outcome = export::write_opt_trajectory(&log_dir, &data.energies, &data.geometries)?;
        report_write(outcome, "optimisation");
    }
    if args.vib && data.kind == RunKind::Frequency {
        let outcome = export::write_vib_trajectory(&log_dir, &data.vibrations)?;
        report_write(outcome, "vibration");
    }

    if let Some(path) = &args.csv {
        export::energies_to_csv(&data.energies, &data.gradients, path)?;
        output::print_success(&format!("Energy table saved to '{}'", path.display()));
    }
    if let Some(path) = &args.plot {
        if data.energies.is_empty() {
            output::print_skip("No energies to plot");
        } else {
            export::generate_convergence_plot(&data.energies, path)?;
            output::print_success(&format!("Convergence plot saved to '{}'", path.display()));
        }
    }

    if data.is_empty() {
        print_system_status();
    }

    Ok(())
}
