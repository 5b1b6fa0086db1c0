//! # 能量收集器
//!
//! 单遍扫描整个日志，按优化循环分组收集 SCF 与相关能。
//!
//! ## 扫描状态
//! - `Idle`：等待能量行；相关能模式随时生效
//! - `AwaitingScf`：刚看到 `SCF has converged.`，下一条 SCF 能量行属于新迭代
//!
//! 每次 SCF 收敛都会结束上一次迭代：只有一个值时补一个占位符，
//! 表示相关能尚未打印。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/energy.rs`, `models/calculation.rs`

use crate::error::{MonitorError, Result};
use crate::models::energy::{EnergyIteration, EnergyTable, MAX_LEVELS};
use crate::models::{CalculationInfo, LevelOfTheory, ReferenceKind};
use crate::parsers::parse_field;
use regex::Regex;
use std::sync::OnceLock;

const SCF_CONVERGED: &str = "SCF has converged.";

struct Patterns {
    scf: Regex,
    scf_rohf: Regex,
    mp2: Regex,
    ccsd: Regex,
    ccsd_total: Regex,
    ccsd_t: Regex,
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| Patterns {
        // "  E(SCF)=       -76.0270535493              0.8289D-08"
        scf: Regex::new(r"E\(SCF\)\s*=\s*(?P<energy>[-0-9]+\.\d*)").unwrap(),
        // ROHF 迭代表的最后一行: "    14     -38.9208513246      0.4418D-08"
        scf_rohf: Regex::new(r"^\s+\d+\s+(?P<energy>[-0-9]+\.\d+)\s+[0-9]+\.[0-9]+D[-0-9]+")
            .unwrap(),
        mp2: Regex::new(r"Total MP2 energy\s*[=:]?\s*(?P<energy>[-0-9]+\.\d+)").unwrap(),
        // "  CCSD energy             -238.831886924899"
        ccsd: Regex::new(r"CCSD energy\s*(?P<energy>[-0-9]+\.\d*)").unwrap(),
        ccsd_total: Regex::new(r"Total CCSD energy\s+:\s+(?P<energy>[-0-9]+\.\d+)").unwrap(),
        // "  CCSD(T) energy          -238.851462847707"
        ccsd_t: Regex::new(r"CCSD\(T\) energy\s*(?P<energy>[-0-9]+\.\d*)").unwrap(),
    })
}

/// 按 (参考类型, 理论级别) 选定的模式组合
pub struct EnergyStrategy {
    scf: &'static Regex,
    correlated: Vec<&'static Regex>,
    labels: [&'static str; MAX_LEVELS],
}

impl EnergyStrategy {
    /// 扫描开始前根据计算参数选择一次
    pub fn select(info: &CalculationInfo) -> Self {
        Self::for_kinds(info.reference(), info.level())
    }

    pub fn for_kinds(reference: ReferenceKind, level: LevelOfTheory) -> Self {
        let p = patterns();

        let scf = match reference {
            ReferenceKind::RestrictedOpenShell => &p.scf_rohf,
            _ => &p.scf,
        };

        let (correlated, labels) = match level {
            LevelOfTheory::Scf | LevelOfTheory::Other => {
                (vec![], ["E(SCF)/a.u.", "E(CCSD)/a.u.", "E(CCSD(T))/a.u."])
            }
            LevelOfTheory::Mp2 => (vec![&p.mp2], ["E(SCF)/a.u.", "E(MP2)/a.u.", ""]),
            LevelOfTheory::Ccsd => (
                vec![&p.ccsd_total],
                ["E(SCF)/a.u.", "E(CCSD)/a.u.", "E(CCSD(T))/a.u."],
            ),
            LevelOfTheory::CcsdFamily => (
                vec![&p.ccsd],
                ["E(SCF)/a.u.", "E(CCSD)/a.u.", "E(CCSD(T))/a.u."],
            ),
            LevelOfTheory::CcsdT => (
                vec![&p.ccsd, &p.ccsd_t],
                ["E(SCF)/a.u.", "E(CCSD)/a.u.", "E(CCSD(T))/a.u."],
            ),
        };

        EnergyStrategy {
            scf,
            correlated,
            labels,
        }
    }

    /// 各级别能量的列标题
    pub fn labels(&self) -> [&'static str; MAX_LEVELS] {
        self.labels
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Idle,
    AwaitingScf,
}

/// 单次扫描的累积状态
struct EnergyScan {
    state: ScanState,
    current: EnergyIteration,
    table: EnergyTable,
}

impl EnergyScan {
    fn new() -> Self {
        EnergyScan {
            state: ScanState::Idle,
            current: EnergyIteration::new(),
            table: EnergyTable::new(),
        }
    }

    /// SCF 收敛：结束当前迭代
    fn close_iteration(&mut self) {
        if !self.current.is_empty() {
            let mut finished = std::mem::take(&mut self.current);
            if finished.len() == 1 {
                finished.push(None);
            }
            self.table.push(finished);
        }
        self.state = ScanState::AwaitingScf;
    }

    fn push(&mut self, value: f64, line: &str) -> Result<()> {
        if !self.current.push(Some(value)) {
            return Err(MonitorError::inconsistent(
                "energy iteration",
                line,
                format!(
                    "more than {} energies accumulated: {:?} + {}",
                    MAX_LEVELS,
                    self.current.values(),
                    value
                ),
            ));
        }
        Ok(())
    }

    fn finish(mut self) -> EnergyTable {
        if !self.current.is_empty() {
            self.table.push(self.current);
        }
        self.table
    }
}

/// 收集所有迭代的能量
pub fn parse_energies(content: &str, strategy: &EnergyStrategy) -> Result<EnergyTable> {
    let mut scan = EnergyScan::new();

    for line in content.lines() {
        if line.contains(SCF_CONVERGED) {
            scan.close_iteration();
            continue;
        }

        if scan.state == ScanState::AwaitingScf {
            if let Some(caps) = strategy.scf.captures(line) {
                let value = parse_field("SCF energy", line, &caps["energy"])?;
                scan.push(value, line)?;
                scan.state = ScanState::Idle;
                continue;
            }
        }

        for re in &strategy.correlated {
            if let Some(caps) = re.captures(line) {
                let value = parse_field("correlated energy", line, &caps["energy"])?;
                scan.push(value, line)?;
                break;
            }
        }
    }

    Ok(scan.finish())
}
