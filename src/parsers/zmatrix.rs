//! # Z-矩阵内坐标解析器
//!
//! 解析每个优化步骤打印的参数更新表：
//! ```text
//!   Parameter     dV/dR           Step          Rold            Rnew
//!   dXSC1  -0.0001834151    0.0169752612  179.1069710534  179.1239463146
//!   ...
//!   Minimum force:  0.000183415 / RMS force:  0.000123456
//! ```
//! 第一张表同时提供初始几何 (Rold) 与第一次更新 (Rnew)，
//! 之后每张表只取 Rnew。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/geometry.rs`

use crate::error::{MonitorError, Result};
use crate::models::geometry::{GeometryDeltaRecord, Parameter};
use crate::parsers::parse_field;
use regex::Regex;
use std::sync::OnceLock;

const SECTION_START: &str = "Parameter     dV/dR           Step          Rold            Rnew";
const SECTION_END: &str = "Minimum force:";

static PARAMETER_LINE: OnceLock<Regex> = OnceLock::new();

fn parameter_line() -> &'static Regex {
    PARAMETER_LINE.get_or_init(|| {
        Regex::new(
            r"^(?P<name>[a-zA-Z0-9]+)\s+[-0-9]+\.\d+\s+[-0-9]+\.\d+\s+(?P<old>[-0-9]+\.\d+)\s+(?P<new>[-0-9]+\.\d+)",
        )
        .unwrap()
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Idle,
    InSection,
}

/// 收集每次迭代的内坐标快照
pub fn parse_zmatrix_steps(content: &str) -> Result<Vec<GeometryDeltaRecord>> {
    let mut records: Vec<GeometryDeltaRecord> = Vec::new();
    let mut initial = GeometryDeltaRecord::new();
    let mut current = GeometryDeltaRecord::new();
    let mut state = ScanState::Idle;

    for line in content.lines() {
        if line.contains(SECTION_START) {
            state = ScanState::InSection;
            continue;
        }

        if line.contains(SECTION_END) {
            if state != ScanState::InSection {
                return Err(MonitorError::inconsistent(
                    "internal coordinate section",
                    line,
                    "closing marker without a parameter table",
                ));
            }
            if records.is_empty() && !initial.is_empty() {
                records.push(std::mem::take(&mut initial));
            }
            records.push(std::mem::take(&mut current));
            state = ScanState::Idle;
            continue;
        }

        if state == ScanState::InSection {
            let trimmed = line.trim();
            if let Some(caps) = parameter_line().captures(trimmed) {
                let name = &caps["name"];
                if records.is_empty() {
                    let old = parse_field("internal coordinate", line, &caps["old"])?;
                    initial.push(Parameter::new(name, old));
                }
                let new = parse_field("internal coordinate", line, &caps["new"])?;
                current.push(Parameter::new(name, new));
            }
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEPS: &str = r#"
   Parameter     dV/dR           Step          Rold            Rnew
   ----------------------------------------------------------------
     R       -0.0120000000   -0.0100000000    1.8200000000    1.8100000000
     A        0.0010000000    0.0200000000  104.0000000000  104.0200000000
   ----------------------------------------------------------------
   Minimum force:  0.001000000 / RMS force:  0.008500000
   Parameter     dV/dR           Step          Rold            Rnew
     R       -0.0010000000   -0.0010000000    1.8100000000    1.8090000000
     A        0.0001000000    0.0010000000  104.0200000000  104.0210000000
   Minimum force:  0.000100000 / RMS force:  0.000710000
"#;

    #[test]
    fn test_first_table_seeds_initial_snapshot() {
        let records = parse_zmatrix_steps(STEPS).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0][0], Parameter::new("R", 1.82));
        assert_eq!(records[1][0], Parameter::new("R", 1.81));
        assert_eq!(records[2][0], Parameter::new("R", 1.809));
        assert_eq!(records[2][1], Parameter::new("A", 104.021));
    }

    #[test]
    fn test_parameter_order_is_stable() {
        let records = parse_zmatrix_steps(STEPS).unwrap();
        for r in &records {
            let names: Vec<_> = r.iter().map(|p| p.name.as_str()).collect();
            assert_eq!(names, vec!["R", "A"]);
        }
    }

    #[test]
    fn test_unclosed_section_is_not_produced() {
        let cut = STEPS.rfind("   Minimum force").unwrap();
        let records = parse_zmatrix_steps(&STEPS[..cut]).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_orphan_closing_marker_is_fault() {
        let log = "   Minimum force:  0.000100000 / RMS force:  0.000710000\n";
        assert!(matches!(
            parse_zmatrix_steps(log),
            Err(MonitorError::ParseConsistency { .. })
        ));
    }
}
