//! # 笛卡尔坐标解析器
//!
//! 每个优化循环 CFOUR 打印一次 bohr 单位的坐标表：
//! ```text
//!  Z-matrix   Atomic            Coordinates (in bohr)
//!   Symbol    Number           X              Y              Z
//!     O         8         0.00000000     0.00000000    -0.12947689
//!     H         1         0.00000000    -1.49418533     1.02744642
//!   Interatomic distance matrix (Angstroms)
//! ```
//! 坐标在读取时换算为 Å。
//!
//! ## 依赖关系
//! - 被 `commands/`, `parsers/quadrature.rs` 使用
//! - 使用 `models/geometry.rs`

use crate::error::{MonitorError, Result};
use crate::models::geometry::{bohr_to_angstrom, Atom, CartesianGeometry, GeometryTable};
use crate::parsers::parse_field;
use regex::Regex;
use std::sync::OnceLock;

const SECTION_START: &str = "Z-matrix   Atomic            Coordinates (in bohr)";
const SECTION_END: &str = "Interatomic distance matrix (Angstroms)";

static ATOM_LINE: OnceLock<Regex> = OnceLock::new();

fn atom_line() -> &'static Regex {
    ATOM_LINE.get_or_init(|| {
        Regex::new(
            r"(?P<element>[a-zA-Z]+)\s+[-0-9]+\s+(?P<x>[-0-9]+\.\d+)\s+(?P<y>[-0-9]+\.\d+)\s+(?P<z>[-0-9]+\.\d+)",
        )
        .unwrap()
    })
}

/// 元素符号规范化：首字母大写，其余小写
fn normalize_symbol(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}

/// 解析单行原子坐标（bohr -> Å）
pub fn parse_atom_line(line: &str) -> Result<Option<Atom>> {
    let Some(caps) = atom_line().captures(line.trim()) else {
        return Ok(None);
    };

    let mut position = [0.0; 3];
    for (slot, name) in position.iter_mut().zip(["x", "y", "z"]) {
        *slot = bohr_to_angstrom(parse_field("cartesian coordinate", line, &caps[name])?);
    }

    Ok(Some(Atom::new(normalize_symbol(&caps["element"]), position)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Idle,
    InSection,
}

/// 收集每个优化循环的笛卡尔几何
pub fn parse_cartesian_geometries(content: &str) -> Result<GeometryTable> {
    let mut geometries = GeometryTable::new();
    let mut current = CartesianGeometry::new();
    let mut state = ScanState::Idle;

    for line in content.lines() {
        if line.contains(SECTION_START) {
            state = ScanState::InSection;
            current.clear();
            continue;
        }

        if line.contains(SECTION_END) {
            if state != ScanState::InSection {
                return Err(MonitorError::inconsistent(
                    "cartesian geometry section",
                    line,
                    "distance matrix without a preceding coordinate table",
                ));
            }
            geometries.push(std::mem::take(&mut current));
            state = ScanState::Idle;
            continue;
        }

        if state == ScanState::InSection {
            if let Some(atom) = parse_atom_line(line)? {
                current.push(atom);
            }
        }
    }

    Ok(geometries)
}
