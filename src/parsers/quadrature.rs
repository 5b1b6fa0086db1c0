//! # QUADRATURE 振动文件解析器
//!
//! QUADRATURE 与主输出同目录，按模式依次给出：
//! ```text
//!     1648.1234
//!   0.0000000000   0.0000000000  -0.0690000000
//!   0.0000000000   0.4290000000   0.5480000000
//!   0.0000000000  -0.4290000000   0.5480000000
//!       45.6789i
//!   ...
//! ```
//! 频率行后缀 `i` 表示虚频。位移向量乘以 Å→bohr 的换算因子，
//! 与最终笛卡尔几何按原子序号合并。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/vibration.rs`, `models/geometry.rs`

use crate::error::{MonitorError, Result};
use crate::models::geometry::{angstrom_to_bohr, Atom, CartesianGeometry};
use crate::models::vibration::{Frequency, ModeAtom, VibrationRecord, VibrationTable};
use crate::parsers::{complete_lines, parse_field, read_companion};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// 伴随文件名
pub const QUADRATURE_FILE: &str = "QUADRATURE";

struct Patterns {
    frequency: Regex,
    vector: Regex,
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| Patterns {
        frequency: Regex::new(r"^\s+(?P<freq>[-0-9]+\.\d+i*)\s*$").unwrap(),
        vector: Regex::new(r"^(?P<x>[-0-9]+\.\d+)\s+(?P<y>[-0-9]+\.\d+)\s+(?P<z>[-0-9]+\.\d+)")
            .unwrap(),
    })
}

/// 单个模式的累积状态
struct ModeBlock {
    frequency: Option<Frequency>,
    vectors: Vec<[f64; 3]>,
}

/// 将位移向量与几何按原子合并
fn combine(
    index: usize,
    frequency: Frequency,
    vectors: Vec<[f64; 3]>,
    geometry: &[&Atom],
) -> Result<VibrationRecord> {
    if vectors.len() != geometry.len() {
        return Err(MonitorError::inconsistent(
            "vibration",
            format!("mode {} ({} cm-1)", index, frequency),
            format!(
                "{} displacement vectors for {} atoms",
                vectors.len(),
                geometry.len()
            ),
        ));
    }

    let atoms = geometry
        .iter()
        .zip(vectors)
        .map(|(atom, displacement)| ModeAtom {
            element: atom.element.clone(),
            position: atom.position,
            displacement,
        })
        .collect();

    Ok(VibrationRecord { frequency, atoms })
}

/// 从 QUADRATURE 文本解析振动表
///
/// `geometry` 为最后一个笛卡尔几何；哑原子不参与合并。
pub fn parse_quadrature(content: &str, geometry: &CartesianGeometry) -> Result<VibrationTable> {
    let p = patterns();
    let atoms: Vec<_> = geometry.iter().filter(|a| !a.is_dummy()).collect();

    let mut table = VibrationTable::new();
    let mut block = ModeBlock {
        frequency: None,
        vectors: Vec::new(),
    };

    for line in content.lines() {
        if let Some(caps) = p.frequency.captures(line) {
            if !block.vectors.is_empty() {
                if let Some(freq) = block.frequency.take() {
                    let index = table.len() + 1;
                    let vectors = std::mem::take(&mut block.vectors);
                    table.insert(index, combine(index, freq, vectors, &atoms)?);
                }
            }
            block.frequency = Some(Frequency::parse(&caps["freq"])?);
            continue;
        }

        if let Some(caps) = p.vector.captures(line.trim()) {
            let mut vector = [0.0; 3];
            for (slot, name) in vector.iter_mut().zip(["x", "y", "z"]) {
                *slot = angstrom_to_bohr(parse_field("normal coordinate", line, &caps[name])?);
            }
            block.vectors.push(vector);
        }
    }

    // 最后一个模式没有后继频率行，向量不足时仍在写入中
    if let Some(freq) = block.frequency {
        if !block.vectors.is_empty() && block.vectors.len() >= atoms.len() {
            let index = table.len() + 1;
            table.insert(index, combine(index, freq, block.vectors, &atoms)?);
        }
    }

    Ok(table)
}

/// 读取日志同目录下的 QUADRATURE；文件不存在时返回空表
pub fn read_vibrations(log_dir: &Path, geometry: &CartesianGeometry) -> Result<VibrationTable> {
    match read_companion(&log_dir.join(QUADRATURE_FILE))? {
        Some(content) => parse_quadrature(complete_lines(&content), geometry),
        None => Ok(VibrationTable::new()),
    }
}
