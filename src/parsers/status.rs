//! # 运行状态解析
//!
//! - 计算是否已正常结束
//! - 零点振动能
//! - 频率计算已完成的位移数
//!
//! ## 依赖关系
//! - 被 `commands/monitor.rs` 使用

use crate::error::Result;
use crate::parsers::parse_field;
use regex::Regex;
use std::sync::OnceLock;

const FINISHED_MARKERS: [&str; 2] = ["xprops finished", "Zero-point vibrational energy"];
const DISPLACEMENT_MARKER: &str = "CPHF coefficients";

struct Patterns {
    zpe: Regex,
    zpe_vibrational: Regex,
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| Patterns {
        // 第六个字段
        zpe: Regex::new(r"Zero-point energy:\s+(?:\S+\s+){3}(?P<zpe>\S+)").unwrap(),
        // 倒数第二个字段
        zpe_vibrational: Regex::new(r"Zero-point vibrational energy:.*\s(?P<zpe>\S+)\s+\S+\s*$")
            .unwrap(),
    })
}

/// 最后三行中是否出现结束标记
pub fn is_finished(content: &str) -> bool {
    content
        .lines()
        .rev()
        .take(3)
        .any(|line| FINISHED_MARKERS.iter().any(|m| line.contains(m)))
}

/// 零点振动能 (kJ/mol)
pub fn zero_point_energy(content: &str) -> Result<Option<f64>> {
    let p = patterns();
    for line in content.lines() {
        if line.contains("Zero-point energy:") {
            if let Some(caps) = p.zpe.captures(line) {
                return parse_field("zero-point energy", line, &caps["zpe"]).map(Some);
            }
        }
        if line.contains("Zero-point vibrational energy:") {
            if let Some(caps) = p.zpe_vibrational.captures(line) {
                return parse_field("zero-point energy", line, &caps["zpe"]).map(Some);
            }
        }
    }
    Ok(None)
}

/// 已完成的有限差分位移数
pub fn displacement_count(content: &str) -> usize {
    content
        .lines()
        .filter(|line| line.contains(DISPLACEMENT_MARKER))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finished_marker_in_tail() {
        let log = "line\nline\n  @CHECKOUT-I, Total execution time : 1.0\n  --invoking executable xprops finished\n\n";
        assert!(is_finished(log));
    }

    #[test]
    fn test_finished_marker_too_early() {
        let log = "xprops finished\na\nb\nc\nd\n";
        assert!(!is_finished(log));
    }

    #[test]
    fn test_zero_point_energy_forms() {
        let log = "  Zero-point energy:    0.0212345 (au)  =    55.7512 kJ/mol\n";
        let zpe = zero_point_energy(log).unwrap().unwrap();
        assert!((zpe - 55.7512).abs() < 1e-9);

        let log = "  Zero-point vibrational energy:     55.7612 kJ/mol\n";
        let zpe = zero_point_energy(log).unwrap().unwrap();
        assert!((zpe - 55.7612).abs() < 1e-9);

        assert!(zero_point_energy("nothing here\n").unwrap().is_none());
    }

    #[test]
    fn test_displacement_count() {
        let log = "CPHF coefficients\nfoo\n  CPHF coefficients converged\n";
        assert_eq!(displacement_count(log), 2);
    }
}
