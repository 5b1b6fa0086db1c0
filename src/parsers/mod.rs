//! # 解析器模块
//!
//! 对 CFOUR 输出文件做单遍扫描，提取结构化记录。
//! 每次调用都从头重新扫描，日志可能仍在被写入。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: calc_info, energy, zmatrix, cartesian, gradient, quadrature, status

pub mod calc_info;
pub mod cartesian;
pub mod energy;
pub mod gradient;
pub mod quadrature;
pub mod status;
pub mod zmatrix;

use crate::error::{MonitorError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// 读取整个日志文件
pub fn read_log(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => MonitorError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => MonitorError::FileReadError {
            path: path.display().to_string(),
            source: e,
        },
    })
}

/// 读取可选的伴随文件，不存在时返回 None
pub fn read_companion(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(s) => Ok(Some(s)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(MonitorError::FileReadError {
            path: path.display().to_string(),
            source: e,
        }),
    }
}

/// 截掉末尾尚未写完的行
///
/// CFOUR 仍在运行时，文件最后一行可能只刷新了一半。
pub fn complete_lines(content: &str) -> &str {
    match content.rfind('\n') {
        Some(end) => &content[..=end],
        None => "",
    }
}

/// 解析已匹配行中的数值；失败说明模式假设不成立
pub(crate) fn parse_field(what: &str, line: &str, field: &str) -> Result<f64> {
    field.trim().parse().map_err(|_| {
        MonitorError::inconsistent(what, line, format!("'{}' is not a number", field))
    })
}
