//! # 统一错误处理模块
//!
//! 定义 c4mon 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// c4mon 统一错误类型
#[derive(Error, Debug)]
pub enum MonitorError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No output file to process: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    /// 匹配到的行与预期格式不一致，说明当前日志方言与解析假设不符
    #[error("Inconsistent {what} while parsing: {reason}\n  at: {line}")]
    ParseConsistency {
        what: String,
        line: String,
        reason: String,
    },

    #[error("Calculation type unknown\n{0}")]
    UnknownCalculationType(String),

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // 导出错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Plot error: {0}")]
    PlotError(String),

    // ─────────────────────────────────────────────────────────────
    // 外部协作者 (VPT2)
    // ─────────────────────────────────────────────────────────────
    #[error("Anharmonic solver failed: {0}")]
    Collaborator(String),
}

impl MonitorError {
    /// 构造解析一致性错误
    pub fn inconsistent(
        what: impl Into<String>,
        line: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        MonitorError::ParseConsistency {
            what: what.into(),
            line: line.into(),
            reason: reason.into(),
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, MonitorError>;
