//! # c4mon - CFOUR 计算进度监视器
//!
//! 扫描 CFOUR 主输出（以及同目录的 `QUADRATURE`、`FILES`），
//! 汇总能量收敛、几何变化与振动频率，并可写出 XYZ 轨迹。
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (日志解析)
//!   │     ├── models/    (数据模型)
//!   │     ├── report/    (文本报告)
//!   │     └── export/    (XYZ / CSV / PNG 输出)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod export;
pub mod models;
pub mod parsers;
pub mod report;
pub mod utils;
