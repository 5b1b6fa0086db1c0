//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `monitor`: 汇总 CFOUR 计算进度
//! - `info`: 打印计算设置表
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: monitor, info

pub mod info;
pub mod monitor;

use clap::{Parser, Subcommand};

/// c4mon - CFOUR 计算进度监视器
#[derive(Parser)]
#[command(name = "c4mon")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Progress monitor for CFOUR quantum-chemistry runs", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Summarise energies, geometries and vibrations of a CFOUR run
    Monitor(monitor::MonitorArgs),

    /// Print the calculation settings found in the log header
    Info(info::InfoArgs),
}
