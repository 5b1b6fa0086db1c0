//! # monitor 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/monitor.rs`

use clap::Args;
use std::path::PathBuf;

/// monitor 子命令参数
#[derive(Args, Debug)]
pub struct MonitorArgs {
    /// CFOUR output file
    #[arg(default_value = "OUT", env = "C4MON_OUTPUT")]
    pub output: PathBuf,

    /// Compact report: hide timing info and window long energy tables
    #[arg(short, long, default_value_t = false)]
    pub short: bool,

    /// Write the optimisation trajectory to opt.xyz beside the log
    #[arg(short, long, default_value_t = false)]
    pub opt: bool,

    /// Write the normal modes to vib.xyz beside the log
    #[arg(short, long, default_value_t = false)]
    pub vib: bool,

    /// Export the energy table to a CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Plot energy convergence to a PNG file
    #[arg(long)]
    pub plot: Option<PathBuf>,
}
