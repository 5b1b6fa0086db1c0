//! # info 子命令 CLI 定义

use clap::Args;
use std::path::PathBuf;

/// info 子命令参数
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// CFOUR output file
    #[arg(default_value = "OUT", env = "C4MON_OUTPUT")]
    pub output: PathBuf,
}
