//! # c4mon 命令行入口
//!
//! ## 子命令
//! - `monitor` - 汇总计算进度，按需写出轨迹与能量表
//! - `info`    - 打印头部计算参数

use c4mon::cli::Cli;
use c4mon::{commands, utils};
use clap::Parser;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
