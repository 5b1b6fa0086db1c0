//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `report/`, `export/`, `utils/`
//! - 子模块: monitor, info

pub mod info;
pub mod monitor;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Monitor(args) => monitor::execute(args),
        Commands::Info(args) => info::execute(args),
    }
}
