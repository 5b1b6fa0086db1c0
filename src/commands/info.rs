//! # info 子命令实现
//!
//! 以表格形式打印日志头部的计算参数。
//!
//! ## 依赖关系
//! - 使用 `cli/info.rs` 定义的参数
//! - 使用 `parsers/calc_info.rs`, `utils/output.rs`

use crate::cli::info::InfoArgs;
use crate::error::Result;
use crate::models::CalculationInfo;
use crate::parsers::{self, calc_info};
use crate::utils::output;

use tabled::{Table, Tabled};

/// 参数表行
#[derive(Debug, Clone, Tabled)]
struct InfoRow {
    #[tabled(rename = "Keyword")]
    keyword: String,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Value")]
    value: String,
}

fn info_rows(info: &CalculationInfo) -> Vec<InfoRow> {
    info.iter()
        .map(|(key, value)| InfoRow {
            keyword: key.label().to_string(),
            code: key.code().to_string(),
            value: if value.is_empty() {
                "-".to_string()
            } else {
                value.to_string()
            },
        })
        .collect()
}

/// 执行 info
pub fn execute(args: InfoArgs) -> Result<()> {
    let content = parsers::read_log(&args.output)?;
    let info = calc_info::parse_calc_info(&content);

    output::print_header(&format!("Calculation settings: {}", args.output.display()));
    println!("{}", Table::new(info_rows(&info)));

    match info.run_kind() {
        Some(kind) => output::print_info(&format!("Calculation type: {}", kind)),
        None => output::print_warning("Calculation type unknown"),
    }
    Ok(())
}
