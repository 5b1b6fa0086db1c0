//! # 工具函数模块
//!
//! 提供美化输出、系统状态与计算耗时等工具。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 子模块: output, system, timing

pub mod output;
pub mod system;
pub mod timing;
