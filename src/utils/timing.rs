//! # 计算耗时
//!
//! CFOUR 启动时在工作目录创建 `FILES`，以其修改时间作为开始时间，
//! 主输出的修改时间作为最后更新时间。
//!
//! ## 依赖关系
//! - 被 `commands/monitor.rs` 使用
//! - 使用 `chrono` 格式化本地时间

use chrono::{DateTime, Local};
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

pub const FILES_FILE: &str = "FILES";

const TIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// 运行时间信息
#[derive(Debug, Clone)]
pub struct TimeInfo {
    pub start: SystemTime,
    pub last_change: SystemTime,
}

impl TimeInfo {
    /// 读取 FILES 与输出文件的修改时间；FILES 不存在时返回 None
    pub fn read(log_path: &Path, log_dir: &Path) -> Option<Self> {
        let start = fs::metadata(log_dir.join(FILES_FILE)).ok()?.modified().ok()?;
        let last_change = fs::metadata(log_path).ok()?.modified().ok()?;
        Some(TimeInfo { start, last_change })
    }

    pub fn running_for(&self) -> Duration {
        self.last_change
            .duration_since(self.start)
            .unwrap_or(Duration::ZERO)
    }
}

pub fn format_timestamp(time: SystemTime) -> String {
    DateTime::<Local>::from(time).format(TIME_FORMAT).to_string()
}

/// 形如 `1 day, 2:03:04` 的时长
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let days = secs / 86_400;
    let rest = secs % 86_400;
    let hms = format!("{}:{:02}:{:02}", rest / 3600, (rest % 3600) / 60, rest % 60);
    match days {
        0 => hms,
        1 => format!("1 day, {}", hms),
        d => format!("{} days, {}", d, hms),
    }
}
