//! # 系统状态
//!
//! 计算尚未产生任何数据时的兜底输出：CPU 温度与内存占用。
//! 读取失败时返回 `unknown`，从不报错。
//!
//! ## 依赖关系
//! - 被 `commands/monitor.rs` 使用

use std::fs;
use std::path::Path;

const HWMON_COUNT: usize = 6;
const UNKNOWN: &str = "unknown";

fn read_millidegrees(path: &Path) -> Option<f64> {
    fs::read_to_string(path)
        .ok()?
        .trim()
        .parse::<f64>()
        .ok()
        .map(|v| v / 1000.0)
}

/// CPU 温度，来自带 `Core` 标签的 hwmon 设备
pub fn cpu_temperature() -> String {
    for n in 0..HWMON_COUNT {
        let device = Path::new("/sys/class/hwmon")
            .join(format!("hwmon{}", n))
            .join("device");
        let Ok(label) = fs::read_to_string(device.join("temp3_label")) else {
            continue;
        };
        if !label.contains("Core") {
            continue;
        }
        if let (Some(input), Some(crit)) = (
            read_millidegrees(&device.join("temp1_input")),
            read_millidegrees(&device.join("temp1_crit")),
        ) {
            return format!("{:.0}\u{00B0}C (Critical temp.: {:.0}\u{00B0}C)", input, crit);
        }
    }
    UNKNOWN.to_string()
}

/// 从 /proc/meminfo 文本提取 (已用, 总量)，单位 MB
pub fn parse_meminfo(content: &str) -> Option<(u64, u64)> {
    let field = |name: &str| -> Option<u64> {
        content
            .lines()
            .find(|l| l.starts_with(name))?
            .split_whitespace()
            .nth(1)?
            .parse()
            .ok()
    };
    let total = field("MemTotal:")?;
    let available = field("MemAvailable:").or_else(|| field("MemFree:"))?;
    Some((total.saturating_sub(available) / 1024, total / 1024))
}

/// 内存占用
pub fn used_memory() -> String {
    fs::read_to_string("/proc/meminfo")
        .ok()
        .and_then(|s| parse_meminfo(&s))
        .map(|(used, total)| format!("{} MB of {} MB", used, total))
        .unwrap_or_else(|| UNKNOWN.to_string())
}
