//! # 轨迹文件写出
//!
//! 两种多帧 XYZ 文件，写在日志同目录：
//! - `opt.xyz`：每个优化循环一帧，注释行为该循环的最终能量
//! - `vib.xyz`：每个振动模式一帧，注释行为模式编号与频率
//!
//! 文件先写入同目录的临时文件再重命名，失败时不会留下半截文件。
//!
//! ## 依赖关系
//! - 被 `commands/monitor.rs` 调用
//! - 使用 `models/energy.rs`, `models/geometry.rs`, `models/vibration.rs`
//! - 使用 `tempfile` 实现原子写入

use crate::error::{MonitorError, Result};
use crate::models::energy::populated_levels;
use crate::models::{CartesianGeometry, EnergyIteration, VibrationTable};

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::{Path, PathBuf};

pub const OPT_FILE: &str = "opt.xyz";
pub const VIB_FILE: &str = "vib.xyz";

/// 该帧最高级别能量尚未打印时附加在注释行上
const PENDING_NOTE: &str = "lower level, correlated energy pending";

/// 写出结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written { path: PathBuf, frames: usize },
    /// 没有可写的数据，未创建文件
    NothingWritten,
}

/// 优化轨迹文本；数据不足两帧时返回 None
pub fn opt_trajectory(
    energies: &[EnergyIteration],
    geometries: &[CartesianGeometry],
) -> Option<(String, usize)> {
    if energies.len() < 2 || geometries.is_empty() {
        return None;
    }

    let top = populated_levels(energies)?;
    let mut out = String::new();
    let mut frames = 0;
    for (iteration, geometry) in energies.iter().zip(geometries) {
        let comment = match (iteration.get(top), iteration.last_populated()) {
            (Some(energy), _) => format!("E = {:.9} Hartree", energy),
            (None, Some(energy)) => format!("E = {:.9} Hartree ({})", energy, PENDING_NOTE),
            (None, None) => continue,
        };
        writeln!(out, "{}", geometry.len()).ok();
        writeln!(out, "{}", comment).ok();
        for atom in geometry {
            let [x, y, z] = atom.position;
            writeln!(out, "{:<3} {:>13.9} {:>13.9} {:>13.9}", atom.element, x, y, z).ok();
        }
        frames += 1;
    }

    (frames > 0).then_some((out, frames))
}

/// 振动轨迹文本；没有模式时返回 None
pub fn vib_trajectory(vibrations: &VibrationTable) -> Option<(String, usize)> {
    if vibrations.is_empty() {
        return None;
    }

    let mut out = String::new();
    for (index, record) in vibrations {
        writeln!(out, "{}", record.atoms.len()).ok();
        writeln!(out, "v{} = {} cm**-1", index, record.frequency).ok();
        for atom in &record.atoms {
            let [dx, dy, dz] = atom.displacement;
            writeln!(out, "{:<3} {:>13.9} {:>13.9} {:>13.9}", atom.element, dx, dy, dz).ok();
        }
    }

    Some((out, vibrations.len()))
}

/// 写入同目录临时文件后重命名
fn write_atomically(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let write_err = |e: std::io::Error| MonitorError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    tmp.flush().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

fn write_frames(path: PathBuf, rendered: Option<(String, usize)>) -> Result<WriteOutcome> {
    match rendered {
        Some((content, frames)) => {
            write_atomically(&path, &content)?;
            Ok(WriteOutcome::Written { path, frames })
        }
        None => Ok(WriteOutcome::NothingWritten),
    }
}

/// 写出 `opt.xyz`
pub fn write_opt_trajectory(
    dir: &Path,
    energies: &[EnergyIteration],
    geometries: &[CartesianGeometry],
) -> Result<WriteOutcome> {
    write_frames(dir.join(OPT_FILE), opt_trajectory(energies, geometries))
}

/// 写出 `vib.xyz`
pub fn write_vib_trajectory(dir: &Path, vibrations: &VibrationTable) -> Result<WriteOutcome> {
    write_frames(dir.join(VIB_FILE), vib_trajectory(vibrations))
}
