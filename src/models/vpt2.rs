//! # VPT2 外部协作者接口
//!
//! 二阶振动微扰理论（力场变换、非谐常数）由外部库完成，
//! 本模块只定义交换数据的形状：
//! - 输入：参考几何 + 谐振频率/简正模式基
//! - 输出：三次/半四次力常数与非谐常数矩阵 χ
//!
//! ## 依赖关系
//! - 使用 `models/geometry.rs`, `models/vibration.rs`
//! - 由调用方提供 `AnharmonicSolver` 实现

use crate::error::{MonitorError, Result};
use crate::models::geometry::CartesianGeometry;
use crate::models::vibration::VibrationTable;

/// 单个简正模式
#[derive(Debug, Clone, PartialEq)]
pub struct NormalMode {
    /// 谐振频率 (cm⁻¹)
    pub wavenumber: f64,

    /// 每个原子的位移向量
    pub vectors: Vec<[f64; 3]>,
}

/// 谐振基：参考几何与简正模式
#[derive(Debug, Clone, PartialEq)]
pub struct HarmonicBasis {
    /// 元素符号
    pub elements: Vec<String>,

    /// 参考坐标 (bohr)
    pub coordinates_bohr: Vec<[f64; 3]>,

    /// 按模式编号排序的简正模式
    pub modes: Vec<NormalMode>,
}

impl HarmonicBasis {
    /// 由最终几何与振动表构建谐振基
    ///
    /// 哑原子不参与；含虚频的运行不是极小点，拒绝处理。
    pub fn from_run(geometry: &CartesianGeometry, vibrations: &VibrationTable) -> Result<Self> {
        let atoms: Vec<_> = geometry.iter().filter(|a| !a.is_dummy()).collect();
        if atoms.is_empty() {
            return Err(MonitorError::InvalidArgument(
                "VPT2 needs a reference geometry".to_string(),
            ));
        }
        if vibrations.is_empty() {
            return Err(MonitorError::InvalidArgument(
                "VPT2 needs at least one normal mode".to_string(),
            ));
        }

        let mut modes = Vec::with_capacity(vibrations.len());
        for (index, record) in vibrations {
            if record.frequency.imaginary {
                return Err(MonitorError::InvalidArgument(format!(
                    "mode {} has imaginary frequency {}",
                    index, record.frequency
                )));
            }
            if record.atoms.len() != atoms.len() {
                return Err(MonitorError::InvalidArgument(format!(
                    "mode {} has {} vectors for {} atoms",
                    index,
                    record.atoms.len(),
                    atoms.len()
                )));
            }
            modes.push(NormalMode {
                wavenumber: record.frequency.wavenumber,
                vectors: record.atoms.iter().map(|a| a.displacement).collect(),
            });
        }

        Ok(HarmonicBasis {
            elements: atoms.iter().map(|a| a.element.clone()).collect(),
            coordinates_bohr: atoms.iter().map(|a| a.position_bohr()).collect(),
            modes,
        })
    }

    pub fn num_modes(&self) -> usize {
        self.modes.len()
    }
}

/// 三次力常数 φ_ijk (cm⁻¹)，稀疏存储
#[derive(Debug, Clone, PartialEq)]
pub struct CubicConstant {
    pub modes: (usize, usize, usize),
    pub value: f64,
}

/// 半四次力常数 φ_iijj (cm⁻¹)
#[derive(Debug, Clone, PartialEq)]
pub struct QuarticConstant {
    pub modes: (usize, usize),
    pub value: f64,
}

/// 外部求解器的返回值
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Vpt2Output {
    pub cubic: Vec<CubicConstant>,
    pub semiquartic: Vec<QuarticConstant>,

    /// 非谐常数矩阵 χ_ij (cm⁻¹)，维度 = 模式数
    pub chi: Vec<Vec<f64>>,
}

/// 外部 VPT2 求解器
pub trait AnharmonicSolver {
    fn solve(&self, basis: &HarmonicBasis) -> Result<Vpt2Output>;
}

/// 调用外部求解器并检查返回形状
pub fn run_vpt2(solver: &dyn AnharmonicSolver, basis: &HarmonicBasis) -> Result<Vpt2Output> {
    let output = solver.solve(basis)?;
    let n = basis.num_modes();

    if output.chi.len() != n || output.chi.iter().any(|row| row.len() != n) {
        return Err(MonitorError::Collaborator(format!(
            "χ matrix must be {n}x{n}"
        )));
    }

    let out_of_range = |i: usize| i >= n;
    if output
        .cubic
        .iter()
        .any(|c| out_of_range(c.modes.0) || out_of_range(c.modes.1) || out_of_range(c.modes.2))
        || output
            .semiquartic
            .iter()
            .any(|q| out_of_range(q.modes.0) || out_of_range(q.modes.1))
    {
        return Err(MonitorError::Collaborator(
            "force constant refers to an unknown mode".to_string(),
        ));
    }

    Ok(output)
}
