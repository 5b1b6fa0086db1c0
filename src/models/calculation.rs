//! # CFOUR 计算参数数据模型
//!
//! 存储从输出文件头部提取的计算控制参数，以及由此推导的运行类型。
//!
//! ## 依赖关系
//! - 被 `parsers/calc_info.rs` 填充
//! - 被 `parsers/energy.rs`, `commands/` 读取

use serde::Serialize;

/// 头部参数键
///
/// 每个键对应 CFOUR 参数表中的一行：可读标签 + 内部代码 + 值。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum InfoKey {
    Level,
    Basis,
    Charge,
    Multiplicity,
    Reference,
    GeometryMethod,
    GeometryConvergence,
    Vibration,
    Anharmonic,
    FrozenCore,
    DropMo,
}

impl InfoKey {
    pub const ALL: [InfoKey; 11] = [
        InfoKey::Level,
        InfoKey::Basis,
        InfoKey::Charge,
        InfoKey::Multiplicity,
        InfoKey::Reference,
        InfoKey::GeometryMethod,
        InfoKey::GeometryConvergence,
        InfoKey::Vibration,
        InfoKey::Anharmonic,
        InfoKey::FrozenCore,
        InfoKey::DropMo,
    ];

    /// 参数表中的可读标签（拼写与 CFOUR 输出一致）
    pub fn label(self) -> &'static str {
        match self {
            InfoKey::Level => "CALCLEVEL",
            InfoKey::Basis => "BASIS",
            InfoKey::Charge => "CHARGE",
            InfoKey::Multiplicity => "MULTIPLICTY",
            InfoKey::Reference => "REFERENCE",
            InfoKey::GeometryMethod => "GEO_METHOD",
            InfoKey::GeometryConvergence => "GEO_CONV",
            InfoKey::Vibration => "VIBRATION",
            InfoKey::Anharmonic => "ANHARMONIC",
            InfoKey::FrozenCore => "FROZEN_CORE",
            InfoKey::DropMo => "DROPMO",
        }
    }

    /// 参数表中的内部代码
    pub fn code(self) -> &'static str {
        match self {
            InfoKey::Level => "ICLLVL",
            InfoKey::Basis => "IBASIS",
            InfoKey::Charge => "ICHRGE",
            InfoKey::Multiplicity => "IMULTP",
            InfoKey::Reference => "IREFNC",
            InfoKey::GeometryMethod => "INR",
            InfoKey::GeometryConvergence => "ICONTL",
            InfoKey::Vibration => "IVIB",
            InfoKey::Anharmonic => "IANHAR",
            InfoKey::FrozenCore => "IFROCO",
            InfoKey::DropMo => "IDRPMO",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for InfoKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 计算参数表
///
/// 未找到的键保持空字符串，调用方必须将其视为"未知"。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalculationInfo {
    values: [String; 11],
}

impl CalculationInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: InfoKey) -> &str {
        &self.values[key.index()]
    }

    pub fn set(&mut self, key: InfoKey, value: impl Into<String>) {
        self.values[key.index()] = value.into();
    }

    pub fn is_known(&self, key: InfoKey) -> bool {
        !self.get(key).is_empty()
    }

    /// 按固定顺序遍历所有键值
    pub fn iter(&self) -> impl Iterator<Item = (InfoKey, &str)> {
        InfoKey::ALL.iter().map(move |&k| (k, self.get(k)))
    }

    pub fn reference(&self) -> ReferenceKind {
        ReferenceKind::from_value(self.get(InfoKey::Reference))
    }

    pub fn level(&self) -> LevelOfTheory {
        LevelOfTheory::from_value(self.get(InfoKey::Level))
    }

    /// 几何优化方法是否为 NR 或 TS
    pub fn is_geometry_search(&self) -> bool {
        matches!(self.get(InfoKey::GeometryMethod), "NR" | "TS")
    }

    pub fn is_single_point(&self) -> bool {
        self.get(InfoKey::GeometryMethod).contains("SINGLE_POINT")
    }

    pub fn is_frequency(&self) -> bool {
        let vib = self.get(InfoKey::Vibration);
        !vib.is_empty() && vib != "NO"
    }

    /// 冻结核近似是否缺失
    pub fn lacks_frozen_core(&self) -> bool {
        self.get(InfoKey::FrozenCore) != "ON" && self.get(InfoKey::DropMo) == "NONE"
    }

    /// 判断运行类型；无法判断时返回 None
    pub fn run_kind(&self) -> Option<RunKind> {
        if self.is_frequency() {
            Some(RunKind::Frequency)
        } else if self.is_geometry_search() {
            Some(RunKind::Optimization)
        } else if self.is_single_point() {
            Some(RunKind::SinglePoint)
        } else {
            None
        }
    }
}

/// 运行类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    Optimization,
    SinglePoint,
    Frequency,
}

impl std::fmt::Display for RunKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunKind::Optimization => write!(f, "Optimisation"),
            RunKind::SinglePoint => write!(f, "Single Point Energy"),
            RunKind::Frequency => write!(f, "Frequency Analysis"),
        }
    }
}

/// 参考波函数类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Restricted,
    Unrestricted,
    RestrictedOpenShell,
    Unknown,
}

impl ReferenceKind {
    pub fn from_value(value: &str) -> Self {
        match value {
            "RHF" => ReferenceKind::Restricted,
            "UHF" => ReferenceKind::Unrestricted,
            "ROHF" => ReferenceKind::RestrictedOpenShell,
            _ => ReferenceKind::Unknown,
        }
    }
}

/// 理论级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelOfTheory {
    Scf,
    Mp2,
    /// 仅 CCSD
    Ccsd,
    /// CCSD(T) 及其它包含 CCSD 的级别
    CcsdT,
    /// 名称中含 CCSD 但不含 (T)，例如 CCSDT
    CcsdFamily,
    Other,
}

impl LevelOfTheory {
    pub fn from_value(value: &str) -> Self {
        match value {
            "SCF" => LevelOfTheory::Scf,
            "MP2" => LevelOfTheory::Mp2,
            "CCSD" => LevelOfTheory::Ccsd,
            v if v.contains("CCSD(T)") => LevelOfTheory::CcsdT,
            v if v.contains("CCSD") => LevelOfTheory::CcsdFamily,
            _ => LevelOfTheory::Other,
        }
    }
}
