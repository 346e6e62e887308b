// ==========================================
// 耐材内衬设计计算系统 - 领域类型定义
// ==========================================
// 职责: 安全等级、几何类型、对流膜模型、未知金属策略等枚举
// 序列化格式: SCREAMING_SNAKE_CASE (与输出接口一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 安全等级 (Safety Status)
// ==========================================
// 顺序: Safe < Warning < Critical
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SafetyStatus {
    Safe,     // 冻结前沿在耐材层内完成
    Warning,  // 冻结前沿落入最外层(钢壳/结构层) 或 壳体超温
    Critical, // 叠层内找不到冻结前沿，金属可能到达壳体
}

impl fmt::Display for SafetyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SafetyStatus::Safe => write!(f, "SAFE"),
            SafetyStatus::Warning => write!(f, "WARNING"),
            SafetyStatus::Critical => write!(f, "CRITICAL"),
        }
    }
}

// ==========================================
// 几何类型 (Geometry Kind)
// ==========================================
// 外部接口标签: "flat" / "cylinder"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryKind {
    Flat,     // 平壁
    Cylinder, // 圆筒壳
}

impl GeometryKind {
    /// 解析外部几何标签（大小写、首尾空白不敏感）
    ///
    /// 未识别的标签返回 None，由调用方构造 UnknownGeometryType 错误
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "flat" => Some(GeometryKind::Flat),
            "cylinder" => Some(GeometryKind::Cylinder),
            _ => None,
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryKind::Flat => write!(f, "flat"),
            GeometryKind::Cylinder => write!(f, "cylinder"),
        }
    }
}

// ==========================================
// 平壁对流膜热阻模型 (Film Model)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilmModel {
    Coefficient, // R_conv = 1/(h·A)
    FixedAreal,  // R_conv = r_fixed / A (r_fixed 单位 m²K/W)
}

impl fmt::Display for FilmModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilmModel::Coefficient => write!(f, "COEFFICIENT"),
            FilmModel::FixedAreal => write!(f, "FIXED_AREAL"),
        }
    }
}

// ==========================================
// 未知金属策略 (Unknown Metal Policy)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnknownMetalPolicy {
    Reject,       // 目录中找不到金属 -> 输入错误
    ZeroLiquidus, // 兼容旧行为: 液相线记为 0，视为无冻结风险
}

impl fmt::Display for UnknownMetalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnknownMetalPolicy::Reject => write!(f, "REJECT"),
            UnknownMetalPolicy::ZeroLiquidus => write!(f, "ZERO_LIQUIDUS"),
        }
    }
}

// ==========================================
// 安全判定原因码 (Safety Reason Code)
// ==========================================
// 红线: 每条判定都必须带原因码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SafetyReasonCode {
    FrontContained,      // 冻结前沿在耐材层内
    NoFreezingRisk,      // 液相线未知(哨兵值)，不评估冻结
    FrontInShellLayer,   // 冻结前沿落入最外层
    FrontNotFound,       // 叠层内无冻结前沿
    ShellOverTemperature, // 壳体超温
    ServiceTempExceeded, // 某层热面温度超过材料最高使用温度
}

impl SafetyReasonCode {
    /// 该原因对应的最低安全等级
    pub fn severity(&self) -> SafetyStatus {
        match self {
            SafetyReasonCode::FrontContained | SafetyReasonCode::NoFreezingRisk => {
                SafetyStatus::Safe
            }
            SafetyReasonCode::FrontInShellLayer
            | SafetyReasonCode::ShellOverTemperature
            | SafetyReasonCode::ServiceTempExceeded => SafetyStatus::Warning,
            SafetyReasonCode::FrontNotFound => SafetyStatus::Critical,
        }
    }

    /// i18n 消息键
    pub fn message_key(&self) -> &'static str {
        match self {
            SafetyReasonCode::FrontContained => "safety.front_contained",
            SafetyReasonCode::NoFreezingRisk => "safety.no_freezing_risk",
            SafetyReasonCode::FrontInShellLayer => "safety.front_in_shell_layer",
            SafetyReasonCode::FrontNotFound => "safety.front_not_found",
            SafetyReasonCode::ShellOverTemperature => "safety.shell_over_temperature",
            SafetyReasonCode::ServiceTempExceeded => "safety.service_temp_exceeded",
        }
    }
}

impl fmt::Display for SafetyReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SafetyReasonCode::FrontContained => "FRONT_CONTAINED",
            SafetyReasonCode::NoFreezingRisk => "NO_FREEZING_RISK",
            SafetyReasonCode::FrontInShellLayer => "FRONT_IN_SHELL_LAYER",
            SafetyReasonCode::FrontNotFound => "FRONT_NOT_FOUND",
            SafetyReasonCode::ShellOverTemperature => "SHELL_OVER_TEMPERATURE",
            SafetyReasonCode::ServiceTempExceeded => "SERVICE_TEMP_EXCEEDED",
        };
        write!(f, "{}", s)
    }
}
