// ==========================================
// 耐材内衬设计计算系统 - 模拟结果领域模型
// ==========================================
// 职责: 温度剖面点、单层结果、冻结前沿、安全判定原因、模拟结果
// 红线: 结果为不可变记录，不含运行时标识(同一请求重复计算结果完全一致)
// ==========================================

use crate::domain::lining::Layer;
use crate::domain::types::{SafetyReasonCode, SafetyStatus};
use serde::{Deserialize, Serialize};

// ==========================================
// ProfilePoint - 温度剖面点
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfilePoint {
    pub position_mm: f64, // 距热面深度
    pub temp_c: f64,      // 温度
}

// ==========================================
// LayerResult - 单层计算结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerResult {
    pub layer: Layer,

    // ===== 温度 =====
    pub inner_face_temp_c: f64, // 热面温度
    pub outer_face_temp_c: f64, // 冷面温度

    // ===== 几何 (仅圆筒) =====
    pub inner_radius_mm: Option<f64>,
    pub outer_radius_mm: Option<f64>,

    // ===== 热阻 =====
    pub effective_conductivity_w_mk: f64, // 温度修正后的导热系数
    pub resistance_k_w: f64,              // 绝对热阻 (K/W)
    pub areal_resistance_m2k_w: f64,      // 按通量参考面积折算的面热阻

    // ===== 材料清单 =====
    pub volume_m3: f64,
    pub mass_kg: f64,
    pub cost: f64,
}

// ==========================================
// FreezeFront - 冻结前沿位置
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FreezeFront {
    /// 液相线未知(哨兵值)，不评估
    NotApplicable,
    /// 热面温度已低于液相线，前沿在深度 0
    AtHotFace,
    /// 前沿位于某层内部(含层边界)
    InLayer { layer_index: usize, depth_mm: f64 },
    /// 叠层内未找到前沿，壳体温度仍高于液相线
    NotFound,
}

impl FreezeFront {
    /// 前沿深度 (mm)，无前沿时为 None
    pub fn depth_mm(&self) -> Option<f64> {
        match self {
            FreezeFront::AtHotFace => Some(0.0),
            FreezeFront::InLayer { depth_mm, .. } => Some(*depth_mm),
            FreezeFront::NotApplicable | FreezeFront::NotFound => None,
        }
    }

    /// 前沿所在层，无前沿时为 None
    pub fn layer_index(&self) -> Option<usize> {
        match self {
            FreezeFront::AtHotFace => Some(0),
            FreezeFront::InLayer { layer_index, .. } => Some(*layer_index),
            FreezeFront::NotApplicable | FreezeFront::NotFound => None,
        }
    }
}

// ==========================================
// SafetyReason - 安全判定原因 (可解释性)
// ==========================================
// 只携带判定数据，不含任何语言文本；文本由输出层按调用方语言生成
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyReason {
    pub code: SafetyReasonCode,
    pub layer_index: Option<usize>,
    #[serde(default)]
    pub details: ReasonDetails,
}

/// 判定原因的数值细节
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReasonDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_c: Option<f64>, // 壳体温度或层热面温度
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit_c: Option<f64>,
}

impl SafetyReason {
    pub fn new(code: SafetyReasonCode, layer_index: Option<usize>, details: ReasonDetails) -> Self {
        Self {
            code,
            layer_index,
            details,
        }
    }

    /// 消息模板占位符取值
    ///
    /// # 返回
    /// (占位符名, 文本) 列表；层号从 1 开始，数值保留 1 位小数
    pub fn message_args(&self) -> Vec<(&'static str, String)> {
        let mut args = Vec::new();
        if let Some(index) = self.layer_index {
            args.push(("layer", (index + 1).to_string()));
        }
        if let Some(name) = &self.details.layer_name {
            args.push(("name", name.clone()));
        }
        if let Some(depth) = self.details.depth_mm {
            args.push(("depth", format!("{:.1}", depth)));
        }
        if let Some(temp) = self.details.temp_c {
            let key = match self.code {
                SafetyReasonCode::ShellOverTemperature => "shell",
                _ => "temp",
            };
            args.push((key, format!("{:.1}", temp)));
        }
        if let Some(limit) = self.details.limit_c {
            args.push(("limit", format!("{:.1}", limit)));
        }
        args
    }
}

// ==========================================
// SimulationResult - 模拟结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    // ===== 热工 =====
    pub heat_flux_w_m2: f64,           // 热流密度 (按参考面积)
    pub heat_loss_w: f64,              // 总散热功率
    pub total_resistance_k_w: f64,     // 总热阻 (含对流膜)
    pub film_resistance_k_w: f64,      // 对流膜热阻
    pub shell_temp_c: f64,             // 壳体(最外层冷面)温度
    pub temperature_profile: Vec<ProfilePoint>,
    pub iterations: u32,               // 导热修正迭代次数
    pub converged: bool,               // 是否满足收敛判据

    // ===== 分层 =====
    pub layer_results: Vec<LayerResult>,
    pub total_thickness_mm: f64,
    pub required_shell_diameter_mm: Option<f64>, // 圆筒: 最外层外径

    // ===== 材料清单 =====
    pub total_mass_kg: f64,
    pub total_cost: f64,

    // ===== 冻结与安全 =====
    pub liquidus_temp_c: f64,
    pub freeze_front: FreezeFront,
    pub freeze_depth_mm: Option<f64>,
    pub safety_status: SafetyStatus,
    pub safety_reasons: Vec<SafetyReason>,
}
