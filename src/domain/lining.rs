// ==========================================
// 耐材内衬设计计算系统 - 内衬请求领域模型
// ==========================================
// 职责: 内衬层、几何、模拟请求值对象
// 红线: 层顺序即热流方向 (热面 -> 壳体)
// 红线: 请求构建后不可变，每次模拟独占
// ==========================================

use crate::domain::types::GeometryKind;
use serde::{Deserialize, Serialize};

/// 请求未提供对流系数时的默认值 (W/m²K)
pub const DEFAULT_CONVECTION_COEFF_W_M2K: f64 = 10.0;

// ==========================================
// Layer - 内衬层
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,                      // 材料名称
    pub thickness_mm: f64,                 // 厚度 (mm, > 0)
    pub conductivity_w_mk: f64,            // 导热系数 λ (W/mK, > 0)
    pub density_kg_m3: f64,                // 体积密度 (kg/m³, >= 0)
    pub unit_price_per_tonne: f64,         // 单价 (每吨, >= 0)
    #[serde(default)]
    pub max_service_temp_c: Option<f64>,   // 最高使用温度 (可选)
}

impl Layer {
    pub fn new(
        name: &str,
        thickness_mm: f64,
        conductivity_w_mk: f64,
        density_kg_m3: f64,
        unit_price_per_tonne: f64,
    ) -> Self {
        Self {
            name: name.to_string(),
            thickness_mm,
            conductivity_w_mk,
            density_kg_m3,
            unit_price_per_tonne,
            max_service_temp_c: None,
        }
    }

    pub fn with_max_service_temp(mut self, max_service_temp_c: f64) -> Self {
        self.max_service_temp_c = Some(max_service_temp_c);
        self
    }

    /// 厚度 (m)
    pub fn thickness_m(&self) -> f64 {
        self.thickness_mm / 1000.0
    }
}

// ==========================================
// Geometry - 几何模型
// ==========================================
// 圆筒: 第 i 层外径即第 i+1 层内径，内径单调不减
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Geometry {
    Flat {
        area_m2: f64,
    },
    #[serde(rename = "cylinder")]
    Cylindrical {
        length_m: f64,
        inner_diameter_mm: f64,
    },
}

impl Geometry {
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Flat { .. } => GeometryKind::Flat,
            Geometry::Cylindrical { .. } => GeometryKind::Cylinder,
        }
    }
}

// ==========================================
// SimulationRequest - 模拟请求
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub metal: String,                // 熔融金属名称
    pub target_temp_c: f64,           // 热面(工作)温度
    pub ambient_temp_c: f64,          // 环境温度
    pub layers: Vec<Layer>,           // 内衬层 (热面 -> 壳体)
    pub geometry: Geometry,           // 几何
    pub convection_coeff_w_m2k: f64,  // 外表面对流换热系数
}

impl SimulationRequest {
    /// 创建空层请求，对流系数取默认值
    pub fn new(metal: &str, target_temp_c: f64, ambient_temp_c: f64, geometry: Geometry) -> Self {
        Self {
            metal: metal.to_string(),
            target_temp_c,
            ambient_temp_c,
            layers: Vec::new(),
            geometry,
            convection_coeff_w_m2k: DEFAULT_CONVECTION_COEFF_W_M2K,
        }
    }

    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn with_layers(mut self, layers: Vec<Layer>) -> Self {
        self.layers.extend(layers);
        self
    }

    pub fn with_convection(mut self, convection_coeff_w_m2k: f64) -> Self {
        self.convection_coeff_w_m2k = convection_coeff_w_m2k;
        self
    }

    /// 内衬总厚度 (mm)
    pub fn total_thickness_mm(&self) -> f64 {
        self.layers.iter().map(|l| l.thickness_mm).sum()
    }
}
