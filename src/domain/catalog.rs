// ==========================================
// 耐材内衬设计计算系统 - 目录领域模型
// ==========================================
// 职责: 材料目录条目、金属目录条目
// 红线: 目录由外部协作方提供，引擎只读
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// MaterialCatalogEntry - 耐材目录条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialCatalogEntry {
    pub name: String,                    // 材料名称
    pub density_kg_m3: f64,              // 体积密度
    pub conductivity_w_mk: f64,          // 导热系数 λ
    pub price_per_tonne: f64,            // 单价 (每吨)
    #[serde(default)]
    pub max_service_temp_c: Option<f64>, // 最高使用温度
}

impl MaterialCatalogEntry {
    pub fn new(name: &str, density_kg_m3: f64, conductivity_w_mk: f64, price_per_tonne: f64) -> Self {
        Self {
            name: name.to_string(),
            density_kg_m3,
            conductivity_w_mk,
            price_per_tonne,
            max_service_temp_c: None,
        }
    }

    /// 仅知道密度时按密度分级估算 λ 与单价
    ///
    /// # 规则
    /// - 密度 < 1500: 轻质隔热料, λ=0.25, 单价 450
    /// - 密度 > 2700: 重质碱性料, λ=2.2, 单价 1200
    /// - 其余: 致密浇注料, λ=1.5, 单价 800
    pub fn estimate_from_density(name: &str, density_kg_m3: f64) -> Self {
        let (conductivity_w_mk, price_per_tonne) = density_class_defaults(density_kg_m3);
        Self::new(name, density_kg_m3, conductivity_w_mk, price_per_tonne)
    }
}

/// 密度分级默认值 (λ, 单价)
pub fn density_class_defaults(density_kg_m3: f64) -> (f64, f64) {
    if density_kg_m3 < 1500.0 {
        (0.25, 450.0)
    } else if density_kg_m3 > 2700.0 {
        (2.2, 1200.0)
    } else {
        (1.5, 800.0)
    }
}

// ==========================================
// MetalCatalogEntry - 金属目录条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetalCatalogEntry {
    pub name: String,         // 金属名称
    pub liquidus_temp_c: f64, // 液相线温度
}

impl MetalCatalogEntry {
    pub fn new(name: &str, liquidus_temp_c: f64) -> Self {
        Self {
            name: name.to_string(),
            liquidus_temp_c,
        }
    }
}
