// ==========================================
// 耐材内衬设计计算系统 - API DTO 定义
// ==========================================
// 职责: 单次模拟调用的 JSON 输入/输出结构
// 约定: 层参数可缺省，由材料目录补全
// 约定: freeze_depth_mm 无前沿时输出字符串 "none"
// 约定: 判定原因文本在此按调用方语言生成，引擎结果不含语言文本
// ==========================================

use crate::domain::result::{ProfilePoint, SafetyReason, SimulationResult};
use crate::domain::types::{SafetyReasonCode, SafetyStatus};
use crate::i18n::t_with_args;
use serde::{Deserialize, Serialize, Serializer};

// ==========================================
// 输入
// ==========================================

/// 模拟请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationInput {
    pub metal: String,
    pub target_temp_c: f64,
    pub ambient_temp_c: f64,

    /// 缺省时取配置 default_convection_coeff_w_m2k
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub convection_coeff_w_m2k: Option<f64>,

    pub geometry: GeometryInput,
    pub layers: Vec<LayerInput>,
}

/// 几何输入 (type: "flat" | "cylinder"，忽略大小写)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryInput {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_m2: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_m: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_diameter_mm: Option<f64>,
}

impl GeometryInput {
    pub fn flat(area_m2: f64) -> Self {
        Self {
            kind: "flat".to_string(),
            area_m2: Some(area_m2),
            length_m: None,
            inner_diameter_mm: None,
        }
    }

    pub fn cylinder(length_m: f64, inner_diameter_mm: f64) -> Self {
        Self {
            kind: "cylinder".to_string(),
            area_m2: None,
            length_m: Some(length_m),
            inner_diameter_mm: Some(inner_diameter_mm),
        }
    }
}

/// 层输入
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerInput {
    #[serde(alias = "name")]
    pub material: String,
    pub thickness_mm: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lambda_w_mk: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density_kg_m3: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_tonne: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_service_temp_c: Option<f64>,
}

impl LayerInput {
    /// 仅名称与厚度，其余由目录补全
    pub fn from_catalog(material: &str, thickness_mm: f64) -> Self {
        Self {
            material: material.to_string(),
            thickness_mm,
            lambda_w_mk: None,
            density_kg_m3: None,
            price_per_tonne: None,
            max_service_temp_c: None,
        }
    }

    /// 完整参数
    pub fn explicit(
        material: &str,
        thickness_mm: f64,
        lambda_w_mk: f64,
        density_kg_m3: f64,
        price_per_tonne: f64,
    ) -> Self {
        Self {
            lambda_w_mk: Some(lambda_w_mk),
            density_kg_m3: Some(density_kg_m3),
            price_per_tonne: Some(price_per_tonne),
            ..Self::from_catalog(material, thickness_mm)
        }
    }
}

// ==========================================
// 输出
// ==========================================

/// 材料清单行
#[derive(Debug, Clone, Serialize)]
pub struct BomLineOutput {
    pub name: String,
    pub thickness_mm: f64,
    pub interface_temp_c: f64, // 该层冷面(与下一层界面)温度
    pub mass_kg: f64,
    pub cost: f64,
    pub volume_m3: f64,
    pub effective_conductivity_w_mk: f64,
    pub areal_resistance_m2k_w: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_radius_mm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outer_radius_mm: Option<f64>,
}

/// 判定原因 (已本地化)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SafetyReasonOutput {
    pub code: SafetyReasonCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer_index: Option<usize>,
    pub message: String,
}

impl SafetyReasonOutput {
    pub fn localized(reason: &SafetyReason, locale: &str) -> Self {
        Self {
            code: reason.code,
            layer_index: reason.layer_index,
            message: t_with_args(locale, reason.code.message_key(), reason.message_args()),
        }
    }
}

/// 模拟输出
#[derive(Debug, Clone, Serialize)]
pub struct SimulationOutput {
    pub heat_flux_w_m2: f64,
    pub shell_temp_c: f64,
    pub liquidus_temp_c: f64,
    #[serde(serialize_with = "serialize_freeze_depth")]
    pub freeze_depth_mm: Option<f64>,
    pub safety_status: SafetyStatus,
    pub safety_reasons: Vec<SafetyReasonOutput>,
    pub temperature_profile: Vec<ProfilePoint>,
    pub bom: Vec<BomLineOutput>,
    pub total_mass_kg: f64,
    pub total_cost: f64,

    // ===== 附加热工信息 =====
    pub heat_loss_w: f64,
    pub total_resistance_k_w: f64,
    pub total_thickness_mm: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_shell_diameter_mm: Option<f64>,
    pub iterations: u32,
    pub converged: bool,
}

fn serialize_freeze_depth<S: Serializer>(depth: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match depth {
        Some(value) => serializer.serialize_f64(*value),
        None => serializer.serialize_str("none"),
    }
}

impl SimulationOutput {
    /// 由模拟结果生成输出，判定原因按 `locale` 生成文本
    pub fn localized(result: &SimulationResult, locale: &str) -> Self {
        let bom = result
            .layer_results
            .iter()
            .map(|lr| BomLineOutput {
                name: lr.layer.name.clone(),
                thickness_mm: lr.layer.thickness_mm,
                interface_temp_c: lr.outer_face_temp_c,
                mass_kg: lr.mass_kg,
                cost: lr.cost,
                volume_m3: lr.volume_m3,
                effective_conductivity_w_mk: lr.effective_conductivity_w_mk,
                areal_resistance_m2k_w: lr.areal_resistance_m2k_w,
                inner_radius_mm: lr.inner_radius_mm,
                outer_radius_mm: lr.outer_radius_mm,
            })
            .collect();

        Self {
            heat_flux_w_m2: result.heat_flux_w_m2,
            shell_temp_c: result.shell_temp_c,
            liquidus_temp_c: result.liquidus_temp_c,
            freeze_depth_mm: result.freeze_depth_mm,
            safety_status: result.safety_status,
            safety_reasons: result
                .safety_reasons
                .iter()
                .map(|reason| SafetyReasonOutput::localized(reason, locale))
                .collect(),
            temperature_profile: result.temperature_profile.clone(),
            bom,
            total_mass_kg: result.total_mass_kg,
            total_cost: result.total_cost,
            heat_loss_w: result.heat_loss_w,
            total_resistance_k_w: result.total_resistance_k_w,
            total_thickness_mm: result.total_thickness_mm,
            required_shell_diameter_mm: result.required_shell_diameter_mm,
            iterations: result.iterations,
            converged: result.converged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_parsing_with_optional_fields() {
        let json = r#"{
            "metal": "Steel",
            "target_temp_c": 1600,
            "ambient_temp_c": 25,
            "geometry": { "type": "Cylinder", "length_m": 3.0, "inner_diameter_mm": 2400 },
            "layers": [
                { "material": "CALDE CAST F 60", "thickness_mm": 150 },
                { "name": "Izolacija", "thickness_mm": 50, "lambda_w_mk": 0.15, "density_kg_m3": 600, "price_per_tonne": 450 }
            ]
        }"#;
        let input: SimulationInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.convection_coeff_w_m2k, None);
        assert_eq!(input.geometry.kind, "Cylinder");
        assert_eq!(input.layers[0].lambda_w_mk, None);
        assert_eq!(input.layers[1].material, "Izolacija");
        assert_eq!(input.layers[1].density_kg_m3, Some(600.0));
    }

    #[test]
    fn test_freeze_depth_serialization() {
        #[derive(Serialize)]
        struct DepthField {
            #[serde(serialize_with = "serialize_freeze_depth")]
            depth: Option<f64>,
        }

        let none = serde_json::to_value(DepthField { depth: None }).unwrap();
        assert_eq!(none["depth"], "none");

        let some = serde_json::to_value(DepthField { depth: Some(20.0) }).unwrap();
        assert_eq!(some["depth"], 20.0);
    }

    #[test]
    fn test_reason_localized_per_call() {
        use crate::domain::result::ReasonDetails;

        let reason = SafetyReason::new(
            SafetyReasonCode::ShellOverTemperature,
            None,
            ReasonDetails {
                temp_c: Some(320.46),
                limit_c: Some(300.0),
                ..ReasonDetails::default()
            },
        );

        let en = SafetyReasonOutput::localized(&reason, "en");
        assert_eq!(en.message, "Shell temperature 320.5 °C exceeds the limit of 300.0 °C");
        let zh = SafetyReasonOutput::localized(&reason, "zh-CN");
        assert!(zh.message.contains("壳体温度"));
        assert!(zh.message.contains("320.5"));
        assert_eq!(en.code, zh.code);

        let json = serde_json::to_value(&en).unwrap();
        assert_eq!(json["code"], "SHELL_OVER_TEMPERATURE");
        assert!(json.get("layer_index").is_none());
    }
}
