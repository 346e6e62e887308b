// ==========================================
// 耐材内衬设计计算系统 - 模拟 API
// ==========================================
// 职责: JSON 输入 -> 目录解析 -> 引擎请求 -> 模拟 -> JSON 输出
// 红线: 目录快照由调用方传入，本层只读
// 红线: 运行标识只进入日志 span，不进入结果
// 红线: 输出语言由本实例的 locale 决定，不读取进程级语言设置
// ==========================================

use crate::api::dto::{GeometryInput, LayerInput, SimulationInput, SimulationOutput};
use crate::api::error::{ApiError, ApiResult};
use crate::catalog::snapshot::CatalogSnapshot;
use crate::config::EngineConfig;
use crate::domain::lining::{Geometry, Layer, SimulationRequest};
use crate::domain::result::SimulationResult;
use crate::domain::types::{GeometryKind, UnknownMetalPolicy};
use crate::engine::error::EngineError;
use crate::engine::simulator::LiningSimulator;
use crate::i18n::{resolve_locale, DEFAULT_LOCALE};
use tracing::{debug, info_span, warn};
use uuid::Uuid;

// ==========================================
// SimulationApi - 模拟 API
// ==========================================
#[derive(Debug, Clone)]
pub struct SimulationApi {
    simulator: LiningSimulator,
    locale: &'static str,
}

impl Default for SimulationApi {
    fn default() -> Self {
        Self {
            simulator: LiningSimulator::default(),
            locale: DEFAULT_LOCALE,
        }
    }
}

impl SimulationApi {
    /// 创建 API 实例 (默认语言)
    ///
    /// # 返回
    /// - `Err(ApiError::ConfigError)`: 配置未通过校验
    pub fn new(config: EngineConfig) -> ApiResult<Self> {
        let simulator = LiningSimulator::new(config).map_err(|err| match err {
            EngineError::InvalidConfig(message) => ApiError::ConfigError(message),
            other => ApiError::Engine(other),
        })?;
        Ok(Self {
            simulator,
            locale: DEFAULT_LOCALE,
        })
    }

    /// 指定判定原因的输出语言 ("zh-CN" / "en"，无法识别时取默认语言)
    pub fn with_locale(mut self, locale: &str) -> Self {
        self.locale = resolve_locale(locale);
        self
    }

    pub fn locale(&self) -> &str {
        self.locale
    }

    pub fn config(&self) -> &EngineConfig {
        self.simulator.config()
    }

    /// 执行模拟并返回 JSON 输出结构
    pub fn simulate(&self, input: &SimulationInput, catalog: &CatalogSnapshot) -> ApiResult<SimulationOutput> {
        let result = self.simulate_full(input, catalog)?;
        Ok(SimulationOutput::localized(&result, self.locale))
    }

    /// 执行模拟并返回完整结果记录
    pub fn simulate_full(&self, input: &SimulationInput, catalog: &CatalogSnapshot) -> ApiResult<SimulationResult> {
        let run_id = Uuid::new_v4();
        let span = info_span!("simulation", run_id = %run_id, metal = %input.metal);
        let _guard = span.enter();

        let (request, liquidus) = self.resolve_request(input, catalog)?;
        let result = self.simulator.simulate(&request, liquidus)?;
        Ok(result)
    }

    /// JSON 字符串入口
    pub fn simulate_json(&self, input_json: &str, catalog: &CatalogSnapshot) -> ApiResult<String> {
        let input: SimulationInput = serde_json::from_str(input_json)?;
        let output = self.simulate(&input, catalog)?;
        serde_json::to_string_pretty(&output).map_err(|e| ApiError::InternalError(e.to_string()))
    }

    /// 将输入解析为引擎请求 + 液相线
    ///
    /// # 规则
    /// - 层参数缺省时由材料目录补全，显式给出的字段优先
    /// - 金属不在目录中: 按 unknown_metal_policy 拒绝或记液相线未知
    pub fn resolve_request(
        &self,
        input: &SimulationInput,
        catalog: &CatalogSnapshot,
    ) -> ApiResult<(SimulationRequest, Option<f64>)> {
        let geometry = resolve_geometry(&input.geometry)?;
        let layers = input
            .layers
            .iter()
            .enumerate()
            .map(|(index, layer)| resolve_layer(index, layer, catalog))
            .collect::<ApiResult<Vec<Layer>>>()?;

        let convection = input
            .convection_coeff_w_m2k
            .unwrap_or(self.config().default_convection_coeff_w_m2k);

        let request = SimulationRequest::new(&input.metal, input.target_temp_c, input.ambient_temp_c, geometry)
            .with_layers(layers)
            .with_convection(convection);

        let liquidus = match catalog.liquidus(&input.metal) {
            Some(t) => Some(t),
            None => match self.config().unknown_metal_policy {
                UnknownMetalPolicy::Reject => return Err(ApiError::UnknownMetal(input.metal.clone())),
                UnknownMetalPolicy::ZeroLiquidus => {
                    warn!(metal = %input.metal, "金属不在目录中，液相线记为 0，不评估冻结");
                    None
                }
            },
        };

        Ok((request, liquidus))
    }
}

/// 几何标签 -> 几何变体
fn resolve_geometry(input: &GeometryInput) -> ApiResult<Geometry> {
    let kind = GeometryKind::parse(&input.kind)
        .ok_or_else(|| EngineError::UnknownGeometryType(input.kind.clone()))?;

    let require = |field: &str, value: Option<f64>| -> Result<f64, EngineError> {
        value.ok_or_else(|| EngineError::InvalidGeometry {
            field: format!("geometry.{}", field),
            message: "缺少必需字段".to_string(),
        })
    };

    let geometry = match kind {
        GeometryKind::Flat => Geometry::Flat {
            area_m2: require("area_m2", input.area_m2)?,
        },
        GeometryKind::Cylinder => Geometry::Cylindrical {
            length_m: require("length_m", input.length_m)?,
            inner_diameter_mm: require("inner_diameter_mm", input.inner_diameter_mm)?,
        },
    };
    Ok(geometry)
}

/// 层输入 -> 内衬层 (目录补全)
fn resolve_layer(index: usize, input: &LayerInput, catalog: &CatalogSnapshot) -> ApiResult<Layer> {
    let entry = catalog.material(&input.material);

    let pick = |field: &str, explicit: Option<f64>, from_catalog: Option<f64>| -> ApiResult<f64> {
        explicit.or(from_catalog).ok_or_else(|| ApiError::UnknownMaterial {
            layer_index: index,
            name: input.material.clone(),
            missing: field.to_string(),
        })
    };

    let conductivity = pick("lambda_w_mk", input.lambda_w_mk, entry.map(|e| e.conductivity_w_mk))?;
    let density = pick("density_kg_m3", input.density_kg_m3, entry.map(|e| e.density_kg_m3))?;
    let price = pick("price_per_tonne", input.price_per_tonne, entry.map(|e| e.price_per_tonne))?;
    if entry.is_some() {
        debug!(layer = index, material = %input.material, "层参数由材料目录补全");
    }

    let mut layer = Layer::new(&input.material, input.thickness_mm, conductivity, density, price);
    layer.max_service_temp_c = input
        .max_service_temp_c
        .or_else(|| entry.and_then(|e| e.max_service_temp_c));
    Ok(layer)
}
