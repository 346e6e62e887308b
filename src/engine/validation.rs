// ==========================================
// 耐材内衬设计计算系统 - 请求校验
// ==========================================
// 职责: 在任何计算之前一次性校验请求
// 红线: 校验不通过则不进入求解，不产生部分结果
// ==========================================

use crate::domain::lining::{Geometry, Layer, SimulationRequest};
use crate::engine::error::{EngineError, EngineResult};
use tracing::warn;

/// 校验模拟请求
///
/// # 校验顺序
/// 1. 叠层非空
/// 2. 工况温度为有限数，对流系数为有限正数
/// 3. 几何尺寸为有限正数
/// 4. 逐层: 厚度 > 0, λ > 0, 密度 >= 0, 单价 >= 0, 最高使用温度(若有)为有限数
pub fn validate_request(request: &SimulationRequest) -> EngineResult<()> {
    if request.layers.is_empty() {
        warn!(metal = %request.metal, "请求未包含任何内衬层");
        return Err(EngineError::EmptyLayerSequence);
    }

    check_finite("target_temp_c", request.target_temp_c)?;
    check_finite("ambient_temp_c", request.ambient_temp_c)?;
    if !request.convection_coeff_w_m2k.is_finite() || request.convection_coeff_w_m2k <= 0.0 {
        return Err(EngineError::InvalidProcessParameter {
            field: "convection_coeff_w_m2k".to_string(),
            value: request.convection_coeff_w_m2k,
        });
    }

    validate_geometry(&request.geometry)?;

    for (index, layer) in request.layers.iter().enumerate() {
        validate_layer(index, layer)?;
    }

    Ok(())
}

fn check_finite(field: &str, value: f64) -> EngineResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EngineError::InvalidProcessParameter {
            field: field.to_string(),
            value,
        })
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// 校验几何尺寸
pub fn validate_geometry(geometry: &Geometry) -> EngineResult<()> {
    match *geometry {
        Geometry::Flat { area_m2 } => {
            if !is_positive(area_m2) {
                return Err(EngineError::invalid_geometry(
                    "geometry.area_m2",
                    format!("面积必须 > 0, 实际 {}", area_m2),
                ));
            }
        }
        Geometry::Cylindrical { length_m, inner_diameter_mm } => {
            if !is_positive(length_m) {
                return Err(EngineError::invalid_geometry(
                    "geometry.length_m",
                    format!("长度必须 > 0, 实际 {}", length_m),
                ));
            }
            if !is_positive(inner_diameter_mm) {
                return Err(EngineError::invalid_geometry(
                    "geometry.inner_diameter_mm",
                    format!("内半径必须 > 0, 内径实际 {}", inner_diameter_mm),
                ));
            }
        }
    }
    Ok(())
}

/// 校验单层参数
fn validate_layer(index: usize, layer: &Layer) -> EngineResult<()> {
    if !is_positive(layer.thickness_mm) {
        return Err(EngineError::invalid_geometry(
            format!("layers[{}].thickness_mm", index),
            format!("'{}' 厚度必须 > 0, 实际 {}", layer.name, layer.thickness_mm),
        ));
    }

    if !is_positive(layer.conductivity_w_mk) {
        warn!(
            layer_index = index,
            layer_name = %layer.name,
            conductivity = layer.conductivity_w_mk,
            "导热系数非法"
        );
        return Err(EngineError::InvalidConductivity {
            layer_index: index,
            layer_name: layer.name.clone(),
            value: layer.conductivity_w_mk,
        });
    }

    let non_negative = [
        ("density_kg_m3", layer.density_kg_m3),
        ("unit_price_per_tonne", layer.unit_price_per_tonne),
    ];
    for (field, value) in non_negative {
        if !value.is_finite() || value < 0.0 {
            return Err(EngineError::InvalidLayer {
                layer_index: index,
                layer_name: layer.name.clone(),
                field: field.to_string(),
                message: format!("必须为有限非负数, 实际 {}", value),
            });
        }
    }

    if let Some(max_temp) = layer.max_service_temp_c {
        if !max_temp.is_finite() {
            return Err(EngineError::InvalidLayer {
                layer_index: index,
                layer_name: layer.name.clone(),
                field: "max_service_temp_c".to_string(),
                message: format!("必须为有限数, 实际 {}", max_temp),
            });
        }
    }

    Ok(())
}
