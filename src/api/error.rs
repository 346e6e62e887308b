// ==========================================
// 耐材内衬设计计算系统 - API层错误类型
// ==========================================
// 职责: 汇总引擎/目录错误，补充输入解析与目录解析错误
// 红线: 每个错误都有稳定的错误码，调用方无需解析错误文本
// ==========================================

use crate::catalog::error::CatalogError;
use crate::engine::error::EngineError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("未知材料: 第 {layer_index} 层 '{name}' 不在材料目录中，且未提供完整参数 (缺少 {missing})")]
    UnknownMaterial {
        layer_index: usize,
        name: String,
        missing: String,
    },

    #[error("未知金属: '{0}' 不在金属目录中")]
    UnknownMetal(String),

    // ==========================================
    // 下层错误
    // ==========================================
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("配置错误: {0}")]
    ConfigError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidInput(err.to_string())
    }
}

impl ApiError {
    /// 稳定错误码 (引擎错误沿用引擎错误种类)
    pub fn code(&self) -> String {
        match self {
            ApiError::InvalidInput(_) => "INVALID_INPUT".to_string(),
            ApiError::UnknownMaterial { .. } => "UNKNOWN_MATERIAL".to_string(),
            ApiError::UnknownMetal(_) => "UNKNOWN_METAL".to_string(),
            ApiError::Engine(err) => err.kind().to_string(),
            ApiError::Catalog(_) => "CATALOG_ERROR".to_string(),
            ApiError::ConfigError(_) => "CONFIG_ERROR".to_string(),
            ApiError::InternalError(_) => "INTERNAL_ERROR".to_string(),
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        let details = match self {
            ApiError::UnknownMaterial { layer_index, name, missing } => Some(serde_json::json!({
                "layer_index": layer_index,
                "name": name,
                "missing": missing,
            })),
            ApiError::Engine(EngineError::InvalidConductivity { layer_index, layer_name, value }) => {
                Some(serde_json::json!({
                    "layer_index": layer_index,
                    "layer_name": layer_name,
                    "value": value,
                }))
            }
            ApiError::Engine(EngineError::InvalidLayer { layer_index, layer_name, field, .. }) => {
                Some(serde_json::json!({
                    "layer_index": layer_index,
                    "layer_name": layer_name,
                    "field": field,
                }))
            }
            ApiError::Engine(EngineError::InvalidGeometry { field, .. }) => {
                Some(serde_json::json!({ "field": field }))
            }
            _ => None,
        };

        ErrorResponse {
            code: self.code(),
            message: self.to_string(),
            details,
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// 错误响应 DTO
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_code_passthrough() {
        let err: ApiError = EngineError::EmptyLayerSequence.into();
        assert_eq!(err.code(), "EMPTY_LAYER_SEQUENCE");

        let err: ApiError = EngineError::UnknownGeometryType("sphere".to_string()).into();
        assert_eq!(err.code(), "UNKNOWN_GEOMETRY_TYPE");
        assert!(err.to_string().contains("sphere"));
    }

    #[test]
    fn test_error_response_details() {
        let err = ApiError::UnknownMaterial {
            layer_index: 1,
            name: "Mystery".to_string(),
            missing: "lambda_w_mk".to_string(),
        };
        let response = err.to_response();
        assert_eq!(response.code, "UNKNOWN_MATERIAL");
        assert_eq!(response.details.unwrap()["layer_index"], 1);

        let err: ApiError = EngineError::InvalidConductivity {
            layer_index: 0,
            layer_name: "Broken".to_string(),
            value: 0.0,
        }
        .into();
        let response = err.to_response();
        assert_eq!(response.code, "INVALID_CONDUCTIVITY");
        assert_eq!(response.details.unwrap()["layer_name"], "Broken");
    }

    #[test]
    fn test_json_error_is_invalid_input() {
        let err: ApiError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert_eq!(err.code(), "INVALID_INPUT");
    }
}
