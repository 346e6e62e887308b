// ==========================================
// 耐材内衬设计计算系统 - 引擎错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 输入非法时不产生任何部分结果
// 红线: 错误信息必须指明层号/层名或字段
// ==========================================

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// 引擎错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    // ===== 叠层错误 =====
    #[error("未提供任何内衬层")]
    EmptyLayerSequence,

    #[error("导热系数必须 > 0: 第 {layer_index} 层 '{layer_name}', λ={value}")]
    InvalidConductivity {
        layer_index: usize,
        layer_name: String,
        value: f64,
    },

    #[error("内衬层参数非法: 第 {layer_index} 层 '{layer_name}', 字段 {field}: {message}")]
    InvalidLayer {
        layer_index: usize,
        layer_name: String,
        field: String,
        message: String,
    },

    // ===== 几何错误 =====
    #[error("几何参数非法 (字段 {field}): {message}")]
    InvalidGeometry { field: String, message: String },

    #[error("未知几何类型: '{0}'（仅支持 flat / cylinder）")]
    UnknownGeometryType(String),

    // ===== 热阻网络错误 =====
    #[error("总热阻必须 > 0, 实际 {total}")]
    InvalidResistance { total: f64 },

    // ===== 工况错误 =====
    #[error("工况参数非法 (字段 {field}): 值 {value}")]
    InvalidProcessParameter { field: String, value: f64 },

    // ===== 配置错误 =====
    #[error("引擎配置非法: {0}")]
    InvalidConfig(String),
}

/// 错误种类（供调用方分支，无需解析错误文本）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EngineErrorKind {
    EmptyLayerSequence,
    InvalidConductivity,
    InvalidLayer,
    InvalidGeometry,
    UnknownGeometryType,
    InvalidResistance,
    InvalidProcessParameter,
    InvalidConfig,
}

impl fmt::Display for EngineErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EngineErrorKind::EmptyLayerSequence => "EMPTY_LAYER_SEQUENCE",
            EngineErrorKind::InvalidConductivity => "INVALID_CONDUCTIVITY",
            EngineErrorKind::InvalidLayer => "INVALID_LAYER",
            EngineErrorKind::InvalidGeometry => "INVALID_GEOMETRY",
            EngineErrorKind::UnknownGeometryType => "UNKNOWN_GEOMETRY_TYPE",
            EngineErrorKind::InvalidResistance => "INVALID_RESISTANCE",
            EngineErrorKind::InvalidProcessParameter => "INVALID_PROCESS_PARAMETER",
            EngineErrorKind::InvalidConfig => "INVALID_CONFIG",
        };
        write!(f, "{}", s)
    }
}

impl EngineError {
    pub fn kind(&self) -> EngineErrorKind {
        match self {
            EngineError::EmptyLayerSequence => EngineErrorKind::EmptyLayerSequence,
            EngineError::InvalidConductivity { .. } => EngineErrorKind::InvalidConductivity,
            EngineError::InvalidLayer { .. } => EngineErrorKind::InvalidLayer,
            EngineError::InvalidGeometry { .. } => EngineErrorKind::InvalidGeometry,
            EngineError::UnknownGeometryType(_) => EngineErrorKind::UnknownGeometryType,
            EngineError::InvalidResistance { .. } => EngineErrorKind::InvalidResistance,
            EngineError::InvalidProcessParameter { .. } => EngineErrorKind::InvalidProcessParameter,
            EngineError::InvalidConfig(_) => EngineErrorKind::InvalidConfig,
        }
    }

    pub(crate) fn invalid_geometry(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidGeometry {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_mapping() {
        let err = EngineError::InvalidConductivity {
            layer_index: 2,
            layer_name: "Izolacija".to_string(),
            value: 0.0,
        };
        assert_eq!(err.kind(), EngineErrorKind::InvalidConductivity);
        let msg = err.to_string();
        assert!(msg.contains("第 2 层"));
        assert!(msg.contains("Izolacija"));

        let err = EngineError::invalid_geometry("geometry.area_m2", "必须 > 0");
        assert_eq!(err.kind(), EngineErrorKind::InvalidGeometry);
        assert!(err.to_string().contains("geometry.area_m2"));

        assert_eq!(EngineErrorKind::UnknownGeometryType.to_string(), "UNKNOWN_GEOMETRY_TYPE");

        let err = EngineError::InvalidConfig("配置项 max_iterations 必须 >= 1".to_string());
        assert_eq!(err.kind().to_string(), "INVALID_CONFIG");
        assert!(err.to_string().contains("max_iterations"));
    }
}
