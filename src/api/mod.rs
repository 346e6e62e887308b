// ==========================================
// 耐材内衬设计计算系统 - API 层
// ==========================================
// 职责: JSON 接口，目录解析层参数与金属液相线后调用引擎
// ==========================================

pub mod dto;
pub mod error;
pub mod simulation_api;

// 重导出核心类型
pub use dto::{BomLineOutput, GeometryInput, LayerInput, SafetyReasonOutput, SimulationInput, SimulationOutput};
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use simulation_api::SimulationApi;
