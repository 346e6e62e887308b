// ==========================================
// 耐材内衬设计计算系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、值对象
// 红线: 不含文件/数据库访问逻辑,不含引擎逻辑
// ==========================================

pub mod catalog;
pub mod lining;
pub mod result;
pub mod types;

// 重导出核心类型
pub use catalog::{MaterialCatalogEntry, MetalCatalogEntry};
pub use lining::{Geometry, Layer, SimulationRequest, DEFAULT_CONVECTION_COEFF_W_M2K};
pub use result::{FreezeFront, LayerResult, ProfilePoint, ReasonDetails, SafetyReason, SimulationResult};
pub use types::{FilmModel, GeometryKind, SafetyReasonCode, SafetyStatus, UnknownMetalPolicy};
