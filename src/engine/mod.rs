// ==========================================
// 耐材内衬设计计算系统 - 引擎层
// ==========================================
// 职责: 稳态热工-结构计算 (热阻网络、几何、冻结前沿、安全、材料清单)
// 红线: 纯同步计算，不访问文件/数据库/缓存
// 红线: 所有安全判定必须输出原因
// ==========================================

pub mod assembler;
pub mod bom;
pub mod error;
pub mod freeze_front;
pub mod geometry;
pub mod profile;
pub mod safety;
pub mod simulator;
pub mod solver;
pub mod validation;

// 重导出核心引擎
pub use assembler::{AssemblyParts, ResultAssembler};
pub use bom::{BillOfMaterials, BomAggregator, BomLine};
pub use error::{EngineError, EngineErrorKind, EngineResult};
pub use freeze_front::FreezeFrontLocator;
pub use geometry::{geometry_model, CylindricalShell, FilmSettings, FlatWall, GeometryModel, LayerSpan};
pub use profile::TemperatureProfileBuilder;
pub use safety::{SafetyAssessment, SafetyClassifier};
pub use simulator::LiningSimulator;
pub use solver::{NetworkSolution, ResistanceNetworkSolver, SolverSettings};
pub use validation::{validate_geometry, validate_request};
