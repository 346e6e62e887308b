// ==========================================
// 耐材内衬设计计算系统 - 核心库
// ==========================================
// 系统定位: 炉衬/钢包内衬稳态热工-结构计算
// 输出: 温度剖面、冻结前沿、安全等级、材料清单与成本
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 值对象与类型
pub mod domain;

// 引擎层 - 热工计算 (纯同步)
pub mod engine;

// 目录层 - 材料/金属目录
pub mod catalog;

// 配置层 - 引擎参数
pub mod config;

// 数据库基础设施（配置存储）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - JSON 接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{FilmModel, GeometryKind, SafetyReasonCode, SafetyStatus, UnknownMetalPolicy};

// 领域实体
pub use domain::{
    FreezeFront, Geometry, Layer, LayerResult, MaterialCatalogEntry, MetalCatalogEntry,
    ProfilePoint, ReasonDetails, SafetyReason, SimulationRequest, SimulationResult,
};

// 引擎
pub use engine::{EngineError, EngineErrorKind, EngineResult, LiningSimulator};

// 目录
pub use catalog::{CatalogCache, CatalogLoader, CatalogSnapshot};

// 配置
pub use config::{ConfigManager, EngineConfig, EngineConfigReader};

// API
pub use api::{ApiError, SimulationApi, SimulationInput, SimulationOutput};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "耐材内衬设计计算系统";
