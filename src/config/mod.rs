// ==========================================
// 耐材内衬设计计算系统 - 配置层
// ==========================================
// 职责: 引擎参数管理,支持 config_kv 覆写
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod engine_config;
pub mod engine_config_reader;

// 重导出核心配置类型
pub use config_manager::{config_keys, ConfigManager};
pub use engine_config::EngineConfig;
pub use engine_config_reader::EngineConfigReader;
