// ==========================================
// 耐材内衬设计计算系统 - 目录层
// ==========================================
// 职责: 材料/金属目录加载、不可变快照、调用方持有的缓存
// 流程: 文件解析 -> 表头别名映射 -> 密度分级补全 -> 快照
// ==========================================

pub mod cache;
pub mod error;
pub mod file_parser;
pub mod loader;
pub mod snapshot;

pub use cache::{CatalogCache, CatalogSource, FileCatalogSource, StaticCatalogSource};
pub use error::{CatalogError, CatalogResult};
pub use file_parser::{CsvParser, ExcelParser, FileParser, UniversalFileParser};
pub use loader::{CatalogLoader, MIN_SCANNED_MATERIALS};
pub use snapshot::{normalize_name, CatalogSnapshot};
