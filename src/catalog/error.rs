// ==========================================
// 耐材内衬设计计算系统 - 目录模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 目录模块错误类型
#[derive(Error, Debug)]
pub enum CatalogError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 数据映射错误 =====
    #[error("缺少必需列: {column}（可用列: {available}）")]
    MissingColumn { column: String, available: String },

    #[error("类型转换失败 (行 {row}, 字段 {field}): {message}")]
    TypeConversionError {
        row: usize,
        field: String,
        message: String,
    },

    #[error("数值范围错误 (行 {row}, 字段 {field}): 值 {value}")]
    ValueRangeError { row: usize, field: String, value: f64 },

    // ===== 缓存错误 =====
    #[error("目录缓存锁获取失败: {0}")]
    CacheLockError(String),
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for CatalogError {
    fn from(err: csv::Error) -> Self {
        CatalogError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for CatalogError {
    fn from(err: calamine::Error) -> Self {
        CatalogError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type CatalogResult<T> = Result<T, CatalogError>;
