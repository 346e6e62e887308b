// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 临时配置库、临时目录文件
// ==========================================

#![allow(dead_code)]

use rusqlite::{params, Connection};
use std::error::Error;
use std::io::Write;
use tempfile::{Builder, NamedTempFile};

/// 创建临时测试数据库
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().ok_or("非 UTF-8 路径")?.to_string();
    Ok((temp_file, db_path))
}

/// 打开测试数据库连接
pub fn open_test_connection(db_path: &str) -> Result<Connection, Box<dyn Error>> {
    Ok(Connection::open(db_path)?)
}

/// 直接写入一条 global 配置（绕过 ConfigManager 校验）
pub fn insert_raw_config(conn: &Connection, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
    conn.execute(
        "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
         ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2",
        params![key, value],
    )?;
    Ok(())
}

/// 写出临时 CSV 目录文件
pub fn write_csv(lines: &[&str]) -> Result<NamedTempFile, Box<dyn Error>> {
    let mut file = Builder::new().suffix(".csv").tempfile()?;
    for line in lines {
        writeln!(file, "{}", line)?;
    }
    file.flush()?;
    Ok(file)
}
