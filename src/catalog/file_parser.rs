// ==========================================
// 耐材内衬设计计算系统 - 目录文件解析器
// ==========================================
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 输出: 每行一个 {表头 -> 单元格文本} 映射，空白行跳过
// ==========================================

use crate::catalog::error::{CatalogError, CatalogResult};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// 原始行: (文件行号, 表头 -> 值)
pub type RawRecord = (usize, HashMap<String, String>);

pub trait FileParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> CatalogResult<Vec<RawRecord>>;
}

fn ensure_exists(path: &Path) -> CatalogResult<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(CatalogError::FileNotFound(path.display().to_string()))
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// ==========================================
// CSV Parser
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> CatalogResult<Vec<RawRecord>> {
        ensure_exists(file_path)?;
        let ext = extension_of(file_path);
        if ext != "csv" {
            return Err(CatalogError::UnsupportedFormat(ext));
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;
            let row_map: HashMap<String, String> = headers
                .iter()
                .cloned()
                .zip(record.iter().map(|v| v.trim().to_string()))
                .collect();

            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            // 表头占第 1 行
            records.push((row_idx + 2, row_map));
        }

        Ok(records)
    }
}

// ==========================================
// Excel Parser (读取第一个工作表)
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> CatalogResult<Vec<RawRecord>> {
        ensure_exists(file_path)?;
        let ext = extension_of(file_path);
        if ext != "xlsx" && ext != "xls" {
            return Err(CatalogError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(file_path)?;
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| CatalogError::ExcelParseError("Excel 文件无工作表".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| CatalogError::ExcelParseError("Excel 文件无数据行".to_string()))?;
        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut records = Vec::new();
        for (row_idx, data_row) in rows.enumerate() {
            let row_map: HashMap<String, String> = headers
                .iter()
                .cloned()
                .zip(data_row.iter().map(|cell| cell.to_string().trim().to_string()))
                .collect();

            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            records.push((row_idx + 2, row_map));
        }

        Ok(records)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> CatalogResult<Vec<RawRecord>> {
        let path = file_path.as_ref();
        match extension_of(path).as_str() {
            "csv" => CsvParser.parse_to_raw_records(path),
            "xlsx" | "xls" => ExcelParser.parse_to_raw_records(path),
            other => Err(CatalogError::UnsupportedFormat(other.to_string())),
        }
    }
}
