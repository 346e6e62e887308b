// ==========================================
// 耐材内衬设计计算系统 - 目录加载器
// ==========================================
// 职责: CSV/Excel -> 材料/金属目录条目 -> 快照
// 规则:
// - 表头按别名匹配 (英文 / 塞尔维亚文 / 中文)，忽略大小写
// - 数值允许逗号小数 "2,45"
// - 密度 < 10 视为 g/cm³，换算为 kg/m³
// - λ 或单价缺失时按密度分级补全
// - 材料少于 MIN_SCANNED_MATERIALS 条时补充内置备用材料
// ==========================================

use crate::catalog::error::{CatalogError, CatalogResult};
use crate::catalog::file_parser::{RawRecord, UniversalFileParser};
use crate::catalog::snapshot::{backup_materials, builtin_metals, normalize_name, CatalogSnapshot};
use crate::domain::catalog::{density_class_defaults, MaterialCatalogEntry, MetalCatalogEntry};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// 扫描结果少于该数目时补充备用材料
pub const MIN_SCANNED_MATERIALS: usize = 5;

// ===== 表头别名 =====
const NAME_ALIASES: &[&str] = &["name", "material", "naziv", "materijal", "材料名称", "名称"];
const DENSITY_ALIASES: &[&str] = &["density", "density_kg_m3", "gustina", "zapreminska masa", "密度"];
const LAMBDA_ALIASES: &[&str] = &[
    "lambda",
    "lambda_w_mk",
    "lambda_val",
    "conductivity",
    "conductivity_w_mk",
    "toplotna provodljivost",
    "导热系数",
];
const PRICE_ALIASES: &[&str] = &["price", "price_per_tonne", "cena", "cijena", "单价"];
const MAX_TEMP_ALIASES: &[&str] = &[
    "max_temp",
    "max_service_temp_c",
    "tmax",
    "max temperatura",
    "klasifikaciona temperatura",
    "最高使用温度",
];
const METAL_NAME_ALIASES: &[&str] = &["metal", "name", "naziv", "metal_name", "金属"];
const LIQUIDUS_ALIASES: &[&str] = &[
    "liquidus",
    "liquidus_temp_c",
    "likvidus",
    "temperatura likvidusa",
    "液相线",
];

/// 按别名查找表头 (返回原始表头)
fn resolve_column(headers: &[&String], aliases: &[&str]) -> Option<String> {
    headers
        .iter()
        .find(|h| {
            let normalized = normalize_name(h);
            aliases.iter().any(|alias| normalized == *alias)
        })
        .map(|h| (*h).clone())
}

/// 全部行出现过的表头 (行长度可能不一致)
fn headers_of(records: &[RawRecord]) -> Vec<&String> {
    let mut headers: Vec<&String> = Vec::new();
    for (_, row) in records {
        for key in row.keys() {
            if !headers.contains(&key) {
                headers.push(key);
            }
        }
    }
    headers
}

fn available(headers: &[&String]) -> String {
    let mut names: Vec<&str> = headers.iter().map(|h| h.as_str()).collect();
    names.sort();
    names.join(", ")
}

fn required_column(headers: &[&String], aliases: &[&str], column: &str) -> CatalogResult<String> {
    resolve_column(headers, aliases).ok_or_else(|| CatalogError::MissingColumn {
        column: column.to_string(),
        available: available(headers),
    })
}

/// 解析数值单元格；空值返回 None
fn parse_number(row: usize, field: &str, raw: Option<&String>) -> CatalogResult<Option<f64>> {
    let text = match raw.map(|s| s.trim()) {
        Some(s) if !s.is_empty() => s.replace(',', "."),
        _ => return Ok(None),
    };
    let value: f64 = text.parse().map_err(|_| CatalogError::TypeConversionError {
        row,
        field: field.to_string(),
        message: format!("无法解析为数值: '{}'", text),
    })?;
    if !value.is_finite() {
        return Err(CatalogError::ValueRangeError {
            row,
            field: field.to_string(),
            value,
        });
    }
    Ok(Some(value))
}

fn non_negative(row: usize, field: &str, value: f64) -> CatalogResult<f64> {
    if value < 0.0 {
        Err(CatalogError::ValueRangeError {
            row,
            field: field.to_string(),
            value,
        })
    } else {
        Ok(value)
    }
}

// ==========================================
// CatalogLoader - 目录加载器
// ==========================================
#[derive(Default)]
pub struct CatalogLoader {
    parser: UniversalFileParser,
}

impl CatalogLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加载材料目录文件
    ///
    /// # 返回
    /// 按名称排序、同名后者覆盖的材料条目
    pub fn load_materials<P: AsRef<Path>>(&self, path: P) -> CatalogResult<Vec<MaterialCatalogEntry>> {
        let records = self.parser.parse(path.as_ref())?;
        let headers = headers_of(&records);
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let name_col = required_column(&headers, NAME_ALIASES, "name")?;
        let density_col = required_column(&headers, DENSITY_ALIASES, "density")?;
        let lambda_col = resolve_column(&headers, LAMBDA_ALIASES);
        let price_col = resolve_column(&headers, PRICE_ALIASES);
        let max_temp_col = resolve_column(&headers, MAX_TEMP_ALIASES);

        let mut by_name: HashMap<String, MaterialCatalogEntry> = HashMap::new();
        for (row, record) in &records {
            let row = *row;
            let name = record.get(&name_col).map(|s| s.trim()).unwrap_or("");
            if name.is_empty() {
                warn!(row = row, "材料目录行缺少名称，已跳过");
                continue;
            }

            let mut density = parse_number(row, "density", record.get(&density_col))?.ok_or_else(|| {
                CatalogError::TypeConversionError {
                    row,
                    field: "density".to_string(),
                    message: "密度为空".to_string(),
                }
            })?;
            density = non_negative(row, "density", density)?;
            if density > 0.0 && density < 10.0 {
                // g/cm³ -> kg/m³
                density *= 1000.0;
            }

            let (default_lambda, default_price) = density_class_defaults(density);
            let lambda = match &lambda_col {
                Some(col) => parse_number(row, "lambda", record.get(col))?,
                None => None,
            };
            let price = match &price_col {
                Some(col) => parse_number(row, "price", record.get(col))?,
                None => None,
            };
            let max_temp = match &max_temp_col {
                Some(col) => parse_number(row, "max_temp", record.get(col))?,
                None => None,
            };

            let conductivity = lambda.unwrap_or(default_lambda);
            if conductivity <= 0.0 {
                return Err(CatalogError::ValueRangeError {
                    row,
                    field: "lambda".to_string(),
                    value: conductivity,
                });
            }

            let mut entry = MaterialCatalogEntry::new(
                name,
                density,
                conductivity,
                non_negative(row, "price", price.unwrap_or(default_price))?,
            );
            entry.max_service_temp_c = max_temp;

            by_name.insert(normalize_name(name), entry);
        }

        let mut materials: Vec<MaterialCatalogEntry> = by_name.into_values().collect();
        materials.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(materials)
    }

    /// 加载金属目录文件
    pub fn load_metals<P: AsRef<Path>>(&self, path: P) -> CatalogResult<Vec<MetalCatalogEntry>> {
        let records = self.parser.parse(path.as_ref())?;
        let headers = headers_of(&records);
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let name_col = required_column(&headers, METAL_NAME_ALIASES, "metal")?;
        let liquidus_col = required_column(&headers, LIQUIDUS_ALIASES, "liquidus")?;

        let mut by_name: HashMap<String, MetalCatalogEntry> = HashMap::new();
        for (row, record) in &records {
            let row = *row;
            let name = record.get(&name_col).map(|s| s.trim()).unwrap_or("");
            if name.is_empty() {
                warn!(row = row, "金属目录行缺少名称，已跳过");
                continue;
            }
            let liquidus = parse_number(row, "liquidus", record.get(&liquidus_col))?.ok_or_else(|| {
                CatalogError::TypeConversionError {
                    row,
                    field: "liquidus".to_string(),
                    message: "液相线温度为空".to_string(),
                }
            })?;
            by_name.insert(normalize_name(name), MetalCatalogEntry::new(name, liquidus));
        }

        let mut metals: Vec<MetalCatalogEntry> = by_name.into_values().collect();
        metals.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(metals)
    }

    /// 从多个文件构建快照
    ///
    /// # 规则
    /// - 材料: 各文件依次合并，少于 MIN_SCANNED_MATERIALS 条时追加备用材料
    /// - 金属: 内置表在前，文件条目覆盖同名内置条目
    pub fn load_snapshot(
        &self,
        material_paths: &[PathBuf],
        metal_paths: &[PathBuf],
    ) -> CatalogResult<CatalogSnapshot> {
        let mut materials = Vec::new();
        for path in material_paths {
            materials.extend(self.load_materials(path)?);
        }
        if materials.len() < MIN_SCANNED_MATERIALS {
            materials.extend(backup_materials());
        }

        let mut metals = builtin_metals();
        for path in metal_paths {
            metals.extend(self.load_metals(path)?);
        }

        let snapshot = CatalogSnapshot::new(materials, metals);
        info!(
            materials = snapshot.material_count(),
            metals = snapshot.metal_count(),
            "目录快照加载完成"
        );
        Ok(snapshot)
    }
}
