// ==========================================
// 耐材内衬设计计算系统 - 目录快照
// ==========================================
// 职责: 材料/金属目录的不可变快照，名称查找忽略大小写与多余空白
// 红线: 快照构建后不可修改；每次模拟传入同一快照的引用
// ==========================================

use crate::domain::catalog::{MaterialCatalogEntry, MetalCatalogEntry};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// 目录内置备用材料 (扫描结果不足时补充)
pub fn backup_materials() -> Vec<MaterialCatalogEntry> {
    vec![
        MaterialCatalogEntry::new("CALDE CAST F 60", 2450.0, 1.45, 950.0),
        MaterialCatalogEntry::new("CALDE INSUL 1000", 800.0, 0.22, 450.0),
    ]
}

/// 常见熔融金属液相线 (°C)
pub fn builtin_metals() -> Vec<MetalCatalogEntry> {
    vec![
        MetalCatalogEntry::new("Steel", 1495.0),
        MetalCatalogEntry::new("Stainless steel", 1450.0),
        MetalCatalogEntry::new("Cast iron", 1150.0),
        MetalCatalogEntry::new("Copper", 1085.0),
        MetalCatalogEntry::new("Bronze", 950.0),
        MetalCatalogEntry::new("Brass", 930.0),
        MetalCatalogEntry::new("Aluminium", 660.0),
        MetalCatalogEntry::new("Zinc", 420.0),
    ]
}

/// 名称归一化: 去首尾空白、合并内部空白、小写
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

// ==========================================
// CatalogSnapshot - 目录快照
// ==========================================
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    materials: HashMap<String, MaterialCatalogEntry>,
    metals: HashMap<String, MetalCatalogEntry>,
    loaded_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    /// 构建快照；同名条目后者覆盖前者
    pub fn new(materials: Vec<MaterialCatalogEntry>, metals: Vec<MetalCatalogEntry>) -> Self {
        Self {
            materials: materials
                .into_iter()
                .map(|m| (normalize_name(&m.name), m))
                .collect(),
            metals: metals
                .into_iter()
                .map(|m| (normalize_name(&m.name), m))
                .collect(),
            loaded_at: Utc::now(),
        }
    }

    /// 内置快照: 备用材料 + 常见金属
    pub fn builtin() -> Self {
        Self::new(backup_materials(), builtin_metals())
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn material(&self, name: &str) -> Option<&MaterialCatalogEntry> {
        self.materials.get(&normalize_name(name))
    }

    pub fn metal(&self, name: &str) -> Option<&MetalCatalogEntry> {
        self.metals.get(&normalize_name(name))
    }

    /// 金属液相线温度
    pub fn liquidus(&self, metal: &str) -> Option<f64> {
        self.metal(metal).map(|m| m.liquidus_temp_c)
    }

    /// 全部材料 (按名称排序)
    pub fn materials(&self) -> Vec<&MaterialCatalogEntry> {
        let mut list: Vec<_> = self.materials.values().collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        list
    }

    /// 全部金属 (按名称排序)
    pub fn metals(&self) -> Vec<&MetalCatalogEntry> {
        let mut list: Vec<_> = self.metals.values().collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        list
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn metal_count(&self) -> usize {
        self.metals.len()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}
