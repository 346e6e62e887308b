// ==========================================
// 耐材内衬设计计算系统 - 目录缓存
// ==========================================
// 职责: 由调用方持有的读穿透缓存 (首次使用时加载，显式刷新)
// 红线: 引擎不访问缓存；调用方取出 Arc<CatalogSnapshot> 后传入模拟
// 红线: 刷新只替换指针，已取出的快照不受影响
// ==========================================

use crate::catalog::error::{CatalogError, CatalogResult};
use crate::catalog::loader::CatalogLoader;
use crate::catalog::snapshot::CatalogSnapshot;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

// ==========================================
// CatalogSource Trait - 快照来源
// ==========================================
pub trait CatalogSource: Send + Sync {
    fn load(&self) -> CatalogResult<CatalogSnapshot>;
}

/// 固定快照来源 (内置目录 / 测试)
pub struct StaticCatalogSource {
    snapshot: CatalogSnapshot,
}

impl StaticCatalogSource {
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn builtin() -> Self {
        Self::new(CatalogSnapshot::builtin())
    }
}

impl CatalogSource for StaticCatalogSource {
    fn load(&self) -> CatalogResult<CatalogSnapshot> {
        Ok(self.snapshot.clone())
    }
}

/// 文件来源 (CSV/Excel)
pub struct FileCatalogSource {
    material_paths: Vec<PathBuf>,
    metal_paths: Vec<PathBuf>,
    loader: CatalogLoader,
}

impl FileCatalogSource {
    pub fn new(material_paths: Vec<PathBuf>, metal_paths: Vec<PathBuf>) -> Self {
        Self {
            material_paths,
            metal_paths,
            loader: CatalogLoader::new(),
        }
    }
}

impl CatalogSource for FileCatalogSource {
    fn load(&self) -> CatalogResult<CatalogSnapshot> {
        self.loader.load_snapshot(&self.material_paths, &self.metal_paths)
    }
}

// ==========================================
// CatalogCache - 线程安全读穿透缓存
// ==========================================
pub struct CatalogCache<S: CatalogSource> {
    source: S,
    slot: RwLock<Option<Arc<CatalogSnapshot>>>,
}

impl<S: CatalogSource> CatalogCache<S> {
    /// 创建空缓存 (不立即加载)
    pub fn new(source: S) -> Self {
        Self {
            source,
            slot: RwLock::new(None),
        }
    }

    /// 获取当前快照；未加载时从来源加载
    pub fn snapshot(&self) -> CatalogResult<Arc<CatalogSnapshot>> {
        {
            let guard = self
                .slot
                .read()
                .map_err(|e| CatalogError::CacheLockError(e.to_string()))?;
            if let Some(snapshot) = guard.as_ref() {
                return Ok(Arc::clone(snapshot));
            }
        }

        let mut guard = self
            .slot
            .write()
            .map_err(|e| CatalogError::CacheLockError(e.to_string()))?;
        // 等待写锁期间可能已被其他线程加载
        if let Some(snapshot) = guard.as_ref() {
            return Ok(Arc::clone(snapshot));
        }

        let snapshot = Arc::new(self.source.load()?);
        debug!(materials = snapshot.material_count(), "目录缓存首次加载");
        *guard = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// 从来源重新加载并替换快照
    ///
    /// 加载失败时保留旧快照
    pub fn refresh(&self) -> CatalogResult<Arc<CatalogSnapshot>> {
        let snapshot = Arc::new(self.source.load()?);
        let mut guard = self
            .slot
            .write()
            .map_err(|e| CatalogError::CacheLockError(e.to_string()))?;
        *guard = Some(Arc::clone(&snapshot));
        info!(
            materials = snapshot.material_count(),
            metals = snapshot.metal_count(),
            loaded_at = %snapshot.loaded_at(),
            "目录缓存已刷新"
        );
        Ok(snapshot)
    }

    pub fn is_loaded(&self) -> bool {
        self.slot.read().map(|g| g.is_some()).unwrap_or(false)
    }
}
