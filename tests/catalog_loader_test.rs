// ==========================================
// 目录加载集成测试
// ==========================================
// 测试目标: 多文件合并、表头别名、缓存刷新
// ==========================================

mod test_helpers;

use molty_lining::catalog::{CatalogCache, CatalogError, CatalogLoader, FileCatalogSource};
use std::sync::Arc;
use test_helpers::write_csv;

#[test]
fn test_multiple_files_merge_last_wins() {
    let first = write_csv(&[
        "name,density,lambda,price",
        "Magnit MK90,2950,3.5,1200",
        "Caldercast 155AL,2450,1.2,950",
        "Izolacija,600,0.15,450",
    ])
    .unwrap();
    let second = write_csv(&[
        "材料名称,密度,导热系数,单价,最高使用温度",
        "MAGNIT MK90,2950,3.2,1250,1800",
        "Kaolin brick,1100,,",
        "Alumina castable,2900,,",
    ])
    .unwrap();

    let snapshot = CatalogLoader::new()
        .load_snapshot(&[first.path().to_path_buf(), second.path().to_path_buf()], &[])
        .unwrap();

    // 5 个不同名称，不补充备用材料
    assert_eq!(snapshot.material_count(), 5);
    assert!(snapshot.material("CALDE CAST F 60").is_none());

    let magnesia = snapshot.material("magnit  mk90").unwrap();
    assert_eq!(magnesia.conductivity_w_mk, 3.2);
    assert_eq!(magnesia.price_per_tonne, 1250.0);
    assert_eq!(magnesia.max_service_temp_c, Some(1800.0));

    let kaolin = snapshot.material("Kaolin brick").unwrap();
    assert_eq!((kaolin.conductivity_w_mk, kaolin.price_per_tonne), (0.25, 450.0));
    let alumina = snapshot.material("Alumina castable").unwrap();
    assert_eq!((alumina.conductivity_w_mk, alumina.price_per_tonne), (2.2, 1200.0));

    let names: Vec<&str> = snapshot.materials().iter().map(|m| m.name.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[test]
fn test_sparse_catalog_gets_backup_materials() {
    let file = write_csv(&["Naziv,Gustina", "Šamotna opeka,\"1,9\""]).unwrap();
    let snapshot = CatalogLoader::new()
        .load_snapshot(&[file.path().to_path_buf()], &[])
        .unwrap();

    assert_eq!(snapshot.material_count(), 3);
    let fireclay = snapshot.material("šamotna opeka").unwrap();
    assert_eq!(fireclay.density_kg_m3, 1900.0);
    assert_eq!(fireclay.conductivity_w_mk, 1.5);
    assert!(snapshot.material("CALDE INSUL 1000").is_some());
}

#[test]
fn test_metal_file_missing_liquidus_column() {
    let metals = write_csv(&["metal,melting point", "Steel,1510"]).unwrap();
    let err = CatalogLoader::new()
        .load_snapshot(&[], &[metals.path().to_path_buf()])
        .unwrap_err();
    assert!(matches!(err, CatalogError::MissingColumn { column, .. } if column == "liquidus"));
}

#[test]
fn test_cache_refresh_picks_up_edited_file() {
    let metals = write_csv(&["metal,liquidus", "Steel,1510"]).unwrap();
    let cache = CatalogCache::new(FileCatalogSource::new(Vec::new(), vec![metals.path().to_path_buf()]));
    assert!(!cache.is_loaded());

    let before = cache.snapshot().unwrap();
    assert_eq!(before.liquidus("Steel"), Some(1510.0));

    std::fs::write(metals.path(), "metal,liquidus\nSteel,1480\n").unwrap();

    // 未刷新前仍返回同一快照
    assert!(Arc::ptr_eq(&before, &cache.snapshot().unwrap()));

    let after = cache.refresh().unwrap();
    assert_eq!(after.liquidus("Steel"), Some(1480.0));
    assert_eq!(before.liquidus("Steel"), Some(1510.0));
    assert!(Arc::ptr_eq(&after, &cache.snapshot().unwrap()));
}

#[test]
fn test_missing_catalog_file_is_reported() {
    let cache = CatalogCache::new(FileCatalogSource::new(
        vec!["/nonexistent/materials.csv".into()],
        Vec::new(),
    ));
    let err = cache.snapshot().unwrap_err();
    assert!(matches!(err, CatalogError::FileNotFound(_)));
    assert!(!cache.is_loaded());
}
