// ==========================================
// 耐材内衬设计计算系统 - 命令行入口
// ==========================================
// 用法:
//   molty-lining <request.json> [--materials <file>]... [--metals <file>]...
//                [--config-db <path>] [--locale <zh-CN|en>] [--json-log]
// 输出: stdout 为结果 JSON；失败时输出 {code, message, details} 并以 1 退出
// ==========================================

use anyhow::{anyhow, bail, Context};
use molty_lining::catalog::{CatalogCache, FileCatalogSource};
use molty_lining::config::{ConfigManager, EngineConfigReader};
use molty_lining::db::get_default_db_path;
use molty_lining::i18n::{resolve_locale, t, t_with_args};
use molty_lining::logging::{self, LogFormat};
use molty_lining::{SimulationApi, APP_NAME, VERSION};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Default)]
struct CliArgs {
    request_path: Option<PathBuf>,
    material_paths: Vec<PathBuf>,
    metal_paths: Vec<PathBuf>,
    config_db: Option<String>,
    locale: Option<String>,
    json_log: bool,
}

fn parse_args() -> anyhow::Result<CliArgs> {
    let mut parsed = CliArgs::default();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        let mut value_of = |flag: &str| {
            args.next()
                .ok_or_else(|| anyhow!("参数 {} 缺少取值", flag))
        };
        match arg.as_str() {
            "--materials" => parsed.material_paths.push(PathBuf::from(value_of("--materials")?)),
            "--metals" => parsed.metal_paths.push(PathBuf::from(value_of("--metals")?)),
            "--config-db" => parsed.config_db = Some(value_of("--config-db")?),
            "--locale" => parsed.locale = Some(value_of("--locale")?),
            "--json-log" => parsed.json_log = true,
            flag if flag.starts_with("--") => bail!("未知参数: {}", flag),
            path => {
                if parsed.request_path.is_some() {
                    bail!("只能指定一个请求文件");
                }
                parsed.request_path = Some(PathBuf::from(path));
            }
        }
    }

    Ok(parsed)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = parse_args()?;

    logging::init(if args.json_log { LogFormat::Json } else { LogFormat::Text });
    let locale = resolve_locale(args.locale.as_deref().unwrap_or_default());

    let request_path = match &args.request_path {
        Some(path) => path.clone(),
        None => {
            eprintln!("{}", t(locale, "cli.usage"));
            std::process::exit(2);
        }
    };

    info!("{} v{}", APP_NAME, VERSION);

    // ===== 配置 =====
    let db_path = args.config_db.clone().unwrap_or_else(get_default_db_path);
    let config_manager = ConfigManager::new(&db_path).map_err(|e| anyhow!(e))?;
    let config = config_manager
        .load_engine_config()
        .await
        .map_err(|e| anyhow!(e))
        .with_context(|| format!("加载引擎配置失败: {}", db_path))?;
    info!(db_path = %db_path, "引擎配置已加载");

    // ===== 目录 =====
    let cache = CatalogCache::new(FileCatalogSource::new(args.material_paths, args.metal_paths));
    let snapshot = cache.snapshot()?;
    let materials = snapshot.material_count().to_string();
    let metals = snapshot.metal_count().to_string();
    let loaded = t_with_args(
        locale,
        "cli.catalog_loaded",
        [("materials", materials.as_str()), ("metals", metals.as_str())],
    );
    info!("{}", loaded);

    // ===== 模拟 =====
    let input_json = std::fs::read_to_string(&request_path)
        .with_context(|| format!("读取请求文件失败: {}", request_path.display()))?;
    let api = SimulationApi::new(config)?.with_locale(locale);

    match api.simulate_json(&input_json, &snapshot) {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(err) => {
            let response = serde_json::to_string_pretty(&err.to_response())?;
            println!("{}", response);
            std::process::exit(1);
        }
    }
}
