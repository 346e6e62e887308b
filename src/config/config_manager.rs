// ==========================================
// 耐材内衬设计计算系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::engine_config::EngineConfig;
use crate::config::engine_config_reader::EngineConfigReader;
use crate::db::{init_config_schema, open_sqlite_connection};
use crate::domain::types::{FilmModel, UnknownMetalPolicy};
use async_trait::async_trait;
use rusqlite::{params, Connection};
use serde_json::json;
use std::collections::HashMap;
use std::error::Error;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

type ConfigResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例（config_kv 表不存在时自动创建）
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        init_config_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：会对传入连接再次应用统一 PRAGMA 并确保 config_kv 存在（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ConfigResult<Self> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
            init_config_schema(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    fn get_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 读取 global scope 的配置值（公开方法，供其他模块复用）
    pub fn get_global_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        self.get_config_value(key)
    }

    /// 写入 global scope 的配置值（存在则覆盖）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        tracing::debug!(config_key = key, value = value, "配置已写入");
        Ok(())
    }

    /// 将整份 EngineConfig 写入 config_kv
    pub fn save_engine_config(&self, config: &EngineConfig) -> ConfigResult<()> {
        config.validate()?;

        let entries = [
            (config_keys::DEFAULT_CONVECTION_COEFF, config.default_convection_coeff_w_m2k.to_string()),
            (config_keys::CONDUCTIVITY_TEMP_COEFF, config.conductivity_temp_coeff.to_string()),
            (config_keys::CONDUCTIVITY_REF_TEMP, config.conductivity_ref_temp_c.to_string()),
            (config_keys::CONVERGENCE_TOLERANCE, config.convergence_tolerance_w_m2.to_string()),
            (config_keys::MAX_ITERATIONS, config.max_iterations.to_string()),
            (config_keys::SHELL_TEMP_LIMIT, config.shell_temp_limit_c.to_string()),
            (config_keys::FLAT_FILM_MODEL, config.flat_film_model.to_string()),
            (config_keys::FIXED_FILM_RESISTANCE, config.fixed_film_resistance_m2k_w.to_string()),
            (config_keys::UNKNOWN_METAL_POLICY, config.unknown_metal_policy.to_string()),
        ];

        for (key, value) in entries.iter() {
            self.set_global_config_value(key, value)?;
        }
        Ok(())
    }

    /// 从 config_kv 表读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> ConfigResult<String> {
        Ok(self.get_config_value(key)?.unwrap_or_else(|| default.to_string()))
    }

    /// 读取数值配置，格式错误时记录告警并回退默认值
    fn get_parsed_or_default<T>(&self, key: &str, default: T) -> ConfigResult<T>
    where
        T: FromStr + ToString + Copy,
    {
        let raw = self.get_config_or_default(key, &default.to_string())?;
        match raw.trim().parse::<T>() {
            Ok(v) => Ok(v),
            Err(_) => {
                tracing::warn!(
                    config_key = key,
                    raw_value = %raw,
                    "配置值格式错误，使用默认值"
                );
                Ok(default)
            }
        }
    }

    /// 获取所有配置的快照（JSON格式）
    ///
    /// # 用途
    /// - 与计算结果一同归档，保证方案复算时参数一致
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let mut config_map: HashMap<String, String> = HashMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        let json_value = json!(config_map);
        Ok(serde_json::to_string(&json_value)?)
    }

    /// 从配置快照恢复配置
    ///
    /// # 返回
    /// - Ok(usize): 恢复的配置项数量
    ///
    /// # 注意
    /// - 此方法会覆盖现有的global配置
    pub fn restore_config_from_snapshot(&self, snapshot_json: &str) -> ConfigResult<usize> {
        let config_map: HashMap<String, String> = serde_json::from_str(snapshot_json)?;

        let mut conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        let tx = conn.transaction()?;

        let mut count = 0;
        for (key, value) in config_map.iter() {
            let affected = tx.execute(
                "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
                 ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2",
                params![key, value],
            )?;
            count += affected;
        }

        tx.commit()?;
        Ok(count)
    }
}

// ==========================================
// EngineConfigReader Trait 实现
// ==========================================
#[async_trait]
impl EngineConfigReader for ConfigManager {
    // ===== 热工参数 =====

    async fn get_default_convection_coeff(&self) -> ConfigResult<f64> {
        self.get_parsed_or_default(config_keys::DEFAULT_CONVECTION_COEFF, 10.0)
    }

    async fn get_conductivity_temp_coeff(&self) -> ConfigResult<f64> {
        self.get_parsed_or_default(config_keys::CONDUCTIVITY_TEMP_COEFF, 0.1)
    }

    async fn get_conductivity_ref_temp(&self) -> ConfigResult<f64> {
        self.get_parsed_or_default(config_keys::CONDUCTIVITY_REF_TEMP, 2000.0)
    }

    async fn get_flat_film_model(&self) -> ConfigResult<FilmModel> {
        let value = self.get_config_or_default(config_keys::FLAT_FILM_MODEL, "COEFFICIENT")?;
        match value.trim().to_uppercase().as_str() {
            "COEFFICIENT" => Ok(FilmModel::Coefficient),
            "FIXED_AREAL" => Ok(FilmModel::FixedAreal),
            _ => {
                tracing::warn!(
                    config_key = config_keys::FLAT_FILM_MODEL,
                    raw_value = %value,
                    "配置值无法识别，使用默认值 COEFFICIENT"
                );
                Ok(FilmModel::Coefficient)
            }
        }
    }

    async fn get_fixed_film_resistance(&self) -> ConfigResult<f64> {
        self.get_parsed_or_default(config_keys::FIXED_FILM_RESISTANCE, 0.12)
    }

    // ===== 迭代控制 =====

    async fn get_convergence_tolerance(&self) -> ConfigResult<f64> {
        self.get_parsed_or_default(config_keys::CONVERGENCE_TOLERANCE, 1e-3)
    }

    async fn get_max_iterations(&self) -> ConfigResult<u32> {
        self.get_parsed_or_default(config_keys::MAX_ITERATIONS, 50)
    }

    // ===== 安全判定 =====

    async fn get_shell_temp_limit(&self) -> ConfigResult<f64> {
        self.get_parsed_or_default(config_keys::SHELL_TEMP_LIMIT, 300.0)
    }

    async fn get_unknown_metal_policy(&self) -> ConfigResult<UnknownMetalPolicy> {
        let value = self.get_config_or_default(config_keys::UNKNOWN_METAL_POLICY, "REJECT")?;
        match value.trim().to_uppercase().as_str() {
            "REJECT" => Ok(UnknownMetalPolicy::Reject),
            "ZERO_LIQUIDUS" => Ok(UnknownMetalPolicy::ZeroLiquidus),
            _ => {
                tracing::warn!(
                    config_key = config_keys::UNKNOWN_METAL_POLICY,
                    raw_value = %value,
                    "配置值无法识别，使用默认值 REJECT"
                );
                Ok(UnknownMetalPolicy::Reject)
            }
        }
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 热工
    pub const DEFAULT_CONVECTION_COEFF: &str = "default_convection_coeff_w_m2k";
    pub const CONDUCTIVITY_TEMP_COEFF: &str = "conductivity_temp_coeff";
    pub const CONDUCTIVITY_REF_TEMP: &str = "conductivity_ref_temp_c";
    pub const FLAT_FILM_MODEL: &str = "flat_film_model";
    pub const FIXED_FILM_RESISTANCE: &str = "fixed_film_resistance_m2k_w";

    // 迭代
    pub const CONVERGENCE_TOLERANCE: &str = "convergence_tolerance_w_m2";
    pub const MAX_ITERATIONS: &str = "max_iterations";

    // 安全
    pub const SHELL_TEMP_LIMIT: &str = "shell_temp_limit_c";
    pub const UNKNOWN_METAL_POLICY: &str = "unknown_metal_policy";
}
