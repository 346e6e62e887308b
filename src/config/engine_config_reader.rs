// ==========================================
// 耐材内衬设计计算系统 - 引擎配置读取 Trait
// ==========================================
// 职责: 定义引擎所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含计算逻辑
// ==========================================

use crate::config::engine_config::EngineConfig;
use crate::domain::types::{FilmModel, UnknownMetalPolicy};
use async_trait::async_trait;
use std::error::Error;

// ==========================================
// EngineConfigReader Trait
// ==========================================
// 用途: 服务启动/请求前解析出一份不可变 EngineConfig
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait EngineConfigReader: Send + Sync {
    // ===== 热工参数 =====

    /// 获取默认对流换热系数 (W/m²K)
    ///
    /// # 默认值
    /// - 10.0
    async fn get_default_convection_coeff(&self) -> Result<f64, Box<dyn Error + Send + Sync>>;

    /// 获取导热系数温度修正系数
    ///
    /// # 默认值
    /// - 0.1
    async fn get_conductivity_temp_coeff(&self) -> Result<f64, Box<dyn Error + Send + Sync>>;

    /// 获取导热系数温度修正参考温度 (°C)
    ///
    /// # 默认值
    /// - 2000.0
    async fn get_conductivity_ref_temp(&self) -> Result<f64, Box<dyn Error + Send + Sync>>;

    /// 获取平壁对流膜热阻模型
    ///
    /// # 默认值
    /// - COEFFICIENT
    async fn get_flat_film_model(&self) -> Result<FilmModel, Box<dyn Error + Send + Sync>>;

    /// 获取固定面热阻 (m²K/W)
    ///
    /// # 默认值
    /// - 0.12
    async fn get_fixed_film_resistance(&self) -> Result<f64, Box<dyn Error + Send + Sync>>;

    // ===== 迭代控制 =====

    /// 获取收敛判据 |ΔQ| (W/m²)
    ///
    /// # 默认值
    /// - 0.001
    async fn get_convergence_tolerance(&self) -> Result<f64, Box<dyn Error + Send + Sync>>;

    /// 获取最大迭代次数
    ///
    /// # 默认值
    /// - 50
    async fn get_max_iterations(&self) -> Result<u32, Box<dyn Error + Send + Sync>>;

    // ===== 安全判定 =====

    /// 获取壳体超温阈值 (°C)
    ///
    /// # 默认值
    /// - 300.0
    async fn get_shell_temp_limit(&self) -> Result<f64, Box<dyn Error + Send + Sync>>;

    /// 获取未知金属策略
    ///
    /// # 默认值
    /// - REJECT
    async fn get_unknown_metal_policy(
        &self,
    ) -> Result<UnknownMetalPolicy, Box<dyn Error + Send + Sync>>;

    // ===== 汇总 =====

    /// 读取全部配置项并组装为 EngineConfig
    ///
    /// # 返回
    /// - Ok(EngineConfig): 通过 validate() 的配置
    /// - Err: 读取失败或配置无效
    async fn load_engine_config(&self) -> Result<EngineConfig, Box<dyn Error + Send + Sync>> {
        let config = EngineConfig {
            default_convection_coeff_w_m2k: self.get_default_convection_coeff().await?,
            conductivity_temp_coeff: self.get_conductivity_temp_coeff().await?,
            conductivity_ref_temp_c: self.get_conductivity_ref_temp().await?,
            convergence_tolerance_w_m2: self.get_convergence_tolerance().await?,
            max_iterations: self.get_max_iterations().await?,
            shell_temp_limit_c: self.get_shell_temp_limit().await?,
            flat_film_model: self.get_flat_film_model().await?,
            fixed_film_resistance_m2k_w: self.get_fixed_film_resistance().await?,
            unknown_metal_policy: self.get_unknown_metal_policy().await?,
        };
        config.validate()?;
        Ok(config)
    }
}
