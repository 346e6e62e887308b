// ==========================================
// 耐材内衬设计计算系统 - 引擎配置
// ==========================================
// 职责: 引擎全部可调参数 + 默认值 + 校验
// 来源: ConfigManager(config_kv) 或直接构造
// ==========================================

use crate::domain::lining::DEFAULT_CONVECTION_COEFF_W_M2K;
use crate::domain::types::{FilmModel, UnknownMetalPolicy};
use serde::{Deserialize, Serialize};
use tracing::warn;

// ==========================================
// EngineConfig - 引擎配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 请求未给出对流系数时使用 (W/m²K)
    pub default_convection_coeff_w_m2k: f64,

    /// 导热系数温度修正: k_eff = k × (1 + T_mean / ref × coeff)，0 表示关闭修正
    pub conductivity_temp_coeff: f64,

    /// 导热系数温度修正的参考温度 (°C)
    pub conductivity_ref_temp_c: f64,

    /// 收敛判据 |ΔQ| (W/m²)
    pub convergence_tolerance_w_m2: f64,

    /// 最大迭代次数
    pub max_iterations: u32,

    /// 壳体超温告警阈值 (°C)
    pub shell_temp_limit_c: f64,

    /// 平壁对流膜热阻模型
    pub flat_film_model: FilmModel,

    /// FIXED_AREAL 模型使用的面热阻 (m²K/W)
    pub fixed_film_resistance_m2k_w: f64,

    /// 目录中找不到金属时的处理策略
    pub unknown_metal_policy: UnknownMetalPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_convection_coeff_w_m2k: DEFAULT_CONVECTION_COEFF_W_M2K,
            conductivity_temp_coeff: 0.1,
            conductivity_ref_temp_c: 2000.0,
            convergence_tolerance_w_m2: 1e-3,
            max_iterations: 50,
            shell_temp_limit_c: 300.0,
            flat_film_model: FilmModel::Coefficient,
            fixed_film_resistance_m2k_w: 0.12,
            unknown_metal_policy: UnknownMetalPolicy::Reject,
        }
    }
}

impl EngineConfig {
    /// 关闭导热系数温度修正(名义导热系数，单次求解即收敛)
    pub fn nominal() -> Self {
        Self {
            conductivity_temp_coeff: 0.0,
            ..Self::default()
        }
    }

    /// 校验配置有效性
    ///
    /// # 返回
    /// - `Ok(())`: 配置有效
    /// - `Err(String)`: 配置无效,返回错误描述
    ///
    /// # 验证规则
    /// 1. 对流系数、参考温度、收敛判据、固定膜热阻必须为有限正数
    /// 2. 温度修正系数必须为有限非负数
    /// 3. 最大迭代次数 >= 1
    /// 4. 壳体超温阈值必须为有限数
    pub fn validate(&self) -> Result<(), String> {
        let positives = [
            ("default_convection_coeff_w_m2k", self.default_convection_coeff_w_m2k),
            ("conductivity_ref_temp_c", self.conductivity_ref_temp_c),
            ("convergence_tolerance_w_m2", self.convergence_tolerance_w_m2),
            ("fixed_film_resistance_m2k_w", self.fixed_film_resistance_m2k_w),
        ];
        for (key, value) in positives {
            if !value.is_finite() || value <= 0.0 {
                warn!(config_key = key, value = value, "配置值必须为有限正数");
                return Err(format!("配置项 {} 必须为有限正数, 实际 {}", key, value));
            }
        }

        if !self.conductivity_temp_coeff.is_finite() || self.conductivity_temp_coeff < 0.0 {
            return Err(format!(
                "配置项 conductivity_temp_coeff 必须为有限非负数, 实际 {}",
                self.conductivity_temp_coeff
            ));
        }

        if self.max_iterations == 0 {
            return Err("配置项 max_iterations 必须 >= 1".to_string());
        }

        if !self.shell_temp_limit_c.is_finite() {
            return Err(format!(
                "配置项 shell_temp_limit_c 必须为有限数, 实际 {}",
                self.shell_temp_limit_c
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_convection_coeff_w_m2k, 10.0);
        assert_eq!(config.flat_film_model, FilmModel::Coefficient);
        assert_eq!(config.unknown_metal_policy, UnknownMetalPolicy::Reject);
    }

    #[test]
    fn test_nominal_disables_correction() {
        let config = EngineConfig::nominal();
        assert_eq!(config.conductivity_temp_coeff, 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = EngineConfig::default();
        config.convergence_tolerance_w_m2 = 0.0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.max_iterations = 0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.conductivity_temp_coeff = -0.1;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.default_convection_coeff_w_m2k = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"shell_temp_limit_c": 350.0, "unknown_metal_policy": "ZERO_LIQUIDUS"}"#)
                .unwrap();
        assert_eq!(config.shell_temp_limit_c, 350.0);
        assert_eq!(config.unknown_metal_policy, UnknownMetalPolicy::ZeroLiquidus);
        assert_eq!(config.max_iterations, 50);
    }
}
