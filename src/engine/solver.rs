// ==========================================
// 耐材内衬设计计算系统 - 热阻网络求解器
// ==========================================
// 职责: 串联热阻求和 + 对流膜热阻 -> 热流，并迭代修正导热系数
// Q = (T_target − T_ambient) / (Σ R_i + R_conv)
// k_eff = k × (1 + T_mean / T_ref × coeff)
// 红线: 单层热阻由几何适配器给出，求解器只求和
// 红线: 迭代有上限，必然终止；至少完成一轮才有结果
// ==========================================

use crate::config::EngineConfig;
use crate::domain::lining::Layer;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::geometry::{FilmSettings, GeometryModel, LayerSpan};
use crate::engine::profile::TemperatureProfileBuilder;
use tracing::{debug, warn};

// ==========================================
// SolverSettings - 求解参数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverSettings {
    pub conductivity_temp_coeff: f64,
    pub conductivity_ref_temp_c: f64,
    pub convergence_tolerance_w_m2: f64,
    pub max_iterations: u32,
}

impl From<&EngineConfig> for SolverSettings {
    fn from(config: &EngineConfig) -> Self {
        Self {
            conductivity_temp_coeff: config.conductivity_temp_coeff,
            conductivity_ref_temp_c: config.conductivity_ref_temp_c,
            convergence_tolerance_w_m2: config.convergence_tolerance_w_m2,
            max_iterations: config.max_iterations,
        }
    }
}

// ==========================================
// NetworkSolution - 求解结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkSolution {
    pub heat_rate_w: f64,                       // 总热流 (W)
    pub heat_flux_w_m2: f64,                    // 热流密度 (按参考面积)
    pub reference_area_m2: f64,                 // 参考面积
    pub layer_resistances_k_w: Vec<f64>,        // 各层热阻
    pub effective_conductivities_w_mk: Vec<f64>, // 各层修正后导热系数
    pub film_resistance_k_w: f64,               // 对流膜热阻
    pub total_resistance_k_w: f64,              // 总热阻
    pub node_temps_c: Vec<f64>,                 // 节点温度 (n+1)
    pub iterations: u32,
    pub converged: bool,
}

// ==========================================
// ResistanceNetworkSolver - 热阻网络求解器
// ==========================================
pub struct ResistanceNetworkSolver {
    settings: SolverSettings,
}

impl ResistanceNetworkSolver {
    pub fn new(settings: SolverSettings) -> Self {
        Self { settings }
    }

    /// 温度修正后的导热系数
    pub fn effective_conductivity(&self, nominal_w_mk: f64, mean_temp_c: f64) -> f64 {
        nominal_w_mk
            * (1.0
                + mean_temp_c / self.settings.conductivity_ref_temp_c
                    * self.settings.conductivity_temp_coeff)
    }

    /// 求解热阻网络
    ///
    /// # 参数
    /// - `model`: 几何模型
    /// - `layers` / `spans`: 内衬层及其几何位置 (同序同长)
    /// - `target_temp_c` / `ambient_temp_c`: 热面与环境温度
    /// - `film`: 对流膜参数
    ///
    /// # 算法
    /// 1. 初始剖面所有节点取 target_temp
    /// 2. 每轮: 各层取两端节点均值修正 λ -> 重算热阻 -> 重算 Q -> 重算剖面
    /// 3. |ΔQ| < ε 或达到最大迭代次数时停止
    pub fn solve(
        &self,
        model: &dyn GeometryModel,
        layers: &[Layer],
        spans: &[LayerSpan],
        target_temp_c: f64,
        ambient_temp_c: f64,
        film: &FilmSettings,
    ) -> EngineResult<NetworkSolution> {
        let shell = spans.last().ok_or(EngineError::EmptyLayerSequence)?;
        let film_resistance_k_w = model.film_resistance(shell, film);
        let reference_area_m2 = model.reference_area(shell);
        let delta_t = target_temp_c - ambient_temp_c;

        let mut node_temps_c = vec![target_temp_c; layers.len() + 1];
        let mut previous_flux: Option<f64> = None;
        let mut iterations = 0;
        let mut converged = false;

        let mut layer_resistances_k_w = Vec::with_capacity(layers.len());
        let mut effective_conductivities_w_mk = Vec::with_capacity(layers.len());
        let mut total_resistance_k_w = 0.0;
        let mut heat_rate_w = 0.0;

        while iterations < self.settings.max_iterations {
            iterations += 1;
            layer_resistances_k_w.clear();
            effective_conductivities_w_mk.clear();

            for (index, (layer, span)) in layers.iter().zip(spans.iter()).enumerate() {
                let mean_temp_c = (node_temps_c[index] + node_temps_c[index + 1]) / 2.0;
                let k_eff = self.effective_conductivity(layer.conductivity_w_mk, mean_temp_c);
                if !k_eff.is_finite() || k_eff <= 0.0 {
                    return Err(EngineError::InvalidConductivity {
                        layer_index: index,
                        layer_name: layer.name.clone(),
                        value: k_eff,
                    });
                }
                effective_conductivities_w_mk.push(k_eff);
                layer_resistances_k_w.push(model.resistance(span, k_eff));
            }

            total_resistance_k_w = layer_resistances_k_w.iter().sum::<f64>() + film_resistance_k_w;
            if !total_resistance_k_w.is_finite() || total_resistance_k_w <= 0.0 {
                return Err(EngineError::InvalidResistance {
                    total: total_resistance_k_w,
                });
            }

            heat_rate_w = delta_t / total_resistance_k_w;
            node_temps_c = TemperatureProfileBuilder::node_temperatures(
                target_temp_c,
                heat_rate_w,
                &layer_resistances_k_w,
            );

            let flux = heat_rate_w / reference_area_m2;
            let delta_q = previous_flux.map(|p| (flux - p).abs());
            debug!(iteration = iterations, flux_w_m2 = flux, delta_q = ?delta_q, "热阻网络迭代");

            if let Some(dq) = delta_q {
                if dq < self.settings.convergence_tolerance_w_m2 {
                    converged = true;
                    break;
                }
            }
            previous_flux = Some(flux);
        }

        if iterations == 0 {
            return Err(EngineError::InvalidConfig(format!(
                "max_iterations = {}，求解器未执行任何迭代",
                self.settings.max_iterations
            )));
        }

        if !converged {
            warn!(
                iterations = iterations,
                max_iterations = self.settings.max_iterations,
                "热阻网络未在最大迭代次数内收敛，返回最后一轮结果"
            );
        }

        Ok(NetworkSolution {
            heat_rate_w,
            heat_flux_w_m2: heat_rate_w / reference_area_m2,
            reference_area_m2,
            layer_resistances_k_w,
            effective_conductivities_w_mk,
            film_resistance_k_w,
            total_resistance_k_w,
            node_temps_c,
            iterations,
            converged,
        })
    }
}
