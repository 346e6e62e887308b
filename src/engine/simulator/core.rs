// ==========================================
// 耐材内衬设计计算系统 - 模拟编排器
// ==========================================
// 输入: 模拟请求 + 液相线 (由 API 层从目录解析)
// 输出: SimulationResult 或 EngineError
// ==========================================

use crate::config::EngineConfig;
use crate::domain::lining::SimulationRequest;
use crate::domain::result::SimulationResult;
use crate::engine::assembler::{AssemblyParts, ResultAssembler};
use crate::engine::bom::BomAggregator;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::freeze_front::FreezeFrontLocator;
use crate::engine::geometry::{geometry_model, FilmSettings};
use crate::engine::safety::SafetyClassifier;
use crate::engine::solver::{ResistanceNetworkSolver, SolverSettings};
use crate::engine::validation::validate_request;
use tracing::{debug, info, instrument, warn};

// ==========================================
// LiningSimulator - 内衬模拟器
// ==========================================
#[derive(Debug, Clone)]
pub struct LiningSimulator {
    config: EngineConfig,
}

impl Default for LiningSimulator {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }
}

impl LiningSimulator {
    /// 创建模拟器
    ///
    /// # 返回
    /// - `Err(EngineError::InvalidConfig)`: 配置未通过 `EngineConfig::validate`
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate().map_err(EngineError::InvalidConfig)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// 执行一次稳态模拟
    ///
    /// # 参数
    /// - `request`: 模拟请求 (层顺序即热流方向)
    /// - `liquidus_temp_c`: 金属液相线温度；None 表示未知，不评估冻结
    ///
    /// # 返回
    /// - `Ok(SimulationResult)`: 完整结果
    /// - `Err(EngineError)`: 输入非法，不产生任何部分结果
    #[instrument(skip_all, fields(metal = %request.metal, layers = request.layers.len()))]
    pub fn simulate(
        &self,
        request: &SimulationRequest,
        liquidus_temp_c: Option<f64>,
    ) -> EngineResult<SimulationResult> {
        // ===== 1. 校验 =====
        validate_request(request)?;

        // ===== 2. 几何布置 =====
        let model = geometry_model(&request.geometry);
        let spans = model.layout(&request.layers)?;
        debug!(geometry = %model.kind(), "几何布置完成");

        // ===== 3. 热阻网络 =====
        let film = FilmSettings {
            convection_coeff_w_m2k: request.convection_coeff_w_m2k,
            flat_model: self.config.flat_film_model,
            fixed_resistance_m2k_w: self.config.fixed_film_resistance_m2k_w,
        };
        let solver = ResistanceNetworkSolver::new(SolverSettings::from(&self.config));
        let solution = solver.solve(
            model.as_ref(),
            &request.layers,
            &spans,
            request.target_temp_c,
            request.ambient_temp_c,
            &film,
        )?;

        // ===== 4. 冻结前沿 + 安全判定 =====
        let freeze_front = FreezeFrontLocator::locate(&solution.node_temps_c, &spans, liquidus_temp_c);
        let safety = SafetyClassifier::new(self.config.shell_temp_limit_c).classify(
            &freeze_front,
            &request.layers,
            &spans,
            &solution.node_temps_c,
        );

        // ===== 5. 材料清单 =====
        let volumes: Vec<f64> = spans.iter().map(|span| model.volume(span)).collect();
        let bom = BomAggregator::aggregate(&request.layers, &volumes);

        if liquidus_temp_c.is_none() {
            warn!("液相线未知，跳过冻结评估");
        }

        // ===== 6. 组装 =====
        let result = ResultAssembler::assemble(AssemblyParts {
            request,
            spans: &spans,
            solution,
            freeze_front,
            safety,
            bom,
            liquidus_temp_c: liquidus_temp_c.unwrap_or(0.0),
        });

        info!(
            heat_flux_w_m2 = result.heat_flux_w_m2,
            shell_temp_c = result.shell_temp_c,
            iterations = result.iterations,
            status = %result.safety_status,
            "内衬模拟完成"
        );

        Ok(result)
    }
}
