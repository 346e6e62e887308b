// ==========================================
// 耐材内衬设计计算系统 - 结果组装
// ==========================================
// 职责: 将求解/定位/判定/清单各部分组合为一份不可变结果
// 红线: 只组装，不计算新的物理量
// ==========================================

use crate::domain::lining::SimulationRequest;
use crate::domain::result::{FreezeFront, LayerResult, SimulationResult};
use crate::engine::bom::BillOfMaterials;
use crate::engine::geometry::LayerSpan;
use crate::engine::profile::TemperatureProfileBuilder;
use crate::engine::safety::SafetyAssessment;
use crate::engine::solver::NetworkSolution;

/// 组装输入 (各环节的产出)
pub struct AssemblyParts<'a> {
    pub request: &'a SimulationRequest,
    pub spans: &'a [LayerSpan],
    pub solution: NetworkSolution,
    pub freeze_front: FreezeFront,
    pub safety: SafetyAssessment,
    pub bom: BillOfMaterials,
    pub liquidus_temp_c: f64,
}

pub struct ResultAssembler;

impl ResultAssembler {
    pub fn assemble(parts: AssemblyParts<'_>) -> SimulationResult {
        let AssemblyParts {
            request,
            spans,
            solution,
            freeze_front,
            safety,
            bom,
            liquidus_temp_c,
        } = parts;

        let temps = &solution.node_temps_c;
        let layer_results: Vec<LayerResult> = request
            .layers
            .iter()
            .enumerate()
            .zip(spans.iter())
            .zip(bom.lines.iter())
            .map(|(((index, layer), span), line)| {
                let resistance_k_w = solution.layer_resistances_k_w[index];
                LayerResult {
                    layer: layer.clone(),
                    inner_face_temp_c: temps[index],
                    outer_face_temp_c: temps[index + 1],
                    inner_radius_mm: span.inner_radius_m.map(to_mm),
                    outer_radius_mm: span.outer_radius_m.map(to_mm),
                    effective_conductivity_w_mk: solution.effective_conductivities_w_mk[index],
                    resistance_k_w,
                    areal_resistance_m2k_w: resistance_k_w * solution.reference_area_m2,
                    volume_m3: line.volume_m3,
                    mass_kg: line.mass_kg,
                    cost: line.cost,
                }
            })
            .collect();

        // 圆筒: 最外层外径即所需壳体直径
        let required_shell_diameter_mm = spans
            .last()
            .and_then(|s| s.outer_radius_m)
            .map(|r| 2.0 * to_mm(r));

        SimulationResult {
            heat_flux_w_m2: solution.heat_flux_w_m2,
            heat_loss_w: solution.heat_rate_w,
            total_resistance_k_w: solution.total_resistance_k_w,
            film_resistance_k_w: solution.film_resistance_k_w,
            shell_temp_c: temps.last().copied().unwrap_or(request.target_temp_c),
            temperature_profile: TemperatureProfileBuilder::build(spans, temps),
            iterations: solution.iterations,
            converged: solution.converged,
            layer_results,
            total_thickness_mm: request.total_thickness_mm(),
            required_shell_diameter_mm,
            total_mass_kg: bom.total_mass_kg,
            total_cost: bom.total_cost,
            liquidus_temp_c,
            freeze_depth_mm: freeze_front.depth_mm(),
            freeze_front,
            safety_status: safety.status,
            safety_reasons: safety.reasons,
        }
    }
}

fn to_mm(meters: f64) -> f64 {
    meters * 1000.0
}
