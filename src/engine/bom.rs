// ==========================================
// 耐材内衬设计计算系统 - 材料清单汇总
// ==========================================
// 职责: 体积 × 密度 -> 质量，质量(t) × 单价 -> 成本
// 红线: 纯函数，输入已校验，不失败
// ==========================================

use crate::domain::lining::Layer;

// ==========================================
// BomLine / BillOfMaterials
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BomLine {
    pub volume_m3: f64,
    pub mass_kg: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BillOfMaterials {
    pub lines: Vec<BomLine>,
    pub total_mass_kg: f64,
    pub total_cost: f64,
}

pub struct BomAggregator;

impl BomAggregator {
    /// 单层质量与成本
    pub fn line(layer: &Layer, volume_m3: f64) -> BomLine {
        let mass_kg = volume_m3 * layer.density_kg_m3;
        BomLine {
            volume_m3,
            mass_kg,
            cost: (mass_kg / 1000.0) * layer.unit_price_per_tonne,
        }
    }

    /// 全部层汇总 (layers 与 volumes 同序同长)
    pub fn aggregate(layers: &[Layer], volumes_m3: &[f64]) -> BillOfMaterials {
        let lines: Vec<BomLine> = layers
            .iter()
            .zip(volumes_m3.iter())
            .map(|(layer, &volume)| Self::line(layer, volume))
            .collect();

        BillOfMaterials {
            total_mass_kg: lines.iter().map(|l| l.mass_kg).sum(),
            total_cost: lines.iter().map(|l| l.cost).sum(),
            lines,
        }
    }
}
