// ==========================================
// 耐材内衬设计计算系统 - 温度剖面构建
// ==========================================
// 职责: 由热流与各层热阻反推界面温度
// T_{i+1} = T_i − Q·R_i
// ==========================================

use crate::domain::result::ProfilePoint;
use crate::engine::geometry::LayerSpan;

pub struct TemperatureProfileBuilder;

impl TemperatureProfileBuilder {
    /// 计算节点温度 (热面 + 每层冷面，共 n+1 个)
    ///
    /// # 参数
    /// - `hot_face_temp_c`: 热面温度
    /// - `heat_rate_w`: 热流 (W)
    /// - `resistances_k_w`: 各层热阻 (K/W)
    pub fn node_temperatures(hot_face_temp_c: f64, heat_rate_w: f64, resistances_k_w: &[f64]) -> Vec<f64> {
        let mut temps = Vec::with_capacity(resistances_k_w.len() + 1);
        let mut current = hot_face_temp_c;
        temps.push(current);
        for r in resistances_k_w {
            current -= heat_rate_w * r;
            temps.push(current);
        }
        temps
    }

    /// 组装带深度的温度剖面
    ///
    /// 节点数必须为 spans.len() + 1
    pub fn build(spans: &[LayerSpan], node_temps_c: &[f64]) -> Vec<ProfilePoint> {
        let positions = std::iter::once(0.0).chain(spans.iter().map(|s| s.end_mm()));
        positions
            .zip(node_temps_c.iter())
            .map(|(position_mm, &temp_c)| ProfilePoint { position_mm, temp_c })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_temperatures() {
        let temps = TemperatureProfileBuilder::node_temperatures(1200.0, 100.0, &[1.0, 2.0, 0.5]);
        assert_eq!(temps, vec![1200.0, 1100.0, 900.0, 850.0]);
    }

    #[test]
    fn test_build_positions() {
        let spans = [
            LayerSpan { start_mm: 0.0, thickness_mm: 230.0, inner_radius_m: None, outer_radius_m: None },
            LayerSpan { start_mm: 230.0, thickness_mm: 100.0, inner_radius_m: None, outer_radius_m: None },
        ];
        let profile = TemperatureProfileBuilder::build(&spans, &[1200.0, 1000.0, 400.0]);
        assert_eq!(profile.len(), 3);
        assert_eq!(profile[0].position_mm, 0.0);
        assert_eq!(profile[1].position_mm, 230.0);
        assert_eq!(profile[2].position_mm, 330.0);
        assert_eq!(profile[2].temp_c, 400.0);
    }
}
