// ==========================================
// 耐材内衬设计计算系统 - 冻结前沿定位
// ==========================================
// 职责: 在温度剖面中找到首次降至液相线的深度
// 规则:
// - 热面温度已低于液相线 -> 深度 0
// - 首个满足 T_i >= T_liq >= T_{i+1} 的层内线性插值
//   depth = 累计厚度 + 层厚 × (T_i − T_liq) / (T_i − T_{i+1})
// - 恰好等于边界温度视为穿越(前沿在层边界)
// - 无穿越且壳体仍高于液相线 -> 未找到
// ==========================================

use crate::domain::result::FreezeFront;
use crate::engine::geometry::LayerSpan;

pub struct FreezeFrontLocator;

impl FreezeFrontLocator {
    /// 定位冻结前沿
    ///
    /// # 参数
    /// - `node_temps_c`: 节点温度 (n+1，热面在前)
    /// - `spans`: 各层几何位置 (n)
    /// - `liquidus_temp_c`: 液相线温度；None 表示未知(哨兵)，不评估
    pub fn locate(node_temps_c: &[f64], spans: &[LayerSpan], liquidus_temp_c: Option<f64>) -> FreezeFront {
        let liquidus = match liquidus_temp_c {
            Some(t) => t,
            None => return FreezeFront::NotApplicable,
        };

        let hot_face = match node_temps_c.first() {
            Some(t) => *t,
            None => return FreezeFront::NotFound,
        };
        if hot_face < liquidus {
            return FreezeFront::AtHotFace;
        }

        for (index, (pair, span)) in node_temps_c.windows(2).zip(spans.iter()).enumerate() {
            let (t_in, t_out) = (pair[0], pair[1]);
            if t_in >= liquidus && liquidus >= t_out {
                let drop = t_in - t_out;
                // 层内等温且等于液相线: 前沿取层起点
                let ratio = if drop > 0.0 { (t_in - liquidus) / drop } else { 0.0 };
                return FreezeFront::InLayer {
                    layer_index: index,
                    depth_mm: span.start_mm + span.thickness_mm * ratio,
                };
            }
        }

        FreezeFront::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(thicknesses: &[f64]) -> Vec<LayerSpan> {
        let mut start_mm = 0.0;
        thicknesses
            .iter()
            .map(|&t| {
                let span = LayerSpan { start_mm, thickness_mm: t, inner_radius_m: None, outer_radius_m: None };
                start_mm += t;
                span
            })
            .collect()
    }

    #[test]
    fn test_interpolation_within_first_layer() {
        let front = FreezeFrontLocator::locate(&[1200.0, 1100.0], &spans(&[40.0]), Some(1150.0));
        assert_eq!(front, FreezeFront::InLayer { layer_index: 0, depth_mm: 20.0 });
    }

    #[test]
    fn test_interpolation_in_later_layer() {
        // 第二层: 1000 -> 600, 液相线 900 -> 比例 0.25
        let front = FreezeFrontLocator::locate(
            &[1500.0, 1000.0, 600.0, 200.0],
            &spans(&[200.0, 100.0, 50.0]),
            Some(900.0),
        );
        assert_eq!(front, FreezeFront::InLayer { layer_index: 1, depth_mm: 225.0 });
    }

    #[test]
    fn test_exact_boundary_is_crossing() {
        let front = FreezeFrontLocator::locate(
            &[1500.0, 1000.0, 600.0],
            &spans(&[200.0, 100.0]),
            Some(1000.0),
        );
        // 首个满足条件的层是第 0 层，比例 1 -> 深度为累计厚度 200
        assert_eq!(front, FreezeFront::InLayer { layer_index: 0, depth_mm: 200.0 });
        assert_eq!(front.depth_mm(), Some(200.0));
    }

    #[test]
    fn test_hot_face_equal_liquidus() {
        let front = FreezeFrontLocator::locate(&[1150.0, 900.0], &spans(&[40.0]), Some(1150.0));
        assert_eq!(front.depth_mm(), Some(0.0));
    }

    #[test]
    fn test_hot_face_below_liquidus() {
        let front = FreezeFrontLocator::locate(&[1400.0, 900.0], &spans(&[40.0]), Some(1495.0));
        assert_eq!(front, FreezeFront::AtHotFace);
        assert_eq!(front.depth_mm(), Some(0.0));
    }

    #[test]
    fn test_not_found_when_shell_above_liquidus() {
        let front = FreezeFrontLocator::locate(&[1600.0, 1550.0, 1520.0], &spans(&[100.0, 10.0]), Some(1495.0));
        assert_eq!(front, FreezeFront::NotFound);
        assert_eq!(front.depth_mm(), None);
    }

    #[test]
    fn test_unknown_liquidus_not_applicable() {
        let front = FreezeFrontLocator::locate(&[1600.0, 200.0], &spans(&[100.0]), None);
        assert_eq!(front, FreezeFront::NotApplicable);
    }
}
