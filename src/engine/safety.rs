// ==========================================
// 耐材内衬设计计算系统 - 安全判定引擎
// ==========================================
// 职责: 冻结前沿/壳体温度/材料使用温度 -> 安全等级 + 原因
// 规则 (可解释):
// - CRITICAL: 叠层内未找到冻结前沿，金属可能到达壳体
// - WARNING: 冻结前沿落入最外层 / 壳体超温 / 某层热面超过最高使用温度
// - SAFE: 冻结前沿在耐材层内完成，或液相线未知不评估冻结
// 红线: 所有判定必须输出原因
// ==========================================

use crate::domain::lining::Layer;
use crate::domain::result::{FreezeFront, ReasonDetails, SafetyReason};
use crate::domain::types::{SafetyReasonCode, SafetyStatus};
use crate::engine::geometry::LayerSpan;
use tracing::warn;

// ==========================================
// SafetyAssessment - 判定结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct SafetyAssessment {
    pub status: SafetyStatus,
    pub reasons: Vec<SafetyReason>,
}

impl SafetyAssessment {
    pub fn has_reason(&self, code: SafetyReasonCode) -> bool {
        self.reasons.iter().any(|r| r.code == code)
    }
}

// ==========================================
// SafetyClassifier - 安全判定
// ==========================================
pub struct SafetyClassifier {
    shell_temp_limit_c: f64,
}

impl SafetyClassifier {
    pub fn new(shell_temp_limit_c: f64) -> Self {
        Self { shell_temp_limit_c }
    }

    /// 判定安全等级
    ///
    /// # 参数
    /// - `front`: 冻结前沿
    /// - `layers` / `spans`: 内衬层及几何位置
    /// - `node_temps_c`: 节点温度 (n+1)
    ///
    /// # 返回
    /// 各原因中最严重的等级 + 全部原因
    pub fn classify(
        &self,
        front: &FreezeFront,
        layers: &[Layer],
        spans: &[LayerSpan],
        node_temps_c: &[f64],
    ) -> SafetyAssessment {
        let mut reasons = vec![self.assess_front(front, layers, spans)];

        let shell_temp_c = node_temps_c.last().copied().unwrap_or(f64::NAN);
        if shell_temp_c > self.shell_temp_limit_c {
            warn!(
                shell_temp_c = shell_temp_c,
                limit_c = self.shell_temp_limit_c,
                "壳体温度超过阈值"
            );
            reasons.push(SafetyReason::new(
                SafetyReasonCode::ShellOverTemperature,
                None,
                ReasonDetails {
                    temp_c: Some(shell_temp_c),
                    limit_c: Some(self.shell_temp_limit_c),
                    ..ReasonDetails::default()
                },
            ));
        }

        for (index, (layer, hot_face_c)) in layers.iter().zip(node_temps_c.iter()).enumerate() {
            if let Some(max_temp) = layer.max_service_temp_c {
                if *hot_face_c > max_temp {
                    reasons.push(SafetyReason::new(
                        SafetyReasonCode::ServiceTempExceeded,
                        Some(index),
                        ReasonDetails {
                            layer_name: Some(layer.name.clone()),
                            temp_c: Some(*hot_face_c),
                            limit_c: Some(max_temp),
                            ..ReasonDetails::default()
                        },
                    ));
                }
            }
        }

        let status = reasons
            .iter()
            .map(|r| r.code.severity())
            .max()
            .unwrap_or(SafetyStatus::Safe);

        SafetyAssessment { status, reasons }
    }

    /// 冻结前沿判定
    ///
    /// 前沿深度 >= 最外层起点(含层边界) 视为落入最外层
    fn assess_front(&self, front: &FreezeFront, layers: &[Layer], spans: &[LayerSpan]) -> SafetyReason {
        let outer_start_mm = spans.last().map(|s| s.start_mm).unwrap_or(0.0);
        let outer_index = spans.len().saturating_sub(1);

        match front {
            FreezeFront::NotApplicable => {
                SafetyReason::new(SafetyReasonCode::NoFreezingRisk, None, ReasonDetails::default())
            }
            FreezeFront::NotFound => {
                SafetyReason::new(SafetyReasonCode::FrontNotFound, None, ReasonDetails::default())
            }
            FreezeFront::AtHotFace | FreezeFront::InLayer { .. } => {
                let depth_mm = front.depth_mm().unwrap_or(0.0);
                let (code, layer_index) = if depth_mm >= outer_start_mm {
                    (SafetyReasonCode::FrontInShellLayer, outer_index)
                } else {
                    (SafetyReasonCode::FrontContained, front.layer_index().unwrap_or(0))
                };
                let details = ReasonDetails {
                    layer_name: layers.get(layer_index).map(|l| l.name.clone()),
                    depth_mm: Some(depth_mm),
                    ..ReasonDetails::default()
                };
                SafetyReason::new(code, Some(layer_index), details)
            }
        }
    }
}
