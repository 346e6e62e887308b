// ==========================================
// 耐材内衬设计计算系统 - 几何适配器
// ==========================================
// 职责: 按几何模型给出单层热阻、体积，并推进几何状态(当前半径)
// 平壁: R = t / (λ·A),              V = A·t
// 圆筒: R = ln(r_o/r_i) / (2π·L·λ), V = π·L·(r_o² − r_i²)
// 红线: 求解器与材料清单不感知几何类型，只通过 GeometryModel 访问
// ==========================================

use crate::domain::lining::{Geometry, Layer};
use crate::domain::types::{FilmModel, GeometryKind};
use crate::engine::error::{EngineError, EngineResult};
use std::f64::consts::PI;

// ==========================================
// LayerSpan - 单层几何位置
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerSpan {
    pub start_mm: f64,               // 距热面起始深度
    pub thickness_mm: f64,           // 厚度
    pub inner_radius_m: Option<f64>, // 内半径 (仅圆筒)
    pub outer_radius_m: Option<f64>, // 外半径 (仅圆筒)
}

impl LayerSpan {
    pub fn thickness_m(&self) -> f64 {
        self.thickness_mm / 1000.0
    }

    /// 层末端深度 (mm)
    pub fn end_mm(&self) -> f64 {
        self.start_mm + self.thickness_mm
    }
}

/// 对流膜参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilmSettings {
    pub convection_coeff_w_m2k: f64,
    pub flat_model: FilmModel,
    pub fixed_resistance_m2k_w: f64,
}

// ==========================================
// GeometryModel Trait
// ==========================================
// 热阻单位统一为绝对热阻 K/W
pub trait GeometryModel: Send + Sync {
    fn kind(&self) -> GeometryKind;

    /// 按热流顺序逐层推进几何状态，给出每层位置
    fn layout(&self, layers: &[Layer]) -> EngineResult<Vec<LayerSpan>>;

    /// 单层导热热阻 (K/W)
    fn resistance(&self, span: &LayerSpan, conductivity_w_mk: f64) -> f64;

    /// 单层体积 (m³)
    fn volume(&self, span: &LayerSpan) -> f64;

    /// 壳体外表面对流膜热阻 (K/W)
    fn film_resistance(&self, shell: &LayerSpan, film: &FilmSettings) -> f64;

    /// 热流密度参考面积 (m²)
    fn reference_area(&self, shell: &LayerSpan) -> f64;
}

/// 为几何变体选择模型（穷尽匹配）
pub fn geometry_model(geometry: &Geometry) -> Box<dyn GeometryModel> {
    match *geometry {
        Geometry::Flat { area_m2 } => Box::new(FlatWall { area_m2 }),
        Geometry::Cylindrical { length_m, inner_diameter_mm } => Box::new(CylindricalShell {
            length_m,
            inner_radius_m: inner_diameter_mm / 2000.0,
        }),
    }
}

// ==========================================
// FlatWall - 平壁
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct FlatWall {
    pub area_m2: f64,
}

impl GeometryModel for FlatWall {
    fn kind(&self) -> GeometryKind {
        GeometryKind::Flat
    }

    fn layout(&self, layers: &[Layer]) -> EngineResult<Vec<LayerSpan>> {
        let mut start_mm = 0.0;
        let spans = layers
            .iter()
            .map(|layer| {
                let span = LayerSpan {
                    start_mm,
                    thickness_mm: layer.thickness_mm,
                    inner_radius_m: None,
                    outer_radius_m: None,
                };
                start_mm += layer.thickness_mm;
                span
            })
            .collect();
        Ok(spans)
    }

    fn resistance(&self, span: &LayerSpan, conductivity_w_mk: f64) -> f64 {
        span.thickness_m() / (conductivity_w_mk * self.area_m2)
    }

    fn volume(&self, span: &LayerSpan) -> f64 {
        self.area_m2 * span.thickness_m()
    }

    fn film_resistance(&self, _shell: &LayerSpan, film: &FilmSettings) -> f64 {
        match film.flat_model {
            FilmModel::Coefficient => 1.0 / (film.convection_coeff_w_m2k * self.area_m2),
            FilmModel::FixedAreal => film.fixed_resistance_m2k_w / self.area_m2,
        }
    }

    fn reference_area(&self, _shell: &LayerSpan) -> f64 {
        self.area_m2
    }
}

// ==========================================
// CylindricalShell - 圆筒壳
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct CylindricalShell {
    pub length_m: f64,
    pub inner_radius_m: f64,
}

/// 圆筒几何推进状态：当前层内半径
#[derive(Debug, Clone, Copy)]
struct RadiusCursor {
    radius_m: f64,
}

impl RadiusCursor {
    /// 推进一层，返回 (r_inner, r_outer)；外半径成为下一层内半径
    fn advance(&mut self, index: usize, thickness_m: f64) -> EngineResult<(f64, f64)> {
        let r_inner = self.radius_m;
        if !(r_inner > 0.0) {
            return Err(EngineError::invalid_geometry(
                format!("layers[{}].inner_radius", index),
                format!("内半径必须 > 0, 实际 {} m", r_inner),
            ));
        }
        let r_outer = r_inner + thickness_m;
        self.radius_m = r_outer;
        Ok((r_inner, r_outer))
    }
}

impl CylindricalShell {
    /// 壳体外表面积 2π·r_o·L
    fn outer_area(&self, shell: &LayerSpan) -> f64 {
        let r_outer = shell.outer_radius_m.unwrap_or(self.inner_radius_m);
        2.0 * PI * r_outer * self.length_m
    }
}

impl GeometryModel for CylindricalShell {
    fn kind(&self) -> GeometryKind {
        GeometryKind::Cylinder
    }

    fn layout(&self, layers: &[Layer]) -> EngineResult<Vec<LayerSpan>> {
        let mut cursor = RadiusCursor { radius_m: self.inner_radius_m };
        let mut start_mm = 0.0;
        let mut spans = Vec::with_capacity(layers.len());

        for (index, layer) in layers.iter().enumerate() {
            let (r_inner, r_outer) = cursor.advance(index, layer.thickness_m())?;
            spans.push(LayerSpan {
                start_mm,
                thickness_mm: layer.thickness_mm,
                inner_radius_m: Some(r_inner),
                outer_radius_m: Some(r_outer),
            });
            start_mm += layer.thickness_mm;
        }

        Ok(spans)
    }

    fn resistance(&self, span: &LayerSpan, conductivity_w_mk: f64) -> f64 {
        let r_inner = span.inner_radius_m.unwrap_or(self.inner_radius_m);
        let r_outer = span.outer_radius_m.unwrap_or(r_inner + span.thickness_m());
        (r_outer / r_inner).ln() / (2.0 * PI * self.length_m * conductivity_w_mk)
    }

    fn volume(&self, span: &LayerSpan) -> f64 {
        let r_inner = span.inner_radius_m.unwrap_or(self.inner_radius_m);
        let r_outer = span.outer_radius_m.unwrap_or(r_inner + span.thickness_m());
        PI * self.length_m * (r_outer * r_outer - r_inner * r_inner)
    }

    fn film_resistance(&self, shell: &LayerSpan, film: &FilmSettings) -> f64 {
        1.0 / (film.convection_coeff_w_m2k * self.outer_area(shell))
    }

    fn reference_area(&self, shell: &LayerSpan) -> f64 {
        self.outer_area(shell)
    }
}
