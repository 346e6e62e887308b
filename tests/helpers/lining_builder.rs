// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

#![allow(dead_code)]

use molty_lining::api::{GeometryInput, LayerInput, SimulationInput};
use molty_lining::domain::{Geometry, Layer, SimulationRequest};

// ==========================================
// SimulationRequest 构建器
// ==========================================

pub struct RequestBuilder {
    metal: String,
    target_temp_c: f64,
    ambient_temp_c: f64,
    geometry: Geometry,
    convection_coeff_w_m2k: f64,
    layers: Vec<Layer>,
}

impl RequestBuilder {
    /// 1 m² 平壁, 1600 °C -> 25 °C, h = 10
    pub fn flat() -> Self {
        Self {
            metal: "Steel".to_string(),
            target_temp_c: 1600.0,
            ambient_temp_c: 25.0,
            geometry: Geometry::Flat { area_m2: 1.0 },
            convection_coeff_w_m2k: 10.0,
            layers: Vec::new(),
        }
    }

    pub fn cylinder(length_m: f64, inner_diameter_mm: f64) -> Self {
        Self {
            geometry: Geometry::Cylindrical { length_m, inner_diameter_mm },
            ..Self::flat()
        }
    }

    pub fn metal(mut self, metal: &str) -> Self {
        self.metal = metal.to_string();
        self
    }

    pub fn temps(mut self, target_temp_c: f64, ambient_temp_c: f64) -> Self {
        self.target_temp_c = target_temp_c;
        self.ambient_temp_c = ambient_temp_c;
        self
    }

    pub fn area(mut self, area_m2: f64) -> Self {
        self.geometry = Geometry::Flat { area_m2 };
        self
    }

    pub fn convection(mut self, h: f64) -> Self {
        self.convection_coeff_w_m2k = h;
        self
    }

    /// 追加一层 (密度 2400, 单价 800)
    pub fn layer(self, name: &str, thickness_mm: f64, lambda: f64) -> Self {
        self.layer_with(Layer::new(name, thickness_mm, lambda, 2400.0, 800.0))
    }

    pub fn layer_with(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    /// 典型三层炉墙: 镁砖 230 / 浇注料 100 / 隔热 50
    pub fn furnace_wall(self) -> Self {
        self.layer_with(Layer::new("Magnit MK90", 230.0, 3.5, 2950.0, 1200.0))
            .layer_with(Layer::new("Caldercast 155AL", 100.0, 1.2, 2450.0, 950.0))
            .layer_with(Layer::new("Izolacija", 50.0, 0.15, 600.0, 450.0))
    }

    pub fn build(self) -> SimulationRequest {
        SimulationRequest::new(&self.metal, self.target_temp_c, self.ambient_temp_c, self.geometry)
            .with_layers(self.layers)
            .with_convection(self.convection_coeff_w_m2k)
    }
}

// ==========================================
// SimulationInput 构建器 (API 层)
// ==========================================

pub struct InputBuilder {
    input: SimulationInput,
}

impl InputBuilder {
    pub fn new(metal: &str) -> Self {
        Self {
            input: SimulationInput {
                metal: metal.to_string(),
                target_temp_c: 1600.0,
                ambient_temp_c: 25.0,
                convection_coeff_w_m2k: None,
                geometry: GeometryInput::flat(1.0),
                layers: Vec::new(),
            },
        }
    }

    pub fn temps(mut self, target_temp_c: f64, ambient_temp_c: f64) -> Self {
        self.input.target_temp_c = target_temp_c;
        self.input.ambient_temp_c = ambient_temp_c;
        self
    }

    pub fn geometry(mut self, geometry: GeometryInput) -> Self {
        self.input.geometry = geometry;
        self
    }

    pub fn catalog_layer(mut self, material: &str, thickness_mm: f64) -> Self {
        self.input.layers.push(LayerInput::from_catalog(material, thickness_mm));
        self
    }

    pub fn explicit_layer(mut self, material: &str, thickness_mm: f64, lambda: f64) -> Self {
        self.input
            .layers
            .push(LayerInput::explicit(material, thickness_mm, lambda, 2400.0, 800.0));
        self
    }

    pub fn build(self) -> SimulationInput {
        self.input
    }
}
