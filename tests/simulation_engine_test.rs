// ==========================================
// LiningSimulator 集成测试
// ==========================================
// 测试目标: 典型工况数值、剖面性质、几何一致性、错误种类
// ==========================================

mod helpers;

use helpers::lining_builder::RequestBuilder;
use molty_lining::domain::{FreezeFront, Layer, SimulationResult};
use molty_lining::engine::{EngineError, EngineErrorKind, LiningSimulator};
use molty_lining::{EngineConfig, SafetyReasonCode, SafetyStatus};

fn nominal() -> LiningSimulator {
    LiningSimulator::new(EngineConfig::nominal()).unwrap()
}

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} ± {}, got {}",
        expected,
        tolerance,
        actual
    );
}

fn assert_non_increasing(result: &SimulationResult) {
    assert!(result.heat_flux_w_m2 > 0.0);
    for pair in result.temperature_profile.windows(2) {
        assert!(
            pair[1].temp_c <= pair[0].temp_c,
            "profile rises at {} mm: {} -> {}",
            pair[1].position_mm,
            pair[0].temp_c,
            pair[1].temp_c
        );
        assert!(pair[1].position_mm > pair[0].position_mm);
    }
}

// ==========================================
// 典型工况
// ==========================================

#[test]
fn test_flat_wall_single_pass() {
    let request = RequestBuilder::flat().temps(1200.0, 25.0).furnace_wall().build();
    let result = nominal().simulate(&request, None).unwrap();

    let resistances: Vec<f64> = result.layer_results.iter().map(|l| l.resistance_k_w).collect();
    assert_close(resistances[0], 0.065714, 1e-6);
    assert_close(resistances[1], 0.083333, 1e-6);
    assert_close(resistances[2], 0.333333, 1e-6);
    assert_close(result.film_resistance_k_w, 0.1, 1e-12);
    assert_close(result.total_resistance_k_w, 0.582381, 1e-6);
    assert_close(result.heat_flux_w_m2, 2017.58, 0.01);

    let expected = [1200.0, 1067.42, 899.29, 226.76];
    for (point, want) in result.temperature_profile.iter().zip(expected.iter()) {
        assert_close(point.temp_c, *want, 0.01);
    }
    assert_close(result.shell_temp_c - result.heat_flux_w_m2 * 0.1, 25.0, 1e-6);
}

#[test]
fn test_cylinder_mass_check() {
    let request = RequestBuilder::cylinder(1.0, 1000.0)
        .layer_with(Layer::new("Work lining", 100.0, 2.0, 2500.0, 900.0))
        .build();
    let result = nominal().simulate(&request, None).unwrap();

    let layer = &result.layer_results[0];
    assert_close(layer.inner_radius_mm.unwrap(), 500.0, 1e-9);
    assert_close(layer.outer_radius_mm.unwrap(), 600.0, 1e-9);
    assert_close(layer.volume_m3, std::f64::consts::PI * (0.36 - 0.25), 1e-9);
    assert_close(layer.mass_kg, 864.0, 0.1);
    assert_close(result.total_mass_kg, layer.mass_kg, 1e-9);
    // 864 kg × 900 / t
    assert_close(result.total_cost, layer.mass_kg / 1000.0 * 900.0, 1e-9);
}

#[test]
fn test_freeze_depth_interpolation() {
    let request = RequestBuilder::flat()
        .metal("Cast iron")
        .temps(1200.0, 1000.0)
        .layer("Caldercast 155AL", 40.0, 0.4)
        .build();
    let result = nominal().simulate(&request, Some(1150.0)).unwrap();

    assert_close(result.temperature_profile[1].temp_c, 1100.0, 1e-9);
    assert_close(result.freeze_depth_mm.unwrap(), 20.0, 1e-9);
    assert_eq!(result.freeze_front.layer_index(), Some(0));
}

#[test]
fn test_zero_conductivity_returns_no_result() {
    let request = RequestBuilder::flat()
        .layer("Magnit MK90", 230.0, 3.5)
        .layer("Broken", 50.0, 0.0)
        .build();

    let err = LiningSimulator::default().simulate(&request, Some(1495.0)).unwrap_err();
    assert_eq!(err.kind(), EngineErrorKind::InvalidConductivity);
    match err {
        EngineError::InvalidConductivity { layer_index, layer_name, .. } => {
            assert_eq!(layer_index, 1);
            assert_eq!(layer_name, "Broken");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

// ==========================================
// 剖面性质
// ==========================================

#[test]
fn test_profile_non_increasing() {
    let simulator = LiningSimulator::default();
    let requests = vec![
        RequestBuilder::flat().furnace_wall().build(),
        RequestBuilder::flat().area(3.5).convection(25.0).furnace_wall().build(),
        RequestBuilder::cylinder(3.0, 2400.0).furnace_wall().build(),
        RequestBuilder::cylinder(0.5, 150.0)
            .layer("Insulating brick", 60.0, 0.3)
            .layer("Dense castable", 120.0, 1.6)
            .build(),
    ];

    for request in &requests {
        let result = simulator.simulate(request, Some(1495.0)).unwrap();
        assert_non_increasing(&result);
        assert!(result.converged);
    }
}

#[test]
fn test_rerun_is_identical() {
    molty_lining::logging::init_test();
    let simulator = LiningSimulator::default();
    let request = RequestBuilder::cylinder(3.0, 2400.0).furnace_wall().build();

    let first = simulator.simulate(&request, Some(1495.0)).unwrap();
    let second = simulator.simulate(&request, Some(1495.0)).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_large_cylinder_converges_to_flat_wall() {
    // 内径 100 m，壁厚 150 mm，对比等内表面积平壁
    let inner_radius_m = 50.0;
    let length_m = 1.0;
    let flat_area = 2.0 * std::f64::consts::PI * inner_radius_m * length_m;

    let cylinder = RequestBuilder::cylinder(length_m, inner_radius_m * 2000.0)
        .layer("Dense castable", 100.0, 1.0)
        .layer("Insulation", 50.0, 0.2)
        .build();
    let flat = RequestBuilder::flat()
        .area(flat_area)
        .layer("Dense castable", 100.0, 1.0)
        .layer("Insulation", 50.0, 0.2)
        .build();

    let cyl = nominal().simulate(&cylinder, None).unwrap();
    let wall = nominal().simulate(&flat, None).unwrap();

    let relative = |a: f64, b: f64| ((a - b) / b).abs();
    assert!(relative(cyl.heat_flux_w_m2, wall.heat_flux_w_m2) < 5e-3);
    for (c, f) in cyl.layer_results.iter().zip(wall.layer_results.iter()) {
        assert!(relative(c.volume_m3, f.volume_m3) < 5e-3);
        assert!(relative(c.areal_resistance_m2k_w, f.areal_resistance_m2k_w) < 5e-3);
    }
    for (c, f) in cyl.temperature_profile.iter().zip(wall.temperature_profile.iter()) {
        assert_close(c.temp_c, f.temp_c, 2.0);
    }
}

#[test]
fn test_freeze_depth_monotonic_in_thickness() {
    let mut previous = 0.0;
    for thickness_mm in [150.0, 200.0, 230.0, 300.0, 400.0] {
        let request = RequestBuilder::flat()
            .temps(1200.0, 25.0)
            .layer("Magnit MK90", thickness_mm, 3.5)
            .layer("Caldercast 155AL", 100.0, 1.2)
            .layer("Izolacija", 50.0, 0.15)
            .build();
        let result = nominal().simulate(&request, Some(1100.0)).unwrap();
        let depth = result.freeze_depth_mm.unwrap();
        assert!(depth >= previous, "depth {} < {} at {} mm", depth, previous, thickness_mm);
        previous = depth;
    }
}

// ==========================================
// 安全判定
// ==========================================

#[test]
fn test_safety_levels() {
    let simulator = nominal();
    let request = RequestBuilder::flat().temps(1200.0, 25.0).furnace_wall().build();

    let safe = simulator.simulate(&request, Some(1100.0)).unwrap();
    assert_eq!(safe.safety_status, SafetyStatus::Safe);
    assert!(safe.safety_reasons.iter().any(|r| r.code == SafetyReasonCode::FrontContained));

    // 壳体 226.76 °C < 300 °C，前沿落入隔热层
    let warning = simulator.simulate(&request, Some(500.0)).unwrap();
    assert_eq!(warning.safety_status, SafetyStatus::Warning);
    assert_eq!(warning.safety_reasons.len(), 1);

    let hot = RequestBuilder::flat().temps(1600.0, 1400.0).layer("Thin", 20.0, 30.0).build();
    let critical = simulator.simulate(&hot, Some(1495.0)).unwrap();
    assert_eq!(critical.freeze_front, FreezeFront::NotFound);
    assert_eq!(critical.safety_status, SafetyStatus::Critical);
    assert!(critical
        .safety_reasons
        .iter()
        .any(|r| r.code == SafetyReasonCode::ShellOverTemperature));
}

#[test]
fn test_service_temperature_exceeded() {
    let request = RequestBuilder::flat()
        .temps(1200.0, 25.0)
        .layer_with(Layer::new("Magnit MK90", 230.0, 3.5, 2950.0, 1200.0).with_max_service_temp(1700.0))
        .layer_with(Layer::new("Caldercast 155AL", 100.0, 1.2, 2450.0, 950.0).with_max_service_temp(1000.0))
        .layer("Izolacija", 50.0, 0.15)
        .build();

    let result = nominal().simulate(&request, Some(1100.0)).unwrap();
    assert_eq!(result.safety_status, SafetyStatus::Warning);
    let exceeded: Vec<_> = result
        .safety_reasons
        .iter()
        .filter(|r| r.code == SafetyReasonCode::ServiceTempExceeded)
        .collect();
    assert_eq!(exceeded.len(), 1);
    assert_eq!(exceeded[0].layer_index, Some(1));
}

#[test]
fn test_hot_face_below_liquidus() {
    let request = RequestBuilder::flat().temps(1200.0, 25.0).furnace_wall().build();
    let result = nominal().simulate(&request, Some(1495.0)).unwrap();
    assert_eq!(result.freeze_front, FreezeFront::AtHotFace);
    assert_eq!(result.freeze_depth_mm, Some(0.0));
    assert_eq!(result.safety_status, SafetyStatus::Safe);
}

// ==========================================
// 错误种类
// ==========================================

#[test]
fn test_every_engine_error_kind() {
    let simulator = nominal();

    let empty = RequestBuilder::flat().build();
    assert_eq!(
        simulator.simulate(&empty, None).unwrap_err().kind(),
        EngineErrorKind::EmptyLayerSequence
    );

    let zero_area = RequestBuilder::flat().area(0.0).layer("A", 100.0, 1.0).build();
    assert_eq!(
        simulator.simulate(&zero_area, None).unwrap_err().kind(),
        EngineErrorKind::InvalidGeometry
    );

    let zero_thickness = RequestBuilder::flat().layer("A", 100.0, 1.0).layer("B", 0.0, 1.0).build();
    match simulator.simulate(&zero_thickness, None).unwrap_err() {
        EngineError::InvalidGeometry { field, .. } => assert_eq!(field, "layers[1].thickness_mm"),
        other => panic!("unexpected error: {:?}", other),
    }

    let negative_density = RequestBuilder::flat()
        .layer_with(Layer::new("A", 100.0, 1.0, -1.0, 800.0))
        .build();
    assert_eq!(
        simulator.simulate(&negative_density, None).unwrap_err().kind(),
        EngineErrorKind::InvalidLayer
    );

    let no_convection = RequestBuilder::flat().convection(0.0).layer("A", 100.0, 1.0).build();
    assert_eq!(
        simulator.simulate(&no_convection, None).unwrap_err().kind(),
        EngineErrorKind::InvalidProcessParameter
    );

    // t/(λA) 溢出为无穷大
    let overflow = RequestBuilder::flat().layer("A", 1e300, 1e-300).build();
    assert_eq!(
        simulator.simulate(&overflow, None).unwrap_err().kind(),
        EngineErrorKind::InvalidResistance
    );
}

#[test]
fn test_zero_iteration_config_never_reaches_solver() {
    let config = EngineConfig {
        max_iterations: 0,
        ..EngineConfig::nominal()
    };
    match LiningSimulator::new(config) {
        Err(EngineError::InvalidConfig(message)) => assert!(message.contains("max_iterations")),
        other => panic!("unexpected result: {:?}", other),
    }
}
