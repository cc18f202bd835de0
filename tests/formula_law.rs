//! Custom force formulas driving the engine

use orbitdrift::config::SimulationConfig;
use orbitdrift::physics::math::{Scalar, Vector};
use orbitdrift::physics::units::{GRAVITATIONAL_CONSTANT, SUN_MASS};
use orbitdrift::physics::{BodyId, FormulaError, SimulationEngine};

const HOUR: Scalar = 3600.0;

fn earth_only() -> (SimulationEngine, BodyId) {
    let mut config = SimulationConfig::default();
    config.trails.min_point_distance = 1.0;
    let mut engine = SimulationEngine::new(&config);
    let earth = engine
        .create_body("Earth", 5.972e24, 1.496e8, 0.0, 0.0)
        .unwrap();
    (engine, earth)
}

#[test]
fn zero_force_moves_in_a_straight_line() {
    let (mut engine, earth) = earth_only();
    engine.set_formula("0").unwrap();

    let start = engine.snapshot(earth).unwrap();
    assert_eq!(start.velocity, Vector::ZERO);
    for _ in 0..1_000 {
        engine.step(HOUR);
    }
    let end = engine.snapshot(earth).unwrap();
    assert_eq!(end.velocity, start.velocity);
    assert_eq!(end.position, start.position);
}

#[test]
fn alias_spelling_matches_built_in_law() {
    let (mut reference, reference_id) = earth_only();
    let (mut custom, custom_id) = earth_only();
    custom
        .set_formula("G * centralMass * mass / distance^2")
        .unwrap();

    for _ in 0..500 {
        reference.step(HOUR);
        custom.step(HOUR);
    }

    let expected = reference.snapshot(reference_id).unwrap().position;
    let actual = custom.snapshot(custom_id).unwrap().position;
    assert!((actual - expected).length() / expected.length() < 1e-9);
}

#[test]
fn stronger_law_gives_faster_orbit() {
    let (mut engine, earth) = earth_only();
    engine.set_formula("4 * G * m1 * m2 / r^2").unwrap();

    let speed = engine.snapshot(earth).unwrap().speed();
    let newtonian = (GRAVITATIONAL_CONSTANT * SUN_MASS / 1.496e11).sqrt();
    assert!((speed / newtonian - 2.0).abs() < 1e-12);
}

#[test]
fn negative_formula_still_attracts() {
    let (mut engine, earth) = earth_only();
    engine.set_formula("-G * m1 * m2 / r^2").unwrap();

    let start = engine.snapshot(earth).unwrap();
    engine.step(HOUR);
    let end = engine.snapshot(earth).unwrap();

    // Velocity gained a component toward the center (−x from +x)
    assert!(end.velocity.x < 0.0);
    assert!((end.speed() - start.speed()).abs() / start.speed() < 1e-3);
}

#[test]
fn evaluation_fault_means_no_force() {
    let (mut engine, earth) = earth_only();
    engine.set_formula("G * m1 * m2 / (r - r)").unwrap();

    let start = engine.snapshot(earth).unwrap();
    assert_eq!(start.velocity, Vector::ZERO);
    for _ in 0..10 {
        engine.step(HOUR);
    }
    assert_eq!(engine.snapshot(earth).unwrap().position, start.position);
}

#[test]
fn invalid_formula_is_rejected_and_state_kept() {
    let (mut engine, earth) = earth_only();
    for _ in 0..10 {
        engine.step(HOUR);
    }
    let before = engine.snapshot(earth).unwrap();
    assert!(before.trail_len > 0);

    for (text, expected) in [
        ("", FormulaError::Empty),
        ("G * m1 *", FormulaError::UnexpectedEnd),
        (
            "G * mass_of_sun",
            FormulaError::UnknownVariable {
                name: "mass_of_sun".into(),
                position: 4,
            },
        ),
        (
            "pow(r)",
            FormulaError::WrongArity {
                function: "pow".into(),
                expected: 2,
                found: 1,
            },
        ),
    ] {
        assert_eq!(engine.set_formula(text), Err(expected), "formula {text:?}");
        assert_eq!(engine.formula(), "G * m1 * m2 / r^2");
        assert_eq!(engine.snapshot(earth).unwrap(), before);
    }
}

#[test]
fn valid_formula_clears_every_trail() {
    let mut config = SimulationConfig::default();
    config.trails.min_point_distance = 1.0;
    let mut engine = SimulationEngine::from_config(&config);
    for _ in 0..3 {
        engine.step(HOUR);
    }
    assert!(engine.snapshots().iter().all(|s| s.trail_len > 0));

    engine.set_formula("G * m1 * m2 / r^2.05").unwrap();
    assert_eq!(engine.formula(), "G * m1 * m2 / r^2.05");
    assert!(engine.snapshots().iter().all(|s| s.trail_len == 0));
    for snapshot in engine.snapshots() {
        let offset = snapshot.distance_from_center_km() - snapshot.nominal_distance_km;
        assert!(offset.abs() / snapshot.nominal_distance_km < 1e-3);
    }
}

#[test]
fn deeply_nested_formula_is_rejected() {
    let (mut engine, earth) = earth_only();
    engine.step(HOUR);
    let before = engine.snapshot(earth).unwrap();

    for depth in [1_000, 10_000, 100_000] {
        let text = format!("{}r{}", "(".repeat(depth), ")".repeat(depth));
        let result = engine.set_formula(&text);
        assert!(
            matches!(
                result,
                Err(FormulaError::TooDeep { .. } | FormulaError::TooLong { .. })
            ),
            "depth {depth} gave {result:?}"
        );
        assert_eq!(engine.formula(), "G * m1 * m2 / r^2");
        assert_eq!(engine.snapshot(earth).unwrap(), before);
    }

    let signs = format!("{}G * m1 * m2 / r^2", "-".repeat(1_000));
    assert!(matches!(
        engine.set_formula(&signs),
        Err(FormulaError::TooDeep { .. })
    ));
    assert_eq!(engine.formula(), "G * m1 * m2 / r^2");
}

#[test]
fn juxtaposed_operands_multiply() {
    let (mut explicit, explicit_id) = earth_only();
    let (mut implicit, implicit_id) = earth_only();
    explicit.set_formula("2 * G * m1 * m2 / r^2").unwrap();
    implicit.set_formula("2G m1 m2 / r^2").unwrap();

    for _ in 0..100 {
        explicit.step(HOUR);
        implicit.step(HOUR);
    }

    assert_eq!(
        implicit.snapshot(implicit_id).unwrap().position,
        explicit.snapshot(explicit_id).unwrap().position
    );
}
