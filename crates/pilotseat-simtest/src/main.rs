//! PilotSeat Headless Flight Harness
//!
//! Validates flight logic and catalog data without a browser host.
//! Runs entirely in-process: no rendering, no WASM loader, no DOM.
//!
//! Usage:
//!   cargo run -p pilotseat-simtest
//!   cargo run -p pilotseat-simtest -- --verbose
//!   cargo run -p pilotseat-simtest -- --seed 1234 --catalog path/to/planets.json

use pilotseat_logic::config::{validate_config, FlightConfig};
use pilotseat_logic::constants::{defaults, physics};
use pilotseat_logic::pilot_seat::PilotSeat;
use pilotseat_logic::planet::{Atmosphere, PlanetCatalog};
use pilotseat_logic::ship::Ship;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Deserialize;

// ── Reference data (same JSON the web host ships) ───────────────────────
const CATALOG_JSON: &str = include_str!("../../../data/planet_catalog.json");
const SCENARIOS_JSON: &str = include_str!("../../../data/flight_scenarios.json");

const TOLERANCE: f32 = 1e-3;

#[derive(Debug, Deserialize)]
struct Scenario {
    name: String,
    #[serde(default)]
    config: FlightConfig,
    #[serde(default)]
    scanner: bool,
    steps: Vec<ScenarioStep>,
    expect: Expectation,
}

/// Inputs held for `frames` consecutive ticks of `dt` seconds.
#[derive(Debug, Deserialize)]
struct ScenarioStep {
    #[serde(default)]
    thrust: f32,
    #[serde(default)]
    pitch: f32,
    #[serde(default)]
    yaw: f32,
    #[serde(default)]
    roll: f32,
    dt: f32,
    frames: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Expectation {
    speed: Option<f32>,
    speed_at_most: Option<f32>,
    energy: Option<f32>,
    pitch: Option<f32>,
    yaw: Option<f32>,
    nearby: Option<usize>,
    scanned: Option<usize>,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

struct Options {
    verbose: bool,
    seed: u64,
    catalog_path: Option<String>,
}

fn parse_args() -> Options {
    let mut opts = Options {
        verbose: false,
        seed: 42,
        catalog_path: None,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--verbose" => opts.verbose = true,
            "--seed" => {
                if let Some(seed) = args.next().and_then(|s| s.parse().ok()) {
                    opts.seed = seed;
                }
            }
            "--catalog" => opts.catalog_path = args.next(),
            other => eprintln!("ignoring unknown argument: {}", other),
        }
    }
    opts
}

fn main() {
    let opts = parse_args();
    println!("=== PilotSeat Flight Harness ===\n");

    let mut results = Vec::new();

    // 1. Planet catalog data
    let catalog = load_catalog(&opts, &mut results).unwrap_or_else(PlanetCatalog::reference);
    results.extend(validate_catalog(
        &catalog,
        opts.catalog_path.is_none(),
        opts.verbose,
    ));

    // 2. Flight config
    results.extend(validate_flight_config(opts.verbose));

    // 3. Scripted flights
    results.extend(run_scenarios(opts.verbose));

    // 4. Scanner behavior
    results.extend(validate_scanner(&catalog, opts.verbose));

    // 5. Pilot session lifecycle
    results.extend(validate_session(&catalog, opts.verbose));

    // 6. Randomized input sweep
    results.extend(random_sweep(&catalog, opts.seed, opts.verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || opts.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() <= TOLERANCE
}

// ── 1. Planet Catalog ───────────────────────────────────────────────────

fn load_catalog(opts: &Options, results: &mut Vec<TestResult>) -> Option<PlanetCatalog> {
    println!("--- Planet Catalog ---");

    let (source, json) = match &opts.catalog_path {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(text) => (path.clone(), text),
            Err(e) => {
                results.push(TestResult {
                    name: "catalog_read".into(),
                    passed: false,
                    detail: format!("{}: {}", path, e),
                });
                return None;
            }
        },
        None => ("data/planet_catalog.json".to_string(), CATALOG_JSON.to_string()),
    };

    match PlanetCatalog::from_json(&json) {
        Ok(catalog) => {
            results.push(TestResult {
                name: "catalog_parse".into(),
                passed: true,
                detail: format!("{} planets loaded from {}", catalog.len(), source),
            });
            Some(catalog)
        }
        Err(e) => {
            results.push(TestResult {
                name: "catalog_parse".into(),
                passed: false,
                detail: e.to_string(),
            });
            None
        }
    }
}

fn validate_catalog(
    catalog: &PlanetCatalog,
    check_reference: bool,
    verbose: bool,
) -> Vec<TestResult> {
    let mut results = Vec::new();
    if check_reference {
        results.push(compare_with_reference(catalog));
    }

    // Every atmosphere class is represented
    let classes = [
        Atmosphere::None,
        Atmosphere::Thin,
        Atmosphere::Breathable,
        Atmosphere::Toxic,
    ];
    let missing: Vec<&str> = classes
        .iter()
        .filter(|a| !catalog.iter().any(|(_, p)| p.atmosphere == **a))
        .map(|a| a.label())
        .collect();
    results.push(TestResult {
        name: "catalog_atmosphere_coverage".into(),
        passed: missing.is_empty(),
        detail: if missing.is_empty() {
            "all atmosphere classes present".into()
        } else {
            format!("missing: {}", missing.join(", "))
        },
    });

    // At least one destination worth flying to
    let habitable = catalog.iter().filter(|(_, p)| p.is_habitable()).count();
    results.push(TestResult {
        name: "catalog_has_habitable".into(),
        passed: habitable > 0,
        detail: format!("{} habitable planets", habitable),
    });

    if verbose {
        println!("  Catalog:");
        for (id, p) in catalog.iter() {
            println!(
                "    {:>3} {:18} {:5.1} AU  {:7.1} °C  {:10}  richness {:3}",
                id.to_string(),
                p.name,
                p.distance_au,
                p.surface_temp_celsius(),
                p.atmosphere_label(),
                p.resource_richness
            );
        }
    }

    results
}

/// Shipped data agrees with the built-in table.
fn compare_with_reference(catalog: &PlanetCatalog) -> TestResult {
    let reference = PlanetCatalog::reference();
    let mismatched: Vec<&str> = reference
        .iter()
        .filter(|(_, r)| match catalog.find_by_name(&r.name) {
            Some((_, p)) => {
                !(close(p.distance_au, r.distance_au)
                    && close(p.radius_km, r.radius_km)
                    && close(p.surface_temp_k, r.surface_temp_k)
                    && close(p.gravity_g, r.gravity_g)
                    && close(p.rotation_period_h, r.rotation_period_h)
                    && p.atmosphere == r.atmosphere
                    && p.has_water == r.has_water
                    && p.has_life == r.has_life
                    && p.resource_richness == r.resource_richness)
            }
            None => true,
        })
        .map(|(_, r)| r.name.as_str())
        .collect();

    TestResult {
        name: "catalog_matches_reference".into(),
        passed: mismatched.is_empty() && catalog.len() == reference.len(),
        detail: if mismatched.is_empty() {
            format!("{} records agree with built-in table", catalog.len())
        } else {
            format!("differs from built-in table: {}", mismatched.join(", "))
        },
    }
}

// ── 2. Flight Config ────────────────────────────────────────────────────

fn validate_flight_config(verbose: bool) -> Vec<TestResult> {
    println!("--- Flight Config ---");
    let mut results = Vec::new();

    let errors = validate_config(&FlightConfig::default());
    results.push(TestResult {
        name: "config_default_valid".into(),
        passed: errors.is_empty(),
        detail: format!("{} validation errors", errors.len()),
    });

    let broken = FlightConfig {
        max_speed: 0.0,
        scanner_range: -1.0,
        initial_energy: 120.0,
        ..FlightConfig::default()
    };
    let errors = validate_config(&broken);
    results.push(TestResult {
        name: "config_broken_rejected".into(),
        passed: errors.len() == 3,
        detail: errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; "),
    });

    if verbose {
        let d = FlightConfig::default();
        println!(
            "  Defaults: max_speed={} accel={} turn={}°/s regen={}/s range={}",
            d.max_speed, d.acceleration, d.angular_rate, d.energy_regen_rate, d.scanner_range
        );
    }

    let ship = Ship::default();
    results.push(TestResult {
        name: "config_ship_defaults".into(),
        passed: ship.energy() == defaults::ENERGY
            && ship.scanner_range() == defaults::SCANNER_RANGE
            && ship.speed() == 0.0,
        detail: format!(
            "energy={} range={} speed={}",
            ship.energy(),
            ship.scanner_range(),
            ship.speed()
        ),
    });

    results
}

// ── 3. Scripted Flights ─────────────────────────────────────────────────

fn run_scenarios(verbose: bool) -> Vec<TestResult> {
    println!("--- Scripted Flights ---");
    let mut results = Vec::new();

    let scenarios: Vec<Scenario> = match serde_json::from_str(SCENARIOS_JSON) {
        Ok(s) => s,
        Err(e) => {
            results.push(TestResult {
                name: "scenarios_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return results;
        }
    };

    for scenario in &scenarios {
        results.push(run_scenario(scenario, verbose));
    }

    results
}

fn run_scenario(scenario: &Scenario, verbose: bool) -> TestResult {
    let config_errors = validate_config(&scenario.config);
    if !config_errors.is_empty() {
        return TestResult {
            name: format!("scenario_{}", scenario.name),
            passed: false,
            detail: format!("invalid config: {:?}", config_errors),
        };
    }

    let mut seat = PilotSeat::new(
        Ship::new(scenario.config.clone()),
        PlanetCatalog::reference(),
    );
    seat.activate();
    if scenario.scanner {
        seat.toggle_scanner();
    }

    for step in &scenario.steps {
        seat.set_thrust(step.thrust);
        seat.set_pitch(step.pitch);
        seat.set_yaw(step.yaw);
        seat.set_roll(step.roll);
        for _ in 0..step.frames {
            seat.tick(step.dt);
        }
    }

    let t = seat.telemetry();
    let nearby = seat.nearby_planets().len();
    let scanned = seat.scanned_planets().len();
    let exp = &scenario.expect;

    let mut failures = Vec::new();
    let mut check_f32 = |label: &str, want: Option<f32>, got: f32| {
        if let Some(want) = want {
            if !close(want, got) {
                failures.push(format!("{} expected {} got {}", label, want, got));
            }
        }
    };
    check_f32("speed", exp.speed, t.speed);
    check_f32("energy", exp.energy, t.energy);
    check_f32("pitch", exp.pitch, t.orientation.pitch);
    check_f32("yaw", exp.yaw, t.orientation.yaw);
    if let Some(cap) = exp.speed_at_most {
        if t.speed > cap {
            failures.push(format!("speed {} above {}", t.speed, cap));
        }
    }
    for (label, want, got) in [("nearby", exp.nearby, nearby), ("scanned", exp.scanned, scanned)] {
        if let Some(want) = want {
            if want != got {
                failures.push(format!("{} expected {} got {}", label, want, got));
            }
        }
    }

    if verbose {
        println!(
            "  {}: speed={:.3} energy={:.3} pitch={:.1} yaw={:.1} nearby={}",
            scenario.name, t.speed, t.energy, t.orientation.pitch, t.orientation.yaw, nearby
        );
    }

    TestResult {
        name: format!("scenario_{}", scenario.name),
        passed: failures.is_empty(),
        detail: if failures.is_empty() {
            "telemetry matches".into()
        } else {
            failures.join("; ")
        },
    }
}

// ── 4. Scanner ──────────────────────────────────────────────────────────

fn validate_scanner(catalog: &PlanetCatalog, verbose: bool) -> Vec<TestResult> {
    println!("--- Scanner ---");
    let mut results = Vec::new();

    // Expected nearby count straight from the data
    let mut ship = Ship::default();
    let expected = catalog
        .iter()
        .filter(|(_, p)| p.distance_au * physics::SCAN_UNITS_PER_AU <= ship.scanner_range())
        .count();
    ship.scan(catalog);
    results.push(TestResult {
        name: "scanner_default_range".into(),
        passed: ship.nearby().len() == expected,
        detail: format!("{} of {} planets in range", ship.nearby().len(), catalog.len()),
    });

    // Narrowing the range shrinks nearby but never the history
    let history = ship.scanned().len();
    ship.set_scanner_range(100.0);
    ship.scan(catalog);
    results.push(TestResult {
        name: "scanner_history_persists".into(),
        passed: ship.scanned().len() == history && ship.nearby().len() < history,
        detail: format!(
            "nearby={} scanned={} (was {})",
            ship.nearby().len(),
            ship.scanned().len(),
            history
        ),
    });

    // Repeat scans are stable
    let first = ship.nearby().clone();
    ship.scan(catalog);
    if verbose {
        println!("  In range at {:.0}:", ship.scanner_range());
        for id in ship.nearby() {
            if let Some(p) = catalog.get(*id) {
                println!(
                    "    {:>3} {:18} {:7.1}",
                    id.to_string(),
                    p.name,
                    p.distance_au * physics::SCAN_UNITS_PER_AU
                );
            }
        }
    }
    results.push(TestResult {
        name: "scanner_idempotent".into(),
        passed: ship.nearby() == &first,
        detail: "repeat scan yields the same nearby set".into(),
    });

    // Empty catalog
    ship.scan(&PlanetCatalog::default());
    results.push(TestResult {
        name: "scanner_empty_catalog".into(),
        passed: ship.nearby().is_empty() && ship.scanned().len() == history,
        detail: format!("nearby={} scanned={}", ship.nearby().len(), ship.scanned().len()),
    });

    results
}

// ── 5. Pilot Session ────────────────────────────────────────────────────

fn validate_session(catalog: &PlanetCatalog, verbose: bool) -> Vec<TestResult> {
    println!("--- Pilot Session ---");
    let mut results = Vec::new();

    let mut seat = PilotSeat::new(Ship::default(), catalog.clone());
    seat.activate();
    seat.set_thrust(1.0);
    seat.toggle_scanner();
    for _ in 0..30 {
        seat.tick(1.0 / 30.0);
    }
    seat.deactivate();
    let frozen = seat.telemetry();
    if verbose {
        println!(
            "  After 1s burn: speed={:.3} energy={:.3} pos=({:.2}, {:.2}, {:.2}) scanned={}",
            frozen.speed,
            frozen.energy,
            frozen.position.x,
            frozen.position.y,
            frozen.position.z,
            seat.scanned_planets().len()
        );
    }
    for _ in 0..30 {
        seat.tick(1.0 / 30.0);
    }
    results.push(TestResult {
        name: "session_deactivate_freezes".into(),
        passed: seat.telemetry() == frozen,
        detail: format!("speed held at {:.3}", frozen.speed),
    });

    let selectable = catalog.iter().next().map(|(id, _)| id);
    let selected = selectable.map(|id| seat.select_planet(id)).unwrap_or(false);
    seat.activate();
    results.push(TestResult {
        name: "session_activate_resets".into(),
        passed: selected
            && seat.selected_id().is_none()
            && !seat.scanner_visible()
            && seat.inputs().thrust == 0.0
            && seat.telemetry() == frozen,
        detail: "inputs, scanner and selection cleared; ship untouched".into(),
    });

    results
}

// ── 6. Randomized Sweep ─────────────────────────────────────────────────

fn random_sweep(catalog: &PlanetCatalog, seed: u64, verbose: bool) -> Vec<TestResult> {
    println!("--- Randomized Sweep (seed {}) ---", seed);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut seat = PilotSeat::new(Ship::default(), catalog.clone());
    seat.activate();

    let frames = 20_000;
    let mut energy_violations = 0;
    let mut speed_violations = 0;
    let mut attitude_violations = 0;
    let mut peak_speed = 0.0f32;

    for _ in 0..frames {
        if rng.gen_bool(0.05) {
            seat.set_thrust(rng.gen_range(-0.5..1.5));
            seat.set_pitch(rng.gen_range(-2.0..2.0));
            seat.set_yaw(rng.gen_range(-2.0..2.0));
            seat.set_roll(rng.gen_range(-2.0..2.0));
        }
        if rng.gen_bool(0.01) {
            seat.toggle_scanner();
        }
        seat.tick(rng.gen_range(0.0..0.1));

        let t = seat.telemetry();
        if !(0.0..=100.0).contains(&t.energy) {
            energy_violations += 1;
        }
        if t.speed > seat.ship().config().max_speed + TOLERANCE {
            speed_violations += 1;
        }
        if !(-90.0..=90.0).contains(&t.orientation.pitch)
            || !(0.0..360.0).contains(&t.orientation.yaw)
        {
            attitude_violations += 1;
        }
        peak_speed = peak_speed.max(t.speed);
    }

    if verbose {
        println!(
            "  {} frames, peak speed {:.2}, scanned {} planets",
            frames,
            peak_speed,
            seat.scanned_planets().len()
        );
    }

    vec![
        TestResult {
            name: "sweep_energy_in_range".into(),
            passed: energy_violations == 0,
            detail: format!("{} violations over {} frames", energy_violations, frames),
        },
        TestResult {
            name: "sweep_speed_capped".into(),
            passed: speed_violations == 0,
            detail: format!("{} violations, peak {:.3}", speed_violations, peak_speed),
        },
        TestResult {
            name: "sweep_attitude_in_range".into(),
            passed: attitude_violations == 0,
            detail: format!("{} violations over {} frames", attitude_violations, frames),
        },
    ]
}
