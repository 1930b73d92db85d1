//! Behavioural properties of the forest fire simulation
//!
//! State-space conservation, burn countdown, wind bias, the no-cascade guarantee of the
//! double buffer, particle lifetimes, and the ignite/reset scenarios.

use approx::assert_relative_eq;
use forest_fire_core::{
    CellState, FireRules, ForestGrid, Particle, ParticleKind, Rgba, Simulation,
    SimulationConfig, SimulationError, Vec2, WindField,
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Config with spontaneous growth and lightning switched off
fn still_config(seed: u64) -> SimulationConfig {
    SimulationConfig {
        seed: Some(seed),
        fire: FireRules {
            growth_probability: 0.0,
            lightning_probability: 0.0,
            ..FireRules::default()
        },
        ..SimulationConfig::default()
    }
}

fn assert_invariants(sim: &Simulation) {
    let cells = sim.cells();
    for (&state, &burn) in cells.states().iter().zip(cells.burn_remaining()) {
        assert!(CellState::ALL.contains(&state));
        assert_eq!(
            burn > 0,
            state == CellState::Burning,
            "burn countdown {burn} on a {state:?} cell"
        );
    }
}

#[test]
fn test_state_space_conserved_under_heavy_activity() {
    init_tracing();
    let config = SimulationConfig {
        seed: Some(17),
        fire: FireRules {
            growth_probability: 0.05,
            lightning_probability: 0.001,
            fire_spread_probability: 0.4,
            burn_time: 5,
            regrowth_from_ash_factor: 5.0,
        },
        ..SimulationConfig::default()
    };
    let mut sim = Simulation::new(config).unwrap();

    for tick in 0..200 {
        let direction = (tick * 7) as f32;
        sim.tick(direction, 10.0);
        assert_invariants(&sim);
        assert_eq!(sim.stats().total_cells(), 80 * 80);
    }
}

#[test]
fn test_burn_countdown_decreases_by_one() {
    init_tracing();
    let mut sim = Simulation::new(still_config(3)).unwrap();
    let (x, y) = loop {
        if let Some(cell) = sim.ignite_random() {
            break cell;
        }
    };

    for expected in (290..300).rev() {
        sim.tick(0.0, 0.0);
        assert_eq!(sim.cell_state(x, y).unwrap(), CellState::Burning);
        assert_eq!(sim.burn_remaining(x, y).unwrap(), expected);
    }
}

#[test]
fn test_last_tick_of_burning_turns_to_ash() {
    init_tracing();
    let config = SimulationConfig {
        fire: FireRules {
            burn_time: 1,
            fire_spread_probability: 0.0,
            ..still_config(0).fire
        },
        ..still_config(0)
    };
    let grid = ForestGrid::from_states(3, 3, &[CellState::Tree; 9], 1).unwrap();
    let mut sim = Simulation::with_grid(config, grid).unwrap();

    assert!(sim.ignite_at(1, 1).unwrap());
    assert_eq!(sim.burn_remaining(1, 1).unwrap(), 1);

    let result = sim.tick(0.0, 0.0);
    assert_eq!(result.report.grid.burned_out, 1);
    assert_eq!(sim.cell_state(1, 1).unwrap(), CellState::Burnt);
    assert_eq!(sim.burn_remaining(1, 1).unwrap(), 0);
}

#[test]
fn test_wind_bias_symmetry() {
    let calm = WindField::new(137.0, 0.0, 10.0);
    for dy in -1..=1 {
        for dx in -1..=1 {
            if (dx, dy) != (0, 0) {
                assert_eq!(calm.spread_multiplier(dx, dy), 1.0);
            }
        }
    }

    // Wind blowing down the grid (180°): (0, 1) is downwind, (0, -1) upwind
    let wind = WindField::new(180.0, 4.0, 10.0);
    let downwind = wind.spread_multiplier(0, 1);
    let upwind = wind.spread_multiplier(0, -1);
    assert!(downwind > upwind);
    assert_relative_eq!(downwind, 1.4, epsilon = 1e-5);
    assert_eq!(upwind, 1.0);
}

#[test]
fn test_strong_wind_pushes_fire_downwind() {
    init_tracing();
    let mut downwind_total = 0usize;
    let mut upwind_total = 0usize;

    for seed in 0..40 {
        let config = SimulationConfig {
            fire: FireRules {
                fire_spread_probability: 0.3,
                ..still_config(seed).fire
            },
            particles: forest_fire_core::ParticleConfig {
                flame_emission_probability: 0.0,
                smoke_emission_probability: 0.0,
                ..Default::default()
            },
            ..still_config(seed)
        };
        let grid = ForestGrid::from_states(3, 1, &[CellState::Tree; 3], 300).unwrap();
        let mut sim = Simulation::with_grid(config, grid).unwrap();
        sim.ignite_at(1, 0).unwrap();

        // Wind toward the right: (2, 0) downwind, (0, 0) upwind
        sim.tick(90.0, 10.0);
        downwind_total += usize::from(sim.cell_state(2, 0).unwrap() == CellState::Burning);
        upwind_total += usize::from(sim.cell_state(0, 0).unwrap() == CellState::Burning);
    }

    // 0.6 vs 0.3 ignition chance over 40 trials
    assert!(
        downwind_total > upwind_total,
        "downwind {downwind_total} vs upwind {upwind_total}"
    );
}

#[test]
fn test_no_same_tick_cascade() {
    init_tracing();
    let config = SimulationConfig {
        fire: FireRules {
            fire_spread_probability: 1.0,
            ..still_config(1).fire
        },
        ..still_config(1)
    };
    let grid = ForestGrid::from_states(9, 9, &[CellState::Tree; 81], 300).unwrap();
    let mut sim = Simulation::with_grid(config, grid).unwrap();
    sim.ignite_at(4, 4).unwrap();

    let result = sim.tick(45.0, 10.0);
    assert_eq!(result.report.grid.spread_ignitions, 8);
    assert_eq!(result.cells.counts().burning, 9);

    for y in 0..9usize {
        for x in 0..9usize {
            let ring = x.abs_diff(4).max(y.abs_diff(4));
            let expected = if ring <= 1 {
                CellState::Burning
            } else {
                CellState::Tree
            };
            assert_eq!(sim.cell_state(x, y).unwrap(), expected, "cell ({x}, {y})");
        }
    }
}

#[test]
fn test_particle_removed_after_exactly_its_life() {
    init_tracing();
    let grid = ForestGrid::empty(4, 4).unwrap();
    let mut sim = Simulation::with_grid(still_config(2), grid).unwrap();
    let mut particles = forest_fire_core::ParticleSystem::new();
    particles.spawn(Particle::new(
        ParticleKind::Smoke,
        Vec2::new(2.0, 2.0),
        Vec2::zeros(),
        3.0,
        7,
        Rgba::new(100, 100, 100, 100),
    ));

    let config = sim.config().particles.clone();
    let mut rng = rand::rng();
    for _ in 0..6 {
        particles.advance(&sim.wind(), &[], &config, &mut rng);
        assert_eq!(particles.len(), 1);
    }
    let report = particles.advance(&sim.wind(), &[], &config, &mut rng);
    assert_eq!(report.expired, 1);
    assert!(particles.is_empty());

    // Nothing is burning, so the simulation never emits
    sim.tick(0.0, 0.0);
    assert!(sim.particles().is_empty());
}

#[test]
fn test_particle_count_balances_every_tick() {
    init_tracing();
    let mut sim = Simulation::new(still_config(23)).unwrap();
    for _ in 0..5 {
        sim.ignite_random();
    }

    let mut previous = sim.particles().len();
    for tick in 0..150 {
        let result = sim.tick(tick as f32 * 3.0, 6.0);
        let report = result.report.particles;
        assert_eq!(
            result.particles.len(),
            previous + report.spawned - report.expired
        );
        assert_eq!(
            report.spawned,
            result.report.grid.flame_emissions + result.report.grid.smoke_emissions
        );
        previous = result.particles.len();
    }
}

#[test]
fn test_end_to_end_single_ignition() {
    init_tracing();
    let config_for = |seed| SimulationConfig {
        fire: FireRules {
            fire_spread_probability: 0.0,
            burn_time: 300,
            ..still_config(seed).fire
        },
        ..still_config(seed)
    };

    // First seed whose forest has a tree at the centre
    let mut sim = (0..)
        .map(|seed| Simulation::new(config_for(seed)).unwrap())
        .find(|sim| sim.cell_state(40, 40).unwrap() == CellState::Tree)
        .unwrap();
    let before = sim.snapshot();

    assert!(sim.ignite_at(40, 40).unwrap());
    let result = sim.tick(90.0, 3.0);
    let flames = result.report.grid.flame_emissions;
    let smokes = result.report.grid.smoke_emissions;
    let particle_count = result.particles.len();
    let smoke_count = result.particles.iter().filter(|p| p.is_smoke()).count();

    assert_eq!(sim.cell_state(40, 40).unwrap(), CellState::Burning);
    assert_eq!(sim.burn_remaining(40, 40).unwrap(), 299);
    assert_eq!(particle_count, flames + smokes);
    assert_eq!(smoke_count, smokes);

    // Every other cell is exactly as it was
    let after = sim.snapshot();
    for y in 0..80 {
        for x in 0..80 {
            if (x, y) != (40, 40) {
                assert_eq!(after.state(x, y), before.state(x, y), "cell ({x}, {y})");
            }
        }
    }
}

#[test]
fn test_reset_restores_seeding_law() {
    init_tracing();
    let mut sim = Simulation::new(SimulationConfig::seeded(31)).unwrap();
    for _ in 0..10 {
        sim.ignite_random();
    }
    for _ in 0..120 {
        sim.tick(270.0, 8.0);
    }
    assert!(!sim.particles().is_empty());

    sim.reset();
    assert!(sim.particles().is_empty());
    assert_eq!(sim.tick_count(), 0);
    assert_invariants(&sim);

    let snapshot = sim.snapshot();
    let density = |min_d: f32, max_d: f32| {
        let mut trees = 0usize;
        let mut cells = 0usize;
        for y in 0..80usize {
            for x in 0..80usize {
                let dx = x as f32 - 40.0;
                let dy = y as f32 - 40.0;
                let d = (dx * dx + dy * dy).sqrt() / 40.0;
                if (min_d..max_d).contains(&d) {
                    cells += 1;
                    trees += usize::from(snapshot.state(x, y) == Some(CellState::Tree));
                }
            }
        }
        trees as f32 / cells as f32
    };

    let stats = sim.stats();
    assert_eq!(stats.burning + stats.burnt, 0);
    assert!(density(0.0, 0.3) > density(0.9, 2.0) + 0.15);
}

#[test]
fn test_out_of_bounds_is_rejected_not_clamped() {
    init_tracing();
    let grid = ForestGrid::from_states(2, 2, &[CellState::Tree; 4], 10).unwrap();
    let mut sim = Simulation::with_grid(still_config(0), grid).unwrap();

    let err = sim.ignite_at(2, 1).unwrap_err();
    assert_eq!(
        err,
        SimulationError::OutOfBounds {
            x: 2,
            y: 1,
            width: 2,
            height: 2
        }
    );
    assert_eq!(sim.stats().burning, 0);
}
