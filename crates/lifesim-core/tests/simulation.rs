//! Multi-tick behavior of a whole world.
//!
//! These tests drive [`World`] through many ticks and check the
//! properties that must hold between ticks, plus the two lifecycle rules
//! that only show up over time: budding and equilibrium.

#![allow(clippy::unwrap_used)]

use lifesim_core::runner::{self, NoOpCallback, RunOptions, SimulationEndReason, StopHandle};
use lifesim_core::{SimulationConfig, World};
use lifesim_types::{BlipId, Position};
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn seeded(config: SimulationConfig, seed: u64) -> World<SmallRng> {
    World::new(config, SmallRng::seed_from_u64(seed)).unwrap()
}

fn plain(rows: usize, cols: usize) -> SimulationConfig {
    SimulationConfig {
        map_height: rows,
        map_width: cols,
        water_height: 0,
        water_width: 0,
        forest_width: 0,
        init_pop: 0,
        ..SimulationConfig::default()
    }
}

#[test]
fn invariants_hold_after_every_tick() {
    let config = SimulationConfig::default();
    let max_res = config.blip.max_res;
    let food_size = config.food_size;
    let mut world = seeded(config, 42);

    for _ in 0..400 {
        let summary = world.tick().unwrap();
        assert!(world.is_consistent(), "registry diverged at tick {}", summary.tick);

        for (blip, position) in world.blips() {
            assert!(blip.reservoir().water() <= max_res);
            assert!(blip.reservoir().food() <= max_res);
            assert!(blip.age() <= blip.max_age(), "{} outlived its span", blip.id());
            assert!(world.grid().contains(position));
        }
        for cell in world.grid().cells() {
            if let Some(level) = cell.food_level() {
                assert!(level <= food_size);
            }
        }

        if world.is_extinct() {
            break;
        }
    }
}

#[test]
fn same_seed_same_history() {
    let mut a = seeded(SimulationConfig::default(), 7);
    let mut b = seeded(SimulationConfig::default(), 7);
    for _ in 0..100 {
        assert_eq!(a.tick().unwrap(), b.tick().unwrap());
    }
    let pa: Vec<_> = a.blips().map(|(blip, p)| (blip.id(), p)).collect();
    let pb: Vec<_> = b.blips().map(|(blip, p)| (blip.id(), p)).collect();
    assert_eq!(pa, pb);
}

#[test]
fn bud_appears_after_budding_time_in_parent_cell() {
    let mut config = plain(5, 5);
    config.blip.min_budding_age = 0;
    config.blip.max_budding_age = 0;
    config.blip.budding_prob = 100;
    config.blip.budding_time = 3;
    config.validate().unwrap();

    let mut world = seeded(config, 1);
    let corner = Position::new(0, 0);
    let parent = world.spawn(corner).unwrap();

    // Tick 1 starts the bud; it detaches three ticks later.
    for tick in 1..=3 {
        let summary = world.tick().unwrap();
        assert_eq!(summary.births, 0, "early bud at tick {tick}");
        assert_eq!(world.population(), 1);
    }
    let summary = world.tick().unwrap();
    assert_eq!(summary.births, 1);
    assert_eq!(world.population(), 2);

    let child = BlipId::new(1);
    assert_eq!(world.position_of(parent), Some(corner));
    assert_eq!(world.position_of(child), Some(corner));

    let newborn = world.blip(child).unwrap();
    assert_eq!(newborn.age(), 0);
    assert_eq!(newborn.reservoir().water(), 300);
    assert_eq!(newborn.reservoir().food(), 300);
    // Corner of a 5x5 grid: distance 4 of 4 from the center.
    assert_eq!(newborn.max_age(), 500);
    assert_eq!(newborn.max_age(), world.lifespan_at(corner));
    assert!(world.is_consistent());
}

/// Every blip lives 20 ticks and leaves exactly one bud on its last tick,
/// so the population never changes and the monitor fires as soon as its
/// 20-tick window is exceeded.
fn steady_state_config() -> SimulationConfig {
    let mut config = SimulationConfig {
        max_life: 20,
        age_var: 0,
        ..SimulationConfig::default()
    };
    config.blip.min_budding_age = 0;
    config.blip.max_budding_age = 0;
    config.blip.budding_prob = 100;
    config.blip.budding_time = 19;
    config.validate().unwrap();
    config
}

#[test]
fn stable_population_is_ended_by_equilibrium() {
    let mut world = seeded(steady_state_config(), 5);

    for tick in 1..=19 {
        let summary = world.tick().unwrap();
        assert_eq!(summary.population, 20, "tick {tick}");
        assert!(!summary.equilibrium);
    }

    // Generation change: every parent buds and dies of old age.
    let summary = world.tick().unwrap();
    assert_eq!(summary.births, 20);
    assert_eq!(summary.deaths.old_age, 20);
    assert_eq!(summary.population, 20);
    assert!(!summary.equilibrium);
    assert!(world.is_consistent());

    let summary = world.tick().unwrap();
    assert_eq!(summary.tick, 21);
    assert!(summary.equilibrium);
    assert!(world.is_extinct());
    assert!(world.grid().cells().all(|c| !c.is_occupied()));
}

#[tokio::test]
async fn runner_reports_equilibrium() {
    let mut world = seeded(steady_state_config(), 5);
    let result = runner::run_simulation(
        &mut world,
        &RunOptions::default(),
        &StopHandle::new(),
        &mut NoOpCallback,
    )
    .await
    .unwrap();
    assert_eq!(result.end_reason, SimulationEndReason::Equilibrium);
    assert_eq!(result.total_ticks, 21);
    assert_eq!(result.peak_population, 20);
}

#[test]
fn tiny_reserves_starve_blips_away_from_supplies() {
    let mut config = plain(4, 4);
    config.init_pop = 6;
    config.blip.max_res = 5;
    let mut world = seeded(config, 3);

    let mut exhausted = 0_u32;
    for _ in 0..10 {
        exhausted = exhausted.saturating_add(world.tick().unwrap().deaths.exhaustion);
        if world.is_extinct() {
            break;
        }
    }
    assert!(world.is_extinct());
    assert_eq!(exhausted, 6);
}
