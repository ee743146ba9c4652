// tests/search_tests.rs
//! Tests voor de zoekstrategieën: geldigheid, monotone verbetering, de
//! 5-cykel- en sterscenario's, en de hulpstructuren (koelschema, tabu-lijst,
//! feromoon, RCL).

mod common;

use approx::assert_relative_eq;
use common::{cycle, is_cover, random_graph, star};
use mvcls::aco::{ant_walk, PheromoneTrail};
use mvcls::anneal::{acceptance_probability, CoolingSchedule};
use mvcls::cover::CoverState;
use mvcls::construct::construct_vc;
use mvcls::engine::{local_search_from, ExchangeMove, MoveOutcome};
use mvcls::error::VcError;
use mvcls::graph::Graph;
use mvcls::grasp::{build_rcl, grasp_construct, grasp_construct_from_seed};
use mvcls::search::SearchClock;
use mvcls::tabu::TabuList;
use mvcls::{run_search, ParentSelection, Params, Strategy};
use rand::{rngs::StdRng, SeedableRng};

/// Korte, begrensde parameters zodat elke strategie snel stopt.
fn quick_params() -> Params {
    let mut p = Params::default()
        .with_cutoff(0.3)
        .with_max_iter(2_000)
        .with_stagnation(200);
    p.generations = 15;
    p.ant_count = 4;
    p.population_size = 8;
    p.memetic_survivors = 2;
    p.memetic_rebuild_seconds = 0.02;
    p.grasp_refine_stagnation = 20;
    p
}

fn assert_strictly_decreasing(sizes: &[usize]) {
    for w in sizes.windows(2) {
        assert!(w[1] < w[0], "verbeteringen niet strikt dalend: {sizes:?}");
    }
}

#[test]
fn test_every_strategy_returns_valid_cover() {
    let p = quick_params();
    for seed in 0..3 {
        let g = random_graph(40, 0.12, seed);
        for strategy in Strategy::ALL {
            let mut rng = StdRng::seed_from_u64(seed);
            let out = run_search(&g, strategy, &p, &mut rng).unwrap();
            assert!(is_cover(&g, &out.cover), "{strategy} gaf geen cover (seed {seed})");
            assert!(out.cover.windows(2).all(|w| w[0] < w[1]), "{strategy}: cover niet gesorteerd");
            assert!(!out.improvements.is_empty(), "{strategy}: geen incumbent vastgelegd");
            assert_eq!(*out.improvements.last().unwrap(), out.size());
            assert_strictly_decreasing(&out.improvements);
            assert!(out.time_to_find >= 0.0);
        }
    }
}

#[test]
fn test_every_strategy_on_edgeless_graph() {
    let p = quick_params().with_cutoff(0.05);
    for g in [Graph::with_vertices(5), Graph::with_vertices(0)] {
        for strategy in Strategy::ALL {
            let mut rng = StdRng::seed_from_u64(1);
            let out = run_search(&g, strategy, &p, &mut rng).unwrap();
            assert!(out.cover.is_empty(), "{strategy} op graaf zonder kanten: {:?}", out.cover);
        }
    }
}

#[test]
fn test_zero_cutoff_returns_construction() {
    let g = random_graph(30, 0.2, 8);
    let p = quick_params().with_cutoff(0.0);
    for strategy in Strategy::ALL {
        let mut rng = StdRng::seed_from_u64(2);
        let out = run_search(&g, strategy, &p, &mut rng).unwrap();
        assert!(is_cover(&g, &out.cover), "{strategy} zonder tijd gaf geen cover");
    }
}

#[test]
fn test_five_cycle_local_search_optimal() {
    let g = cycle(5);
    let p = Params::default().with_cutoff(2.0).with_stagnation(500);
    for seed in 0..5 {
        let start = CoverState::from_vertices(&g, [0, 1, 2, 3]);
        assert!(start.is_valid());
        let mut rng = StdRng::seed_from_u64(seed);
        let out = local_search_from(start, &p, &mut rng);
        assert_eq!(out.improvements[0], 4, "seed {seed}");
        assert_eq!(out.size(), 3, "seed {seed}");
        assert!(is_cover(&g, &out.cover));
    }
}

#[test]
fn test_exchange_move_rolls_back_growth() {
    // Het centrum weghalen dwingt de reparatie alle bladeren toe te voegen
    let g = star(9);
    let mut state = CoverState::from_vertices(&g, [0]);
    let loss_before: Vec<usize> = (0..g.n()).map(|v| state.loss(v)).collect();
    let gain_before: Vec<usize> = (0..g.n()).map(|v| state.gain(v)).collect();
    let p = Params::default();
    let mut rng = StdRng::seed_from_u64(4);

    let outcome = ExchangeMove::new().apply(&mut state, &p, &mut rng);
    assert_eq!(outcome, MoveOutcome::RolledBack);
    assert_eq!(state.to_sorted_vec(), vec![0]);
    assert_eq!(state.loss(0), 9);
    assert_eq!(state.uncovered_count(), 0);
    assert!(state.is_valid());
    for v in 0..g.n() {
        assert_eq!(state.loss(v), loss_before[v], "loss van {v}");
        assert_eq!(state.gain(v), gain_before[v], "gain van {v}");
        assert_eq!(state.loss(v), state.loss_from_scratch(v));
        assert_eq!(state.gain(v), state.gain_from_scratch(v));
    }
}

#[test]
fn test_exchange_move_accepts_shrinking_cover() {
    let g = cycle(5);
    let mut state = CoverState::from_vertices(&g, [0, 1, 2, 3]);
    let p = Params::default();
    let mut rng = StdRng::seed_from_u64(9);

    let outcome = ExchangeMove::new().apply(&mut state, &p, &mut rng);
    assert_eq!(outcome, MoveOutcome::Accepted);
    assert_eq!(state.size(), 3);
    assert!(state.is_valid());

    let edgeless = Graph::with_vertices(3);
    let mut nothing = CoverState::from_vertices(&edgeless, Vec::new());
    assert_eq!(ExchangeMove::new().apply(&mut nothing, &p, &mut rng), MoveOutcome::NoCandidates);
}

#[test]
fn test_star_converges_to_center() {
    let g = star(9);
    let p = quick_params();
    for strategy in [Strategy::Greedy, Strategy::FastVc, Strategy::Tabu, Strategy::Annealing, Strategy::Grasp] {
        let mut rng = StdRng::seed_from_u64(3);
        let out = run_search(&g, strategy, &p, &mut rng).unwrap();
        assert_eq!(out.cover, vec![0], "{strategy}");
    }
}

#[test]
fn test_local_search_from_repairs_invalid_start() {
    let g = random_graph(30, 0.15, 21);
    let start = CoverState::from_vertices(&g, [0, 1, 2]);
    assert!(!start.is_valid());
    let p = quick_params();
    let mut rng = StdRng::seed_from_u64(5);
    let out = local_search_from(start, &p, &mut rng);
    assert!(is_cover(&g, &out.cover));
}

#[test]
fn test_local_search_improves_on_bad_start() {
    let g = random_graph(40, 0.1, 13);
    let start = CoverState::from_vertices(&g, 0..g.n());
    let p = quick_params();
    let mut rng = StdRng::seed_from_u64(6);
    let out = local_search_from(start, &p, &mut rng);
    assert!(out.size() < g.n());
    assert_eq!(out.improvements[0], g.n());
    assert_strictly_decreasing(&out.improvements);
}

#[test]
fn test_invalid_params_rejected() {
    let g = cycle(5);
    let mut p = Params::default();
    p.cooling_factor = 1.5;
    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(
        run_search(&g, Strategy::Annealing, &p, &mut rng),
        Err(VcError::Config(_))
    ));
}

/*────────── Hulpstructuren ──────────*/

#[test]
fn test_search_clock() {
    let expired = SearchClock::start(0.0);
    assert!(expired.expired());
    assert_relative_eq!(expired.remaining_secs(), 0.0);
    assert!(SearchClock::start(-1.0).expired());
    assert!(SearchClock::start(f64::NAN).expired());
    let forever = SearchClock::start(f64::INFINITY);
    assert!(!forever.expired());
    assert!(forever.remaining_secs() > 1e6);
}

#[test]
fn test_cooling_schedule() {
    let mut s = CoolingSchedule::new(10.0, 0.5, 1.0, 2);
    assert_relative_eq!(s.temperature(), 10.0);
    s.step();
    assert_relative_eq!(s.temperature(), 10.0);
    s.step();
    assert_relative_eq!(s.temperature(), 5.0);
    for _ in 0..20 {
        s.step();
    }
    assert_relative_eq!(s.temperature(), 1.0);
    assert!(s.is_frozen());
}

#[test]
fn test_acceptance_probability() {
    assert_relative_eq!(acceptance_probability(1, 2.0), (-1.0f64).exp());
    assert!(acceptance_probability(3, 100.0) > acceptance_probability(3, 1.0));
    let p = acceptance_probability(5, 0.0);
    assert!(p.is_finite() && p >= 0.0);
}

#[test]
fn test_tabu_list_fifo() {
    let mut tabu = TabuList::new(5, 2);
    assert!(tabu.is_empty());
    tabu.push(1);
    tabu.push(2);
    assert!(tabu.contains(1) && tabu.contains(2));
    tabu.push(3);
    assert!(!tabu.contains(1));
    assert!(tabu.contains(3));
    assert_eq!(tabu.len(), 2);
    tabu.push(3);
    tabu.push(4);
    assert!(!tabu.contains(2));
    assert!(tabu.contains(3));
    tabu.clear();
    assert!(!tabu.contains(3) && tabu.is_empty());
}

#[test]
fn test_pheromone_trail() {
    let mut trail = PheromoneTrail::new(3, 1.0);
    trail.reinforce(&[0, 2], 0.5);
    trail.decay(0.5);
    assert_relative_eq!(trail.get(0), 0.75);
    assert_relative_eq!(trail.get(1), 0.5);
    assert_relative_eq!(trail.weight(1, 4), 0.5f64.powf(0.9) * 8.0);

    let empty = PheromoneTrail::new(1, 0.0);
    assert!(empty.weight(0, 2) > 0.0);
}

#[test]
fn test_ant_walk_produces_cover() {
    let g = random_graph(30, 0.2, 17);
    let trail = PheromoneTrail::new(g.n(), 0.01);
    let clock = SearchClock::start(5.0);
    let mut rng = StdRng::seed_from_u64(8);
    let cover = ant_walk(&g, &trail, 0, &clock, &mut rng).unwrap();
    assert!(cover.is_valid());

    let expired = SearchClock::start(0.0);
    let res = ant_walk(&g, &trail, 0, &expired, &mut rng);
    assert!(matches!(res, Err(VcError::ConstructionFailure(_))));
}

#[test]
fn test_build_rcl() {
    let g = star(4);
    let state = CoverState::empty(&g);
    let mut rcl = Vec::new();
    build_rcl(&state, 0.0, &mut rcl);
    assert_eq!(rcl, vec![0]);
    build_rcl(&state, 1.0, &mut rcl);
    assert_eq!(rcl, vec![0, 1, 2, 3, 4]);

    let covered = CoverState::from_vertices(&g, [0]);
    build_rcl(&covered, 0.5, &mut rcl);
    assert!(rcl.is_empty());
}

#[test]
fn test_grasp_construct() {
    let g = random_graph(40, 0.15, 30);
    let clock = SearchClock::start(5.0);
    let mut rng = StdRng::seed_from_u64(10);
    assert!(grasp_construct(&g, 0.25, &clock, &mut rng).unwrap().is_valid());

    let seeded = grasp_construct_from_seed(&g, &[3, 7], 0.25, &clock, &mut rng).unwrap();
    assert!(seeded.is_valid());
    assert!(seeded.contains(3) && seeded.contains(7));

    let expired = SearchClock::start(0.0);
    assert!(matches!(
        grasp_construct(&g, 0.25, &expired, &mut rng),
        Err(VcError::ConstructionFailure(_))
    ));
}

#[test]
fn test_memetic_improves_on_construction() {
    let g = random_graph(60, 0.08, 3);
    let constructed = construct_vc(&g).size();
    let mut p = Params::default().with_cutoff(1.0).with_stagnation(200);
    p.population_size = 4;
    p.memetic_survivors = 2;
    p.memetic_rebuild_seconds = 0.1;
    p.grasp_refine_stagnation = 50;
    let mut rng = StdRng::seed_from_u64(3);
    let out = run_search(&g, Strategy::Memetic, &p, &mut rng).unwrap();
    assert!(is_cover(&g, &out.cover));
    assert!(out.size() < constructed, "memetic {} tegen constructie {constructed}", out.size());
    assert_eq!(out.improvements[0], constructed);
}

#[test]
fn test_memetic_rejects_survivors_filling_population() {
    let g = random_graph(20, 0.2, 1);
    let mut p = quick_params();
    p.memetic_survivors = p.population_size;
    let mut rng = StdRng::seed_from_u64(0);
    let err = run_search(&g, Strategy::Memetic, &p, &mut rng).unwrap_err();
    assert!(matches!(err, VcError::Config(_)));
}

#[test]
fn test_genetic_with_each_parent_selection() {
    let g = random_graph(40, 0.12, 17);
    for selection in [ParentSelection::Elitist, ParentSelection::Roulette, ParentSelection::Tournament] {
        let mut p = quick_params();
        p.parent_selection = selection;
        p.tournament_size = 4;
        let mut rng = StdRng::seed_from_u64(8);
        let out = run_search(&g, Strategy::Genetic, &p, &mut rng).unwrap();
        assert!(is_cover(&g, &out.cover), "{selection:?}");
        assert_strictly_decreasing(&out.improvements);
    }
}
