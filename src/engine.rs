//! src/engine.rs
//!
//! De exchange-gebaseerde lokale zoektocht. Per iteratie:
//! 1. kies één of twee knopen met lage `loss` via BMS en verwijder ze;
//! 2. repareer door eindpunten van onbedekte kanten toe te voegen, beperkt tot
//!    de buurt van de verwijderde knopen;
//! 3. verwijder overbodige knopen (`loss == 0`);
//! 4. accepteer de move alleen als de cover niet groeit, anders terugdraaien.
//!
//! Stopt bij de cutoff, bij `max_iter`, of na `stagnation_iter` iteraties
//! zonder nieuwe beste cover.

use crate::{
    construct::{construct_from_seed, construct_vc},
    cover::CoverState,
    graph::GraphView,
    params::{Params, Strategy},
    search::{Incumbent, SearchClock, SearchOutcome},
    select::select_best_of,
};
use rand::Rng;
use std::cmp::Reverse;

/// Eén wijziging aan de cover, bijgehouden om een move terug te draaien.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flip {
    Inserted(usize),
    Removed(usize),
}

/// Draait een volledige episode: greedy constructie gevolgd door de exchange-zoektocht.
#[tracing::instrument(level = "debug", skip_all)]
pub fn local_search<G, R>(graph: &G, p: &Params, rng: &mut R) -> SearchOutcome
where
    G: GraphView,
    R: Rng + ?Sized,
{
    let clock = SearchClock::start(p.cutoff_seconds);
    let mut incumbent = Incumbent::new(Strategy::Greedy);
    let state = construct_vc(graph);
    incumbent.offer(&state, &clock);
    let (_, iterations) = refine(state, &clock, &clock, p.stagnation_iter, p, rng, &mut incumbent);
    incumbent.into_outcome(iterations)
}

/// Zoals [`local_search`], maar vanaf een gegeven startcover. Een ongeldige
/// start wordt eerst aangevuld met de greedy constructie.
#[tracing::instrument(level = "debug", skip_all)]
pub fn local_search_from<'g, G, R>(initial: CoverState<'g, G>, p: &Params, rng: &mut R) -> SearchOutcome
where
    G: GraphView,
    R: Rng + ?Sized,
{
    let clock = SearchClock::start(p.cutoff_seconds);
    let mut incumbent = Incumbent::new(Strategy::Greedy);
    let state = if initial.is_valid() {
        initial
    } else {
        construct_from_seed(initial.graph(), initial.members())
    };
    incumbent.offer(&state, &clock);
    let (_, iterations) = refine(state, &clock, &clock, p.stagnation_iter, p, rng, &mut incumbent);
    incumbent.into_outcome(iterations)
}

/// Uitkomst van één exchange-move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// De cover is niet gegroeid en blijft staan.
    Accepted,
    /// De cover zou groeien; de toestand is exact hersteld.
    RolledBack,
    /// De cover is leeg, er valt niets te verwijderen.
    NoCandidates,
}

/// Eén exchange-move met herbruikbare buffers (undo-log en verwijderde knopen).
#[derive(Clone, Debug, Default)]
pub struct ExchangeMove {
    undo: Vec<Flip>,
    removed: Vec<usize>,
}

impl ExchangeMove {
    pub fn new() -> Self {
        Self::default()
    }

    /// Voert één move uit op een geldige `state`:
    /// 1. verwijder `removals_per_step` knopen met lage loss (BMS);
    /// 2. repareer binnen de buurt van de verwijderde knopen;
    /// 3. verwijder overbodige knopen;
    /// 4. draai alles terug als de cover gegroeid is.
    pub fn apply<G, R>(&mut self, state: &mut CoverState<'_, G>, p: &Params, rng: &mut R) -> MoveOutcome
    where
        G: GraphView,
        R: Rng + ?Sized,
    {
        debug_assert!(state.is_valid());
        let size_before = state.size();
        self.undo.clear();
        self.removed.clear();

        for _ in 0..p.removals_per_step.clamp(1, 2) {
            let Ok(u) = select_best_of(state.members(), p.bms_samples, |v| state.loss(v), rng) else {
                break;
            };
            state.remove(u);
            self.undo.push(Flip::Removed(u));
            self.removed.push(u);
        }
        if self.removed.is_empty() {
            return MoveOutcome::NoCandidates;
        }

        if !repair(state, &self.removed, &mut self.undo, p.bms_samples, rng) {
            tracing::warn!(removed = ?self.removed, "reparatie uitgeput, verwijderde knopen terug");
            for &u in &self.removed {
                if state.insert(u) {
                    self.undo.push(Flip::Inserted(u));
                }
            }
        }

        for v in state.remove_redundant() {
            self.undo.push(Flip::Removed(v));
        }

        if state.size() > size_before {
            rollback(state, &self.undo);
            MoveOutcome::RolledBack
        } else {
            MoveOutcome::Accepted
        }
    }
}

/// De iteratielus zelf. `state` moet geldig zijn; `clock` is de klok van de
/// episode (voor tijdstempels), `deadline` begrenst deze aanroep.
///
/// Geeft de eindtoestand terug, die door de niet-stijgende acceptatie de
/// kleinste cover van deze aanroep is, samen met het aantal iteraties.
pub(crate) fn refine<'g, G, R>(
    mut state: CoverState<'g, G>,
    clock: &SearchClock,
    deadline: &SearchClock,
    max_stagnation: usize,
    p: &Params,
    rng: &mut R,
    incumbent: &mut Incumbent,
) -> (CoverState<'g, G>, usize)
where
    G: GraphView,
    R: Rng + ?Sized,
{
    let mut exchange = ExchangeMove::new();
    let mut stagnation = 0usize;
    let mut iterations = 0usize;

    while !deadline.expired() && !clock.expired() && iterations < p.max_iter {
        iterations += 1;
        if exchange.apply(&mut state, p, rng) == MoveOutcome::NoCandidates {
            break;
        }

        if incumbent.offer(&state, clock) {
            stagnation = 0;
        } else {
            stagnation += 1;
            if stagnation >= max_stagnation {
                break;
            }
        }
    }
    (state, iterations)
}

/// Voegt knopen toe tot de cover weer geldig is. Kandidaten zijn de buren van
/// de verwijderde knopen; de verwijderde knopen zelf komen alleen in aanmerking
/// als geen buur de resterende kanten nog kan bedekken. Geeft `false` terug als
/// de kandidaten op zijn terwijl er nog onbedekte kanten zijn.
fn repair<G, R>(
    state: &mut CoverState<'_, G>,
    removed: &[usize],
    undo: &mut Vec<Flip>,
    k: usize,
    rng: &mut R,
) -> bool
where
    G: GraphView,
    R: Rng + ?Sized,
{
    let graph = state.graph();
    let mut pool: Vec<usize> = removed
        .iter()
        .flat_map(|&u| graph.neighbors(u).iter().copied())
        .filter(|v| !removed.contains(v))
        .collect();
    pool.sort_unstable();
    pool.dedup();

    while !state.is_valid() {
        pool.retain(|&v| !state.contains(v) && state.gain(v) > 0);
        let chosen = match select_best_of(&pool, k, |v| Reverse(state.gain(v)), rng) {
            Ok(v) => v,
            Err(_) => {
                let fallback: Vec<usize> = removed
                    .iter()
                    .copied()
                    .filter(|&u| !state.contains(u) && state.gain(u) > 0)
                    .collect();
                match select_best_of(&fallback, k, |v| Reverse(state.gain(v)), rng) {
                    Ok(v) => v,
                    Err(_) => return false,
                }
            }
        };
        state.insert(chosen);
        undo.push(Flip::Inserted(chosen));
    }
    true
}

fn rollback<G: GraphView>(state: &mut CoverState<'_, G>, undo: &[Flip]) {
    for flip in undo.iter().rev() {
        match *flip {
            Flip::Inserted(v) => {
                state.remove(v);
            }
            Flip::Removed(v) => {
                state.insert(v);
            }
        }
    }
}
