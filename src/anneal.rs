//! src/anneal.rs
//!
//! Simulated annealing over het lidmaatschap van één knoop per stap. Een flip
//! die schaadt (een knoop met `loss > 0` verwijderen, of een knoop met
//! `gain == 0` toevoegen) wordt geaccepteerd met kans `exp(-(1 + deg(v)) / T)`;
//! elke andere flip altijd. De temperatuur koelt geometrisch per vast aantal
//! iteraties en zakt nooit onder de eindtemperatuur.

use crate::{
    construct::construct_vc,
    graph::GraphView,
    params::{Params, Strategy},
    search::{Incumbent, SearchClock, SearchOutcome},
};
use rand::Rng;

/// Ondergrens om deling door een (bijna) nul temperatuur te voorkomen.
const MIN_TEMPERATURE: f64 = 1e-12;

/// Geometrisch koelschema: `T ← α·T` elke `step_iters` iteraties, begrensd op `min`.
#[derive(Clone, Debug)]
pub struct CoolingSchedule {
    current: f64,
    alpha: f64,
    min: f64,
    step_iters: usize,
    counter: usize,
}

impl CoolingSchedule {
    pub fn new(start: f64, alpha: f64, min: f64, step_iters: usize) -> Self {
        let min = min.max(MIN_TEMPERATURE);
        Self {
            current: start.max(min),
            alpha,
            min,
            step_iters: step_iters.max(1),
            counter: 0,
        }
    }

    #[inline]
    pub fn temperature(&self) -> f64 {
        self.current
    }

    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.current <= self.min
    }

    /// Telt één iteratie; koelt af als de stap vol is.
    pub fn step(&mut self) {
        self.counter += 1;
        if self.counter >= self.step_iters {
            self.counter = 0;
            if !self.is_frozen() {
                self.current = (self.current * self.alpha).max(self.min);
                tracing::trace!(temperature = self.current, "afgekoeld");
            }
        }
    }
}

/// Kans om een schadelijke flip van een knoop met graad `degree` te accepteren.
#[inline]
pub fn acceptance_probability(degree: usize, temperature: f64) -> f64 {
    (-(1.0 + degree as f64) / temperature.max(MIN_TEMPERATURE)).exp()
}

#[tracing::instrument(level = "debug", skip_all)]
pub fn simulated_annealing<G, R>(graph: &G, p: &Params, rng: &mut R) -> SearchOutcome
where
    G: GraphView,
    R: Rng + ?Sized,
{
    let clock = SearchClock::start(p.cutoff_seconds);
    let mut incumbent = Incumbent::new(Strategy::Annealing);
    let mut state = construct_vc(graph);
    incumbent.offer(&state, &clock);

    let n = graph.vertex_count();
    let mut schedule = CoolingSchedule::new(
        p.start_temperature,
        p.cooling_factor,
        p.end_temperature,
        p.cooling_step_iters,
    );
    let mut iterations = 0usize;

    while n > 0 && !clock.expired() && iterations < p.max_iter {
        iterations += 1;
        let v = rng.gen_range(0..n);
        let in_cover = state.contains(v);
        let hurts = if in_cover {
            state.loss(v) > 0
        } else {
            state.gain(v) == 0
        };

        if !hurts || rng.gen::<f64>() < acceptance_probability(graph.degree(v), schedule.temperature()) {
            if in_cover {
                state.remove(v);
            } else {
                state.insert(v);
            }
            if state.is_valid() {
                incumbent.offer(&state, &clock);
            }
        }
        schedule.step();
    }

    incumbent.into_outcome(iterations)
}
