//! src/aco.rs
//!
//! Ant colony constructie. Elke mier bouwt een cover via een gewogen
//! willekeurige wandeling: de volgende knoop wordt gekozen met kans evenredig
//! aan `τ(v)^0.9 · deg(v)^1.5`, enkel onder eindpunten van nog onbedekte
//! kanten. Na elke ronde krijgen de kleinste covers van die ronde `q / |best|`
//! feromoon bij, waarna alle feromoon verdampt.

use crate::{
    construct::construct_vc,
    cover::CoverState,
    error::{VcError, VcResult},
    graph::GraphView,
    params::{Params, Strategy},
    search::{Incumbent, SearchClock, SearchOutcome},
    select::roulette_index,
};
use rand::Rng;

const PHEROMONE_FLOOR: f64 = 1e-5;
const PHEROMONE_EXP: f64 = 0.9;
const DEGREE_EXP: f64 = 1.5;

/// Feromoonwaarde per knoop.
#[derive(Clone, Debug, PartialEq)]
pub struct PheromoneTrail {
    tau: Vec<f64>,
}

impl PheromoneTrail {
    pub fn new(n: usize, initial: f64) -> Self {
        Self { tau: vec![initial; n] }
    }

    #[inline]
    pub fn get(&self, v: usize) -> f64 {
        self.tau[v]
    }

    /// Aantrekkelijkheid van `v` met graad `degree`.
    #[inline]
    pub fn weight(&self, v: usize, degree: usize) -> f64 {
        self.tau[v].max(PHEROMONE_FLOOR).powf(PHEROMONE_EXP) * (degree as f64).powf(DEGREE_EXP)
    }

    pub fn reinforce(&mut self, cover: &[usize], delta: f64) {
        for &v in cover {
            self.tau[v] += delta;
        }
    }

    /// Verdamping: `τ ← factor · τ` voor alle knopen.
    pub fn decay(&mut self, factor: f64) {
        for t in &mut self.tau {
            *t *= factor;
        }
    }
}

/// Eén mier: bouwt een geldige cover vanaf `start` en snoeit overbodige knopen.
///
/// Geeft `ConstructionFailure` als de `deadline` verloopt voor de cover af is.
pub fn ant_walk<'g, G, R>(
    graph: &'g G,
    trail: &PheromoneTrail,
    start: usize,
    deadline: &SearchClock,
    rng: &mut R,
) -> VcResult<CoverState<'g, G>>
where
    G: GraphView,
    R: Rng + ?Sized,
{
    let mut state = CoverState::empty(graph);
    if start < graph.vertex_count() {
        state.insert(start);
    }

    let mut stamp = vec![0u32; graph.vertex_count()];
    let mut round = 0u32;
    let mut candidates: Vec<usize> = Vec::new();
    let mut weights: Vec<f64> = Vec::new();

    while !state.is_valid() {
        if deadline.expired() {
            return Err(VcError::ConstructionFailure(format!(
                "mier niet klaar, nog {} kanten onbedekt",
                state.uncovered_count()
            )));
        }

        round += 1;
        candidates.clear();
        weights.clear();
        for &e in state.uncovered_edges() {
            let (a, b) = graph.edge(e);
            for v in [a, b] {
                if stamp[v] != round {
                    stamp[v] = round;
                    candidates.push(v);
                    weights.push(trail.weight(v, graph.degree(v)));
                }
            }
        }

        let idx = roulette_index(&weights, rng)?;
        state.insert(candidates[idx]);
    }

    state.remove_redundant();
    Ok(state)
}

#[tracing::instrument(level = "debug", skip_all)]
pub fn ant_colony<G, R>(graph: &G, p: &Params, rng: &mut R) -> SearchOutcome
where
    G: GraphView,
    R: Rng + ?Sized,
{
    let clock = SearchClock::start(p.cutoff_seconds);
    let mut incumbent = Incumbent::new(Strategy::Aco);
    incumbent.offer(&construct_vc(graph), &clock);

    let n = graph.vertex_count();
    if graph.edge_count() == 0 {
        return incumbent.into_outcome(0);
    }

    let q = p.pheromone_q.unwrap_or(0.75 * n as f64);
    let mut trail = PheromoneTrail::new(n, p.initial_pheromone);
    let mut rounds = 0usize;

    while !clock.expired() && rounds < p.max_iter {
        rounds += 1;

        let mut covers: Vec<Vec<usize>> = Vec::with_capacity(p.ant_count);
        for _ in 0..p.ant_count {
            if clock.expired() && !covers.is_empty() {
                break;
            }
            let start = rng.gen_range(0..n);
            let cover = match ant_walk(graph, &trail, start, &clock, rng) {
                Ok(state) => state,
                Err(err) => {
                    tracing::warn!(%err, "mier mislukt, terugval op greedy constructie");
                    construct_vc(graph)
                }
            };
            covers.push(cover.to_sorted_vec());
        }

        let Some(best_len) = covers.iter().map(Vec::len).min() else {
            break;
        };
        let delta = q / best_len.max(1) as f64;
        for cover in covers.iter().filter(|c| c.len() == best_len) {
            trail.reinforce(cover, delta);
        }
        trail.decay(p.pheromone_decay);
        tracing::trace!(round = rounds, best_len, "ronde afgerond");

        if let Some(best) = covers.into_iter().find(|c| c.len() == best_len) {
            incumbent.offer_vertices(best, &clock);
        }
    }

    incumbent.into_outcome(rounds)
}
