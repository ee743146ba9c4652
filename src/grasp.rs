//! src/grasp.rs
//!
//! GRASP: gerandomiseerde greedy constructie via een restricted candidate list,
//! gevolgd door verfijning met de exchange-engine.

use crate::{
    construct::construct_vc,
    cover::CoverState,
    engine::refine,
    error::{VcError, VcResult},
    graph::GraphView,
    params::{Params, Strategy},
    search::{Incumbent, SearchClock, SearchOutcome},
};
use rand::seq::SliceRandom;
use rand::Rng;

/// Vult `out` met de RCL: alle knopen buiten de cover met `gain > 0` waarvan
/// de gain minstens `max − α·(max − min)` is.
pub fn build_rcl<G: GraphView>(state: &CoverState<'_, G>, alpha: f64, out: &mut Vec<usize>) {
    out.clear();
    let n = state.graph().vertex_count();
    let mut min_gain = usize::MAX;
    let mut max_gain = 0usize;
    for v in (0..n).filter(|&v| !state.contains(v) && state.gain(v) > 0) {
        min_gain = min_gain.min(state.gain(v));
        max_gain = max_gain.max(state.gain(v));
    }
    if max_gain == 0 {
        return;
    }

    let threshold = max_gain as f64 - alpha * (max_gain - min_gain) as f64;
    out.extend((0..n).filter(|&v| {
        !state.contains(v) && state.gain(v) > 0 && state.gain(v) as f64 >= threshold
    }));
}

/// Gerandomiseerde greedy constructie vanaf een lege cover.
pub fn grasp_construct<'g, G, R>(
    graph: &'g G,
    alpha: f64,
    deadline: &SearchClock,
    rng: &mut R,
) -> VcResult<CoverState<'g, G>>
where
    G: GraphView,
    R: Rng + ?Sized,
{
    grasp_construct_from_seed(graph, &[], alpha, deadline, rng)
}

/// Zoals [`grasp_construct`], maar de knopen uit `seed` zitten er al in.
/// Geeft `ConstructionFailure` als de `deadline` verloopt.
pub fn grasp_construct_from_seed<'g, G, R>(
    graph: &'g G,
    seed: &[usize],
    alpha: f64,
    deadline: &SearchClock,
    rng: &mut R,
) -> VcResult<CoverState<'g, G>>
where
    G: GraphView,
    R: Rng + ?Sized,
{
    let n = graph.vertex_count();
    let mut state = CoverState::from_vertices(graph, seed.iter().copied().filter(|&v| v < n));
    let mut rcl: Vec<usize> = Vec::new();

    while !state.is_valid() {
        if deadline.expired() {
            return Err(VcError::ConstructionFailure(format!(
                "GRASP-constructie te traag, nog {} kanten onbedekt",
                state.uncovered_count()
            )));
        }
        build_rcl(&state, alpha, &mut rcl);
        let &v = rcl.choose(rng).ok_or(VcError::EmptyCandidateSet)?;
        state.insert(v);
    }
    Ok(state)
}

#[tracing::instrument(level = "debug", skip_all)]
pub fn grasp_search<G, R>(graph: &G, p: &Params, rng: &mut R) -> SearchOutcome
where
    G: GraphView,
    R: Rng + ?Sized,
{
    let clock = SearchClock::start(p.cutoff_seconds);
    let mut incumbent = Incumbent::new(Strategy::Grasp);
    incumbent.offer(&construct_vc(graph), &clock);

    let mut iterations = 0usize;
    while !clock.expired() && iterations < p.max_iter {
        iterations += 1;

        let sub = SearchClock::start(p.cutoff_seconds / 5.0);
        let mut state = match grasp_construct(graph, p.grasp_alpha, &sub, rng) {
            Ok(state) => state,
            Err(err) => {
                tracing::warn!(%err, "terugval op greedy constructie");
                construct_vc(graph)
            }
        };
        state.remove_redundant();
        incumbent.offer(&state, &clock);

        let deadline = SearchClock::start((p.cutoff_seconds / 2.0).min(clock.remaining_secs()));
        refine(state, &clock, &deadline, p.grasp_refine_stagnation, p, rng, &mut incumbent);

        if graph.edge_count() == 0 {
            break;
        }
    }

    incumbent.into_outcome(iterations)
}
