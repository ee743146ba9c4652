//! src/fastvc.rs
//!
//! FastVC-variant van de lokale zoektocht. Zodra de cover geldig is wordt hij
//! vastgelegd en de knoop met de kleinste loss verwijderd; daarna wordt de
//! grootte constant gehouden met uitwisselingen: verwijder een BMS-knoop met
//! lage loss en voeg een eindpunt van een willekeurige onbedekte kant toe.

use crate::{
    construct::construct_vc,
    graph::GraphView,
    params::{Params, Strategy},
    search::{Incumbent, SearchClock, SearchOutcome},
    select::select_best_of,
};
use rand::Rng;

#[tracing::instrument(level = "debug", skip_all)]
pub fn fast_vc<G, R>(graph: &G, p: &Params, rng: &mut R) -> SearchOutcome
where
    G: GraphView,
    R: Rng + ?Sized,
{
    let clock = SearchClock::start(p.cutoff_seconds);
    let mut incumbent = Incumbent::new(Strategy::FastVc);
    let mut state = construct_vc(graph);
    incumbent.offer(&state, &clock);
    let mut stagnation = 0usize;
    let mut iterations = 0usize;

    while !clock.expired() && iterations < p.max_iter {
        iterations += 1;

        if state.is_valid() {
            if incumbent.offer(&state, &clock) {
                stagnation = 0;
            }
            let min_loss = state.members().iter().copied().min_by_key(|&v| state.loss(v));
            match min_loss {
                Some(u) => {
                    state.remove(u);
                }
                None => break,
            }
            continue;
        }

        let Ok(u) = select_best_of(state.members(), p.bms_samples, |v| state.loss(v), rng) else {
            break;
        };
        state.remove(u);

        if let Some((a, b)) = state.random_uncovered_edge(rng) {
            // Nooit meteen de net verwijderde knoop terugzetten.
            let v = if a == u {
                b
            } else if b == u {
                a
            } else if state.gain(a) != state.gain(b) {
                if state.gain(a) > state.gain(b) { a } else { b }
            } else if rng.gen_bool(0.5) {
                a
            } else {
                b
            };
            state.insert(v);
        }

        stagnation += 1;
        if stagnation >= p.stagnation_iter {
            break;
        }
    }

    incumbent.into_outcome(iterations)
}
