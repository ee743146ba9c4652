//! src/tabu.rs
//!
//! Tabu search met een FIFO-lijst van recent verwijderde knopen.
//!
//! Een buurmove verwijdert `u ∈ C` en voegt alle buren van `u` buiten `C` toe;
//! de cover blijft dus geldig en de grootte verandert met `loss[u] - 1`. Een
//! move die een knoop uit de tabu-lijst terugzet is verboden, tenzij hij een
//! cover oplevert die strikt kleiner is dan de beste tot nu toe (aspiratie).

use crate::{
    construct::construct_vc,
    graph::GraphView,
    params::{Params, Strategy},
    search::{Incumbent, SearchClock, SearchOutcome},
};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;

/// FIFO tabu-lijst van vaste lengte.
#[derive(Clone, Debug)]
pub struct TabuList {
    queue: VecDeque<usize>,
    /// `count[v]` is hoe vaak `v` in de wachtrij staat.
    count: Vec<u32>,
    capacity: usize,
}

impl TabuList {
    /// Creëert een lege lijst voor `n` knopen met plaats voor `capacity` items.
    pub fn new(n: usize, capacity: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(capacity + 1),
            count: vec![0; n],
            capacity: capacity.max(1),
        }
    }

    #[inline]
    pub fn contains(&self, v: usize) -> bool {
        self.count[v] > 0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Zet `v` achteraan; het oudste item vervalt als de lijst vol is.
    pub fn push(&mut self, v: usize) {
        self.queue.push_back(v);
        self.count[v] += 1;
        if self.queue.len() > self.capacity {
            if let Some(old) = self.queue.pop_front() {
                self.count[old] -= 1;
            }
        }
    }

    /// Reset alle tabu-markeringen.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.count.fill(0);
    }
}

#[tracing::instrument(level = "debug", skip_all)]
pub fn tabu_search<G, R>(graph: &G, p: &Params, rng: &mut R) -> SearchOutcome
where
    G: GraphView,
    R: Rng + ?Sized,
{
    let clock = SearchClock::start(p.cutoff_seconds);
    let mut incumbent = Incumbent::new(Strategy::Tabu);
    let mut state = construct_vc(graph);
    incumbent.offer(&state, &clock);

    let mut tabu = TabuList::new(graph.vertex_count(), p.tabu_size);
    let mut best_moves: Vec<usize> = Vec::new();
    let mut to_add: Vec<usize> = Vec::new();
    let mut stagnation = 0usize;
    let mut iterations = 0usize;

    while !state.is_empty() && !clock.expired() && iterations < p.max_iter {
        iterations += 1;
        let best_size = incumbent.size().unwrap_or(usize::MAX);

        // Beste toegestane move zoeken; gelijke delta's worden willekeurig gebroken.
        let mut best_delta = isize::MAX;
        best_moves.clear();
        for &u in state.members() {
            let delta = state.loss(u) as isize - 1;
            if delta > best_delta {
                continue;
            }
            let is_tabu = graph
                .neighbors(u)
                .iter()
                .any(|&n| !state.contains(n) && tabu.contains(n));
            if is_tabu {
                let new_size = (state.size() as isize + delta) as usize;
                // Aspiratiecriterium
                if new_size >= best_size {
                    continue;
                }
            }
            if delta < best_delta {
                best_delta = delta;
                best_moves.clear();
            }
            best_moves.push(u);
        }

        if let Some(&u) = best_moves.choose(rng) {
            to_add.clear();
            to_add.extend(graph.neighbors(u).iter().copied().filter(|&n| !state.contains(n)));
            state.remove(u);
            for &n in &to_add {
                state.insert(n);
            }
            tabu.push(u);
        }

        if incumbent.offer(&state, &clock) {
            stagnation = 0;
        } else {
            stagnation += 1;
            if stagnation >= p.stagnation_iter {
                break;
            }
        }
    }

    incumbent.into_outcome(iterations)
}
