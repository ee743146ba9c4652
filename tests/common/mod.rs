// tests/common/mod.rs
//! Gedeelde hulpfuncties voor de integratietests.

#![allow(dead_code)]

use mvcls::graph::{Graph, GraphView};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Cykel 0-1-2-...-(n-1)-0.
pub fn cycle(n: usize) -> Graph {
    let edges: Vec<(usize, usize)> = (0..n).map(|i| (i, (i + 1) % n)).collect();
    Graph::from_edge_list(n, &edges).unwrap()
}

/// Ster met centrum 0 en bladeren 1..=leaves.
pub fn star(leaves: usize) -> Graph {
    let edges: Vec<(usize, usize)> = (1..=leaves).map(|i| (0, i)).collect();
    Graph::from_edge_list(leaves + 1, &edges).unwrap()
}

/// Erdős–Rényi G(n, p), reproduceerbaar via `seed`.
pub fn random_graph(n: usize, p: f64, seed: u64) -> Graph {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut edges = Vec::new();
    for u in 0..n {
        for v in (u + 1)..n {
            if rng.gen_bool(p) {
                edges.push((u, v));
            }
        }
    }
    Graph::from_edge_list(n, &edges).unwrap()
}

/// `true` als elke kant minstens één eindpunt in `cover` heeft.
pub fn is_cover<G: GraphView>(graph: &G, cover: &[usize]) -> bool {
    let mut mark = vec![false; graph.vertex_count()];
    for &v in cover {
        mark[v] = true;
    }
    (0..graph.edge_count()).all(|e| {
        let (u, v) = graph.edge(e);
        mark[u] || mark[v]
    })
}
