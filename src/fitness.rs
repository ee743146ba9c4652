//! src/fitness.rs
//!
//! Fitness van een knoopmasker: beloont bedekte kanten, straft de grootte van
//! het masker, en straft zwaar als het masker geen vertex cover is.
//!
//! `fitness = w_cov · bedekt − w_size · |masker| − w_inv · m · [geen cover]`
//!
//! Hoger is beter.

use crate::graph::GraphView;
use bitvec::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitnessWeights {
    pub coverage: f64,
    pub size: f64,
    /// Straf per kant van de graaf als het masker geen cover is.
    pub invalid_per_edge: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            coverage: 2.0,
            size: 1.0,
            invalid_per_edge: 3.0,
        }
    }
}

/// Hoeveel kanten een masker bedekt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Coverage {
    pub covered_edges: usize,
    pub is_cover: bool,
}

pub fn coverage<G: GraphView>(graph: &G, mask: &BitSlice) -> Coverage {
    let m = graph.edge_count();
    let covered_edges = (0..m)
        .filter(|&e| {
            let (u, v) = graph.edge(e);
            mask[u] || mask[v]
        })
        .count();
    Coverage {
        covered_edges,
        is_cover: covered_edges == m,
    }
}

/// Evalueert maskers tegen een vaste graaf.
#[derive(Clone, Copy, Debug)]
pub struct FitnessEvaluator<'g, G: GraphView> {
    graph: &'g G,
    weights: FitnessWeights,
}

impl<'g, G: GraphView> FitnessEvaluator<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self::with_weights(graph, FitnessWeights::default())
    }

    pub fn with_weights(graph: &'g G, weights: FitnessWeights) -> Self {
        Self { graph, weights }
    }

    #[inline]
    pub fn graph(&self) -> &'g G {
        self.graph
    }

    pub fn evaluate(&self, mask: &BitSlice) -> f64 {
        let cov = coverage(self.graph, mask);
        let penalty = if cov.is_cover {
            0.0
        } else {
            self.weights.invalid_per_edge * self.graph.edge_count() as f64
        };
        self.weights.coverage * cov.covered_edges as f64 - self.weights.size * mask.count_ones() as f64 - penalty
    }

    /// Fitness van een cover gegeven als knooplijst.
    pub fn evaluate_cover(&self, vertices: &[usize]) -> f64 {
        let mut mask = bitvec![0; self.graph.vertex_count()];
        for &v in vertices {
            mask.set(v, true);
        }
        self.evaluate(&mask)
    }
}
