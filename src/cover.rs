//! src/cover.rs
//!
//! Representeert een kandidaat-vertex-cover `C` met incrementele boekhouding:
//! - `loss[v]` voor `v ∈ C`: aantal kanten van `v` waarvan de andere kant niet
//!   in `C` zit (kanten die onbedekt raken als `v` verdwijnt);
//! - `gain[v]` voor `v ∉ C`: aantal onbedekte kanten dat `v` zou bedekken;
//! - de set onbedekte kanten, met O(1) toevoegen/verwijderen/trekken.
//!
//! Elke `insert`/`remove` kost O(deg(v)); alleen de constructors doen een
//! volledige scan over de kanten.

use crate::graph::{Graph, GraphView};
use bitvec::prelude::*;
use rand::Rng;
use std::fmt;

const NONE: usize = usize::MAX;

/// Een veranderlijke vertex cover, gebonden aan een specifieke graaf.
pub struct CoverState<'g, G: GraphView = Graph> {
    graph: &'g G,
    in_cover: BitVec,
    /// Leden van `C` in willekeurige volgorde; `member_pos[v]` is de index van `v`.
    members: Vec<usize>,
    member_pos: Vec<usize>,
    loss: Vec<usize>,
    gain: Vec<usize>,
    /// Ids van onbedekte kanten; `uncovered_pos[e]` is de index van `e` of `NONE`.
    uncovered: Vec<usize>,
    uncovered_pos: Vec<usize>,
}

impl<'g, G: GraphView> CoverState<'g, G> {
    /*────────── Constructors ──────────*/

    /// Creëert een lege cover: elke kant is onbedekt en `gain[v] = deg(v)`.
    pub fn empty(graph: &'g G) -> Self {
        let n = graph.vertex_count();
        let m = graph.edge_count();
        let mut state = Self {
            graph,
            in_cover: bitvec![0; n],
            members: Vec::new(),
            member_pos: vec![NONE; n],
            loss: vec![0; n],
            gain: vec![0; n],
            uncovered: Vec::with_capacity(m),
            uncovered_pos: vec![NONE; m],
        };
        state.rebuild();
        state
    }

    /// Creëert een cover met de gegeven knopen (duplicaten worden genegeerd) en
    /// berekent de tellers met één volledige scan.
    pub fn from_vertices<I>(graph: &'g G, vertices: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let n = graph.vertex_count();
        let mut in_cover = bitvec![0; n];
        let mut members = Vec::new();
        let mut member_pos = vec![NONE; n];
        for v in vertices {
            if !in_cover[v] {
                in_cover.set(v, true);
                member_pos[v] = members.len();
                members.push(v);
            }
        }
        let mut state = Self {
            graph,
            in_cover,
            members,
            member_pos,
            loss: vec![0; n],
            gain: vec![0; n],
            uncovered: Vec::new(),
            uncovered_pos: vec![NONE; graph.edge_count()],
        };
        state.rebuild();
        state
    }

    /// Waardekopie, gebruikt om de beste cover tot nu toe vast te leggen.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /*────────── Queries ──────────*/

    #[inline]
    pub fn graph(&self) -> &'g G {
        self.graph
    }

    /// Geeft `|C|` terug.
    #[inline]
    pub fn size(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[inline]
    pub fn contains(&self, v: usize) -> bool {
        self.in_cover[v]
    }

    /// Leden van `C`, zonder vaste volgorde.
    #[inline]
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Lidmaatschap als bitmasker over alle knopen.
    #[inline]
    pub fn bitset(&self) -> &BitSlice {
        &self.in_cover
    }

    #[inline]
    pub fn loss(&self, v: usize) -> usize {
        self.loss[v]
    }

    #[inline]
    pub fn gain(&self, v: usize) -> usize {
        self.gain[v]
    }

    #[inline]
    pub fn uncovered_count(&self) -> usize {
        self.uncovered.len()
    }

    /// Ids van de momenteel onbedekte kanten.
    #[inline]
    pub fn uncovered_edges(&self) -> &[usize] {
        &self.uncovered
    }

    /// `true` als elke kant minstens één eindpunt in `C` heeft.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.uncovered.is_empty()
    }

    /// Trekt uniform een lid van `C`.
    pub fn random_member<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        if self.members.is_empty() {
            None
        } else {
            Some(self.members[rng.gen_range(0..self.members.len())])
        }
    }

    /// Trekt uniform een onbedekte kant.
    pub fn random_uncovered_edge<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(usize, usize)> {
        if self.uncovered.is_empty() {
            None
        } else {
            let e = self.uncovered[rng.gen_range(0..self.uncovered.len())];
            Some(self.graph.edge(e))
        }
    }

    /// Leden van `C`, oplopend gesorteerd.
    pub fn to_sorted_vec(&self) -> Vec<usize> {
        let mut v = self.members.clone();
        v.sort_unstable();
        v
    }

    /// Herberekent `loss[v]` met een scan over de buren, zonder de tellers te gebruiken.
    pub fn loss_from_scratch(&self, v: usize) -> usize {
        if !self.in_cover[v] {
            return 0;
        }
        self.graph.neighbors(v).iter().filter(|&&n| !self.in_cover[n]).count()
    }

    /// Herberekent `gain[v]` met een scan over de buren.
    pub fn gain_from_scratch(&self, v: usize) -> usize {
        if self.in_cover[v] {
            return 0;
        }
        self.graph.neighbors(v).iter().filter(|&&n| !self.in_cover[n]).count()
    }

    /*────────── Mutators ──────────*/

    /// Voegt `v` toe aan `C`. Geeft `false` terug (zonder iets te wijzigen) als
    /// `v` al aanwezig is.
    pub fn insert(&mut self, v: usize) -> bool {
        if self.in_cover[v] {
            return false;
        }
        let graph = self.graph;
        self.in_cover.set(v, true);
        self.member_pos[v] = self.members.len();
        self.members.push(v);

        let mut own_loss = 0;
        for (&n, &e) in graph.neighbors(v).iter().zip(graph.incident_edges(v)) {
            if self.in_cover[n] {
                // (v,n) was alleen door n bedekt.
                self.loss[n] -= 1;
            } else {
                own_loss += 1;
                self.gain[n] -= 1;
                self.unmark_uncovered(e);
            }
        }
        self.loss[v] = own_loss;
        self.gain[v] = 0;
        true
    }

    /// Verwijdert `v` uit `C`. Geeft `false` terug als `v` niet aanwezig is.
    pub fn remove(&mut self, v: usize) -> bool {
        if !self.in_cover[v] {
            return false;
        }
        let graph = self.graph;
        self.in_cover.set(v, false);
        let pos = self.member_pos[v];
        self.members.swap_remove(pos);
        if let Some(&moved) = self.members.get(pos) {
            self.member_pos[moved] = pos;
        }
        self.member_pos[v] = NONE;

        let mut own_gain = 0;
        for (&n, &e) in graph.neighbors(v).iter().zip(graph.incident_edges(v)) {
            if self.in_cover[n] {
                // n bedekt (v,n) nu alleen.
                self.loss[n] += 1;
            } else {
                own_gain += 1;
                self.gain[n] += 1;
                self.mark_uncovered(e);
            }
        }
        self.loss[v] = 0;
        self.gain[v] = own_gain;
        true
    }

    /// Verwijdert herhaaldelijk leden met `loss == 0` en geeft ze terug in de
    /// volgorde van verwijderen. Het resultaat blijft even geldig als de invoer.
    pub fn remove_redundant(&mut self) -> Vec<usize> {
        let candidates: Vec<usize> = self
            .members
            .iter()
            .copied()
            .filter(|&v| self.loss[v] == 0)
            .collect();
        let mut dropped = Vec::new();
        for v in candidates {
            // Een eerdere verwijdering kan de loss van v verhoogd hebben.
            if self.in_cover[v] && self.loss[v] == 0 {
                self.remove(v);
                dropped.push(v);
            }
        }
        dropped
    }

    /*────────── Intern ──────────*/

    fn rebuild(&mut self) {
        self.loss.fill(0);
        self.gain.fill(0);
        self.uncovered.clear();
        self.uncovered_pos.fill(NONE);
        for e in 0..self.graph.edge_count() {
            let (u, v) = self.graph.edge(e);
            match (self.in_cover[u], self.in_cover[v]) {
                (true, true) => {}
                (true, false) => self.loss[u] += 1,
                (false, true) => self.loss[v] += 1,
                (false, false) => {
                    self.gain[u] += 1;
                    self.gain[v] += 1;
                    self.mark_uncovered(e);
                }
            }
        }
    }

    #[inline]
    fn mark_uncovered(&mut self, e: usize) {
        debug_assert_eq!(self.uncovered_pos[e], NONE);
        self.uncovered_pos[e] = self.uncovered.len();
        self.uncovered.push(e);
    }

    #[inline]
    fn unmark_uncovered(&mut self, e: usize) {
        let pos = self.uncovered_pos[e];
        debug_assert_ne!(pos, NONE);
        self.uncovered.swap_remove(pos);
        if let Some(&moved) = self.uncovered.get(pos) {
            self.uncovered_pos[moved] = pos;
        }
        self.uncovered_pos[e] = NONE;
    }
}

impl<'g, G: GraphView> Clone for CoverState<'g, G> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph,
            in_cover: self.in_cover.clone(),
            members: self.members.clone(),
            member_pos: self.member_pos.clone(),
            loss: self.loss.clone(),
            gain: self.gain.clone(),
            uncovered: self.uncovered.clone(),
            uncovered_pos: self.uncovered_pos.clone(),
        }
    }
}

impl<'g, G: GraphView> fmt::Debug for CoverState<'g, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoverState")
            .field("size", &self.size())
            .field("uncovered", &self.uncovered_count())
            .field("members", &self.to_sorted_vec())
            .finish()
    }
}
