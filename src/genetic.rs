//! src/genetic.rs
//!
//! Populatielaag: een cover als bitmasker over de knopen (genotype), met
//! crossover, mutatie, selectie en vervanging als losse functies. Daarop
//! twee zoektochten:
//! * `genetic_search`: generationeel GA (instelbare ouderselectie, uniforme crossover,
//!   uniforme mutatie, eliminatie van de slechtsten);
//! * `memetic_search`: elk individu wordt herbouwd met seeded GRASP plus
//!   exchange-verfijning, daarna gefragmenteerd en gesnoeid op fitness.
//!
//! Een genotype wordt naar een geldige cover "gerepareerd" door zijn ware bits
//! als seed aan de greedy constructie te geven.

use crate::{
    construct::{construct_from_seed, construct_vc},
    cover::CoverState,
    engine::refine,
    fitness::FitnessEvaluator,
    graph::GraphView,
    grasp::grasp_construct_from_seed,
    params::{ParentSelection, Params, Strategy},
    search::{Incumbent, SearchClock, SearchOutcome},
    select::roulette_index,
};
use bitvec::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

/* ───────────────────────── Genotype ───────────────────────── */

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Genotype {
    bits: BitVec,
}

impl Genotype {
    /// Masker van lengte `n`, alle bits uit.
    pub fn new(n: usize) -> Self {
        Self { bits: bitvec![0; n] }
    }

    /// Elke bit onafhankelijk aan met kans ½.
    pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        Self {
            bits: (0..n).map(|_| rng.gen_bool(0.5)).collect(),
        }
    }

    pub fn from_vertices(n: usize, vertices: &[usize]) -> Self {
        let mut g = Self::new(n);
        for &v in vertices {
            g.set(v, true);
        }
        g
    }

    pub fn from_cover<G: GraphView>(cover: &CoverState<'_, G>) -> Self {
        Self {
            bits: cover.bitset().to_bitvec(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    #[inline]
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    #[inline]
    pub fn get(&self, i: usize) -> bool {
        self.bits[i]
    }

    #[inline]
    pub fn set(&mut self, i: usize, value: bool) {
        self.bits.set(i, value);
    }

    pub fn true_positions(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }

    pub fn inverse(&self) -> Self {
        Self {
            bits: !self.bits.clone(),
        }
    }

    #[inline]
    pub fn mask(&self) -> &BitSlice {
        &self.bits
    }
}

/* ───────────────────────── Crossover ───────────────────────── */

/// Knip beide ouders op positie `point` en wissel de staarten.
pub fn single_point_crossover(p1: &Genotype, p2: &Genotype, point: usize) -> (Genotype, Genotype) {
    k_point_crossover(p1, p2, &[point])
}

/// Wisselt de segmenten tussen opeenvolgende snijpunten om en om.
/// `points` moet oplopend zijn; punten voorbij het einde worden genegeerd.
pub fn k_point_crossover(p1: &Genotype, p2: &Genotype, points: &[usize]) -> (Genotype, Genotype) {
    assert_eq!(p1.len(), p2.len(), "ouders van ongelijke lengte");
    let n = p1.len();
    let (mut o1, mut o2) = (p1.clone(), p2.clone());
    let mut start = 0;
    let mut swap = false;
    for &end in points.iter().chain(std::iter::once(&n)) {
        let end = end.clamp(start, n);
        if swap {
            o1.bits[start..end].copy_from_bitslice(&p2.bits[start..end]);
            o2.bits[start..end].copy_from_bitslice(&p1.bits[start..end]);
        }
        start = end;
        swap = !swap;
    }
    (o1, o2)
}

/// Elke positie komt met kans ½ van de ene of de andere ouder.
pub fn uniform_crossover<R: Rng + ?Sized>(p1: &Genotype, p2: &Genotype, rng: &mut R) -> (Genotype, Genotype) {
    assert_eq!(p1.len(), p2.len(), "ouders van ongelijke lengte");
    let (mut o1, mut o2) = (p1.clone(), p2.clone());
    for i in 0..p1.len() {
        if rng.gen_bool(0.5) {
            o1.set(i, p2.get(i));
            o2.set(i, p1.get(i));
        }
    }
    (o1, o2)
}

/* ───────────────────────── Mutatie ───────────────────────── */

/// Flipt elke bit met kans `rate` (default `1/n`).
pub fn uniform_mutation<R: Rng + ?Sized>(g: &Genotype, rate: Option<f64>, rng: &mut R) -> Genotype {
    let rate = rate.unwrap_or(1.0 / g.len().max(1) as f64).clamp(0.0, 1.0);
    let mut out = g.clone();
    for i in 0..g.len() {
        if rng.gen_bool(rate) {
            out.set(i, !g.get(i));
        }
    }
    out
}

pub fn invert_mutation(g: &Genotype) -> Genotype {
    g.inverse()
}

/* ───────────────────────── Selectie ───────────────────────── */

/// Indices van `fitness` van hoog naar laag.
fn ranked(fitness: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..fitness.len()).collect();
    order.sort_by(|&a, &b| fitness[b].total_cmp(&fitness[a]));
    order
}

/// De `n` fitste individuen, zonder teruglegging.
pub fn elitist_selection(pop: &[Genotype], fitness: &[f64], n: usize) -> Vec<Genotype> {
    ranked(fitness).into_iter().take(n).map(|i| pop[i].clone()).collect()
}

/// Roulette met teruglegging. Fitness wordt verschoven zodat het minimum een
/// kleine positieve kans houdt.
pub fn roulette_selection<R: Rng + ?Sized>(pop: &[Genotype], fitness: &[f64], n: usize, rng: &mut R) -> Vec<Genotype> {
    if pop.is_empty() {
        return Vec::new();
    }
    let min = fitness.iter().copied().fold(f64::INFINITY, f64::min);
    let weights: Vec<f64> = fitness.iter().map(|&f| f - min + 1e-6).collect();
    (0..n)
        .filter_map(|_| roulette_index(&weights, rng).ok())
        .map(|i| pop[i].clone())
        .collect()
}

/// Toernooi met teruglegging: per pick `size` willekeurige deelnemers, de fitste wint.
pub fn tournament_selection<R: Rng + ?Sized>(
    pop: &[Genotype],
    fitness: &[f64],
    n: usize,
    size: usize,
    rng: &mut R,
) -> Vec<Genotype> {
    if pop.is_empty() {
        return Vec::new();
    }
    (0..n)
        .map(|_| {
            let mut best = rng.gen_range(0..pop.len());
            for _ in 1..size.max(1) {
                let r = rng.gen_range(0..pop.len());
                if fitness[r] > fitness[best] {
                    best = r;
                }
            }
            pop[best].clone()
        })
        .collect()
}

/// Kiest `n` ouders volgens `p.parent_selection`.
pub fn select_parents<R: Rng + ?Sized>(
    pop: &[Genotype],
    fitness: &[f64],
    n: usize,
    p: &Params,
    rng: &mut R,
) -> Vec<Genotype> {
    match p.parent_selection {
        ParentSelection::Elitist => elitist_selection(pop, fitness, n),
        ParentSelection::Roulette => roulette_selection(pop, fitness, n, rng),
        ParentSelection::Tournament => tournament_selection(pop, fitness, n, p.tournament_size, rng),
    }
}

/* ───────────────────────── Vervanging ───────────────────────── */

/// Vervangt de `offspring.len()` minst fitte individuen door de nakomelingen.
pub fn worst_elimination(pop: Vec<Genotype>, fitness: &[f64], offspring: Vec<Genotype>) -> Vec<Genotype> {
    let keep = pop.len().saturating_sub(offspring.len());
    let order = ranked(fitness);
    let mut slots: Vec<Option<Genotype>> = pop.into_iter().map(Some).collect();
    let mut next: Vec<Genotype> = order
        .into_iter()
        .take(keep)
        .filter_map(|i| slots[i].take())
        .collect();
    next.extend(offspring);
    next
}

/// Maakt van een genotype een geldige cover.
pub fn repair<'g, G: GraphView>(graph: &'g G, genotype: &Genotype) -> CoverState<'g, G> {
    construct_from_seed(graph, &genotype.true_positions())
}

/// Houdt een willekeurige fractie `keep` van de ware bits over.
pub fn random_fragment<R: Rng + ?Sized>(g: &Genotype, keep: f64, rng: &mut R) -> Genotype {
    let ones = g.true_positions();
    let take = ((ones.len() as f64) * keep.clamp(0.0, 1.0)).round() as usize;
    let kept: Vec<usize> = ones.choose_multiple(rng, take).copied().collect();
    Genotype::from_vertices(g.len(), &kept)
}

/* ───────────────────────── Zoektochten ───────────────────────── */

#[tracing::instrument(level = "debug", skip_all)]
pub fn genetic_search<G, R>(graph: &G, p: &Params, rng: &mut R) -> SearchOutcome
where
    G: GraphView,
    R: Rng + ?Sized,
{
    let clock = SearchClock::start(p.cutoff_seconds);
    let mut incumbent = Incumbent::new(Strategy::Genetic);
    let n = graph.vertex_count();
    if n == 0 {
        incumbent.offer(&construct_vc(graph), &clock);
        return incumbent.into_outcome(0);
    }

    let evaluator = FitnessEvaluator::new(graph);
    let mut pop: Vec<Genotype> = (0..p.population_size).map(|_| Genotype::random(n, rng)).collect();
    let limit = p.generations.min(p.max_iter);
    let mut generation = 0usize;

    loop {
        let fitness: Vec<f64> = pop.iter().map(|g| evaluator.evaluate(g.mask())).collect();
        if let Some(&fittest) = ranked(&fitness).first() {
            incumbent.offer(&repair(graph, &pop[fittest]), &clock);
        }
        if generation >= limit || clock.expired() {
            break;
        }
        generation += 1;

        let parents = select_parents(&pop, &fitness, 2, p, rng);
        let [a, b] = parents.as_slice() else {
            break;
        };
        let (o1, o2) = uniform_crossover(a, b, rng);
        let offspring = vec![
            uniform_mutation(&o1, p.mutation_rate, rng),
            uniform_mutation(&o2, p.mutation_rate, rng),
        ];
        pop = worst_elimination(pop, &fitness, offspring);
    }

    incumbent.into_outcome(generation)
}

/// Herbouwt één individu tot een verfijnde geldige cover.
fn rebuild<'g, G, R>(
    graph: &'g G,
    genotype: &Genotype,
    clock: &SearchClock,
    p: &Params,
    rng: &mut R,
    incumbent: &mut Incumbent,
) -> CoverState<'g, G>
where
    G: GraphView,
    R: Rng + ?Sized,
{
    let seed = genotype.true_positions();
    let sub = SearchClock::start(p.memetic_rebuild_seconds.min(clock.remaining_secs()));
    match grasp_construct_from_seed(graph, &seed, p.grasp_alpha, &sub, rng) {
        Ok(mut state) => {
            state.remove_redundant();
            incumbent.offer(&state, clock);
            let (state, _) = refine(state, clock, &sub, p.grasp_refine_stagnation, p, rng, incumbent);
            state
        }
        Err(err) => {
            tracing::warn!(%err, "reconstructie mislukt, terugval op seeded constructie");
            let state = construct_from_seed(graph, &seed);
            incumbent.offer(&state, clock);
            state
        }
    }
}

#[tracing::instrument(level = "debug", skip_all)]
pub fn memetic_search<G, R>(graph: &G, p: &Params, rng: &mut R) -> SearchOutcome
where
    G: GraphView,
    R: Rng + ?Sized,
{
    let clock = SearchClock::start(p.cutoff_seconds);
    let mut incumbent = Incumbent::new(Strategy::Memetic);
    incumbent.offer(&construct_vc(graph), &clock);

    let n = graph.vertex_count();
    if n == 0 {
        return incumbent.into_outcome(0);
    }

    let evaluator = FitnessEvaluator::new(graph);
    let mut pop: Vec<Genotype> = (0..p.memetic_survivors).map(|_| Genotype::random(n, rng)).collect();
    let mut rounds = 0usize;

    while !clock.expired() && rounds < p.max_iter {
        rounds += 1;

        // Groei: minstens één herbouwronde, daarna tot de populatie vol is.
        loop {
            let mut rebuilt: Vec<Genotype> = Vec::with_capacity(pop.len());
            for g in &pop {
                if clock.expired() {
                    break;
                }
                let state = rebuild(graph, g, &clock, p, rng, &mut incumbent);
                rebuilt.push(Genotype::from_cover(&state));
            }

            let mut fragments: Vec<Genotype> = Vec::new();
            for g in &rebuilt {
                for _ in 0..p.memetic_fragments {
                    fragments.push(random_fragment(g, p.memetic_keep_fraction, rng));
                }
            }

            let grew = rebuilt.len() + fragments.len() > pop.len();
            pop = rebuilt;
            pop.extend(fragments);
            if !grew || pop.len() >= p.population_size || clock.expired() {
                break;
            }
        }

        // Snoeien.
        let fitness: Vec<f64> = pop.iter().map(|g| evaluator.evaluate(g.mask())).collect();
        pop = elitist_selection(&pop, &fitness, p.memetic_survivors);
        tracing::trace!(round = rounds, survivors = pop.len(), "populatie gesnoeid");
        if pop.is_empty() {
            break;
        }
    }

    incumbent.into_outcome(rounds)
}
