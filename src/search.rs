//! src/search.rs
//!
//! Gedeelde toestand van een zoekepisode: de wandklok met cutoff, de beste
//! cover tot nu toe (incumbent) en het resultaat dat een strategie teruggeeft.

use crate::cover::CoverState;
use crate::graph::GraphView;
use crate::params::Strategy;
use std::time::{Duration, Instant};

/// Wandklok van één episode. De cutoff wordt per iteratie gecontroleerd.
#[derive(Clone, Copy, Debug)]
pub struct SearchClock {
    start: Instant,
    cutoff: Duration,
}

impl SearchClock {
    /// Start de klok. Een cutoff `≤ 0` (of NaN) is meteen verlopen; `+∞` nooit.
    pub fn start(cutoff_seconds: f64) -> Self {
        let cutoff = if cutoff_seconds == f64::INFINITY {
            Duration::MAX
        } else if cutoff_seconds > 0.0 {
            Duration::try_from_secs_f64(cutoff_seconds).unwrap_or(Duration::MAX)
        } else {
            Duration::ZERO
        };
        Self {
            start: Instant::now(),
            cutoff,
        }
    }

    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    #[inline]
    pub fn expired(&self) -> bool {
        self.start.elapsed() >= self.cutoff
    }

    /// Resterende tijd in seconden (nooit negatief).
    pub fn remaining_secs(&self) -> f64 {
        self.cutoff.saturating_sub(self.start.elapsed()).as_secs_f64()
    }
}

/// Uitkomst van één episode.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome {
    /// De beste geldige cover, oplopend gesorteerd.
    pub cover: Vec<usize>,
    /// Seconden vanaf de start van de episode tot de beste cover gevonden werd.
    pub time_to_find: f64,
    /// Aantal uitgevoerde iteraties (of rondes/generaties, per strategie).
    pub iterations: usize,
    /// Elke vastgelegde beste grootte, in volgorde; strikt dalend.
    pub improvements: Vec<usize>,
}

impl SearchOutcome {
    #[inline]
    pub fn size(&self) -> usize {
        self.cover.len()
    }
}

/// De beste geldige cover van een episode, altijd als waardekopie bewaard.
#[derive(Clone, Debug)]
pub struct Incumbent {
    strategy: Strategy,
    best: Option<Vec<usize>>,
    found_at: f64,
    improvements: Vec<usize>,
}

impl Incumbent {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            best: None,
            found_at: 0.0,
            improvements: Vec::new(),
        }
    }

    /// Grootte van de beste cover, of `None` als er nog geen is.
    #[inline]
    pub fn size(&self) -> Option<usize> {
        self.best.as_ref().map(Vec::len)
    }

    /// `true` als een geldige cover van grootte `size` een verbetering zou zijn.
    #[inline]
    pub fn improves(&self, size: usize) -> bool {
        self.size().map_or(true, |best| size < best)
    }

    /// Legt `cover` vast als hij geldig en strikt kleiner is dan de huidige beste.
    pub fn offer<G: GraphView>(&mut self, cover: &CoverState<'_, G>, clock: &SearchClock) -> bool {
        if !cover.is_valid() || !self.improves(cover.size()) {
            return false;
        }
        self.record(cover.to_sorted_vec(), clock);
        true
    }

    /// Zoals [`Incumbent::offer`], voor een cover die de aanroeper al gevalideerd heeft.
    pub fn offer_vertices(&mut self, mut vertices: Vec<usize>, clock: &SearchClock) -> bool {
        if !self.improves(vertices.len()) {
            return false;
        }
        vertices.sort_unstable();
        self.record(vertices, clock);
        true
    }

    fn record(&mut self, vertices: Vec<usize>, clock: &SearchClock) {
        self.found_at = clock.elapsed_secs();
        self.improvements.push(vertices.len());
        tracing::debug!(
            strategy = %self.strategy,
            size = vertices.len(),
            elapsed = self.found_at,
            "nieuwe beste cover"
        );
        self.best = Some(vertices);
    }

    /// Sluit de episode af.
    pub fn into_outcome(self, iterations: usize) -> SearchOutcome {
        let cover = self.best.unwrap_or_default();
        tracing::info!(
            strategy = %self.strategy,
            size = cover.len(),
            time_to_find = self.found_at,
            iterations,
            "episode afgerond"
        );
        SearchOutcome {
            cover,
            time_to_find: self.found_at,
            iterations,
            improvements: self.improvements,
        }
    }
}
