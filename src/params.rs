//! src/params.rs
//!
//! Bundelt alle afstembare parameters voor de MVC-strategieën, plus de keuze
//! van strategie. Laadbaar uit YAML; ontbrekende sleutels krijgen hun default,
//! onbekende sleutels worden geweigerd.

use crate::error::{VcError, VcResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// De uitwisselbare zoekstrategieën.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Exchange-engine met twee verwijderingen en reparatie.
    #[default]
    Greedy,
    /// FastVC: één verwijdering, reparatie via een willekeurige onbedekte kant.
    FastVc,
    Annealing,
    Tabu,
    Aco,
    Grasp,
    Genetic,
    Memetic,
}

impl Strategy {
    pub const ALL: [Strategy; 8] = [
        Strategy::Greedy,
        Strategy::FastVc,
        Strategy::Annealing,
        Strategy::Tabu,
        Strategy::Aco,
        Strategy::Grasp,
        Strategy::Genetic,
        Strategy::Memetic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Greedy => "greedy",
            Strategy::FastVc => "fastvc",
            Strategy::Annealing => "annealing",
            Strategy::Tabu => "tabu",
            Strategy::Aco => "aco",
            Strategy::Grasp => "grasp",
            Strategy::Genetic => "genetic",
            Strategy::Memetic => "memetic",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = VcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Strategy::ALL
            .into_iter()
            .find(|st| st.name() == lower)
            .ok_or_else(|| VcError::Config(format!("onbekende strategie '{s}'")))
    }
}

/// Ouderselectie in het genetisch algoritme.
#[cfg_attr(feature = "python", pyo3::pyclass(eq, eq_int))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParentSelection {
    /// De fitste individuen, zonder teruglegging.
    Elitist,
    #[default]
    Roulette,
    /// Toernooien van `tournament_size` willekeurige deelnemers.
    Tournament,
}

/// Alle afstembare besturingselementen.
#[cfg_attr(feature = "python", pyo3::pyclass(get_all, set_all))]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    /* ─── Begrenzing ────────────────────────────────────────────── */
    pub cutoff_seconds: f64,
    pub max_iter: usize,        // harde limiet op iteraties/rondes/generaties
    pub stagnation_iter: usize, // stop na zoveel iteraties zonder verbetering

    /* ─── Selectie & exchange ───────────────────────────────────── */
    pub bms_samples: usize,       // k in best-of-k sampling
    pub removals_per_step: usize, // 1 of 2

    /* ─── Simulated annealing ───────────────────────────────────── */
    pub start_temperature: f64,
    pub end_temperature: f64,
    pub cooling_factor: f64,
    pub cooling_step_iters: usize,

    /* ─── Tabu ──────────────────────────────────────────────────── */
    pub tabu_size: usize,

    /* ─── GRASP ─────────────────────────────────────────────────── */
    pub grasp_alpha: f64,
    pub grasp_refine_stagnation: usize,

    /* ─── Ant colony ────────────────────────────────────────────── */
    pub ant_count: usize,
    pub pheromone_decay: f64,
    pub pheromone_q: Option<f64>, // None ⇒ 0.75·n
    pub initial_pheromone: f64,

    /* ─── Populatie ─────────────────────────────────────────────── */
    pub population_size: usize,
    pub mutation_rate: Option<f64>, // None ⇒ 1/n
    pub generations: usize,
    pub parent_selection: ParentSelection,
    pub tournament_size: usize,
    pub memetic_survivors: usize,
    pub memetic_fragments: usize,
    pub memetic_keep_fraction: f64,
    pub memetic_rebuild_seconds: f64, // tijdslimiet per GRASP-reconstructie

    /* ─── Batch ─────────────────────────────────────────────────── */
    pub runs: usize,
    pub seed: u64,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            cutoff_seconds: 10.0,
            max_iter: 100_000_000,
            stagnation_iter: 1_000,
            bms_samples: 50,
            removals_per_step: 2,
            start_temperature: 30.0,
            end_temperature: 1e-4,
            cooling_factor: 0.9999,
            cooling_step_iters: 30,
            tabu_size: 10,
            grasp_alpha: 0.25,
            grasp_refine_stagnation: 100,
            ant_count: 10,
            pheromone_decay: 0.9,
            pheromone_q: None,
            initial_pheromone: 1e-2,
            population_size: 20,
            mutation_rate: None,
            generations: 40,
            parent_selection: ParentSelection::Roulette,
            tournament_size: 3,
            memetic_survivors: 5,
            memetic_fragments: 2,
            memetic_keep_fraction: 0.5,
            memetic_rebuild_seconds: 1.0,
            runs: 10,
            seed: 42,
        }
    }
}

impl Params {
    pub fn with_cutoff(mut self, seconds: f64) -> Self {
        self.cutoff_seconds = seconds;
        self
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn with_stagnation(mut self, stagnation_iter: usize) -> Self {
        self.stagnation_iter = stagnation_iter;
        self
    }

    /// Controleert of elke parameter binnen zijn domein ligt.
    pub fn validate(&self) -> VcResult<()> {
        fn check(ok: bool, msg: &str) -> VcResult<()> {
            if ok {
                Ok(())
            } else {
                Err(VcError::Config(msg.to_string()))
            }
        }

        check(!self.cutoff_seconds.is_nan(), "cutoff_seconds is NaN")?;
        check(self.bms_samples >= 1, "bms_samples moet minstens 1 zijn")?;
        check(
            (1..=2).contains(&self.removals_per_step),
            "removals_per_step moet 1 of 2 zijn",
        )?;
        check(
            self.start_temperature > 0.0 && self.end_temperature > 0.0,
            "temperaturen moeten positief zijn",
        )?;
        check(
            self.end_temperature <= self.start_temperature,
            "end_temperature mag niet boven start_temperature liggen",
        )?;
        check(
            self.cooling_factor > 0.0 && self.cooling_factor < 1.0,
            "cooling_factor moet in (0, 1) liggen",
        )?;
        check(self.cooling_step_iters >= 1, "cooling_step_iters moet minstens 1 zijn")?;
        check(self.tabu_size >= 1, "tabu_size moet minstens 1 zijn")?;
        check(
            (0.0..=1.0).contains(&self.grasp_alpha),
            "grasp_alpha moet in [0, 1] liggen",
        )?;
        check(self.ant_count >= 1, "ant_count moet minstens 1 zijn")?;
        check(
            self.pheromone_decay > 0.0 && self.pheromone_decay <= 1.0,
            "pheromone_decay moet in (0, 1] liggen",
        )?;
        check(self.initial_pheromone > 0.0, "initial_pheromone moet positief zijn")?;
        check(
            self.pheromone_q.map_or(true, |q| q > 0.0),
            "pheromone_q moet positief zijn",
        )?;
        check(self.population_size >= 2, "population_size moet minstens 2 zijn")?;
        check(
            self.mutation_rate.map_or(true, |r| (0.0..=1.0).contains(&r)),
            "mutation_rate moet in [0, 1] liggen",
        )?;
        check(self.tournament_size >= 1, "tournament_size moet minstens 1 zijn")?;
        check(
            self.memetic_survivors >= 1 && self.memetic_survivors < self.population_size,
            "memetic_survivors moet in [1, population_size) liggen",
        )?;
        check(
            (0.0..=1.0).contains(&self.memetic_keep_fraction),
            "memetic_keep_fraction moet in [0, 1] liggen",
        )?;
        check(
            self.memetic_rebuild_seconds > 0.0,
            "memetic_rebuild_seconds moet positief zijn",
        )?;
        check(self.runs >= 1, "runs moet minstens 1 zijn")?;
        Ok(())
    }
}

#[cfg(feature = "python")]
#[pyo3::pymethods]
impl Params {
    #[new]
    fn py_new() -> Self {
        Self::default()
    }

    /// Kopie, blootgesteld aan Python.
    pub fn copy(&self) -> Self {
        self.clone()
    }
}

/// Een volledige run-configuratie: strategie plus parameters.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub strategy: Strategy,
    pub params: Params,
}

impl RunConfig {
    /// Parset en valideert een YAML-configuratie.
    pub fn from_yaml(yaml: &str) -> VcResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.params.validate()?;
        Ok(config)
    }

    /// Leest en valideert een YAML-configuratie van schijf.
    pub fn load<P: AsRef<Path>>(path: P) -> VcResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}
