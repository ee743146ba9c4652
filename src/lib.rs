// src/lib.rs

// Publieke modules voor gebruik binnen de Rust-crate
pub mod aco;
pub mod anneal;
pub mod batch;
pub mod construct;
pub mod cover;
pub mod engine;
pub mod error;
pub mod fastvc;
pub mod fitness;
pub mod genetic;
pub mod graph;
pub mod grasp;
pub mod params;
pub mod search;
pub mod select;
pub mod tabu;

// Her-exporteer de belangrijkste types voor Rust-gebruikers
pub use cover::CoverState;
pub use error::{VcError, VcResult};
pub use graph::{load_graph, Graph, GraphView};
pub use params::{ParentSelection, Params, RunConfig, Strategy};
pub use search::SearchOutcome;

use rand::Rng;

/// Eén episode van `strategy` op `graph`. Faalt alleen bij ongeldige parameters;
/// alle andere problemen tijdens het zoeken leveren de beste cover tot dan toe op.
pub fn run_search<G, R>(graph: &G, strategy: Strategy, p: &Params, rng: &mut R) -> VcResult<SearchOutcome>
where
    G: GraphView,
    R: Rng + ?Sized,
{
    p.validate()?;
    let outcome = match strategy {
        Strategy::Greedy => engine::local_search(graph, p, rng),
        Strategy::FastVc => fastvc::fast_vc(graph, p, rng),
        Strategy::Annealing => anneal::simulated_annealing(graph, p, rng),
        Strategy::Tabu => tabu::tabu_search(graph, p, rng),
        Strategy::Aco => aco::ant_colony(graph, p, rng),
        Strategy::Grasp => grasp::grasp_search(graph, p, rng),
        Strategy::Genetic => genetic::genetic_search(graph, p, rng),
        Strategy::Memetic => genetic::memetic_search(graph, p, rng),
    };
    Ok(outcome)
}

#[cfg(feature = "python")]
mod python {
    use crate::{batch, graph::load_graph, params::{ParentSelection, Params}, run_search, Strategy, VcError};
    use pyo3::prelude::*;

    fn to_py_err(e: VcError) -> PyErr {
        match e {
            VcError::Io(err) => PyErr::new::<pyo3::exceptions::PyIOError, _>(err.to_string()),
            other => PyErr::new::<pyo3::exceptions::PyValueError, _>(other.to_string()),
        }
    }

    fn borrow_params(py_params: &Py<Params>) -> Params {
        Python::with_gil(|py| py_params.borrow(py).clone())
    }

    /// Python-binding: één episode, geeft (grootte, seconden tot beste cover).
    #[pyfunction]
    #[pyo3(signature = (instance_path, strategy, py_params))]
    fn solve_py(instance_path: String, strategy: String, py_params: Py<Params>) -> PyResult<(usize, f64)> {
        let graph = load_graph(&instance_path).map_err(to_py_err)?;
        let strategy: Strategy = strategy.parse().map_err(to_py_err)?;
        let p = borrow_params(&py_params);
        let mut rng = batch::episode_rng(p.seed, 0);
        let outcome = run_search(&graph, strategy, &p, &mut rng).map_err(to_py_err)?;
        Ok((outcome.size(), outcome.time_to_find))
    }

    /// Python-binding: `runs` episodes, schrijft `result-<naam>.csv` in `out_dir`.
    #[pyfunction]
    #[pyo3(signature = (instance_path, out_dir, strategy, py_params))]
    fn batch_py(instance_path: String, out_dir: String, strategy: String, py_params: Py<Params>) -> PyResult<String> {
        let graph = load_graph(&instance_path).map_err(to_py_err)?;
        let strategy: Strategy = strategy.parse().map_err(to_py_err)?;
        let p = borrow_params(&py_params);
        let records = batch::run_batch(&graph, strategy, &p).map_err(to_py_err)?;
        let path = batch::write_result_file(&out_dir, &instance_path, &records).map_err(to_py_err)?;
        Ok(path.to_string_lossy().into_owned())
    }

    /// Helperfunctie om een graafbestand te parsen en (n, m) terug te geven.
    #[pyfunction]
    fn parse_mtx_py(instance_path: String) -> PyResult<(usize, usize)> {
        let graph = load_graph(&instance_path).map_err(to_py_err)?;
        Ok((graph.n(), graph.m()))
    }

    /// Definieert de Python-module `_native`.
    #[pymodule]
    fn _native(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_class::<Params>()?;
        m.add_class::<ParentSelection>()?;
        m.add_function(wrap_pyfunction!(solve_py, m)?)?;
        m.add_function(wrap_pyfunction!(batch_py, m)?)?;
        m.add_function(wrap_pyfunction!(parse_mtx_py, m)?)?;
        Ok(())
    }
}
