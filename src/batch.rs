//! src/batch.rs
//!
//! Herhaalde onafhankelijke runs op één graaf en het resultaatbestand.
//!
//! Run `i` krijgt zijn eigen RNG met seed `seed + i`; de graaf wordt alleen
//! gelezen en mag dus tussen threads gedeeld worden. Met de `parallel`-feature
//! draaien de runs via rayon.
//!
//! Resultaatbestand: kop `size;time`, daarna één regel `grootte;seconden` per run.

use crate::{
    error::VcResult,
    graph::GraphView,
    params::{Params, Strategy},
    run_search,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Eén regel van het resultaatbestand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunRecord {
    pub size: usize,
    pub time: f64,
}

/// De RNG voor run `run` van een batch.
pub fn episode_rng(seed: u64, run: usize) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed.wrapping_add(run as u64))
}

fn single_run<G: GraphView>(graph: &G, strategy: Strategy, p: &Params, run: usize) -> VcResult<RunRecord> {
    let mut rng = episode_rng(p.seed, run);
    let outcome = run_search(graph, strategy, p, &mut rng)?;
    Ok(RunRecord {
        size: outcome.size(),
        time: outcome.time_to_find,
    })
}

/// Draait `p.runs` episodes van `strategy` en geeft de resultaten in run-volgorde.
#[tracing::instrument(level = "debug", skip(graph, p))]
pub fn run_batch<G>(graph: &G, strategy: Strategy, p: &Params) -> VcResult<Vec<RunRecord>>
where
    G: GraphView + Sync,
{
    p.validate()?;

    #[cfg(feature = "parallel")]
    let records = (0..p.runs)
        .into_par_iter()
        .map(|i| single_run(graph, strategy, p, i))
        .collect::<VcResult<Vec<_>>>()?;

    #[cfg(not(feature = "parallel"))]
    let records = (0..p.runs)
        .map(|i| single_run(graph, strategy, p, i))
        .collect::<VcResult<Vec<_>>>()?;

    tracing::info!(
        %strategy,
        runs = records.len(),
        best = records.iter().map(|r| r.size).min(),
        "batch afgerond"
    );
    Ok(records)
}

/// Seconden zoals de bestaande resultaatlezers ze verwachten: kortste
/// representatie, gehele waarden met `.0`.
fn format_seconds(t: f64) -> String {
    if t.is_finite() && t.fract() == 0.0 {
        format!("{t:.1}")
    } else {
        format!("{t}")
    }
}

pub fn write_results<W: Write>(mut out: W, records: &[RunRecord]) -> VcResult<()> {
    writeln!(out, "size;time")?;
    for r in records {
        writeln!(out, "{};{}", r.size, format_seconds(r.time))?;
    }
    out.flush()?;
    Ok(())
}

/// `dir/naam.mtx` ⇒ `result-naam.csv`.
pub fn result_file_name<P: AsRef<Path>>(graph_path: P) -> String {
    let stem = graph_path
        .as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("result-{stem}.csv")
}

/// Schrijft `records` naar `out_dir/result-<naam>.csv` en geeft het pad terug.
pub fn write_result_file<P, Q>(out_dir: P, graph_path: Q, records: &[RunRecord]) -> VcResult<PathBuf>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    std::fs::create_dir_all(out_dir.as_ref())?;
    let path = out_dir.as_ref().join(result_file_name(graph_path));
    let file = File::create(&path)?;
    write_results(BufWriter::new(file), records)?;
    Ok(path)
}
