//! src/select.rs
//!
//! Best-of-k sampling (BMS): trek `k` kandidaten met teruglegging en houd de
//! kandidaat met de laagste score. Benadert "kies het minimum" in O(k) in
//! plaats van O(n), ten koste van exactheid.

use crate::error::{VcError, VcResult};
use rand::Rng;

/// Kiest uit `candidates` de beste van `k` trekkingen (met teruglegging)
/// volgens `score`, waarbij lager beter is. Bij gelijke score wint de eerst
/// getrokken kandidaat. `k == 0` wordt als `k == 1` behandeld.
///
/// Geeft `EmptyCandidateSet` als `candidates` leeg is.
pub fn select_best_of<T, S, F, R>(candidates: &[T], k: usize, mut score: F, rng: &mut R) -> VcResult<T>
where
    T: Copy,
    S: PartialOrd,
    F: FnMut(T) -> S,
    R: Rng + ?Sized,
{
    match candidates.len() {
        0 => return Err(VcError::EmptyCandidateSet),
        1 => return Ok(candidates[0]),
        _ => {}
    }

    let mut best = candidates[rng.gen_range(0..candidates.len())];
    let mut best_score = score(best);
    for _ in 1..k.max(1) {
        let r = candidates[rng.gen_range(0..candidates.len())];
        let s = score(r);
        if s < best_score {
            best = r;
            best_score = s;
        }
    }
    Ok(best)
}

/// Roulette wheel: kiest een index met kans evenredig aan `weights[i]`.
/// Niet-eindige of negatieve gewichten tellen als nul; is de som nul, dan
/// wordt uniform gekozen. Geeft `EmptyCandidateSet` als `weights` leeg is.
pub fn roulette_index<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> VcResult<usize> {
    if weights.is_empty() {
        return Err(VcError::EmptyCandidateSet);
    }
    let clean = |w: f64| if w.is_finite() && w > 0.0 { w } else { 0.0 };
    let total: f64 = weights.iter().map(|&w| clean(w)).sum();
    if total <= 0.0 {
        return Ok(rng.gen_range(0..weights.len()));
    }

    let mut pick = rng.gen::<f64>() * total;
    let mut last_positive = 0;
    for (i, &w) in weights.iter().enumerate() {
        let w = clean(w);
        if w == 0.0 {
            continue;
        }
        last_positive = i;
        pick -= w;
        if pick <= 0.0 {
            return Ok(i);
        }
    }
    // Afrondingsfouten: de laatste kandidaat met gewicht.
    Ok(last_positive)
}
