//! Few-shot example selection shared by the prompting benchmarks

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Draw up to `k` distinct examples from the pool, in random order.
///
/// `k` is clamped to the pool size; no pool means no examples.
pub fn sample_few_shot<'a, T>(pool: Option<&'a [T]>, k: usize, rng: &mut StdRng) -> Vec<&'a T> {
    match pool {
        Some(pool) if k > 0 => pool.choose_multiple(rng, k.min(pool.len())).collect(),
        _ => Vec::new(),
    }
}
