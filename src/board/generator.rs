// Board generation - shuffled labels 1..=N² in row-major order

use crate::config::GridSize;
use rand::Rng;

/// Fisher-Yates shuffle in place: walk from the last index down, swapping
/// each slot with a uniformly chosen slot in `[0, i]`
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Produce a uniformly shuffled permutation of `1..=size²`
pub fn generate<R: Rng + ?Sized>(size: GridSize, rng: &mut R) -> Vec<u32> {
    let mut numbers: Vec<u32> = (1..=size.max_number()).collect();
    shuffle(&mut numbers, rng);
    numbers
}

/// `generate` with the thread-local RNG
pub fn generate_default(size: GridSize) -> Vec<u32> {
    generate(size, &mut rand::thread_rng())
}

/// True when `values` holds each of `1..=size²` exactly once
pub fn is_permutation(size: GridSize, values: &[u32]) -> bool {
    if values.len() != size.cell_count() {
        return false;
    }
    let mut seen = vec![false; values.len()];
    for &value in values {
        let Some(slot) = (value as usize).checked_sub(1) else {
            return false;
        };
        match seen.get_mut(slot) {
            Some(flag) if !*flag => *flag = true,
            _ => return false,
        }
    }
    true
}
