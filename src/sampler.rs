use rand::prelude::*;

use crate::types::{Position, PositionSet, Seed};

#[derive(Debug, Clone)]
/// Small deterministic RNG used for reproducible round draws.
///
/// splitmix64 stepping over a `u64` state; the round seed becomes the initial
/// state directly, so equal seeds replay equal streams.
pub struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    /// Creates a generator whose state is exactly `seed`.
    pub fn new(seed: Seed) -> Self {
        Self { state: seed }
    }

    fn next_u64_internal(&mut self) -> u64 {
        let mut z = self.state.wrapping_add(0x9E3779B97F4A7C15);
        self.state = z;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }
}

impl rand::RngCore for DeterministicRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64_internal() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_u64_internal()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let mut offset = 0;
        while offset < dest.len() {
            let value = self.next_u64_internal();
            let bytes = value.to_le_bytes();
            let remaining = dest.len() - offset;
            let copy_len = remaining.min(bytes.len());
            dest[offset..offset + copy_len].copy_from_slice(&bytes[..copy_len]);
            offset += copy_len;
        }
    }
}

/// Draws `sample_size` distinct ordinal positions from the unexcluded part of
/// a population, in one increasing pass (classical sequential selection
/// sampling).
///
/// Definitions:
/// - `remaining`: count of positions not yet drawn, `total − excluded.len()`.
/// - `excluded`: positions already drawn in earlier rounds; all lie within
///   `1..=total`. They are skipped without consuming the random stream.
/// - the population size is derived as `remaining + excluded.len()`.
///
/// Each unexcluded position is accepted with probability
/// `(sample_size − m) / (remaining − t)`, where `m` positions are already
/// accepted and `t` unexcluded positions were already examined. This gives
/// every unexcluded position marginal probability `sample_size / remaining`
/// and makes every subset of that size equally likely.
///
/// Callers keep `sample_size <= remaining`; the session layer clamps before
/// delegating here, which keeps the acceptance arithmetic exact.
///
/// Output is in ascending position order. Equal arguments reproduce equal
/// output. `sample_size == 0` returns an empty vector without constructing
/// the random stream.
pub fn sequential_sample(
    remaining: u64,
    sample_size: u64,
    seed: Seed,
    excluded: &PositionSet,
) -> Vec<Position> {
    debug_assert!(
        sample_size <= remaining,
        "sample_size {sample_size} exceeds remaining {remaining}"
    );
    if sample_size == 0 {
        return Vec::new();
    }
    let total = remaining + excluded.len() as u64;
    let mut rng = DeterministicRng::new(seed);
    let mut accepted: u64 = 0;
    let mut examined: u64 = 0;
    let mut picked = Vec::with_capacity(sample_size as usize);
    for position in 1..=total {
        if accepted == sample_size {
            break;
        }
        if excluded.contains(&position) {
            continue;
        }
        let draw = rng.random::<f64>();
        if draw * ((remaining - examined) as f64) < (sample_size - accepted) as f64 {
            picked.push(position);
            accepted += 1;
        }
        examined += 1;
    }
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    fn assert_valid_sample(
        picked: &[Position],
        remaining: u64,
        sample_size: u64,
        excluded: &PositionSet,
    ) {
        let total = remaining + excluded.len() as u64;
        assert_eq!(picked.len() as u64, sample_size, "wrong sample size");
        for window in picked.windows(2) {
            assert!(
                window[0] < window[1],
                "positions not strictly ascending: {picked:?}"
            );
        }
        for position in picked {
            assert!(
                (1..=total).contains(position),
                "position {position} outside 1..={total}"
            );
            assert!(
                !excluded.contains(position),
                "position {position} was already excluded"
            );
        }
    }

    #[test]
    fn same_seed_replays_same_stream() {
        let mut rng_a = DeterministicRng::new(123);
        let mut rng_b = DeterministicRng::new(123);
        for _ in 0..16 {
            assert_eq!(rng_a.next_u64(), rng_b.next_u64());
        }

        let mut bytes_a = [0u8; 13];
        let mut bytes_b = [0u8; 13];
        let mut rng_c = DeterministicRng::new(999);
        let mut rng_d = DeterministicRng::new(999);
        rng_c.fill_bytes(&mut bytes_a);
        rng_d.fill_bytes(&mut bytes_b);
        assert_eq!(bytes_a, bytes_b);

        let mut rng_e = DeterministicRng::new(999);
        let mut rng_f = DeterministicRng::new(999);
        assert_eq!(rng_e.next_u32() as u64, (rng_f.next_u64() as u32) as u64);
    }

    #[test]
    fn draws_requested_count_ascending_and_disjoint() {
        let excluded: PositionSet = [2, 4, 7].into_iter().collect();
        let remaining = 7;
        let picked = sequential_sample(remaining, 3, 42, &excluded);
        assert_valid_sample(&picked, remaining, 3, &excluded);
    }

    #[test]
    fn zero_sample_size_returns_empty() {
        let excluded = PositionSet::new();
        assert!(sequential_sample(10, 0, 7, &excluded).is_empty());
    }

    #[test]
    fn full_draw_returns_every_unexcluded_position() {
        let excluded: PositionSet = [2, 4].into_iter().collect();
        let picked = sequential_sample(4, 4, 1, &excluded);
        assert_eq!(picked, vec![1, 3, 5, 6]);
    }

    #[test]
    fn equal_arguments_reproduce_equal_output() {
        let excluded: PositionSet = [1, 5, 9].into_iter().collect();
        let first = sequential_sample(17, 6, 8675309, &excluded);
        let second = sequential_sample(17, 6, 8675309, &excluded);
        assert_eq!(first, second);
    }

    #[test]
    fn seeds_usually_disagree() {
        let excluded = PositionSet::new();
        let mut distinct = 0;
        for seed in 0..32u64 {
            if sequential_sample(100, 5, seed, &excluded)
                != sequential_sample(100, 5, seed + 1, &excluded)
            {
                distinct += 1;
            }
        }
        assert!(
            distinct >= 30,
            "adjacent seeds produced identical samples too often: {distinct}/32 differed"
        );
    }

    #[test]
    fn samples_are_not_simply_the_leading_prefix() {
        let excluded = PositionSet::new();
        let mut non_prefix = 0;
        for seed in 0..64u64 {
            let picked = sequential_sample(10, 2, seed, &excluded);
            assert_valid_sample(&picked, 10, 2, &excluded);
            if picked != vec![1, 2] {
                non_prefix += 1;
            }
        }
        assert!(
            non_prefix >= 48,
            "the acceptance draw almost never rejected a position: \
             only {non_prefix}/64 samples differed from the prefix"
        );
    }

    #[test]
    fn every_position_reachable_across_seeds() {
        let excluded: PositionSet = [3].into_iter().collect();
        let mut seen = PositionSet::new();
        for seed in 0..200u64 {
            seen.extend(sequential_sample(5, 2, seed, &excluded));
        }
        for position in [1u64, 2, 4, 5, 6] {
            assert!(
                seen.contains(&position),
                "position {position} never drawn across 200 seeds"
            );
        }
        assert!(!seen.contains(&3), "excluded position was drawn");
    }
}
