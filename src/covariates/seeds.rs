// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::time::{SystemTime, UNIX_EPOCH};

/// Seeds are kept below 2^31 so every platform integer type holds them exactly.
const SEED_MASK: u64 = 0x7FFF_FFFF;

/// Origin of every random draw in a run.
///
/// A single base seed (explicit, or the clock at construction) fans out into one seed
/// per (year, realization, source position). Identical bases reproduce identical
/// graphs; distinct realizations get distinct seeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSource {
    base: u64,
}

impl SeedSource {
    pub fn explicit(seed: u64) -> Self {
        Self { base: seed }
    }

    /// Milliseconds since the Unix epoch.
    pub fn from_clock() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        Self { base: millis }
    }

    pub fn from_config(seed: Option<u64>) -> Self {
        seed.map(Self::explicit).unwrap_or_else(Self::from_clock)
    }

    pub fn base(&self) -> u64 {
        self.base
    }

    pub fn derive(&self, year: i32, realization: u32, position: usize) -> u64 {
        let z = mix(self.base ^ year as u64);
        let z = mix(z ^ realization as u64);
        mix(z ^ position as u64) & SEED_MASK
    }
}

/// splitmix64 finalizer
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_same_base_same_seeds() {
        let a = SeedSource::explicit(42);
        let b = SeedSource::explicit(42);
        assert_eq!(a.derive(2020, 1, 0), b.derive(2020, 1, 0));
    }

    #[test]
    fn test_seeds_differ_across_realizations_and_positions() {
        let seeds = SeedSource::explicit(7);
        let drawn: HashSet<u64> = (1..=10)
            .flat_map(|r| (0..4).map(move |pos| (r, pos)))
            .map(|(r, pos)| seeds.derive(2020, r, pos))
            .collect();
        assert_eq!(drawn.len(), 40);
    }

    #[test]
    fn test_seeds_fit_in_31_bits() {
        let seeds = SeedSource::explicit(u64::MAX);
        for r in 1..100 {
            assert!(seeds.derive(2017, r, 3) <= SEED_MASK);
        }
    }

    #[test]
    fn test_from_config_prefers_explicit_seed() {
        assert_eq!(SeedSource::from_config(Some(9)).base(), 9);
    }
}
