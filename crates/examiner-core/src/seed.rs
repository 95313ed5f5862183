//! Seed sources for question shuffling.
//!
//! The engine never reaches for ambient randomness. A seed is either given
//! explicitly or drawn from a [`SeedSource`] handed in at construction, so
//! every run can be logged and replayed.

use rand::rngs::OsRng;
use rand::RngCore;

/// Supplies the seed for an exam when the caller did not fix one.
pub trait SeedSource {
    fn next_seed(&mut self) -> u64;
}

/// Draws seeds from the operating system's random source.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsSeedSource;

impl SeedSource for OsSeedSource {
    fn next_seed(&mut self) -> u64 {
        OsRng.next_u64()
    }
}

/// Always returns the same seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSeed(pub u64);

impl SeedSource for FixedSeed {
    fn next_seed(&mut self) -> u64 {
        self.0
    }
}

impl<F: FnMut() -> u64> SeedSource for F {
    fn next_seed(&mut self) -> u64 {
        self()
    }
}
