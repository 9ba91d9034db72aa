use crate::domain::{HarnessError, HarnessResult};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of run seeds for configurations that ask for automatic seeding.
pub trait SeedClock {
    fn seed_from_clock(&self) -> HarnessResult<i64>;
}

/// Wall-clock seeding; two translations at different instants get different seeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SeedClock for SystemClock {
    fn seed_from_clock(&self) -> HarnessResult<i64> {
        let unix_nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|source| {
                HarnessError::internal(
                    "SYS.CLOCK",
                    format!("failed to read system time for seed derivation: {}", source),
                )
            })?
            .as_nanos();
        Ok(fold_to_seed(unix_nanos))
    }
}

/// Always yields the same value; used where a pinned clock is needed.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl SeedClock for FixedClock {
    fn seed_from_clock(&self) -> HarnessResult<i64> {
        Ok(self.0)
    }
}

const SEED_MASK: u128 = 0x7fff_ffff;

// Solver RNGs take a positive 31-bit seed; zero would ask for auto-seeding again.
fn fold_to_seed(unix_nanos: u128) -> i64 {
    let folded = (unix_nanos ^ (unix_nanos >> 31)) & SEED_MASK;
    if folded == 0 { 1 } else { folded as i64 }
}
