// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Shared random source for agent seeding, simulation drift and reply
//! scheduling. A fixed seed makes a whole session reproducible.

use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Clone)]
pub struct SharedRng {
    inner: Arc<Mutex<StdRng>>,
}

impl SharedRng {
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_os() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Seeded when `seed` is set, OS entropy otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_os(),
        }
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            inner: Arc::new(Mutex::new(rng)),
        }
    }

    /// Run `f` with exclusive access to the generator. Never hold across an await.
    pub fn with<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.inner.lock();
        f(&mut rng)
    }
}

impl Default for SharedRng {
    fn default() -> Self {
        Self::from_os()
    }
}

impl std::fmt::Debug for SharedRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedRng").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_same_seed_same_sequence() {
        let a = SharedRng::seeded(42);
        let b = SharedRng::seeded(42);
        let xs: Vec<u32> = (0..8).map(|_| a.with(|r| r.random())).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.with(|r| r.random())).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_clones_share_state() {
        let a = SharedRng::seeded(7);
        let b = a.clone();
        let fresh = SharedRng::seeded(7);
        let first: u64 = a.with(|r| r.random());
        let second: u64 = b.with(|r| r.random());
        let expected: (u64, u64) = fresh.with(|r| (r.random(), r.random()));
        assert_eq!((first, second), expected);
    }
}
