// src/scoring/tiebreak.rs

use std::sync::{Arc, Mutex};

use rand::{RngCore, SeedableRng, rngs::StdRng};

/// Random source for tie-breaking.
///
/// `Entropy` draws a fresh thread-local generator per call. `Seeded` shares one
/// generator across requests so picks are reproducible for a given seed.
#[derive(Clone, Debug, Default)]
pub enum TieBreaker {
    #[default]
    Entropy,
    Seeded(Arc<Mutex<StdRng>>),
}

impl TieBreaker {
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => TieBreaker::Seeded(Arc::new(Mutex::new(StdRng::seed_from_u64(seed)))),
            None => TieBreaker::Entropy,
        }
    }

    /// Runs `f` with the random source for one resolution.
    pub fn with_rng<T>(&self, f: impl FnOnce(&mut dyn RngCore) -> T) -> T {
        match self {
            TieBreaker::Entropy => f(&mut rand::thread_rng()),
            TieBreaker::Seeded(rng) => {
                let mut guard = rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                f(&mut *guard)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn test_same_seed_gives_same_sequence() {
        let a = TieBreaker::from_seed(Some(99));
        let b = TieBreaker::from_seed(Some(99));
        let xs: Vec<u32> = (0..5).map(|_| a.with_rng(|rng| rng.gen_range(0..1000))).collect();
        let ys: Vec<u32> = (0..5).map(|_| b.with_rng(|rng| rng.gen_range(0..1000))).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_clones_share_the_seeded_stream() {
        let a = TieBreaker::from_seed(Some(5));
        let b = a.clone();
        let reference = TieBreaker::from_seed(Some(5));
        let first = a.with_rng(|rng| rng.next_u64());
        let second = b.with_rng(|rng| rng.next_u64());
        assert_eq!(first, reference.with_rng(|rng| rng.next_u64()));
        assert_eq!(second, reference.with_rng(|rng| rng.next_u64()));
    }

    #[test]
    fn test_no_seed_is_entropy() {
        assert!(matches!(TieBreaker::from_seed(None), TieBreaker::Entropy));
    }
}
