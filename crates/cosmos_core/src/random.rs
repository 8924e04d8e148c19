use rand::distributions::WeightedIndex;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal, Poisson};
use std::sync::{Mutex, OnceLock};

/// Deterministic random stream.
///
/// Two sources built from the same seed yield the same values for the same
/// sequence of calls. Locations re-derive their material from a source seeded
/// with their stored seed, so nothing here may depend on global state.
#[derive(Debug, Clone)]
pub struct RandomSource {
    seed: u64,
    inner: ChaCha8Rng,
}

impl RandomSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seeded from the operating system; for runs that need no reproducibility
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().r#gen())
    }

    /// The seed this source was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Split off an independent child stream
    pub fn fork(&mut self) -> Self {
        Self::new(self.inner.next_u64())
    }

    pub fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    /// Draw a seed for a new location
    pub fn next_seed(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Uniform real in [min, max). An empty range yields `min`.
    pub fn next_real(&mut self, min: f64, max: f64) -> f64 {
        if max > min {
            self.inner.gen_range(min..max)
        } else {
            min
        }
    }

    /// True with probability `p`
    pub fn next_bool(&mut self, p: f64) -> bool {
        if p >= 1.0 {
            true
        } else if p > 0.0 {
            self.inner.gen_bool(p)
        } else {
            false
        }
    }

    /// Index in [0, n). `n == 0` yields 0.
    pub fn next_index(&mut self, n: usize) -> usize {
        if n <= 1 {
            0
        } else {
            self.inner.gen_range(0..n)
        }
    }

    /// Normal sample; a degenerate deviation returns the mean unchanged
    pub fn normal_sample(&mut self, mean: f64, std_dev: f64) -> f64 {
        match Normal::new(mean, std_dev) {
            Ok(normal) => normal.sample(&mut self.inner),
            Err(_) => mean,
        }
    }

    /// Half-normal sample folded above the mean, never negative
    pub fn positive_normal_sample(&mut self, mean: f64, std_dev: f64) -> f64 {
        let sample = self.normal_sample(mean, std_dev);
        (mean + (sample - mean).abs()).max(0.0)
    }

    /// Poisson-distributed count with expectation `lambda`
    pub fn poisson(&mut self, lambda: f64) -> u64 {
        if !(lambda.is_finite() && lambda > 0.0) {
            return 0;
        }
        match Poisson::new(lambda) {
            Ok(poisson) => {
                let count: f64 = poisson.sample(&mut self.inner);
                count.max(0.0) as u64
            }
            Err(_) => 0,
        }
    }

    /// Index drawn proportionally to `weights`; None when no weight is positive
    pub fn weighted_index(&mut self, weights: &[f64]) -> Option<usize> {
        WeightedIndex::new(weights)
            .ok()
            .map(|dist| dist.sample(&mut self.inner))
    }
}

impl RngCore for RandomSource {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}

static DEFAULT_SOURCE: OnceLock<Mutex<RandomSource>> = OnceLock::new();

/// Run `f` against the process-wide source.
///
/// Each call holds the lock for its whole duration, so draws from different
/// threads never interleave inside one call. Sequences across threads are not
/// reproducible; seed a `RandomSource` explicitly when that matters.
pub fn with_default_source<T>(f: impl FnOnce(&mut RandomSource) -> T) -> T {
    let source = DEFAULT_SOURCE.get_or_init(|| Mutex::new(RandomSource::from_entropy()));
    let mut guard = source
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    f(&mut guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = RandomSource::new(7);
        let mut b = RandomSource::new(7);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
            assert_eq!(a.next_real(-5.0, 5.0), b.next_real(-5.0, 5.0));
            assert_eq!(a.next_bool(0.3), b.next_bool(0.3));
            assert_eq!(a.normal_sample(0.0, 2.0), b.normal_sample(0.0, 2.0));
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = RandomSource::new(1);
        let mut b = RandomSource::new(2);
        let same = (0..16).filter(|_| a.next_u32() == b.next_u32()).count();
        assert!(same < 16);
    }

    #[test]
    fn test_ranges_respected() {
        let mut rng = RandomSource::new(99);
        for _ in 0..1000 {
            let x = rng.next_real(2e35, 2e40);
            assert!((2e35..2e40).contains(&x));
            assert!(rng.next_index(6) < 6);
            assert!(rng.positive_normal_sample(0.0, 0.05) >= 0.0);
        }
        assert_eq!(rng.next_real(3.0, 3.0), 3.0);
        assert_eq!(rng.next_index(0), 0);
        assert!(!rng.next_bool(0.0));
        assert!(rng.next_bool(1.0));
    }

    #[test]
    fn test_poisson_mean() {
        let mut rng = RandomSource::new(5);
        let n = 20_000;
        let total: u64 = (0..n).map(|_| rng.poisson(3.5)).sum();
        let mean = total as f64 / n as f64;
        assert!((mean - 3.5).abs() < 0.1, "mean = {}", mean);
        assert_eq!(rng.poisson(0.0), 0);
        assert_eq!(rng.poisson(f64::NAN), 0);
    }

    #[test]
    fn test_weighted_index_follows_weights() {
        let mut rng = RandomSource::new(11);
        let mut counts = [0u32; 2];
        for _ in 0..10_000 {
            let i = rng.weighted_index(&[1.0, 3.0]).unwrap();
            counts[i] += 1;
        }
        let share = counts[1] as f64 / 10_000.0;
        assert!((share - 0.75).abs() < 0.03, "share = {}", share);
        assert!(rng.weighted_index(&[0.0, 0.0]).is_none());
    }

    #[test]
    fn test_default_source_usable_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| with_default_source(|rng| rng.next_real(0.0, 1.0))))
            .collect();
        for handle in handles {
            let x = handle.join().unwrap();
            assert!((0.0..1.0).contains(&x));
        }
    }
}
