use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform randomness for inventory seeding and synthetic demand
/// noise. Implementations yield values in `[0, 1)`.
pub trait RandomSource: Send {
    fn next_f64(&mut self) -> f64;

    /// Uniform integer in the inclusive range `[lo, hi]`.
    fn pick_u32(&mut self, lo: u32, hi: u32) -> u32 {
        debug_assert!(lo <= hi);
        let span = (hi - lo + 1) as f64;
        lo + (self.next_f64() * span) as u32
    }

    /// Uniform value in `[-magnitude, +magnitude)`.
    fn noise(&mut self, magnitude: f64) -> f64 {
        self.next_f64() * 2.0 * magnitude - magnitude
    }
}

/// Production source backed by an entropy-seeded rng. `StdRng` rather than
/// the thread-local rng because the service shares one source across
/// handlers, which requires `Send`.
pub struct EntropyRngSource(StdRng);

impl Default for EntropyRngSource {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl RandomSource for EntropyRngSource {
    fn next_f64(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// Deterministic source that replays a fixed sequence, cycling when
/// exhausted. Tests feed it the exact draws a scenario needs.
pub struct SequenceSource {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceSource {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Every draw returns the same value.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceSource {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
