//! Injectable capabilities (time and randomness) so the registry's seeded
//! inventory and synthetic forecasts stay deterministic under test.

pub mod clock;
pub mod random;

pub use clock::{Clock, FixedClock, SystemClock};
pub use random::{EntropyRngSource, RandomSource, SequenceSource};
