#![forbid(unsafe_code)]

//! Reproducible [`RandomSource`] implementations for host-driven runs.

use landing_core::RandomSource;

/// Simple deterministic PRNG (xorshift64) for reproducible progress runs.
#[derive(Debug, Clone)]
pub struct XorShiftRandom {
    state: u64,
}

impl XorShiftRandom {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }
}

impl RandomSource for XorShiftRandom {
    fn next_unit(&mut self) -> f64 {
        // Top 53 bits map exactly onto the f64 mantissa, giving [0, 1).
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Replays a fixed list of units, cycling when exhausted.
///
/// An empty script yields `0.0` forever.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    units: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    #[must_use]
    pub fn new(units: impl Into<Vec<f64>>) -> Self {
        Self {
            units: units.into(),
            cursor: 0,
        }
    }

    /// Always yields `unit`.
    #[must_use]
    pub fn constant(unit: f64) -> Self {
        Self::new(vec![unit])
    }

    /// How many units have been drawn so far.
    #[must_use]
    pub const fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        if self.units.is_empty() {
            return 0.0;
        }
        let unit = self.units[self.cursor % self.units.len()];
        self.cursor += 1;
        unit
    }
}
