//! Random source for idle symbol selection and cycle jitter.

/// Source of the only randomness in the machine: which strip symbol a slot shows
/// when it wraps during free spinning, and the jitter on a reel's travel.
/// Injected so tests can pin it down.
pub trait SymbolRng {
    /// A number in `[0, upper_bound)`. `upper_bound` is never zero.
    fn next_below(&mut self, upper_bound: u32) -> u32;
}

/// Seedable pseudo-random number generator (xorshift64).
/// Deterministic, fast, no-std compatible.
#[derive(Debug, Clone)]
pub struct XorShiftRng {
    state: u64,
}

impl XorShiftRng {
    pub fn new(seed: u64) -> Self {
        XorShiftRng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

impl SymbolRng for XorShiftRng {
    fn next_below(&mut self, upper_bound: u32) -> u32 {
        (self.next_u64() % upper_bound.max(1) as u64) as u32
    }
}

/// Replays a fixed sequence, cycling. Handy for pinning idle textures.
#[derive(Debug, Clone)]
pub struct SequenceRng {
    values: Vec<u32>,
    cursor: usize,
}

impl SequenceRng {
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl SymbolRng for SequenceRng {
    fn next_below(&mut self, upper_bound: u32) -> u32 {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value % upper_bound.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_deterministic() {
        let mut rng1 = XorShiftRng::new(42);
        let mut rng2 = XorShiftRng::new(42);
        for _ in 0..10 {
            assert_eq!(rng1.next_below(1000), rng2.next_below(1000));
        }
    }

    #[test]
    fn rng_zero_seed_handled() {
        let mut rng = XorShiftRng::new(0);
        assert!(rng.next_below(100) < 100);
    }

    #[test]
    fn sequence_cycles_and_bounds() {
        let mut rng = SequenceRng::new(vec![1, 7]);
        assert_eq!(rng.next_below(10), 1);
        assert_eq!(rng.next_below(5), 2);
        assert_eq!(rng.next_below(10), 1);
    }
}
