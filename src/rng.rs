//! Seeded Mersenne Twister (MT19937).
//!
//! Persisted guesses are replayed against targets recomputed from the stored seed, so the
//! output sequence here must never change. This is the reference `init_genrand` /
//! `genrand_int32` pair; `random_int31` drops the low bit.

const N: usize = 624;
const M: usize = 397;
const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;

/// Outputs thrown away right after seeding. Kept for compatibility with existing seeds.
pub const INITIAL_DISCARD: usize = 4;

#[derive(Clone)]
pub struct MersenneTwister {
    mt: [u32; N],
    mti: usize,
}

impl MersenneTwister {
    /// Seed the generator. Only the low 32 bits of `seed` are used.
    #[must_use]
    pub fn new(seed: i64) -> Self {
        let seed = seed as u32;
        let mut mt = [0u32; N];
        mt[0] = seed;
        for i in 1..N {
            let prev = mt[i - 1];
            let index = i as u32;
            mt[i] = 1_812_433_253u32
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(index);
        }
        Self { mt, mti: N }
    }

    /// Seed the generator and skip the historical warm-up outputs.
    #[must_use]
    pub fn for_puzzle(seed: i64) -> Self {
        let mut rng = Self::new(seed);
        for _ in 0..INITIAL_DISCARD {
            rng.random_int31();
        }
        rng
    }

    fn regenerate(&mut self) {
        for kk in 0..N {
            let y = (self.mt[kk] & UPPER_MASK) | (self.mt[(kk + 1) % N] & LOWER_MASK);
            let mag = if y & 1 == 0 { 0 } else { MATRIX_A };
            self.mt[kk] = self.mt[(kk + M) % N] ^ (y >> 1) ^ mag;
        }
        self.mti = 0;
    }

    pub fn random_int32(&mut self) -> u32 {
        if self.mti >= N {
            self.regenerate();
        }
        let mut y = self.mt[self.mti];
        self.mti += 1;

        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^ (y >> 18)
    }

    /// Next value in `0..2^31`.
    pub fn random_int31(&mut self) -> u32 {
        self.random_int32() >> 1
    }
}
