use crate::PseudoRandomNumberGenerator;

/// Returns a random integer in the range `[min, max)`.
pub fn range(prng: &mut dyn PseudoRandomNumberGenerator, min: u64, max: u64) -> u64 {
    prng.next().rem_euclid(max - min) + min
}

/// Returns a random integer in the range `[min, max]`.
pub fn range_inclusive(prng: &mut dyn PseudoRandomNumberGenerator, min: u64, max: u64) -> u64 {
    range(prng, min, max + 1)
}
