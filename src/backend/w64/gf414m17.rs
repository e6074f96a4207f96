// Field of integers modulo the pseudo-Mersenne prime 2^414 - 17 (the
// base field of Curve41417). Eight 56-bit limbs, the top one holding
// 22 value bits; q = 3 mod 4.

use super::gfgen::{define_gfpm, define_gfpm_tests};

struct GF414M17Params;

impl GF414M17Params {
    const NUM_BITS: usize = 414;
    const C: i64 = 17;
    const NUM_DIGITS: usize = 8;
    const DIGIT_BITS: usize = 56;
}

define_gfpm!(GF414M17, GF414M17Params, GF414M17Scratchpad, gf414m17mod);
define_gfpm_tests!(GF414M17, GF414M17Scratchpad, 5, test_gf414m17mod);
