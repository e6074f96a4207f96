// Field of integers modulo the Mersenne prime 2^521 - 1 (the base
// field of curve E-521). Ten 56-bit limbs, the top one holding 17
// value bits; q = 3 mod 4.

use super::gfgen::{define_gfpm, define_gfpm_tests};

struct GF521M1Params;

impl GF521M1Params {
    const NUM_BITS: usize = 521;
    const C: i64 = 1;
    const NUM_DIGITS: usize = 10;
    const DIGIT_BITS: usize = 56;
}

define_gfpm!(GF521M1, GF521M1Params, GF521M1Scratchpad, gf521m1mod);
define_gfpm_tests!(GF521M1, GF521M1Scratchpad, 3, test_gf521m1mod);
