// Field of integers modulo the pseudo-Mersenne prime 2^382 - 105 (the
// base field of curve E-382). Seven 56-bit limbs, the top one holding
// 46 value bits; q = 3 mod 4.

use super::gfgen::{define_gfpm, define_gfpm_tests};

struct GF382M105Params;

impl GF382M105Params {
    const NUM_BITS: usize = 382;
    const C: i64 = 105;
    const NUM_DIGITS: usize = 7;
    const DIGIT_BITS: usize = 56;
}

define_gfpm!(GF382M105, GF382M105Params, GF382M105Scratchpad, gf382m105mod);
define_gfpm_tests!(GF382M105, GF382M105Scratchpad, 3, test_gf382m105mod);
