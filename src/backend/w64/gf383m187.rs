// Field of integers modulo the pseudo-Mersenne prime 2^383 - 187 (the
// base field of Curve383187). Seven 56-bit limbs, the top one holding
// 47 value bits. q = 5 mod 8, so square roots go through the (q+3)/8
// ladder with the quartic correction factor.

use super::gfgen::{define_gfpm, define_gfpm_tests};

struct GF383M187Params;

impl GF383M187Params {
    const NUM_BITS: usize = 383;
    const C: i64 = 187;
    const NUM_DIGITS: usize = 7;
    const DIGIT_BITS: usize = 56;
}

define_gfpm!(GF383M187, GF383M187Params, GF383M187Scratchpad, gf383m187mod);
define_gfpm_tests!(GF383M187, GF383M187Scratchpad, 2, test_gf383m187mod);

// The quartic paths are specific to q = 5 mod 8; exercise them with
// values whose symbols are known in closed form.
#[cfg(test)]
mod test_gf383m187_quartic {

    use super::GF383M187;

    #[test]
    fn quartic_symbols() {
        // 2 is a non-residue for q = 5 mod 8, so 4 is a quadratic
        // residue but a quartic non-residue, and 16 is a quartic
        // residue.
        let two = GF383M187::from_u32(2);
        assert_eq!(two.legendre(), -1);
        let four = GF383M187::from_u32(4);
        assert_eq!(four.legendre(), 1);
        assert_eq!(four.legendre_quartic(), -1);
        let sixteen = GF383M187::from_u32(16);
        assert_eq!(sixteen.legendre_quartic(), 1);
    }

    #[test]
    fn corrected_sqrt() {
        // sqrt(4) forces the correction factor (4 is a quartic
        // non-residue) and must come back as one of the two square
        // roots of 4.
        let two = GF383M187::from_u32(2);
        let four = GF383M187::from_u32(4);
        let r = four.sqrt();
        assert!(r.square().equals(&four) == 0xFFFFFFFF);
        assert!((r.equals(&two) | r.equals(&-two)) == 0xFFFFFFFF);

        // sqrt(16) takes the uncorrected path.
        let sixteen = GF383M187::from_u32(16);
        let r = sixteen.sqrt();
        assert!(r.square().equals(&sixteen) == 0xFFFFFFFF);

        let u = four.inv_sqrt();
        assert!((four * u.square()).equals(&GF383M187::ONE) == 0xFFFFFFFF);
        let u = sixteen.inv_sqrt();
        assert!((sixteen * u.square()).equals(&GF383M187::ONE)
            == 0xFFFFFFFF);
    }
}
