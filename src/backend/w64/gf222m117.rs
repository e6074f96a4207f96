// Field of integers modulo the pseudo-Mersenne prime 2^222 - 117 (the
// base field of curve E-222). Four 58-bit limbs, the top one holding
// 48 value bits; q = 3 mod 4, so square roots use the (q+1)/4 ladder.

use super::gfgen::{define_gfpm, define_gfpm_tests};

struct GF222M117Params;

impl GF222M117Params {
    const NUM_BITS: usize = 222;
    const C: i64 = 117;
    const NUM_DIGITS: usize = 4;
    const DIGIT_BITS: usize = 58;
}

define_gfpm!(GF222M117, GF222M117Params, GF222M117Scratchpad, gf222m117mod);
define_gfpm_tests!(GF222M117, GF222M117Scratchpad, 2, test_gf222m117mod);

// End-to-end checks with concrete byte sequences for this field.
#[cfg(test)]
mod test_gf222m117_e2e {

    use super::GF222M117;

    #[test]
    fn all_zero_bytes() {
        let v = [0u8; 28];
        let x = GF222M117::decode(&v).unwrap();
        assert!(x.equals(&GF222M117::ZERO) == 0xFFFFFFFF);
        assert!(x.iszero() == 0xFFFFFFFF);
        assert_eq!(x.encode(), [0u8; 28]);
    }

    #[test]
    fn minus_one_bytes() {
        // Little-endian encoding of q - 1.
        let v = hex::decode(
            "8affffffffffffffffffffffffffffffffffffffffffffffffffff3f")
            .unwrap();
        let x = GF222M117::decode(&v).unwrap();
        assert!(x.equals(&GF222M117::MINUS_ONE) == 0xFFFFFFFF);
        // q = 3 mod 4, so -1 is a non-residue.
        assert_eq!(x.legendre(), -1);
        let mut y = x;
        y.set_add_small(1);
        y.set_normalized();
        assert!(y.equals(&GF222M117::ZERO) == 0xFFFFFFFF);
    }

    #[test]
    fn small_value_arithmetic() {
        let two = GF222M117::from_u32(2);
        let four = GF222M117::from_u32(4);
        assert!((two * two).equals(&four) == 0xFFFFFFFF);
        assert!(two.square().equals(&four) == 0xFFFFFFFF);
        assert!((four.invert() * four).equals(&GF222M117::ONE)
            == 0xFFFFFFFF);
        let r = four.sqrt();
        assert!((r * r).equals(&four) == 0xFFFFFFFF);
        assert!((r.equals(&two) | r.equals(&-two)) == 0xFFFFFFFF);
    }

    #[test]
    fn three_or_minus_three_is_a_square() {
        let three = GF222M117::from_u32(3);
        let leg = three.legendre();
        if leg == 1 {
            let r = three.sqrt();
            assert!(r.square().equals(&three) == 0xFFFFFFFF);
        } else {
            assert_eq!(leg, -1);
            // For q = 3 mod 4, exactly one of x and -x is a square.
            assert_eq!((-three).legendre(), 1);
        }
    }

    #[test]
    fn non_canonical_bytes_normalize() {
        // An encoding of a value well above q.
        let mut v = [0xFFu8; 28];
        v[0] = 0x8C;
        let x = GF222M117::decode(&v).unwrap();
        let canon = x.encode();
        // The difference must be a positive multiple of q.
        use num_bigint::{BigInt, Sign};
        let zq = (BigInt::from(1u32) << 222) - 117u32;
        let diff = BigInt::from_bytes_le(Sign::Plus, &v)
            - BigInt::from_bytes_le(Sign::Plus, &canon);
        assert!(diff > BigInt::from(0u32));
        assert_eq!(diff % zq, BigInt::from(0u32));
    }

    #[test]
    fn random_element_inverts() {
        let v = hex::decode(
            "2b7e151628aed2a6abf7158809cf4f3c762e7160f38b4da56a784d90")
            .unwrap();
        let r = GF222M117::decode(&v).unwrap();
        let s = r.invert();
        let t = r * s;
        assert!(t.equals(&GF222M117::ONE) == 0xFFFFFFFF);
    }
}
