//! Implementations of the finite fields.
//!
//! This module provides the structures that implement arithmetic in
//! fields of integers modulo a pseudo-Mersenne prime q = 2^n - c. Each
//! structure is specialized for a single field through a compile-time
//! parameter block; one portable 64-bit backend covers all targets.
//!
//! In general, the following properties apply to the field types:
//!
//!  - An instance encapsulates a field element. Instances are plain
//!    `Copy` values; `clone()` duplicates an element.
//!
//!  - The constant values `Self::ZERO`, `Self::ONE`, `Self::MINUS_ONE`
//!    and `Self::HALF` contain the elements of value 0, 1, -1 and 1/2,
//!    respectively.
//!
//!  - Usual arithmetic operators can be used on field elements (`+`,
//!    `-`, `*`, and the compound assignments `+=`, `-=`, `*=`), on
//!    both the raw types and references thereof. Division (`/`, `/=`)
//!    is also available when the `std` feature is enabled; division by
//!    zero is tolerated, and yields zero.
//!
//!  - Functions that modify an element in place are named `set_*`
//!    (e.g. `set_mul()`); counterparts that return the result as a new
//!    instance keep the plain name (e.g. `square()`).
//!
//!  - Elements internally keep a redundant ("loose") representation;
//!    `set_normalized*()` brings an element to its canonical form in
//!    [0, q). Queries that are only meaningful on canonical values
//!    (equality, sign, bit extraction, encoding) normalize internally.
//!
//!  - The multi-step operations (normalization, division, inversion,
//!    square roots, Legendre symbols, sign, absolute value) come in
//!    two forms: a `*_with()` form taking an explicit `&mut
//!    Scratchpad`, and (with the `std` feature) a pad-less form that
//!    borrows a per-thread scratchpad and scrubs it on exit. A
//!    scratchpad bundles three limb-sized work buffers; its `scrub()`
//!    overwrites them with all-ones, and also runs on drop. Elements
//!    offer the same explicit erasure through `destroy()`.
//!
//!  - Small-integer variants `set_add_small()`, `set_sub_small()`,
//!    `set_mul_small()` and `set_div_small*()` accept a bounded
//!    operand; the bounds are exposed as `ADD_MIN`/`ADD_MAX` and
//!    `MUL_MIN`/`MUL_MAX`, and staying inside them is the caller's
//!    contract (the kernels do not check).
//!
//!  - All implemented functions are strictly constant-time with
//!    respect to element contents. Potentially secret Boolean results
//!    use the `u32` type with the conventions 0xFFFFFFFF for "true"
//!    and 0x00000000 for "false" (`equals()`, `iszero()`); the `Eq`
//!    and `PartialEq` traits are deliberately not implemented.
//!    `legendre()` (and, for q = 1 mod 4 fields,
//!    `legendre_quartic()`) return -1, 0 or +1; `sign()` returns 0
//!    or 1, `signum()` returns +1 or -1. `set_mask()` and `set_or()`
//!    provide branch-free selection between two elements.
//!
//!  - `sqrt` and `inv_sqrt` apply a fixed power ladder; the result is
//!    only meaningful when the input is a quadratic residue, which the
//!    caller establishes with `legendre()` where it matters. Moduli
//!    with q = 1 mod 8 are not supported by the square-root ladders.
//!
//!  - Function `encode*()` produces the canonical unsigned
//!    little-endian encoding over exactly `ENC_LEN` bytes. Function
//!    `decode()` reads exactly `ENC_LEN` bytes without reducing:
//!    non-canonical encodings are accepted as loose values. With the
//!    `std` feature, `encode_to()` and `decode_from()` move the same
//!    encoding over `std::io` streams, and the hex `Display` /
//!    `LowerHex` / `UpperHex` implementations print the canonical
//!    value most significant digit first.
//!
//!  - Function `rand()` samples a nearly uniform element from a
//!    `CryptoRng`; the residual bias (about c/2^n) is documented on
//!    the function.

pub mod w64;

#[cfg(feature = "gf222m117")]
pub use w64::{GF222M117, GF222M117Scratchpad};

#[cfg(feature = "gf382m105")]
pub use w64::{GF382M105, GF382M105Scratchpad};

#[cfg(feature = "gf383m187")]
pub use w64::{GF383M187, GF383M187Scratchpad};

#[cfg(feature = "gf414m17")]
pub use w64::{GF414M17, GF414M17Scratchpad};

#[cfg(feature = "gf511m187")]
pub use w64::{GF511M187, GF511M187Scratchpad};

#[cfg(feature = "gf521m1")]
pub use w64::{GF521M1, GF521M1Scratchpad};
