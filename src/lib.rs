//! Gfpm is a Rust library implementing arithmetic in finite fields of
//! integers modulo a pseudo-Mersenne prime q = 2^n - c, for a small
//! odd constant c. Such fields are the computational substrate of
//! several Edwards and Montgomery curves (E-222, E-382, Curve383187,
//! Curve41417, M-511, E-521); the curves themselves are out of scope
//! here, only the field engine is provided.
//!
//! All fields share one implementation, generated per modulus from a
//! compile-time parameter block (see the `backend` module). Elements
//! use an unsaturated representation: signed 64-bit limbs holding
//! fewer value bits than the word size, the spare bits accumulating
//! carries so that no architecture-specific carry handling (and no
//! 128-bit arithmetic) is ever needed. Modular reduction exploits the
//! identity 2^n = c mod q, folding overflow back into the low limb at
//! the cost of one small multiplication.
//!
//! # Usage
//!
//! The library is "mostly `no_std`". By default, it compiles against
//! the standard library. It can be compiled in `no_std` mode, in which
//! case all functionality is still available through the explicit
//! scratchpad API, but the per-thread scratchpad cache (and the
//! pad-less convenience functions, stream encoding, the `/` operator
//! and hex formatting that build on it) are disabled.
//!
//! # Conventions
//!
//! All implemented functions are strictly constant-time: the sequence
//! of executed instructions and memory accesses depends only on the
//! field parameters, never on element contents. In order to avoid
//! unwanted side-channel leaks, Booleans are avoided (compilers tend
//! to "optimize" things a bit too eagerly when handling `bool`
//! values). All functions that return a potentially secret Boolean
//! value use the `u32` type; the convention is that 0xFFFFFFFF means
//! "true", and 0x00000000 means "false". No other value shall be used.
//! Similarly, the `Eq` and `PartialEq` traits are not implemented.
//!
//! Algebraic operations on field elements are performed with the
//! usual operators (e.g. `+`); appropriate traits are defined so that
//! structure types and references to structure types can be used more
//! or less interchangeably. Throughout the code, functions that modify
//! the object on which they are called have a name in `set_*()` (e.g.
//! `x.set_square()` squares the element in place, while `x.square()`
//! leaves `x` unmodified and returns the square as a new instance).
//!
//! # Secret hygiene
//!
//! Multi-step operations stage their intermediate values in a
//! scratchpad: a bundle of three work buffers that is reused across
//! operations and erased (overwritten with all-ones, through volatile
//! writes) on every exit path. With the `std` feature, each thread
//! lazily keeps one idle scratchpad and the pad-less operation forms
//! use it transparently; scratchpads are never shared across threads.
//! Field elements offer the same explicit erasure via `destroy()`.

#![no_std]

#[cfg(feature = "std")]
#[macro_use]
extern crate std;

pub use rand_core::{CryptoRng, Error as RngError, RngCore};

pub mod backend;
pub mod field;
