// Portable 64-bit implementations of the pseudo-Mersenne fields. Every
// kernel uses only signed 64-bit arithmetic (the unsaturated limb
// split keeps all intermediate products and sums inside 64 bits), so
// no intrinsics or 128-bit types are involved; the same code runs
// identically on any 64-bit target.
//
// The gfgen module provides the generator macros; each field module
// instantiates them with its own parameter structure.

pub mod gfgen;

#[cfg(feature = "gf222m117")]
pub mod gf222m117;

#[cfg(feature = "gf222m117")]
pub use gf222m117::{GF222M117, GF222M117Scratchpad};

#[cfg(feature = "gf382m105")]
pub mod gf382m105;

#[cfg(feature = "gf382m105")]
pub use gf382m105::{GF382M105, GF382M105Scratchpad};

#[cfg(feature = "gf383m187")]
pub mod gf383m187;

#[cfg(feature = "gf383m187")]
pub use gf383m187::{GF383M187, GF383M187Scratchpad};

#[cfg(feature = "gf414m17")]
pub mod gf414m17;

#[cfg(feature = "gf414m17")]
pub use gf414m17::{GF414M17, GF414M17Scratchpad};

#[cfg(feature = "gf511m187")]
pub mod gf511m187;

#[cfg(feature = "gf511m187")]
pub use gf511m187::{GF511M187, GF511M187Scratchpad};

#[cfg(feature = "gf521m1")]
pub mod gf521m1;

#[cfg(feature = "gf521m1")]
pub use gf521m1::{GF521M1, GF521M1Scratchpad};
