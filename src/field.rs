//! Finite fields.
//!
//! This module re-exports the concrete field types, used as base
//! fields by various Edwards and Montgomery curves. These are merely
//! the instantiations provided by the backend.

#[cfg(feature = "gf222m117")]
pub use crate::backend::{GF222M117, GF222M117Scratchpad};

#[cfg(feature = "gf382m105")]
pub use crate::backend::{GF382M105, GF382M105Scratchpad};

#[cfg(feature = "gf383m187")]
pub use crate::backend::{GF383M187, GF383M187Scratchpad};

#[cfg(feature = "gf414m17")]
pub use crate::backend::{GF414M17, GF414M17Scratchpad};

#[cfg(feature = "gf511m187")]
pub use crate::backend::{GF511M187, GF511M187Scratchpad};

#[cfg(feature = "gf521m1")]
pub use crate::backend::{GF521M1, GF521M1Scratchpad};
