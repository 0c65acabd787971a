//! Descriptor encoding and signature normalization.
//!
//! This module derives the minimal calling-convention description of a
//! callable: each declared type is encoded to a single-letter
//! [`Descriptor`] (primitives distinct, all references erased to one
//! generic object tag), and a whole [`HookTarget`](crate::runtime::HookTarget)
//! normalizes to the [`NormalizedSignature`] the stub synthesizer must
//! reproduce exactly.
//!
//! # Key Components
//!
//! - [`Descriptor`] - Closed set of single-letter calling-convention tags
//! - [`encode`] / [`encode_many`] - Total, pure type-to-descriptor mapping
//! - [`descriptor_string`] - `(parameters)return` rendering
//! - [`NormalizedSignature`] / [`normalize`] - Receiver insertion and
//!   reference erasure for a captured target
//!
//! # Erasure
//!
//! Reference types share one representation at the calling-convention
//! level, so a stub synthesized for `(LL)V` serves `setName(String)` as
//! well as `setName(Object)`; stubs vary only per primitive-type
//! combination.

mod descriptor;
mod normalizer;

pub use descriptor::{descriptor_string, encode, encode_many, Descriptor};
pub use normalizer::{normalize, NormalizedSignature};
