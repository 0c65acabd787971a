//! Host-runtime facing types: captured targets and erased call values.
//!
//! This module is the boundary between the host runtime and the
//! interception core. The embedder captures a [`HookTarget`] from its own
//! reflection facility and moves [`Value`]s across the hook boundary once
//! a hook is live; everything else in this crate is derived from these
//! types.
//!
//! # Key Components
//!
//! - [`HookTarget`] - The callable being intercepted, immutable once captured
//! - [`TargetKind`] / [`TargetFlags`] - Binding mode and modifier bits
//! - [`RuntimeType`] - Declared parameter/return types, primitive or reference
//! - [`Value`] / [`ObjectRef`] - Erased argument and return values
//!
//! # Examples
//!
//! ```rust
//! use hookscope::runtime::{HookTarget, RuntimeType};
//!
//! // static int add(int, int)
//! let target = HookTarget::static_method(
//!     "com.example.Calculator",
//!     "add",
//!     vec![RuntimeType::Int, RuntimeType::Int],
//!     RuntimeType::Int,
//! );
//! assert_eq!(target.parameters().len(), 2);
//! ```

mod target;
mod value;

pub use target::{HookTarget, RuntimeType, TargetFlags, TargetKind};
pub use value::{ObjectRef, Value};
