// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(dead_code)]

//! # hookscope
//!
//! [![Crates.io](https://img.shields.io/crates/v/hookscope.svg)](https://crates.io/crates/hookscope)
//! [![Documentation](https://docs.rs/hookscope/badge.svg)](https://docs.rs/hookscope)
//! [![License](https://img.shields.io/badge/license-Apache--2.0-blue.svg)](https://github.com/BinFlip/hookscope/blob/main/LICENSE-APACHE)
//!
//! A runtime-agnostic framework for dynamic method interception. Given a target
//! callable in a running managed program - an instance method, static method or
//! constructor - `hookscope` derives its minimal calling-convention signature,
//! drives the synthesis of a signature-identical stub, binds interception state
//! into it, and orchestrates the atomic swap that routes all future invocations
//! through caller-supplied interception logic while keeping the original
//! implementation invocable.
//!
//! ## Features
//!
//! - **🪝 Full callable coverage** - Instance methods, static methods and constructors
//! - **🔤 Signature erasure** - One stub serves every reference-typed overload; stubs
//!   vary only per primitive-type combination
//! - **🧩 Injected capabilities** - Stub generation and the physical redirect are
//!   traits; bytecode emission, JIT or dispatch-table swaps all fit behind them
//! - **⚛️ All-or-nothing installs** - A hook is either fully live or never observable;
//!   failures leave the target untouched
//! - **🔁 Original preserved** - Every installed hook keeps a callable backup reaching
//!   the pre-hook implementation
//! - **🛡️ No silent coercion** - Entry-point signatures and call arguments are
//!   checked against the normalized signature; mismatches are hard errors
//!
//! ## Quick Start
//!
//! Add `hookscope` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! hookscope = "0.2"
//! ```
//!
//! ### Deriving signatures
//!
//! ```rust
//! use hookscope::prelude::*;
//!
//! // static int add(int, int)
//! let target = HookTarget::static_method(
//!     "com.example.Calculator",
//!     "add",
//!     vec![RuntimeType::Int, RuntimeType::Int],
//!     RuntimeType::Int,
//! );
//! assert_eq!(normalize(&target).to_string(), "(II)I");
//!
//! // Constructors are receiver-bound and never produce a value.
//! let ctor = HookTarget::constructor("com.example.Widget", vec![RuntimeType::Int]);
//! assert_eq!(normalize(&ctor).to_string(), "(LI)V");
//! ```
//!
//! ### Installing a hook
//!
//! The synthesizer and installer are supplied by the embedding runtime; the
//! controller drives them through the installation protocol:
//!
//! ```rust,ignore
//! use hookscope::prelude::*;
//! use std::sync::Arc;
//!
//! let controller = HookController::new(synthesizer, installer);
//!
//! let handle = controller.install_hook(
//!     HookTarget::instance_method(
//!         "com.example.Widget",
//!         "setName",
//!         vec![RuntimeType::reference("java.lang.String")],
//!         RuntimeType::Void,
//!     ),
//!     Arc::new(|invocation: Invocation<'_>| {
//!         // args[0] is the receiver; observe, rewrite or drop the call,
//!         // then (optionally) fall through to the original.
//!         invocation.invoke_original(invocation.args())
//!     }),
//! )?;
//!
//! // The pre-hook implementation stays reachable through the handle:
//! let widget = Value::null();
//! handle.invoke_original(&[widget, Value::reference(String::from("name"))])?;
//! # Ok::<(), hookscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! `hookscope` is organized into three modules:
//!
//! - [`runtime`] - Captured [`runtime::HookTarget`]s and the erased
//!   [`runtime::Value`] model crossing the hook boundary
//! - [`signature`] - Descriptor encoding and signature normalization
//! - [`hooking`] - The stub/installer capability contracts, interception
//!   contexts and the [`hooking::HookController`]
//!
//! ### Installation Protocol
//!
//! Installation advances through `Captured -> Normalized -> StubBuilt ->
//! ContextBound -> Installed`; a failure at any step aborts the protocol with
//! the stage recorded on the error, and the target's dispatch is left exactly
//! as it was. See [`hooking::HookController::install_hook`].
//!
//! ### Signature Erasure
//!
//! At the calling-convention level all reference types share one
//! representation. Normalization keeps the eight primitive categories
//! distinct, erases every reference type to the generic object descriptor,
//! and prepends one receiver slot for instance-bound callables - so a single
//! synthesized stub shape serves `setName(String)` and `setName(Object)`
//! alike. See [`signature::normalize`].
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result) with the installation
//! stage preserved:
//!
//! ```rust
//! use hookscope::{Error, hooking::Stage};
//!
//! fn report(err: &Error) {
//!     match err.stage() {
//!         Some(stage) => eprintln!("installation failed at {stage}: {err}"),
//!         None => eprintln!("invocation failed: {err}"),
//!     }
//! }
//! ```

pub(crate) mod error;

/// Shared functionality which is used in unit- and integration-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// This module provides a curated selection of the most frequently used types
/// from across the hookscope library, allowing for convenient glob imports.
///
/// # Example
///
/// ```rust
/// use hookscope::prelude::*;
///
/// let target = HookTarget::static_method("Clock", "now", vec![], RuntimeType::Long);
/// assert_eq!(normalize(&target).to_string(), "()J");
/// ```
pub mod prelude;

/// Host-runtime facing types: captured hook targets and erased call values.
///
/// The embedder constructs a [`runtime::HookTarget`] from its own reflection
/// facility and moves [`runtime::Value`]s across the hook boundary once a
/// hook is live.
pub mod runtime;

/// Descriptor encoding and signature normalization.
///
/// Maps declared types to single-letter calling-convention descriptors
/// (primitives distinct, references erased to one generic object tag) and
/// whole targets to the [`signature::NormalizedSignature`] a synthesized
/// stub must reproduce exactly.
pub mod signature;

/// Hook synthesis, binding and installation.
///
/// The capability contracts ([`hooking::StubSynthesizer`],
/// [`hooking::HookInstaller`]), per-hook interception state and the
/// [`hooking::HookController`] driving the installation protocol.
pub mod hooking;

/// `hookscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is
/// always [`Error`]. This is used consistently throughout the crate for all
/// fallible operations.
///
/// # Examples
///
/// ```rust,ignore
/// use hookscope::{HookTarget, Result, hooking::HookHandle};
///
/// fn hook_widget_rename(controller: &hookscope::hooking::HookController) -> Result<HookHandle> {
///     controller.install_hook(widget_rename_target(), logging_callback())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `hookscope` Error type
///
/// The main error type for all operations in this crate. Every installation
/// failure carries the target identity and the protocol stage reached.
///
/// # Examples
///
/// ```rust
/// use hookscope::{Error, hooking::Stage};
///
/// fn is_synthesizer_defect(err: &Error) -> bool {
///     matches!(err, Error::Binding { .. })
/// }
/// ```
pub use error::Error;

/// Failures reported by the injected capabilities.
///
/// - [`SynthesisError`] - the stub synthesizer could not produce a stub
/// - [`InstallError`] - the low-level installer refused the redirect
/// - [`ContextSlotError`] - a stub rejected its context binding
pub use error::{ContextSlotError, InstallError, SynthesisError};

/// The erased argument/return value model crossing the hook boundary.
///
/// See [`runtime::Value`] and [`runtime::ObjectRef`].
pub use runtime::Value;
