//! Hook synthesis, binding and installation.
//!
//! This module contains the interception core proper: the contracts for
//! the injected capabilities (stub synthesis and low-level installation),
//! the per-hook interception state, and the [`HookController`] that
//! drives the installation protocol end to end.
//!
//! # Key Components
//!
//! - [`HookController`] - Orchestrates `Captured -> Normalized ->
//!   StubBuilt -> ContextBound -> Installed`
//! - [`StubSynthesizer`] / [`SynthesizedStub`] - Injected stub generation
//!   and the two-entry-point stub contract
//! - [`HookInstaller`] - Injected atomic redirect capability
//! - [`InterceptionContext`] / [`HookCallback`] - Per-hook state and the
//!   caller-supplied interception logic
//! - [`HookRegistry`] / [`HookHandle`] - Record of active hooks and the
//!   caller's handle to one
//!
//! # Installation Protocol
//!
//! Each step verifies its collaborator's result before the next runs;
//! every failure aborts the protocol at its step, and no partial hook is
//! ever left active. The redirect itself happens last and is
//! all-or-nothing.
//!
//! # Thread Safety
//!
//! Normalization and synthesis are pure per-request; hooks against
//! different targets may install in parallel. The single synchronization
//! point is the installer's redirect, whose atomicity is part of the
//! [`HookInstaller`] contract.

mod context;
mod controller;
mod installer;
mod registry;
mod stub;

pub use context::{HookCallback, InterceptionContext, InterceptionContextRc, Invocation};
pub use controller::{HookController, HookHandle, HookRequest, Stage};
pub use installer::HookInstaller;
pub use registry::{HookId, HookRegistry};
pub use stub::{
    Callable, EntryPoint, StubSynthesizer, SynthesizedStub, BACKUP_ENTRY_NAME,
    CONSTRUCTOR_ENTRY_NAME,
};
