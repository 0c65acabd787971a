//! # hookscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types
//! and traits from the hookscope library. Import this module to get quick
//! access to the essential types for dynamic method interception.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all hookscope operations
pub use crate::Error;

/// The result type used throughout hookscope
pub use crate::Result;

/// Failures reported by the injected capabilities
pub use crate::{ContextSlotError, InstallError, SynthesisError};

// ================================================================================================
// Target Capture
// ================================================================================================

/// The callable being intercepted, with its binding mode and modifiers
pub use crate::runtime::{HookTarget, RuntimeType, TargetFlags, TargetKind};

/// Erased argument and return values crossing the hook boundary
pub use crate::runtime::{ObjectRef, Value};

// ================================================================================================
// Signatures
// ================================================================================================

/// Descriptor encoding and signature normalization
pub use crate::signature::{
    descriptor_string, encode, encode_many, normalize, Descriptor, NormalizedSignature,
};

// ================================================================================================
// Hooking
// ================================================================================================

/// The hook controller, its handles and the installation stages
pub use crate::hooking::{HookController, HookHandle, HookId, HookRequest, Stage};

/// Injected capability contracts and the synthesized-stub surface
pub use crate::hooking::{
    Callable, EntryPoint, HookInstaller, StubSynthesizer, SynthesizedStub, BACKUP_ENTRY_NAME,
    CONSTRUCTOR_ENTRY_NAME,
};

/// Per-hook interception state and caller-supplied interception logic
pub use crate::hooking::{
    HookCallback, HookRegistry, InterceptionContext, InterceptionContextRc, Invocation,
};
