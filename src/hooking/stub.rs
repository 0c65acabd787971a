//! The stub synthesis capability and synthesized-stub contract.
//!
//! Stub synthesis is an injected capability: the interception core is
//! agnostic to *how* a stub is generated (bytecode emission, JIT,
//! templated code), it only requires that the product satisfies the
//! two-entry-point contract below. The hook controller drives a
//! [`StubSynthesizer`] with the normalized descriptors and verifies the
//! result before anything becomes observable.
//!
//! # Stub Contract
//!
//! A synthesized stub exposes exactly two entry points sharing the
//! requested signature:
//!
//! - a *dispatch* entry named by the logical hook name (or
//!   [`CONSTRUCTOR_ENTRY_NAME`] for constructors), which forwards every
//!   invocation to the bound
//!   [`InterceptionContext`](crate::hooking::InterceptionContext)
//! - a *backup* entry with the fixed name [`BACKUP_ENTRY_NAME`], the slot
//!   the low-level installer redirects to the original implementation
//!
//! and one interception-context slot, assigned exactly once at
//! construction time via [`SynthesizedStub::bind_context`].

use std::{fmt, sync::Arc};

use crate::{
    hooking::InterceptionContextRc,
    signature::{Descriptor, NormalizedSignature},
    ContextSlotError, Result, SynthesisError, Value,
};

/// Fixed name of the backup entry point on every synthesized stub.
pub const BACKUP_ENTRY_NAME: &str = "backup";

/// Fixed logical name used when hooking constructors.
///
/// Constructors carry their declaring type's name, which is not a valid
/// entry-point name; the sentinel also avoids colliding with a method
/// literally named like the type.
pub const CONSTRUCTOR_ENTRY_NAME: &str = "constructor";

/// An invocable body behind an entry point.
///
/// Implemented by synthesized dispatch/backup bodies; any
/// `Fn(&[Value]) -> Result<Value>` closure qualifies through the blanket
/// implementation.
pub trait Callable: Send + Sync {
    /// Invoke the body with the given arguments (receiver first for
    /// instance-bound signatures).
    fn invoke(&self, args: &[Value]) -> Result<Value>;
}

impl<F> Callable for F
where
    F: Fn(&[Value]) -> Result<Value> + Send + Sync,
{
    fn invoke(&self, args: &[Value]) -> Result<Value> {
        self(args)
    }
}

/// A resolved, invocable entry point on a synthesized stub.
///
/// Entry points are cheap to clone; clones share the same underlying
/// body.
#[derive(Clone)]
pub struct EntryPoint {
    name: String,
    signature: NormalizedSignature,
    body: Arc<dyn Callable>,
}

impl EntryPoint {
    /// Create an entry point handle over an invocable body.
    pub fn new(
        name: impl Into<String>,
        signature: NormalizedSignature,
        body: Arc<dyn Callable>,
    ) -> Self {
        EntryPoint {
            name: name.into(),
            signature,
            body,
        }
    }

    /// The entry point's name on its stub.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The signature this entry point was synthesized with.
    #[must_use]
    pub fn signature(&self) -> &NormalizedSignature {
        &self.signature
    }

    /// Invoke the entry point.
    ///
    /// # Errors
    ///
    /// Propagates whatever the underlying body returns.
    pub fn invoke(&self, args: &[Value]) -> Result<Value> {
        self.body.invoke(args)
    }
}

impl fmt::Debug for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntryPoint({} {})", self.name, self.signature)
    }
}

/// A generated callable type holding the two signature-identical entry
/// points of one hook.
///
/// Produced by a [`StubSynthesizer`]; ownership transfers to the hook
/// controller, which resolves both entry points, verifies their
/// signatures and binds the interception context before anything is
/// installed. A stub is never reused across different targets.
pub trait SynthesizedStub: Send + Sync {
    /// Resolve an entry point by name, or `None` if the stub has no such
    /// entry.
    fn entry(&self, name: &str) -> Option<EntryPoint>;

    /// Assign the stub's interception-context slot.
    ///
    /// Called exactly once per stub, before installation.
    ///
    /// # Errors
    ///
    /// Returns [`ContextSlotError`] if the slot is missing or already
    /// assigned.
    fn bind_context(
        &self,
        context: InterceptionContextRc,
    ) -> std::result::Result<(), ContextSlotError>;
}

/// The stub synthesis capability.
///
/// Given a return descriptor, parameter descriptors, a logical hook name
/// and the delegate-type identifier of the context the stub will hold,
/// produce a [`SynthesizedStub`] satisfying the stub contract.
///
/// # Examples
///
/// ```rust,ignore
/// let stub = synthesizer.build_stub(
///     Descriptor::Void,
///     &[Descriptor::Object, Descriptor::Object],
///     "setName",
///     std::any::type_name::<InterceptionContext>(),
/// )?;
/// let backup = stub.entry(BACKUP_ENTRY_NAME).expect("backup entry");
/// ```
pub trait StubSynthesizer: Send + Sync {
    /// Synthesize a stub whose two entry points carry exactly the
    /// requested signature.
    ///
    /// # Errors
    ///
    /// Returns [`SynthesisError`] when no matching stub can be produced
    /// (naming collision, descriptor limits, codegen failure). The error
    /// is surfaced to the caller unretried.
    fn build_stub(
        &self,
        return_descriptor: Descriptor,
        parameter_descriptors: &[Descriptor],
        logical_name: &str,
        delegate_type: &str,
    ) -> std::result::Result<Box<dyn SynthesizedStub>, SynthesisError>;
}
