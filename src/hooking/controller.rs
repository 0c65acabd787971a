//! Hook installation orchestration.
//!
//! The [`HookController`] drives the full installation protocol for a
//! captured target:
//!
//! ```text
//! Captured -> Normalized -> StubBuilt -> ContextBound -> Installed
//! ```
//!
//! with a terminal `Failed` outcome reachable from every step. Each step
//! delegates to one collaborator - the signature normalizer, the injected
//! [`StubSynthesizer`] and the injected [`HookInstaller`] - and verifies
//! its result before the next step runs. Nothing is observable to the
//! process until the installer confirms success; every failure leaves the
//! target exactly as it was.
//!
//! Successful installations are recorded in the controller's
//! [`HookRegistry`] and returned as [`HookHandle`]s, through which the
//! original implementation stays invocable.

use std::sync::Arc;

use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::{
    hooking::{
        EntryPoint, HookCallback, HookId, HookInstaller, HookRegistry, InterceptionContext,
        InterceptionContextRc, StubSynthesizer, SynthesizedStub, BACKUP_ENTRY_NAME,
        CONSTRUCTOR_ENTRY_NAME,
    },
    runtime::{HookTarget, TargetFlags, Value},
    signature::{normalize, NormalizedSignature},
    Error, InstallError, Result,
};

/// Stages of the hook installation protocol, in order.
///
/// Reported by [`Error::stage`](crate::Error::stage) as the stage the
/// protocol had reached when an installation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// Target captured; nothing derived yet.
    Captured,
    /// Signature normalization completed.
    Normalized,
    /// The stub synthesizer produced a stub.
    StubBuilt,
    /// Entry points resolved and the interception context bound.
    ContextBound,
    /// The low-level installer confirmed the redirect.
    Installed,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Captured => "captured",
            Stage::Normalized => "normalized",
            Stage::StubBuilt => "stub-built",
            Stage::ContextBound => "context-bound",
            Stage::Installed => "installed",
        };
        f.write_str(name)
    }
}

/// One hook installation request, for batch installation.
pub struct HookRequest {
    target: HookTarget,
    callback: Arc<dyn HookCallback>,
}

impl HookRequest {
    /// Pair a captured target with its interception callback.
    pub fn new(target: HookTarget, callback: Arc<dyn HookCallback>) -> Self {
        HookRequest { target, callback }
    }
}

/// Handle to one successfully installed hook.
///
/// Exposes the bound interception context's ability to invoke the
/// original, pre-hook implementation; the internal stub wiring is not
/// exposed further.
pub struct HookHandle {
    id: HookId,
    context: InterceptionContextRc,
}

impl HookHandle {
    /// The registry id of this hook.
    #[must_use]
    pub fn id(&self) -> HookId {
        self.id
    }

    /// The target this hook intercepts.
    #[must_use]
    pub fn target(&self) -> &HookTarget {
        self.context.target()
    }

    /// Invoke the original, pre-hook implementation.
    ///
    /// For a control input whose behavior the interception callback does
    /// not alter, this reproduces the pre-hook behavior exactly.
    ///
    /// # Errors
    ///
    /// [`Error::ArgumentMismatch`] on arity or category mismatch;
    /// otherwise whatever the original implementation returns.
    pub fn invoke_original(&self, args: &[Value]) -> Result<Value> {
        self.context.invoke_backup(args)
    }
}

impl std::fmt::Debug for HookHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HookHandle({}, {})", self.id, self.context.target())
    }
}

/// Orchestrates hook installation over the injected synthesis and
/// installation capabilities.
///
/// Installation requests against different targets are independent and
/// may run in parallel ([`HookController::install_hooks`]). Racing
/// requests against the *same* target are rejected best-effort through
/// the registry but must be serialized by the caller.
///
/// # Examples
///
/// ```rust,ignore
/// let controller = HookController::new(synthesizer, installer);
///
/// let handle = controller.install_hook(
///     HookTarget::static_method("Calculator", "add",
///         vec![RuntimeType::Int, RuntimeType::Int], RuntimeType::Int),
///     Arc::new(|invocation: Invocation<'_>| {
///         // observe, then fall through to the original
///         invocation.invoke_original(invocation.args())
///     }),
/// )?;
///
/// // The pre-hook implementation stays reachable:
/// let sum = handle.invoke_original(&[Value::Int(2), Value::Int(3)])?;
/// ```
pub struct HookController {
    synthesizer: Arc<dyn StubSynthesizer>,
    installer: Arc<dyn HookInstaller>,
    registry: HookRegistry,
}

impl HookController {
    /// Create a controller over the given synthesis and installation
    /// capabilities.
    pub fn new(synthesizer: Arc<dyn StubSynthesizer>, installer: Arc<dyn HookInstaller>) -> Self {
        HookController {
            synthesizer,
            installer,
            registry: HookRegistry::new(),
        }
    }

    /// The record of active hooks.
    #[must_use]
    pub fn registry(&self) -> &HookRegistry {
        &self.registry
    }

    /// Install a hook: all future invocations of `target` run `callback`
    /// first, and the returned handle keeps the original implementation
    /// invocable.
    ///
    /// Successful installation is globally observable - subsequent calls
    /// to the target from any caller in the process execute interception
    /// logic. On failure the target's dispatch is left untouched; no
    /// partial hook is ever active.
    ///
    /// # Errors
    ///
    /// - [`Error::AlreadyHooked`] - a hook for this target is registered
    /// - [`Error::Synthesis`] - the synthesizer produced no stub
    /// - [`Error::Binding`] - the stub violates the entry-point contract
    /// - [`Error::Install`] - the target is not hookable, or the
    ///   low-level installer failed the redirect
    pub fn install_hook(
        &self,
        target: HookTarget,
        callback: Arc<dyn HookCallback>,
    ) -> Result<HookHandle> {
        let identity = target.identity();

        // Captured: fail fast before any synthesis work.
        if self.registry.contains(&identity) {
            return Err(Error::AlreadyHooked(identity));
        }
        if target.flags().contains(TargetFlags::ABSTRACT) {
            return Err(Error::Install {
                target: identity,
                source: InstallError::NotHookable(
                    "abstract target has no body to redirect".to_string(),
                ),
            });
        }

        // Captured -> Normalized. Total for well-formed targets.
        let signature = normalize(&target);

        // Normalized -> StubBuilt.
        let logical_name = if target.is_constructor() {
            CONSTRUCTOR_ENTRY_NAME
        } else {
            target.name()
        };
        let stub = self
            .synthesizer
            .build_stub(
                signature.return_descriptor(),
                signature.parameters(),
                logical_name,
                std::any::type_name::<InterceptionContext>(),
            )
            .map_err(|source| Error::Synthesis {
                target: identity.clone(),
                source,
            })?;

        // StubBuilt -> ContextBound.
        let backup = resolve_entry(stub.as_ref(), BACKUP_ENTRY_NAME, &signature, &identity)?;
        let dispatch = resolve_entry(stub.as_ref(), logical_name, &signature, &identity)?;

        let context: InterceptionContextRc = Arc::new(InterceptionContext::new(
            callback,
            target,
            signature,
            backup.clone(),
        ));
        stub.bind_context(Arc::clone(&context))
            .map_err(|err| Error::Binding {
                target: identity.clone(),
                message: err.to_string(),
            })?;

        // ContextBound -> Installed. All-or-nothing; the installer owns
        // the redirect's atomicity.
        self.installer
            .install(context.target(), &dispatch, &backup)
            .map_err(|source| Error::Install {
                target: identity,
                source,
            })?;

        let id = self.registry.register(Arc::clone(&context));
        Ok(HookHandle { id, context })
    }

    /// Install hooks for independent targets in parallel.
    ///
    /// One result per request, in request order. Requests fail or succeed
    /// individually; a failed request never affects the others.
    pub fn install_hooks(&self, requests: Vec<HookRequest>) -> Vec<Result<HookHandle>> {
        requests
            .into_par_iter()
            .map(|request| self.install_hook(request.target, request.callback))
            .collect()
    }
}

/// Resolve one entry point on a synthesized stub and verify its
/// descriptors against the normalized signature. Mismatches are fatal,
/// never coerced.
fn resolve_entry(
    stub: &dyn SynthesizedStub,
    name: &str,
    expected: &NormalizedSignature,
    identity: &str,
) -> Result<EntryPoint> {
    let entry = stub.entry(name).ok_or_else(|| Error::Binding {
        target: identity.to_string(),
        message: format!("synthesized stub has no `{name}` entry point"),
    })?;

    if entry.signature() != expected {
        return Err(Error::Binding {
            target: identity.to_string(),
            message: format!(
                "entry point `{name}` carries {}, target normalizes to {expected}",
                entry.signature()
            ),
        });
    }

    Ok(entry)
}
