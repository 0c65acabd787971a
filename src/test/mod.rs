//! Shared functionality which is used in unit- and integration-tests:
//! an in-memory dispatch table standing in for a host runtime, plus
//! failure-injecting synthesizer and installer doubles.

use std::sync::{Arc, OnceLock};

use dashmap::{mapref::entry::Entry, DashMap};

use crate::{
    hooking::{
        Callable, EntryPoint, HookCallback, HookInstaller, InterceptionContextRc, Invocation,
        StubSynthesizer, SynthesizedStub, BACKUP_ENTRY_NAME, CONSTRUCTOR_ENTRY_NAME,
    },
    runtime::{HookTarget, Value},
    signature::{Descriptor, NormalizedSignature},
    ContextSlotError, Error, InstallError, Result, SynthesisError,
};

/// A callback that falls straight through to the original implementation.
pub(crate) fn passthrough_callback() -> Arc<dyn HookCallback> {
    fn passthrough(invocation: Invocation<'_>) -> Result<Value> {
        invocation.invoke_original(invocation.args())
    }
    Arc::new(passthrough)
}

/// In-memory host runtime: a dispatch table of callables keyed by target
/// identity, acting as both stub synthesizer and low-level installer.
///
/// Backup wiring is keyed by logical hook name, so tests must keep hook
/// names unique.
pub(crate) struct TestRuntime {
    methods: Arc<DashMap<String, Arc<dyn Callable>>>,
    originals: Arc<DashMap<String, Arc<dyn Callable>>>,
}

impl TestRuntime {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(TestRuntime {
            methods: Arc::new(DashMap::new()),
            originals: Arc::new(DashMap::new()),
        })
    }

    /// Define a method body under a target identity.
    pub(crate) fn define<F>(&self, identity: &str, body: F)
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.methods.insert(identity.to_string(), Arc::new(body));
    }

    /// Invoke whatever currently dispatches under a target identity, the
    /// way an ordinary call site in the host runtime would.
    pub(crate) fn call(&self, identity: &str, args: &[Value]) -> Result<Value> {
        let body = self
            .methods
            .get(identity)
            .map(|entry| entry.value().clone())
            .unwrap_or_else(|| panic!("no method defined for `{identity}`"));
        body.invoke(args)
    }

    fn logical_name(target: &HookTarget) -> String {
        if target.is_constructor() {
            CONSTRUCTOR_ENTRY_NAME.to_string()
        } else {
            target.name().to_string()
        }
    }
}

impl StubSynthesizer for TestRuntime {
    fn build_stub(
        &self,
        return_descriptor: Descriptor,
        parameter_descriptors: &[Descriptor],
        logical_name: &str,
        _delegate_type: &str,
    ) -> std::result::Result<Box<dyn SynthesizedStub>, SynthesisError> {
        let signature = NormalizedSignature::new(parameter_descriptors.to_vec(), return_descriptor);
        let slot: Arc<OnceLock<InterceptionContextRc>> = Arc::new(OnceLock::new());

        let dispatch_slot = Arc::clone(&slot);
        let dispatch_name = logical_name.to_string();
        let dispatch = EntryPoint::new(
            logical_name,
            signature.clone(),
            Arc::new(move |args: &[Value]| match dispatch_slot.get() {
                Some(context) => context.dispatch(args),
                None => Err(Error::Binding {
                    target: dispatch_name.clone(),
                    message: "dispatch entry invoked before context binding".to_string(),
                }),
            }),
        );

        let originals = Arc::clone(&self.originals);
        let backup_name = logical_name.to_string();
        let backup = EntryPoint::new(
            BACKUP_ENTRY_NAME,
            signature,
            Arc::new(move |args: &[Value]| {
                let original = originals.get(&backup_name).map(|entry| entry.value().clone());
                match original {
                    Some(original) => original.invoke(args),
                    None => Err(Error::Install {
                        target: backup_name.clone(),
                        source: InstallError::Other(
                            "backup entry invoked before installation".to_string(),
                        ),
                    }),
                }
            }),
        );

        Ok(Box::new(TestStub {
            entries: vec![dispatch, backup],
            context: slot,
        }))
    }
}

impl HookInstaller for TestRuntime {
    fn install(
        &self,
        target: &HookTarget,
        dispatch: &EntryPoint,
        _backup: &EntryPoint,
    ) -> std::result::Result<(), InstallError> {
        let identity = target.identity();
        let original = self
            .methods
            .get(&identity)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| {
                InstallError::NotHookable(format!("`{identity}` is not defined in this runtime"))
            })?;

        match self.originals.entry(Self::logical_name(target)) {
            Entry::Occupied(_) => {
                return Err(InstallError::Conflicting(
                    "target is already redirected".to_string(),
                ))
            }
            Entry::Vacant(slot) => {
                slot.insert(original);
            }
        }

        let dispatch = dispatch.clone();
        self.methods
            .insert(identity, Arc::new(move |args: &[Value]| dispatch.invoke(args)));
        Ok(())
    }
}

/// Stub double backed by closures over the test runtime's tables.
pub(crate) struct TestStub {
    entries: Vec<EntryPoint>,
    context: Arc<OnceLock<InterceptionContextRc>>,
}

impl TestStub {
    pub(crate) fn from_entries(entries: Vec<EntryPoint>) -> Self {
        TestStub {
            entries,
            context: Arc::new(OnceLock::new()),
        }
    }
}

impl SynthesizedStub for TestStub {
    fn entry(&self, name: &str) -> Option<EntryPoint> {
        self.entries.iter().find(|entry| entry.name() == name).cloned()
    }

    fn bind_context(
        &self,
        context: InterceptionContextRc,
    ) -> std::result::Result<(), ContextSlotError> {
        self.context
            .set(context)
            .map_err(|_| ContextSlotError("interception context slot already assigned".to_string()))
    }
}

/// Synthesizer double that always reports a codegen failure.
pub(crate) struct FailingSynthesizer;

impl StubSynthesizer for FailingSynthesizer {
    fn build_stub(
        &self,
        _return_descriptor: Descriptor,
        _parameter_descriptors: &[Descriptor],
        _logical_name: &str,
        _delegate_type: &str,
    ) -> std::result::Result<Box<dyn SynthesizedStub>, SynthesisError> {
        Err(SynthesisError::Codegen(
            "injected codegen failure".to_string(),
        ))
    }
}

/// Installer double that refuses every target.
pub(crate) struct RefusingInstaller;

impl HookInstaller for RefusingInstaller {
    fn install(
        &self,
        _target: &HookTarget,
        _dispatch: &EntryPoint,
        _backup: &EntryPoint,
    ) -> std::result::Result<(), InstallError> {
        Err(InstallError::NotHookable("injected refusal".to_string()))
    }
}

/// Synthesizer double producing contract-violating stubs.
pub(crate) struct TruncatedSynthesizer {
    drop_backup: bool,
    widen: bool,
}

impl TruncatedSynthesizer {
    /// Produce stubs without a backup entry point.
    pub(crate) fn missing_backup() -> Self {
        TruncatedSynthesizer {
            drop_backup: true,
            widen: false,
        }
    }

    /// Produce stubs whose entry points carry one extra parameter slot.
    pub(crate) fn widened_signature() -> Self {
        TruncatedSynthesizer {
            drop_backup: false,
            widen: true,
        }
    }
}

impl StubSynthesizer for TruncatedSynthesizer {
    fn build_stub(
        &self,
        return_descriptor: Descriptor,
        parameter_descriptors: &[Descriptor],
        logical_name: &str,
        _delegate_type: &str,
    ) -> std::result::Result<Box<dyn SynthesizedStub>, SynthesisError> {
        let mut params = parameter_descriptors.to_vec();
        if self.widen {
            params.push(Descriptor::Int);
        }
        let signature = NormalizedSignature::new(params, return_descriptor);

        let noop: Arc<dyn Callable> =
            Arc::new(|_args: &[Value]| -> Result<Value> { Ok(Value::Void) });
        let mut entries = vec![EntryPoint::new(
            logical_name,
            signature.clone(),
            Arc::clone(&noop),
        )];
        if !self.drop_backup {
            entries.push(EntryPoint::new(BACKUP_ENTRY_NAME, signature, noop));
        }

        Ok(Box::new(TestStub::from_entries(entries)))
    }
}
