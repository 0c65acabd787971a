//! Interception contexts and caller-supplied interception logic.
//!
//! One [`InterceptionContext`] exists per active hook. It carries the
//! caller-supplied [`HookCallback`], the captured target and the resolved
//! backup entry point, and it is the object a synthesized stub's dispatch
//! entry forwards into. The context is bound into the stub exactly once,
//! at construction time - generated code never reaches state through
//! globally scoped slots.

use std::sync::Arc;

use crate::{
    hooking::EntryPoint,
    runtime::{HookTarget, Value},
    signature::NormalizedSignature,
    Error, Result,
};

/// Reference-counted handle to an [`InterceptionContext`].
pub type InterceptionContextRc = Arc<InterceptionContext>;

/// Caller-supplied interception logic.
///
/// Invoked for every call of the hooked target. The callback receives the
/// original arguments (receiver first for instance-bound targets) and a
/// means to invoke the backup; whatever it returns is what the hooked
/// call produces.
///
/// Any `Fn(Invocation<'_>) -> Result<Value>` closure qualifies through
/// the blanket implementation.
pub trait HookCallback: Send + Sync {
    /// Run interception logic for one call of the hooked target.
    ///
    /// # Errors
    ///
    /// Errors propagate to the intercepted call site.
    fn intercept(&self, invocation: Invocation<'_>) -> Result<Value>;
}

impl<F> HookCallback for F
where
    F: for<'a> Fn(Invocation<'a>) -> Result<Value> + Send + Sync,
{
    fn intercept(&self, invocation: Invocation<'_>) -> Result<Value> {
        self(invocation)
    }
}

/// One intercepted call, as seen by a [`HookCallback`].
///
/// Borrows the call's arguments and the hook's context for the duration
/// of the callback.
pub struct Invocation<'a> {
    args: &'a [Value],
    context: &'a InterceptionContext,
}

impl<'a> Invocation<'a> {
    /// The arguments of the intercepted call, receiver first for
    /// instance-bound targets.
    #[must_use]
    pub fn args(&self) -> &'a [Value] {
        self.args
    }

    /// The target this hook intercepts.
    #[must_use]
    pub fn target(&self) -> &HookTarget {
        self.context.target()
    }

    /// Invoke the original, pre-hook implementation.
    ///
    /// The arguments need not be the intercepted ones - a callback may
    /// rewrite them - but they must match the normalized signature.
    ///
    /// # Errors
    ///
    /// [`Error::ArgumentMismatch`] on arity or category mismatch;
    /// otherwise whatever the original implementation returns.
    pub fn invoke_original(&self, args: &[Value]) -> Result<Value> {
        self.context.invoke_backup(args)
    }
}

/// Interception state of one active hook.
///
/// Holds the caller-supplied callback, the captured target, the
/// normalized signature and the resolved backup entry point. Created once
/// per successful installation and owned by the hook controller for the
/// hook's lifetime; the synthesized stub holds a shared reference bound
/// at construction time.
pub struct InterceptionContext {
    callback: Arc<dyn HookCallback>,
    target: HookTarget,
    signature: NormalizedSignature,
    backup: EntryPoint,
}

impl InterceptionContext {
    pub(crate) fn new(
        callback: Arc<dyn HookCallback>,
        target: HookTarget,
        signature: NormalizedSignature,
        backup: EntryPoint,
    ) -> Self {
        InterceptionContext {
            callback,
            target,
            signature,
            backup,
        }
    }

    /// The target this context intercepts.
    #[must_use]
    pub fn target(&self) -> &HookTarget {
        &self.target
    }

    /// The normalized signature shared by both stub entry points.
    #[must_use]
    pub fn signature(&self) -> &NormalizedSignature {
        &self.signature
    }

    /// Run the interception callback for one call.
    ///
    /// This is what a synthesized stub's dispatch entry forwards into.
    ///
    /// # Errors
    ///
    /// [`Error::ArgumentMismatch`] when the arguments do not match the
    /// normalized signature; otherwise whatever the callback returns.
    pub fn dispatch(&self, args: &[Value]) -> Result<Value> {
        self.check_args(args)?;
        self.callback.intercept(Invocation {
            args,
            context: self,
        })
    }

    /// Invoke the original implementation through the backup entry point.
    ///
    /// # Errors
    ///
    /// [`Error::ArgumentMismatch`] when the arguments do not match the
    /// normalized signature; otherwise whatever the original returns.
    pub fn invoke_backup(&self, args: &[Value]) -> Result<Value> {
        self.check_args(args)?;
        self.backup.invoke(args)
    }

    fn check_args(&self, args: &[Value]) -> Result<()> {
        let expected = self.signature.parameters();
        let matches = args.len() == expected.len()
            && args
                .iter()
                .zip(expected)
                .all(|(arg, descriptor)| arg.descriptor() == *descriptor);
        if matches {
            return Ok(());
        }

        let mut found = String::with_capacity(args.len() + 2);
        found.push('(');
        for arg in args {
            found.push(arg.descriptor().code());
        }
        found.push(')');

        Err(Error::ArgumentMismatch {
            target: self.target.identity(),
            expected: self.signature.to_string(),
            found,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        hooking::EntryPoint,
        runtime::{HookTarget, RuntimeType, Value},
        signature::normalize,
        Result,
    };

    use super::*;

    fn context_for_set_name() -> InterceptionContext {
        // void setName(Object), backed by a backup that reports its first
        // real argument.
        let target = HookTarget::instance_method(
            "Widget",
            "setName",
            vec![RuntimeType::reference("java.lang.Object")],
            RuntimeType::Void,
        );
        let signature = normalize(&target);
        let backup = EntryPoint::new(
            "backup",
            signature.clone(),
            Arc::new(|args: &[Value]| -> Result<Value> { Ok(args[1].clone()) }),
        );
        fn forward(invocation: Invocation<'_>) -> Result<Value> {
            invocation.invoke_original(invocation.args())
        }
        let callback: Arc<dyn HookCallback> = Arc::new(forward);
        InterceptionContext::new(callback, target, signature, backup)
    }

    #[test]
    fn dispatch_forwards_to_callback_and_backup() {
        let context = context_for_set_name();
        let name = Value::reference(String::from("renamed"));
        let result = context
            .dispatch(&[Value::null(), name.clone()])
            .unwrap();
        assert_eq!(result, name);
    }

    #[test]
    fn arity_mismatch_is_rejected() {
        let context = context_for_set_name();
        let err = context.dispatch(&[Value::null()]).unwrap_err();
        assert!(matches!(err, Error::ArgumentMismatch { .. }));
        assert_eq!(err.stage(), None);
    }

    #[test]
    fn category_mismatch_is_never_coerced() {
        let context = context_for_set_name();
        let err = context
            .invoke_backup(&[Value::null(), Value::Int(3)])
            .unwrap_err();
        match err {
            Error::ArgumentMismatch {
                expected, found, ..
            } => {
                assert_eq!(expected, "(LL)V");
                assert_eq!(found, "(LI)");
            }
            other => panic!("expected ArgumentMismatch, got {other:?}"),
        }
    }
}
