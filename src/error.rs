use thiserror::Error;

use crate::hooking::Stage;

/// Failure reported by a [`StubSynthesizer`](crate::hooking::StubSynthesizer)
/// implementation.
///
/// Synthesis failures are hard errors: the hook controller never retries
/// them, and the target's dispatch remains untouched.
#[derive(Error, Debug)]
pub enum SynthesisError {
    /// The requested logical hook name collides with an already generated
    /// stub type.
    #[error("hook name `{0}` collides with an existing synthesized type")]
    NameCollision(String),

    /// The synthesizer cannot represent the requested descriptor
    /// combination.
    #[error("descriptor space exhausted: {0}")]
    DescriptorSpace(String),

    /// Code generation failed inside the synthesizer.
    #[error("code generation failed: {0}")]
    Codegen(String),
}

/// Failure reported by a [`HookInstaller`](crate::hooking::HookInstaller)
/// implementation.
///
/// An install failure is all-or-nothing: when the installer reports one,
/// the target's original dispatch is still fully intact and no partial
/// redirection exists.
#[derive(Error, Debug)]
pub enum InstallError {
    /// The target cannot be redirected (no body, pinned dispatch, ...).
    #[error("target is not hookable: {0}")]
    NotHookable(String),

    /// The target is already redirected in a way the installer cannot
    /// compose with.
    #[error("target is already redirected incompatibly: {0}")]
    Conflicting(String),

    /// Any other installer-specific failure.
    #[error("{0}")]
    Other(String),
}

/// Failure reported by a synthesized stub when its interception-context
/// slot cannot be assigned (slot missing, or already assigned).
#[derive(Error, Debug)]
#[error("{0}")]
pub struct ContextSlotError(
    /// Reason the slot could not be assigned
    pub String,
);

/// The generic Error type, which provides coverage for all errors this
/// library can potentially return.
///
/// Every variant carries the target identity it concerns;
/// [`Error::stage`] reports how far the installation protocol had
/// progressed when the failure occurred. Failures abort the protocol at
/// their step - there is no retry and no partially active hook.
///
/// # Error Categories
///
/// ## Installation Errors
/// - [`Error::AlreadyHooked`] - A hook is already registered for the target
/// - [`Error::Synthesis`] - The stub synthesizer could not produce a stub
/// - [`Error::Binding`] - The synthesized stub violates the entry-point contract
/// - [`Error::Install`] - The low-level installer refused the redirect
///
/// ## Invocation Errors
/// - [`Error::ArgumentMismatch`] - Arguments do not match the normalized
///   signature of an entry point
#[derive(Error, Debug)]
pub enum Error {
    /// A hook is already registered for this target.
    ///
    /// Re-hooking neither chains nor overwrites; the second request is
    /// rejected before any synthesis happens.
    #[error("target `{0}` already has an active hook")]
    AlreadyHooked(String),

    /// The stub synthesizer could not produce a signature-matching stub.
    ///
    /// Wraps the underlying [`SynthesisError`]. Occurs after
    /// normalization succeeded; the target remains unmodified.
    #[error("stub synthesis failed for `{target}`: {source}")]
    Synthesis {
        /// Identity of the target being hooked
        target: String,
        /// The synthesizer's failure
        #[source]
        source: SynthesisError,
    },

    /// The synthesized stub does not satisfy the two-entry-point
    /// contract.
    ///
    /// Raised when an expected entry point is missing, when an entry
    /// point's descriptors differ from the normalized signature, or when
    /// the stub rejects its context binding. This indicates a synthesizer
    /// defect, not a transient condition.
    #[error("entry point binding failed for `{target}`: {message}")]
    Binding {
        /// Identity of the target being hooked
        target: String,
        /// What the stub was missing or mismatching
        message: String,
    },

    /// The low-level installer refused or failed the redirect.
    ///
    /// Wraps the underlying [`InstallError`]. The hook was never
    /// observably active and the target's dispatch is unchanged.
    #[error("hook installation failed for `{target}`: {source}")]
    Install {
        /// Identity of the target being hooked
        target: String,
        /// The installer's failure
        #[source]
        source: InstallError,
    },

    /// Arguments passed across a hook boundary do not match the entry
    /// point's normalized signature.
    ///
    /// Raised at invocation time, for both interception dispatch and
    /// backup invocation. Mismatched categories are never coerced.
    #[error("argument mismatch for `{target}`: expected {expected}, found {found}")]
    ArgumentMismatch {
        /// Identity of the target whose entry point was invoked
        target: String,
        /// The expected signature, in descriptor-string form
        expected: String,
        /// The supplied argument categories, in descriptor-string form
        found: String,
    },
}

impl Error {
    /// The installation-protocol stage that had been reached when this
    /// failure occurred, or `None` for invocation-time errors.
    #[must_use]
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Error::AlreadyHooked(_) => Some(Stage::Captured),
            Error::Synthesis { .. } => Some(Stage::Normalized),
            Error::Binding { .. } => Some(Stage::StubBuilt),
            Error::Install { .. } => Some(Stage::ContextBound),
            Error::ArgumentMismatch { .. } => None,
        }
    }
}
