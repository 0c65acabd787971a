//! The low-level installation capability.
//!
//! The physical redirection of a target - vtable rewrite, entry-point
//! patch, dispatch-table swap - is runtime specific and injected behind
//! [`HookInstaller`]. The interception core only requires the contract
//! below; it never begins forwarding interception calls before the
//! installer has confirmed success.

use crate::{hooking::EntryPoint, runtime::HookTarget, InstallError};

/// The low-level hook installation capability.
///
/// # Contract
///
/// A successful `install` must
///
/// - redirect all future invocations of `target` to `dispatch`, observed
///   atomically by every thread (no thread may see a half-updated
///   dispatch state), and
/// - arrange that `backup` becomes capable of invoking the original,
///   pre-redirect implementation.
///
/// The operation is all-or-nothing: on failure the target's dispatch must
/// be left exactly as it was. There is no undo primitive for a hook that
/// was made live.
pub trait HookInstaller: Send + Sync {
    /// Atomically redirect `target` to the stub's dispatch entry and wire
    /// its backup entry to the original implementation.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError`] when the target cannot be redirected; the
    /// target is then observably unmodified.
    fn install(
        &self,
        target: &HookTarget,
        dispatch: &EntryPoint,
        backup: &EntryPoint,
    ) -> std::result::Result<(), InstallError>;
}
