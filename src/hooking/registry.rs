//! Registry of active hooks.
//!
//! The [`HookRegistry`] is the controller's record of every hook that is
//! currently live in the process. It backs the fail-fast duplicate check
//! (at most one hook per target identity) and gives embedders a read-only
//! view over active interception contexts.
//!
//! # Registry Architecture
//!
//! Two indices, both lock-free for readers:
//!
//! - **Id-based lookup**: primary ordered store (`SkipMap`) keyed by the
//!   monotonically assigned [`HookId`]
//! - **Identity-based lookup**: concurrent map (`DashMap`) from target
//!   identity strings to hook ids
//!
//! Ids are generated from an atomic counter and never reused, so
//! iteration order is installation order.

use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use crossbeam_skiplist::SkipMap;
use dashmap::DashMap;

use crate::hooking::InterceptionContextRc;

/// Identifier of one installed hook, unique for the registry's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HookId(u64);

impl HookId {
    /// The raw id value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for HookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hook#{}", self.0)
    }
}

/// Record of all active hooks, keyed by id and by target identity.
pub struct HookRegistry {
    next_id: AtomicU64,
    hooks: SkipMap<HookId, InterceptionContextRc>,
    by_identity: DashMap<String, HookId>,
}

impl HookRegistry {
    pub(crate) fn new() -> Self {
        HookRegistry {
            next_id: AtomicU64::new(1),
            hooks: SkipMap::new(),
            by_identity: DashMap::new(),
        }
    }

    /// Record a successfully installed hook and assign its id.
    pub(crate) fn register(&self, context: InterceptionContextRc) -> HookId {
        let id = HookId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.by_identity
            .insert(context.target().identity(), id);
        self.hooks.insert(id, context);
        id
    }

    /// Check whether a hook is registered for the given target identity.
    #[must_use]
    pub fn contains(&self, identity: &str) -> bool {
        self.by_identity.contains_key(identity)
    }

    /// Look up an active hook's context by id.
    #[must_use]
    pub fn get(&self, id: HookId) -> Option<InterceptionContextRc> {
        self.hooks.get(&id).map(|entry| entry.value().clone())
    }

    /// Look up an active hook's context by target identity.
    #[must_use]
    pub fn get_by_identity(&self, identity: &str) -> Option<InterceptionContextRc> {
        let id = *self.by_identity.get(identity)?;
        self.get(id)
    }

    /// Number of active hooks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// True when no hook is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Iterate over active hooks in installation order.
    pub fn iter(&self) -> impl Iterator<Item = (HookId, InterceptionContextRc)> + '_ {
        self.hooks
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
