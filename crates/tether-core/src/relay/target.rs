//! Non-owning handle to a relay's target.

use std::any::{Any, type_name};
use std::fmt;
use std::sync::{Arc, Weak};

use crate::domain::errors::STATIC_TARGET;
use crate::domain::state::RelayState;

/// What a relay calls into.
///
/// `Instance` never keeps the target alive. `Static` means there is no target;
/// it is always alive and needs no liveness check.
#[derive(Clone)]
pub enum TargetRef {
    Instance {
        handle: Weak<dyn Any + Send + Sync>,
        type_name: &'static str,
    },
    Static,
}

/// Result of resolving a [`TargetRef`] once.
///
/// `Live` holds a strong reference: the target cannot be reclaimed while it exists.
pub(crate) enum Resolved {
    Live(Arc<dyn Any + Send + Sync>),
    Static,
    Expired,
}

impl TargetRef {
    pub fn of<T: Any + Send + Sync>(target: &Arc<T>) -> Self {
        let weak: Weak<T> = Arc::downgrade(target);
        let handle: Weak<dyn Any + Send + Sync> = weak;
        Self::Instance {
            handle,
            type_name: type_name::<T>(),
        }
    }

    /// Upgrade and pin in one step.
    pub(crate) fn resolve(&self) -> Resolved {
        match self {
            TargetRef::Instance { handle, .. } => match handle.upgrade() {
                Some(pinned) => Resolved::Live(pinned),
                None => Resolved::Expired,
            },
            TargetRef::Static => Resolved::Static,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            TargetRef::Instance { type_name, .. } => *type_name,
            TargetRef::Static => STATIC_TARGET,
        }
    }

    /// Point-in-time answer; the target may expire right after this returns.
    pub fn state(&self) -> RelayState {
        match self {
            TargetRef::Instance { handle, .. } if handle.strong_count() == 0 => {
                RelayState::Expired
            }
            _ => RelayState::Alive,
        }
    }

    /// Whether this handle refers to `candidate` (by identity, not equality).
    pub fn refers_to<T: Any + Send + Sync>(&self, candidate: &Arc<T>) -> bool {
        match self {
            TargetRef::Instance { handle, .. } => std::ptr::eq(
                handle.as_ptr().cast::<()>(),
                Arc::as_ptr(candidate).cast::<()>(),
            ),
            TargetRef::Static => false,
        }
    }

    pub fn is_static(&self) -> bool {
        matches!(self, TargetRef::Static)
    }
}

impl fmt::Debug for TargetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetRef::Instance { type_name, .. } => f
                .debug_struct("Instance")
                .field("type_name", type_name)
                .field("state", &self.state())
                .finish(),
            TargetRef::Static => f.write_str("Static"),
        }
    }
}
