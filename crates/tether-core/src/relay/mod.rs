//! WeakRelay - 購読者を生かし続けないコールバック
//!
//! Publisher が保持するコールバックは、普通は購読者への強参照を含みます。
//! `WeakRelay` は購読者を弱参照で持ち、呼び出しのたびに解決します。
//!
//! # Dispatch
//! 1. 弱参照を upgrade し、呼び出しの間だけ強参照として保持（pin）
//! 2. 回収済みなら何もせず `R::default()` を返す（エラーではない）
//! 3. 生きていればメソッドを target に束縛して実行し、戻り値をそのまま返す
//! 4. 束縛に失敗したら `RelayError::Rebind` を即座に返す
//!
//! Dispatch はロックもログも行わない、ただの同期呼び出しです。

mod shapes;
mod target;

pub use self::shapes::{
    ActionRelay, ActionRelay1, CollectionChangedRelay, EventRelay, EventRelayOf, FuncRelay,
    FuncRelay1,
};
pub use self::target::TargetRef;

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use self::target::Resolved;
use crate::domain::errors::RelayError;
use crate::domain::state::RelayState;
use crate::ports::method::{Binding, DynMethod};
use crate::typed::{MethodDescriptor, StaticMethod};

/// A callback slot that does not keep its subscriber alive.
///
/// `A` is the argument (use `()` for none, a tuple for several), `R` the result.
pub struct WeakRelay<A, R = ()> {
    target: TargetRef,
    method: Arc<dyn DynMethod<A, R>>,
}

impl<A: 'static, R: 'static> WeakRelay<A, R> {
    /// Relay to `method` on `target`, holding `target` weakly.
    pub fn new<T: Any + Send + Sync>(target: &Arc<T>, method: MethodDescriptor<T, A, R>) -> Self {
        Self {
            target: TargetRef::of(target),
            method: Arc::new(method),
        }
    }

    /// Relay to a function with no receiver. Never expires.
    pub fn unbound(method: StaticMethod<A, R>) -> Self {
        Self {
            target: TargetRef::Static,
            method: Arc::new(method),
        }
    }
}

impl<A, R> WeakRelay<A, R> {
    /// Assemble from erased parts.
    ///
    /// Nothing checks that `method` can be bound to `target` here; a mismatch
    /// surfaces as `RelayError::Rebind` on the first dispatch against a live target.
    pub fn from_parts(target: TargetRef, method: Arc<dyn DynMethod<A, R>>) -> Self {
        Self { target, method }
    }

    pub fn state(&self) -> RelayState {
        self.target.state()
    }

    pub fn is_alive(&self) -> bool {
        self.state() == RelayState::Alive
    }

    pub fn method_name(&self) -> &'static str {
        self.method.name()
    }

    pub fn declaring_type(&self) -> &'static str {
        self.method.declaring_type()
    }

    pub fn target(&self) -> &TargetRef {
        &self.target
    }

    /// Whether this relay calls into `candidate`.
    pub fn targets<T: Any + Send + Sync>(&self, candidate: &Arc<T>) -> bool {
        self.target.refers_to(candidate)
    }
}

impl<A, R: Default> WeakRelay<A, R> {
    /// Invoke the method on the target if it is still alive.
    ///
    /// An expired target yields `R::default()`. A method that cannot be bound to
    /// the resolved target yields `RelayError::Rebind`.
    pub fn dispatch(&self, args: A) -> Result<R, RelayError> {
        match self.target.resolve() {
            Resolved::Expired => Ok(R::default()),
            Resolved::Static => self.method.bind_and_invoke(Binding::Static, args),
            Resolved::Live(pinned) => {
                let binding = Binding::Instance {
                    target: &*pinned,
                    type_name: self.target.type_name(),
                };
                self.method.bind_and_invoke(binding, args)
            }
        }
    }
}

impl<A, R> Clone for WeakRelay<A, R> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
            method: Arc::clone(&self.method),
        }
    }
}

impl<A, R> fmt::Debug for WeakRelay<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakRelay")
            .field("target", &self.target)
            .field("declaring_type", &self.method.declaring_type())
            .field("method", &self.method.name())
            .finish()
    }
}
