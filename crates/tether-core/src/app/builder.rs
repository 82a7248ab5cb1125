//! RelayBuilder - リレーの構築
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 構築時検証（Fail-fast 設計）
//! - 名前によるメソッド解決は build() で一度だけ行う

use std::any::Any;
use std::sync::Arc;

use crate::domain::method_name::{InvalidMethodName, MethodName};
use crate::ports::method::DynMethod;
use crate::relay::{TargetRef, WeakRelay};
use crate::typed::{MethodDescriptor, MethodRegistry, StaticMethod};

/// RelayBuilder は WeakRelay を構築
///
/// # 使用例
/// ```ignore
/// let relay = RelayBuilder::new()
///     .target(&ticker)
///     .method_named(&registry, "on_tick")
///     .build()?;
/// ```
///
/// # Fail-fast 設計
/// - target を省略すると static な呼び出しになる（生存確認なし）
/// - メソッドが指定されていなければ build() が BuildError::MissingMethod を返す
/// - 名前で指定したメソッドが target の型に登録されていなければ BuildError::UnknownMethod
pub struct RelayBuilder<'r, A, R> {
    target: TargetRef,
    method: Option<MethodSource<'r, A, R>>,
}

enum MethodSource<'r, A, R> {
    Resolved(Arc<dyn DynMethod<A, R>>),
    Named {
        registry: &'r MethodRegistry<A, R>,
        name: String,
    },
}

/// BuildError はリレー構築時のエラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("no method was given; a relay needs a method to call")]
    MissingMethod,

    #[error("method '{name}' is not registered on {declaring_type}")]
    UnknownMethod {
        declaring_type: &'static str,
        name: String,
    },

    #[error(transparent)]
    InvalidMethodName(#[from] InvalidMethodName),
}

impl<'r, A: 'static, R: 'static> RelayBuilder<'r, A, R> {
    pub fn new() -> Self {
        Self {
            target: TargetRef::Static,
            method: None,
        }
    }

    /// Hold `target` weakly. Without this the relay is static.
    pub fn target<T: Any + Send + Sync>(mut self, target: &Arc<T>) -> Self {
        self.target = TargetRef::of(target);
        self
    }

    pub fn method<T: Any + Send + Sync>(mut self, method: MethodDescriptor<T, A, R>) -> Self {
        self.method = Some(MethodSource::Resolved(Arc::new(method)));
        self
    }

    pub fn static_method(mut self, method: StaticMethod<A, R>) -> Self {
        self.method = Some(MethodSource::Resolved(Arc::new(method)));
        self
    }

    /// Use an already erased method. Binding is checked on dispatch, not here.
    pub fn erased_method(mut self, method: Arc<dyn DynMethod<A, R>>) -> Self {
        self.method = Some(MethodSource::Resolved(method));
        self
    }

    /// Resolve `name` in `registry` against the target's type at build time.
    pub fn method_named(mut self, registry: &'r MethodRegistry<A, R>, name: &str) -> Self {
        self.method = Some(MethodSource::Named {
            registry,
            name: name.to_string(),
        });
        self
    }

    pub fn build(self) -> Result<WeakRelay<A, R>, BuildError> {
        let method = match self.method {
            None => return Err(BuildError::MissingMethod),
            Some(MethodSource::Resolved(method)) => method,
            Some(MethodSource::Named { registry, name }) => {
                let name = MethodName::parse(&name)?;
                let resolved = if self.target.is_static() {
                    registry.resolve_static(name.as_str())
                } else {
                    registry.resolve_on(self.target.type_name(), name.as_str())
                };
                resolved.ok_or_else(|| BuildError::UnknownMethod {
                    declaring_type: self.target.type_name(),
                    name: name.to_string(),
                })?
            }
        };
        Ok(WeakRelay::from_parts(self.target, method))
    }
}

impl<A: 'static, R: 'static> Default for RelayBuilder<'_, A, R> {
    fn default() -> Self {
        Self::new()
    }
}
