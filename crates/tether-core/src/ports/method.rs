//! DynMethod port - 束縛されていないメソッドの抽象化
//!
//! リレーは「どのメソッドを呼ぶか」を、target から切り離した形で保持します。
//! 呼び出しのたびに、解決済みの target へ束縛（rebind）してから実行します。
//!
//! # 学習ポイント
//! - Object-safe trait (DynMethod)
//! - `dyn Any` からの downcast による late binding
//! - 実装は `typed::MethodDescriptor`（インスタンスメソッド）と `typed::StaticMethod`

use std::any::Any;

use crate::domain::errors::RelayError;

/// Binding は、メソッドを束縛する相手
///
/// `Instance` の参照は、呼び出しの間だけ生きている pinned な `Arc` から借用されます。
#[derive(Clone, Copy)]
pub enum Binding<'a> {
    Instance {
        target: &'a (dyn Any + Send + Sync),
        type_name: &'static str,
    },
    Static,
}

impl Binding<'_> {
    pub fn type_name(&self) -> &'static str {
        match self {
            Binding::Instance { type_name, .. } => *type_name,
            Binding::Static => crate::domain::errors::STATIC_TARGET,
        }
    }
}

/// DynMethod は引数 `A` を受け取り `R` を返す、型消去されたメソッド
///
/// # Object Safety
/// - メソッドはジェネリックではない
/// - `Arc<dyn DynMethod<A, R>>` としてリレーやレジストリに格納できる
pub trait DynMethod<A, R>: Send + Sync {
    /// Rebind to `binding` and invoke.
    ///
    /// Returns `RelayError::Rebind` when the binding cannot serve as the receiver.
    fn bind_and_invoke(&self, binding: Binding<'_>, args: A) -> Result<R, RelayError>;

    fn name(&self) -> &'static str;

    /// Type the method is declared on.
    fn declaring_type(&self) -> &'static str;

    /// A static method needs no receiver.
    fn is_static(&self) -> bool;
}
