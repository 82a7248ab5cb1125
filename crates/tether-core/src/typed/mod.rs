//! Typed - 型付きメソッド API
//!
//! メソッドを「型 + 名前 + 関数ポインタ」として扱い、
//! リレーが target に束縛するまで receiver を持たないようにします。
//!
//! # 二層構造
//! - **表層（Typed）**: `MethodDescriptor<T, A, R>`, `StaticMethod<A, R>` - 型安全
//! - **内部（Dyn）**: `DynMethod<A, R>` - object-safe, type erasure

pub mod method;
pub mod registry;

pub use self::method::{MethodDescriptor, STATIC_DECLARING_TYPE, StaticMethod};
pub use self::registry::{MethodRegistry, RegistryError};
