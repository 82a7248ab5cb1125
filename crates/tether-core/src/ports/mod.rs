//! Ports - 抽象化レイヤー
//!
//! リレーがメソッドを呼ぶときの境界を trait として定義します。
//! リフレクションによる rebind の代わりに、この trait を経由して呼び出します。

pub mod method;

pub use self::method::{Binding, DynMethod};
