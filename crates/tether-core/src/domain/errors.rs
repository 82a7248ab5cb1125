//! Errors - リレー実行時のエラー
//!
//! target の回収（expired）はエラーではありません。`dispatch` の中で吸収され、
//! 呼び出し側には既定値として見えます。ここに並ぶのはプログラマのミスだけです。

use thiserror::Error;

/// Placeholder used as the "found" type when a relay has no bound target.
pub const STATIC_TARGET: &str = "<static>";

/// RelayError は dispatch が呼び出し側に返すエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// 保持しているメソッドを、解決した target に束縛できなかった。
    #[error("cannot rebind method '{method}' declared on {expected} to a target of type {found}")]
    Rebind {
        method: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

impl RelayError {
    pub fn rebind(method: &'static str, expected: &'static str, found: &'static str) -> Self {
        Self::Rebind {
            method,
            expected,
            found,
        }
    }
}
