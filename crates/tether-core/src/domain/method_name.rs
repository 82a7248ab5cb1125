//! MethodName - メソッド名の命名規約
//!
//! 名前で解決するメソッド（`MethodRegistry` 経由）は Rust の識別子と同じ規約に従います。
//! - 先頭: `A-Z`, `a-z`, `_`
//! - 2 文字目以降: 上記 + `0-9`
//! - 例: `on_tick`, `compute`, `handle_v2`

use std::fmt;

/// 規約を満たすことが検証済みのメソッド名
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodName(String);

/// InvalidMethodName は命名規約違反
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid method name '{0}': expected an identifier like `on_tick`")]
pub struct InvalidMethodName(pub String);

impl MethodName {
    pub fn parse(value: &str) -> Result<Self, InvalidMethodName> {
        Self::validate(value)?;
        Ok(Self(value.to_string()))
    }

    pub fn validate(value: &str) -> Result<(), InvalidMethodName> {
        let mut chars = value.chars();
        let valid = match chars.next() {
            Some(first) if first.is_ascii_alphabetic() || first == '_' => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            _ => false,
        };
        if valid && value != "_" {
            Ok(())
        } else {
            Err(InvalidMethodName(value.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MethodName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
