//! MethodRegistry - 名前によるメソッド解決
//!
//! 「型 + メソッド名」からメソッドを引けるようにするレジストリです。
//! リレー構築時に一度だけ解決し、その後は名前を再解決しません。
//!
//! # 学習ポイント
//! - HashMap での型消去された trait object の管理
//! - Generic methods での登録と型安全性
//! - Arc による共有所有権

use std::any::{Any, type_name};
use std::collections::HashMap;
use std::sync::Arc;

use super::method::{MethodDescriptor, STATIC_DECLARING_TYPE, StaticMethod};
use crate::domain::method_name::{InvalidMethodName, MethodName};
use crate::ports::method::DynMethod;

/// MethodRegistry は引数 `A`、戻り値 `R` のメソッドを登録・管理
///
/// # 使用例
/// ```ignore
/// let mut registry = MethodRegistry::<u64, ()>::new();
/// registry.register(method!(Ticker::on_tick))?;
///
/// let on_tick = registry.resolve::<Ticker>("on_tick");
/// ```
pub struct MethodRegistry<A, R> {
    methods: HashMap<MethodKey, Arc<dyn DynMethod<A, R>>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct MethodKey {
    declaring_type: &'static str,
    name: MethodName,
}

/// RegistryError は MethodRegistry の操作エラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("method '{name}' is already registered on {declaring_type}")]
    AlreadyRegistered {
        declaring_type: &'static str,
        name: String,
    },

    #[error(transparent)]
    InvalidName(#[from] InvalidMethodName),
}

impl<A: 'static, R: 'static> MethodRegistry<A, R> {
    pub fn new() -> Self {
        Self {
            methods: HashMap::new(),
        }
    }

    /// Register an instance method of `T`.
    pub fn register<T: Any + Send + Sync>(
        &mut self,
        method: MethodDescriptor<T, A, R>,
    ) -> Result<(), RegistryError> {
        self.insert(Arc::new(method))
    }

    /// Register a function that needs no receiver.
    pub fn register_static(&mut self, method: StaticMethod<A, R>) -> Result<(), RegistryError> {
        self.insert(Arc::new(method))
    }

    fn insert(&mut self, method: Arc<dyn DynMethod<A, R>>) -> Result<(), RegistryError> {
        let key = MethodKey {
            declaring_type: method.declaring_type(),
            name: MethodName::parse(method.name())?,
        };
        if self.methods.contains_key(&key) {
            return Err(RegistryError::AlreadyRegistered {
                declaring_type: key.declaring_type,
                name: key.name.to_string(),
            });
        }
        self.methods.insert(key, method);
        Ok(())
    }
}

impl<A, R> MethodRegistry<A, R> {
    /// Look up an instance method declared on `T`.
    pub fn resolve<T: Any>(&self, name: &str) -> Option<Arc<dyn DynMethod<A, R>>> {
        self.resolve_on(type_name::<T>(), name)
    }

    pub fn resolve_static(&self, name: &str) -> Option<Arc<dyn DynMethod<A, R>>> {
        self.resolve_on(STATIC_DECLARING_TYPE, name)
    }

    /// Look up by the declaring type's name, as reported by `std::any::type_name`.
    ///
    /// A malformed `name` can never have been registered and resolves to `None`.
    pub fn resolve_on(
        &self,
        declaring_type: &'static str,
        name: &str,
    ) -> Option<Arc<dyn DynMethod<A, R>>> {
        let key = MethodKey {
            declaring_type,
            name: MethodName::parse(name).ok()?,
        };
        self.methods.get(&key).map(Arc::clone)
    }

    /// `Type::method` entries, sorted.
    pub fn registered_methods(&self) -> Vec<String> {
        let mut keys: Vec<&MethodKey> = self.methods.keys().collect();
        keys.sort();
        keys.into_iter()
            .map(|key| format!("{}::{}", key.declaring_type, key.name))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl<A: 'static, R: 'static> Default for MethodRegistry<A, R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method;

    struct Meter;

    impl Meter {
        fn read(&self, scale: u32) -> u32 {
            scale * 10
        }

        fn peek(&self, _scale: u32) -> u32 {
            0
        }
    }

    struct Gauge;

    impl Gauge {
        fn read(&self, scale: u32) -> u32 {
            scale
        }
    }

    fn identity(n: u32) -> u32 {
        n
    }

    #[test]
    fn register_and_resolve() {
        let mut registry = MethodRegistry::<u32, u32>::new();
        registry.register(method!(Meter::read)).unwrap();

        let resolved = registry.resolve::<Meter>("read").unwrap();
        assert_eq!(resolved.name(), "read");
        assert_eq!(resolved.declaring_type(), type_name::<Meter>());
        assert!(registry.resolve::<Meter>("write").is_none());
    }

    #[test]
    fn same_name_on_different_types_is_not_confused() {
        let mut registry = MethodRegistry::<u32, u32>::new();
        registry.register(method!(Meter::read)).unwrap();
        registry.register(method!(Gauge::read)).unwrap();

        let meter = registry.resolve::<Meter>("read").unwrap();
        let gauge = registry.resolve::<Gauge>("read").unwrap();
        assert_eq!(meter.declaring_type(), type_name::<Meter>());
        assert_eq!(gauge.declaring_type(), type_name::<Gauge>());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn double_registration() {
        let mut registry = MethodRegistry::<u32, u32>::new();
        registry.register(method!(Meter::read)).unwrap();

        let result = registry.register(method!(Meter::read));
        assert!(matches!(
            result,
            Err(RegistryError::AlreadyRegistered { name, .. }) if name == "read"
        ));
    }

    #[test]
    fn invalid_names_are_rejected() {
        let mut registry = MethodRegistry::<u32, u32>::new();
        let result = registry.register(MethodDescriptor::<Meter, _, _>::new("not a name", Meter::read));
        assert!(matches!(result, Err(RegistryError::InvalidName(_))));
        assert!(registry.is_empty());
    }

    #[test]
    fn static_methods_live_in_their_own_namespace() {
        let mut registry = MethodRegistry::<u32, u32>::new();
        registry
            .register_static(StaticMethod::new("read", identity))
            .unwrap();
        registry.register(method!(Meter::read)).unwrap();

        assert!(registry.resolve_static("read").unwrap().is_static());
        assert!(!registry.resolve::<Meter>("read").unwrap().is_static());
    }

    #[test]
    fn resolve_on_uses_the_declaring_type_name() {
        let mut registry = MethodRegistry::<u32, u32>::new();
        registry.register(method!(Meter::read)).unwrap();
        registry.register(method!(Gauge::read)).unwrap();

        let gauge = registry.resolve_on(type_name::<Gauge>(), "read").unwrap();
        assert_eq!(gauge.declaring_type(), type_name::<Gauge>());
        assert!(registry.resolve_on(type_name::<Gauge>(), "peek").is_none());
        assert!(registry.resolve_on("Meter", "read").is_none());
        assert!(registry.resolve_on(type_name::<Meter>(), "re ad").is_none());
    }

    #[test]
    fn registered_methods_are_listed_sorted() {
        let mut registry = MethodRegistry::<u32, u32>::new();
        registry.register(method!(Meter::read)).unwrap();
        registry.register(method!(Meter::peek)).unwrap();

        let meter = type_name::<Meter>();
        assert_eq!(
            registry.registered_methods(),
            vec![format!("{meter}::peek"), format!("{meter}::read")]
        );
    }
}
