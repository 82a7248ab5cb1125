//! MethodDescriptor - 型付きのメソッド識別子
//!
//! # 学習ポイント
//! - 関数ポインタ `fn(&T, A) -> R` を「束縛されていないメソッド」として扱う
//! - Type erasure パターン (MethodDescriptor<T, A, R> → DynMethod<A, R>)
//! - `&self` メソッドは late-bound lifetime なので、そのまま関数ポインタに変換できる

use std::any::{Any, type_name};
use std::fmt;

use crate::domain::errors::RelayError;
use crate::ports::method::{Binding, DynMethod};

/// Declaring type reported by [`StaticMethod`].
pub const STATIC_DECLARING_TYPE: &str = "<static>";

/// An instance method of `T` taking `A` and returning `R`, not bound to any instance.
///
/// # 使用例
/// ```ignore
/// struct Ticker { count: AtomicUsize }
///
/// impl Ticker {
///     fn on_tick(&self, n: u64) { ... }
/// }
///
/// let descriptor = method!(Ticker::on_tick);
/// let relay = WeakRelay::new(&ticker, descriptor);
/// ```
pub struct MethodDescriptor<T, A, R> {
    name: &'static str,
    func: Receiver<T, A, R>,
}

enum Receiver<T, A, R> {
    WithArgs(fn(&T, A) -> R),
    /// Only constructed when `A = ()`.
    NoArgs(fn(&T) -> R),
}

impl<T, A, R> Clone for Receiver<T, A, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, A, R> Copy for Receiver<T, A, R> {}

impl<T, A, R> MethodDescriptor<T, A, R> {
    pub fn new(name: &'static str, func: fn(&T, A) -> R) -> Self {
        Self {
            name,
            func: Receiver::WithArgs(func),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn declaring_type(&self) -> &'static str {
        type_name::<T>()
    }

    /// Call directly on a receiver the caller already holds.
    pub fn invoke(&self, receiver: &T, args: A) -> R {
        match self.func {
            Receiver::WithArgs(func) => func(receiver, args),
            Receiver::NoArgs(func) => func(receiver),
        }
    }
}

impl<T, R> MethodDescriptor<T, (), R> {
    /// A method taking no arguments besides the receiver, e.g. `fn compute(&self) -> i32`.
    pub fn nullary(name: &'static str, func: fn(&T) -> R) -> Self {
        Self {
            name,
            func: Receiver::NoArgs(func),
        }
    }
}

impl<T, A, R> Clone for MethodDescriptor<T, A, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, A, R> Copy for MethodDescriptor<T, A, R> {}

impl<T, A, R> fmt::Debug for MethodDescriptor<T, A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("declaring_type", &type_name::<T>())
            .field("name", &self.name)
            .finish()
    }
}

impl<T, A, R> DynMethod<A, R> for MethodDescriptor<T, A, R>
where
    T: Any + Send + Sync,
{
    fn bind_and_invoke(&self, binding: Binding<'_>, args: A) -> Result<R, RelayError> {
        let found = binding.type_name();
        let Binding::Instance { target, .. } = binding else {
            return Err(RelayError::rebind(self.name, type_name::<T>(), found));
        };
        let receiver = target
            .downcast_ref::<T>()
            .ok_or_else(|| RelayError::rebind(self.name, type_name::<T>(), found))?;
        Ok(self.invoke(receiver, args))
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn declaring_type(&self) -> &'static str {
        type_name::<T>()
    }

    fn is_static(&self) -> bool {
        false
    }
}

/// A function that needs no receiver.
///
/// A relay over a static method has nothing that can expire unless it was
/// explicitly paired with a target.
pub struct StaticMethod<A, R> {
    name: &'static str,
    func: Free<A, R>,
}

enum Free<A, R> {
    WithArgs(fn(A) -> R),
    /// Only constructed when `A = ()`.
    NoArgs(fn() -> R),
}

impl<A, R> Clone for Free<A, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A, R> Copy for Free<A, R> {}

impl<A, R> StaticMethod<A, R> {
    pub fn new(name: &'static str, func: fn(A) -> R) -> Self {
        Self {
            name,
            func: Free::WithArgs(func),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn invoke(&self, args: A) -> R {
        match self.func {
            Free::WithArgs(func) => func(args),
            Free::NoArgs(func) => func(),
        }
    }
}

impl<R> StaticMethod<(), R> {
    pub fn nullary(name: &'static str, func: fn() -> R) -> Self {
        Self {
            name,
            func: Free::NoArgs(func),
        }
    }
}

impl<A, R> Clone for StaticMethod<A, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A, R> Copy for StaticMethod<A, R> {}

impl<A, R> fmt::Debug for StaticMethod<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticMethod")
            .field("name", &self.name)
            .finish()
    }
}

impl<A, R> DynMethod<A, R> for StaticMethod<A, R> {
    fn bind_and_invoke(&self, _binding: Binding<'_>, args: A) -> Result<R, RelayError> {
        Ok(self.invoke(args))
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn declaring_type(&self) -> &'static str {
        STATIC_DECLARING_TYPE
    }

    fn is_static(&self) -> bool {
        true
    }
}

/// Build a [`MethodDescriptor`] from a method path, naming it after the method.
///
/// `method!(Ticker::on_tick)` is `MethodDescriptor::<Ticker, _, _>::new("on_tick", Ticker::on_tick)`.
#[macro_export]
macro_rules! method {
    ($ty:ident :: $name:ident) => {
        $crate::typed::MethodDescriptor::<$ty, _, _>::new(stringify!($name), $ty::$name)
    };
    (<$ty:ty> :: $name:ident) => {
        $crate::typed::MethodDescriptor::<$ty, _, _>::new(stringify!($name), <$ty>::$name)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct Greeter {
        prefix: String,
    }

    impl Greeter {
        fn greet(&self, name: String) -> String {
            format!("{}, {name}", self.prefix)
        }
    }

    struct Stranger;

    fn double(n: i32) -> i32 {
        n * 2
    }

    fn greeter() -> Arc<Greeter> {
        Arc::new(Greeter {
            prefix: "hello".to_string(),
        })
    }

    #[test]
    fn descriptor_binds_to_matching_instance() {
        let target = greeter();
        let descriptor = method!(Greeter::greet);

        let binding = Binding::Instance {
            target: &*target,
            type_name: type_name::<Greeter>(),
        };
        let out = descriptor
            .bind_and_invoke(binding, "tether".to_string())
            .unwrap();

        assert_eq!(out, "hello, tether");
        assert_eq!(DynMethod::name(&descriptor), "greet");
        assert!(descriptor.declaring_type().ends_with("Greeter"));
        assert!(!descriptor.is_static());
    }

    #[test]
    fn descriptor_refuses_foreign_instance() {
        let stranger = Arc::new(Stranger);
        let descriptor = method!(Greeter::greet);

        let binding = Binding::Instance {
            target: &*stranger,
            type_name: type_name::<Stranger>(),
        };
        let err = descriptor
            .bind_and_invoke(binding, "x".to_string())
            .unwrap_err();

        assert_eq!(
            err,
            RelayError::rebind("greet", type_name::<Greeter>(), type_name::<Stranger>())
        );
    }

    #[test]
    fn descriptor_refuses_static_binding() {
        let descriptor = method!(Greeter::greet);
        let err = descriptor
            .bind_and_invoke(Binding::Static, "x".to_string())
            .unwrap_err();

        assert!(matches!(err, RelayError::Rebind { found, .. } if found == crate::domain::errors::STATIC_TARGET));
    }

    #[test]
    fn static_method_ignores_binding() {
        let method = StaticMethod::new("double", double);
        let stranger = Arc::new(Stranger);

        assert_eq!(method.bind_and_invoke(Binding::Static, 21).unwrap(), 42);
        let binding = Binding::Instance {
            target: &*stranger,
            type_name: type_name::<Stranger>(),
        };
        assert_eq!(method.bind_and_invoke(binding, 5).unwrap(), 10);
        assert!(method.is_static());
        assert_eq!(method.declaring_type(), STATIC_DECLARING_TYPE);
    }

    #[test]
    fn nullary_methods() {
        fn seven() -> u8 {
            7
        }

        let target = greeter();
        let len = MethodDescriptor::nullary("prefix_len", |g: &Greeter| g.prefix.len());
        let binding = Binding::Instance {
            target: &*target,
            type_name: type_name::<Greeter>(),
        };

        assert_eq!(len.bind_and_invoke(binding, ()).unwrap(), 5);
        assert_eq!(StaticMethod::nullary("seven", seven).invoke(()), 7);
    }

    #[test]
    fn direct_invoke_uses_the_given_receiver() {
        let descriptor = method!(<Greeter>::greet);
        let receiver = Greeter {
            prefix: "hi".to_string(),
        };
        assert_eq!(descriptor.invoke(&receiver, "you".to_string()), "hi, you");
    }
}
