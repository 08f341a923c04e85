//! 可调用对象抽象
//!
//! Rust 没有运行时函数反射，参数类型列表由 [`Handler`] 在编译期为
//! 0 到 12 个参数的 `Fn` 自动生成。

use inject_common::{InjectResult, Signature, TypeInfo, UsageError, Value};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 可调用对象 trait
///
/// `Args` 为参数类型组成的元组，所有参数都需要 `Clone`，
/// 调用时从存储值中克隆出实参。
pub trait Handler<Args> {
    /// 返回类型
    type Output: 'static;

    /// 参数与返回类型
    fn signature(&self) -> Signature;

    /// 以按声明顺序排列的实参调用
    fn call_with(&self, args: Vec<Value>) -> InjectResult<Self::Output>;
}

/// 按位置取出并还原一个实参
fn take_argument<T: Any + Clone>(
    args: &mut impl Iterator<Item = Value>,
    expected: usize,
    supplied: usize,
) -> InjectResult<T> {
    let value = args.next().ok_or(UsageError::ArgumentCountMismatch {
        expected,
        actual: supplied,
    })?;
    value.downcast::<T>().ok_or_else(|| {
        UsageError::TypeMismatch {
            expected: std::any::type_name::<T>(),
            actual: value.type_info().name,
        }
        .into()
    })
}

macro_rules! count {
    () => { 0usize };
    ($head:ident $($tail:ident)*) => { 1usize + count!($($tail)*) };
}

macro_rules! impl_handler {
    ($($param:ident),*) => {
        impl<Func, Out, $($param,)*> Handler<($($param,)*)> for Func
        where
            Func: Fn($($param),*) -> Out,
            Out: 'static,
            $($param: Any + Clone,)*
        {
            type Output = Out;

            fn signature(&self) -> Signature {
                Signature::new(vec![$(TypeInfo::of::<$param>()),*], TypeInfo::of::<Out>())
            }

            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn call_with(&self, args: Vec<Value>) -> InjectResult<Out> {
                const EXPECTED: usize = count!($($param)*);
                let supplied = args.len();
                if supplied != EXPECTED {
                    return Err(UsageError::ArgumentCountMismatch {
                        expected: EXPECTED,
                        actual: supplied,
                    }
                    .into());
                }
                let mut args = args.into_iter();
                $(
                    let $param = take_argument::<$param>(&mut args, EXPECTED, supplied)?;
                )*
                Ok(self($($param),*))
            }
        }
    };
}

impl_handler!();
impl_handler!(A1);
impl_handler!(A1, A2);
impl_handler!(A1, A2, A3);
impl_handler!(A1, A2, A3, A4);
impl_handler!(A1, A2, A3, A4, A5);
impl_handler!(A1, A2, A3, A4, A5, A6);
impl_handler!(A1, A2, A3, A4, A5, A6, A7);
impl_handler!(A1, A2, A3, A4, A5, A6, A7, A8);
impl_handler!(A1, A2, A3, A4, A5, A6, A7, A8, A9);
impl_handler!(A1, A2, A3, A4, A5, A6, A7, A8, A9, A10);
impl_handler!(A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11);
impl_handler!(A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11, A12);

type ErasedCall = dyn Fn(Vec<Value>) -> InjectResult<Value> + Send + Sync;

/// 类型擦除后的可调用对象
///
/// 可以作为普通值存入注册表，之后再取出调用
#[derive(Clone)]
pub struct Callable {
    signature: Signature,
    call: Arc<ErasedCall>,
}

impl Callable {
    /// 包装一个可调用对象
    pub fn new<F, Args>(handler: F) -> Self
    where
        F: Handler<Args> + Send + Sync + 'static,
        F::Output: Send + Sync,
        Args: 'static,
    {
        Self {
            signature: handler.signature(),
            call: Arc::new(move |args| handler.call_with(args).map(Value::new)),
        }
    }

    /// 参数与返回类型
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// 以实参调用，返回值被包装为存储值
    pub fn call(&self, args: Vec<Value>) -> InjectResult<Value> {
        (self.call)(args)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("signature", &self.signature.to_string())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inject_common::InjectError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, PartialEq)]
    struct Foo {
        value: String,
    }

    #[test]
    fn test_signature_lists_params_in_order() {
        let handler = |_foo: Foo, _count: u32| -> (String, bool) { (String::new(), true) };
        let signature = Handler::signature(&handler);

        assert_eq!(
            signature.params,
            vec![TypeInfo::of::<Foo>(), TypeInfo::of::<u32>()]
        );
        assert_eq!(signature.output, TypeInfo::of::<(String, bool)>());
    }

    #[test]
    fn test_call_passes_arguments() {
        let handler = |foo: Foo, count: u32| format!("{}-{}", foo.value, count);
        let args = vec![
            Value::new(Foo {
                value: "Foo".to_string(),
            }),
            Value::new(3_u32),
        ];
        assert_eq!(handler.call_with(args).unwrap(), "Foo-3");
    }

    #[test]
    fn test_call_without_params() {
        let handler = || 42;
        assert_eq!(Handler::signature(&handler).arity(), 0);
        assert_eq!(handler.call_with(Vec::new()).unwrap(), 42);
    }

    #[test]
    fn test_call_rejects_wrong_argument_count() {
        let calls = AtomicUsize::new(0);
        let handler = |_count: u32| {
            calls.fetch_add(1, Ordering::SeqCst);
        };

        let error = handler.call_with(Vec::new()).unwrap_err();
        assert_eq!(
            error,
            InjectError::from(UsageError::ArgumentCountMismatch {
                expected: 1,
                actual: 0,
            })
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_call_rejects_wrong_argument_type() {
        let handler = |count: u32| count;
        let error = handler.call_with(vec![Value::new(1_i64)]).unwrap_err();
        assert_eq!(
            error,
            InjectError::from(UsageError::TypeMismatch {
                expected: "u32",
                actual: "i64",
            })
        );
    }

    #[test]
    fn test_callable_erases_output() {
        let callable = Callable::new(|left: i32, right: i32| left + right);
        assert_eq!(callable.signature().arity(), 2);

        let output = callable
            .call(vec![Value::new(2_i32), Value::new(3_i32)])
            .unwrap();
        assert_eq!(output.downcast::<i32>(), Some(5));
        assert_eq!(
            format!("{:?}", callable),
            "Callable { signature: \"fn(i32, i32) -> i32\", .. }"
        );
    }
}
