//! 函数调用抽象接口
//!
//! 提供解析参数并调用函数的能力

use crate::handler::{Callable, Handler};
use inject_common::{InjectResult, UsageError, Value};

/// 按类型调用 trait
///
/// 每个参数按声明类型查找；任一参数缺失时函数不会被调用
pub trait Invoker {
    /// 调用类型擦除后的可调用对象
    fn invoke_callable(&self, callable: &Callable) -> InjectResult<Value>;

    /// 调用函数，返回其原始返回值
    fn invoke<F, Args>(&self, handler: F) -> InjectResult<F::Output>
    where
        F: Handler<Args>,
        Self: Sized;

    /// 调用一个存储值
    ///
    /// 存储值不是 [`Callable`] 时返回使用错误
    fn invoke_value(&self, value: &Value) -> InjectResult<Value> {
        let callable = value
            .downcast_ref::<Callable>()
            .ok_or(UsageError::NotCallable {
                type_name: value.type_info().name,
            })?;
        self.invoke_callable(callable)
    }
}

/// 按名称调用 trait
///
/// 每个参数位置对应一个名称，空名称表示按类型查找
pub trait NamedInvoker {
    /// 调用类型擦除后的可调用对象
    fn invoke_callable_named(&self, callable: &Callable, names: &[&str]) -> InjectResult<Value>;

    /// 调用函数，返回其原始返回值
    ///
    /// 名称数量必须等于参数个数
    fn invoke_named<F, Args>(&self, handler: F, names: &[&str]) -> InjectResult<F::Output>
    where
        F: Handler<Args>,
        Self: Sized;

    /// 按名称调用一个存储值
    fn invoke_value_named(&self, value: &Value, names: &[&str]) -> InjectResult<Value> {
        let callable = value
            .downcast_ref::<Callable>()
            .ok_or(UsageError::NotCallable {
                type_name: value.type_info().name,
            })?;
        self.invoke_callable_named(callable, names)
    }
}
