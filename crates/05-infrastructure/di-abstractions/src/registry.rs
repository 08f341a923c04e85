//! 值注册表抽象接口
//!
//! 提供按类型与按名称存取值的能力

use inject_common::{InjectResult, TypeInfo, UsageError, Value};
use std::any::Any;
use std::sync::Arc;

/// 类型键注册表 trait
///
/// 每个类型最多对应一个值，后写入的值覆盖先前的值。
/// 查找时本地未命中会沿父注册表链继续查找。
pub trait Mapper {
    /// 按类型查找值（包含父注册表）
    fn get_value(&self, type_info: &TypeInfo) -> Option<Value>;

    /// 以值自身的类型作为键写入，返回被覆盖的旧值
    fn insert_value(&self, value: Value) -> Option<Value>;

    /// 以显式的类型键写入
    ///
    /// 类型键必须与值自身的类型一致
    fn set_value(&self, type_info: TypeInfo, value: Value) -> InjectResult<()> {
        if value.type_info() != type_info {
            return Err(UsageError::TypeMismatch {
                expected: type_info.name,
                actual: value.type_info().name,
            }
            .into());
        }
        self.insert_value(value);
        Ok(())
    }

    /// 按 `T` 查找并写入目标位置
    ///
    /// 未找到时目标保持不变，返回是否写入
    fn get<T: Any + Clone>(&self, dest: &mut T) -> bool
    where
        Self: Sized,
    {
        match self
            .get_value(&TypeInfo::of::<T>())
            .and_then(|value| value.downcast::<T>())
        {
            Some(found) => {
                *dest = found;
                true
            }
            None => false,
        }
    }

    /// 以值的具体类型注册
    fn map<T: Any + Send + Sync>(&self, value: T)
    where
        Self: Sized,
    {
        self.insert_value(Value::new(value));
    }

    /// 以接口类型注册
    ///
    /// 值以 `Arc<I>` 为键存储，调用方通过 `Arc<dyn Trait>` 类型的参数取回。
    /// `I` 不是 trait 对象（具体类型、切片或 `str`）时返回使用错误。
    fn map_to<I>(&self, value: Arc<I>) -> InjectResult<()>
    where
        I: ?Sized + 'static,
        Arc<I>: Send + Sync,
        Self: Sized,
    {
        if !is_trait_object::<I>() {
            return Err(UsageError::NotAnInterface {
                type_name: std::any::type_name::<I>(),
            }
            .into());
        }
        self.insert_value(Value::new(value));
        Ok(())
    }
}

/// 名称键注册表 trait
///
/// 用于区分同一类型的多个值，与类型键注册表相互独立
pub trait NamedMapper {
    /// 按名称查找值（包含父注册表）
    fn get_named_value(&self, name: &str) -> Option<Value>;

    /// 按名称写入，返回被覆盖的旧值
    fn set_named_value(&self, name: &str, value: Value) -> Option<Value>;

    /// 按名称查找并写入目标位置
    ///
    /// 只有存储值的类型恰好为 `T` 时才写入，返回是否写入
    fn get_named<T: Any + Clone>(&self, dest: &mut T, name: &str) -> bool
    where
        Self: Sized,
    {
        match self
            .get_named_value(name)
            .and_then(|value| value.downcast::<T>())
        {
            Some(found) => {
                *dest = found;
                true
            }
            None => false,
        }
    }

    /// 按名称注册
    fn map_named<T: Any + Send + Sync>(&self, value: T, name: &str)
    where
        Self: Sized,
    {
        self.set_named_value(name, Value::new(value));
    }
}

/// 只有 trait 对象算作接口，切片与 `str` 虽然同为动态大小类型也不算
fn is_trait_object<I: ?Sized>() -> bool {
    std::mem::size_of::<*const I>() != std::mem::size_of::<*const ()>()
        && std::any::type_name::<I>().starts_with("dyn ")
}
