//! 存储值定义

use crate::metadata::TypeInfo;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 存储值
///
/// 任意值与其具体类型信息的组合。克隆只增加引用计数，
/// 同一个值可以同时出现在多个注册表或调用参数中。
#[derive(Clone)]
pub struct Value {
    type_info: TypeInfo,
    inner: Arc<dyn Any + Send + Sync>,
}

impl Value {
    /// 包装一个值，类型信息取自 `T`
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            type_info: TypeInfo::of::<T>(),
            inner: Arc::new(value),
        }
    }

    /// 值的类型信息
    pub fn type_info(&self) -> TypeInfo {
        self.type_info
    }

    /// 值是否为指定类型
    pub fn is<T: Any>(&self) -> bool {
        self.type_info.is::<T>()
    }

    /// 以引用方式取出值
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// 克隆出具体类型的值
    pub fn downcast<T: Any + Clone>(&self) -> Option<T> {
        self.downcast_ref::<T>().cloned()
    }

    /// 两个存储值是否指向同一实例
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("type", &self.type_info.name)
            .finish_non_exhaustive()
    }
}
