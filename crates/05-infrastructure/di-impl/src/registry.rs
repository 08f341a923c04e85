//! 注册表实现

use crate::resolution::{resolve_arguments, resolve_named_arguments};
use inject_abstractions::{Callable, Handler, Injector, Invoker, Mapper, NamedInvoker, NamedMapper};
use inject_common::{InjectResult, TypeInfo, Value};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace, warn};

/// 注册表（注入器）
///
/// 按类型和按名称各保存一组值，本地未命中时委托给父注册表。
/// 父注册表只被借用，子注册表从不修改它；父注册表之后写入的值
/// 对尚未在本地覆盖同一键的子注册表立即可见。
pub struct Registry<'p> {
    /// 父注册表
    parent: Option<&'p dyn Injector>,
    /// 类型键存储
    values: RwLock<HashMap<TypeInfo, Value>>,
    /// 名称键存储
    named_values: RwLock<HashMap<String, Value>>,
}

impl<'p> Registry<'p> {
    /// 创建新的注册表
    pub fn new(parent: Option<&'p dyn Injector>) -> Self {
        Self {
            parent,
            values: RwLock::new(HashMap::new()),
            named_values: RwLock::new(HashMap::new()),
        }
    }

    /// 创建以当前注册表为父节点的子注册表
    pub fn child(&self) -> Registry<'_> {
        Registry::new(Some(self))
    }

    /// 父注册表
    pub fn parent(&self) -> Option<&'p dyn Injector> {
        self.parent
    }

    /// 本地类型键条目数量
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    /// 本地是否没有任何条目
    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty() && self.named_values.read().is_empty()
    }

    /// 本地名称键条目数量
    pub fn named_len(&self) -> usize {
        self.named_values.read().len()
    }

    /// 本地是否存在指定类型的条目（不查找父注册表）
    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        self.values.read().contains_key(&TypeInfo::of::<T>())
    }

    /// 本地是否存在指定名称的条目（不查找父注册表）
    pub fn contains_named(&self, name: &str) -> bool {
        self.named_values.read().contains_key(name)
    }
}

impl Registry<'static> {
    /// 创建没有父节点的根注册表
    pub fn root() -> Self {
        Self::new(None)
    }
}

impl Default for Registry<'_> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl fmt::Debug for Registry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<_> = self.values.read().keys().map(|key| key.name).collect();
        types.sort_unstable();
        let mut names: Vec<_> = self.named_values.read().keys().cloned().collect();
        names.sort_unstable();
        f.debug_struct("Registry")
            .field("has_parent", &self.parent.is_some())
            .field("values", &types)
            .field("named_values", &names)
            .finish()
    }
}

impl Mapper for Registry<'_> {
    fn get_value(&self, type_info: &TypeInfo) -> Option<Value> {
        let local = self.values.read().get(type_info).cloned();
        if local.is_some() {
            return local;
        }
        let parent = self.parent?;
        trace!(type_name = type_info.name, "本地未找到, 委托父注册表");
        parent.get_value(type_info)
    }

    fn insert_value(&self, value: Value) -> Option<Value> {
        let type_info = value.type_info();
        let previous = self.values.write().insert(type_info, value);
        if previous.is_some() {
            debug!(type_name = type_info.name, "覆盖已注册的值");
        } else {
            debug!(type_name = type_info.name, "注册值");
        }
        previous
    }
}

impl NamedMapper for Registry<'_> {
    fn get_named_value(&self, name: &str) -> Option<Value> {
        let local = self.named_values.read().get(name).cloned();
        if local.is_some() {
            return local;
        }
        let parent = self.parent?;
        trace!(name, "本地未找到命名值, 委托父注册表");
        parent.get_named_value(name)
    }

    fn set_named_value(&self, name: &str, value: Value) -> Option<Value> {
        let type_name = value.type_info().name;
        let previous = self.named_values.write().insert(name.to_string(), value);
        if previous.is_some() {
            debug!(name, type_name, "覆盖已注册的命名值");
        } else {
            debug!(name, type_name, "注册命名值");
        }
        previous
    }
}

impl Invoker for Registry<'_> {
    fn invoke_callable(&self, callable: &Callable) -> InjectResult<Value> {
        let signature = callable.signature();
        debug!(%signature, "调用可调用对象");
        let args = resolve_arguments(self, signature).map_err(|e| {
            warn!(%signature, error = %e, "参数解析失败, 未执行调用");
            e
        })?;
        callable.call(args)
    }

    fn invoke<F, Args>(&self, handler: F) -> InjectResult<F::Output>
    where
        F: Handler<Args>,
    {
        let signature = handler.signature();
        debug!(%signature, "调用函数");
        let args = resolve_arguments(self, &signature).map_err(|e| {
            warn!(%signature, error = %e, "参数解析失败, 未执行调用");
            e
        })?;
        handler.call_with(args)
    }
}

impl NamedInvoker for Registry<'_> {
    fn invoke_callable_named(&self, callable: &Callable, names: &[&str]) -> InjectResult<Value> {
        let signature = callable.signature();
        debug!(%signature, ?names, "按名称调用可调用对象");
        let args = resolve_named_arguments(self, signature, names).map_err(|e| {
            warn!(%signature, error = %e, "参数解析失败, 未执行调用");
            e
        })?;
        callable.call(args)
    }

    fn invoke_named<F, Args>(&self, handler: F, names: &[&str]) -> InjectResult<F::Output>
    where
        F: Handler<Args>,
    {
        let signature = handler.signature();
        debug!(%signature, ?names, "按名称调用函数");
        let args = resolve_named_arguments(self, &signature, names).map_err(|e| {
            warn!(%signature, error = %e, "参数解析失败, 未执行调用");
            e
        })?;
        handler.call_with(args)
    }
}
