//! 注入器抽象接口

use crate::registry::{Mapper, NamedMapper};
use crate::resolver::{Invoker, NamedInvoker};

/// 注入器 trait
///
/// 组合了值注册与函数调用的全部能力，可以作为子注册表的父节点
pub trait Injector: Mapper + NamedMapper + Invoker + NamedInvoker + Send + Sync {}

impl<T> Injector for T where T: Mapper + NamedMapper + Invoker + NamedInvoker + Send + Sync + ?Sized {}
