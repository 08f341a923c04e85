//! # Inject Abstractions
//!
//! 注入器抽象层，定义值注册、查找与函数调用的核心接口。
//!
//! ## 核心接口
//!
//! - [`Mapper`] - 按类型存取值
//! - [`NamedMapper`] - 按名称存取值
//! - [`Invoker`] - 按参数类型解析实参并调用函数
//! - [`NamedInvoker`] - 按参数名称（或类型）解析实参并调用函数
//! - [`Injector`] - 以上四者的组合，可作为父注册表使用
//! - [`Handler`] - 可调用对象的签名描述
//! - [`Callable`] - 类型擦除后的可调用对象

pub mod container;
pub mod handler;
pub mod registry;
pub mod resolver;

pub use container::*;
pub use handler::*;
pub use registry::*;
pub use resolver::*;
