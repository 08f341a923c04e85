//! # Inject Impl
//!
//! 注入器的默认实现。
//!
//! ## 主要组成
//!
//! - [`Registry`] - 带父注册表委托的类型键与名称键注册表
//! - [`resolution`] - 将调用签名解析为实参列表
//! - [`coercion`] - 按名称解析时的标量类型转换
//!
//! ```
//! use inject_abstractions::{Invoker, Mapper};
//! use inject_impl::Registry;
//!
//! let root = Registry::root();
//! root.map(8080_u16);
//!
//! let child = root.child();
//! let port = child.invoke(|port: u16| port).unwrap();
//! assert_eq!(port, 8080);
//! ```

pub mod coercion;
pub mod registry;
pub mod resolution;

pub use coercion::{coerce, kind_of};
pub use registry::Registry;
pub use resolution::{resolve_arguments, resolve_named_arguments};
