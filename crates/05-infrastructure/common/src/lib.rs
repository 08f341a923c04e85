//! # Inject Common
//!
//! 这个 crate 提供了注册表各层共享的基础类型。
//!
//! ## 核心类型
//!
//! - [`TypeInfo`] - 类型标识，作为类型键使用
//! - [`Value`] - 存储值，携带自身的类型信息
//! - [`Signature`] - 可调用对象的参数与返回类型
//! - [`InjectError`] - 注册与调用过程中的错误
//!
//! ## 设计原则
//!
//! - 类型标识基于 `TypeId`，类型名称仅用于诊断
//! - 存储值可廉价克隆，多个注册表之间共享同一实例
//! - 所有失败都以类型化的 `Result` 返回，不使用 panic

pub mod errors;
pub mod metadata;
pub mod value;

pub use errors::*;
pub use metadata::*;
pub use value::*;
