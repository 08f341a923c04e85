//! 错误类型定义

use crate::metadata::TypeInfo;
use std::fmt;
use thiserror::Error;

/// 使用错误
///
/// 调用方传入了不合法的参数，调用立即终止
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("目标不可调用: {type_name}")]
    NotCallable { type_name: &'static str },

    #[error("参数名称数量不匹配: 期望 {expected}, 实际 {actual}")]
    NameCountMismatch { expected: usize, actual: usize },

    #[error("实参数量不匹配: 期望 {expected}, 实际 {actual}")]
    ArgumentCountMismatch { expected: usize, actual: usize },

    #[error("映射目标需要是接口类型, 实际为具体类型: {type_name}")]
    NotAnInterface { type_name: &'static str },

    #[error("类型不一致: 期望 {expected}, 实际 {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
}

/// 参数绑定方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// 按类型查找
    Type(&'static str),
    /// 按名称查找
    Named(String),
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(type_name) => write!(f, "类型 {}", type_name),
            Self::Named(name) => write!(f, "名称 \"{}\"", name),
        }
    }
}

/// 注入错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InjectError {
    #[error("使用错误: {0}")]
    Usage(#[from] UsageError),

    #[error("缺少依赖: 第 {position} 个参数, {binding}")]
    MissingDependency { position: usize, binding: Binding },

    #[error("不支持的类型转换: {from} -> {to}, 原因: {reason}")]
    UnsupportedConversion {
        from: &'static str,
        to: &'static str,
        reason: String,
    },
}

impl InjectError {
    /// 创建按类型查找失败的错误
    pub fn missing_type(position: usize, type_info: &TypeInfo) -> Self {
        Self::MissingDependency {
            position,
            binding: Binding::Type(type_info.name),
        }
    }

    /// 创建按名称查找失败的错误
    pub fn missing_named(position: usize, name: impl Into<String>) -> Self {
        Self::MissingDependency {
            position,
            binding: Binding::Named(name.into()),
        }
    }

    /// 创建类型转换错误
    pub fn unsupported_conversion(
        from: &TypeInfo,
        to: &TypeInfo,
        reason: impl Into<String>,
    ) -> Self {
        Self::UnsupportedConversion {
            from: from.name,
            to: to.name,
            reason: reason.into(),
        }
    }

    /// 是否为使用错误
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }

    /// 是否为缺少依赖
    pub fn is_missing_dependency(&self) -> bool {
        matches!(self, Self::MissingDependency { .. })
    }

    /// 是否为不支持的类型转换
    pub fn is_unsupported_conversion(&self) -> bool {
        matches!(self, Self::UnsupportedConversion { .. })
    }
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置加载失败: {source}")]
    LoadFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// 启动错误类型
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("配置错误: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("注入错误: {source}")]
    Inject {
        #[from]
        source: InjectError,
    },

    #[error("日志初始化失败: {message}")]
    Logging { message: String },
}

/// 结果类型别名
pub type InjectResult<T> = Result<T, InjectError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type BootstrapResult<T> = Result<T, BootstrapError>;
