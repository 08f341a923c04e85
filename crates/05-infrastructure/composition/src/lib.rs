//! # 注入器组合层
//!
//! 负责把配置、日志与注册表组装成一个可直接使用的根注册表。
//!
//! ## 主要功能
//!
//! - **配置加载**: 从 TOML 文件与环境变量读取注入器配置
//! - **日志初始化**: 按配置安装 `tracing` 订阅者
//! - **注册表启动**: 创建根注册表并预置配置中的命名值
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use inject_abstractions::NamedInvoker;
//! use inject_composition::{LoggingConfig, RegistryBootstrapper};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = RegistryBootstrapper::new()
//!         .add_config_toml("config/inject.toml")?
//!         .add_config_env_vars("INJECT")
//!         .with_logging(LoggingConfig::development())
//!         .build()?;
//!
//!     let timeout = registry.invoke_named(|timeout: u32| timeout, &["timeout"])?;
//!     println!("超时: {}", timeout);
//!     Ok(())
//! }
//! ```

pub mod bootstrapper;
pub mod logging;
pub mod settings;

pub use bootstrapper::RegistryBootstrapper;
pub use logging::{init_logging, LoggingConfig};
pub use settings::{
    InjectorSettings, LoggingSettings, NamedSetting, SettingsSources, DEFAULT_ENV_PREFIX,
};
