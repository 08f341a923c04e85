//! 注册表启动器

use crate::logging::{init_logging, LoggingConfig};
use crate::settings::{InjectorSettings, SettingsSources};
use inject_abstractions::NamedMapper;
use inject_common::{BootstrapResult, ConfigResult};
use inject_impl::Registry;
use std::path::Path;
use tracing::{debug, info, warn};

/// 注册表启动器
///
/// 加载配置、初始化日志，并创建预置了命名值的根注册表
#[derive(Debug, Default)]
pub struct RegistryBootstrapper {
    /// 配置源
    sources: SettingsSources,
    /// 显式指定的日志配置，优先于配置文件
    logging_config: Option<LoggingConfig>,
}

impl RegistryBootstrapper {
    /// 创建新的启动器
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加 TOML 配置文件
    pub fn add_config_toml<P: AsRef<Path>>(mut self, path: P) -> ConfigResult<Self> {
        self.sources.add_toml(path)?;
        Ok(self)
    }

    /// 添加环境变量配置源
    pub fn add_config_env_vars<S: Into<String>>(mut self, prefix: S) -> Self {
        self.sources.set_env_prefix(prefix);
        self
    }

    /// 添加环境变量配置源，变量取自给定的变量表而不是进程环境
    pub fn add_config_env_map<S, I, K, V>(mut self, prefix: S, vars: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.sources.set_env_prefix(prefix);
        self.sources.set_env_vars(vars);
        self
    }

    /// 配置日志
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logging_config = Some(config);
        self
    }

    /// 只加载配置，不创建注册表
    pub fn load_settings(&self) -> BootstrapResult<InjectorSettings> {
        Ok(self.sources.load()?)
    }

    /// 创建根注册表
    pub fn build(self) -> BootstrapResult<Registry<'static>> {
        let settings = self.load_settings()?;

        let logging_config = match self.logging_config {
            Some(config) => Some(config),
            None if settings.logging.enabled => {
                Some(LoggingConfig::from_settings(&settings.logging)?)
            }
            None => None,
        };
        if let Some(config) = logging_config {
            // 测试中可能已经安装过订阅者
            if let Err(e) = init_logging(&config) {
                warn!(error = %e, "跳过日志初始化");
            }
        }

        info!("开始创建根注册表");
        let registry = Registry::root();
        for (name, setting) in &settings.named {
            debug!(name = %name, ?setting, "预置命名值");
            registry.set_named_value(name, setting.to_value());
        }

        info!(named = registry.named_len(), "根注册表创建完成");
        Ok(registry)
    }
}
