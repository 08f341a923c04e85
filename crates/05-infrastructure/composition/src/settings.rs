//! 注入器配置
//!
//! 配置由 TOML 文件与环境变量组成，后添加的配置源覆盖先添加的。
//!
//! ```toml
//! [logging]
//! enabled = true
//! level = "debug"
//!
//! [named]
//! timeout = 5
//! ratio = 0.75
//! greeting = "hello"
//! ```
//!
//! 对应的环境变量写法为 `INJECT_NAMED__TIMEOUT=5`。

use inject_common::{ConfigError, ConfigResult, Value};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 默认环境变量前缀
pub const DEFAULT_ENV_PREFIX: &str = "INJECT";

/// 注入器配置
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct InjectorSettings {
    /// 日志配置
    pub logging: LoggingSettings,
    /// 预置的命名值
    pub named: BTreeMap<String, NamedSetting>,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// 是否在启动时初始化日志
    pub enabled: bool,
    /// 日志级别
    pub level: String,
    /// 是否使用 JSON 格式
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
            json: false,
        }
    }
}

/// 配置中的命名值
///
/// 整数统一保存为 `i64`，浮点数统一保存为 `f64`，
/// 调用时再按参数类型转换
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NamedSetting {
    /// 整数
    Integer(i64),
    /// 浮点数
    Float(f64),
    /// 布尔值
    Boolean(bool),
    /// 字符串
    Text(String),
}

impl NamedSetting {
    /// 转换为存储值
    pub fn to_value(&self) -> Value {
        match self {
            Self::Integer(v) => Value::new(*v),
            Self::Float(v) => Value::new(*v),
            Self::Boolean(v) => Value::new(*v),
            Self::Text(v) => Value::new(v.clone()),
        }
    }
}

/// 配置源列表
#[derive(Debug, Clone, Default)]
pub struct SettingsSources {
    toml_files: Vec<PathBuf>,
    env_prefix: Option<String>,
    /// 为空时读取进程环境变量
    env_vars: Option<config::Map<String, String>>,
}

impl SettingsSources {
    /// 创建空的配置源列表
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加 TOML 配置文件，文件必须存在
    pub fn add_toml<P: AsRef<Path>>(&mut self, path: P) -> ConfigResult<()> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        debug!("添加 TOML 配置文件: {}", path.display());
        self.toml_files.push(path.to_path_buf());
        Ok(())
    }

    /// 设置环境变量前缀
    pub fn set_env_prefix<S: Into<String>>(&mut self, prefix: S) {
        let prefix = prefix.into();
        debug!("添加环境变量配置源, 前缀: {}", prefix);
        self.env_prefix = Some(prefix);
    }

    /// 以给定的变量表代替进程环境变量
    ///
    /// 变量名仍需带有 [`set_env_prefix`](Self::set_env_prefix) 设置的前缀
    pub fn set_env_vars<I, K, V>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env_vars = Some(
            vars.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        );
    }

    /// 是否没有任何配置源
    pub fn is_empty(&self) -> bool {
        self.toml_files.is_empty() && self.env_prefix.is_none()
    }

    /// 加载并绑定配置
    pub fn load(&self) -> ConfigResult<InjectorSettings> {
        let mut builder = config::Config::builder();
        for path in &self.toml_files {
            builder = builder.add_source(
                config::File::from(path.as_path())
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }
        if let Some(prefix) = &self.env_prefix {
            builder = builder.add_source(
                config::Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(self.env_vars.clone()),
            );
        }

        let settings = builder
            .build()
            .and_then(|config| config.try_deserialize::<InjectorSettings>())
            .map_err(|e| ConfigError::LoadFailed {
                source: Box::new(e),
            })?;
        debug!(named = settings.named.len(), "配置加载完成");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn toml_file(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_empty_sources_give_defaults() {
        let sources = SettingsSources::new();
        assert!(sources.is_empty());
        assert_eq!(sources.load().unwrap(), InjectorSettings::default());
    }

    #[test]
    fn test_load_named_values_from_toml() {
        let file = toml_file(
            r#"
[logging]
level = "debug"

[named]
timeout = 5
ratio = 0.75
verbose = true
greeting = "hello"
"#,
        );
        let mut sources = SettingsSources::new();
        sources.add_toml(file.path()).unwrap();

        let settings = sources.load().unwrap();
        assert_eq!(settings.logging.level, "debug");
        assert!(!settings.logging.enabled);
        assert_eq!(settings.named["timeout"], NamedSetting::Integer(5));
        assert_eq!(settings.named["ratio"], NamedSetting::Float(0.75));
        assert_eq!(settings.named["verbose"], NamedSetting::Boolean(true));
        assert_eq!(
            settings.named["greeting"],
            NamedSetting::Text("hello".to_string())
        );
    }

    #[test]
    fn test_missing_file_is_rejected() {
        let mut sources = SettingsSources::new();
        let error = sources.add_toml("/nonexistent/inject.toml").unwrap_err();
        assert!(matches!(error, ConfigError::FileNotFound { .. }));
        assert!(sources.is_empty());
    }

    #[test]
    fn test_malformed_file_fails_to_load() {
        let file = toml_file("[named\ntimeout = ");
        let mut sources = SettingsSources::new();
        sources.add_toml(file.path()).unwrap();
        assert!(matches!(
            sources.load(),
            Err(ConfigError::LoadFailed { .. })
        ));
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = toml_file("[named]\nretries = 1\n");

        let mut sources = SettingsSources::new();
        sources.add_toml(file.path()).unwrap();
        sources.set_env_prefix("INJECT");
        sources.set_env_vars([
            ("INJECT_NAMED__RETRIES", "4"),
            ("OTHER_NAMED__RETRIES", "9"),
        ]);
        let settings = sources.load().unwrap();

        assert_eq!(settings.named["retries"], NamedSetting::Integer(4));
    }

    #[test]
    fn test_setting_to_value() {
        assert_eq!(
            NamedSetting::Integer(5).to_value().downcast::<i64>(),
            Some(5)
        );
        assert_eq!(
            NamedSetting::Text("a".to_string())
                .to_value()
                .downcast::<String>(),
            Some("a".to_string())
        );
    }
}
