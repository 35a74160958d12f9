//! 配置管理模块
//!
//! 支持多格式配置文件加载，环境变量覆盖，以及类型安全的配置访问。

use crate::observability::ObservabilityConfig;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 环境变量前缀
pub const ENV_PREFIX: &str = "SCHOLARSHIP";

/// 规则配置
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// 规则文件路径，为空时使用内置规则
    pub path: Option<String>,
    /// 是否在决策结果中附带逐条规则追踪
    pub trace: bool,
}

impl RulesConfig {
    pub fn path(&self) -> Option<PathBuf> {
        self.path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub service_name: String,
    pub environment: String,
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_name: "scholarship-advisor".to_string(),
            environment: "development".to_string(),
            rules: RulesConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 加载顺序（后加载的会覆盖先加载的同名配置项）：
    /// 1. config/default.toml（默认配置）
    /// 2. config/{environment}.toml（环境特定配置）
    /// 3. config/{service_name}.toml（服务特定配置）
    /// 4. 环境变量（SCHOLARSHIP_ 前缀，层级用 `__` 分隔，如 SCHOLARSHIP_RULES__PATH -> rules.path）
    pub fn load(service_name: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("SCHOLARSHIP_ENV").unwrap_or_else(|_| "development".to_string());
        let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

        Self::load_from(service_name, &env, Path::new(&config_dir))
    }

    /// 从指定目录加载配置
    pub fn load_from(service_name: &str, env: &str, config_dir: &Path) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("service_name", service_name)?
            .set_default("environment", env)?
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(File::from(config_dir.join(format!("{}.toml", env))).required(false))
            .add_source(
                File::from(config_dir.join(format!("{}.toml", service_name))).required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.observability.service_name = config.service_name.clone();

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("{}_{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.service_name, "scholarship-advisor");
        assert!(config.rules.path().is_none());
        assert!(!config.rules.trace);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_load_without_files_uses_defaults() {
        let dir = temp_config_dir("scholarship_cfg_empty");

        let config = AppConfig::load_from("scholarship-advisor", "test", &dir).unwrap();
        assert_eq!(config.service_name, "scholarship-advisor");
        assert_eq!(config.environment, "test");
        assert_eq!(config.observability.service_name, "scholarship-advisor");
        assert_eq!(config.environment, "test");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_layers_override() {
        let dir = temp_config_dir("scholarship_cfg_layers");
        std::fs::write(
            dir.join("default.toml"),
            "[rules]\npath = \"rules/default.json\"\n\n[observability]\nlog_level = \"warn\"\n",
        )
        .unwrap();
        std::fs::write(
            dir.join("production.toml"),
            "[rules]\npath = \"/etc/scholarship/rules.json\"\ntrace = true\n",
        )
        .unwrap();

        let config = AppConfig::load_from("scholarship-advisor", "production", &dir).unwrap();
        assert_eq!(config.environment, "production");
        assert_eq!(
            config.rules.path(),
            Some(PathBuf::from("/etc/scholarship/rules.json"))
        );
        assert!(config.rules.trace);
        assert_eq!(config.observability.log_level, "warn");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_blank_rules_path_is_ignored() {
        let rules = RulesConfig {
            path: Some("  ".to_string()),
            trace: false,
        };
        assert!(rules.path().is_none());
    }
}
