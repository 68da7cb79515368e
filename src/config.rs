use serde::{Deserialize, Serialize};
use std::env;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// 数据文件路径
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_prizes_file")]
    pub prizes_file: String,
    #[serde(default = "default_records_file")]
    pub records_file: String,
    #[serde(default = "default_questionnaire_file")]
    pub questionnaire_file: String,
}

fn default_prizes_file() -> String {
    "prizes.json".to_string()
}

fn default_records_file() -> String {
    "lottery_records.json".to_string()
}

fn default_questionnaire_file() -> String {
    "data.csv".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            prizes_file: default_prizes_file(),
            records_file: default_records_file(),
            questionnaire_file: default_questionnaire_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AdminConfig {
    /// 未配置时后台接口不做鉴权
    #[serde(default)]
    pub token: Option<String>,
}

impl Config {
    pub fn from_toml() -> AppResult<Self> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        let mut config: Config = match std::fs::read_to_string(&config_path) {
            Ok(config_str) => Self::parse(&config_str)?,
            // 无配置文件：使用环境变量与默认值构建
            Err(e) if e.kind() == ErrorKind::NotFound => Config {
                server: ServerConfig::default(),
                storage: StorageConfig::default(),
                admin: AdminConfig::default(),
            },
            Err(e) => {
                return Err(AppError::ConfigError(format!(
                    "unable to read config file {config_path}: {e}"
                )));
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    pub fn parse(config_str: &str) -> AppResult<Self> {
        toml::from_str(config_str)
            .map_err(|e| AppError::ConfigError(format!("failed to parse config file: {e}")))
    }

    /// 环境变量覆盖（即便文件存在时也覆盖）
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = env::var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            self.server.port = p;
        }
        if let Ok(v) = env::var("PRIZES_FILE") {
            self.storage.prizes_file = v;
        }
        if let Ok(v) = env::var("RECORDS_FILE") {
            self.storage.records_file = v;
        }
        if let Ok(v) = env::var("QUESTIONNAIRE_FILE") {
            self.storage.questionnaire_file = v;
        }
        if let Ok(v) = env::var("ADMIN_TOKEN")
            && !v.is_empty()
        {
            self.admin.token = Some(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8081

            [storage]
            prizes_file = "/data/prizes.json"
            records_file = "/data/records.json"
            questionnaire_file = "/data/answers.csv"

            [admin]
            token = "secret"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.storage.prizes_file, "/data/prizes.json");
        assert_eq!(config.storage.questionnaire_file, "/data/answers.csv");
        assert_eq!(config.admin.token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_parse_defaults_optional_sections() {
        let config = Config::parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 3000
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.prizes_file, "prizes.json");
        assert_eq!(config.storage.records_file, "lottery_records.json");
        assert_eq!(config.storage.questionnaire_file, "data.csv");
        assert!(config.admin.token.is_none());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(
            Config::parse("[server]\nport = \"nope\""),
            Err(AppError::ConfigError(_))
        ));
    }

    #[test]
    fn test_parse_without_server_section() {
        let config = Config::parse(
            r#"
            [admin]
            token = "secret"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.admin.token.as_deref(), Some("secret"));
    }
}
