// 配置管理模块

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

/// Rapidgator 官方 API 地址
pub const DEFAULT_BASE_URL: &str = "https://rapidgator.net";

/// 根目录 ID
pub const ROOT_FOLDER_ID: &str = "1";

/// 客户端配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API 地址（测试时可指向 mock 服务器）
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// 单次请求超时（秒）
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// User-Agent
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// 上传时未指定目标目录使用的目录 ID
    #[serde(default = "default_folder_id")]
    pub default_folder_id: String,
    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_user_agent() -> String {
    concat!("rapidgator-rust/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_folder_id() -> String {
    ROOT_FOLDER_ID.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            default_folder_id: default_folder_id(),
            log: LogConfig::default(),
        }
    }
}

impl ClientConfig {
    /// 使用指定 base_url 的配置
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// 请求超时
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// 从文件加载配置
    pub async fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: ClientConfig =
            toml::from_str(&content).context("Failed to parse config file")?;

        if config.base_url.trim().is_empty() {
            anyhow::bail!("配置文件中的 base_url 不能为空");
        }

        Ok(config)
    }

    /// 保存配置到文件
    pub async fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        // 确保父目录存在
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .context("Failed to create config directory")?;
            }
        }

        fs::write(path, content)
            .await
            .context("Failed to write config file")?;

        tracing::info!("配置已保存: {:?}", path);
        Ok(())
    }

    /// 加载或创建默认配置
    pub async fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_from_file(path).await {
            Ok(config) => {
                tracing::info!("配置文件加载成功: {:?}", path);
                config
            }
            Err(e) => {
                tracing::warn!("配置文件加载失败，使用默认配置: {}", e);
                let default_config = Self::default();
                if let Err(e) = default_config.save_to_file(path).await {
                    tracing::error!("保存默认配置失败: {}", e);
                }
                default_config
            }
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 是否写入日志文件
    #[serde(default = "default_log_enabled")]
    pub enabled: bool,
    /// 日志文件目录
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    /// 日志保留天数
    #[serde(default = "default_log_retention_days")]
    pub retention_days: u32,
    /// 日志级别（RUST_LOG 优先）
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_enabled() -> bool {
    false
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_log_retention_days() -> u32 {
    7
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: default_log_enabled(),
            log_dir: default_log_dir(),
            retention_days: default_log_retention_days(),
            level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://rapidgator.net");
        assert_eq!(config.default_folder_id, "1");
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert!(!config.log.enabled);
        assert_eq!(config.log.retention_days, 7);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ClientConfig = toml::from_str(
            r#"
            base_url = "http://127.0.0.1:9000"

            [log]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.log_dir, PathBuf::from("logs"));
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("client.toml");

        let mut config = ClientConfig::with_base_url("http://localhost:8080");
        config.timeout_secs = 5;
        config.save_to_file(&path).await.unwrap();

        let loaded = ClientConfig::load_from_file(&path).await.unwrap();
        assert_eq!(loaded.base_url, "http://localhost:8080");
        assert_eq!(loaded.timeout_secs, 5);
    }

    #[tokio::test]
    async fn test_load_rejects_empty_base_url() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("client.toml");
        tokio::fs::write(&path, "base_url = \"  \"\n").await.unwrap();

        assert!(ClientConfig::load_from_file(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_load_or_default_writes_default_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("client.toml");

        let config = ClientConfig::load_or_default(&path).await;
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(path.exists());
    }
}
