use crate::core::pipeline::DEFAULT_MAX_BYTES;
use crate::core::ImportSettings;
use crate::utils::error::{ImportError, Result};
use crate::utils::validation::{
    validate_header_names, validate_min, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub bridge: BridgeConfig,
    pub backend: BackendConfig,
    #[serde(default)]
    pub pipeline: PhaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "crate::config::default_user_agent")]
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_agent: crate::config::default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
    #[serde(default = "default_required_headers")]
    pub required_headers: Vec<String>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
            required_headers: default_required_headers(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    #[serde(default)]
    pub csrf_token: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseConfig {
    #[serde(default = "enabled")]
    pub validate: bool,
    #[serde(default = "enabled")]
    pub submit: bool,
}

impl Default for PhaseConfig {
    fn default() -> Self {
        Self {
            validate: true,
            submit: true,
        }
    }
}

fn default_max_bytes() -> u64 {
    DEFAULT_MAX_BYTES
}

fn default_required_headers() -> Vec<String> {
    crate::adapters::structure::DEFAULT_REQUIRED_HEADERS
        .iter()
        .map(|h| h.to_string())
        .collect()
}

fn enabled() -> bool {
    true
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ImportError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${NBF_CSRF_TOKEN})；未設定的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl ImportSettings for TomlConfig {
    fn user_agent(&self) -> &str {
        &self.app.user_agent
    }

    fn max_bytes(&self) -> u64 {
        self.bridge.max_bytes
    }

    fn required_headers(&self) -> &[String] {
        &self.bridge.required_headers
    }

    fn base_url(&self) -> &str {
        &self.backend.base_url
    }

    fn csrf_token(&self) -> &str {
        &self.backend.csrf_token
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.backend.timeout_seconds
    }

    fn validate_enabled(&self) -> bool {
        self.pipeline.validate
    }

    fn submit_enabled(&self) -> bool {
        self.pipeline.submit
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_url("backend.base_url", &self.backend.base_url)?;
        validate_min("bridge.max_bytes", self.bridge.max_bytes, 1)?;
        validate_header_names("bridge.required_headers", &self.bridge.required_headers)?;
        if let Some(timeout) = self.backend.timeout_seconds {
            validate_min("backend.timeout_seconds", timeout, 1)?;
        }
        if self.backend.csrf_token.starts_with("${") {
            return Err(ImportError::MissingConfigError {
                field: format!("backend.csrf_token ({})", self.backend.csrf_token),
            });
        }
        Ok(())
    }
}
