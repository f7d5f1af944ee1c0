use crate::core::ImportSettings;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_header_names, validate_path, validate_min, validate_url, Validate,
};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "nbf-import")]
#[command(about = "Import a metrics CSV through the desktop bridge into the backend")]
pub struct CliConfig {
    /// CSV file to import; prompts on the terminal when omitted
    #[arg(short, long)]
    pub file: Option<String>,

    /// TOML configuration file; flags below are then ignored except for overrides
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, default_value = "http://localhost:3000")]
    pub base_url: String,

    /// Anti-forgery token attached to the import request
    #[arg(long, env = "NBF_CSRF_TOKEN", default_value = "", hide_env_values = true)]
    pub csrf_token: String,

    #[arg(long, env = "NBF_USER_AGENT", default_value_t = crate::config::default_user_agent())]
    pub user_agent: String,

    #[arg(long, default_value = "2000000")]
    pub max_bytes: u64,

    #[arg(long, value_delimiter = ',', default_value = "date,metric,value")]
    pub required_headers: Vec<String>,

    /// Parse and submit without structural validation
    #[arg(long)]
    pub skip_validation: bool,

    /// Validate only, do not submit entries
    #[arg(long)]
    pub skip_submit: bool,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines on stderr")]
    pub log_json: bool,
}

impl ImportSettings for CliConfig {
    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    fn required_headers(&self) -> &[String] {
        &self.required_headers
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn csrf_token(&self) -> &str {
        &self.csrf_token
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }

    fn validate_enabled(&self) -> bool {
        !self.skip_validation
    }

    fn submit_enabled(&self) -> bool {
        !self.skip_submit
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_min("max_bytes", self.max_bytes, 1)?;
        validate_header_names("required_headers", &self.required_headers)?;
        if let Some(file) = &self.file {
            validate_path("file", file)?;
        }
        if let Some(timeout) = self.timeout_seconds {
            validate_min("timeout_seconds", timeout, 1)?;
        }
        Ok(())
    }
}
