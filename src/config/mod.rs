#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

/// User agent the desktop shell reports, marker included.
pub fn default_user_agent() -> String {
    format!(
        "{}/{}",
        crate::core::detect::NATIVE_UA_MARKER,
        env!("CARGO_PKG_VERSION")
    )
}
