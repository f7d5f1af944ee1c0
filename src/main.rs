use clap::Parser;
use nbf_import::core::ImportSettings;
use nbf_import::utils::error::ErrorSeverity;
use nbf_import::utils::logger::{init_logger, LogFormat};
use nbf_import::utils::validation::Validate;
use nbf_import::{CliConfig, ConsoleReporter, ImportApp, ImportOutcome, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    // 初始化日誌
    let format = if args.log_json {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    init_logger(args.verbose, format);

    tracing::info!("Starting nbf-import");
    if args.verbose {
        tracing::debug!("CLI config: {:?}", args);
    }

    let outcome = match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let mut config = match TomlConfig::from_file(path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(3);
                }
            };

            // 命令列覆蓋設定
            if args.skip_validation {
                config.pipeline.validate = false;
            }
            if args.skip_submit {
                config.pipeline.submit = false;
            }

            run(&config, args.file.as_deref()).await
        }
        None => run(&args, args.file.as_deref()).await,
    };

    let exit_code = match &outcome {
        ImportOutcome::Cancelled | ImportOutcome::Succeeded(_) => 0,
        ImportOutcome::RejectedInvalid(_) => 1,
        ImportOutcome::Failed(e) => match e.severity() {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        },
    };

    tracing::debug!("Import finished: {} (exit code {})", outcome.label(), exit_code);
    if exit_code > 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn run<C: ImportSettings + Validate>(config: &C, file: Option<&str>) -> ImportOutcome {
    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        return ImportOutcome::Failed(e);
    }

    if config.submit_enabled() && config.csrf_token().is_empty() {
        tracing::warn!("No anti-forgery token configured, the backend may reject the import");
    }

    match ImportApp::from_settings(config, file, ConsoleReporter) {
        Ok(app) => app.import_csv_file().await,
        Err(e) => {
            tracing::error!("❌ Could not set up the import: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            ImportOutcome::Failed(e)
        }
    }
}
