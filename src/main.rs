use clap::Parser;
use landing_content::utils::{error::ErrorSeverity, logger, validation::Validate};
use landing_content::{build_aggregate, CliArgs, ContentError, LocalStorage, OutputTarget};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting landing-content build step");
    tracing::debug!("CLI args: {:?}", args);

    // 載入並驗證配置，這是唯一會讓建置失敗的階段
    let config = match args.load_config().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };

    tracing::info!(
        "✅ Configuration loaded: backend {}, {} endpoints, timeout {}s",
        config.backend.base_url,
        config.endpoints.len(),
        config.backend.timeout_seconds
    );

    let content = build_aggregate(&config).await;
    if content.is_empty() {
        tracing::warn!("⚠️ No content available, page will render with empty sections");
    }

    let target = OutputTarget::from_path(&config.output.path);
    let storage = LocalStorage::new(".");
    if let Err(e) = target
        .write(&content, &storage, &mut std::io::stdout())
        .await
    {
        exit_with(e);
    }

    if target == OutputTarget::Stdout {
        return Ok(());
    }
    tracing::info!("📁 Content saved to: {}", config.output.path);
    Ok(())
}

fn exit_with(e: ContentError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
