use clap::Parser;
use pixisphere_client::config::cli::{Command, LeadArgs, SearchArgs};
use pixisphere_client::utils::error::{ErrorSeverity, Result};
use pixisphere_client::utils::{logger, validation::Validate};
use pixisphere_client::{
    ClientSettings, CliConfig, HttpPartnerApi, PartnerApi, SearchPage,
};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(config).await {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 4, // 表單驗證失敗
            ErrorSeverity::Medium => 2, // API 或網路錯誤，可重試
            ErrorSeverity::High => 1, // 設定錯誤
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

async fn run(config: CliConfig) -> Result<()> {
    let settings = config.resolve_settings()?;
    settings.validate()?;
    tracing::info!("Using API at {}", settings.api_base);

    let api = HttpPartnerApi::from_config(&settings)?;

    match &config.command {
        Command::Search(args) => search(api, &settings, args).await,
        Command::Profile { id } => {
            let page = SearchPage::new(api, Default::default());
            let profile = page.profile(id).await?;
            print_json(&profile)
        }
        Command::Lead(args) => lead(&api, &settings, args).await,
        Command::Status => {
            let status = api.health_check().await;
            println!("{}", status.label());
            Ok(())
        }
    }
}

async fn search(api: HttpPartnerApi, settings: &ClientSettings, args: &SearchArgs) -> Result<()> {
    let store = args.to_store(settings);
    let mut page = SearchPage::new(api, store);

    page.load_or_error().await?;

    let output = serde_json::json!({
        "query": page.store().query_string(),
        "summary": page.summary(),
        "pagination": page.pagination(),
        "cards": page.cards(args.tab),
    });
    print_json(&output)
}

async fn lead(api: &HttpPartnerApi, settings: &ClientSettings, args: &LeadArgs) -> Result<()> {
    let form = args.to_form(settings)?;

    if args.dry_run {
        let payload = form.validate()?;
        return print_json(&payload);
    }

    let payload = form.submit(api).await?;
    println!("✅ Lead created for {} in {}", payload.service_type, payload.location);
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
