use changed_lines::telemetry;
use lint_report::SeverityAnalyzer;
use pr_lint_gate::config::GateConfig;
use tracing::Level;
use tracing_subscriber::{Layer, filter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine: CI provides the variables directly.
    let _ = dotenvy::dotenv();

    let env_filter = telemetry::env_filter_with_level("info,lint_report=info", Level::INFO)?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(telemetry::layer())
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(filter::filter_fn(|meta| !telemetry::is_library_event(meta))),
        )
        .init();

    let cfg = GateConfig::from_env()?;
    let analyzed = pr_lint_gate::run(&cfg, &SeverityAnalyzer).await?;

    println!("{}", serde_json::to_string_pretty(&analyzed)?);

    if !analyzed.success {
        std::process::exit(1);
    }

    Ok(())
}
