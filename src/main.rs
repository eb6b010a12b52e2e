use ipca_scraper::{config, pipeline};
use reqwest::Client;
use std::{path::Path, process::ExitCode};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {:?}", info);
    }));

    // ─── 2) run once ─────────────────────────────────────────────────
    let client = Client::new();
    let output = Path::new(config::OUTPUT_PATH);

    // the metadata error was already logged by `run`
    match pipeline::run(&client, output).await {
        Ok(pipeline::Outcome::Written { rows }) => {
            info!(rows, "all done");
            ExitCode::SUCCESS
        }
        Ok(pipeline::Outcome::Skipped(reason)) => {
            warn!(%reason, "finished without output");
            ExitCode::SUCCESS
        }
        Err(_) => ExitCode::FAILURE,
    }
}
