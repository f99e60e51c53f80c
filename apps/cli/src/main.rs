mod config;
mod main_lib;
mod publisher;

use anyhow::Context;

use b3_screener_core::{ResultPublisher, Screener, ScreenerError};
use config::CliConfig;
use main_lib::{build_sources, init_tracing, log_top};
use publisher::JsonFilePublisher;

const TOP_N: usize = 10;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::from_env()?;
    init_tracing();

    let (primary, secondary) = build_sources(&config);
    let screener = Screener::new(primary, secondary, config.screener.clone())?;
    tracing::info!("Starting screener for {} tickers", config.tickers.len());

    let run = screener.run(&config.tickers);
    let outcome = match config.run_timeout {
        Some(limit) => tokio::time::timeout(limit, run)
            .await
            .with_context(|| format!("Screening run exceeded {:?}", limit))?,
        None => run.await,
    };

    let result = match outcome {
        Ok(result) => result,
        Err(e @ ScreenerError::CollectionFailed { .. }) => {
            tracing::error!("{}", e);
            tracing::error!(
                "Check the network connection and the primary source; raise \
                 SCREENER_RATE_LIMIT_SECONDS if the secondary source is blocking"
            );
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    if result.is_empty() {
        tracing::warn!("No ticker could be scored");
    }

    let summary = result.summary();
    tracing::info!(
        "Analyzed: {} | Approved (score >= 60): {} | Alerts: {} | Excluded: {}",
        summary.analyzed,
        summary.approved,
        summary.alerts,
        summary.excluded
    );
    log_top(&result, TOP_N);

    let publisher = JsonFilePublisher::new(&config.output_path);
    publisher
        .publish(&result)
        .await
        .with_context(|| format!("Failed to write {}", publisher.path().display()))?;
    tracing::info!(
        "Results saved to {} via {}",
        publisher.path().display(),
        publisher.name()
    );

    Ok(())
}
