use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use b3_screener_core::RankedResult;
use b3_screener_market_data::{BrapiProvider, FundamentusProvider, PrimarySource, SecondarySource};

use crate::config::CliConfig;

pub fn init_tracing() {
    let log_format = std::env::var("SCREENER_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}

pub fn build_sources(config: &CliConfig) -> (Arc<dyn PrimarySource>, Arc<dyn SecondarySource>) {
    let primary: Arc<dyn PrimarySource> = Arc::new(BrapiProvider::new(
        &config.brapi_url,
        config.brapi_token.clone(),
    ));
    let secondary: Arc<dyn SecondarySource> =
        Arc::new(FundamentusProvider::new(&config.fundamentus_url));
    (primary, secondary)
}

/// Log the best `n` records, one line each.
pub fn log_top(result: &RankedResult, n: usize) {
    let fmt_value = |value: Option<f64>, suffix: &str| match value {
        Some(v) => format!("{:.1}{}", v, suffix),
        None => "N/A".to_string(),
    };

    for (i, row) in result.rows().iter().take(n).enumerate() {
        tracing::info!(
            "{:2}. {:6} | Score: {:3} | P/L: {:>6} | DY: {:>6} | ROE: {:>6} | {}{}",
            i + 1,
            row.ticker,
            row.score,
            fmt_value(row.price_to_earnings, ""),
            fmt_value(row.dividend_yield, "%"),
            fmt_value(row.return_on_equity, "%"),
            row.classification.as_str(),
            if row.highlight { " [ALERT]" } else { "" }
        );
    }
}
