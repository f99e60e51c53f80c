//! The screening pipeline: collect, merge, score, rank.

use std::collections::HashSet;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use log::{debug, info, warn};

use b3_screener_market_data::{
    FailureClass, PrimarySource, RawPrimaryFields, SecondaryScheduler, SecondarySource,
    SourceError, Ticker,
};

use super::config::ScreenerConfig;
use crate::errors::{Result, ScreenerError};
use crate::ranking::{rank, ExcludedTicker, RankedResult};
use crate::reconcile::{merge, reject_primary};
use crate::scoring::ScoringEngine;

/// Runs screening passes against a primary and a secondary source.
///
/// Each call to [`Screener::run`] owns a fresh [`SecondaryScheduler`], so the
/// cooldown and the block guard never leak between runs.
pub struct Screener {
    primary: Arc<dyn PrimarySource>,
    secondary: Arc<dyn SecondarySource>,
    config: ScreenerConfig,
    engine: ScoringEngine,
}

impl Screener {
    /// Validates `config` before anything is fetched.
    pub fn new(
        primary: Arc<dyn PrimarySource>,
        secondary: Arc<dyn SecondarySource>,
        config: ScreenerConfig,
    ) -> Result<Self> {
        config.validate()?;
        let engine = ScoringEngine::new(config.scoring_table.clone(), config.alert_threshold)?;
        Ok(Self {
            primary,
            secondary,
            config,
            engine,
        })
    }

    /// Screen `tickers` and return them ranked.
    ///
    /// Invalid and duplicate symbols are dropped before any request. Per-ticker
    /// failures exclude that ticker and are listed on the result. The run
    /// fails only when at least one ticker was attempted and the primary
    /// source could not be reached for any of them.
    pub async fn run(&self, tickers: &[String]) -> Result<RankedResult> {
        let (tickers, mut excluded) = normalize_tickers(tickers);

        if tickers.is_empty() {
            info!("No valid tickers to screen");
            return Ok(rank(Vec::new(), excluded, false, &self.engine));
        }

        let scheduler = SecondaryScheduler::new(
            self.config.secondary_interval()?,
            self.config.block_threshold,
        );

        info!(
            "Screening {} tickers (primary: {}, secondary: {}, cooldown {:?})",
            tickers.len(),
            self.primary.id(),
            self.secondary.id(),
            scheduler.min_interval()
        );

        let primary_results = self.collect_primary(tickers).await;
        let attempted = primary_results.len();

        let mut reached = 0usize;
        let mut last_error: Option<String> = None;
        let mut scored = Vec::with_capacity(attempted);

        for (ticker, primary) in primary_results {
            let primary = match primary {
                Ok(fields) => {
                    reached += 1;
                    fields
                }
                Err(e) => {
                    match e.class() {
                        FailureClass::Absent => reached += 1,
                        _ => last_error = Some(e.to_string()),
                    }
                    let reason = reject_primary(e);
                    warn!("{}: excluded ({})", ticker, reason);
                    excluded.push(ExcludedTicker::new(ticker.as_str(), reason.to_string()));
                    continue;
                }
            };

            let secondary = scheduler.fetch(self.secondary.as_ref(), &ticker).await;
            if let Err(e) = &secondary {
                debug!("{}: secondary fetch failed: {}", ticker, e);
            }

            match merge(Ok(primary), secondary) {
                Ok(record) => {
                    let result = self.engine.score(record);
                    debug!(
                        "{}: score {} ({})",
                        ticker,
                        result.score,
                        result.classification.as_str()
                    );
                    scored.push(result);
                }
                Err(e) => {
                    warn!("{}: excluded ({})", ticker, e);
                    excluded.push(ExcludedTicker::new(ticker.as_str(), e.to_string()));
                }
            }
        }

        if reached == 0 {
            return Err(ScreenerError::CollectionFailed {
                attempted,
                last_error: last_error.unwrap_or_else(|| "no response".to_string()),
            });
        }

        let secondary_disabled = scheduler.is_disabled();
        if secondary_disabled {
            warn!(
                "Secondary source '{}' was disabled during the run after {} blocks",
                self.secondary.id(),
                scheduler.block_guard().total_blocks()
            );
        }

        let result = rank(scored, excluded, secondary_disabled, &self.engine);
        let summary = result.summary();
        info!(
            "Screening finished: {} analyzed, {} approved, {} alerts, {} excluded",
            summary.analyzed, summary.approved, summary.alerts, summary.excluded
        );
        Ok(result)
    }

    /// Fetch primary fields with bounded concurrency, keeping input order.
    async fn collect_primary(
        &self,
        tickers: Vec<Ticker>,
    ) -> Vec<(Ticker, std::result::Result<RawPrimaryFields, SourceError>)> {
        let primary = &self.primary;
        stream::iter(tickers)
            .map(|ticker| async move {
                let result = primary.fetch_primary(&ticker).await;
                (ticker, result)
            })
            .buffered(self.config.primary_concurrency)
            .collect()
            .await
    }
}

/// Screen `tickers` with a one-off [`Screener`].
pub async fn run_screener(
    tickers: &[String],
    config: ScreenerConfig,
    primary: Arc<dyn PrimarySource>,
    secondary: Arc<dyn SecondarySource>,
) -> Result<RankedResult> {
    Screener::new(primary, secondary, config)?.run(tickers).await
}

/// Parse and de-duplicate symbols, keeping the first occurrence.
fn normalize_tickers(raw: &[String]) -> (Vec<Ticker>, Vec<ExcludedTicker>) {
    let mut seen = HashSet::new();
    let mut tickers = Vec::with_capacity(raw.len());
    let mut excluded = Vec::new();

    for symbol in raw {
        match Ticker::parse(symbol) {
            Ok(ticker) => {
                if seen.insert(ticker.clone()) {
                    tickers.push(ticker);
                } else {
                    debug!("Skipping duplicate ticker {}", ticker);
                }
            }
            Err(e) => {
                warn!("Rejecting ticker '{}': {}", symbol, e);
                excluded.push(ExcludedTicker::new(symbol.trim(), e.to_string()));
            }
        }
    }

    (tickers, excluded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_dedupes_and_uppercases() {
        let (tickers, excluded) = normalize_tickers(&symbols(&["petr4", " PETR4 ", "VALE3"]));
        let names: Vec<&str> = tickers.iter().map(|t| t.as_str()).collect();
        assert_eq!(names, vec!["PETR4", "VALE3"]);
        assert!(excluded.is_empty());
    }

    #[test]
    fn test_normalize_excludes_invalid() {
        let (tickers, excluded) = normalize_tickers(&symbols(&["", "PETR-4", "ITUB4"]));
        assert_eq!(tickers.len(), 1);
        assert_eq!(excluded.len(), 2);
        assert_eq!(excluded[1].ticker, "PETR-4");
    }
}
