use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use b3_screener_core::{
    ExcludedTicker, PublishError, RankedResult, ResultPublisher, ResultRow,
};

/// Writes the run as a pretty-printed JSON history file.
pub struct JsonFilePublisher {
    path: PathBuf,
}

impl JsonFilePublisher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResultsFile<'a> {
    executed_at: DateTime<Utc>,
    total_analyzed: usize,
    approved: usize,
    alerts: Vec<&'a str>,
    alert_threshold: u8,
    secondary_disabled: bool,
    excluded: &'a [ExcludedTicker],
    rows: Vec<ResultRow>,
}

impl<'a> ResultsFile<'a> {
    fn from_result(result: &'a RankedResult) -> Self {
        let summary = result.summary();
        Self {
            executed_at: result.generated_at,
            total_analyzed: summary.analyzed,
            approved: summary.approved,
            alerts: result.alerts().map(|r| r.ticker().as_str()).collect(),
            alert_threshold: result.alert_threshold,
            secondary_disabled: result.secondary_disabled,
            excluded: &result.excluded,
            rows: result.rows(),
        }
    }
}

#[async_trait]
impl ResultPublisher for JsonFilePublisher {
    fn name(&self) -> &str {
        "json-file"
    }

    async fn publish(&self, result: &RankedResult) -> Result<(), PublishError> {
        let body = serde_json::to_vec_pretty(&ResultsFile::from_result(result))?;
        tokio::fs::write(&self.path, body).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use b3_screener_core::{merge, rank, ScoringEngine};
    use b3_screener_market_data::{RawPrimaryFields, RawSecondaryFields, Ticker};

    fn sample_result() -> RankedResult {
        let engine = ScoringEngine::default();
        let records = ["PETR4", "VALE3"]
            .iter()
            .enumerate()
            .map(|(i, symbol)| {
                let ticker = Ticker::parse(symbol).unwrap();
                let mut primary = RawPrimaryFields::new(ticker.clone());
                primary.price_to_earnings = Some(10.0 + 10.0 * i as f64);
                primary.price_to_book = Some(1.0);
                primary.dividend_yield = Some(6.0);
                let mut secondary = RawSecondaryFields::new(ticker);
                secondary.return_on_equity = Some(15.0);
                secondary.net_debt_to_ebitda = Some(2.0);
                engine.score(merge(Ok(primary), Ok(secondary)).unwrap())
            })
            .collect();
        rank(
            records,
            vec![ExcludedTicker::new("XPTO3", "Unknown ticker: XPTO3")],
            false,
            &engine,
        )
    }

    #[tokio::test]
    async fn test_writes_results_file() {
        let dir = tempfile::tempdir().unwrap();
        let publisher = JsonFilePublisher::new(dir.path().join("resultados.json"));

        publisher.publish(&sample_result()).await.unwrap();

        let content = std::fs::read_to_string(publisher.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(json["totalAnalyzed"], 2);
        assert_eq!(json["approved"], 2);
        assert_eq!(json["alerts"], serde_json::json!(["PETR4", "VALE3"]));
        assert_eq!(json["excluded"][0]["ticker"], "XPTO3");
        assert_eq!(json["rows"][0]["ticker"], "PETR4");
        assert_eq!(json["rows"][0]["score"], 100);
        assert_eq!(json["rows"][0]["highlight"], true);
        assert_eq!(json["rows"][1]["classification"], "excellent");
        assert!(json["rows"][0]["returnOnInvestedCapital"].is_null());
    }

    #[tokio::test]
    async fn test_missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let publisher = JsonFilePublisher::new(dir.path().join("missing").join("out.json"));

        let err = publisher.publish(&sample_result()).await.unwrap_err();
        assert!(matches!(err, PublishError::Io(_)));
    }
}
