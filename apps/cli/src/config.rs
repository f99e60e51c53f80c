use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context};

use b3_screener_core::{ScreenerConfig, ScoringTable};
use b3_screener_market_data::provider::{brapi, fundamentus};

/// The 30 most liquid B3 tickers screened when `SCREENER_TICKERS` is unset.
pub const DEFAULT_TICKERS: [&str; 30] = [
    "PETR4", "VALE3", "ITUB4", "BBDC4", "BBAS3", "ABEV3", "WEGE3", "MGLU3", "RAIZ4", "TAEE11",
    "BBSE3", "HYPE3", "RENT3", "LREN3", "CIEL3", "GGBR4", "EMBR3", "VIIA3", "B3SA3", "SULA11",
    "UGPA3", "ENGI11", "ENEV3", "EQTL3", "EGIE3", "YDUQ3", "NTCO3", "PCAR3", "CPLE6", "CSAN3",
];

pub struct CliConfig {
    pub tickers: Vec<String>,
    pub screener: ScreenerConfig,
    pub brapi_url: String,
    pub brapi_token: Option<String>,
    pub fundamentus_url: String,
    pub output_path: PathBuf,
    pub run_timeout: Option<Duration>,
}

impl CliConfig {
    /// Read configuration from the environment, after loading `.env`.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let tickers = match var("SCREENER_TICKERS") {
            Some(list) => list
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => DEFAULT_TICKERS.iter().map(|s| s.to_string()).collect(),
        };

        let mut screener = ScreenerConfig::default();
        let rate_limit = ["SCREENER_RATE_LIMIT_SECONDS", "FUNDAMENTUS_RATE_LIMIT"]
            .into_iter()
            .find_map(|key| var(key).map(|raw| (key, raw)));
        if let Some((key, raw)) = rate_limit {
            screener.secondary_rate_limit_seconds = parse_var(key, &raw)?;
        }
        if let Some(raw) = var("SCREENER_ALERT_THRESHOLD") {
            screener.alert_threshold = parse_var("SCREENER_ALERT_THRESHOLD", &raw)?;
        }
        if let Some(raw) = var("SCREENER_BLOCK_THRESHOLD") {
            screener.block_threshold = parse_var("SCREENER_BLOCK_THRESHOLD", &raw)?;
        }
        if let Some(raw) = var("SCREENER_PRIMARY_CONCURRENCY") {
            screener.primary_concurrency = parse_var("SCREENER_PRIMARY_CONCURRENCY", &raw)?;
        }
        if let Some(path) = var("SCREENER_SCORING_TABLE") {
            screener.scoring_table = load_scoring_table(&path)?;
        }
        screener.validate()?;

        let run_timeout = match var("SCREENER_RUN_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(parse_var(
                "SCREENER_RUN_TIMEOUT_SECS",
                &raw,
            )?)),
            None => None,
        };

        Ok(Self {
            tickers,
            screener,
            brapi_url: var("SCREENER_BRAPI_URL")
                .unwrap_or_else(|| brapi::DEFAULT_BASE_URL.to_string()),
            brapi_token: var("SCREENER_BRAPI_TOKEN").or_else(|| var("BRAPI_TOKEN")),
            fundamentus_url: var("SCREENER_FUNDAMENTUS_URL")
                .unwrap_or_else(|| fundamentus::DEFAULT_BASE_URL.to_string()),
            output_path: var("SCREENER_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("resultados.json")),
            run_timeout,
        })
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> anyhow::Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| anyhow!("Invalid {}: '{}'", key, raw))
}

fn load_scoring_table(path: &str) -> anyhow::Result<ScoringTable> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scoring table {}", path))?;
    let table: ScoringTable = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse scoring table {}", path))?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<CliConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CliConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.tickers.len(), 30);
        assert_eq!(config.tickers[0], "PETR4");
        assert_eq!(config.screener, ScreenerConfig::default());
        assert_eq!(config.output_path, PathBuf::from("resultados.json"));
        assert_eq!(config.brapi_url, brapi::DEFAULT_BASE_URL);
        assert!(config.brapi_token.is_none());
        assert!(config.run_timeout.is_none());
    }

    #[test]
    fn test_ticker_list_and_overrides() {
        let config = load(&[
            ("SCREENER_TICKERS", "petr4, VALE3,,ITUB4 "),
            ("SCREENER_ALERT_THRESHOLD", "75"),
            ("SCREENER_RUN_TIMEOUT_SECS", "600"),
            ("SCREENER_BRAPI_TOKEN", "secret"),
        ])
        .unwrap();
        assert_eq!(config.tickers, vec!["petr4", "VALE3", "ITUB4"]);
        assert_eq!(config.screener.alert_threshold, 75);
        assert_eq!(config.run_timeout, Some(Duration::from_secs(600)));
        assert_eq!(config.brapi_token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_legacy_rate_limit_variable() {
        let config = load(&[("FUNDAMENTUS_RATE_LIMIT", "2.5")]).unwrap();
        assert_eq!(config.screener.secondary_rate_limit_seconds, 2.5);

        let config = load(&[
            ("FUNDAMENTUS_RATE_LIMIT", "2.5"),
            ("SCREENER_RATE_LIMIT_SECONDS", "4"),
        ])
        .unwrap();
        assert_eq!(config.screener.secondary_rate_limit_seconds, 4.0);
    }

    #[test]
    fn test_rate_limit_error_names_the_variable_read() {
        let err = load(&[("FUNDAMENTUS_RATE_LIMIT", "fast")]).err().unwrap();
        assert!(err.to_string().contains("FUNDAMENTUS_RATE_LIMIT"));

        let err = load(&[("SCREENER_RATE_LIMIT_SECONDS", "fast")]).err().unwrap();
        assert!(err.to_string().contains("SCREENER_RATE_LIMIT_SECONDS"));
    }

    #[test]
    fn test_invalid_values_fail() {
        assert!(load(&[("SCREENER_ALERT_THRESHOLD", "high")]).is_err());
        assert!(load(&[("SCREENER_ALERT_THRESHOLD", "150")]).is_err());
        assert!(load(&[("SCREENER_RATE_LIMIT_SECONDS", "-2")]).is_err());
        assert!(load(&[("SCREENER_SCORING_TABLE", "/nonexistent/table.json")]).is_err());
    }
}
