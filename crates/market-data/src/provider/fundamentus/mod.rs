//! Fundamentus provider implementation (secondary source).
//!
//! Scrapes the per-ticker detail page for profitability and leverage ratios.
//!
//! # API Endpoint
//!
//! - Detail page: `{base_url}/detalhes.php?papel={ticker}`
//!
//! # Throttling
//!
//! Fundamentus often answers HTTP 200 while throttling, with a short
//! "temporarily unavailable" page. Both that page and HTTP 429 are reported
//! as [`SourceError::Blocked`].

mod parse;

use std::collections::HashMap;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use scraper::{ElementRef, Html, Selector};

use crate::errors::SourceError;
use crate::models::{RawSecondaryFields, Ticker};
use crate::provider::http::{build_client, normalize_base_url};
use crate::provider::SecondarySource;

use parse::{normalize_label, parse_br_number};

pub const DEFAULT_BASE_URL: &str = "https://www.fundamentus.com.br";
const PROVIDER_ID: &str = "FUNDAMENTUS";

/// Real detail pages are tens of kilobytes; anything shorter is the
/// throttling placeholder.
const MIN_DETAIL_PAGE_LEN: usize = 1000;

const BLOCKED_MARKER: &str = "temporariamente indispon";
const NOT_FOUND_MARKER: &str = "nenhum papel encontrado";

/// Which raw field a label feeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SecondaryField {
    ReturnOnEquity,
    ReturnOnInvestedCapital,
    NetDebtToEbitda,
    GrossDebtToEquity,
    RevenueGrowth5y,
    AvgDailyVolume2m,
}

/// Normalized label aliases per field, tried in order. The site has renamed
/// its labels over time.
const LABEL_ALIASES: &[(SecondaryField, &[&str])] = &[
    (SecondaryField::ReturnOnEquity, &["roe", "return_on_equity", "ret_sobre_pl"]),
    (
        SecondaryField::ReturnOnInvestedCapital,
        &["roic", "return_on_invested_capital"],
    ),
    (
        SecondaryField::NetDebtToEbitda,
        &[
            "div_liquida_ebitda",
            "div_liq_ebitda",
            "divida_liquida_ebitda",
            "dl_ebitda",
        ],
    ),
    (
        SecondaryField::GrossDebtToEquity,
        &[
            "div_br_patrim",
            "div_brut_patrim",
            "div_bruta_patrim",
            "divida_bruta_patrimonio",
        ],
    ),
    (
        SecondaryField::RevenueGrowth5y,
        &["cres_rec_5a", "cresc_rec_5a", "cresc_5_anos", "crescimento_5_anos"],
    ),
    (
        SecondaryField::AvgDailyVolume2m,
        &["vol_med_2m", "liq_2meses", "liquidez_2_meses"],
    ),
];

/// Fundamentus provider for ROE, ROIC and debt ratios.
pub struct FundamentusProvider {
    client: Client,
    base_url: String,
}

impl FundamentusProvider {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: build_client(PROVIDER_ID),
            base_url: normalize_base_url(base_url),
        }
    }

    fn detail_url(&self, ticker: &Ticker) -> String {
        format!("{}/detalhes.php?papel={}", self.base_url, ticker)
    }

    async fn fetch(&self, ticker: &Ticker) -> Result<String, SourceError> {
        let response = self
            .client
            .get(self.detail_url(ticker))
            .send()
            .await
            .map_err(|e| SourceError::unavailable(PROVIDER_ID, e.to_string()))?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(SourceError::Blocked {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if !status.is_success() {
            return Err(SourceError::unavailable(
                PROVIDER_ID,
                format!("HTTP error: {}", status),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| SourceError::unavailable(PROVIDER_ID, e.to_string()))
    }
}

/// Classify and decode a detail page body.
pub(crate) fn decode_detail_page(
    ticker: &Ticker,
    body: &str,
) -> Result<RawSecondaryFields, SourceError> {
    let lowered = body.to_lowercase();

    if lowered.contains(NOT_FOUND_MARKER) {
        return Err(SourceError::NotFound {
            provider: PROVIDER_ID.to_string(),
            ticker: ticker.to_string(),
        });
    }

    if lowered.contains(BLOCKED_MARKER) || body.len() < MIN_DETAIL_PAGE_LEN {
        return Err(SourceError::Blocked {
            provider: PROVIDER_ID.to_string(),
        });
    }

    let cells = extract_label_values(body)?;

    let mut fields = RawSecondaryFields::new(ticker.clone());
    let mut recognized = 0usize;

    for (field, aliases) in LABEL_ALIASES {
        let Some(raw) = aliases.iter().find_map(|alias| cells.get(*alias)) else {
            continue;
        };
        recognized += 1;

        let value = match parse_br_number(raw) {
            Ok(value) => value,
            Err(text) => {
                warn!(
                    "{}: {} has unparseable {:?} value '{}', leaving it missing",
                    PROVIDER_ID, ticker, field, text
                );
                None
            }
        };

        match field {
            SecondaryField::ReturnOnEquity => fields.return_on_equity = value,
            SecondaryField::ReturnOnInvestedCapital => fields.return_on_invested_capital = value,
            SecondaryField::NetDebtToEbitda => fields.net_debt_to_ebitda = value,
            SecondaryField::GrossDebtToEquity => fields.gross_debt_to_equity = value,
            SecondaryField::RevenueGrowth5y => fields.revenue_growth_5y = value,
            SecondaryField::AvgDailyVolume2m => fields.avg_daily_volume_2m = value,
        }
    }

    if recognized == 0 {
        return Err(SourceError::malformed(
            PROVIDER_ID,
            format!("No known indicator labels on the page for {}", ticker),
        ));
    }

    Ok(fields)
}

/// Collect `normalized label -> raw value` pairs from every table row.
///
/// Detail rows alternate label and value cells (two, four or six per row).
/// The first occurrence of a label wins.
fn extract_label_values(body: &str) -> Result<HashMap<String, String>, SourceError> {
    let row_selector = selector("tr")?;
    let cell_selector = selector("td")?;
    let text_selector = selector("span.txt")?;

    let document = Html::parse_document(body);
    let mut pairs = HashMap::new();

    for row in document.select(&row_selector) {
        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
        for pair in cells.chunks_exact(2) {
            let label_cell = pair[0];
            let label = label_cell
                .select(&text_selector)
                .next()
                .map(element_text)
                .unwrap_or_else(|| element_text(label_cell));
            let key = normalize_label(&label);
            if key.is_empty() {
                continue;
            }
            pairs
                .entry(key)
                .or_insert_with(|| element_text(pair[1]));
        }
    }

    Ok(pairs)
}

fn selector(css: &str) -> Result<Selector, SourceError> {
    Selector::parse(css)
        .map_err(|e| SourceError::malformed(PROVIDER_ID, format!("Invalid selector {}: {:?}", css, e)))
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<Vec<_>>().join(" ").trim().to_string()
}

#[async_trait]
impl SecondarySource for FundamentusProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_secondary(&self, ticker: &Ticker) -> Result<RawSecondaryFields, SourceError> {
        let body = self.fetch(ticker).await?;
        let fields = decode_detail_page(ticker, &body)?;
        debug!(
            "{}: {} ROE={:?} ROIC={:?} DL/EBITDA={:?}",
            PROVIDER_ID,
            ticker,
            fields.return_on_equity,
            fields.return_on_invested_capital,
            fields.net_debt_to_ebitda
        );
        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FailureClass;

    /// Wrap detail rows in enough markup to look like a real page.
    fn detail_page(rows: &str) -> String {
        format!(
            "<html><head><title>Fundamentus</title></head><body>{}<table class=\"w728\">{}</table></body></html>",
            "<!-- padding -->".repeat(80),
            rows
        )
    }

    fn wege3() -> Ticker {
        Ticker::parse("WEGE3").unwrap()
    }

    #[test]
    fn test_provider_id() {
        let provider = FundamentusProvider::new(DEFAULT_BASE_URL);
        assert_eq!(provider.id(), "FUNDAMENTUS");
    }

    #[test]
    fn test_detail_url() {
        let provider = FundamentusProvider::new("http://localhost:8081/");
        assert_eq!(
            provider.detail_url(&wege3()),
            "http://localhost:8081/detalhes.php?papel=WEGE3"
        );
    }

    #[test]
    fn test_decode_label_value_pairs() {
        let page = detail_page(
            r#"
            <tr>
              <td class="label"><span class="help tips">?</span><span class="txt">ROE</span></td>
              <td class="data"><span class="txt">31,2%</span></td>
              <td class="label"><span class="help tips">?</span><span class="txt">ROIC</span></td>
              <td class="data"><span class="txt">27,5%</span></td>
            </tr>
            <tr>
              <td class="label"><span class="txt">Dív. Líquida/EBITDA</span></td>
              <td class="data"><span class="txt">-0,35</span></td>
              <td class="label"><span class="txt">Div Br/ Patrim</span></td>
              <td class="data"><span class="txt">0,12</span></td>
            </tr>
            <tr>
              <td class="label"><span class="txt">Cres. Rec (5a)</span></td>
              <td class="data"><span class="txt">21,4%</span></td>
              <td class="label"><span class="txt">Vol $ méd (2m)</span></td>
              <td class="data"><span class="txt">245.123.000</span></td>
            </tr>
            "#,
        );

        let fields = decode_detail_page(&wege3(), &page).unwrap();
        assert_eq!(fields.return_on_equity, Some(31.2));
        assert_eq!(fields.return_on_invested_capital, Some(27.5));
        assert_eq!(fields.net_debt_to_ebitda, Some(-0.35));
        assert_eq!(fields.gross_debt_to_equity, Some(0.12));
        assert_eq!(fields.revenue_growth_5y, Some(21.4));
        assert_eq!(fields.avg_daily_volume_2m, Some(245_123_000.0));
    }

    #[test]
    fn test_decode_plain_two_cell_rows() {
        let page = detail_page(
            "<tr><td>ROE:</td><td>18,0%</td></tr><tr><td>ROIC</td><td>-</td></tr>",
        );

        let fields = decode_detail_page(&wege3(), &page).unwrap();
        assert_eq!(fields.return_on_equity, Some(18.0));
        assert_eq!(fields.return_on_invested_capital, None);
        assert_eq!(fields.net_debt_to_ebitda, None);
    }

    #[test]
    fn test_decode_unparseable_value_stays_missing() {
        let page = detail_page(
            "<tr><td>ROE</td><td>n.d.</td><td>ROIC</td><td>9,1%</td></tr>",
        );

        let fields = decode_detail_page(&wege3(), &page).unwrap();
        assert_eq!(fields.return_on_equity, None);
        assert_eq!(fields.return_on_invested_capital, Some(9.1));
    }

    #[test]
    fn test_decode_zero_debt_is_a_value() {
        let page = detail_page("<tr><td>Dív. Líquida/EBITDA</td><td>0,00</td></tr>");

        let fields = decode_detail_page(&wege3(), &page).unwrap();
        assert_eq!(fields.net_debt_to_ebitda, Some(0.0));
    }

    #[test]
    fn test_short_page_is_blocked() {
        let err = decode_detail_page(&wege3(), "<html><body></body></html>").unwrap_err();
        assert_eq!(err.class(), FailureClass::Throttled);
    }

    #[test]
    fn test_unavailable_banner_is_blocked() {
        let page = detail_page("<tr><td>Serviço temporariamente indisponível</td></tr>");
        let err = decode_detail_page(&wege3(), &page).unwrap_err();
        assert!(matches!(err, SourceError::Blocked { .. }));
    }

    #[test]
    fn test_not_found_page() {
        let page = detail_page("<tr><td><h1>Nenhum papel encontrado</h1></td></tr>");
        let err = decode_detail_page(&wege3(), &page).unwrap_err();
        assert_eq!(err.class(), FailureClass::Absent);
    }

    #[test]
    fn test_page_without_known_labels_is_malformed() {
        let page = detail_page("<tr><td>Empresa</td><td>WEG S.A.</td></tr>");
        let err = decode_detail_page(&wege3(), &page).unwrap_err();
        assert!(matches!(err, SourceError::MalformedData { .. }));
    }
}
