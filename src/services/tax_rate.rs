use std::env;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use thiserror::Error;

pub const URL_TEMPLATE_ENV: &str = "FINPLAN_TAX_URL_TEMPLATE";
pub const MARKER_ENV: &str = "FINPLAN_TAX_MARKER";
const CURRENCY_PLACEHOLDER: &str = "{currency}";

/// A percentage that does not continue a word, number or sign. A leading
/// minus is captured so negative figures fail validation instead of being
/// read as positive.
static PERCENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^\w.\-])(-?\d{1,3}(?:\.\d+)?)\s*%").expect("percent pattern is valid")
});

const USER_AGENT: &str = concat!("finplan/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum TaxRateError {
    #[error("tax lookup url template is not configured (set FINPLAN_TAX_URL_TEMPLATE or pass --url-template)")]
    MissingUrlTemplate,
    #[error("connection error: {0}")]
    Connection(String),
    #[error("tax lookup failed with status {0}")]
    Status(StatusCode),
    #[error("marker text not found in tax page: {0}")]
    MarkerNotFound(String),
    #[error("no percentage found in tax page")]
    RateNotFound,
    #[error("invalid tax rate: {0}")]
    InvalidRate(String),
}

/// Source of the tax rate applied to the annual salary, as a fraction.
pub trait TaxRateProvider {
    fn tax_rate(&self, currency: &str) -> Result<f64, TaxRateError>;
}

impl<P: TaxRateProvider + ?Sized> TaxRateProvider for Box<P> {
    fn tax_rate(&self, currency: &str) -> Result<f64, TaxRateError> {
        (**self).tax_rate(currency)
    }
}

/// Converts a percentage in `[0, 100]` to a fraction.
pub fn percent_to_fraction(percent: f64) -> Result<f64, TaxRateError> {
    if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
        return Err(TaxRateError::InvalidRate(format!("{percent}%")));
    }
    Ok(percent / 100.0)
}

/// Parses strings such as `"24.50%"` into a fraction (`0.245`).
pub fn parse_percentage(text: &str) -> Result<f64, TaxRateError> {
    let trimmed = text.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    let percent = number
        .parse::<f64>()
        .map_err(|_| TaxRateError::InvalidRate(trimmed.to_string()))?;
    percent_to_fraction(percent)
}

/// Finds the first percentage in `page`, searching after `marker` when given.
pub fn extract_tax_rate(page: &str, marker: Option<&str>) -> Result<f64, TaxRateError> {
    let haystack = match marker {
        Some(marker) => {
            let start = page
                .find(marker)
                .ok_or_else(|| TaxRateError::MarkerNotFound(marker.to_string()))?;
            &page[start + marker.len()..]
        }
        None => page,
    };

    let found = PERCENT_RE
        .captures(haystack)
        .and_then(|captures| captures.get(1))
        .ok_or(TaxRateError::RateNotFound)?;
    parse_percentage(found.as_str())
}

/// A rate typed in by the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManualTaxRate {
    rate: f64,
}

impl ManualTaxRate {
    pub fn from_percent(percent: f64) -> Result<Self, TaxRateError> {
        Ok(Self {
            rate: percent_to_fraction(percent)?,
        })
    }
}

impl TaxRateProvider for ManualTaxRate {
    fn tax_rate(&self, _currency: &str) -> Result<f64, TaxRateError> {
        Ok(self.rate)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxLookupConfig {
    /// URL with a `{currency}` placeholder, e.g. `https://rates.example/{currency}`.
    pub url_template: String,
    pub marker: Option<String>,
}

impl TaxLookupConfig {
    /// Fills missing values from `FINPLAN_TAX_URL_TEMPLATE` / `FINPLAN_TAX_MARKER`.
    pub fn resolve(
        url_template: Option<String>,
        marker: Option<String>,
    ) -> Result<Self, TaxRateError> {
        let url_template = url_template
            .or_else(|| env::var(URL_TEMPLATE_ENV).ok())
            .filter(|value| !value.trim().is_empty())
            .ok_or(TaxRateError::MissingUrlTemplate)?;
        let marker = marker.or_else(|| env::var(MARKER_ENV).ok());
        Ok(Self {
            url_template,
            marker,
        })
    }

    pub fn url_for(&self, currency: &str) -> String {
        self.url_template
            .replace(CURRENCY_PLACEHOLDER, &currency.trim().to_ascii_uppercase())
    }
}

/// Scrapes the rate from a web page. One GET per call, no retries, no cache.
pub struct RemoteTaxRate {
    config: TaxLookupConfig,
    client: Client,
}

impl RemoteTaxRate {
    pub fn new(config: TaxLookupConfig) -> Result<Self, TaxRateError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TaxRateError::Connection(e.to_string()))?;
        Ok(Self { config, client })
    }

    fn fetch_page(&self, url: &str) -> Result<String, TaxRateError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| TaxRateError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TaxRateError::Status(status));
        }

        response
            .text()
            .map_err(|e| TaxRateError::Connection(e.to_string()))
    }
}

impl TaxRateProvider for RemoteTaxRate {
    fn tax_rate(&self, currency: &str) -> Result<f64, TaxRateError> {
        let url = self.config.url_for(currency);
        tracing::info!(%url, "looking up tax rate");
        let page = self.fetch_page(&url)?;
        let rate = extract_tax_rate(&page, self.config.marker.as_deref())?;
        tracing::info!(rate, "tax rate found");
        Ok(rate)
    }
}

/// Substitutes `fallback` whenever the wrapped provider fails.
pub struct FallbackTaxRate<P> {
    inner: P,
    fallback: f64,
}

impl<P: TaxRateProvider> FallbackTaxRate<P> {
    pub fn new(inner: P, fallback: f64) -> Self {
        Self { inner, fallback }
    }
}

impl<P: TaxRateProvider> TaxRateProvider for FallbackTaxRate<P> {
    fn tax_rate(&self, currency: &str) -> Result<f64, TaxRateError> {
        match self.inner.tax_rate(currency) {
            Ok(rate) => Ok(rate),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    fallback = self.fallback,
                    "tax rate lookup failed, using fallback"
                );
                Ok(self.fallback)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FailingTaxRate;

    #[test]
    fn parse_percentage_converts_to_fraction() {
        assert_eq!(parse_percentage("25.00%").unwrap(), 0.25);
        assert_eq!(parse_percentage(" 12.5 % ").unwrap(), 0.125);
        assert_eq!(parse_percentage("30").unwrap(), 0.3);
    }

    #[test]
    fn parse_percentage_rejects_garbage_and_out_of_range() {
        assert!(matches!(
            parse_percentage("abc%"),
            Err(TaxRateError::InvalidRate(_))
        ));
        assert!(matches!(
            parse_percentage("150%"),
            Err(TaxRateError::InvalidRate(_))
        ));
        assert!(matches!(
            parse_percentage("-5%"),
            Err(TaxRateError::InvalidRate(_))
        ));
    }

    #[test]
    fn extract_tax_rate_takes_first_percentage() {
        let page = "<table><tr><td>Rate</td><td>24.50%</td></tr><tr><td>33.00%</td></tr></table>";
        assert_eq!(extract_tax_rate(page, None).unwrap(), 0.245);
    }

    #[test]
    fn extract_tax_rate_searches_after_marker() {
        let page = "<p>Growth 3.10%</p><p>Effective rate</p><span>27.75%</span>";
        assert_eq!(
            extract_tax_rate(page, Some("Effective rate")).unwrap(),
            0.2775
        );
    }

    #[test]
    fn extract_tax_rate_reports_missing_marker_and_rate() {
        assert!(matches!(
            extract_tax_rate("<p>12%</p>", Some("Income tax")),
            Err(TaxRateError::MarkerNotFound(_))
        ));
        assert!(matches!(
            extract_tax_rate("<p>no numbers here</p>", None),
            Err(TaxRateError::RateNotFound)
        ));
    }

    #[test]
    fn extract_tax_rate_rejects_negative_figure() {
        assert!(matches!(
            extract_tax_rate("<td>Change</td><td>-5%</td>", None),
            Err(TaxRateError::InvalidRate(_))
        ));
        assert!(matches!(
            extract_tax_rate("<td>Rate</td><td>-5.25 %</td><td>20%</td>", Some("Rate")),
            Err(TaxRateError::InvalidRate(_))
        ));
    }

    #[test]
    fn extract_tax_rate_skips_digits_inside_longer_numbers() {
        assert_eq!(extract_tax_rate("id1234% then 15%", None).unwrap(), 0.15);
        assert_eq!(extract_tax_rate("12.5%", None).unwrap(), 0.125);
    }

    #[test]
    fn manual_tax_rate_ignores_currency() {
        let provider = ManualTaxRate::from_percent(25.0).unwrap();
        assert_eq!(provider.tax_rate("USD").unwrap(), 0.25);
        assert_eq!(provider.tax_rate("INR").unwrap(), 0.25);
        assert!(ManualTaxRate::from_percent(101.0).is_err());
    }

    #[test]
    fn fallback_tax_rate_recovers_from_failure() {
        let provider = FallbackTaxRate::new(FailingTaxRate, 0.0);
        assert_eq!(provider.tax_rate("USD").unwrap(), 0.0);

        let provider = FallbackTaxRate::new(ManualTaxRate::from_percent(20.0).unwrap(), 0.0);
        assert_eq!(provider.tax_rate("USD").unwrap(), 0.2);
    }

    #[test]
    fn url_for_fills_currency_placeholder() {
        let config = TaxLookupConfig {
            url_template: "http://rates.local/{currency}/income".to_string(),
            marker: None,
        };
        assert_eq!(config.url_for("cad"), "http://rates.local/CAD/income");
    }

    #[test]
    fn resolve_prefers_explicit_template() {
        let config = TaxLookupConfig::resolve(
            Some("http://explicit/{currency}".to_string()),
            Some("Rate".to_string()),
        )
        .unwrap();
        assert_eq!(config.url_template, "http://explicit/{currency}");
        assert_eq!(config.marker.as_deref(), Some("Rate"));
    }

    #[tokio::test]
    async fn remote_tax_rate_reports_connection_errors() {
        let config = TaxLookupConfig {
            url_template: "http://127.0.0.1:9/{currency}".to_string(),
            marker: None,
        };
        let result = tokio::task::spawn_blocking(move || {
            let provider = RemoteTaxRate::new(config).unwrap();
            provider.tax_rate("USD")
        })
        .await
        .unwrap();

        assert!(matches!(result, Err(TaxRateError::Connection(_))));
    }
}
