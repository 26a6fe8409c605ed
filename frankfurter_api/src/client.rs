//! HTTP client for the Frankfurter exchange-rate API.

use std::time::Duration;

use chrono::NaiveDate;
use url::Url;

use crate::{types::TimeSeries, Error};

/// Request timeout for Frankfurter API calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the Frankfurter time-series endpoint.
///
/// Performs a single request per call; retry, caching, and fallback are the
/// caller's concern.
pub struct Client {
    client: reqwest::Client,
    /// Base URL for the API. Defaults to `https://api.frankfurter.dev/v1`.
    base_api_url: String,
}

impl Client {
    /// Creates a new client pointing at the production Frankfurter API.
    pub fn new() -> Result<Self, Error> {
        Self::with_base_url("https://api.frankfurter.dev/v1")
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        Ok(Self {
            client,
            base_api_url: base_url.to_string(),
        })
    }

    /// Fetches daily rates for `[start, end]`, converting `base` into each
    /// of `symbols` (comma-separated, e.g. `"USD"`).
    pub async fn get_timeseries(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        base: &str,
        symbols: &str,
    ) -> Result<TimeSeries, Error> {
        let url = self.timeseries_url(start, end, base, symbols)?;

        let resp = self.client.get(url).send().await.map_err(|e| {
            tracing::error!("Failed to get resource: {}", e);
            Error::RequestFailed
        })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let parsed = serde_json::from_str::<TimeSeries>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::RequestFailed
        })?;

        Ok(parsed)
    }

    fn timeseries_url(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        base: &str,
        symbols: &str,
    ) -> Result<Url, Error> {
        let mut url = Url::parse(&format!("{}/{}..{}", self.base_api_url, start, end))
            .map_err(|e| {
                tracing::error!("Invalid URL constructed: {}", e);
                Error::RequestFailed
            })?;
        url.query_pairs_mut()
            .append_pair("base", base)
            .append_pair("symbols", symbols);
        Ok(url)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    // Walk back from MAX so the cut never lands inside a multibyte char.
    let mut cut = MAX;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...[truncated]", &body[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_timeseries_json() -> serde_json::Value {
        serde_json::json!({
            "amount": 1.0,
            "base": "EUR",
            "start_date": "2025-01-02",
            "end_date": "2025-01-03",
            "rates": {
                "2025-01-02": {"USD": 1.0352},
                "2025-01-03": {"USD": 1.0308}
            }
        })
    }

    #[tokio::test]
    async fn success_returns_parsed_series() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/2025-01-02..2025-01-03"))
            .and(query_param("base", "EUR"))
            .and(query_param("symbols", "USD"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_timeseries_json()))
            .mount(&server)
            .await;

        let client = Client::with_base_url(&server.uri()).unwrap();
        let series = client
            .get_timeseries(date(2025, 1, 2), date(2025, 1, 3), "EUR", "USD")
            .await
            .unwrap();

        assert_eq!(series.base, "EUR");
        assert_eq!(series.rates.len(), 2);
        assert_eq!(series.rates[&date(2025, 1, 2)]["USD"], 1.0352);
    }

    #[tokio::test]
    async fn server_error_returns_http_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
            .mount(&server)
            .await;

        let client = Client::with_base_url(&server.uri()).unwrap();
        let err = client
            .get_timeseries(date(2025, 1, 2), date(2025, 1, 3), "EUR", "USD")
            .await
            .unwrap_err();

        match err {
            Error::HttpStatus { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "oops");
            }
            other => panic!("expected HttpStatus, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn bad_request_returns_http_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"message": "not found"})),
            )
            .mount(&server)
            .await;

        let client = Client::with_base_url(&server.uri()).unwrap();
        let err = client
            .get_timeseries(date(2025, 1, 10), date(2025, 1, 2), "EUR", "USD")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::HttpStatus { status: 404, .. }));
        assert!(!err.is_transient());
    }

    #[tokio::test]
    async fn malformed_body_returns_request_failed() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = Client::with_base_url(&server.uri()).unwrap();
        let err = client
            .get_timeseries(date(2025, 1, 2), date(2025, 1, 3), "EUR", "USD")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::RequestFailed));
        assert!(err.is_transient());
    }

    #[test]
    fn transient_classification() {
        assert!(Error::RequestFailed.is_transient());
        assert!(Error::HttpStatus {
            status: 429,
            body: String::new()
        }
        .is_transient());
        assert!(Error::HttpStatus {
            status: 503,
            body: String::new()
        }
        .is_transient());
        assert!(!Error::HttpStatus {
            status: 400,
            body: String::new()
        }
        .is_transient());
    }

    #[test]
    fn truncate_body_limits_length() {
        let long = "x".repeat(5000);
        let out = truncate_body(&long);
        assert!(out.ends_with("...[truncated]"));
        assert!(out.len() < 2100);
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        // 'é' is two bytes and straddles the 2000-byte cut point.
        let mut long = "x".repeat(1999);
        long.push('é');
        long.push_str(&"x".repeat(500));

        let out = truncate_body(&long);
        assert!(out.ends_with("...[truncated]"));
        assert!(out.starts_with(&"x".repeat(1999)));
    }

    #[tokio::test]
    async fn long_multibyte_error_body_surfaces_as_http_status() {
        let server = MockServer::start().await;
        let body = format!("{}{}", "x".repeat(1999), "é".repeat(100));
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string(body))
            .mount(&server)
            .await;

        let client = Client::with_base_url(&server.uri()).unwrap();
        let err = client
            .get_timeseries(date(2025, 1, 2), date(2025, 1, 3), "EUR", "USD")
            .await
            .unwrap_err();

        match err {
            Error::HttpStatus { status, body } => {
                assert_eq!(status, 500);
                assert!(body.ends_with("...[truncated]"));
            }
            other => panic!("expected HttpStatus, got {:?}", other),
        }
    }
}
