//! JMA forecast HTTP client.
//!
//! One GET per location: `{base}/{area_code}.json`. The consumed shape is
//! the first report's first time-series block (weather codes + raw text)
//! and, when present, the second block's temperature bounds. Anything else
//! is a fetch failure, handled upstream by the aggregator.

use std::time::Duration;

use serde::Deserialize;

use crate::types::FetchError;

/// Default JMA forecast endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.jma.go.jp/bosai/forecast/data/forecast";

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct JmaReport {
    #[serde(rename = "timeSeries", default)]
    time_series: Vec<JmaTimeSeries>,
}

#[derive(Debug, Deserialize)]
struct JmaTimeSeries {
    #[serde(default)]
    areas: Vec<JmaArea>,
}

#[derive(Debug, Default, Deserialize)]
struct JmaArea {
    #[serde(rename = "weatherCodes", default)]
    weather_codes: Vec<String>,
    #[serde(default)]
    weathers: Vec<String>,
    #[serde(rename = "tempsMax", default)]
    temps_max: Vec<String>,
    #[serde(rename = "tempsMin", default)]
    temps_min: Vec<String>,
}

/// Validated per-location forecast data extracted from a JMA response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForecastPayload {
    /// At least one entry; three-digit code strings.
    pub weather_codes: Vec<String>,
    /// Raw text descriptions, parallel to `weather_codes` (may be shorter).
    pub weathers: Vec<String>,
    /// Daily highs as strings; empty or unparsable entries mean "missing".
    pub temps_max: Vec<String>,
    pub temps_min: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct JmaClient {
    client: reqwest::Client,
    base_url: String,
}

impl JmaClient {
    /// Client against the default JMA endpoint.
    ///
    /// # Errors
    /// Returns `FetchError::Network` if the HTTP client cannot be built.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client against an explicit endpoint (config override, tests).
    ///
    /// # Errors
    /// Returns `FetchError::Network` if the HTTP client cannot be built.
    pub fn with_base_url(base_url: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch and validate the forecast for one area code.
    ///
    /// # Errors
    /// `FetchError::Network` on transport failure, `FetchError::Status` on a
    /// non-success response, `FetchError::MalformedPayload` when the body
    /// isn't the recognized nested structure.
    pub async fn fetch_forecast(&self, area_code: &str) -> Result<ForecastPayload, FetchError> {
        let url = format!("{}/{}.json", self.base_url, area_code);

        tracing::debug!("Fetching JMA forecast: {}", url);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let reports: Vec<JmaReport> = response
            .json()
            .await
            .map_err(|e| FetchError::MalformedPayload(e.to_string()))?;

        Self::extract(reports)
    }

    /// Pull the consumed fields out of the deserialized reports.
    fn extract(reports: Vec<JmaReport>) -> Result<ForecastPayload, FetchError> {
        let report = reports
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::MalformedPayload("empty report list".to_string()))?;

        let mut series = report.time_series.into_iter();
        let weather_area = series
            .next()
            .and_then(|ts| ts.areas.into_iter().next())
            .ok_or_else(|| FetchError::MalformedPayload("no weather time series".to_string()))?;

        if weather_area.weather_codes.is_empty() {
            return Err(FetchError::MalformedPayload(
                "no weather codes in payload".to_string(),
            ));
        }

        // Temperature bounds live in a second time-series block; optional.
        let temp_area = series
            .next()
            .and_then(|ts| ts.areas.into_iter().next())
            .unwrap_or_default();

        Ok(ForecastPayload {
            weather_codes: weather_area.weather_codes,
            weathers: weather_area.weathers,
            temps_max: temp_area.temps_max,
            temps_min: temp_area.temps_min,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const VALID_BODY: &str = r#"[{"timeSeries":[
        {"areas":[{"weatherCodes":["100","201","300"],
                   "weathers":["晴れ","曇り時々晴れ","雨"]}]},
        {"areas":[{"tempsMax":["30","28","25"],"tempsMin":["22","21","19"]}]}
    ]}]"#;

    fn mock_client(server: &MockServer) -> JmaClient {
        JmaClient::with_base_url(&server.uri()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_valid_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/130000.json"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(VALID_BODY, "application/json"))
            .mount(&server)
            .await;

        let client = mock_client(&server);
        let payload = client.fetch_forecast("130000").await.unwrap();

        assert_eq!(payload.weather_codes, vec!["100", "201", "300"]);
        assert_eq!(payload.weathers.len(), 3);
        assert_eq!(payload.temps_max, vec!["30", "28", "25"]);
        assert_eq!(payload.temps_min, vec!["22", "21", "19"]);
    }

    #[tokio::test]
    async fn test_payload_without_temperature_block() {
        let server = MockServer::start().await;
        let body = r#"[{"timeSeries":[
            {"areas":[{"weatherCodes":["100"],"weathers":["晴れ"]}]}
        ]}]"#;
        Mock::given(method("GET"))
            .and(path("/390000.json"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
            .mount(&server)
            .await;

        let client = mock_client(&server);
        let payload = client.fetch_forecast("390000").await.unwrap();

        assert_eq!(payload.weather_codes, vec!["100"]);
        assert!(payload.temps_max.is_empty());
        assert!(payload.temps_min.is_empty());
    }

    #[tokio::test]
    async fn test_non_success_status_is_fetch_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/130000.json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = mock_client(&server);
        let result = client.fetch_forecast("130000").await;
        assert!(matches!(result, Err(FetchError::Status(500))));
    }

    #[tokio::test]
    async fn test_invalid_json_is_malformed_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/130000.json"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("not json", "application/json"))
            .mount(&server)
            .await;

        let client = mock_client(&server);
        let result = client.fetch_forecast("130000").await;
        assert!(matches!(result, Err(FetchError::MalformedPayload(_))));
    }

    #[tokio::test]
    async fn test_missing_structure_is_malformed_payload() {
        let server = MockServer::start().await;
        for (route, body) in [
            ("/1.json", "[]"),
            ("/2.json", r#"[{"timeSeries":[]}]"#),
            (
                "/3.json",
                r#"[{"timeSeries":[{"areas":[{"weatherCodes":[],"weathers":[]}]}]}]"#,
            ),
        ] {
            Mock::given(method("GET"))
                .and(path(route))
                .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
                .mount(&server)
                .await;
        }

        let client = mock_client(&server);
        for area in ["1", "2", "3"] {
            let result = client.fetch_forecast(area).await;
            assert!(
                matches!(result, Err(FetchError::MalformedPayload(_))),
                "area {} should be malformed",
                area
            );
        }
    }
}
