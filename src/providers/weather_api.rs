use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::error;

use crate::providers::{RawObservation, WeatherSource};

/// Secondary weather source, used when the primary fails or returns
/// invalid data.
pub struct WeatherApi {
    api_key: String,
    base_url: String,
}

impl WeatherApi {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WeatherApiResponse {
    current: CurrentBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temp_c: f64,
    condition: ConditionBlock,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    text: String,
}

#[async_trait]
impl WeatherSource for WeatherApi {
    fn name(&self) -> &'static str {
        "weatherapi"
    }

    async fn fetch_raw(&self, client: &Client, query: &str) -> Option<RawObservation> {
        let url = format!("{}/current.json", self.base_url);
        let response = client
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("q", query)])
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                error!("Error fetching weather from WeatherAPI for {query}: {e}");
                return None;
            }
        };

        if !response.status().is_success() {
            error!(
                "Error fetching weather from WeatherAPI for {query}: {}",
                response.status()
            );
            return None;
        }

        let body: WeatherApiResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                error!("Error decoding WeatherAPI payload for {query}: {e}");
                return None;
            }
        };

        Some(RawObservation::new(
            body.current.temp_c,
            body.current.condition.text,
        ))
    }
}
