use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::error;

use crate::providers::{RawObservation, WeatherSource};

/// Primary weather source.
pub struct OpenWeather {
    api_key: String,
    base_url: String,
}

impl OpenWeather {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenWeatherResponse {
    main: MainBlock,
    weather: Vec<ConditionBlock>,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    description: String,
}

#[async_trait]
impl WeatherSource for OpenWeather {
    fn name(&self) -> &'static str {
        "openweather"
    }

    async fn fetch_raw(&self, client: &Client, query: &str) -> Option<RawObservation> {
        let url = format!("{}/weather", self.base_url);
        let response = client
            .get(&url)
            .query(&[
                ("q", query),
                ("units", "metric"),
                ("APPID", self.api_key.as_str()),
            ])
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                error!("Error fetching weather from OpenWeather for {query}: {e}");
                return None;
            }
        };

        if !response.status().is_success() {
            error!(
                "Error fetching weather from OpenWeather for {query}: {}",
                response.status()
            );
            return None;
        }

        let body: OpenWeatherResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                error!("Error decoding OpenWeather payload for {query}: {e}");
                return None;
            }
        };

        let condition = body.weather.into_iter().next()?;
        Some(RawObservation::new(body.main.temp, condition.description))
    }
}
