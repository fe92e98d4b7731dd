use std::time::Duration;

use reqwest::Client;
use tokio::sync::OnceCell;
use tracing::{error, info};

use crate::config::Settings;
use crate::models::WeatherRecord;
use crate::providers::{OpenWeather, WeatherApi, WeatherSource};

/// Orchestrates provider selection: primary first, secondary on any
/// failure or invalid payload.
///
/// One fetcher is scoped to one batch. The HTTP client is built lazily on
/// the first fetch and released when the fetcher drops at batch end, on
/// success and error paths alike.
pub struct WeatherFetcher {
    primary: Box<dyn WeatherSource>,
    secondary: Box<dyn WeatherSource>,
    temperature_range: (f64, f64),
    request_timeout: Duration,
    client: OnceCell<Client>,
}

impl WeatherFetcher {
    pub fn new(
        primary: Box<dyn WeatherSource>,
        secondary: Box<dyn WeatherSource>,
        temperature_range: (f64, f64),
        request_timeout: Duration,
    ) -> Self {
        Self {
            primary,
            secondary,
            temperature_range,
            request_timeout,
            client: OnceCell::new(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            Box::new(OpenWeather::new(
                settings.open_weather_api_key.clone(),
                settings.open_weather_base_url.clone(),
            )),
            Box::new(WeatherApi::new(
                settings.weather_api_key.clone(),
                settings.weather_api_base_url.clone(),
            )),
            settings.temperature_range(),
            Duration::from_secs(settings.request_timeout_secs),
        )
    }

    pub async fn fetch(&self, query: &str) -> Option<WeatherRecord> {
        let client = match self.client().await {
            Ok(client) => client,
            Err(e) => {
                error!("Failed to build HTTP client: {e}");
                return None;
            }
        };

        let mut raw = self.primary.fetch_raw(client, query).await;

        let primary_ok = raw
            .as_ref()
            .is_some_and(|observation| observation.is_valid(self.temperature_range));
        if !primary_ok {
            info!("Falling back to {} for {query}", self.secondary.name());
            raw = self.secondary.fetch_raw(client, query).await;
        }

        match raw {
            Some(observation) if observation.is_valid(self.temperature_range) => {
                Some(observation.normalize())
            }
            _ => None,
        }
    }

    async fn client(&self) -> reqwest::Result<&Client> {
        self.client
            .get_or_try_init(|| async {
                Client::builder().timeout(self.request_timeout).build()
            })
            .await
    }
}
