pub mod fetcher;
pub mod observation;
pub mod open_weather;
pub mod weather_api;

use async_trait::async_trait;
use reqwest::Client;

pub use fetcher::WeatherFetcher;
pub use observation::RawObservation;
pub use open_weather::OpenWeather;
pub use weather_api::WeatherApi;

/// Common capability contract for weather providers.
///
/// An adapter maps its provider-specific wire shape into the canonical
/// [`RawObservation`]; any transport failure, non-success status or
/// undecodable body is logged and surfaces as `None`.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch_raw(&self, client: &Client, query: &str) -> Option<RawObservation>;
}
