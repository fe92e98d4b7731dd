use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Settings;
use crate::error::{PipelineError, Result};

/// Best-effort conversion of a city name into a matchable English form.
///
/// Names already within the 7-bit ASCII range pass through untouched.
/// Anything else goes to the translation endpoint; a failure there is
/// logged and the original name is returned, so translation can never
/// fail the pipeline.
pub struct Translator {
    client: Client,
    base_url: String,
}

impl Translator {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            settings.translate_base_url.clone(),
            Duration::from_secs(settings.request_timeout_secs),
        )
    }

    pub async fn normalize(&self, raw: &str) -> String {
        if raw.is_ascii() {
            return raw.to_string();
        }

        match self.translate_to_english(raw).await {
            Ok(translated) => {
                debug!(original = raw, translated, "city name translated");
                translated
            }
            Err(e) => {
                warn!("Translation failed for {raw}: {e}");
                raw.to_string()
            }
        }
    }

    async fn translate_to_english(&self, text: &str) -> Result<String> {
        let url = format!("{}/translate_a/single", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", "en"),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PipelineError::Translation(format!(
                "translation endpoint returned {}",
                response.status()
            )));
        }

        let body: Value = response.json().await?;
        parse_translation(&body)
            .ok_or_else(|| PipelineError::Translation("unexpected response shape".to_string()))
    }
}

/// The endpoint answers with nested arrays; the first element holds one
/// `[translated, original, ..]` segment per input sentence.
fn parse_translation(body: &Value) -> Option<String> {
    let segments = body.get(0)?.as_array()?;
    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0)?.as_str())
        .collect();

    if translated.is_empty() {
        None
    } else {
        Some(translated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_translator(base_url: &str) -> Translator {
        Translator::new(base_url, Duration::from_secs(1)).unwrap()
    }

    #[tokio::test]
    async fn test_ascii_input_skips_translation() {
        // Unroutable base URL proves no network call is made.
        let translator = test_translator("http://127.0.0.1:1");

        assert_eq!(translator.normalize("London").await, "London");
    }

    #[tokio::test]
    async fn test_non_ascii_input_is_translated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .and(query_param("tl", "en"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(
                [[["Moscow", "Москва", null, null, 10]], null, "ru"]
            )))
            .mount(&server)
            .await;

        let translator = test_translator(&server.uri());

        assert_eq!(translator.normalize("Москва").await, "Moscow");
    }

    #[tokio::test]
    async fn test_failed_translation_returns_input() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let translator = test_translator(&server.uri());

        assert_eq!(translator.normalize("Москва").await, "Москва");
    }

    #[test]
    fn test_parse_translation_concatenates_segments() {
        let body = serde_json::json!([[["Saint ", "Санкт-", null], ["Petersburg", "Петербург", null]]]);

        assert_eq!(
            parse_translation(&body).as_deref(),
            Some("Saint Petersburg")
        );
    }

    #[test]
    fn test_parse_translation_rejects_unexpected_shape() {
        assert!(parse_translation(&serde_json::json!({"error": true})).is_none());
        assert!(parse_translation(&serde_json::json!([[]])).is_none());
    }
}
