use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use weather_aggregator::config::Settings;
use weather_aggregator::gazetteer::{CityResolver, GazetteerIndex, Translator};
use weather_aggregator::models::{
    CityWeatherEntry, GazetteerCity, GazetteerCountry, Region,
};
use weather_aggregator::pipeline::BatchProcessor;
use weather_aggregator::store::ResultStore;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_index() -> GazetteerIndex {
    GazetteerIndex::from_parts(
        vec![
            GazetteerCity::new("Paris", 2_138_551, "FR"),
            GazetteerCity::new("Tokyo", 8_336_599, "JP"),
            // Country code deliberately absent from the country table.
            GazetteerCity::new("Erewhon", 1_000, "ZZ"),
        ],
        vec![
            GazetteerCountry::new("FR", "EU"),
            GazetteerCountry::new("JP", "AS"),
        ],
    )
}

fn test_settings(results_dir: &TempDir, primary: &MockServer, secondary: &MockServer) -> Settings {
    Settings {
        open_weather_base_url: primary.uri(),
        weather_api_base_url: secondary.uri(),
        translate_base_url: "http://127.0.0.1:1".to_string(),
        results_dir: results_dir.path().to_path_buf(),
        request_timeout_secs: 2,
        ..Settings::default()
    }
}

fn test_processor(settings: Settings) -> BatchProcessor {
    let translator = Translator::new("http://127.0.0.1:1", Duration::from_millis(100)).unwrap();
    let resolver = Arc::new(CityResolver::new(Arc::new(sample_index()), translator));
    BatchProcessor::new(Arc::new(settings), resolver)
}

async fn mount_primary(server: &MockServer, query: &str, temp: f64, description: &str) {
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", query))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "main": {"temp": temp},
            "weather": [{"description": description}]
        })))
        .mount(server)
        .await;
}

async fn mount_secondary(server: &MockServer, query: &str, temp_c: f64, text: &str) {
    Mock::given(method("GET"))
        .and(path("/current.json"))
        .and(query_param("q", query))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current": {"temp_c": temp_c, "condition": {"text": text}}
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_batch_partitions_cities_by_region() {
    let results_dir = TempDir::new().unwrap();
    let primary = MockServer::start().await;
    let secondary = MockServer::start().await;
    mount_primary(&primary, "Paris,FR", 15.0, "light rain").await;
    mount_primary(&primary, "Tokyo,JP", 28.0, "clear sky").await;

    let processor = test_processor(test_settings(&results_dir, &primary, &secondary));
    let cities = vec!["Paris".to_string(), "Tokyo".to_string()];
    let outcome = processor.process_batch(&cities, "abc", None).await;

    assert!(outcome.is_completed());
    assert_eq!(
        serde_json::to_string(&outcome).unwrap(),
        r#"{"status":"completed"}"#
    );

    let store = ResultStore::new(results_dir.path());
    assert_eq!(
        store.read(Region::Europe, "abc").unwrap(),
        vec![CityWeatherEntry::new("Paris", "15.0°C", "light rain")]
    );
    assert_eq!(
        store.read(Region::Asia, "abc").unwrap(),
        vec![CityWeatherEntry::new("Tokyo", "28.0°C", "clear sky")]
    );
}

#[tokio::test]
async fn test_unresolved_city_is_dropped_and_batch_completes() {
    let results_dir = TempDir::new().unwrap();
    let primary = MockServer::start().await;
    let secondary = MockServer::start().await;

    let processor = test_processor(test_settings(&results_dir, &primary, &secondary));
    let cities = vec!["Nonexistentville".to_string()];
    let outcome = processor.process_batch(&cities, "abc", None).await;

    assert!(outcome.is_completed());
    // No region directory was created, so nothing was persisted.
    assert!(std::fs::read_dir(results_dir.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn test_out_of_range_primary_falls_back_to_secondary() {
    let results_dir = TempDir::new().unwrap();
    let primary = MockServer::start().await;
    let secondary = MockServer::start().await;
    mount_primary(&primary, "Paris,FR", 200.0, "clear sky").await;
    mount_secondary(&secondary, "Paris,FR", 17.5, "Partly cloudy").await;

    let processor = test_processor(test_settings(&results_dir, &primary, &secondary));
    let outcome = processor
        .process_batch(&["Paris".to_string()], "abc", None)
        .await;

    assert!(outcome.is_completed());
    let store = ResultStore::new(results_dir.path());
    assert_eq!(
        store.read(Region::Europe, "abc").unwrap(),
        vec![CityWeatherEntry::new("Paris", "17.5°C", "partly cloudy")]
    );
}

#[tokio::test]
async fn test_resubmission_updates_entry_in_place() {
    let results_dir = TempDir::new().unwrap();
    let primary = MockServer::start().await;
    let secondary = MockServer::start().await;
    mount_primary(&primary, "Paris,FR", 15.0, "light rain").await;

    let processor = test_processor(test_settings(&results_dir, &primary, &secondary));
    let cities = vec!["Paris".to_string()];
    assert!(processor.process_batch(&cities, "abc", None).await.is_completed());

    // Same task, new observation.
    primary.reset().await;
    mount_primary(&primary, "Paris,FR", 18.0, "overcast clouds").await;
    assert!(processor.process_batch(&cities, "abc", None).await.is_completed());

    let store = ResultStore::new(results_dir.path());
    let entries = store.read(Region::Europe, "abc").unwrap();
    assert_eq!(
        entries,
        vec![CityWeatherEntry::new("Paris", "18.0°C", "overcast clouds")]
    );
}

#[tokio::test]
async fn test_unknown_region_result_is_dropped_silently() {
    let results_dir = TempDir::new().unwrap();
    let primary = MockServer::start().await;
    let secondary = MockServer::start().await;
    mount_primary(&primary, "Erewhon,ZZ", 10.0, "fog").await;

    let processor = test_processor(test_settings(&results_dir, &primary, &secondary));
    let outcome = processor
        .process_batch(&["Erewhon".to_string()], "abc", None)
        .await;

    // Resolution and weather both succeeded, but the region is unknown.
    assert!(outcome.is_completed());
    assert!(std::fs::read_dir(results_dir.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn test_separate_tasks_write_separate_files() {
    let results_dir = TempDir::new().unwrap();
    let primary = MockServer::start().await;
    let secondary = MockServer::start().await;
    mount_primary(&primary, "Paris,FR", 15.0, "light rain").await;

    let processor = test_processor(test_settings(&results_dir, &primary, &secondary));
    let cities = vec!["Paris".to_string()];
    assert!(processor.process_batch(&cities, "task-1", None).await.is_completed());
    assert!(processor.process_batch(&cities, "task-2", None).await.is_completed());

    let store = ResultStore::new(results_dir.path());
    assert_eq!(store.read(Region::Europe, "task-1").unwrap().len(), 1);
    assert_eq!(store.read(Region::Europe, "task-2").unwrap().len(), 1);
    assert_eq!(store.collect_region(Region::Europe).unwrap().len(), 2);
}
