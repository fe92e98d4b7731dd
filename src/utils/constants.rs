/// File names inside the gazetteer directory
pub const CITIES_FILE: &str = "cities.json";
pub const COUNTRIES_FILE: &str = "countries.json";

/// Result file layout
pub const TASK_FILE_PREFIX: &str = "task_";
pub const TASK_FILE_EXTENSION: &str = "json";

/// Temperature constraints (inclusive, degrees Celsius)
pub const MIN_VALID_TEMP: f64 = -50.0;
pub const MAX_VALID_TEMP: f64 = 50.0;

/// Resolution threshold: matches must score strictly above this (0-100)
pub const MATCH_THRESHOLD: f64 = 80.0;

/// Provider endpoints
pub const OPEN_WEATHER_BASE_URL: &str = "http://api.openweathermap.org/data/2.5";
pub const WEATHER_API_BASE_URL: &str = "http://api.weatherapi.com/v1";
pub const TRANSLATE_BASE_URL: &str = "https://translate.googleapis.com";

/// Storage defaults
pub const DEFAULT_RESULTS_DIR: &str = "weather_data";
pub const DEFAULT_GAZETTEER_DIR: &str = "gazetteer";

/// Region names accepted for persistence
pub const VALID_REGIONS: [&str; 5] = ["Europe", "Asia", "America", "Africa", "Oceania"];

/// Processing defaults
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 16;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
