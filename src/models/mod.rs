pub mod city;
pub mod region;
pub mod weather;

pub use city::{GazetteerCity, GazetteerCountry, ResolvedCity};
pub use region::Region;
pub use weather::{format_celsius, CityWeatherEntry, WeatherRecord};
