//! # Conditions Module
//!
//! Fetches the outside world: current weather from OpenWeather and the moon
//! phase from ipgeolocation's astronomy API.
//!
//! ## Degrading to Absent Data
//!
//! A failed fetch never stops a run. [`fetch_weather`] and [`fetch_astronomy`]
//! log the failure, print a one-line notice and return `None`; the selector
//! then skips that rule tier and falls through to the season.
//!
//! ## Sources
//!
//! The HTTP calls sit behind [`ConditionsSource`]. [`HttpConditions`] is the
//! real implementation (blocking `reqwest`, one GET per endpoint); tests swap
//! in stubs. Offline runs have no source at all and skip the lookups.

use crate::config::EndpointConfig;
use crate::error::{Error, Result};
use crate::theme::title_case;
use log::{debug, warn};
use reqwest::blocking::Client;
use serde::Deserialize;

/// Current weather, reduced to what theme selection reads.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub temperature_celsius: f64,
    /// OpenWeather's `weather[0].main`, e.g. `Rain`, `Clear`, `Thunderstorm`.
    pub condition_main: String,
}

impl WeatherSnapshot {
    /// `12.3°C - Rain`
    pub fn describe(&self) -> String {
        format!(
            "{:.1}°C - {}",
            self.temperature_celsius,
            title_case(&self.condition_main, ' ')
        )
    }
}

/// Astronomical data for today.
#[derive(Debug, Clone, PartialEq)]
pub struct AstroSnapshot {
    /// Free-form label such as `FULL_MOON` or `WANING_GIBBOUS`.
    pub moon_phase: String,
}

impl AstroSnapshot {
    /// `Waning Gibbous`
    pub fn describe(&self) -> String {
        title_case(&self.moon_phase, '_')
    }
}

/// Everything the selector may use, each part possibly absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conditions {
    pub weather: Option<WeatherSnapshot>,
    pub astro: Option<AstroSnapshot>,
}

/// Where weather and astronomy data come from.
pub trait ConditionsSource {
    fn weather(&self) -> Result<WeatherSnapshot>;
    fn astronomy(&self) -> Result<AstroSnapshot>;
}

/// Fetch the weather, turning any failure into `None`.
pub fn fetch_weather(source: &dyn ConditionsSource) -> Option<WeatherSnapshot> {
    match source.weather() {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!("Weather unavailable: {e}");
            eprintln!("weather offline: {e}");
            None
        }
    }
}

/// Fetch the moon phase, turning any failure into `None`.
pub fn fetch_astronomy(source: &dyn ConditionsSource) -> Option<AstroSnapshot> {
    match source.astronomy() {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!("Astronomy unavailable: {e}");
            eprintln!("astronomy offline: {e}");
            None
        }
    }
}

/// Run both fetches, weather first.
pub fn gather(source: &dyn ConditionsSource) -> Conditions {
    Conditions {
        weather: fetch_weather(source),
        astro: fetch_astronomy(source),
    }
}

/// OpenWeather `/data/2.5/weather` body. Only the fields we read.
#[derive(Debug, Deserialize)]
struct OpenWeatherResponse {
    main: OpenWeatherMain,
    #[serde(default)]
    weather: Vec<OpenWeatherCondition>,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherCondition {
    main: String,
}

/// ipgeolocation `/astronomy` body.
#[derive(Debug, Deserialize)]
struct AstronomyResponse {
    #[serde(default)]
    moon_phase: String,
}

/// Parse an OpenWeather current-weather body.
pub fn parse_weather(endpoint: &str, body: &str) -> Result<WeatherSnapshot> {
    let response: OpenWeatherResponse =
        serde_json::from_str(body).map_err(|e| Error::Decode {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;

    let condition = response
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| Error::Decode {
            endpoint: endpoint.to_string(),
            reason: "`weather` array is empty".to_string(),
        })?;

    Ok(WeatherSnapshot {
        temperature_celsius: response.main.temp,
        condition_main: condition.main,
    })
}

/// Parse an astronomy body. A missing `moon_phase` reads as empty.
pub fn parse_astronomy(endpoint: &str, body: &str) -> Result<AstroSnapshot> {
    let response: AstronomyResponse =
        serde_json::from_str(body).map_err(|e| Error::Decode {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;

    Ok(AstroSnapshot {
        moon_phase: response.moon_phase,
    })
}

/// Live HTTP source.
pub struct HttpConditions {
    client: Client,
    city: String,
    weather: EndpointConfig,
    astronomy: EndpointConfig,
}

impl HttpConditions {
    pub fn new(city: String, weather: EndpointConfig, astronomy: EndpointConfig) -> Self {
        Self {
            client: Client::new(),
            city,
            weather,
            astronomy,
        }
    }

    /// GET `endpoint` with `query` and return the body of a 2xx response.
    fn get(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<String> {
        // The request URL carries the API key.
        let network = |source: reqwest::Error| Error::Network {
            endpoint: endpoint.to_string(),
            source: source.without_url(),
        };

        let response = self
            .client
            .get(endpoint)
            .query(query)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(network)?;

        response.text().map_err(network)
    }
}

impl ConditionsSource for HttpConditions {
    fn weather(&self) -> Result<WeatherSnapshot> {
        let endpoint = &self.weather.endpoint;
        debug!("GET {endpoint}?q={}&units=metric", self.city);
        let body = self.get(
            endpoint,
            &[
                ("q", self.city.as_str()),
                ("appid", self.weather.api_key.as_str()),
                ("units", "metric"),
            ],
        )?;
        parse_weather(endpoint, &body)
    }

    fn astronomy(&self) -> Result<AstroSnapshot> {
        let endpoint = &self.astronomy.endpoint;
        debug!("GET {endpoint}?location={}", self.city);
        let body = self.get(
            endpoint,
            &[
                ("apiKey", self.astronomy.api_key.as_str()),
                ("location", self.city.as_str()),
            ],
        )?;
        parse_astronomy(endpoint, &body)
    }
}
