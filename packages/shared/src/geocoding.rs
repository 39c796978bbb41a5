use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::models::coordinate::Coordinate;

#[cfg(test)]
use mockall::automock;

/// Best-effort address lookup. Failures never propagate; a game simply ends
/// up without a coordinate and is excluded from distance filtering.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &str) -> Option<Coordinate>;
}

pub struct HttpGeocoder {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGeocoder {
    pub fn new() -> Self {
        let base_url = std::env::var("GEOCODER_URL")
            .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".to_string());
        Self::with_base_url(base_url)
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }
}

impl Default for HttpGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

// Nominatim returns lat/lon as strings.
#[derive(Deserialize)]
struct GeocodeHit {
    lat: String,
    lon: String,
}

#[async_trait]
impl Geocoder for HttpGeocoder {
    async fn geocode(&self, address: &str) -> Option<Coordinate> {
        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .await;
        let response = match response {
            Ok(response) => response,
            Err(e) => {
                warn!("Geocoding request failed for \"{}\": {}", address, e);
                return None;
            }
        };
        match response.json::<Vec<GeocodeHit>>().await {
            Ok(hits) => hits.into_iter().next().and_then(|hit| {
                let lat = hit.lat.parse().ok()?;
                let lng = hit.lon.parse().ok()?;
                Some(Coordinate::new(lat, lng))
            }),
            Err(e) => {
                warn!("Unparseable geocoder response for \"{}\": {}", address, e);
                None
            }
        }
    }
}
