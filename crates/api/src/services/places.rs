//! External place-data provider integration.
//!
//! Supplies candidate POIs around a position; the domain locator filters and
//! orders them. Two implementations: an HTTP-backed provider and a static
//! in-memory provider for development and tests.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use domain::models::coordinates::GeoCoordinates;
use domain::models::poi::PointOfInterest;

use crate::config::PlacesConfig;

/// Errors that can occur during place-provider lookups.
#[derive(Debug, Error)]
pub enum PlaceError {
    #[error("Place provider URL not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response from place provider: {0}")]
    InvalidResponse(String),
}

/// Source of candidate POIs around a position.
#[async_trait]
pub trait PlaceProvider: Send + Sync {
    /// Candidate POIs near `origin`. Implementations may return candidates
    /// beyond `radius_meters`; the locator applies the exact radius filter.
    async fn nearby(
        &self,
        origin: &GeoCoordinates,
        radius_meters: f64,
    ) -> Result<Vec<PointOfInterest>, PlaceError>;
}

/// One place record in the provider's response.
#[derive(Debug, Deserialize)]
struct PlaceDto {
    id: Uuid,
    name: String,
    category: String,
    latitude: f64,
    longitude: f64,
}

impl From<PlaceDto> for PointOfInterest {
    fn from(dto: PlaceDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            category: dto.category,
            coordinates: GeoCoordinates::new(dto.latitude, dto.longitude),
        }
    }
}

/// HTTP-backed place provider.
pub struct HttpPlaceProvider {
    client: Client,
    url: String,
}

impl HttpPlaceProvider {
    /// Builds the provider from configuration. Fails when no URL is
    /// configured or the HTTP client cannot be constructed.
    pub fn new(config: &PlacesConfig) -> Result<Self, PlaceError> {
        if config.url.is_empty() {
            return Err(PlaceError::NotConfigured);
        }
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }
}

#[async_trait]
impl PlaceProvider for HttpPlaceProvider {
    async fn nearby(
        &self,
        origin: &GeoCoordinates,
        radius_meters: f64,
    ) -> Result<Vec<PointOfInterest>, PlaceError> {
        let url = format!("{}/places", self.url.trim_end_matches('/'));
        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", origin.latitude.to_string()),
                ("longitude", origin.longitude.to_string()),
                ("radius", radius_meters.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PlaceError::InvalidResponse(format!(
                "status {}",
                response.status()
            )));
        }

        let places: Vec<PlaceDto> = response.json().await?;
        Ok(places.into_iter().map(PointOfInterest::from).collect())
    }
}

/// In-memory place provider for development and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticPlaceProvider {
    places: Vec<PointOfInterest>,
}

impl StaticPlaceProvider {
    pub fn new(places: Vec<PointOfInterest>) -> Self {
        Self { places }
    }
}

#[async_trait]
impl PlaceProvider for StaticPlaceProvider {
    async fn nearby(
        &self,
        _origin: &GeoCoordinates,
        _radius_meters: f64,
    ) -> Result<Vec<PointOfInterest>, PlaceError> {
        Ok(self.places.clone())
    }
}
