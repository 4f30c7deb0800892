use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, trace_id};
use crate::routes::{
    campaigns, devices, geofences, health, insights, locations, pois, targeting_rules,
};
use crate::services::{
    HttpPlaceProvider, InsightsService, MatchingService, PlaceError, PlaceProvider,
    RandomFencePlacement, StaticPlaceProvider, SystemClock,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub matching: MatchingService,
    pub insights: InsightsService,
    pub places: Arc<dyn PlaceProvider>,
}

/// Builds the place provider named by configuration.
fn build_place_provider(config: &Config) -> Result<Arc<dyn PlaceProvider>, PlaceError> {
    if config.places.provider == "http" {
        Ok(Arc::new(HttpPlaceProvider::new(&config.places)?))
    } else {
        Ok(Arc::new(StaticPlaceProvider::default()))
    }
}

pub fn create_app(config: Config, pool: PgPool) -> Result<Router, PlaceError> {
    let config = Arc::new(config);

    let places = build_place_provider(&config)?;
    let placement = Arc::new(RandomFencePlacement::new(&config.insights));
    let matching = MatchingService::new(pool.clone(), Arc::new(SystemClock));
    let insights = InsightsService::new(pool.clone(), placement, config.insights.window_days);

    let state = AppState {
        pool,
        config: config.clone(),
        matching,
        insights,
        places,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Versioned API routes under /api/v1
    let api_routes = Router::new()
        // Device routes
        .route(
            "/api/v1/devices",
            post(devices::register_device).get(devices::list_devices),
        )
        .route(
            "/api/v1/devices/:device_id",
            get(devices::get_device).delete(devices::delete_device),
        )
        .route(
            "/api/v1/devices/:device_id/location",
            get(devices::get_last_location),
        )
        // Location updates (the matching pipeline)
        .route("/api/v1/locations", post(locations::update_location))
        // Geo-fence routes
        .route(
            "/api/v1/geofences",
            post(geofences::create_geofence).get(geofences::list_geofences),
        )
        .route(
            "/api/v1/geofences/:fence_id",
            get(geofences::get_geofence)
                .patch(geofences::update_geofence)
                .delete(geofences::delete_geofence),
        )
        // Targeting rule routes
        .route(
            "/api/v1/targeting-rules",
            post(targeting_rules::create_targeting_rule).get(targeting_rules::list_targeting_rules),
        )
        .route(
            "/api/v1/targeting-rules/:rule_id",
            get(targeting_rules::get_targeting_rule)
                .patch(targeting_rules::update_targeting_rule)
                .delete(targeting_rules::delete_targeting_rule),
        )
        // Campaign routes
        .route(
            "/api/v1/campaigns",
            post(campaigns::create_campaign).get(campaigns::list_campaigns),
        )
        .route(
            "/api/v1/campaigns/:campaign_id",
            get(campaigns::get_campaign).delete(campaigns::delete_campaign),
        )
        .route(
            "/api/v1/campaigns/:campaign_id/status",
            patch(campaigns::update_campaign_status),
        )
        .route(
            "/api/v1/campaigns/:campaign_id/insights",
            get(insights::campaign_insights),
        )
        // POI locator
        .route("/api/v1/pois/nearby", get(pois::nearby_pois))
        // Cross-campaign insights
        .route(
            "/api/v1/insights/device-targeting",
            get(insights::device_targeting),
        );

    // Health and metrics routes
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    // Global middleware (order matters: bottom layers run first)
    let router = Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state);

    Ok(router)
}
