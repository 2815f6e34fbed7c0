use crate::core::Finder;
use crate::models::{
    AddDealerRequest, AddDealerResponse, DealerListResponse, ErrorResponse, FindNearestRequest,
    FindNearestResponse, HealthResponse, HistoryResponse, RemoveDealerResponse, SearchRecord,
};
use crate::services::{DealerRegistry, GeocodeService, RegistryError, SearchHistory};
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use tokio::sync::RwLock;
use validator::Validate;

/// Application state shared across all handlers
///
/// Registry and history are the session's mutable containers; everything
/// else is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub geocoder: Arc<GeocodeService>,
    pub finder: Finder,
    pub registry: Arc<RwLock<DealerRegistry>>,
    pub history: Arc<RwLock<SearchHistory>>,
    pub default_limit: u8,
    pub max_limit: u8,
}

/// Configure all dealer-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/dealers/nearest", web::post().to(find_nearest))
        .route("/dealers", web::get().to(list_dealers))
        .route("/dealers", web::post().to(add_dealer))
        .route("/dealers/{zip}", web::delete().to(remove_dealer))
        .route("/history", web::get().to(list_history));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        cache: state.geocoder.cache_stats(),
    })
}

/// Nearest-dealer search endpoint
///
/// POST /api/v1/dealers/nearest
///
/// Request body:
/// ```json
/// {
///   "zip": "8002",
///   "limit": 1
/// }
/// ```
async fn find_nearest(
    state: web::Data<AppState>,
    req: web::Json<FindNearestRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for nearest-dealer request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: "zip must be a 4-digit Swiss zip code".to_string(),
            status_code: 400,
        });
    }

    let limit = req
        .limit
        .unwrap_or(state.default_limit)
        .clamp(1, state.max_limit.max(1)) as usize;

    tracing::info!("Finding nearest dealer for zip: {}, limit: {}", req.zip, limit);

    // Snapshot the registry and release the lock before any geocoding await
    let dealers = state.registry.read().await.snapshot();

    let result = state
        .finder
        .find_nearest(state.geocoder.as_ref(), &req.zip, &dealers, limit)
        .await;

    if result.query_point.is_none() {
        tracing::info!("Query zip {} could not be geocoded", req.zip);
        return HttpResponse::NotFound().json(ErrorResponse {
            error: "zip_not_found".to_string(),
            message: format!("No location found for zip code {}", req.zip),
            status_code: 404,
        });
    }

    if let Some(nearest) = result.matches.first() {
        let record = SearchRecord::from_match(&req.zip, nearest);
        state.history.write().await.record(record);
    } else {
        tracing::warn!(
            "No dealer resolved for query {} ({} registered, {} unresolved)",
            req.zip,
            result.total_dealers,
            result.unresolved
        );
    }

    tracing::info!(
        "Returning {} match(es) for zip {} ({} dealers scanned, {} unresolved)",
        result.matches.len(),
        req.zip,
        result.total_dealers,
        result.unresolved
    );

    HttpResponse::Ok().json(FindNearestResponse {
        query_zip: req.zip.clone(),
        matches: result.matches,
        total_dealers: result.total_dealers,
        unresolved_dealers: result.unresolved,
    })
}

/// Registry snapshot endpoint
///
/// GET /api/v1/dealers
async fn list_dealers(state: web::Data<AppState>) -> impl Responder {
    let dealers = state.registry.read().await.snapshot();
    let total = dealers.len();

    HttpResponse::Ok().json(DealerListResponse { dealers, total })
}

/// Register a dealer
///
/// POST /api/v1/dealers
///
/// Request body:
/// ```json
/// {
///   "zip": "8001",
///   "name": "Garage Example AG"
/// }
/// ```
async fn add_dealer(
    state: web::Data<AppState>,
    req: web::Json<AddDealerRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for add-dealer request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: "zip must be 4 digits and name must not be empty".to_string(),
            status_code: 400,
        });
    }

    let mut registry = state.registry.write().await;
    match registry.add(req.zip.clone(), req.name.clone()) {
        Ok(()) => {
            tracing::info!("Added dealer {} ({})", req.name, req.zip);
            HttpResponse::Ok().json(AddDealerResponse {
                success: true,
                zip: req.zip.clone(),
            })
        }
        Err(e @ RegistryError::Duplicate(_)) => HttpResponse::Conflict().json(ErrorResponse {
            error: "duplicate_zip".to_string(),
            message: e.to_string(),
            status_code: 409,
        }),
        Err(e) => HttpResponse::BadRequest().json(ErrorResponse {
            error: "registry_error".to_string(),
            message: e.to_string(),
            status_code: 400,
        }),
    }
}

/// Remove a dealer
///
/// DELETE /api/v1/dealers/{zip}
async fn remove_dealer(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let zip = path.into_inner();

    let mut registry = state.registry.write().await;
    match registry.remove(&zip) {
        Ok(name) => {
            tracing::info!("Removed dealer {} ({})", name, zip);
            HttpResponse::Ok().json(RemoveDealerResponse {
                success: true,
                zip,
                name,
            })
        }
        Err(e @ RegistryError::NotFound(_)) => HttpResponse::NotFound().json(ErrorResponse {
            error: "unknown_zip".to_string(),
            message: e.to_string(),
            status_code: 404,
        }),
        Err(e) => HttpResponse::BadRequest().json(ErrorResponse {
            error: "registry_error".to_string(),
            message: e.to_string(),
            status_code: 400,
        }),
    }
}

/// Search history endpoint, oldest first
///
/// GET /api/v1/history
async fn list_history(state: web::Data<AppState>) -> impl Responder {
    let entries = state.history.read().await.snapshot();
    let total = entries.len();

    HttpResponse::Ok().json(HistoryResponse { entries, total })
}
