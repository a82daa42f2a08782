//! Service catalog handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::handlers::PageMeta;
use crate::AppState;
use vitrine_common::{
    cache::keys,
    db::models::Service,
    db::Repository,
    errors::{AppError, Result},
    metrics::record_cache,
};

#[derive(Serialize)]
pub struct ServicesListResponse {
    pub meta: PageMeta,
    pub services: Vec<Service>,
}

#[derive(Serialize, Deserialize)]
pub struct ServiceDetailResponse {
    pub meta: PageMeta,
    pub service: Service,
    pub similar_services: Vec<Service>,
}

/// Service list payload
pub async fn services_list(State(state): State<AppState>) -> Result<Json<ServicesListResponse>> {
    let repo = Repository::new(state.db.clone());
    let services = repo.list_active_services().await?;

    let meta = PageMeta::new(
        &format!("Nos Services - Agence Web | {}", state.config.site.name),
        "Découvrez nos services web : création de sites vitrine, e-commerce, \
         SEO, refonte UI/UX, maintenance et hébergement.",
    );

    Ok(Json(ServicesListResponse { meta, services }))
}

/// Service detail payload, cached per slug. Inactive or unknown slugs
/// are a 404 and never cached.
pub async fn service_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ServiceDetailResponse>> {
    let cache_key = keys::service_payload(&slug);
    if let Ok(Some(cached)) = state.cache.get::<ServiceDetailResponse>(&cache_key).await {
        record_cache(true, "service");
        return Ok(Json(cached));
    }
    record_cache(false, "service");

    let repo = Repository::new(state.db.clone());

    let service = repo
        .find_active_service_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::ServiceNotFound { slug: slug.clone() })?;

    let similar_services = repo.similar_services(service.id, 3).await?;

    let meta = PageMeta::new(
        service
            .meta_title
            .as_deref()
            .unwrap_or(&format!("{} - {}", service.kind.label(), state.config.site.name)),
        service
            .meta_description
            .as_deref()
            .unwrap_or(&service.short_description),
    );

    let payload = ServiceDetailResponse {
        meta,
        service,
        similar_services,
    };

    let ttl = state.config.redis.default_ttl_secs;
    if let Err(e) = state.cache.set_with_ttl(&cache_key, &payload, ttl).await {
        tracing::debug!(error = %e, slug = %slug, "Failed to cache service payload");
    }

    Ok(Json(payload))
}
