//! Home page handler

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::handlers::PageMeta;
use crate::AppState;
use vitrine_common::{
    cache::keys,
    db::models::{
        AnonymousCta, CompanyStats, Faq, Partner, PortfolioProject, Technology, Testimonial,
        WhatsappConfig,
    },
    db::Repository,
    errors::Result,
    metrics::record_cache,
};

#[derive(Serialize, Deserialize)]
pub struct HomeResponse {
    pub meta: PageMeta,
    pub testimonials: Vec<Testimonial>,
    pub partners: Vec<Partner>,
    pub portfolio_projects: Vec<PortfolioProject>,
    pub technologies: Vec<Technology>,
    pub faqs: Vec<Faq>,
    pub cta: Option<AnonymousCta>,
    pub whatsapp: Option<WhatsappConfig>,
    pub company_stats: Option<CompanyStats>,
}

/// Home page payload, served from Redis when a fresh copy exists.
/// Cache failures degrade to a database build, never an error.
pub async fn home(State(state): State<AppState>) -> Result<Json<HomeResponse>> {
    let cache_key = keys::home_payload();
    if let Ok(Some(cached)) = state.cache.get::<HomeResponse>(&cache_key).await {
        record_cache(true, "home");
        return Ok(Json(cached));
    }
    record_cache(false, "home");

    let repo = Repository::new(state.db.clone());

    let testimonials = repo.list_active_testimonials(6).await?;
    let partners = repo.list_active_partners(8).await?;
    let portfolio_projects = repo.list_active_projects(4).await?;
    let technologies = repo.list_active_technologies().await?;
    let faqs = repo.list_active_faqs().await?;
    let cta = repo.active_cta().await?;
    let whatsapp = repo.active_whatsapp_config().await?;
    let company_stats = repo.active_company_stats().await?;

    let site = &state.config.site.name;
    let meta = PageMeta::new(
        &format!("{} - Agence Web | Création de Sites Web Modernes", site),
        "Agence web spécialisée dans la création de sites web sur mesure, \
         SEO et développement web moderne.",
    );

    let payload = HomeResponse {
        meta,
        testimonials,
        partners,
        portfolio_projects,
        technologies,
        faqs,
        cta,
        whatsapp,
        company_stats,
    };

    let ttl = state.config.redis.default_ttl_secs;
    if let Err(e) = state.cache.set_with_ttl(&cache_key, &payload, ttl).await {
        tracing::debug!(error = %e, "Failed to cache home payload");
    }

    Ok(Json(payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_payload_survives_cache_round_trip() {
        let payload = HomeResponse {
            meta: PageMeta::new("Accueil", "Agence web"),
            testimonials: vec![],
            partners: vec![],
            portfolio_projects: vec![],
            technologies: vec![],
            faqs: vec![],
            cta: None,
            whatsapp: None,
            company_stats: None,
        };

        let json = serde_json::to_string(&payload).unwrap();
        let parsed: HomeResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.meta.title, "Accueil");
        assert!(parsed.testimonials.is_empty());
        assert!(parsed.cta.is_none());
    }
}
