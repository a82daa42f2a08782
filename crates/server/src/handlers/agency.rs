//! Agency pages: about and team

use axum::{extract::State, Json};
use serde::Serialize;

use crate::handlers::PageMeta;
use crate::AppState;
use vitrine_common::{db::models::TeamMember, db::Repository, errors::Result};

#[derive(Serialize)]
pub struct AgencyResponse {
    pub meta: PageMeta,
    pub team_members: Vec<TeamMember>,
}

/// About page payload
pub async fn about(State(state): State<AppState>) -> Result<Json<AgencyResponse>> {
    let repo = Repository::new(state.db.clone());
    let team_members = repo.list_active_team_members().await?;

    let meta = PageMeta::new(
        &format!("À Propos - {} | Agence Web", state.config.site.name),
        "Découvrez notre agence web. Notre équipe experte vous accompagne \
         dans vos projets web.",
    );

    Ok(Json(AgencyResponse { meta, team_members }))
}

/// Team page payload
pub async fn team(State(state): State<AppState>) -> Result<Json<AgencyResponse>> {
    let repo = Repository::new(state.db.clone());
    let team_members = repo.list_active_team_members().await?;

    let meta = PageMeta::new(
        &format!("Notre Équipe - {} | Agence Web", state.config.site.name),
        "Rencontrez notre équipe, des experts en développement web, SEO et \
         design UI/UX.",
    );

    Ok(Json(AgencyResponse { meta, team_members }))
}
