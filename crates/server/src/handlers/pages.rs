//! Static pages: local SEO, legal, and robots.txt

use axum::{extract::State, Json};
use serde::Serialize;

use crate::handlers::PageMeta;
use crate::AppState;

#[derive(Serialize)]
pub struct StaticPageResponse {
    pub meta: PageMeta,
}

/// SEO landing page for Ouagadougou
pub async fn seo_ouagadougou(State(state): State<AppState>) -> Json<StaticPageResponse> {
    Json(StaticPageResponse {
        meta: PageMeta::new(
            &format!(
                "SEO Ouagadougou | Référencement Naturel - {}",
                state.config.site.name
            ),
            "Services de référencement naturel (SEO) à Ouagadougou. \
             Améliorez votre visibilité sur Google.",
        ),
    })
}

/// SEO landing page for Bobo-Dioulasso
pub async fn seo_bobo(State(state): State<AppState>) -> Json<StaticPageResponse> {
    Json(StaticPageResponse {
        meta: PageMeta::new(
            &format!(
                "SEO Bobo-Dioulasso | Référencement Naturel - {}",
                state.config.site.name
            ),
            "Services de référencement naturel (SEO) à Bobo-Dioulasso. \
             Améliorez votre visibilité sur Google.",
        ),
    })
}

/// Legal notice page
pub async fn legal(State(state): State<AppState>) -> Json<StaticPageResponse> {
    Json(StaticPageResponse {
        meta: PageMeta::new(
            &format!("Mentions Légales - {} | Agence Web", state.config.site.name),
            "Mentions légales : informations sur l'entreprise, l'hébergeur \
             et les données personnelles.",
        ),
    })
}

/// Privacy policy page
pub async fn privacy(State(state): State<AppState>) -> Json<StaticPageResponse> {
    Json(StaticPageResponse {
        meta: PageMeta::new(
            &format!(
                "Politique de Confidentialité - {} | Agence Web",
                state.config.site.name
            ),
            "Découvrez comment nous collectons, utilisons et protégeons vos \
             données personnelles.",
        ),
    })
}

/// Plain-text robots.txt built from the configured site domain
pub async fn robots_txt(State(state): State<AppState>) -> String {
    render_robots(&state.config.site.domain)
}

fn render_robots(domain: &str) -> String {
    let lines = [
        "User-agent: *",
        "Allow: /",
        "Disallow: /admin/",
        "Disallow: /media/",
        "",
        &format!("Sitemap: {}/sitemap.xml", domain),
    ];
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_robots_contents() {
        let body = render_robots("https://www.example.com");
        assert!(body.contains("User-agent: *"));
        assert!(body.contains("Allow: /"));
        assert!(body.contains("Disallow: /admin/"));
        assert!(body.contains("Disallow: /media/"));
        assert!(body.contains("Sitemap: https://www.example.com/sitemap.xml"));
    }

    #[test]
    fn test_robots_has_blank_line_before_sitemap() {
        let body = render_robots("https://www.example.com");
        assert!(body.contains("\n\nSitemap:"));
    }
}
