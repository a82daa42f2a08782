//! Blog handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::handlers::{PageMeta, Pagination, ARTICLES_PER_PAGE};
use crate::AppState;
use vitrine_common::{
    db::models::{Article, Category, Tag},
    db::Repository,
    errors::{AppError, Result},
};

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u64,
}

fn default_page() -> u64 {
    1
}

#[derive(Serialize)]
pub struct BlogListResponse {
    pub meta: PageMeta,
    pub articles: Vec<Article>,
    pub pagination: Pagination,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
}

#[derive(Serialize)]
pub struct BlogDetailResponse {
    pub meta: PageMeta,
    pub article: Article,
    pub similar_articles: Vec<Article>,
    pub recent_articles: Vec<Article>,
}

#[derive(Serialize)]
pub struct BlogCategoryResponse {
    pub meta: PageMeta,
    pub category: Category,
    pub articles: Vec<Article>,
    pub pagination: Pagination,
}

#[derive(Serialize)]
pub struct BlogTagResponse {
    pub meta: PageMeta,
    pub tag: Tag,
    pub articles: Vec<Article>,
    pub pagination: Pagination,
}

/// Blog index, paginated
pub async fn blog_list(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<BlogListResponse>> {
    let repo = Repository::new(state.db.clone());
    let page = query.page.max(1);

    let (articles, total) = repo.list_published_articles(page, ARTICLES_PER_PAGE).await?;
    let categories = repo.list_categories(10).await?;
    let tags = repo.list_tags(20).await?;

    let meta = PageMeta::new(
        &format!("Blog - {} | Actualités Web & SEO", state.config.site.name),
        "Découvrez nos articles sur le développement web, le SEO, le \
         marketing digital et les tendances web.",
    );

    Ok(Json(BlogListResponse {
        meta,
        articles,
        pagination: Pagination::new(page, ARTICLES_PER_PAGE, total),
        categories,
        tags,
    }))
}

/// Article detail. Unpublished or unknown slugs are a 404.
pub async fn blog_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogDetailResponse>> {
    let repo = Repository::new(state.db.clone());

    let article = repo
        .find_published_article_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::ArticleNotFound { slug: slug.clone() })?;

    let similar_articles = repo
        .similar_articles(article.category_id, article.id, 3)
        .await?;
    let recent_articles = repo.recent_articles(article.id, 5).await?;

    let meta = PageMeta::new(
        article.meta_title.as_deref().unwrap_or(&article.title),
        article
            .meta_description
            .as_deref()
            .unwrap_or(&article.excerpt),
    );

    Ok(Json(BlogDetailResponse {
        meta,
        article,
        similar_articles,
        recent_articles,
    }))
}

/// Articles in a category, paginated
pub async fn blog_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<BlogCategoryResponse>> {
    let repo = Repository::new(state.db.clone());
    let page = query.page.max(1);

    let category = repo
        .find_category_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::CategoryNotFound { slug: slug.clone() })?;

    let (articles, total) = repo
        .articles_in_category(category.id, page, ARTICLES_PER_PAGE)
        .await?;

    let meta = PageMeta::new(
        &format!("{} - Blog {}", category.name, state.config.site.name),
        &format!("Articles de la catégorie {}.", category.name),
    );

    Ok(Json(BlogCategoryResponse {
        meta,
        category,
        articles,
        pagination: Pagination::new(page, ARTICLES_PER_PAGE, total),
    }))
}

/// Articles carrying a tag, paginated
pub async fn blog_tag(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<BlogTagResponse>> {
    let repo = Repository::new(state.db.clone());
    let page = query.page.max(1);

    let tag = repo
        .find_tag_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::TagNotFound { slug: slug.clone() })?;

    let (articles, total) = repo.articles_with_tag(&tag, page, ARTICLES_PER_PAGE).await?;

    let meta = PageMeta::new(
        &format!("#{} - Blog {}", tag.name, state.config.site.name),
        &format!("Articles taggés avec {}.", tag.name),
    );

    Ok(Json(BlogTagResponse {
        meta,
        tag,
        articles,
        pagination: Pagination::new(page, ARTICLES_PER_PAGE, total),
    }))
}
