//! Repository pattern for database operations
//!
//! Provides a clean interface for all data access operations
//! with proper error handling. Writes always go to the primary
//! connection, reads prefer the replica.

use crate::db::models::*;
use crate::db::DbPool;
use crate::errors::{AppError, Result};
use crate::slug::slugify;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, DbErr,
    EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    Statement, TransactionError, TransactionTrait,
};
use serde::{Deserialize, Serialize};

/// Page-view count grouped by country code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryCount {
    pub country_code: String,
    pub count: i64,
}

/// Page-view count grouped by request path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathCount {
    pub path: String,
    pub count: i64,
}

/// Fields for a new blog article
#[derive(Debug, Clone, Default)]
pub struct NewArticle {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub featured_image: Option<String>,
    pub category_id: Option<i32>,
    pub author: String,
    pub published: bool,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

/// Fields for a new contact message (already normalized)
#[derive(Debug, Clone)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub budget: Option<String>,
    pub message: String,
}

/// Fields for a new page-view log row (already truncated)
#[derive(Debug, Clone)]
pub struct NewPageView {
    pub path: String,
    pub ip_address: String,
    pub country: String,
    pub country_code: String,
    pub city: String,
    pub user_agent: String,
    pub referer: String,
    pub is_bot: bool,
}

/// Fields for a new service catalog entry
#[derive(Debug, Clone)]
pub struct NewService {
    pub kind: ServiceKind,
    pub short_description: String,
    pub full_description: String,
    pub icon: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub sort_order: i32,
    pub active: bool,
}

fn tx_err(e: TransactionError<DbErr>) -> AppError {
    match e {
        TransactionError::Connection(db) => AppError::Database(db),
        TransactionError::Transaction(db) => AppError::Database(db),
    }
}

/// Repository for data access operations
#[derive(Clone)]
pub struct Repository {
    pool: DbPool,
}

impl Repository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get the read connection
    fn read_conn(&self) -> &DatabaseConnection {
        self.pool.read()
    }

    /// Get the write connection
    fn write_conn(&self) -> &DatabaseConnection {
        self.pool.write()
    }

    // ========================================================================
    // Health Check
    // ========================================================================

    /// Ping the database
    pub async fn ping(&self) -> Result<()> {
        self.pool.ping().await
    }

    // ========================================================================
    // Categories & Tags
    // ========================================================================

    /// Create a category; the slug is derived once from the name.
    pub async fn create_category(&self, name: &str, description: &str) -> Result<Category> {
        let slug = slugify(name);
        self.ensure_category_slug_free(&slug).await?;

        let category = CategoryActiveModel {
            name: Set(name.to_string()),
            slug: Set(slug),
            description: Set(description.to_string()),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        category.insert(self.write_conn()).await.map_err(Into::into)
    }

    async fn ensure_category_slug_free(&self, slug: &str) -> Result<()> {
        let existing = CategoryEntity::find()
            .filter(CategoryColumn::Slug.eq(slug))
            .one(self.read_conn())
            .await?;
        match existing {
            Some(_) => Err(AppError::DuplicateSlug { slug: slug.to_string() }),
            None => Ok(()),
        }
    }

    /// List categories ordered by name
    pub async fn list_categories(&self, limit: u64) -> Result<Vec<Category>> {
        CategoryEntity::find()
            .order_by_asc(CategoryColumn::Name)
            .limit(limit)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Find a category by slug
    pub async fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        CategoryEntity::find()
            .filter(CategoryColumn::Slug.eq(slug))
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Create a tag; the slug is derived once from the name.
    pub async fn create_tag(&self, name: &str) -> Result<Tag> {
        let slug = slugify(name);
        let existing = TagEntity::find()
            .filter(TagColumn::Slug.eq(slug.as_str()))
            .one(self.read_conn())
            .await?;
        if existing.is_some() {
            return Err(AppError::DuplicateSlug { slug });
        }

        let tag = TagActiveModel {
            name: Set(name.to_string()),
            slug: Set(slug),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        tag.insert(self.write_conn()).await.map_err(Into::into)
    }

    /// List tags ordered by name
    pub async fn list_tags(&self, limit: u64) -> Result<Vec<Tag>> {
        TagEntity::find()
            .order_by_asc(TagColumn::Name)
            .limit(limit)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Find a tag by slug
    pub async fn find_tag_by_slug(&self, slug: &str) -> Result<Option<Tag>> {
        TagEntity::find()
            .filter(TagColumn::Slug.eq(slug))
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    // ========================================================================
    // Articles
    // ========================================================================

    /// Create an article; the slug is derived once from the title and
    /// `published_at` is stamped when the article is created published.
    pub async fn create_article(&self, input: NewArticle) -> Result<Article> {
        let slug = slugify(&input.title);
        let existing = ArticleEntity::find()
            .filter(ArticleColumn::Slug.eq(slug.as_str()))
            .one(self.read_conn())
            .await?;
        if existing.is_some() {
            return Err(AppError::DuplicateSlug { slug });
        }

        let now = chrono::Utc::now();

        let article = ArticleActiveModel {
            title: Set(input.title),
            slug: Set(slug),
            excerpt: Set(input.excerpt),
            content: Set(input.content),
            featured_image: Set(input.featured_image),
            category_id: Set(input.category_id),
            author: Set(input.author),
            published: Set(input.published),
            published_at: Set(input.published.then(|| now.into())),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            meta_title: Set(input.meta_title),
            meta_description: Set(input.meta_description),
            ..Default::default()
        };

        article.insert(self.write_conn()).await.map_err(Into::into)
    }

    /// Publish an article. `published_at` is only stamped on the first
    /// publish; the slug is never touched.
    pub async fn publish_article(&self, id: i32) -> Result<Article> {
        let article = ArticleEntity::find_by_id(id)
            .one(self.write_conn())
            .await?
            .ok_or_else(|| AppError::ArticleNotFound { slug: id.to_string() })?;

        let now = chrono::Utc::now();
        let first_publish = article.published_at.is_none();

        let mut active: ArticleActiveModel = article.into();
        active.published = Set(true);
        if first_publish {
            active.published_at = Set(Some(now.into()));
        }
        active.updated_at = Set(now.into());

        active.update(self.write_conn()).await.map_err(Into::into)
    }

    /// Replace the tag set of an article
    pub async fn set_article_tags(&self, article_id: i32, tag_ids: &[i32]) -> Result<()> {
        let links: Vec<ArticleTagActiveModel> = tag_ids
            .iter()
            .map(|tag_id| ArticleTagActiveModel {
                article_id: Set(article_id),
                tag_id: Set(*tag_id),
            })
            .collect();

        self.write_conn()
            .transaction::<_, (), DbErr>(move |txn| {
                Box::pin(async move {
                    ArticleTagEntity::delete_many()
                        .filter(ArticleTagColumn::ArticleId.eq(article_id))
                        .exec(txn)
                        .await?;
                    if !links.is_empty() {
                        ArticleTagEntity::insert_many(links).exec(txn).await?;
                    }
                    Ok(())
                })
            })
            .await
            .map_err(tx_err)
    }

    /// Published articles, newest first, paginated
    pub async fn list_published_articles(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Article>, u64)> {
        let paginator = ArticleEntity::find()
            .filter(ArticleColumn::Published.eq(true))
            .order_by_desc(ArticleColumn::PublishedAt)
            .order_by_desc(ArticleColumn::CreatedAt)
            .paginate(self.read_conn(), per_page.max(1));

        let total = paginator.num_items().await?;
        let articles = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((articles, total))
    }

    /// Find a published article by slug
    pub async fn find_published_article_by_slug(&self, slug: &str) -> Result<Option<Article>> {
        ArticleEntity::find()
            .filter(ArticleColumn::Slug.eq(slug))
            .filter(ArticleColumn::Published.eq(true))
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Published articles sharing a category, excluding one article
    pub async fn similar_articles(
        &self,
        category_id: Option<i32>,
        exclude_id: i32,
        limit: u64,
    ) -> Result<Vec<Article>> {
        let mut query = ArticleEntity::find()
            .filter(ArticleColumn::Published.eq(true))
            .filter(ArticleColumn::Id.ne(exclude_id));

        query = match category_id {
            Some(id) => query.filter(ArticleColumn::CategoryId.eq(id)),
            None => query.filter(ArticleColumn::CategoryId.is_null()),
        };

        query
            .order_by_desc(ArticleColumn::PublishedAt)
            .limit(limit)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Most recent published articles, excluding one article
    pub async fn recent_articles(&self, exclude_id: i32, limit: u64) -> Result<Vec<Article>> {
        ArticleEntity::find()
            .filter(ArticleColumn::Published.eq(true))
            .filter(ArticleColumn::Id.ne(exclude_id))
            .order_by_desc(ArticleColumn::PublishedAt)
            .limit(limit)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Published articles in a category, newest first, paginated
    pub async fn articles_in_category(
        &self,
        category_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Article>, u64)> {
        let paginator = ArticleEntity::find()
            .filter(ArticleColumn::Published.eq(true))
            .filter(ArticleColumn::CategoryId.eq(category_id))
            .order_by_desc(ArticleColumn::PublishedAt)
            .paginate(self.read_conn(), per_page.max(1));

        let total = paginator.num_items().await?;
        let articles = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((articles, total))
    }

    /// Published articles carrying a tag, newest first, paginated
    pub async fn articles_with_tag(
        &self,
        tag: &Tag,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Article>, u64)> {
        let paginator = tag
            .find_related(ArticleEntity)
            .filter(ArticleColumn::Published.eq(true))
            .order_by_desc(ArticleColumn::PublishedAt)
            .paginate(self.read_conn(), per_page.max(1));

        let total = paginator.num_items().await?;
        let articles = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((articles, total))
    }

    // ========================================================================
    // Services
    // ========================================================================

    /// Create a service; the slug is derived once from the kind's label.
    pub async fn create_service(&self, input: NewService) -> Result<Service> {
        let slug = slugify(input.kind.label());
        let existing = ServiceEntity::find()
            .filter(ServiceColumn::Slug.eq(slug.as_str()))
            .one(self.read_conn())
            .await?;
        if existing.is_some() {
            return Err(AppError::DuplicateSlug { slug });
        }

        let service = ServiceActiveModel {
            kind: Set(input.kind),
            slug: Set(slug),
            short_description: Set(input.short_description),
            full_description: Set(input.full_description),
            icon: Set(input.icon),
            featured_image: Set(None),
            meta_title: Set(input.meta_title),
            meta_description: Set(input.meta_description),
            sort_order: Set(input.sort_order),
            active: Set(input.active),
            ..Default::default()
        };

        service.insert(self.write_conn()).await.map_err(Into::into)
    }

    /// Find a service by kind
    pub async fn find_service_by_kind(&self, kind: ServiceKind) -> Result<Option<Service>> {
        ServiceEntity::find()
            .filter(ServiceColumn::Kind.eq(kind))
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Active services in display order
    pub async fn list_active_services(&self) -> Result<Vec<Service>> {
        ServiceEntity::find()
            .filter(ServiceColumn::Active.eq(true))
            .order_by_asc(ServiceColumn::SortOrder)
            .order_by_asc(ServiceColumn::Kind)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Find an active service by slug
    pub async fn find_active_service_by_slug(&self, slug: &str) -> Result<Option<Service>> {
        ServiceEntity::find()
            .filter(ServiceColumn::Slug.eq(slug))
            .filter(ServiceColumn::Active.eq(true))
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Active services excluding one, in display order
    pub async fn similar_services(&self, exclude_id: i32, limit: u64) -> Result<Vec<Service>> {
        ServiceEntity::find()
            .filter(ServiceColumn::Active.eq(true))
            .filter(ServiceColumn::Id.ne(exclude_id))
            .order_by_asc(ServiceColumn::SortOrder)
            .limit(limit)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    // ========================================================================
    // Display-ordered content
    // ========================================================================

    /// Active team members in display order
    pub async fn list_active_team_members(&self) -> Result<Vec<TeamMember>> {
        TeamMemberEntity::find()
            .filter(TeamMemberColumn::Active.eq(true))
            .order_by_asc(TeamMemberColumn::SortOrder)
            .order_by_asc(TeamMemberColumn::Name)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Active testimonials in display order
    pub async fn list_active_testimonials(&self, limit: u64) -> Result<Vec<Testimonial>> {
        TestimonialEntity::find()
            .filter(TestimonialColumn::Active.eq(true))
            .order_by_asc(TestimonialColumn::SortOrder)
            .order_by_desc(TestimonialColumn::CreatedAt)
            .limit(limit)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Active partners in display order
    pub async fn list_active_partners(&self, limit: u64) -> Result<Vec<Partner>> {
        PartnerEntity::find()
            .filter(PartnerColumn::Active.eq(true))
            .order_by_asc(PartnerColumn::SortOrder)
            .order_by_asc(PartnerColumn::Name)
            .limit(limit)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Active portfolio projects in display order
    pub async fn list_active_projects(&self, limit: u64) -> Result<Vec<PortfolioProject>> {
        PortfolioEntity::find()
            .filter(PortfolioColumn::Active.eq(true))
            .order_by_asc(PortfolioColumn::SortOrder)
            .order_by_desc(PortfolioColumn::CreatedAt)
            .limit(limit)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Active technologies in display order
    pub async fn list_active_technologies(&self) -> Result<Vec<Technology>> {
        TechnologyEntity::find()
            .filter(TechnologyColumn::Active.eq(true))
            .order_by_asc(TechnologyColumn::SortOrder)
            .order_by_asc(TechnologyColumn::Name)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    // ========================================================================
    // FAQ
    // ========================================================================

    /// Active FAQ entries in display order
    pub async fn list_active_faqs(&self) -> Result<Vec<Faq>> {
        FaqEntity::find()
            .filter(FaqColumn::Active.eq(true))
            .order_by_asc(FaqColumn::SortOrder)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// All FAQ entries (export)
    pub async fn list_faqs(&self) -> Result<Vec<Faq>> {
        FaqEntity::find()
            .order_by_asc(FaqColumn::SortOrder)
            .order_by_asc(FaqColumn::Id)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Insert or update a FAQ entry matched on question text.
    /// Returns the row and whether it was created.
    pub async fn upsert_faq(
        &self,
        question: &str,
        answer: &str,
        sort_order: i32,
        active: bool,
    ) -> Result<(Faq, bool)> {
        let existing = FaqEntity::find()
            .filter(FaqColumn::Question.eq(question))
            .one(self.write_conn())
            .await?;

        match existing {
            Some(faq) => {
                let mut active_model: FaqActiveModel = faq.into();
                active_model.answer = Set(answer.to_string());
                active_model.sort_order = Set(sort_order);
                active_model.active = Set(active);
                let updated = active_model.update(self.write_conn()).await?;
                Ok((updated, false))
            }
            None => {
                let faq = FaqActiveModel {
                    question: Set(question.to_string()),
                    answer: Set(answer.to_string()),
                    sort_order: Set(sort_order),
                    active: Set(active),
                    ..Default::default()
                };
                let created = faq.insert(self.write_conn()).await?;
                Ok((created, true))
            }
        }
    }

    // ========================================================================
    // Contact
    // ========================================================================

    /// Persist a contact message. Every valid submission creates a new
    /// row; duplicates are not collapsed.
    pub async fn create_contact_message(&self, input: NewContactMessage) -> Result<ContactMessage> {
        let message = ContactMessageActiveModel {
            name: Set(input.name),
            email: Set(input.email),
            phone: Set(input.phone),
            company: Set(input.company),
            budget: Set(input.budget),
            message: Set(input.message),
            created_at: Set(chrono::Utc::now().into()),
            read: Set(false),
            ..Default::default()
        };

        message.insert(self.write_conn()).await.map_err(Into::into)
    }

    // ========================================================================
    // Singleton-pattern records
    //
    // Saving an active row deactivates every other row inside the same
    // transaction, so at most one row per table is active afterwards.
    // ========================================================================

    /// The active call-to-action banner, if any
    pub async fn active_cta(&self) -> Result<Option<AnonymousCta>> {
        AnonymousCtaEntity::find()
            .filter(AnonymousCtaColumn::Active.eq(true))
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Create a call-to-action banner
    pub async fn create_cta(
        &self,
        title: &str,
        text: &str,
        button_label: &str,
        button_url: &str,
        active: bool,
    ) -> Result<AnonymousCta> {
        let model = AnonymousCtaActiveModel {
            title: Set(title.to_string()),
            text: Set(text.to_string()),
            button_label: Set(button_label.to_string()),
            button_url: Set(button_url.to_string()),
            active: Set(active),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        self.write_conn()
            .transaction::<_, AnonymousCta, DbErr>(move |txn| {
                Box::pin(async move {
                    if active {
                        AnonymousCtaEntity::update_many()
                            .col_expr(AnonymousCtaColumn::Active, Expr::value(false))
                            .exec(txn)
                            .await?;
                    }
                    model.insert(txn).await
                })
            })
            .await
            .map_err(tx_err)
    }

    /// The active WhatsApp widget configuration, if any
    pub async fn active_whatsapp_config(&self) -> Result<Option<WhatsappConfig>> {
        WhatsappConfigEntity::find()
            .filter(WhatsappConfigColumn::Active.eq(true))
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Create a WhatsApp widget configuration
    pub async fn create_whatsapp_config(
        &self,
        phone_number: &str,
        default_message: &str,
        active: bool,
    ) -> Result<WhatsappConfig> {
        let model = WhatsappConfigActiveModel {
            phone_number: Set(phone_number.to_string()),
            default_message: Set(default_message.to_string()),
            active: Set(active),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        self.write_conn()
            .transaction::<_, WhatsappConfig, DbErr>(move |txn| {
                Box::pin(async move {
                    if active {
                        WhatsappConfigEntity::update_many()
                            .col_expr(WhatsappConfigColumn::Active, Expr::value(false))
                            .exec(txn)
                            .await?;
                    }
                    model.insert(txn).await
                })
            })
            .await
            .map_err(tx_err)
    }

    /// The active company figures row, if any
    pub async fn active_company_stats(&self) -> Result<Option<CompanyStats>> {
        CompanyStatsEntity::find()
            .filter(CompanyStatsColumn::Active.eq(true))
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Create a company figures row
    pub async fn create_company_stats(
        &self,
        projects_count: i32,
        years_experience: i32,
        client_satisfaction: i32,
        active: bool,
    ) -> Result<CompanyStats> {
        let model = CompanyStatsActiveModel {
            projects_count: Set(projects_count),
            years_experience: Set(years_experience),
            client_satisfaction: Set(client_satisfaction),
            active: Set(active),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        self.write_conn()
            .transaction::<_, CompanyStats, DbErr>(move |txn| {
                Box::pin(async move {
                    if active {
                        CompanyStatsEntity::update_many()
                            .col_expr(CompanyStatsColumn::Active, Expr::value(false))
                            .exec(txn)
                            .await?;
                    }
                    model.insert(txn).await
                })
            })
            .await
            .map_err(tx_err)
    }

    // ========================================================================
    // Page views
    // ========================================================================

    /// Append a page-view log row. Rows are never mutated afterwards.
    pub async fn insert_page_view(&self, input: NewPageView) -> Result<PageView> {
        let view = PageViewActiveModel {
            path: Set(input.path),
            ip_address: Set(input.ip_address),
            country: Set(input.country),
            country_code: Set(input.country_code),
            city: Set(input.city),
            user_agent: Set(input.user_agent),
            referer: Set(input.referer),
            is_bot: Set(input.is_bot),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        view.insert(self.write_conn()).await.map_err(Into::into)
    }

    /// Total non-bot page views
    pub async fn total_page_views(&self) -> Result<u64> {
        PageViewEntity::find()
            .filter(PageViewColumn::IsBot.eq(false))
            .count(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Non-bot page views in [start, end)
    pub async fn count_views_between(
        &self,
        start: chrono::DateTime<chrono::Utc>,
        end: chrono::DateTime<chrono::Utc>,
    ) -> Result<u64> {
        PageViewEntity::find()
            .filter(PageViewColumn::IsBot.eq(false))
            .filter(PageViewColumn::CreatedAt.gte(start))
            .filter(PageViewColumn::CreatedAt.lt(end))
            .count(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Top country codes by non-bot views (empty codes excluded)
    pub async fn top_countries(&self, limit: u64) -> Result<Vec<CountryCount>> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
            SELECT country_code, COUNT(*) AS views
            FROM page_views
            WHERE is_bot = FALSE AND country_code <> ''
            GROUP BY country_code
            ORDER BY views DESC
            LIMIT $1
            "#,
            vec![(limit as i64).into()],
        );

        let rows = self.read_conn().query_all(stmt).await?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            results.push(CountryCount {
                country_code: row.try_get_by_index::<String>(0)?,
                count: row.try_get_by_index::<i64>(1)?,
            });
        }
        Ok(results)
    }

    /// Top request paths by non-bot views
    pub async fn top_paths(&self, limit: u64) -> Result<Vec<PathCount>> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
            SELECT path, COUNT(*) AS views
            FROM page_views
            WHERE is_bot = FALSE
            GROUP BY path
            ORDER BY views DESC
            LIMIT $1
            "#,
            vec![(limit as i64).into()],
        );

        let rows = self.read_conn().query_all(stmt).await?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            results.push(PathCount {
                path: row.try_get_by_index::<String>(0)?,
                count: row.try_get_by_index::<i64>(1)?,
            });
        }
        Ok(results)
    }

    /// Non-bot view counts for the consecutive ranges
    /// [boundaries[i], boundaries[i+1]), one round trip per series
    pub async fn views_per_bucket(
        &self,
        boundaries: &[chrono::DateTime<chrono::Utc>],
    ) -> Result<Vec<u64>> {
        let buckets = boundaries.len().saturating_sub(1);
        if buckets == 0 {
            return Ok(Vec::new());
        }

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            bucket_series_sql(buckets),
            boundaries
                .iter()
                .map(|b| (*b).into())
                .collect::<Vec<sea_orm::Value>>(),
        );

        let rows = self.read_conn().query_all(stmt).await?;
        let mut counts = vec![0u64; buckets];
        for row in rows {
            let idx = row.try_get_by_index::<i32>(0)? as usize;
            let views = row.try_get_by_index::<i64>(1)?;
            if let Some(slot) = counts.get_mut(idx) {
                *slot = views.max(0) as u64;
            }
        }
        Ok(counts)
    }
}

/// SQL counting non-bot views per bucket. Bucket `i` spans parameters
/// $i+1 (inclusive) to $i+2 (exclusive); the outer join keeps empty
/// buckets in the result at zero.
fn bucket_series_sql(buckets: usize) -> String {
    let rows: Vec<String> = (0..buckets)
        .map(|i| format!("({}, ${}::timestamptz, ${}::timestamptz)", i, i + 1, i + 2))
        .collect();
    format!(
        "SELECT b.idx, COUNT(p.id) AS views \
         FROM (VALUES {}) AS b(idx, range_start, range_end) \
         LEFT JOIN page_views p \
         ON p.created_at >= b.range_start \
         AND p.created_at < b.range_end \
         AND p.is_bot = FALSE \
         GROUP BY b.idx \
         ORDER BY b.idx",
        rows.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_series_sql_placeholders() {
        let sql = bucket_series_sql(3);
        assert!(sql.contains("(0, $1::timestamptz, $2::timestamptz)"));
        assert!(sql.contains("(1, $2::timestamptz, $3::timestamptz)"));
        assert!(sql.contains("(2, $3::timestamptz, $4::timestamptz)"));
        assert!(!sql.contains("$5"));
        assert!(sql.contains("p.is_bot = FALSE"));
    }

    #[test]
    fn test_bucket_series_sql_single_bucket() {
        let sql = bucket_series_sql(1);
        assert!(sql.contains("VALUES (0, $1::timestamptz, $2::timestamptz)"));
        assert!(sql.contains("GROUP BY b.idx"));
    }
}
