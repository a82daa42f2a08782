//! SeaORM entity models
//!
//! Database entities for the Vitrine site

mod anonymous_cta;
mod article;
mod article_tag;
mod category;
mod company_stats;
mod contact_message;
mod faq;
mod page_view;
mod partner;
mod portfolio;
mod service;
mod tag;
mod team_member;
mod technology;
mod testimonial;
mod whatsapp_config;

pub use category::{
    ActiveModel as CategoryActiveModel,
    Column as CategoryColumn,
    Entity as CategoryEntity,
    Model as Category,
};

pub use tag::{
    ActiveModel as TagActiveModel,
    Column as TagColumn,
    Entity as TagEntity,
    Model as Tag,
};

pub use article::{
    ActiveModel as ArticleActiveModel,
    Column as ArticleColumn,
    Entity as ArticleEntity,
    Model as Article,
};

pub use article_tag::{
    ActiveModel as ArticleTagActiveModel,
    Column as ArticleTagColumn,
    Entity as ArticleTagEntity,
    Model as ArticleTag,
};

pub use service::{
    ActiveModel as ServiceActiveModel,
    Column as ServiceColumn,
    Entity as ServiceEntity,
    Model as Service,
    ServiceKind,
};

pub use contact_message::{
    ActiveModel as ContactMessageActiveModel,
    Column as ContactMessageColumn,
    Entity as ContactMessageEntity,
    Model as ContactMessage,
};

pub use team_member::{
    ActiveModel as TeamMemberActiveModel,
    Column as TeamMemberColumn,
    Entity as TeamMemberEntity,
    Model as TeamMember,
};

pub use testimonial::{
    ActiveModel as TestimonialActiveModel,
    Column as TestimonialColumn,
    Entity as TestimonialEntity,
    Model as Testimonial,
};

pub use partner::{
    ActiveModel as PartnerActiveModel,
    Column as PartnerColumn,
    Entity as PartnerEntity,
    Model as Partner,
};

pub use portfolio::{
    ActiveModel as PortfolioActiveModel,
    Column as PortfolioColumn,
    Entity as PortfolioEntity,
    Model as PortfolioProject,
    ProjectKind,
};

pub use technology::{
    ActiveModel as TechnologyActiveModel,
    Column as TechnologyColumn,
    Entity as TechnologyEntity,
    Model as Technology,
};

pub use faq::{
    ActiveModel as FaqActiveModel,
    Column as FaqColumn,
    Entity as FaqEntity,
    Model as Faq,
};

pub use anonymous_cta::{
    ActiveModel as AnonymousCtaActiveModel,
    Column as AnonymousCtaColumn,
    Entity as AnonymousCtaEntity,
    Model as AnonymousCta,
};

pub use whatsapp_config::{
    ActiveModel as WhatsappConfigActiveModel,
    Column as WhatsappConfigColumn,
    Entity as WhatsappConfigEntity,
    Model as WhatsappConfig,
};

pub use company_stats::{
    ActiveModel as CompanyStatsActiveModel,
    Column as CompanyStatsColumn,
    Entity as CompanyStatsEntity,
    Model as CompanyStats,
};

pub use page_view::{
    ActiveModel as PageViewActiveModel,
    Column as PageViewColumn,
    Entity as PageViewEntity,
    Model as PageView,
};
