//! Client testimonial entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "testimonials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub client_name: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub client_company: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub client_role: Option<String>,

    #[sea_orm(column_type = "Text")]
    pub content: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub photo: Option<String>,

    /// 1 to 5 stars
    pub rating: i32,

    /// Display order, ties broken by recency
    pub sort_order: i32,

    pub active: bool,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
