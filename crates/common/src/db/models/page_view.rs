//! Page-view log entity
//!
//! Rows are write-once: the application never mutates or deletes them.
//! Aggregate queries rely on indexes over created_at, path and
//! country_code.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "page_views")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Truncated to 500 chars
    #[sea_orm(column_type = "Text", indexed)]
    pub path: String,

    pub ip_address: String,

    /// Geo fields stay empty until a geo provider is configured
    pub country: String,

    #[sea_orm(indexed)]
    pub country_code: String,

    pub city: String,

    /// Truncated to 500 chars
    #[sea_orm(column_type = "Text")]
    pub user_agent: String,

    /// Truncated to 500 chars
    #[sea_orm(column_type = "Text")]
    pub referer: String,

    pub is_bot: bool,

    #[sea_orm(indexed)]
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
