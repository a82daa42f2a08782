//! Headline company figures shown on the home page (singleton pattern)
//!
//! At most one row may be active at a time; the repository enforces this
//! transactionally on save.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "company_stats")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub projects_count: i32,

    pub years_experience: i32,

    /// Percentage, 0-100
    pub client_satisfaction: i32,

    pub active: bool,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
