//! Site-wide call-to-action banner (singleton pattern)
//!
//! At most one row may be active at a time; the repository enforces this
//! transactionally on save.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "anonymous_ctas")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub text: String,

    pub button_label: String,

    #[sea_orm(column_type = "Text")]
    pub button_url: String,

    pub active: bool,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
