//! Portfolio project entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category of a portfolio project.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum ProjectKind {
    #[sea_orm(string_value = "vitrine")]
    Vitrine,
    #[sea_orm(string_value = "ecommerce")]
    Ecommerce,
    #[sea_orm(string_value = "institutionnel")]
    Institutionnel,
    #[sea_orm(string_value = "landing")]
    Landing,
    #[sea_orm(string_value = "refonte")]
    Refonte,
    #[sea_orm(string_value = "autre")]
    Autre,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "portfolio_projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub company: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    #[sea_orm(column_type = "Text")]
    pub image: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub website_url: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub detail_url: Option<String>,

    pub kind: ProjectKind,

    /// Display order, ties broken by recency
    pub sort_order: i32,

    pub active: bool,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
