//! Agency service catalog entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Closed enumeration of the services the agency sells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
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
    #[sea_orm(string_value = "seo")]
    Seo,
    #[sea_orm(string_value = "sea")]
    Sea,
    #[sea_orm(string_value = "maintenance")]
    Maintenance,
}

impl ServiceKind {
    /// Human-readable display label; slugs derive from this.
    pub fn label(&self) -> &'static str {
        match self {
            ServiceKind::Vitrine => "Création de site vitrine",
            ServiceKind::Ecommerce => "Site e-commerce",
            ServiceKind::Institutionnel => "Site institutionnel",
            ServiceKind::Landing => "Landing pages",
            ServiceKind::Refonte => "Refonte UI/UX",
            ServiceKind::Seo => "SEO naturel",
            ServiceKind::Sea => "SEA (Google Ads)",
            ServiceKind::Maintenance => "Maintenance & hébergement",
        }
    }

    /// All kinds in catalog order.
    pub fn all() -> [ServiceKind; 8] {
        [
            ServiceKind::Vitrine,
            ServiceKind::Ecommerce,
            ServiceKind::Institutionnel,
            ServiceKind::Landing,
            ServiceKind::Refonte,
            ServiceKind::Seo,
            ServiceKind::Sea,
            ServiceKind::Maintenance,
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub kind: ServiceKind,

    /// Derived once from the kind's display label
    #[sea_orm(unique)]
    pub slug: String,

    #[sea_orm(column_type = "Text")]
    pub short_description: String,

    #[sea_orm(column_type = "Text")]
    pub full_description: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub icon: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub featured_image: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub meta_title: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub meta_description: Option<String>,

    /// Display order, ties broken by kind label
    pub sort_order: i32,

    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_cover_all_kinds() {
        for kind in ServiceKind::all() {
            assert!(!kind.label().is_empty());
        }
    }
}
