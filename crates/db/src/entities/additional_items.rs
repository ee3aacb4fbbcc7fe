//! `SeaORM` Entity for additional_items table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "additional_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub size: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::budget_additional_items::Entity")]
    BudgetAdditionalItems,
}

impl Related<super::budget_additional_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BudgetAdditionalItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
