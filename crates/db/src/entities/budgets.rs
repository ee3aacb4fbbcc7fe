//! `SeaORM` Entity for budgets table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub customer_id: Uuid,
    pub salesman_id: Uuid,
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub total_value: Decimal,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customers::Entity",
        from = "Column::CustomerId",
        to = "super::customers::Column::Id"
    )]
    Customers,
    #[sea_orm(
        belongs_to = "super::salesmen::Entity",
        from = "Column::SalesmanId",
        to = "super::salesmen::Column::Id"
    )]
    Salesmen,
    #[sea_orm(has_many = "super::budget_products::Entity")]
    BudgetProducts,
    #[sea_orm(has_many = "super::budget_additional_items::Entity")]
    BudgetAdditionalItems,
}

impl Related<super::customers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customers.def()
    }
}

impl Related<super::salesmen::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Salesmen.def()
    }
}

impl Related<super::budget_products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BudgetProducts.def()
    }
}

impl Related<super::budget_additional_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BudgetAdditionalItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
