//! Integration tests for the budget repository and creation workflow.

mod common;

use std::sync::Arc;

use bizdesk_core::budget::{
    BudgetError, BudgetRepository as _, BudgetService, CreateBudgetInput, CreateBudgetLineInput,
};
use bizdesk_db::{BudgetRepository, CustomerRepository, SalesmanRepository};
use bizdesk_shared::AppError;
use bizdesk_shared::types::PageRequest;
use rust_decimal_macros::dec;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

fn service(
    db: &DatabaseConnection,
) -> BudgetService<BudgetRepository, CustomerRepository, SalesmanRepository> {
    BudgetService::new(
        Arc::new(BudgetRepository::new(db.clone())),
        Arc::new(CustomerRepository::new(db.clone())),
        Arc::new(SalesmanRepository::new(db.clone())),
    )
}

async fn input(db: &DatabaseConnection) -> CreateBudgetInput {
    let customer = common::customer(db).await;
    let salesman = common::salesman(db).await;
    let product = common::product(db).await;
    let item = common::additional_item(db).await;

    CreateBudgetInput {
        code: common::unique("B"),
        customer_id: Some(customer.id),
        salesman_id: Some(salesman.id),
        description: Some("Office refit".to_string()),
        products: vec![
            CreateBudgetLineInput {
                item_id: product.id,
                unit_price: dec!(100),
                quantity: 2,
                discount: dec!(0),
            },
            CreateBudgetLineInput {
                item_id: product.id,
                unit_price: dec!(19.99),
                quantity: 3,
                discount: dec!(0.15),
            },
        ],
        additional_items: Some(vec![CreateBudgetLineInput {
            item_id: item.id,
            unit_price: dec!(50),
            quantity: 1,
            discount: dec!(0.1),
        }]),
    }
}

#[tokio::test]
async fn test_create_budget_persists_lines_and_total() {
    let db = common::connect().await;
    let input = input(&db).await;
    let code = input.code.clone();

    let created = service(&db)
        .create_budget(input)
        .await
        .expect("Failed to create budget");

    assert_eq!(created.total_value, dec!(295.97));

    let found = BudgetRepository::new(db.clone())
        .find_by_code(&code)
        .await
        .expect("Query should succeed")
        .expect("Budget should exist");

    assert_eq!(found.id, created.id);
    assert_eq!(found.total_value, dec!(295.97));
    assert_eq!(found.products.len(), 2);
    assert_eq!(found.products[0].total_price, dec!(200));
    assert_eq!(found.products[1].total_price, dec!(50.97));
    assert_eq!(found.additional_items[0].total_price, dec!(45));
}

#[tokio::test]
async fn test_duplicate_code_rejected() {
    let db = common::connect().await;
    let first = input(&db).await;
    let mut second = input(&db).await;
    second.code = first.code.clone();

    service(&db).create_budget(first).await.expect("first create");
    let err = service(&db).create_budget(second).await.unwrap_err();

    assert!(matches!(err, BudgetError::DuplicateCode(_)));
}

#[tokio::test]
async fn test_unique_constraint_backs_code_check() {
    let db = common::connect().await;
    let repo = BudgetRepository::new(db.clone());
    let input = input(&db).await;
    let code = input.code.clone();
    service(&db).create_budget(input).await.expect("first create");

    let mut racer = self::input(&db).await;
    racer.code = code;
    let new_budget = bizdesk_core::budget::NewBudget {
        code: racer.code,
        customer_id: racer.customer_id.expect("customer"),
        salesman_id: racer.salesman_id.expect("salesman"),
        description: None,
        products: racer.products.iter().map(CreateBudgetLineInput::priced).collect(),
        additional_items: Vec::new(),
    };

    let err = repo.create(new_budget).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_unknown_product_rejected() {
    let db = common::connect().await;
    let mut input = input(&db).await;
    input.products[0].item_id = Uuid::new_v4();

    let err = service(&db).create_budget(input).await.unwrap_err();

    assert_eq!(err.status_code(), 400);
    assert!(matches!(
        err,
        BudgetError::Repository(AppError::Validation(ref msg))
            if msg == "Budget references a product that does not exist!"
    ));
}

#[tokio::test]
async fn test_customer_removed_before_insert_is_not_found() {
    let db = common::connect().await;
    let input = input(&db).await;
    let new_budget = bizdesk_core::budget::NewBudget {
        code: input.code,
        customer_id: Uuid::new_v4(),
        salesman_id: input.salesman_id.expect("salesman"),
        description: None,
        products: input.products.iter().map(CreateBudgetLineInput::priced).collect(),
        additional_items: Vec::new(),
    };

    let err = BudgetRepository::new(db.clone())
        .create(new_budget)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(ref msg) if msg == "Customer not found!"));
}

#[tokio::test]
async fn test_list_and_delete() {
    let db = common::connect().await;
    let created = service(&db)
        .create_budget(input(&db).await)
        .await
        .expect("Failed to create budget");

    let (rows, total) = service(&db)
        .list_budgets(&PageRequest { page: 1, per_page: 100 })
        .await
        .expect("Failed to list");
    assert!(total >= 1);
    assert!(rows.iter().any(|b| b.id == created.id));

    service(&db)
        .delete_budget(created.id)
        .await
        .expect("Failed to delete");

    let repo = BudgetRepository::new(db.clone());
    assert!(repo.find_by_id(created.id).await.unwrap().is_none());
}
