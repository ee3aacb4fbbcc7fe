//! Integration tests for customer, salesman, catalog and user repositories.

mod common;

use bizdesk_core::auth::{NewUser, UserRepository as _};
use bizdesk_core::catalog::{CreateProductInput, ProductRepository as _};
use bizdesk_core::customer::{CreateCustomerInput, CustomerRepository as _};
use bizdesk_core::salesman::SalesmanRepository as _;
use bizdesk_db::{CustomerRepository, ProductRepository, SalesmanRepository, UserRepository};
use bizdesk_shared::AppError;
use bizdesk_shared::types::PageRequest;
use rust_decimal_macros::dec;
use uuid::Uuid;

#[tokio::test]
async fn test_customer_document_is_unique() {
    let db = common::connect().await;
    let repo = CustomerRepository::new(db.clone());
    let existing = common::customer(&db).await;

    let err = repo
        .create(CreateCustomerInput {
            name: "Copycat".to_string(),
            document: existing.document.clone(),
            email: None,
            phone: None,
            address: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(err.message(), "Customer already exists!");
}

#[tokio::test]
async fn test_customer_update_and_delete() {
    let db = common::connect().await;
    let repo = CustomerRepository::new(db.clone());
    let mut customer = common::customer(&db).await;

    customer.address = Some("Rua A, 100".to_string());
    let updated = repo.update(&customer).await.expect("Failed to update");
    assert_eq!(updated.address.as_deref(), Some("Rua A, 100"));

    assert!(repo.delete(customer.id).await.unwrap());
    assert!(!repo.delete(customer.id).await.unwrap());
    assert!(repo.find_by_id(customer.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_salesman_find_by_email_and_list() {
    let db = common::connect().await;
    let repo = SalesmanRepository::new(db.clone());
    let salesman = common::salesman(&db).await;

    let found = repo
        .find_by_email(&salesman.email)
        .await
        .unwrap()
        .expect("Salesman should exist");
    assert_eq!(found.id, salesman.id);

    let (rows, total) = repo.list(&PageRequest { page: 1, per_page: 1 }).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert!(total >= 1);
}

#[tokio::test]
async fn test_product_images_round_trip() {
    let db = common::connect().await;
    let repo = ProductRepository::new(db.clone());
    let mut product = common::product(&db).await;
    assert!(product.images.is_empty());

    product.images = vec!["a-front.png".to_string(), "b-side.webp".to_string()];
    repo.update(&product).await.expect("Failed to update");

    let found = repo.find_by_id(product.id).await.unwrap().unwrap();
    assert_eq!(found.images, ["a-front.png", "b-side.webp"]);
    assert_eq!(found.unit_price, dec!(100));
}

#[tokio::test]
async fn test_concurrent_image_appends_are_all_kept() {
    let db = common::connect().await;
    let repo = ProductRepository::new(db.clone());
    let product = common::product(&db).await;

    let first = ["a.png".to_string()];
    let second = ["b.png".to_string(), "c.png".to_string()];
    let (a, b) = tokio::join!(
        repo.append_images(product.id, &first),
        repo.append_images(product.id, &second),
    );
    a.unwrap().unwrap();
    b.unwrap().unwrap();

    let mut images = repo.find_by_id(product.id).await.unwrap().unwrap().images;
    images.sort();
    assert_eq!(images, ["a.png", "b.png", "c.png"]);
}

#[tokio::test]
async fn test_append_images_to_missing_product() {
    let db = common::connect().await;
    let repo = ProductRepository::new(db);

    let found = repo
        .append_images(Uuid::new_v4(), &["a.png".to_string()])
        .await
        .unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn test_product_code_is_unique() {
    let db = common::connect().await;
    let repo = ProductRepository::new(db.clone());
    let existing = common::product(&db).await;

    let err = repo
        .create(CreateProductInput {
            code: existing.code,
            name: "Dup".to_string(),
            description: None,
            unit_price: dec!(1),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_user_create_and_find() {
    let db = common::connect().await;
    let repo = UserRepository::new(db.clone());
    let email = format!("test-{}@example.com", Uuid::new_v4());

    let user = repo
        .create(NewUser {
            name: "Test User".to_string(),
            email: email.clone(),
            password_hash: "$argon2id$test_hash".to_string(),
            is_admin: false,
        })
        .await
        .expect("Failed to create user");

    let by_email = repo.find_by_email(&email).await.unwrap().unwrap();
    let by_id = repo.find_by_id(user.id).await.unwrap().unwrap();

    assert_eq!(by_email.id, user.id);
    assert_eq!(by_id.email, email);
    assert!(!by_id.is_admin);
}
