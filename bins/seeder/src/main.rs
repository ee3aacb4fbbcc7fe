//! Database seeder for Bizdesk development and testing.
//!
//! Seeds an administrator account plus a small catalog, one customer and
//! one salesman so budgets can be created right away. Running it twice is
//! harmless: records that already exist are skipped.
//!
//! Usage: cargo run --bin seeder
//!
//! The admin credentials default to `admin@bizdesk.dev` / `admin123` and can
//! be overridden with `SEED_ADMIN_EMAIL` and `SEED_ADMIN_PASSWORD`.

use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bizdesk_core::auth::{CreateUserInput, UserService};
use bizdesk_core::catalog::{
    AdditionalItemService, CreateAdditionalItemInput, CreateProductInput, ProductService,
};
use bizdesk_core::customer::{CreateCustomerInput, CustomerService};
use bizdesk_core::salesman::{CreateSalesmanInput, SalesmanService};
use bizdesk_db::{
    AdditionalItemRepository, CustomerRepository, ProductRepository, SalesmanRepository,
    UserRepository,
};
use bizdesk_shared::{AppError, AppResult, JwtConfig, JwtService};

/// Sample products: code, name, unit price in cents.
const PRODUCTS: [(&str, &str, i64); 3] = [
    ("CHAIR-01", "Office chair", 34_990),
    ("DESK-01", "Standing desk", 129_900),
    ("LAMP-01", "Desk lamp", 4_550),
];

/// Sample additional items: code, name, size.
const ADDITIONAL_ITEMS: [(&str, &str, Option<&str>); 2] = [
    ("ASSEMBLY", "On-site assembly", None),
    ("MAT-01", "Floor protection mat", Some("1.2m x 0.9m")),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seeder=info,bizdesk=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    info!("Connecting to database...");
    let db = bizdesk_db::connect(&database_url).await?;

    seed_admin(&db).await?;
    seed_customer(&db).await?;
    seed_salesman(&db).await?;
    seed_products(&db).await?;
    seed_additional_items(&db).await?;

    info!("Seeding complete!");
    Ok(())
}

/// Treats `Conflict` as "already seeded".
fn skip_existing<T>(what: &str, result: AppResult<T>) -> AppResult<()> {
    match result {
        Ok(_) => {
            info!("  Created {what}");
            Ok(())
        }
        Err(AppError::Conflict(_)) => {
            info!("  {what} already exists, skipping...");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

async fn seed_admin(db: &DatabaseConnection) -> AppResult<()> {
    info!("Seeding admin user...");

    let email = std::env::var("SEED_ADMIN_EMAIL").unwrap_or_else(|_| "admin@bizdesk.dev".into());
    let password = std::env::var("SEED_ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".into());

    let users = UserService::new(
        Arc::new(UserRepository::new(db.clone())),
        Arc::new(JwtService::new(JwtConfig::default())),
    );
    let result = users
        .create_user(CreateUserInput {
            name: "Administrator".to_string(),
            email: email.clone(),
            password,
            is_admin: true,
        })
        .await;

    skip_existing(&format!("admin {email}"), result)
}

async fn seed_customer(db: &DatabaseConnection) -> AppResult<()> {
    info!("Seeding customer...");

    let customers = CustomerService::new(Arc::new(CustomerRepository::new(db.clone())));
    let result = customers
        .create_customer(CreateCustomerInput {
            name: "Acme Interiors".to_string(),
            document: "12345678000190".to_string(),
            email: Some("purchasing@acme.test".to_string()),
            phone: Some("+55 11 4000-1000".to_string()),
            address: Some("1 Industrial Ave".to_string()),
        })
        .await;

    skip_existing("customer Acme Interiors", result)
}

async fn seed_salesman(db: &DatabaseConnection) -> AppResult<()> {
    info!("Seeding salesman...");

    let salesmen = SalesmanService::new(Arc::new(SalesmanRepository::new(db.clone())));
    let result = salesmen
        .create_salesman(CreateSalesmanInput {
            name: "Rita Sales".to_string(),
            email: "rita@bizdesk.dev".to_string(),
            phone: None,
        })
        .await;

    skip_existing("salesman rita@bizdesk.dev", result)
}

async fn seed_products(db: &DatabaseConnection) -> AppResult<()> {
    info!("Seeding products...");

    let products = ProductService::new(Arc::new(ProductRepository::new(db.clone())));
    for (code, name, cents) in PRODUCTS {
        let result = products
            .create_product(CreateProductInput {
                code: code.to_string(),
                name: name.to_string(),
                description: None,
                unit_price: Decimal::new(cents, 2),
            })
            .await;

        skip_existing(&format!("product {code}"), result)?;
    }

    Ok(())
}

async fn seed_additional_items(db: &DatabaseConnection) -> AppResult<()> {
    info!("Seeding additional items...");

    let items = AdditionalItemService::new(Arc::new(AdditionalItemRepository::new(db.clone())));
    for (code, name, size) in ADDITIONAL_ITEMS {
        let result = items
            .create_item(CreateAdditionalItemInput {
                code: code.to_string(),
                name: name.to_string(),
                size: size.map(str::to_string),
                description: None,
            })
            .await;

        skip_existing(&format!("additional item {code}"), result)?;
    }

    Ok(())
}
