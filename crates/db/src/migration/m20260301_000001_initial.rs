//! Initial database migration.
//!
//! Creates the registry tables (users, customers, salesmen, catalog), the
//! budgets table with its two line item tables, and the `updated_at` trigger.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: REGISTRY
        // ============================================================
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(CUSTOMERS_SQL).await?;
        db.execute_unprepared(SALESMEN_SQL).await?;

        // ============================================================
        // PART 2: CATALOG
        // ============================================================
        db.execute_unprepared(PRODUCTS_SQL).await?;
        db.execute_unprepared(ADDITIONAL_ITEMS_SQL).await?;

        // ============================================================
        // PART 3: BUDGETS
        // ============================================================
        db.execute_unprepared(BUDGETS_SQL).await?;
        db.execute_unprepared(BUDGET_PRODUCTS_SQL).await?;
        db.execute_unprepared(BUDGET_ADDITIONAL_ITEMS_SQL).await?;

        // ============================================================
        // PART 4: TRIGGERS
        // ============================================================
        db.execute_unprepared(UPDATED_AT_TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    is_admin BOOLEAN NOT NULL DEFAULT false,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const CUSTOMERS_SQL: &str = r"
CREATE TABLE customers (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    document VARCHAR(32) NOT NULL UNIQUE,
    email VARCHAR(255),
    phone VARCHAR(32),
    address TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_customers_name ON customers(name);
";

const SALESMEN_SQL: &str = r"
CREATE TABLE salesmen (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL UNIQUE,
    phone VARCHAR(32),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const PRODUCTS_SQL: &str = r"
CREATE TABLE products (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    code VARCHAR(64) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    description TEXT,
    unit_price NUMERIC(19, 4) NOT NULL DEFAULT 0,
    images JSONB NOT NULL DEFAULT '[]',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_product_price CHECK (unit_price >= 0)
);
";

const ADDITIONAL_ITEMS_SQL: &str = r"
CREATE TABLE additional_items (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    code VARCHAR(64) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    size VARCHAR(64),
    description TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

// budgets.code UNIQUE closes the race between the code check and the insert.
const BUDGETS_SQL: &str = r"
CREATE TABLE budgets (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    code VARCHAR(64) NOT NULL UNIQUE,
    customer_id UUID NOT NULL REFERENCES customers(id) ON DELETE RESTRICT,
    salesman_id UUID NOT NULL REFERENCES salesmen(id) ON DELETE RESTRICT,
    description TEXT,
    total_value NUMERIC(19, 4) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_budgets_customer ON budgets(customer_id);
CREATE INDEX idx_budgets_salesman ON budgets(salesman_id);
CREATE INDEX idx_budgets_created ON budgets(created_at DESC);
";

const BUDGET_PRODUCTS_SQL: &str = r"
CREATE TABLE budget_products (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    budget_id UUID NOT NULL REFERENCES budgets(id) ON DELETE CASCADE,
    product_id UUID NOT NULL REFERENCES products(id) ON DELETE RESTRICT,
    position INTEGER NOT NULL,
    unit_price NUMERIC(19, 4) NOT NULL,
    quantity INTEGER NOT NULL,
    discount NUMERIC(5, 4) NOT NULL DEFAULT 0,
    total_price NUMERIC(19, 4) NOT NULL,
    CONSTRAINT uq_budget_products_position UNIQUE (budget_id, position),
    CONSTRAINT chk_budget_products_quantity CHECK (quantity > 0),
    CONSTRAINT chk_budget_products_discount CHECK (discount BETWEEN 0 AND 1)
);
";

const BUDGET_ADDITIONAL_ITEMS_SQL: &str = r"
CREATE TABLE budget_additional_items (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    budget_id UUID NOT NULL REFERENCES budgets(id) ON DELETE CASCADE,
    additional_item_id UUID NOT NULL REFERENCES additional_items(id) ON DELETE RESTRICT,
    position INTEGER NOT NULL,
    unit_price NUMERIC(19, 4) NOT NULL,
    quantity INTEGER NOT NULL,
    discount NUMERIC(5, 4) NOT NULL DEFAULT 0,
    total_price NUMERIC(19, 4) NOT NULL,
    CONSTRAINT uq_budget_additional_items_position UNIQUE (budget_id, position),
    CONSTRAINT chk_budget_additional_items_quantity CHECK (quantity > 0),
    CONSTRAINT chk_budget_additional_items_discount CHECK (discount BETWEEN 0 AND 1)
);
";

const UPDATED_AT_TRIGGERS_SQL: &str = r"
CREATE OR REPLACE FUNCTION set_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = now();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_users_updated_at BEFORE UPDATE ON users
FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_customers_updated_at BEFORE UPDATE ON customers
FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_salesmen_updated_at BEFORE UPDATE ON salesmen
FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_products_updated_at BEFORE UPDATE ON products
FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_additional_items_updated_at BEFORE UPDATE ON additional_items
FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_budgets_updated_at BEFORE UPDATE ON budgets
FOR EACH ROW EXECUTE FUNCTION set_updated_at();
";

const DROP_ALL_SQL: &str = r"
-- ============================================================
-- DROP ALL: Rollback migration
-- Order matters due to foreign key constraints
-- ============================================================

DROP TABLE IF EXISTS budget_additional_items CASCADE;
DROP TABLE IF EXISTS budget_products CASCADE;
DROP TABLE IF EXISTS budgets CASCADE;
DROP TABLE IF EXISTS additional_items CASCADE;
DROP TABLE IF EXISTS products CASCADE;
DROP TABLE IF EXISTS salesmen CASCADE;
DROP TABLE IF EXISTS customers CASCADE;
DROP TABLE IF EXISTS users CASCADE;

DROP FUNCTION IF EXISTS set_updated_at();
";
