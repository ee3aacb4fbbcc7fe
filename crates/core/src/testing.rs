//! In-memory repositories for service tests.

#![allow(missing_docs)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use bizdesk_shared::{AppError, AppResult};
use bizdesk_shared::types::PageRequest;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::auth::{NewUser, User, UserRepository};
use crate::budget::{Budget, BudgetRepository, NewBudget};
use crate::catalog::{
    AdditionalItem, AdditionalItemRepository, CreateAdditionalItemInput, CreateProductInput,
    Product, ProductRepository,
};
use crate::customer::{CreateCustomerInput, Customer, CustomerRepository};
use crate::salesman::{CreateSalesmanInput, Salesman, SalesmanRepository};

fn page_of<T: Clone>(rows: &[T], page: &PageRequest) -> (Vec<T>, u64) {
    let total = rows.len() as u64;
    let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
    (rows.iter().skip(offset).take(limit).cloned().collect(), total)
}

fn replace<T: Clone>(rows: &Mutex<Vec<T>>, value: &T, same: impl Fn(&T) -> bool) -> T {
    let mut rows = rows.lock().unwrap();
    if let Some(row) = rows.iter_mut().find(|r| same(r)) {
        *row = value.clone();
    }
    value.clone()
}

fn remove<T>(rows: &Mutex<Vec<T>>, same: impl Fn(&T) -> bool) -> bool {
    let mut rows = rows.lock().unwrap();
    let before = rows.len();
    rows.retain(|r| !same(r));
    rows.len() != before
}

/// Budget repository calls that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetCall {
    FindByCode,
    Create,
    Save,
}

/// Budget store that records every write.
#[derive(Default)]
pub struct MockBudgetRepository {
    pub budgets: Mutex<Vec<Budget>>,
    pub created: Mutex<Vec<NewBudget>>,
    pub saved: Mutex<Vec<Budget>>,
    pub failing: Mutex<Option<BudgetCall>>,
}

impl MockBudgetRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose `call` returns a database error.
    pub fn failing_on(call: BudgetCall) -> Self {
        let repo = Self::new();
        *repo.failing.lock().unwrap() = Some(call);
        repo
    }

    fn check(&self, call: BudgetCall) -> AppResult<()> {
        if *self.failing.lock().unwrap() == Some(call) {
            return Err(AppError::Database(format!("{call:?} failed")));
        }
        Ok(())
    }

    /// Seeds a stored budget with the given code.
    pub fn with_code(code: &str) -> Self {
        let repo = Self::new();
        repo.budgets.lock().unwrap().push(Budget {
            id: Uuid::new_v4(),
            code: code.to_string(),
            customer_id: Uuid::new_v4(),
            salesman_id: Uuid::new_v4(),
            description: None,
            products: Vec::new(),
            additional_items: Vec::new(),
            total_value: Decimal::ZERO,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });
        repo
    }

    pub fn create_calls(&self) -> usize {
        self.created.lock().unwrap().len()
    }

    pub fn save_calls(&self) -> usize {
        self.saved.lock().unwrap().len()
    }
}

impl BudgetRepository for MockBudgetRepository {
    async fn find_by_code(&self, code: &str) -> AppResult<Option<Budget>> {
        self.check(BudgetCall::FindByCode)?;
        Ok(self
            .budgets
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.code == code)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Budget>> {
        Ok(self
            .budgets
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned())
    }

    async fn create(&self, input: NewBudget) -> AppResult<Budget> {
        self.check(BudgetCall::Create)?;
        self.created.lock().unwrap().push(input.clone());
        let budget = Budget {
            id: Uuid::new_v4(),
            code: input.code,
            customer_id: input.customer_id,
            salesman_id: input.salesman_id,
            description: input.description,
            products: input.products,
            additional_items: input.additional_items,
            total_value: Decimal::ZERO,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.budgets.lock().unwrap().push(budget.clone());
        Ok(budget)
    }

    async fn save(&self, budget: &Budget) -> AppResult<()> {
        self.check(BudgetCall::Save)?;
        self.saved.lock().unwrap().push(budget.clone());
        replace(&self.budgets, budget, |b| b.id == budget.id);
        Ok(())
    }

    async fn list(&self, page: &PageRequest) -> AppResult<(Vec<Budget>, u64)> {
        let mut rows = self.budgets.lock().unwrap().clone();
        rows.reverse();
        Ok(page_of(&rows, page))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(remove(&self.budgets, |b| b.id == id))
    }
}

/// Customer store counting `find_by_id` lookups.
#[derive(Default)]
pub struct MockCustomerRepository {
    pub customers: Mutex<Vec<Customer>>,
    pub lookups: AtomicUsize,
}

impl MockCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a customer directly, bypassing the service.
    pub fn insert(&self, name: &str) -> Customer {
        let customer = Customer {
            id: Uuid::new_v4(),
            name: name.to_string(),
            document: Uuid::new_v4().simple().to_string(),
            email: None,
            phone: None,
            address: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.customers.lock().unwrap().push(customer.clone());
        customer
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl CustomerRepository for MockCustomerRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Customer>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .customers
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn find_by_document(&self, document: &str) -> AppResult<Option<Customer>> {
        Ok(self
            .customers
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.document == document)
            .cloned())
    }

    async fn create(&self, input: CreateCustomerInput) -> AppResult<Customer> {
        let customer = Customer {
            id: Uuid::new_v4(),
            name: input.name,
            document: input.document,
            email: input.email,
            phone: input.phone,
            address: input.address,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.customers.lock().unwrap().push(customer.clone());
        Ok(customer)
    }

    async fn update(&self, customer: &Customer) -> AppResult<Customer> {
        Ok(replace(&self.customers, customer, |c| c.id == customer.id))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(remove(&self.customers, |c| c.id == id))
    }
}

/// Salesman store counting `find_by_id` lookups.
#[derive(Default)]
pub struct MockSalesmanRepository {
    pub salesmen: Mutex<Vec<Salesman>>,
    pub lookups: AtomicUsize,
}

impl MockSalesmanRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a salesman directly, bypassing the service.
    pub fn insert(&self, name: &str) -> Salesman {
        let salesman = Salesman {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: format!("{}@shop.test", Uuid::new_v4().simple()),
            phone: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.salesmen.lock().unwrap().push(salesman.clone());
        salesman
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl SalesmanRepository for MockSalesmanRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Salesman>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .salesmen
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Salesman>> {
        Ok(self
            .salesmen
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.email == email)
            .cloned())
    }

    async fn create(&self, input: CreateSalesmanInput) -> AppResult<Salesman> {
        let salesman = Salesman {
            id: Uuid::new_v4(),
            name: input.name,
            email: input.email,
            phone: input.phone,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.salesmen.lock().unwrap().push(salesman.clone());
        Ok(salesman)
    }

    async fn update(&self, salesman: &Salesman) -> AppResult<Salesman> {
        Ok(replace(&self.salesmen, salesman, |s| s.id == salesman.id))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(remove(&self.salesmen, |s| s.id == id))
    }

    async fn list(&self, page: &PageRequest) -> AppResult<(Vec<Salesman>, u64)> {
        Ok(page_of(&self.salesmen.lock().unwrap(), page))
    }
}

#[derive(Default)]
pub struct MockProductRepository {
    pub products: Mutex<Vec<Product>>,
}

impl MockProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProductRepository for MockProductRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn find_by_code(&self, code: &str) -> AppResult<Option<Product>> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.code == code)
            .cloned())
    }

    async fn create(&self, input: CreateProductInput) -> AppResult<Product> {
        let product = Product {
            id: Uuid::new_v4(),
            code: input.code,
            name: input.name,
            description: input.description,
            unit_price: input.unit_price,
            images: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.products.lock().unwrap().push(product.clone());
        Ok(product)
    }

    async fn update(&self, product: &Product) -> AppResult<Product> {
        Ok(replace(&self.products, product, |p| p.id == product.id))
    }

    async fn append_images(&self, id: Uuid, file_names: &[String]) -> AppResult<Option<Product>> {
        let mut products = self.products.lock().unwrap();
        Ok(products.iter_mut().find(|p| p.id == id).map(|product| {
            product.images.extend_from_slice(file_names);
            product.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(remove(&self.products, |p| p.id == id))
    }

    async fn list(&self, page: &PageRequest) -> AppResult<(Vec<Product>, u64)> {
        Ok(page_of(&self.products.lock().unwrap(), page))
    }
}

#[derive(Default)]
pub struct MockAdditionalItemRepository {
    pub items: Mutex<Vec<AdditionalItem>>,
}

impl MockAdditionalItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AdditionalItemRepository for MockAdditionalItemRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<AdditionalItem>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id == id)
            .cloned())
    }

    async fn find_by_code(&self, code: &str) -> AppResult<Option<AdditionalItem>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.code == code)
            .cloned())
    }

    async fn create(&self, input: CreateAdditionalItemInput) -> AppResult<AdditionalItem> {
        let item = AdditionalItem {
            id: Uuid::new_v4(),
            code: input.code,
            name: input.name,
            size: input.size,
            description: input.description,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.items.lock().unwrap().push(item.clone());
        Ok(item)
    }

    async fn update(&self, item: &AdditionalItem) -> AppResult<AdditionalItem> {
        Ok(replace(&self.items, item, |i| i.id == item.id))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(remove(&self.items, |i| i.id == id))
    }

    async fn list(&self, page: &PageRequest) -> AppResult<(Vec<AdditionalItem>, u64)> {
        Ok(page_of(&self.items.lock().unwrap(), page))
    }
}

#[derive(Default)]
pub struct MockUserRepository {
    pub users: Mutex<Vec<User>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn create(&self, input: NewUser) -> AppResult<User> {
        let user = User {
            id: Uuid::new_v4(),
            name: input.name,
            email: input.email,
            password_hash: input.password_hash,
            is_admin: input.is_admin,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }
}
