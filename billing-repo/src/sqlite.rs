//! SQLite store adapter.

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::str::FromStr;

use billing_types::{Customer, CustomerId, Payment, PaymentId, RepoError};
use billing_types::{CustomerStore, PaymentStore};

use crate::types::{DbCustomer, DbPayment};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite store implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite store with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        // Run migration from migration files
        let ddl = include_str!("../migrations/sqlite/0001_create_customers.sql");
        sqlx::query(ddl).execute(&pool).await?;

        let ddl_payments = include_str!("../migrations/sqlite/0002_create_payments.sql");
        sqlx::query(ddl_payments).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn map_sqlx_error(e: sqlx::Error) -> RepoError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return RepoError::Conflict(db.message().to_string());
        }
    }
    RepoError::Database(e.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Store implementations
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl CustomerStore for SqliteRepo {
    async fn find_by_phone_number(
        &self,
        phone_number: &str,
    ) -> Result<Option<Customer>, RepoError> {
        let row: Option<DbCustomer> = sqlx::query_as(
            r#"SELECT id, name, phone_number, created_at FROM customers WHERE phone_number = ?"#,
        )
        .bind(phone_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(DbCustomer::into_domain).transpose()
    }

    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepoError> {
        let id_str = id.to_string();

        let row: Option<DbCustomer> = sqlx::query_as(
            r#"SELECT id, name, phone_number, created_at FROM customers WHERE id = ?"#,
        )
        .bind(&id_str)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(DbCustomer::into_domain).transpose()
    }

    async fn save(&self, customer: Customer) -> Result<Customer, RepoError> {
        let id_str = customer.id.to_string();
        let created_at_str = customer.created_at.to_rfc3339();

        sqlx::query(
            r#"INSERT INTO customers (id, name, phone_number, created_at) VALUES (?, ?, ?, ?)"#,
        )
        .bind(&id_str)
        .bind(&customer.name)
        .bind(&customer.phone_number)
        .bind(&created_at_str)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(customer)
    }
}

#[async_trait]
impl PaymentStore for SqliteRepo {
    async fn save(&self, payment: Payment) -> Result<Payment, RepoError> {
        let customer_id_str = payment.customer_id.to_string();
        // Text storage keeps the exact decimal scale (e.g. "100.00").
        let amount_str = payment.amount.to_string();
        let currency_str = payment.currency.to_string();
        let created_at_str = payment.created_at.to_rfc3339();

        let result = sqlx::query(
            r#"INSERT INTO payments (customer_id, amount, currency, source, description, created_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&customer_id_str)
        .bind(&amount_str)
        .bind(&currency_str)
        .bind(&payment.source)
        .bind(&payment.description)
        .bind(&created_at_str)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let id = PaymentId::from_i64(result.last_insert_rowid());

        Ok(Payment {
            id: Some(id),
            ..payment
        })
    }

    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>, RepoError> {
        let row: Option<DbPayment> = sqlx::query_as(
            r#"SELECT id, customer_id, amount, currency, source, description, created_at
               FROM payments WHERE id = ?"#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(DbPayment::into_domain).transpose()
    }
}
