//! PostgreSQL store adapter.

use async_trait::async_trait;
use sqlx::PgPool;

use billing_types::{Customer, CustomerId, Payment, PaymentId, RepoError};
use billing_types::{CustomerStore, PaymentStore};

use crate::types::{DbCustomer, DbPayment};

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL store implementation.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/postgres/0001_create_customers.sql"),
        "0001",
    )
    .await?;

    execute_migration(
        pool,
        include_str!("../migrations/postgres/0002_create_payments.sql"),
        "0002",
    )
    .await?;

    Ok(())
}

impl PostgresRepo {
    /// Creates a new PostgreSQL store with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
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
impl CustomerStore for PostgresRepo {
    async fn find_by_phone_number(
        &self,
        phone_number: &str,
    ) -> Result<Option<Customer>, RepoError> {
        let row: Option<DbCustomer> = sqlx::query_as(
            r#"SELECT id, name, phone_number, created_at FROM customers WHERE phone_number = $1"#,
        )
        .bind(phone_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(DbCustomer::into_domain).transpose()
    }

    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepoError> {
        let row: Option<DbCustomer> = sqlx::query_as(
            r#"SELECT id, name, phone_number, created_at FROM customers WHERE id = $1"#,
        )
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(DbCustomer::into_domain).transpose()
    }

    async fn save(&self, customer: Customer) -> Result<Customer, RepoError> {
        sqlx::query(
            r#"INSERT INTO customers (id, name, phone_number, created_at) VALUES ($1, $2, $3, $4)"#,
        )
        .bind(customer.id.into_uuid())
        .bind(&customer.name)
        .bind(&customer.phone_number)
        .bind(customer.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(customer)
    }
}

#[async_trait]
impl PaymentStore for PostgresRepo {
    async fn save(&self, payment: Payment) -> Result<Payment, RepoError> {
        let currency_str = payment.currency.to_string();

        let (id,): (i64,) = sqlx::query_as(
            r#"INSERT INTO payments (customer_id, amount, currency, source, description, created_at)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING id"#,
        )
        .bind(payment.customer_id.into_uuid())
        .bind(payment.amount)
        .bind(&currency_str)
        .bind(&payment.source)
        .bind(&payment.description)
        .bind(payment.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(Payment {
            id: Some(PaymentId::from_i64(id)),
            ..payment
        })
    }

    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>, RepoError> {
        let row: Option<DbPayment> = sqlx::query_as(
            r#"SELECT id, customer_id, amount, currency, source, description, created_at
               FROM payments WHERE id = $1"#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(DbPayment::into_domain).transpose()
    }
}
