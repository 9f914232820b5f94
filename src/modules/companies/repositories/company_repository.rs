use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use crate::core::{AppError, Result};
use crate::modules::companies::models::{Company, CompanyRow, NewPackage, Package, PackageRow};
use crate::modules::vat::services::vat_calculator::validate_percent;

/// Companies and their packages
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Look a company up by its unique name
    async fn find_by_name(&self, name: &str) -> Result<Option<Company>>;

    /// Packages of a company in insertion order
    async fn list_packages(&self, company_id: i64) -> Result<Vec<Package>>;

    async fn create_company(&self, name: &str, vat_rate: Decimal) -> Result<Company>;

    async fn add_package(&self, company_id: i64, package: &NewPackage) -> Result<()>;
}

pub struct SqliteCompanyRepository {
    pool: SqlitePool,
}

impl SqliteCompanyRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create `companies` and `packages` if they do not exist yet
    pub async fn ensure_schema(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS companies (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                vat_rate TEXT NOT NULL
            )
            "#,
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS packages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                company_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                price TEXT NOT NULL,
                quantity INTEGER NOT NULL,
                FOREIGN KEY (company_id) REFERENCES companies (id)
            )
            "#,
        )
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl CompanyRepository for SqliteCompanyRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Company>> {
        let mut conn = self.pool.acquire().await?;

        let row = sqlx::query_as::<_, CompanyRow>(
            "SELECT id, name, vat_rate FROM companies WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;

        row.map(CompanyRow::into_company).transpose()
    }

    async fn list_packages(&self, company_id: i64) -> Result<Vec<Package>> {
        let mut conn = self.pool.acquire().await?;

        sqlx::query_as::<_, PackageRow>(
            r#"
            SELECT name, price, quantity
            FROM packages
            WHERE company_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(company_id)
        .fetch_all(&mut *conn)
        .await?
        .into_iter()
        .map(PackageRow::into_package)
        .collect()
    }

    async fn create_company(&self, name: &str, vat_rate: Decimal) -> Result<Company> {
        Company::validate_name(name)?;
        validate_percent(vat_rate)?;

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("INSERT INTO companies (name, vat_rate) VALUES (?, ?)")
            .bind(name)
            .bind(vat_rate.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        return AppError::validation(format!(
                            "Company '{}' already exists",
                            name
                        ));
                    }
                }
                AppError::Database(e)
            })?;

        tx.commit().await?;

        Ok(Company {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            vat_rate,
        })
    }

    async fn add_package(&self, company_id: i64, package: &NewPackage) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO packages (company_id, name, price, quantity)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(company_id)
        .bind(&package.name)
        .bind(package.price.to_string())
        .bind(package.quantity)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return AppError::not_found(format!("Company id {}", company_id));
                }
            }
            AppError::Database(e)
        })?;

        tx.commit().await?;
        Ok(())
    }
}
