use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use crate::models::employee::Employee;
use super::{EmployeeStore, StoreError};

const COLUMNS: &str =
    "id, first_name, last_name, email, department, position, created_at, updated_at";

pub struct PgEmployeeStore {
    pool: PgPool,
}

impl PgEmployeeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// The `employees_email_key` constraint is what actually keeps emails unique
/// when two writers race past the service's existence check.
fn map_write_error(err: sqlx::Error, email: &str) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::DuplicateEmail(email.to_string())
        }
        _ => StoreError::Database(err),
    }
}

#[async_trait]
impl EmployeeStore for PgEmployeeStore {
    async fn save(&self, employee: Employee) -> Result<Employee, StoreError> {
        let now = Utc::now();

        match employee.id {
            None => {
                let sql = format!(
                    "INSERT INTO employees (first_name, last_name, email, department, position, created_at, updated_at) \
                     VALUES ($1, $2, $3, $4, $5, $6, $6) RETURNING {}",
                    COLUMNS
                );
                sqlx::query_as::<_, Employee>(&sql)
                    .bind(&employee.first_name)
                    .bind(&employee.last_name)
                    .bind(&employee.email)
                    .bind(&employee.department)
                    .bind(&employee.position)
                    .bind(now)
                    .fetch_one(&self.pool)
                    .await
                    .map_err(|err| map_write_error(err, &employee.email))
            }
            Some(id) => {
                let sql = format!(
                    "UPDATE employees SET first_name = $1, last_name = $2, email = $3, department = $4, \
                     position = $5, updated_at = GREATEST(updated_at, $6) WHERE id = $7 RETURNING {}",
                    COLUMNS
                );
                sqlx::query_as::<_, Employee>(&sql)
                    .bind(&employee.first_name)
                    .bind(&employee.last_name)
                    .bind(&employee.email)
                    .bind(&employee.department)
                    .bind(&employee.position)
                    .bind(now)
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(|err| map_write_error(err, &employee.email))?
                    .ok_or(StoreError::NotFound(id))
            }
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Employee>, StoreError> {
        let sql = format!("SELECT {} FROM employees WHERE id = $1", COLUMNS);
        let employee = sqlx::query_as::<_, Employee>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(employee)
    }

    async fn find_all(&self) -> Result<Vec<Employee>, StoreError> {
        let sql = format!("SELECT {} FROM employees ORDER BY id", COLUMNS);
        let employees = sqlx::query_as::<_, Employee>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(employees)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM employees WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM employees WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
