pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use crate::models::employee::Employee;

pub use memory::MemoryEmployeeStore;
pub use postgres::PgEmployeeStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Another row already holds this email.
    #[error("email {0} is already in use")]
    DuplicateEmail(String),
    /// An update targeted a row that is gone.
    #[error("no employee row with id {0}")]
    NotFound(i64),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Single-table persistence for employees, keyed by a numeric id.
///
/// `save` inserts when `id` is `None` and overwrites otherwise; the store owns
/// `id`, `created_at` and `updated_at`. Every implementation must refuse a
/// write that would leave two rows sharing an email.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn save(&self, employee: Employee) -> Result<Employee, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Employee>, StoreError>;

    /// Ordered by ascending id.
    async fn find_all(&self) -> Result<Vec<Employee>, StoreError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError>;

    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError>;
}
