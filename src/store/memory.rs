use std::collections::BTreeMap;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use crate::models::employee::Employee;
use super::{EmployeeStore, StoreError};

#[derive(Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, Employee>,
}

impl Table {
    fn email_owner(&self, email: &str) -> Option<i64> {
        self.rows.values()
            .find(|row| row.email == email)
            .and_then(|row| row.id)
    }
}

/// Process-local store used when no database is configured.
#[derive(Default)]
pub struct MemoryEmployeeStore {
    table: RwLock<Table>,
}

impl MemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmployeeStore for MemoryEmployeeStore {
    async fn save(&self, mut employee: Employee) -> Result<Employee, StoreError> {
        let mut table = self.table.write().await;
        let now = Utc::now();

        match employee.id {
            None => {
                if table.email_owner(&employee.email).is_some() {
                    return Err(StoreError::DuplicateEmail(employee.email));
                }
                table.next_id += 1;
                let id = table.next_id;
                employee.id = Some(id);
                employee.created_at = Some(now);
                employee.updated_at = Some(now);
                table.rows.insert(id, employee.clone());
                Ok(employee)
            }
            Some(id) => {
                if !table.rows.contains_key(&id) {
                    return Err(StoreError::NotFound(id));
                }
                if matches!(table.email_owner(&employee.email), Some(owner) if owner != id) {
                    return Err(StoreError::DuplicateEmail(employee.email));
                }
                let row = table.rows.get_mut(&id).ok_or(StoreError::NotFound(id))?;
                row.first_name = employee.first_name;
                row.last_name = employee.last_name;
                row.email = employee.email;
                row.department = employee.department;
                row.position = employee.position;
                // never move updated_at backwards, even if the clock does
                row.updated_at = Some(row.updated_at.map_or(now, |prev| prev.max(now)));
                Ok(row.clone())
            }
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Employee>, StoreError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Employee>, StoreError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.table.read().await.email_owner(email).is_some())
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.table.read().await.rows.contains_key(&id))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        self.table.write().await.rows.remove(&id);
        Ok(())
    }
}
