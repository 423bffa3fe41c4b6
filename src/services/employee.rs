use std::sync::Arc;
use log::info;
use crate::errors::AppError;
use crate::models::employee::{Employee, EmployeeRequest, EmployeeResponse};
use crate::store::EmployeeStore;

/// Email uniqueness is checked up front so the common conflict never costs a
/// write; the store's own uniqueness guard covers the race between the check
/// and the write.
pub struct EmployeeService {
    store: Arc<dyn EmployeeStore>,
}

impl EmployeeService {
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, request: &EmployeeRequest) -> Result<EmployeeResponse, AppError> {
        info!("Creating new employee with email: {}", request.email);

        if self.store.exists_by_email(&request.email).await? {
            return Err(AppError::email_taken(&request.email));
        }

        let saved = self.store.save(Employee::from_request(request)).await?;
        if let Some(id) = saved.id {
            info!("Successfully created employee with ID: {}", id);
        }

        Ok(map_to_response(&saved))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<EmployeeResponse, AppError> {
        info!("Fetching employee with ID: {}", id);

        let employee = self.store.find_by_id(id).await?
            .ok_or_else(|| AppError::employee_not_found(id))?;

        Ok(map_to_response(&employee))
    }

    pub async fn get_all(&self) -> Result<Vec<EmployeeResponse>, AppError> {
        info!("Fetching all employees");

        let employees = self.store.find_all().await?;
        Ok(employees.iter().map(map_to_response).collect())
    }

    pub async fn update(&self, id: i64, request: &EmployeeRequest) -> Result<EmployeeResponse, AppError> {
        info!("Updating employee with ID: {}", id);

        let mut employee = self.store.find_by_id(id).await?
            .ok_or_else(|| AppError::employee_not_found(id))?;

        if employee.email != request.email && self.store.exists_by_email(&request.email).await? {
            return Err(AppError::email_taken(&request.email));
        }

        employee.apply(request);
        let updated = self.store.save(employee).await?;
        info!("Successfully updated employee with ID: {}", id);

        Ok(map_to_response(&updated))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        info!("Deleting employee with ID: {}", id);

        if !self.store.exists_by_id(id).await? {
            return Err(AppError::employee_not_found(id));
        }

        self.store.delete_by_id(id).await?;
        info!("Successfully deleted employee with ID: {}", id);
        Ok(())
    }
}

pub fn map_to_response(employee: &Employee) -> EmployeeResponse {
    EmployeeResponse {
        id: employee.id,
        first_name: employee.first_name.clone(),
        last_name: employee.last_name.clone(),
        email: employee.email.clone(),
        department: employee.department.clone(),
        position: employee.position.clone(),
        created_at: employee.created_at,
        updated_at: employee.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use async_trait::async_trait;
    use crate::store::{MemoryEmployeeStore, StoreError};

    /// Memory store that counts writes.
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryEmployeeStore,
        saves: AtomicUsize,
        deletes: AtomicUsize,
    }

    #[async_trait]
    impl EmployeeStore for CountingStore {
        async fn save(&self, employee: Employee) -> Result<Employee, StoreError> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            self.inner.save(employee).await
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Employee>, StoreError> {
            self.inner.find_by_id(id).await
        }

        async fn find_all(&self) -> Result<Vec<Employee>, StoreError> {
            self.inner.find_all().await
        }

        async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
            self.inner.exists_by_email(email).await
        }

        async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError> {
            self.inner.exists_by_id(id).await
        }

        async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
            self.deletes.fetch_add(1, Ordering::SeqCst);
            self.inner.delete_by_id(id).await
        }
    }

    /// Claims every email is free, so only the store's own guard can object.
    struct BlindPrecheckStore(MemoryEmployeeStore);

    #[async_trait]
    impl EmployeeStore for BlindPrecheckStore {
        async fn save(&self, employee: Employee) -> Result<Employee, StoreError> {
            self.0.save(employee).await
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Employee>, StoreError> {
            self.0.find_by_id(id).await
        }

        async fn find_all(&self) -> Result<Vec<Employee>, StoreError> {
            self.0.find_all().await
        }

        async fn exists_by_email(&self, _email: &str) -> Result<bool, StoreError> {
            Ok(false)
        }

        async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError> {
            self.0.exists_by_id(id).await
        }

        async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
            self.0.delete_by_id(id).await
        }
    }

    fn setup() -> (Arc<CountingStore>, EmployeeService) {
        let store = Arc::new(CountingStore::default());
        let service = EmployeeService::new(store.clone());
        (store, service)
    }

    fn john() -> EmployeeRequest {
        EmployeeRequest {
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: "john.doe@example.com".into(),
            department: "Engineering".into(),
            position: "Software Engineer".into(),
        }
    }

    fn jane() -> EmployeeRequest {
        EmployeeRequest {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            email: "jane.doe@example.com".into(),
            department: "Marketing".into(),
            position: "Marketing Manager".into(),
        }
    }

    #[tokio::test]
    async fn create_echoes_input_with_new_id() {
        let (_, service) = setup();
        let created = service.create(&john()).await.unwrap();

        assert!(created.id.is_some());
        assert_eq!(created.first_name, "John");
        assert_eq!(created.last_name, "Doe");
        assert_eq!(created.email, "john.doe@example.com");
        assert_eq!(created.department, "Engineering");
        assert_eq!(created.position, "Software Engineer");
        assert!(created.created_at.is_some());
    }

    #[tokio::test]
    async fn create_with_taken_email_writes_nothing() {
        let (store, service) = setup();
        service.create(&john()).await.unwrap();
        assert_eq!(store.saves.load(Ordering::SeqCst), 1);

        let err = service.create(&john()).await.unwrap_err();
        assert!(matches!(err, AppError::AlreadyExists(ref msg) if msg.contains("john.doe@example.com")));
        assert_eq!(store.saves.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn store_guard_catches_what_precheck_misses() {
        let service = EmployeeService::new(Arc::new(BlindPrecheckStore(MemoryEmployeeStore::new())));
        service.create(&john()).await.unwrap();

        let err = service.create(&john()).await.unwrap_err();
        assert!(matches!(err, AppError::AlreadyExists(_)));
        assert_eq!(service.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let (_, service) = setup();
        let err = service.get_by_id(999).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref msg) if msg == "Employee not found with ID: 999"));
    }

    #[tokio::test]
    async fn get_returns_stored_employee() {
        let (_, service) = setup();
        let created = service.create(&john()).await.unwrap();

        let fetched = service.get_by_id(created.id.unwrap()).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn get_all_returns_every_created_employee() {
        let (_, service) = setup();
        assert!(service.get_all().await.unwrap().is_empty());

        let a = service.create(&john()).await.unwrap();
        let b = service.create(&jane()).await.unwrap();

        let all = service.get_all().await.unwrap();
        assert_eq!(all, vec![a, b]);
    }

    #[tokio::test]
    async fn update_replaces_fields_and_keeps_created_at() {
        let (_, service) = setup();
        let created = service.create(&john()).await.unwrap();
        let id = created.id.unwrap();

        let updated = service.update(id, &jane()).await.unwrap();

        assert_eq!(updated.id, Some(id));
        assert_eq!(updated.first_name, "Jane");
        assert_eq!(updated.email, "jane.doe@example.com");
        assert_eq!(updated.department, "Marketing");
        assert_eq!(updated.position, "Marketing Manager");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn update_keeping_own_email_is_not_a_conflict() {
        let (_, service) = setup();
        let id = service.create(&john()).await.unwrap().id.unwrap();

        let mut request = john();
        request.position = "Senior Software Engineer".into();
        let updated = service.update(id, &request).await.unwrap();
        assert_eq!(updated.position, "Senior Software Engineer");
    }

    #[tokio::test]
    async fn update_to_another_records_email_conflicts() {
        let (store, service) = setup();
        service.create(&john()).await.unwrap();
        let jane_id = service.create(&jane()).await.unwrap().id.unwrap();

        let mut request = jane();
        request.email = "john.doe@example.com".into();
        let err = service.update(jane_id, &request).await.unwrap_err();

        assert!(matches!(err, AppError::AlreadyExists(_)));
        assert_eq!(store.saves.load(Ordering::SeqCst), 2);
        let unchanged = service.get_by_id(jane_id).await.unwrap();
        assert_eq!(unchanged.email, "jane.doe@example.com");
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let (store, service) = setup();
        let err = service.update(5, &john()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(store.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let (store, service) = setup();
        let id = service.create(&john()).await.unwrap().id.unwrap();

        service.delete(id).await.unwrap();
        assert_eq!(store.deletes.load(Ordering::SeqCst), 1);
        assert!(matches!(service.get_by_id(id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_missing_is_not_found_and_deletes_nothing() {
        let (store, service) = setup();
        let err = service.delete(1).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref msg) if msg.contains('1')));
        assert_eq!(store.deletes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn map_to_response_projects_every_field() {
        let now = chrono::Utc::now();
        let employee = Employee {
            id: Some(3),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@x.com".into(),
            department: "Research".into(),
            position: "Analyst".into(),
            created_at: Some(now),
            updated_at: Some(now),
        };
        let response = map_to_response(&employee);
        assert_eq!(response.id, Some(3));
        assert_eq!(response.first_name, "Ada");
        assert_eq!(response.last_name, "Lovelace");
        assert_eq!(response.email, "ada@x.com");
        assert_eq!(response.department, "Research");
        assert_eq!(response.position, "Analyst");
        assert_eq!(response.created_at, Some(now));
        assert_eq!(response.updated_at, Some(now));
    }
}
