use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::Result,
    models::{employee::Employee, parse_id},
    store::{Collection, DocumentStore},
};

pub const COLLECTION: &str = "employees";

#[async_trait]
pub trait EmployeeService: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Employee>>;

    /// `None` when nothing matches or `id` is not an identifier.
    async fn get_one(&self, id: &str) -> Result<Option<Employee>>;

    /// Returns the new identifier.
    async fn create(&self, employee: &Employee) -> Result<String>;

    /// Replaces every field of the stored employee. `None` (and no write)
    /// when nothing matches.
    async fn update(&self, id: &str, employee: &Employee) -> Result<Option<Employee>>;

    async fn delete(&self, id: &str) -> Result<bool>;
}

pub struct DocumentEmployeeService {
    collection: Collection,
}

impl DocumentEmployeeService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            collection: Collection::new(store, COLLECTION),
        }
    }
}

#[async_trait]
impl EmployeeService for DocumentEmployeeService {
    async fn get_all(&self) -> Result<Vec<Employee>> {
        self.collection
            .find_all()
            .await?
            .into_iter()
            .map(Employee::from_document)
            .collect()
    }

    async fn get_one(&self, id: &str) -> Result<Option<Employee>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        self.collection
            .find_one(id)
            .await?
            .map(Employee::from_document)
            .transpose()
    }

    async fn create(&self, employee: &Employee) -> Result<String> {
        let id = self.collection.insert_one(employee.to_document()?).await?;
        tracing::info!(%id, "Employee created");
        Ok(id.to_string())
    }

    async fn update(&self, id: &str, employee: &Employee) -> Result<Option<Employee>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        self.collection
            .replace_one(id, employee.to_document()?)
            .await?
            .map(Employee::from_document)
            .transpose()
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let Some(id) = parse_id(id) else {
            return Ok(false);
        };
        self.collection.delete_one(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryDocumentStore;

    fn service() -> DocumentEmployeeService {
        DocumentEmployeeService::new(Arc::new(MemoryDocumentStore::new()))
    }

    fn employee(email: &str) -> Employee {
        Employee::new(
            "Grace Hopper".into(),
            "Rear Admiral".into(),
            email.into(),
            9000,
            "555-0100".into(),
            true,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn create_then_get_one_round_trips_every_field() {
        let svc = service();
        let created = employee("grace@navy.mil");
        let id = svc.create(&created).await.unwrap();

        let fetched = svc.get_one(&id).await.unwrap().unwrap();
        assert_eq!(fetched.id.map(|u| u.to_string()), Some(id));
        assert_eq!(Employee { id: None, ..fetched }, created);
    }

    #[tokio::test]
    async fn malformed_identifiers_are_not_found() {
        let svc = service();
        assert!(svc.get_one("xyz").await.unwrap().is_none());
        assert!(svc.update("xyz", &employee("a@b.co")).await.unwrap().is_none());
        assert!(!svc.delete("xyz").await.unwrap());
    }

    #[tokio::test]
    async fn update_of_missing_employee_writes_nothing() {
        let svc = service();
        let missing = uuid::Uuid::new_v4().to_string();
        assert!(svc.update(&missing, &employee("a@b.co")).await.unwrap().is_none());
        assert!(svc.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_replaces_the_document() {
        let svc = service();
        let id = svc.create(&employee("old@corp.io")).await.unwrap();

        let mut changed = employee("new@corp.io");
        changed.status = false;
        let updated = svc.update(&id, &changed).await.unwrap().unwrap();
        assert_eq!(updated.email, "new@corp.io");
        assert!(!updated.status);

        let all = svc.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].email, "new@corp.io");
    }

    #[tokio::test]
    async fn delete_reports_whether_a_document_was_removed() {
        let svc = service();
        let id = svc.create(&employee("gone@corp.io")).await.unwrap();

        assert!(svc.delete(&id).await.unwrap());
        assert!(svc.get_one(&id).await.unwrap().is_none());
        assert!(!svc.delete(&id).await.unwrap());
    }
}
