use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    dates::{add_hours_to_dates, ShiftPolicy, SHIFT_HOURS},
    error::{AppError, Result},
    models::{parse_id, time_off_request::TimeOffRequest},
    store::{Collection, Document, DocumentStore},
};

pub const COLLECTION: &str = "timeoffrequests";

#[async_trait]
pub trait TimeOffRequestService: Send + Sync {
    /// Every request, dates shifted forward on the way out.
    async fn get_all(&self) -> Result<Vec<TimeOffRequest>>;

    /// Requests referencing `employee_id`, shifted like `get_all`. A value
    /// that is not an identifier is a `BadRequest`.
    async fn get_by_employee(&self, employee_id: &str) -> Result<Vec<TimeOffRequest>>;

    async fn create(&self, request: &TimeOffRequest) -> Result<String>;

    async fn delete(&self, request_id: &str) -> Result<bool>;
}

pub struct DocumentTimeOffRequestService {
    collection: Collection,
    policy: ShiftPolicy,
}

impl DocumentTimeOffRequestService {
    pub fn new(store: Arc<dyn DocumentStore>, policy: ShiftPolicy) -> Self {
        Self {
            collection: Collection::new(store, COLLECTION),
            policy,
        }
    }

    /// Maps stored documents to shifted requests. A record whose shifted
    /// dates fall outside the representable range is logged and left out
    /// so it cannot take the whole listing down with it.
    fn read(docs: Vec<Document>) -> Result<Vec<TimeOffRequest>> {
        let mut requests = Vec::with_capacity(docs.len());
        for doc in docs {
            let id = doc.id;
            match add_hours_to_dates(TimeOffRequest::from_document(doc)?, SHIFT_HOURS) {
                Ok(request) => requests.push(request),
                Err(e) => tracing::warn!(%id, "Skipping time-off request: {}", e),
            }
        }
        Ok(requests)
    }
}

#[async_trait]
impl TimeOffRequestService for DocumentTimeOffRequestService {
    async fn get_all(&self) -> Result<Vec<TimeOffRequest>> {
        Self::read(self.collection.find_all().await?)
    }

    async fn get_by_employee(&self, employee_id: &str) -> Result<Vec<TimeOffRequest>> {
        let employee_id = parse_id(employee_id)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid employeeId: {}", employee_id)))?;
        let filter = TimeOffRequest::employee_filter(employee_id);
        Self::read(self.collection.find(&filter).await?)
    }

    async fn create(&self, request: &TimeOffRequest) -> Result<String> {
        let stored = if self.policy.shifts_on_write() {
            add_hours_to_dates(request.clone(), SHIFT_HOURS)?
        } else {
            request.clone()
        };
        // Every read shifts again; refuse what could never be listed.
        add_hours_to_dates(stored.clone(), SHIFT_HOURS)?;
        let id = self.collection.insert_one(stored.to_document()?).await?;
        tracing::info!(%id, employee_id = %request.employee_id, "Time-off request created");
        Ok(id.to_string())
    }

    async fn delete(&self, request_id: &str) -> Result<bool> {
        let Some(id) = parse_id(request_id) else {
            return Ok(false);
        };
        self.collection.delete_one(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryDocumentStore;
    use time::macros::datetime;
    use uuid::Uuid;

    fn request(employee_id: Uuid) -> TimeOffRequest {
        TimeOffRequest {
            id: None,
            request_category_id: Uuid::new_v4(),
            employee_id,
            start_date: datetime!(2024-01-01 00:00:00 UTC),
            end_date: datetime!(2024-01-02 00:00:00 UTC),
        }
    }

    fn service(policy: ShiftPolicy) -> (DocumentTimeOffRequestService, Arc<MemoryDocumentStore>) {
        let store = Arc::new(MemoryDocumentStore::new());
        (DocumentTimeOffRequestService::new(store.clone(), policy), store)
    }

    #[tokio::test]
    async fn on_read_policy_stores_as_received_and_shifts_once() {
        let (svc, store) = service(ShiftPolicy::OnRead);
        let id = svc.create(&request(Uuid::new_v4())).await.unwrap();

        let raw = store.find_one(COLLECTION, parse_id(&id).unwrap()).await.unwrap().unwrap();
        assert_eq!(raw.body["start_date"], "2024-01-01T00:00:00Z");

        let all = svc.get_all().await.unwrap();
        assert_eq!(all[0].start_date, datetime!(2024-01-01 02:00:00 UTC));
        assert_eq!(all[0].end_date, datetime!(2024-01-02 02:00:00 UTC));
    }

    #[tokio::test]
    async fn legacy_policy_shifts_on_write_and_again_on_read() {
        let (svc, store) = service(ShiftPolicy::Legacy);
        let id = svc.create(&request(Uuid::new_v4())).await.unwrap();

        let raw = store.find_one(COLLECTION, parse_id(&id).unwrap()).await.unwrap().unwrap();
        assert_eq!(raw.body["start_date"], "2024-01-01T02:00:00Z");

        let all = svc.get_all().await.unwrap();
        assert_eq!(all[0].start_date, datetime!(2024-01-01 04:00:00 UTC));
    }

    #[tokio::test]
    async fn get_by_employee_filters_on_the_reference() {
        let (svc, _) = service(ShiftPolicy::OnRead);
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        svc.create(&request(alice)).await.unwrap();
        svc.create(&request(bob)).await.unwrap();
        svc.create(&request(alice)).await.unwrap();

        let mine = svc.get_by_employee(&alice.to_string()).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|r| r.employee_id == alice));

        let nobody = svc.get_by_employee(&Uuid::new_v4().to_string()).await.unwrap();
        assert!(nobody.is_empty());

        assert!(matches!(
            svc.get_by_employee("12").await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn create_rejects_dates_whose_read_shift_overflows() {
        for policy in [ShiftPolicy::OnRead, ShiftPolicy::Legacy] {
            let (svc, _) = service(policy);
            let mut late = request(Uuid::new_v4());
            late.start_date = datetime!(9999-12-31 23:00:00 UTC);
            late.end_date = datetime!(9999-12-31 23:00:00 UTC);

            assert!(matches!(svc.create(&late).await, Err(AppError::BadRequest(_))));
            assert!(svc.get_all().await.unwrap().is_empty());
        }

        let (svc, _) = service(ShiftPolicy::Legacy);
        let mut edge = request(Uuid::new_v4());
        edge.end_date = datetime!(9999-12-31 20:00:00 UTC);
        assert!(matches!(svc.create(&edge).await, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn unshiftable_stored_record_does_not_break_listing() {
        let (svc, store) = service(ShiftPolicy::OnRead);
        let employee = Uuid::new_v4();
        let kept = svc.create(&request(employee)).await.unwrap();

        let mut late = request(employee);
        late.start_date = datetime!(9999-12-31 23:00:00 UTC);
        late.end_date = datetime!(9999-12-31 23:00:00 UTC);
        store.insert_one(COLLECTION, late.to_document().unwrap()).await.unwrap();

        let all = svc.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id.map(|u| u.to_string()), Some(kept.clone()));

        let mine = svc.get_by_employee(&employee.to_string()).await.unwrap();
        assert_eq!(mine.len(), 1);
    }

    #[tokio::test]
    async fn delete_by_request_id() {
        let (svc, _) = service(ShiftPolicy::OnRead);
        let id = svc.create(&request(Uuid::new_v4())).await.unwrap();

        assert!(svc.delete(&id).await.unwrap());
        assert!(!svc.delete(&id).await.unwrap());
        assert!(!svc.delete("nope").await.unwrap());
        assert!(svc.get_all().await.unwrap().is_empty());
    }
}
