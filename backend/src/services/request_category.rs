use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::Result,
    models::{parse_id, request_category::RequestCategory},
    store::{Collection, DocumentStore},
};

pub const COLLECTION: &str = "requestcategories";

#[async_trait]
pub trait RequestCategoryService: Send + Sync {
    async fn get_all(&self) -> Result<Vec<RequestCategory>>;
    async fn create(&self, category: &RequestCategory) -> Result<String>;
    async fn delete(&self, id: &str) -> Result<bool>;
}

pub struct DocumentRequestCategoryService {
    collection: Collection,
}

impl DocumentRequestCategoryService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            collection: Collection::new(store, COLLECTION),
        }
    }
}

#[async_trait]
impl RequestCategoryService for DocumentRequestCategoryService {
    async fn get_all(&self) -> Result<Vec<RequestCategory>> {
        self.collection
            .find_all()
            .await?
            .into_iter()
            .map(RequestCategory::from_document)
            .collect()
    }

    async fn create(&self, category: &RequestCategory) -> Result<String> {
        let id = self.collection.insert_one(category.to_document()?).await?;
        tracing::info!(%id, name = %category.name, "Request category created");
        Ok(id.to_string())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let Some(id) = parse_id(id) else {
            return Ok(false);
        };
        self.collection.delete_one(id).await
    }
}
