//! Document store: schemaless JSON records grouped into named collections
//! and addressed by store-assigned UUIDs.
//!
//! `PgDocumentStore` keeps every collection in one JSONB table and is what
//! the server runs on. `MemoryDocumentStore` holds documents in process and
//! backs the test suite.

mod memory;
mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::error::Result;

pub use memory::MemoryDocumentStore;
pub use postgres::{connect, PgDocumentStore};

/// A stored record: its identifier plus the JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: Uuid,
    pub body: Value,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Documents of `collection` whose body contains every key/value pair of
    /// `filter`, in insertion order. An empty object matches everything.
    async fn find(&self, collection: &str, filter: &Value) -> Result<Vec<Document>>;

    async fn find_one(&self, collection: &str, id: Uuid) -> Result<Option<Document>>;

    /// Stores `body` under a freshly assigned identifier.
    async fn insert_one(&self, collection: &str, body: Value) -> Result<Uuid>;

    /// Replaces the whole body of an existing document and returns the new
    /// version. `None` when no document has that identifier.
    async fn replace_one(&self, collection: &str, id: Uuid, body: Value)
        -> Result<Option<Document>>;

    async fn delete_one(&self, collection: &str, id: Uuid) -> Result<bool>;

    /// Cheap round trip used by the health endpoint.
    async fn ping(&self) -> Result<()>;
}

/// Handle to one named collection of a shared store.
#[derive(Clone)]
pub struct Collection {
    store: Arc<dyn DocumentStore>,
    name: &'static str,
}

impl Collection {
    pub fn new(store: Arc<dyn DocumentStore>, name: &'static str) -> Self {
        Self { store, name }
    }

    pub async fn find_all(&self) -> Result<Vec<Document>> {
        self.store.find(self.name, &Value::Object(Default::default())).await
    }

    pub async fn find(&self, filter: &Value) -> Result<Vec<Document>> {
        self.store.find(self.name, filter).await
    }

    pub async fn find_one(&self, id: Uuid) -> Result<Option<Document>> {
        self.store.find_one(self.name, id).await
    }

    pub async fn insert_one(&self, body: Value) -> Result<Uuid> {
        self.store.insert_one(self.name, body).await
    }

    pub async fn replace_one(&self, id: Uuid, body: Value) -> Result<Option<Document>> {
        self.store.replace_one(self.name, id, body).await
    }

    pub async fn delete_one(&self, id: Uuid) -> Result<bool> {
        self.store.delete_one(self.name, id).await
    }
}
