use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    store::Document,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestCategory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct RequestCategoryBody {
    name: String,
}

impl RequestCategory {
    pub fn new(name: String) -> Self {
        Self { id: None, name }
    }

    pub fn to_document(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(RequestCategoryBody {
            name: self.name.clone(),
        })?)
    }

    pub fn from_document(doc: Document) -> Result<Self> {
        let body: RequestCategoryBody = serde_json::from_value(doc.body)?;
        Ok(Self {
            id: Some(doc.id),
            name: body.name,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RequestCategoryForm {
    pub name: Option<String>,
}

impl RequestCategoryForm {
    pub fn into_category(self) -> Result<RequestCategory> {
        let name = self
            .name
            .ok_or_else(|| AppError::BadRequest("Missing name".into()))?;
        Ok(RequestCategory::new(name))
    }
}
