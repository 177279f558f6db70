use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    api::form::FormFields,
    error::{AppError, Result},
    models::request_category::{RequestCategory, RequestCategoryForm},
    services::RequestCategoryService,
};

type Service = State<Arc<dyn RequestCategoryService>>;

pub async fn list(State(svc): Service) -> Result<Json<Vec<RequestCategory>>> {
    Ok(Json(svc.get_all().await?))
}

pub async fn create(
    State(svc): Service,
    FormFields(form): FormFields<RequestCategoryForm>,
) -> Result<(StatusCode, Json<Value>)> {
    let category = form.into_category()?;
    let id = svc.create(&category).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

pub async fn delete(State(svc): Service, Path(id): Path<String>) -> Result<Json<Value>> {
    if !svc.delete(&id).await? {
        return Err(AppError::NotFound("Request category not found".into()));
    }
    Ok(Json(json!({ "message": "Request category deleted successfully" })))
}
