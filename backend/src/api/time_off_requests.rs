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
    models::time_off_request::{TimeOffRequest, TimeOffRequestForm},
    services::TimeOffRequestService,
};

type Service = State<Arc<dyn TimeOffRequestService>>;

pub async fn list(State(svc): Service) -> Result<Json<Vec<TimeOffRequest>>> {
    Ok(Json(svc.get_all().await?))
}

pub async fn list_for_employee(
    State(svc): Service,
    Path(employee_id): Path<String>,
) -> Result<Json<Vec<TimeOffRequest>>> {
    Ok(Json(svc.get_by_employee(&employee_id).await?))
}

pub async fn create(
    State(svc): Service,
    FormFields(form): FormFields<TimeOffRequestForm>,
) -> Result<(StatusCode, Json<Value>)> {
    let request = form.into_request()?;
    let id = svc.create(&request).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

pub async fn delete(State(svc): Service, Path(request_id): Path<String>) -> Result<Json<Value>> {
    if !svc.delete(&request_id).await? {
        return Err(AppError::NotFound("Request not found".into()));
    }
    Ok(Json(json!({ "message": "Request deleted successfully" })))
}
