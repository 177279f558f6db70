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
    models::employee::{Employee, EmployeeForm},
    services::EmployeeService,
};

type Service = State<Arc<dyn EmployeeService>>;

fn not_found() -> AppError {
    AppError::NotFound("Employee not found".into())
}

pub async fn list(State(svc): Service) -> Result<Json<Vec<Employee>>> {
    Ok(Json(svc.get_all().await?))
}

pub async fn get_one(State(svc): Service, Path(id): Path<String>) -> Result<Json<Employee>> {
    let employee = svc.get_one(&id).await?.ok_or_else(not_found)?;
    Ok(Json(employee))
}

pub async fn create(
    State(svc): Service,
    FormFields(form): FormFields<EmployeeForm>,
) -> Result<(StatusCode, Json<Value>)> {
    let employee = form.into_employee(false)?;
    let id = svc.create(&employee).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

pub async fn update(
    State(svc): Service,
    Path(id): Path<String>,
    FormFields(form): FormFields<EmployeeForm>,
) -> Result<Json<Employee>> {
    let employee = form.into_employee(true)?;
    let updated = svc.update(&id, &employee).await?.ok_or_else(not_found)?;
    Ok(Json(updated))
}

pub async fn delete(State(svc): Service, Path(id): Path<String>) -> Result<Json<Value>> {
    if !svc.delete(&id).await? {
        return Err(not_found());
    }
    Ok(Json(json!({ "message": "Employee deleted successfully" })))
}
