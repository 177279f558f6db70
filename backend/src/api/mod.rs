pub mod employees;
pub mod form;
pub mod health;
pub mod request_categories;
pub mod time_off_requests;

use axum::{
    http::{header, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};

use crate::{error::AppError, AppState};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_check))
        // Employees
        .route("/api/employees", get(employees::list))
        .route("/api/employees/", get(employees::list))
        .route("/api/employees/create", post(employees::create))
        .route(
            "/api/employees/:id",
            get(employees::get_one).put(employees::update).delete(employees::delete),
        )
        // Request categories
        .route("/api/requestCategories", get(request_categories::list))
        .route("/api/requestCategories/", get(request_categories::list))
        .route("/api/requestCategories/create", post(request_categories::create))
        .route("/api/requestCategories/:id", delete(request_categories::delete))
        // Time-off requests
        .route("/api/timeOffRequests", get(time_off_requests::list))
        .route("/api/timeOffRequests/", get(time_off_requests::list))
        .route("/api/timeOffRequests/new", post(time_off_requests::create))
        .route(
            "/api/timeOffRequests/:id",
            get(time_off_requests::list_for_employee).delete(time_off_requests::delete),
        )
        .fallback(route_not_found)
        .layer(middleware::map_response(json_method_not_allowed))
        .with_state(state)
}

async fn route_not_found() -> AppError {
    AppError::NotFound("Route not found".into())
}

/// Gives the router's bare 405s the same `{"error"}` body as every other
/// failure, keeping the `Allow` header.
async fn json_method_not_allowed(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }
    let allow = response.headers().get(header::ALLOW).cloned();
    let mut rewritten = AppError::MethodNotAllowed.into_response();
    if let Some(allow) = allow {
        rewritten.headers_mut().insert(header::ALLOW, allow);
    }
    rewritten
}
