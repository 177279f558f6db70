pub mod api;
pub mod config;
pub mod dates;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    dates::ShiftPolicy,
    services::{
        DocumentEmployeeService, DocumentRequestCategoryService, DocumentTimeOffRequestService,
        EmployeeService, RequestCategoryService, TimeOffRequestService,
    },
    store::DocumentStore,
};

/// Shared application state available to all handlers via axum's State extractor.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub employees: Arc<dyn EmployeeService>,
    pub request_categories: Arc<dyn RequestCategoryService>,
    pub time_off_requests: Arc<dyn TimeOffRequestService>,
}

impl AppState {
    /// Binds one service per entity to the given store.
    pub fn new(store: Arc<dyn DocumentStore>, shift_policy: ShiftPolicy) -> Self {
        Self {
            employees: Arc::new(DocumentEmployeeService::new(store.clone())),
            request_categories: Arc::new(DocumentRequestCategoryService::new(store.clone())),
            time_off_requests: Arc::new(DocumentTimeOffRequestService::new(
                store.clone(),
                shift_policy,
            )),
            store,
        }
    }
}

impl FromRef<AppState> for Arc<dyn DocumentStore> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Arc<dyn EmployeeService> {
    fn from_ref(state: &AppState) -> Self {
        state.employees.clone()
    }
}

impl FromRef<AppState> for Arc<dyn RequestCategoryService> {
    fn from_ref(state: &AppState) -> Self {
        state.request_categories.clone()
    }
}

impl FromRef<AppState> for Arc<dyn TimeOffRequestService> {
    fn from_ref(state: &AppState) -> Self {
        state.time_off_requests.clone()
    }
}
