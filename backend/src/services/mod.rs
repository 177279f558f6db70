//! Per-entity services. Each is a trait the handlers depend on, with one
//! implementation over a store collection.

pub mod employee;
pub mod request_category;
pub mod time_off_request;

pub use employee::{DocumentEmployeeService, EmployeeService};
pub use request_category::{DocumentRequestCategoryService, RequestCategoryService};
pub use time_off_request::{DocumentTimeOffRequestService, TimeOffRequestService};
