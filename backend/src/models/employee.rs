use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    error::{AppError, Result},
    store::Document,
};

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is valid"));

fn rule(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

fn validate_email(email: &str) -> std::result::Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(rule("required", "Email is required."));
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err(rule("pattern", "Email is invalid."));
    }
    Ok(())
}

fn validate_phone(phone: &str) -> std::result::Result<(), ValidationError> {
    if phone.trim().is_empty() {
        return Err(rule("required", "Phone is required."));
    }
    Ok(())
}

/// Employee as returned to clients. The identifier goes out as `_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Employee {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    pub position: String,
    #[validate(custom(function = "validate_email"))]
    pub email: String,
    pub salary: i32,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[serde(default)]
    pub status: bool,
}

impl Employee {
    /// Builds an unsaved employee. Fails on a blank phone, or a blank or
    /// malformed email, before anything reaches the store.
    pub fn new(
        name: String,
        position: String,
        email: String,
        salary: i32,
        phone: String,
        status: bool,
    ) -> std::result::Result<Self, ValidationErrors> {
        let employee = Self {
            id: None,
            name,
            position,
            email,
            salary,
            phone,
            status,
        };
        employee.validate()?;
        Ok(employee)
    }

    pub fn to_document(&self) -> Result<serde_json::Value> {
        let body = EmployeeBody {
            name: self.name.clone(),
            position: self.position.clone(),
            email: self.email.clone(),
            salary: self.salary,
            phone: self.phone.clone(),
            status: self.status,
        };
        Ok(serde_json::to_value(body)?)
    }

    pub fn from_document(doc: Document) -> Result<Self> {
        let body: EmployeeBody = serde_json::from_value(doc.body)?;
        Ok(Self {
            id: Some(doc.id),
            name: body.name,
            position: body.position,
            email: body.email,
            salary: body.salary,
            phone: body.phone,
            status: body.status,
        })
    }
}

/// Stored shape of an employee document.
#[derive(Debug, Serialize, Deserialize)]
struct EmployeeBody {
    name: String,
    position: String,
    email: String,
    salary: i32,
    phone: String,
    #[serde(default)]
    status: bool,
}

/// Form fields accepted by the create and update endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct EmployeeForm {
    pub name: Option<String>,
    pub position: Option<String>,
    pub email: Option<String>,
    pub salary: Option<String>,
    pub phone: Option<String>,
    pub status: Option<String>,
}

impl EmployeeForm {
    /// Converts the form into a validated employee. On create a missing
    /// `status` means `false`; on update it must be present.
    pub fn into_employee(self, status_required: bool) -> Result<Employee> {
        let name = self.name.ok_or_else(|| missing("name"))?;
        let position = self.position.ok_or_else(|| missing("position"))?;
        let email = self.email.ok_or_else(|| missing("email"))?;
        let salary = self
            .salary
            .and_then(|s| s.parse::<i32>().ok())
            .ok_or_else(|| AppError::BadRequest("Invalid salary".into()))?;
        let phone = self.phone.ok_or_else(|| missing("phone"))?;
        let status = match self.status {
            Some(s) => s.eq_ignore_ascii_case("true"),
            None if status_required => {
                return Err(AppError::BadRequest("Invalid status".into()));
            }
            None => false,
        };

        Ok(Employee::new(name, position, email, salary, phone, status)?)
    }
}

fn missing(field: &str) -> AppError {
    AppError::BadRequest(format!("Missing {}", field))
}
