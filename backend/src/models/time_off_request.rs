use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    dates,
    error::{AppError, Result},
    models::parse_id,
    store::Document,
};

/// Time-off request as exchanged with clients. Dates use the
/// `yyyy-MM-ddTHH:mm:ssZ` wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeOffRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub request_category_id: Uuid,
    pub employee_id: Uuid,
    #[serde(with = "dates::wire")]
    pub start_date: OffsetDateTime,
    #[serde(with = "dates::wire")]
    pub end_date: OffsetDateTime,
}

/// Stored shape: references as UUID strings, dates as RFC 3339 timestamps.
#[derive(Debug, Serialize, Deserialize)]
struct TimeOffRequestBody {
    request_category_id: Uuid,
    employee_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    start_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    end_date: OffsetDateTime,
}

impl TimeOffRequest {
    pub fn to_document(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(TimeOffRequestBody {
            request_category_id: self.request_category_id,
            employee_id: self.employee_id,
            start_date: self.start_date,
            end_date: self.end_date,
        })?)
    }

    pub fn from_document(doc: Document) -> Result<Self> {
        let body: TimeOffRequestBody = serde_json::from_value(doc.body)?;
        Ok(Self {
            id: Some(doc.id),
            request_category_id: body.request_category_id,
            employee_id: body.employee_id,
            start_date: body.start_date,
            end_date: body.end_date,
        })
    }

    /// Document filter matching every request of one employee.
    pub fn employee_filter(employee_id: Uuid) -> serde_json::Value {
        serde_json::json!({ "employee_id": employee_id })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TimeOffRequestForm {
    pub request_category_id: Option<String>,
    pub employee_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl TimeOffRequestForm {
    pub fn into_request(self) -> Result<TimeOffRequest> {
        let request_category_id = required_id("request_category_id", self.request_category_id)?;
        let employee_id = required_id("employee_id", self.employee_id)?;
        let start_date = required_date("start_date", self.start_date)?;
        let end_date = required_date("end_date", self.end_date)?;

        Ok(TimeOffRequest {
            id: None,
            request_category_id,
            employee_id,
            start_date,
            end_date,
        })
    }
}

fn required<'a>(field: &str, value: &'a Option<String>) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| AppError::BadRequest(format!("Missing {}", field)))
}

fn required_id(field: &str, value: Option<String>) -> Result<Uuid> {
    let raw = required(field, &value)?;
    parse_id(raw).ok_or_else(|| AppError::BadRequest(format!("Invalid {}: {}", field, raw)))
}

fn required_date(field: &str, value: Option<String>) -> Result<OffsetDateTime> {
    let raw = required(field, &value)?;
    dates::parse_wire(raw)
        .map_err(|e| AppError::BadRequest(format!("Invalid {} '{}': {}", field, raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn form() -> TimeOffRequestForm {
        TimeOffRequestForm {
            request_category_id: Some(Uuid::new_v4().to_string()),
            employee_id: Some(Uuid::new_v4().to_string()),
            start_date: Some("2024-07-01T08:00:00Z".into()),
            end_date: Some("2024-07-03T17:00:00Z".into()),
        }
    }

    #[test]
    fn form_parses_ids_and_dates() {
        let request = form().into_request().unwrap();
        assert_eq!(request.start_date, datetime!(2024-07-01 08:00:00 UTC));
        assert_eq!(request.end_date, datetime!(2024-07-03 17:00:00 UTC));
    }

    #[test]
    fn form_reports_missing_and_malformed_fields() {
        let mut f = form();
        f.end_date = None;
        let err = f.into_request().unwrap_err();
        assert!(matches!(err, AppError::BadRequest(m) if m == "Missing end_date"));

        let mut f = form();
        f.employee_id = Some("not-an-id".into());
        let err = f.into_request().unwrap_err();
        assert!(matches!(err, AppError::BadRequest(m) if m.starts_with("Invalid employee_id")));

        let mut f = form();
        f.start_date = Some("01/07/2024".into());
        let err = f.into_request().unwrap_err();
        assert!(matches!(err, AppError::BadRequest(m) if m.starts_with("Invalid start_date")));
    }

    #[test]
    fn wire_json_uses_wire_dates_and_stored_body_uses_rfc3339() {
        let mut request = form().into_request().unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["start_date"], "2024-07-01T08:00:00Z");
        assert!(json.get("id").is_none());

        let body = request.to_document().unwrap();
        assert_eq!(body["employee_id"], request.employee_id.to_string());

        let id = Uuid::new_v4();
        let restored = TimeOffRequest::from_document(Document { id, body }).unwrap();
        request.id = Some(id);
        assert_eq!(restored, request);
    }
}
