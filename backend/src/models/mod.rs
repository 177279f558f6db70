pub mod employee;
pub mod request_category;
pub mod time_off_request;

use uuid::Uuid;

/// Parses an identifier taken from a path or form field. Anything that is
/// not a UUID yields `None`; callers decide whether that is a 400 or a 404.
pub fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}
