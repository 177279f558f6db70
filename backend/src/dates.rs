//! Wire-format timestamps and the fixed time-off date shift.
//!
//! Time-off dates travel as `yyyy-MM-ddTHH:mm:ssZ` strings (always UTC,
//! whole seconds) and are stored as RFC 3339 timestamps inside documents.

use std::str::FromStr;

use time::{
    format_description::BorrowedFormatItem, macros::format_description, Duration,
    OffsetDateTime, PrimitiveDateTime, UtcOffset,
};

use crate::{
    error::{AppError, Result},
    models::time_off_request::TimeOffRequest,
};

const WIRE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");

/// Offset applied to time-off dates, in hours.
pub const SHIFT_HOURS: i64 = 2;

/// Length of `yyyy-MM-ddTHH:mm:ssZ`.
const WIRE_LEN: usize = 20;

#[derive(thiserror::Error, Debug)]
pub enum WireDateError {
    #[error("expected yyyy-MM-ddTHH:mm:ssZ")]
    Shape,

    #[error(transparent)]
    Parse(#[from] time::error::Parse),
}

pub fn parse_wire(value: &str) -> std::result::Result<OffsetDateTime, WireDateError> {
    // `[year]` alone would also take a signed or longer year
    if value.len() != WIRE_LEN || !value.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(WireDateError::Shape);
    }
    Ok(PrimitiveDateTime::parse(value, WIRE_FORMAT)?.assume_utc())
}

pub fn format_wire(value: OffsetDateTime) -> std::result::Result<String, time::error::Format> {
    value.to_offset(UtcOffset::UTC).format(WIRE_FORMAT)
}

/// Moves both ends of a request forward by `hours`.
pub fn add_hours_to_dates(request: TimeOffRequest, hours: i64) -> Result<TimeOffRequest> {
    let offset = Duration::hours(hours);
    let shift = |date: OffsetDateTime| {
        date.checked_add(offset).ok_or_else(|| {
            AppError::BadRequest(format!("Date {} is out of range", date.date()))
        })
    };

    Ok(TimeOffRequest {
        start_date: shift(request.start_date)?,
        end_date: shift(request.end_date)?,
        ..request
    })
}

/// Where the time-off date shift is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShiftPolicy {
    /// Stored as received, shifted once on every read.
    #[default]
    OnRead,
    /// Shifted before storage and again on every read. Matches records
    /// written by earlier deployments.
    Legacy,
}

impl ShiftPolicy {
    pub fn shifts_on_write(self) -> bool {
        matches!(self, ShiftPolicy::Legacy)
    }
}

#[derive(thiserror::Error, Debug)]
#[error("unknown date shift policy '{0}'")]
pub struct UnknownShiftPolicy(String);

impl FromStr for ShiftPolicy {
    type Err = UnknownShiftPolicy;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "read" | "on_read" => Ok(ShiftPolicy::OnRead),
            "legacy" => Ok(ShiftPolicy::Legacy),
            other => Err(UnknownShiftPolicy(other.to_string())),
        }
    }
}

/// Serde adapter for `OffsetDateTime` fields in the wire format.
pub mod wire {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use time::OffsetDateTime;

    pub fn serialize<S: Serializer>(
        value: &OffsetDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let formatted = super::format_wire(*value).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<OffsetDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_wire(&raw).map_err(de::Error::custom)
    }
}
