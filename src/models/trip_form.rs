use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::Deserialize;

use crate::error::AppError;
use crate::models::trip::{PendingRoute, TransportMode, Trip};

/// Raw input of the trip logging form. Every field may arrive empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripForm {
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub notes: String,
}

impl TripForm {
    pub fn into_trip(self, pending: Option<PendingRoute>) -> Result<Trip, AppError> {
        let route = pending
            .ok_or_else(|| AppError::BadRequest("pick a start and end point first".into()))?;
        let mode = TransportMode::parse_known(self.mode.trim())
            .ok_or_else(|| AppError::BadRequest(format!("unknown transport mode {:?}", self.mode)))?;
        let date = parse_trip_date(&self.date)
            .ok_or_else(|| AppError::BadRequest(format!("invalid trip date {:?}", self.date)))?;

        Ok(Trip::new(route, mode, iso_timestamp(date), self.notes))
    }
}

/// Accepts a calendar date (`2024-05-01`, taken as UTC midnight) or a full
/// RFC 3339 timestamp.
pub fn parse_trip_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(day) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return day.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    DateTime::parse_from_rfc3339(input)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

pub fn iso_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}
