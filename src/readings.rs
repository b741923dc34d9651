use crate::config::AreaSettings;
use crate::errors::AppError;
use crate::models::{
    CustomsAreaIngest, CustomsAreaReading, DateRange, Timestamped, WaitingAreaIngest,
    WaitingAreaReading,
};
use chrono::{DateTime, NaiveDateTime};

pub fn calculate_free_seats(taken_seats: u32, total_seats: u32) -> u32 {
    total_seats.saturating_sub(taken_seats)
}

pub fn estimate_total_people(taken_seats: u32, total_seats: u32, multiplier: f64) -> u32 {
    let seated = f64::from(taken_seats.min(total_seats));
    (seated * multiplier).floor() as u32
}

/// Accepts ISO-8601 with a `T` or space separator, optional fraction, and
/// RFC 3339 offsets (converted to UTC).
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(parsed) = value.parse::<NaiveDateTime>() {
        return Some(parsed);
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(parsed);
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|parsed| parsed.naive_utc())
}

fn resolve_timestamp(value: Option<&str>, now: NaiveDateTime) -> Result<NaiveDateTime, AppError> {
    match value {
        Some(raw) => parse_timestamp(raw)
            .ok_or_else(|| AppError::bad_request(format!("invalid timestamp {raw:?}"))),
        None => Ok(now),
    }
}

pub fn waiting_area_reading(
    ingest: WaitingAreaIngest,
    settings: &AreaSettings,
    now: NaiveDateTime,
) -> Result<WaitingAreaReading, AppError> {
    let total_seats = settings.waiting_area_seats;
    if ingest.taken_seats > total_seats {
        return Err(AppError::bad_request(format!(
            "taken_seats {} exceeds the {total_seats} seats in the waiting area",
            ingest.taken_seats
        )));
    }

    let timestamp = resolve_timestamp(ingest.timestamp.as_deref(), now)?;
    let total_people = ingest.total_people.unwrap_or_else(|| {
        estimate_total_people(ingest.taken_seats, total_seats, settings.people_multiplier)
    });

    Ok(WaitingAreaReading {
        total_seats,
        taken_seats: ingest.taken_seats,
        free_seats: calculate_free_seats(ingest.taken_seats, total_seats),
        total_people,
        timestamp,
    })
}

pub fn customs_area_reading(
    ingest: CustomsAreaIngest,
    now: NaiveDateTime,
) -> Result<CustomsAreaReading, AppError> {
    let timestamp = resolve_timestamp(ingest.timestamp.as_deref(), now)?;
    Ok(CustomsAreaReading {
        entrance_point: ingest.entrance_point,
        before_passport_point: ingest.before_passport_point,
        after_passport_point: ingest.after_passport_point,
        exit_point: ingest.exit_point,
        current_people_count: ingest.current_people_count,
        timestamp,
    })
}

pub fn select<T: Timestamped + Clone>(readings: &[T], range: Option<&DateRange>) -> Vec<T> {
    let mut selected: Vec<T> = readings
        .iter()
        .filter(|reading| range.is_none_or(|range| range.contains(reading.timestamp())))
        .cloned()
        .collect();
    selected.sort_by_key(|reading| reading.timestamp());
    selected
}
