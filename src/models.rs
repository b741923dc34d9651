use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const LABEL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitingAreaReading {
    pub total_seats: u32,
    pub taken_seats: u32,
    pub free_seats: u32,
    pub total_people: u32,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomsAreaReading {
    pub entrance_point: u32,
    pub before_passport_point: u32,
    pub after_passport_point: u32,
    pub exit_point: u32,
    pub current_people_count: u32,
    pub timestamp: NaiveDateTime,
}

pub trait Timestamped {
    fn timestamp(&self) -> NaiveDateTime;
}

impl Timestamped for WaitingAreaReading {
    fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }
}

impl Timestamped for CustomsAreaReading {
    fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub waiting_area: Vec<WaitingAreaReading>,
    #[serde(default)]
    pub customs_area: Vec<CustomsAreaReading>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitingAreaIngest {
    pub taken_seats: u32,
    pub total_people: Option<u32>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CustomsAreaIngest {
    pub entrance_point: u32,
    pub before_passport_point: u32,
    pub after_passport_point: u32,
    pub exit_point: u32,
    pub current_people_count: u32,
    pub timestamp: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IngestResponse {
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetRole {
    TakenSeats,
    FreeSeats,
    TotalSeats,
    TotalPeople,
    ExitPoint,
    CurrentPeopleCount,
    EntrancePoint,
}

impl DatasetRole {
    pub const WAITING_AREA: [DatasetRole; 4] = [
        DatasetRole::TakenSeats,
        DatasetRole::FreeSeats,
        DatasetRole::TotalSeats,
        DatasetRole::TotalPeople,
    ];

    pub const CUSTOMS_AREA: [DatasetRole; 3] = [
        DatasetRole::ExitPoint,
        DatasetRole::CurrentPeopleCount,
        DatasetRole::EntrancePoint,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DatasetRole::TakenSeats => "Taken Seats (Waiting Area)",
            DatasetRole::FreeSeats => "Free Seats (Waiting Area)",
            DatasetRole::TotalSeats => "Total Seats (Waiting Area)",
            DatasetRole::TotalPeople => "Total People (Waiting Area)",
            DatasetRole::ExitPoint => "Exit Point (Customs Area)",
            DatasetRole::CurrentPeopleCount => "Current People Count (Customs Area)",
            DatasetRole::EntrancePoint => "Entrance Point Count (Customs Area)",
        }
    }

    pub fn border_color(self) -> &'static str {
        match self {
            DatasetRole::TakenSeats => "rgba(75, 192, 192, 1)",
            DatasetRole::FreeSeats => "rgba(255, 99, 132, 1)",
            DatasetRole::TotalSeats => "rgba(255, 0, 178, 0.8)",
            DatasetRole::TotalPeople => "rgba(153, 102, 255, 1)",
            DatasetRole::ExitPoint => "rgba(255, 205, 86, 1)",
            DatasetRole::CurrentPeopleCount => "rgba(54, 162, 235, 1)",
            DatasetRole::EntrancePoint => "rgba(255, 99, 71, 1)",
        }
    }

    pub fn is_overlay(self) -> bool {
        matches!(self, DatasetRole::EntrancePoint)
    }

    pub fn hidden_by_default(self) -> bool {
        matches!(self, DatasetRole::TotalSeats | DatasetRole::TotalPeople)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub role: DatasetRole,
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: String,
    pub border_width: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default)]
    pub fill: bool,
}

impl Dataset {
    pub fn for_role(role: DatasetRole, data: Vec<f64>) -> Self {
        Self {
            role,
            label: role.label().to_string(),
            data,
            border_color: role.border_color().to_string(),
            border_width: 1,
            background_color: None,
            fill: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChartPayload {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("dataset {label:?} has {actual} points but there are {expected} labels")]
    LengthMismatch {
        label: String,
        expected: usize,
        actual: usize,
    },
    #[error("dataset role {0:?} appears more than once")]
    DuplicateRole(DatasetRole),
}

impl ChartPayload {
    pub fn validate(&self) -> Result<(), PayloadError> {
        let expected = self.labels.len();
        for (index, dataset) in self.datasets.iter().enumerate() {
            if dataset.data.len() != expected {
                return Err(PayloadError::LengthMismatch {
                    label: dataset.label.clone(),
                    expected,
                    actual: dataset.data.len(),
                });
            }
            if self.datasets[..index].iter().any(|d| d.role == dataset.role) {
                return Err(PayloadError::DuplicateRole(dataset.role));
            }
        }
        Ok(())
    }

    pub fn dataset(&self, role: DatasetRole) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.role == role)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DateRangePayload {
    pub waiting_area: ChartPayload,
    pub customs_area: ChartPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StatisticsPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_occupancy_waiting: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peak_occupancy_waiting: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupancy_rate_waiting: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turnover_rate_waiting: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_wait_time_waiting: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_occupancy_custom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peak_occupancy_custom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_flow_rate_custom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_passenger_turnaround_time_custom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_wait_time_custom: Option<f64>,
}

impl StatisticsPayload {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateRangeError {
    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("start date {start} is after end date {end}")]
    Inverted { start: NaiveDate, end: NaiveDate },
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, DateRangeError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    /// Whole days, both ends inclusive.
    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        let date = timestamp.date();
        date >= self.start && date <= self.end
    }

    pub fn query(&self) -> [(&'static str, String); 2] {
        [
            ("start_date", self.start.format(DATE_FORMAT).to_string()),
            ("end_date", self.end.format(DATE_FORMAT).to_string()),
        ]
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate, DateRangeError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| DateRangeError::InvalidDate(value.to_string()))
}

#[derive(Debug, Deserialize, Default)]
pub struct DateRangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ExportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub area: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Area {
    WaitingArea,
    CustomsArea,
}

impl Area {
    pub fn as_str(self) -> &'static str {
        match self {
            Area::WaitingArea => "waiting_area",
            Area::CustomsArea => "customs_area",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "waiting_area" => Some(Area::WaitingArea),
            "customs_area" => Some(Area::CustomsArea),
            _ => None,
        }
    }
}
