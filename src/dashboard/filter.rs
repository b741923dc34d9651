use super::error::DashboardError;
use crate::models::{DATE_FORMAT, DateRange, parse_date};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFilter {
    range: DateRange,
    single_date: Option<NaiveDate>,
    range_disabled: bool,
}

impl DateFilter {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            range: DateRange::single(today),
            single_date: None,
            range_disabled: false,
        }
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn single_date(&self) -> Option<NaiveDate> {
        self.single_date
    }

    pub fn effective_range(&self) -> DateRange {
        match self.single_date {
            Some(date) => DateRange::single(date),
            None => self.range,
        }
    }

    pub fn set_range(&mut self, start: NaiveDate, end: NaiveDate) -> Result<(), DashboardError> {
        self.range = DateRange::new(start, end)?;
        Ok(())
    }

    /// Picking a single date locks the range picker until reset.
    pub fn set_single_date(&mut self, date: NaiveDate) {
        self.single_date = Some(date);
        self.range_disabled = true;
    }

    pub fn reset(&mut self, today: NaiveDate) {
        self.range = DateRange::single(today);
        self.single_date = None;
        self.range_disabled = false;
    }

    pub fn is_range_disabled(&self) -> bool {
        self.range_disabled
    }

    pub fn range_text(&self) -> String {
        format!(
            "{} - {}",
            self.range.start.format(DATE_FORMAT),
            self.range.end.format(DATE_FORMAT)
        )
    }

    pub fn set_range_text(&mut self, text: &str) -> Result<(), DashboardError> {
        let (start, end) = parse_range_text(text)?;
        self.set_range(start, end)
    }
}

fn parse_range_text(text: &str) -> Result<(NaiveDate, NaiveDate), DashboardError> {
    let (start, end) = text
        .split_once(" - ")
        .ok_or_else(|| DashboardError::RangeText(text.to_string()))?;
    Ok((parse_date(start)?, parse_date(end)?))
}
