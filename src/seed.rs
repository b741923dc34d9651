use crate::config::AreaSettings;
use crate::models::{CustomsAreaIngest, WaitingAreaIngest};
use chrono::{Duration, NaiveDateTime, Timelike};
use std::f64::consts::TAU;

const SEED_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedPlan {
    pub end: NaiveDateTime,
    pub days: u32,
    pub step: Duration,
}

impl SeedPlan {
    pub fn new(end: NaiveDateTime, days: u32, step_minutes: u32) -> Self {
        Self {
            end,
            days,
            step: Duration::minutes(i64::from(step_minutes.max(1))),
        }
    }

    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        let start = self.end - Duration::days(i64::from(self.days));
        let mut out = Vec::new();
        let mut at = start + self.step;
        while at <= self.end {
            out.push(at);
            at += self.step;
        }
        out
    }
}

// 0.1 around midnight up to 0.9 around noon.
fn load(at: NaiveDateTime) -> f64 {
    let minute = f64::from(at.num_seconds_from_midnight()) / 60.0;
    0.5 - 0.4 * (TAU * minute / 1440.0).cos()
}

fn scaled(total: u32, factor: f64) -> u32 {
    (f64::from(total) * factor).round() as u32
}

pub fn waiting_area_sample(at: NaiveDateTime, settings: &AreaSettings) -> WaitingAreaIngest {
    WaitingAreaIngest {
        taken_seats: scaled(settings.waiting_area_seats, load(at)),
        total_people: None,
        timestamp: Some(at.format(SEED_TIMESTAMP_FORMAT).to_string()),
    }
}

pub fn customs_area_sample(at: NaiveDateTime, settings: &AreaSettings) -> CustomsAreaIngest {
    let current = scaled(settings.customs_area_capacity, load(at) * 0.6);
    CustomsAreaIngest {
        entrance_point: current / 3,
        before_passport_point: current * 2 / 3,
        after_passport_point: current / 3,
        exit_point: current / 3,
        current_people_count: current,
        timestamp: Some(at.format(SEED_TIMESTAMP_FORMAT).to_string()),
    }
}
