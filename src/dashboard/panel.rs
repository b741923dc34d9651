use crate::models::StatisticsPayload;
use std::collections::BTreeMap;

pub const NO_DATA: &str = "No Data Yet";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Percent,
    Minutes,
    PerHour,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StatField {
    AvgOccupancy,
    PeakOccupancy,
    OccupancyRate,
    TurnoverRate,
    AvgWaitTime,
    AvgCustomOccupancy,
    PeakCustomOccupancy,
    AvgCustomFlowRate,
    AvgCustomPassengerTurnaroundTime,
    AvgCustomWaitTime,
}

impl StatField {
    pub const ALL: [StatField; 10] = [
        StatField::AvgOccupancy,
        StatField::PeakOccupancy,
        StatField::OccupancyRate,
        StatField::TurnoverRate,
        StatField::AvgWaitTime,
        StatField::AvgCustomOccupancy,
        StatField::PeakCustomOccupancy,
        StatField::AvgCustomFlowRate,
        StatField::AvgCustomPassengerTurnaroundTime,
        StatField::AvgCustomWaitTime,
    ];

    pub fn selector(self) -> &'static str {
        match self {
            StatField::AvgOccupancy => "#avgValue",
            StatField::PeakOccupancy => "#peakValue",
            StatField::OccupancyRate => "#occupancyRateValue",
            StatField::TurnoverRate => "#turnoverRateValue",
            StatField::AvgWaitTime => "#avgWaitTimeValue",
            StatField::AvgCustomOccupancy => "#avgCustomOccupancyValue",
            StatField::PeakCustomOccupancy => "#peakCustomOccupancyValue",
            StatField::AvgCustomFlowRate => "#avgCustomFlowRateValue",
            StatField::AvgCustomPassengerTurnaroundTime => {
                "#avgCustomPassengerTurnaroundTimeValue"
            }
            StatField::AvgCustomWaitTime => "#avgCustomWaitTimeValue",
        }
    }

    fn unit(self) -> Unit {
        match self {
            StatField::AvgWaitTime
            | StatField::AvgCustomPassengerTurnaroundTime
            | StatField::AvgCustomWaitTime => Unit::Minutes,
            StatField::AvgCustomFlowRate => Unit::PerHour,
            _ => Unit::Percent,
        }
    }

    fn value(self, stats: &StatisticsPayload) -> Option<f64> {
        match self {
            StatField::AvgOccupancy => stats.avg_occupancy_waiting,
            StatField::PeakOccupancy => stats.peak_occupancy_waiting,
            StatField::OccupancyRate => stats.occupancy_rate_waiting,
            StatField::TurnoverRate => stats.turnover_rate_waiting,
            StatField::AvgWaitTime => stats.avg_wait_time_waiting,
            StatField::AvgCustomOccupancy => stats.avg_occupancy_custom,
            StatField::PeakCustomOccupancy => stats.peak_occupancy_custom,
            StatField::AvgCustomFlowRate => stats.avg_flow_rate_custom,
            StatField::AvgCustomPassengerTurnaroundTime => {
                stats.avg_passenger_turnaround_time_custom
            }
            StatField::AvgCustomWaitTime => stats.avg_wait_time_custom,
        }
    }

    pub fn format(self, stats: &StatisticsPayload) -> String {
        match self.value(stats) {
            Some(value) if value.is_finite() => match self.unit() {
                Unit::Percent => format!("{value}%"),
                Unit::Minutes => format!("{value} min"),
                Unit::PerHour => format!("{value}/h"),
            },
            _ => NO_DATA.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsPanel {
    values: BTreeMap<StatField, String>,
}

impl Default for StatsPanel {
    fn default() -> Self {
        Self {
            values: StatField::ALL
                .iter()
                .map(|&field| (field, NO_DATA.to_string()))
                .collect(),
        }
    }
}

impl StatsPanel {
    pub fn update(&mut self, stats: &StatisticsPayload) {
        for field in StatField::ALL {
            self.values.insert(field, field.format(stats));
        }
    }

    pub fn text(&self, field: StatField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or(NO_DATA)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.values
            .iter()
            .map(|(field, text)| (field.selector(), text.as_str()))
    }
}
