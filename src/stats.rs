use crate::config::AreaSettings;
use crate::models::{
    AppData, CustomsAreaReading, DateRange, StatisticsPayload, Timestamped, WaitingAreaReading,
};
use crate::readings::select;

pub fn build_stats(data: &AppData, range: &DateRange, settings: &AreaSettings) -> StatisticsPayload {
    let waiting = select(&data.waiting_area, Some(range));
    let customs = select(&data.customs_area, Some(range));

    let mut stats = StatisticsPayload::default();
    waiting_area_stats(&waiting, &mut stats);
    customs_area_stats(&customs, settings.customs_area_capacity, &mut stats);
    stats
}

fn waiting_area_stats(readings: &[WaitingAreaReading], stats: &mut StatisticsPayload) {
    let seated: Vec<&WaitingAreaReading> = readings.iter().filter(|r| r.total_seats > 0).collect();
    if seated.is_empty() {
        return;
    }

    let occupancy: Vec<f64> = seated
        .iter()
        .map(|r| percent(r.taken_seats, r.total_seats))
        .collect();
    stats.avg_occupancy_waiting = mean(&occupancy).map(round2);
    stats.peak_occupancy_waiting = occupancy.iter().copied().reduce(f64::max).map(round2);

    let people: Vec<f64> = seated
        .iter()
        .map(|r| percent(r.total_people, r.total_seats))
        .collect();
    stats.occupancy_rate_waiting = mean(&people).map(round2);

    if seated.len() < 2 {
        return;
    }

    let mut freed = 0u64;
    let mut arrivals = 0u64;
    for pair in seated.windows(2) {
        let (prev, cur) = (pair[0].taken_seats, pair[1].taken_seats);
        freed += u64::from(prev.saturating_sub(cur));
        arrivals += u64::from(cur.saturating_sub(prev));
    }

    if let Some(last) = seated.last() {
        stats.turnover_rate_waiting = Some(round2(freed as f64 / f64::from(last.total_seats) * 100.0));
    }

    let span = span_minutes(&seated);
    let present: Vec<f64> = seated.iter().map(|r| f64::from(r.total_people)).collect();
    stats.avg_wait_time_waiting = littles_law(mean(&present), arrivals, span);
}

fn customs_area_stats(readings: &[CustomsAreaReading], capacity: u32, stats: &mut StatisticsPayload) {
    if readings.is_empty() {
        return;
    }

    if capacity > 0 {
        let occupancy: Vec<f64> = readings
            .iter()
            .map(|r| percent(r.current_people_count, capacity))
            .collect();
        stats.avg_occupancy_custom = mean(&occupancy).map(round2);
        stats.peak_occupancy_custom = occupancy.iter().copied().reduce(f64::max).map(round2);
    }

    let refs: Vec<&CustomsAreaReading> = readings.iter().collect();
    let span = span_minutes(&refs);
    if span <= 0.0 {
        return;
    }

    let exits: u64 = readings.iter().map(|r| u64::from(r.exit_point)).sum();
    stats.avg_flow_rate_custom = Some(round2(exits as f64 / (span / 60.0)));

    let people: Vec<f64> = readings
        .iter()
        .map(|r| f64::from(r.current_people_count))
        .collect();
    stats.avg_passenger_turnaround_time_custom = littles_law(mean(&people), exits, span);

    let processed: u64 = readings.iter().map(|r| u64::from(r.after_passport_point)).sum();
    let queue: Vec<f64> = readings
        .iter()
        .map(|r| f64::from(r.before_passport_point.saturating_sub(r.after_passport_point)))
        .collect();
    stats.avg_wait_time_custom = littles_law(mean(&queue), processed, span);
}

/// Average time in minutes from the mean population and the number of
/// passengers moving through over `span` minutes.
fn littles_law(population: Option<f64>, throughput: u64, span: f64) -> Option<f64> {
    if throughput == 0 || span <= 0.0 {
        return None;
    }
    let per_minute = throughput as f64 / span;
    population.map(|population| round2(population / per_minute))
}

fn span_minutes<T: Timestamped>(readings: &[&T]) -> f64 {
    match (readings.first(), readings.last()) {
        (Some(first), Some(last)) => {
            (last.timestamp() - first.timestamp()).num_seconds() as f64 / 60.0
        }
        _ => 0.0,
    }
}

fn percent(part: u32, whole: u32) -> f64 {
    f64::from(part) / f64::from(whole) * 100.0
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
