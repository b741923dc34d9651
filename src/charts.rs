use crate::models::{
    ChartPayload, CustomsAreaReading, Dataset, DatasetRole, LABEL_FORMAT, Timestamped,
    WaitingAreaReading,
};

fn build<T: Timestamped>(
    readings: &[T],
    roles: &[DatasetRole],
    value: impl Fn(&T, DatasetRole) -> u32,
) -> ChartPayload {
    let labels = readings
        .iter()
        .map(|reading| reading.timestamp().format(LABEL_FORMAT).to_string())
        .collect();
    let datasets = roles
        .iter()
        .map(|&role| {
            let data = readings
                .iter()
                .map(|reading| f64::from(value(reading, role)))
                .collect();
            Dataset::for_role(role, data)
        })
        .collect();

    ChartPayload { labels, datasets }
}

pub fn waiting_area_chart(readings: &[WaitingAreaReading]) -> ChartPayload {
    build(readings, &DatasetRole::WAITING_AREA, |reading, role| match role {
        DatasetRole::TakenSeats => reading.taken_seats,
        DatasetRole::FreeSeats => reading.free_seats,
        DatasetRole::TotalSeats => reading.total_seats,
        DatasetRole::TotalPeople => reading.total_people,
        _ => 0,
    })
}

pub fn customs_area_chart(readings: &[CustomsAreaReading]) -> ChartPayload {
    build(readings, &DatasetRole::CUSTOMS_AREA, |reading, role| match role {
        DatasetRole::ExitPoint => reading.exit_point,
        DatasetRole::CurrentPeopleCount => reading.current_people_count,
        DatasetRole::EntrancePoint => reading.entrance_point,
        _ => 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn waiting(hour: u32, taken: u32) -> WaitingAreaReading {
        WaitingAreaReading {
            total_seats: 500,
            taken_seats: taken,
            free_seats: 500 - taken,
            total_people: taken * 3 / 2,
            timestamp: NaiveDate::from_ymd_opt(2026, 1, 5)
                .unwrap()
                .and_hms_opt(hour, 15, 0)
                .unwrap(),
        }
    }

    #[test]
    fn waiting_chart_has_one_point_per_reading() {
        let chart = waiting_area_chart(&[waiting(9, 100), waiting(10, 200)]);
        assert_eq!(chart.labels, vec!["2026-01-05 09:15:00", "2026-01-05 10:15:00"]);
        assert_eq!(chart.datasets.len(), 4);
        assert!(chart.validate().is_ok());

        let taken = chart.dataset(DatasetRole::TakenSeats).unwrap();
        assert_eq!(taken.data, vec![100.0, 200.0]);
        let free = chart.dataset(DatasetRole::FreeSeats).unwrap();
        assert_eq!(free.data, vec![400.0, 300.0]);
        let people = chart.dataset(DatasetRole::TotalPeople).unwrap();
        assert_eq!(people.data, vec![150.0, 300.0]);
    }

    #[test]
    fn customs_chart_carries_entrance_dataset() {
        let reading = CustomsAreaReading {
            entrance_point: 7,
            before_passport_point: 0,
            after_passport_point: 0,
            exit_point: 2,
            current_people_count: 5,
            timestamp: NaiveDate::from_ymd_opt(2026, 1, 5)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        };
        let chart = customs_area_chart(&[reading]);
        let entrance = chart.dataset(DatasetRole::EntrancePoint).unwrap();
        assert_eq!(entrance.label, "Entrance Point Count (Customs Area)");
        assert_eq!(entrance.data, vec![7.0]);
    }

    #[test]
    fn empty_readings_give_empty_chart() {
        let chart = customs_area_chart(&[]);
        assert!(chart.labels.is_empty());
        assert_eq!(chart.datasets.len(), 3);
        assert!(chart.datasets.iter().all(|d| d.data.is_empty()));
    }
}
