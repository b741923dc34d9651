use crate::errors::AppError;
use crate::models::{AppData, Area, DATE_FORMAT, DateRange, LABEL_FORMAT};
use crate::readings::select;

const WAITING_AREA_HEADER: [&str; 5] = [
    "timestamp",
    "total_seats",
    "taken_seats",
    "free_seats",
    "total_people",
];

const CUSTOMS_AREA_HEADER: [&str; 6] = [
    "timestamp",
    "entrance_point",
    "before_passport_point",
    "after_passport_point",
    "exit_point",
    "current_people_count",
];

pub fn export_filename(area: Area, range: &DateRange) -> String {
    format!(
        "{}_{}_{}.csv",
        area.as_str(),
        range.start.format(DATE_FORMAT),
        range.end.format(DATE_FORMAT)
    )
}

pub fn export_csv(data: &AppData, area: Area, range: &DateRange) -> Result<String, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    match area {
        Area::WaitingArea => {
            writer.write_record(WAITING_AREA_HEADER).map_err(AppError::internal)?;
            for reading in select(&data.waiting_area, Some(range)) {
                writer
                    .write_record([
                        reading.timestamp.format(LABEL_FORMAT).to_string(),
                        reading.total_seats.to_string(),
                        reading.taken_seats.to_string(),
                        reading.free_seats.to_string(),
                        reading.total_people.to_string(),
                    ])
                    .map_err(AppError::internal)?;
            }
        }
        Area::CustomsArea => {
            writer.write_record(CUSTOMS_AREA_HEADER).map_err(AppError::internal)?;
            for reading in select(&data.customs_area, Some(range)) {
                writer
                    .write_record([
                        reading.timestamp.format(LABEL_FORMAT).to_string(),
                        reading.entrance_point.to_string(),
                        reading.before_passport_point.to_string(),
                        reading.after_passport_point.to_string(),
                        reading.exit_point.to_string(),
                        reading.current_people_count.to_string(),
                    ])
                    .map_err(AppError::internal)?;
            }
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| AppError::internal(err.into_error()))?;
    String::from_utf8(bytes).map_err(AppError::internal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WaitingAreaReading;
    use chrono::NaiveDate;

    #[test]
    fn waiting_area_export_has_header_and_rows_in_range() {
        let mut data = AppData::default();
        for (day, taken) in [(5, 10), (6, 20), (4, 30)] {
            data.waiting_area.push(WaitingAreaReading {
                total_seats: 500,
                taken_seats: taken,
                free_seats: 500 - taken,
                total_people: taken,
                timestamp: NaiveDate::from_ymd_opt(2026, 1, day)
                    .unwrap()
                    .and_hms_opt(12, 0, 0)
                    .unwrap(),
            });
        }
        let range = DateRange::parse("2026-01-05", "2026-01-06").unwrap();

        let csv = export_csv(&data, Area::WaitingArea, &range).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                "timestamp,total_seats,taken_seats,free_seats,total_people",
                "2026-01-05 12:00:00,500,10,490,10",
                "2026-01-06 12:00:00,500,20,480,20",
            ]
        );
    }

    #[test]
    fn empty_customs_export_is_header_only() {
        let range = DateRange::parse("2026-01-05", "2026-01-05").unwrap();
        let csv = export_csv(&AppData::default(), Area::CustomsArea, &range).unwrap();
        assert_eq!(
            csv,
            "timestamp,entrance_point,before_passport_point,after_passport_point,exit_point,current_people_count\n"
        );
    }

    #[test]
    fn filename_names_area_and_dates() {
        let range = DateRange::parse("2026-01-05", "2026-01-06").unwrap();
        assert_eq!(
            export_filename(Area::CustomsArea, &range),
            "customs_area_2026-01-05_2026-01-06.csv"
        );
    }
}
