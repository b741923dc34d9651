use crate::charts::{customs_area_chart, waiting_area_chart};
use crate::errors::AppError;
use crate::export::{export_csv, export_filename};
use crate::models::{
    Area, ChartPayload, CustomsAreaIngest, DateRange, DateRangePayload, DateRangeQuery,
    ExportQuery, IngestResponse, StatisticsPayload, WaitingAreaIngest,
};
use crate::readings::{customs_area_reading, select, waiting_area_reading};
use crate::state::AppState;
use crate::stats::build_stats;
use crate::storage::persist_data;
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse},
    Json,
};
use chrono::Local;
use tracing::{debug, info};

pub async fn index() -> Html<String> {
    Html(render_index(Local::now().date_naive()))
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn receive_waiting_area_data(
    State(state): State<AppState>,
    Json(payload): Json<WaitingAreaIngest>,
) -> Result<(StatusCode, Json<IngestResponse>), AppError> {
    let reading = waiting_area_reading(payload, &state.settings, Local::now().naive_local())?;
    info!(
        taken_seats = reading.taken_seats,
        timestamp = %reading.timestamp,
        "waiting area reading received"
    );

    let mut data = state.data.lock().await;
    let mut next = data.clone();
    next.waiting_area.push(reading);
    persist_data(&state.data_path, &next).await?;
    *data = next;

    Ok((
        StatusCode::CREATED,
        Json(IngestResponse {
            message: "Waiting Area data received successfully".to_string(),
        }),
    ))
}

pub async fn receive_customs_area_data(
    State(state): State<AppState>,
    Json(payload): Json<CustomsAreaIngest>,
) -> Result<(StatusCode, Json<IngestResponse>), AppError> {
    let reading = customs_area_reading(payload, Local::now().naive_local())?;
    info!(
        current_people_count = reading.current_people_count,
        timestamp = %reading.timestamp,
        "customs area reading received"
    );

    let mut data = state.data.lock().await;
    let mut next = data.clone();
    next.customs_area.push(reading);
    persist_data(&state.data_path, &next).await?;
    *data = next;

    Ok((
        StatusCode::CREATED,
        Json(IngestResponse {
            message: "Customs Area data received successfully".to_string(),
        }),
    ))
}

pub async fn waiting_area_data(State(state): State<AppState>) -> Json<ChartPayload> {
    let data = state.data.lock().await;
    Json(waiting_area_chart(&select(&data.waiting_area, None)))
}

pub async fn customs_area_data(State(state): State<AppState>) -> Json<ChartPayload> {
    let data = state.data.lock().await;
    Json(customs_area_chart(&select(&data.customs_area, None)))
}

pub async fn get_date_range(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<DateRangePayload>, AppError> {
    let range = parse_range(query.start_date.as_deref(), query.end_date.as_deref())?;
    debug!(start = %range.start, end = %range.end, "date range requested");

    let data = state.data.lock().await;
    Ok(Json(DateRangePayload {
        waiting_area: waiting_area_chart(&select(&data.waiting_area, Some(&range))),
        customs_area: customs_area_chart(&select(&data.customs_area, Some(&range))),
    }))
}

pub async fn get_statistics(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<StatisticsPayload>, AppError> {
    let range = parse_range(query.start_date.as_deref(), query.end_date.as_deref())?;
    let data = state.data.lock().await;
    Ok(Json(build_stats(&data, &range, &state.settings)))
}

pub async fn export_data_to_csv(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let range = parse_range(query.start_date.as_deref(), query.end_date.as_deref())?;
    let raw_area = query
        .area
        .as_deref()
        .ok_or_else(|| AppError::bad_request("area is required"))?;
    let area = Area::parse(raw_area).ok_or_else(|| {
        AppError::bad_request("area must be 'waiting_area' or 'customs_area'")
    })?;

    let body = {
        let data = state.data.lock().await;
        export_csv(&data, area, &range)?
    };
    let disposition = format!("attachment; filename=\"{}\"", export_filename(area, &range));
    info!(area = area.as_str(), start = %range.start, end = %range.end, "exporting csv");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

fn parse_range(start: Option<&str>, end: Option<&str>) -> Result<DateRange, AppError> {
    match (start, end) {
        (Some(start), Some(end)) => Ok(DateRange::parse(start, end)?),
        _ => Err(AppError::bad_request("start_date and end_date are required")),
    }
}
