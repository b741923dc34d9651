use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/healthz", get(handlers::healthz))
        .route("/waiting_area", post(handlers::receive_waiting_area_data))
        .route("/customs_area", post(handlers::receive_customs_area_data))
        .route("/waiting_area_data", get(handlers::waiting_area_data))
        .route("/customs_area_data", get(handlers::customs_area_data))
        .route("/get_date_range", get(handlers::get_date_range))
        .route("/get_statistics", get(handlers::get_statistics))
        .route("/export_data_to_csv", get(handlers::export_data_to_csv))
        .with_state(state)
}
