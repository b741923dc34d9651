use axum::{Json, Router, routing::get};
use chrono::NaiveDate;
use occupancy_dashboard::dashboard::{
    ChartId, Dashboard, DashboardClient, DashboardError, DashboardSource,
};
use occupancy_dashboard::models::{ChartPayload, Dataset, DatasetRole, DateRange, DateRangePayload};

fn payload(roles: &[DatasetRole], labels: usize, points: usize) -> ChartPayload {
    ChartPayload {
        labels: (0..labels).map(|i| format!("2031-04-01 10:0{i}:00")).collect(),
        datasets: roles
            .iter()
            .map(|&role| Dataset::for_role(role, vec![1.0; points]))
            .collect(),
    }
}

// Full-history charts are well formed; the range endpoint sends a waiting
// area dataset one point short of its labels.
fn broken_server() -> Router {
    Router::new()
        .route(
            "/waiting_area_data",
            get(|| async { Json(payload(&DatasetRole::WAITING_AREA, 1, 1)) }),
        )
        .route(
            "/customs_area_data",
            get(|| async { Json(payload(&DatasetRole::CUSTOMS_AREA, 1, 1)) }),
        )
        .route(
            "/get_date_range",
            get(|| async {
                Json(DateRangePayload {
                    waiting_area: payload(&DatasetRole::WAITING_AREA, 2, 1),
                    customs_area: payload(&DatasetRole::CUSTOMS_AREA, 2, 2),
                })
            }),
        )
        .route("/get_statistics", get(|| async { "not json" }))
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2031, 4, 1).unwrap()
}

#[tokio::test]
async fn short_dataset_from_server_is_rejected() {
    let client = DashboardClient::new(serve(broken_server()).await);

    let err = client.date_range(&DateRange::single(day())).await.unwrap_err();
    assert!(matches!(err, DashboardError::Payload(_)), "{err}");
}

#[tokio::test]
async fn undecodable_body_is_a_decode_error() {
    let client = DashboardClient::new(serve(broken_server()).await);

    let err = client.statistics(&DateRange::single(day())).await.unwrap_err();
    assert!(matches!(err, DashboardError::Decode { .. }), "{err}");
    assert!(err.to_string().starts_with("could not decode response from "));
}

#[tokio::test]
async fn refresh_with_bad_payload_keeps_charts() {
    let client = DashboardClient::new(serve(broken_server()).await);
    let mut dashboard = Dashboard::new(client, day());

    dashboard.load().await;
    dashboard.refresh().await;

    for id in [ChartId::WaitingArea, ChartId::CustomsArea] {
        let chart = dashboard.chart(id).unwrap();
        assert_eq!(chart.revision(), 0);
        assert_eq!(chart.labels().len(), 1);
    }
}
