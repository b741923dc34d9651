use chrono::Local;
use occupancy_dashboard::config::{AreaSettings, WatchSettings};
use occupancy_dashboard::seed::{SeedPlan, customs_area_sample, waiting_area_sample};
use reqwest::Client;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (days, step_minutes) = match args.as_slice() {
        [] => (1, 30),
        [days] => (days.parse()?, 30),
        [days, step] => (days.parse()?, step.parse()?),
        other => return Err(format!("expected [DAYS] [STEP_MINUTES], got {other:?}").into()),
    };

    let base_url = WatchSettings::from_env().base_url;
    let settings = AreaSettings::from_env();
    let plan = SeedPlan::new(Local::now().naive_local(), days, step_minutes);
    let client = Client::new();

    let mut sent = 0usize;
    let mut rejected = 0usize;
    for at in plan.timestamps() {
        let waiting = waiting_area_sample(at, &settings);
        let customs = customs_area_sample(at, &settings);
        for ok in [
            post(&client, &format!("{base_url}/waiting_area"), &waiting).await?,
            post(&client, &format!("{base_url}/customs_area"), &customs).await?,
        ] {
            if ok {
                sent += 1;
            } else {
                rejected += 1;
            }
        }
    }

    info!(sent, rejected, days, step_minutes, "seeded {base_url}");
    Ok(())
}

async fn post<T: Serialize>(client: &Client, url: &str, body: &T) -> Result<bool, reqwest::Error> {
    let response = client.post(url).json(body).send().await?;
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        warn!(%status, "{url} rejected sample: {text}");
        return Ok(false);
    }
    Ok(true)
}
