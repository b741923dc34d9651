//! Polls a running dashboard server and logs charts and statistics.
//!
//! Usage: `dashboard_watch [START END] [--export waiting_area|customs_area]`
//! where dates are `YYYY-MM-DD`. With `--export` the CSV for the selected
//! range is written to `EXPORT_DIR` and the program exits.

use chrono::{Local, NaiveDate};
use occupancy_dashboard::config::WatchSettings;
use occupancy_dashboard::dashboard::{Dashboard, DashboardClient};
use occupancy_dashboard::export::export_filename;
use occupancy_dashboard::models::{Area, parse_date};
use tokio::fs;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let settings = WatchSettings::from_env();
    let mut args: Vec<String> = std::env::args().skip(1).collect();

    let export = match args.iter().position(|arg| arg == "--export") {
        Some(index) => {
            let value = args
                .get(index + 1)
                .ok_or("--export needs an area")?
                .clone();
            args.drain(index..=index + 1);
            Some(Area::parse(&value).ok_or_else(|| format!("unknown area {value:?}"))?)
        }
        None => None,
    };

    let client = DashboardClient::new(settings.base_url.clone());
    let mut dashboard = Dashboard::new(client, Local::now().date_naive());

    if let Some((start, end)) = range_args(&args)? {
        dashboard.filter_mut().set_range(start, end)?;
    }

    if let Some(area) = export {
        let csv = dashboard.export(area).await?;
        let path = settings
            .export_dir
            .join(export_filename(area, &dashboard.filter().range()));
        fs::write(&path, csv).await?;
        info!("exported {} to {}", area.as_str(), path.display());
        return Ok(());
    }

    info!(
        url = %settings.base_url,
        range = %dashboard.filter().range_text(),
        "watching dashboard every {:?}",
        settings.refresh_interval
    );
    dashboard.load().await;
    dashboard.log_state();
    dashboard
        .run(settings.refresh_interval, async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                error!("failed to listen for shutdown signal: {err}");
                std::future::pending::<()>().await;
            }
        })
        .await;

    Ok(())
}

fn range_args(args: &[String]) -> Result<Option<(NaiveDate, NaiveDate)>, Box<dyn std::error::Error>> {
    match args {
        [] => Ok(None),
        [start, end] => Ok(Some((parse_date(start)?, parse_date(end)?))),
        other => Err(format!("expected START END dates, got {other:?}").into()),
    }
}
