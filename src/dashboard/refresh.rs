use super::chart::{Chart, ChartId};
use super::client::DashboardSource;
use super::error::DashboardError;
use super::filter::DateFilter;
use super::panel::StatsPanel;
use crate::models::{Area, ChartPayload, DateRangePayload};
use chrono::NaiveDate;
use std::{future::Future, time::Duration};
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, error, info, warn};

pub struct Dashboard<S> {
    source: S,
    filter: DateFilter,
    waiting_chart: Option<Chart>,
    customs_chart: Option<Chart>,
    panel: StatsPanel,
}

impl<S: DashboardSource> Dashboard<S> {
    pub fn new(source: S, today: NaiveDate) -> Self {
        Self {
            source,
            filter: DateFilter::new(today),
            waiting_chart: None,
            customs_chart: None,
            panel: StatsPanel::default(),
        }
    }

    pub fn filter(&self) -> &DateFilter {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut DateFilter {
        &mut self.filter
    }

    pub fn chart(&self, id: ChartId) -> Option<&Chart> {
        match id {
            ChartId::WaitingArea => self.waiting_chart.as_ref(),
            ChartId::CustomsArea => self.customs_chart.as_ref(),
        }
    }

    pub fn chart_mut(&mut self, id: ChartId) -> Option<&mut Chart> {
        match id {
            ChartId::WaitingArea => self.waiting_chart.as_mut(),
            ChartId::CustomsArea => self.customs_chart.as_mut(),
        }
    }

    pub fn panel(&self) -> &StatsPanel {
        &self.panel
    }

    pub async fn load(&mut self) {
        match self.source.waiting_area_data().await {
            Ok(payload) => self.install(ChartId::WaitingArea, &payload),
            Err(err) => error!("error loading waiting area chart: {err}"),
        }
        match self.source.customs_area_data().await {
            Ok(payload) => self.install(ChartId::CustomsArea, &payload),
            Err(err) => error!("error loading customs area chart: {err}"),
        }
        self.refresh().await;
    }

    pub async fn refresh(&mut self) {
        let range = self.filter.effective_range();
        debug!(start = %range.start, end = %range.end, "refreshing dashboard");

        match self.source.date_range(&range).await {
            Ok(payload) => self.update_charts(&payload),
            Err(err) => error!("error updating charts: {err}"),
        }
        match self.source.statistics(&range).await {
            Ok(stats) => self.panel.update(&stats),
            Err(err) => error!("error fetching statistics: {err}"),
        }
    }

    pub async fn apply(&mut self, start: NaiveDate, end: NaiveDate) -> Result<(), DashboardError> {
        self.filter.set_range(start, end)?;
        info!(%start, %end, "date filter applied");
        self.refresh().await;
        Ok(())
    }

    pub fn reset(&mut self, today: NaiveDate) {
        self.filter.reset(today);
    }

    pub async fn export(&self, area: Area) -> Result<String, DashboardError> {
        self.source.export_csv(&self.filter.range(), area).await
    }

    pub async fn run<F>(&mut self, period: Duration, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("dashboard refresh stopped");
                    return;
                }
                _ = ticker.tick() => {
                    self.refresh().await;
                    self.log_state();
                }
            }
        }
    }

    pub fn log_state(&self) {
        for chart in [&self.waiting_chart, &self.customs_chart].into_iter().flatten() {
            info!(chart = chart.id().element_id(), "{}", chart.summary());
        }
        let panel: Vec<String> = self
            .panel
            .iter()
            .map(|(selector, text)| format!("{selector}={text}"))
            .collect();
        info!("statistics: {}", panel.join(" "));
    }

    fn update_charts(&mut self, payload: &DateRangePayload) {
        self.update_chart(ChartId::WaitingArea, &payload.waiting_area);
        self.update_chart(ChartId::CustomsArea, &payload.customs_area);
    }

    fn update_chart(&mut self, id: ChartId, payload: &ChartPayload) {
        match self.chart_mut(id) {
            Some(chart) => {
                if let Err(err) = chart.update(payload) {
                    warn!(chart = id.element_id(), "ignoring chart update: {err}");
                }
            }
            None => self.install(id, payload),
        }
    }

    fn install(&mut self, id: ChartId, payload: &ChartPayload) {
        match Chart::new(id, payload) {
            Ok(chart) => match id {
                ChartId::WaitingArea => self.waiting_chart = Some(chart),
                ChartId::CustomsArea => self.customs_chart = Some(chart),
            },
            Err(err) => warn!(chart = id.element_id(), "cannot build chart: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::panel::{NO_DATA, StatField};
    use crate::models::{Dataset, DatasetRole, DateRange, StatisticsPayload};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Calls {
        waiting: usize,
        customs: usize,
        ranges: Vec<DateRange>,
        statistics: usize,
        exports: Vec<(DateRange, Area)>,
    }

    #[derive(Clone, Default)]
    struct FakeSource {
        calls: Arc<Mutex<Calls>>,
        fail_date_range: bool,
        stats: StatisticsPayload,
    }

    fn chart(roles: &[DatasetRole], points: usize) -> ChartPayload {
        ChartPayload {
            labels: (0..points).map(|i| format!("label {i}")).collect(),
            datasets: roles
                .iter()
                .map(|&role| Dataset::for_role(role, vec![points as f64; points]))
                .collect(),
        }
    }

    #[async_trait]
    impl DashboardSource for FakeSource {
        async fn waiting_area_data(&self) -> Result<ChartPayload, DashboardError> {
            self.calls.lock().unwrap().waiting += 1;
            Ok(chart(&DatasetRole::WAITING_AREA, 1))
        }

        async fn customs_area_data(&self) -> Result<ChartPayload, DashboardError> {
            self.calls.lock().unwrap().customs += 1;
            Ok(chart(&DatasetRole::CUSTOMS_AREA, 1))
        }

        async fn date_range(&self, range: &DateRange) -> Result<DateRangePayload, DashboardError> {
            self.calls.lock().unwrap().ranges.push(*range);
            if self.fail_date_range {
                return Err(DashboardError::RangeText("boom".to_string()));
            }
            Ok(DateRangePayload {
                waiting_area: chart(&DatasetRole::WAITING_AREA, 3),
                customs_area: chart(&DatasetRole::CUSTOMS_AREA, 3),
            })
        }

        async fn statistics(&self, _range: &DateRange) -> Result<StatisticsPayload, DashboardError> {
            self.calls.lock().unwrap().statistics += 1;
            Ok(self.stats.clone())
        }

        async fn export_csv(&self, range: &DateRange, area: Area) -> Result<String, DashboardError> {
            self.calls.lock().unwrap().exports.push((*range, area));
            Ok("timestamp\n".to_string())
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
    }

    #[tokio::test]
    async fn load_builds_charts_and_applies_filter() {
        let source = FakeSource {
            stats: StatisticsPayload {
                avg_occupancy_waiting: Some(25.0),
                ..Default::default()
            },
            ..Default::default()
        };
        let calls = Arc::clone(&source.calls);
        let mut dashboard = Dashboard::new(source, date(5));

        dashboard.load().await;

        let calls = calls.lock().unwrap();
        assert_eq!(calls.waiting, 1);
        assert_eq!(calls.customs, 1);
        assert_eq!(calls.ranges, vec![DateRange::single(date(5))]);
        assert_eq!(calls.statistics, 1);

        let waiting = dashboard.chart(ChartId::WaitingArea).unwrap();
        assert_eq!(waiting.labels().len(), 3);
        let customs = dashboard.chart(ChartId::CustomsArea).unwrap();
        assert_eq!(customs.series().last().unwrap().role(), DatasetRole::EntrancePoint);
        assert_eq!(dashboard.panel().text(StatField::AvgOccupancy), "25%");
    }

    #[tokio::test]
    async fn failed_chart_fetch_keeps_previous_state() {
        let source = FakeSource {
            fail_date_range: true,
            ..Default::default()
        };
        let mut dashboard = Dashboard::new(source, date(5));

        dashboard.load().await;

        let waiting = dashboard.chart(ChartId::WaitingArea).unwrap();
        assert_eq!(waiting.labels().len(), 1);
        assert_eq!(waiting.revision(), 0);
        assert_eq!(dashboard.panel().text(StatField::AvgOccupancy), NO_DATA);
    }

    #[tokio::test]
    async fn apply_and_reset_drive_the_filter() {
        let source = FakeSource::default();
        let calls = Arc::clone(&source.calls);
        let mut dashboard = Dashboard::new(source, date(5));

        dashboard.apply(date(1), date(3)).await.unwrap();
        assert!(dashboard.apply(date(4), date(2)).await.is_err());
        dashboard.export(Area::CustomsArea).await.unwrap();
        dashboard.reset(date(9));

        let calls = calls.lock().unwrap();
        assert_eq!(calls.ranges, vec![DateRange::new(date(1), date(3)).unwrap()]);
        assert_eq!(
            calls.exports,
            vec![(DateRange::new(date(1), date(3)).unwrap(), Area::CustomsArea)]
        );
        assert_eq!(dashboard.filter().effective_range(), DateRange::single(date(9)));
    }

    #[tokio::test(start_paused = true)]
    async fn timer_fetches_once_per_interval() {
        let source = FakeSource::default();
        let calls = Arc::clone(&source.calls);
        let mut dashboard = Dashboard::new(source, date(5));

        dashboard
            .run(
                Duration::from_secs(5),
                tokio::time::sleep(Duration::from_millis(15_500)),
            )
            .await;

        let calls = calls.lock().unwrap();
        assert_eq!(calls.ranges.len(), 3);
        assert_eq!(calls.statistics, 3);
        assert_eq!(calls.waiting, 0);
    }
}
