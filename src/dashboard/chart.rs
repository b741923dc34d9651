use super::error::DashboardError;
use crate::models::{ChartPayload, Dataset, DatasetRole};
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartId {
    WaitingArea,
    CustomsArea,
}

impl ChartId {
    pub fn element_id(self) -> &'static str {
        match self {
            ChartId::WaitingArea => "waitingAreaChart",
            ChartId::CustomsArea => "customsAreaChart",
        }
    }

    pub fn kind(self) -> ChartKind {
        match self {
            ChartId::WaitingArea => ChartKind::StackedBar,
            ChartId::CustomsArea => ChartKind::Line,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ChartId::WaitingArea => "Stacked Bar Chart - Waiting Area",
            ChartId::CustomsArea => "Line Chart - Customs Area",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    StackedBar,
    Line,
}

impl ChartKind {
    fn chart_type(self) -> &'static str {
        match self {
            ChartKind::StackedBar => "bar",
            ChartKind::Line => "line",
        }
    }

    fn is_stacked(self) -> bool {
        matches!(self, ChartKind::StackedBar)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub dataset: Dataset,
    pub hidden: bool,
    /// Legend override; `None` defers to `hidden`.
    pub meta_hidden: Option<bool>,
}

impl Series {
    fn new(dataset: Dataset) -> Self {
        let hidden = dataset.role.hidden_by_default();
        Self {
            dataset,
            hidden,
            meta_hidden: None,
        }
    }

    pub fn role(&self) -> DatasetRole {
        self.dataset.role
    }

    pub fn is_visible(&self) -> bool {
        !self.meta_hidden.unwrap_or(self.hidden)
    }

    pub fn is_overlay(&self) -> bool {
        self.dataset.role.is_overlay()
    }
}

#[derive(Debug, Clone)]
pub struct Chart {
    id: ChartId,
    labels: Vec<String>,
    series: Vec<Series>,
    revision: u64,
}

impl Chart {
    pub fn new(id: ChartId, payload: &ChartPayload) -> Result<Self, DashboardError> {
        payload.validate()?;

        let (overlays, stacked): (Vec<&Dataset>, Vec<&Dataset>) = payload
            .datasets
            .iter()
            .partition(|dataset| dataset.role.is_overlay());
        let series = stacked
            .into_iter()
            .chain(overlays)
            .cloned()
            .map(Series::new)
            .collect();

        Ok(Self {
            id,
            labels: payload.labels.clone(),
            series,
            revision: 0,
        })
    }

    pub fn id(&self) -> ChartId {
        self.id
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn series_for(&self, role: DatasetRole) -> Option<&Series> {
        self.series.iter().find(|series| series.role() == role)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn update(&mut self, payload: &ChartPayload) -> Result<(), DashboardError> {
        payload.validate()?;

        let points = payload.labels.len();
        self.labels = payload.labels.clone();
        for series in &mut self.series {
            match payload.dataset(series.role()) {
                Some(dataset) => series.dataset.data = dataset.data.clone(),
                None => series.dataset.data.resize(points, 0.0),
            }
        }
        self.revision += 1;
        Ok(())
    }

    pub fn toggle_legend(&mut self, index: usize) -> Option<bool> {
        let series = self.series.get_mut(index)?;
        series.meta_hidden = match series.meta_hidden {
            None => Some(!series.hidden),
            Some(_) => None,
        };
        let visible = series.is_visible();
        self.revision += 1;
        Some(visible)
    }

    pub fn config(&self) -> Value {
        let kind = self.id.kind();
        let datasets: Vec<Value> = self
            .series
            .iter()
            .map(|series| {
                let dataset = &series.dataset;
                let hidden = !series.is_visible();
                let mut value = json!({
                    "label": dataset.label,
                    "data": dataset.data,
                    "borderColor": dataset.border_color,
                    "borderWidth": dataset.border_width,
                    "backgroundColor": dataset.background_color,
                    "fill": dataset.fill,
                    "hidden": hidden,
                });
                if series.is_overlay() {
                    value["type"] = json!("line");
                    value["order"] = json!(0);
                } else {
                    value["order"] = json!(1);
                }
                value
            })
            .collect();

        json!({
            "type": kind.chart_type(),
            "data": {
                "labels": self.labels,
                "datasets": datasets,
            },
            "options": {
                "responsive": true,
                "plugins": {
                    "title": { "display": true, "text": self.id.title() },
                },
                "scales": {
                    "x": { "stacked": kind.is_stacked() },
                    "y": { "stacked": kind.is_stacked() },
                },
                "elements": {
                    "line": { "tension": 0.4 },
                },
            },
        })
    }

    pub fn summary(&self) -> String {
        let latest: Vec<String> = self
            .series
            .iter()
            .filter(|series| series.is_visible())
            .map(|series| match series.dataset.data.last() {
                Some(value) => format!("{}={value}", series.dataset.label),
                None => format!("{}=-", series.dataset.label),
            })
            .collect();
        format!(
            "{} [{} points] {}",
            self.id.title(),
            self.labels.len(),
            latest.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(roles: &[DatasetRole], points: usize) -> ChartPayload {
        ChartPayload {
            labels: (0..points).map(|i| format!("2026-01-05 10:0{i}:00")).collect(),
            datasets: roles
                .iter()
                .enumerate()
                .map(|(i, &role)| Dataset::for_role(role, vec![i as f64; points]))
                .collect(),
        }
    }

    fn customs() -> ChartPayload {
        payload(
            &[
                DatasetRole::EntrancePoint,
                DatasetRole::ExitPoint,
                DatasetRole::CurrentPeopleCount,
            ],
            3,
        )
    }

    #[test]
    fn matching_payloads_build_for_any_length() {
        for points in [0, 1, 5, 40] {
            let chart = Chart::new(ChartId::WaitingArea, &payload(&DatasetRole::WAITING_AREA, points))
                .unwrap();
            assert_eq!(chart.labels().len(), points);
            assert_eq!(chart.series().len(), 4);
        }
    }

    #[test]
    fn mismatched_payload_is_rejected() {
        let mut bad = customs();
        bad.datasets[1].data.pop();
        assert!(matches!(
            Chart::new(ChartId::CustomsArea, &bad),
            Err(DashboardError::Payload(_))
        ));
    }

    #[test]
    fn overlay_series_renders_last() {
        let chart = Chart::new(ChartId::CustomsArea, &customs()).unwrap();
        let roles: Vec<_> = chart.series().iter().map(Series::role).collect();
        assert_eq!(
            roles,
            vec![
                DatasetRole::ExitPoint,
                DatasetRole::CurrentPeopleCount,
                DatasetRole::EntrancePoint,
            ]
        );

        let config = chart.config();
        let datasets = config["data"]["datasets"].as_array().unwrap();
        let last = datasets.last().unwrap();
        assert_eq!(last["label"], "Entrance Point Count (Customs Area)");
        assert_eq!(last["type"], "line");
        assert_eq!(last["order"], 0);
    }

    #[test]
    fn waiting_chart_is_stacked_bar_with_hidden_totals() {
        let chart = Chart::new(ChartId::WaitingArea, &payload(&DatasetRole::WAITING_AREA, 2)).unwrap();
        let config = chart.config();
        assert_eq!(config["type"], "bar");
        assert_eq!(config["options"]["scales"]["y"]["stacked"], true);
        assert_eq!(config["options"]["plugins"]["title"]["text"], "Stacked Bar Chart - Waiting Area");

        assert!(chart.series_for(DatasetRole::TakenSeats).unwrap().is_visible());
        assert!(!chart.series_for(DatasetRole::TotalSeats).unwrap().is_visible());
        assert!(!chart.series_for(DatasetRole::TotalPeople).unwrap().is_visible());
    }

    #[test]
    fn customs_chart_is_unstacked_line() {
        let config = Chart::new(ChartId::CustomsArea, &customs()).unwrap().config();
        assert_eq!(config["type"], "line");
        assert_eq!(config["options"]["scales"]["x"]["stacked"], false);
    }

    #[test]
    fn legend_toggle_twice_restores_visibility() {
        let mut chart = Chart::new(ChartId::WaitingArea, &payload(&DatasetRole::WAITING_AREA, 2)).unwrap();
        for index in 0..chart.series().len() {
            let before = chart.series()[index].is_visible();
            assert_eq!(chart.toggle_legend(index), Some(!before));
            assert_eq!(chart.toggle_legend(index), Some(before));
            assert_eq!(chart.series()[index].meta_hidden, None);
        }
        assert_eq!(chart.toggle_legend(99), None);
    }

    #[test]
    fn update_matches_series_by_role() {
        let mut chart = Chart::new(ChartId::CustomsArea, &customs()).unwrap();
        let mut next = ChartPayload {
            labels: vec!["a".to_string(), "b".to_string()],
            datasets: vec![
                Dataset::for_role(DatasetRole::ExitPoint, vec![7.0, 8.0]),
                Dataset::for_role(DatasetRole::EntrancePoint, vec![1.0, 2.0]),
            ],
        };

        chart.update(&next).unwrap();
        assert_eq!(chart.revision(), 1);
        assert_eq!(chart.labels(), ["a", "b"]);
        assert_eq!(chart.series_for(DatasetRole::ExitPoint).unwrap().dataset.data, vec![7.0, 8.0]);
        assert_eq!(chart.series_for(DatasetRole::EntrancePoint).unwrap().dataset.data, vec![1.0, 2.0]);
        assert_eq!(
            chart.series_for(DatasetRole::CurrentPeopleCount).unwrap().dataset.data.len(),
            2
        );

        next.datasets[0].data.push(9.0);
        assert!(chart.update(&next).is_err());
        assert_eq!(chart.revision(), 1);
        assert_eq!(chart.labels(), ["a", "b"]);
    }
}
