pub mod chart;
pub mod client;
pub mod error;
pub mod filter;
pub mod panel;
pub mod refresh;

pub use chart::{Chart, ChartId, ChartKind, Series};
pub use client::{DashboardClient, DashboardSource};
pub use error::DashboardError;
pub use filter::DateFilter;
pub use panel::{StatField, StatsPanel, NO_DATA};
pub use refresh::Dashboard;
