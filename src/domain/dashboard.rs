// Dashboard domain model
use super::sample::NormalizedSample;
use super::series::{Series, Summary};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub summary: Summary,
    pub table_rows: Vec<NormalizedSample>,
    pub chart_series: Series,
}

impl DashboardView {
    /// Pure projection of a series into the three dashboard widgets.
    /// No windowing or downsampling happens here.
    pub fn render(series: Series) -> Self {
        Self {
            summary: Summary::from_series(&series),
            table_rows: series.samples().to_vec(),
            chart_series: series,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chart_series.is_empty()
    }
}
