// Dashboard service - Use case for building the dashboard on each request
use crate::application::series_loader::SeriesLoader;
use crate::domain::dashboard::DashboardView;
use crate::domain::series::LoadReport;

#[derive(Clone)]
pub struct DashboardService {
    loader: SeriesLoader,
}

impl DashboardService {
    pub fn new(loader: SeriesLoader) -> Self {
        Self { loader }
    }

    /// Re-read the data file and render it. Nothing is cached between calls,
    /// so readings appended by the sensor server show up on the next request.
    pub async fn get_dashboard(&self) -> (DashboardView, LoadReport) {
        let load = self.loader.load().await;
        (DashboardView::render(load.series), load.report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::series::Summary;
    use crate::infrastructure::file_source::FileSampleSource;
    use std::io::Write;
    use std::sync::Arc;

    fn service_for(path: &std::path::Path) -> DashboardService {
        let source = Arc::new(FileSampleSource::new(path.to_path_buf()));
        DashboardService::new(SeriesLoader::new(source))
    }

    #[tokio::test]
    async fn test_missing_file_renders_absent_summary() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_for(&dir.path().join("data.csv"));

        let (view, report) = service.get_dashboard().await;
        assert_eq!(view.summary, Summary::Absent);
        assert!(view.table_rows.is_empty());
        assert!(view.chart_series.is_empty());
        assert!(!report.source_available);
    }

    #[tokio::test]
    async fn test_summary_follows_last_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1700000000,0.10").unwrap();
        writeln!(file, "1700000060,0.55").unwrap();
        let service = service_for(file.path());

        let (view, _) = service.get_dashboard().await;
        assert_eq!(view.chart_series.len(), 2);
        match view.summary {
            Summary::Latest {
                timestamp,
                percentage,
            } => {
                assert_eq!(timestamp.timestamp(), 1_700_000_060);
                assert!((percentage - 55.0).abs() < 1e-9);
            }
            Summary::Absent => panic!("expected a latest reading"),
        }
    }

    #[tokio::test]
    async fn test_appends_visible_on_next_request() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1700000000,0.10").unwrap();
        let service = service_for(file.path());

        let (before, _) = service.get_dashboard().await;
        assert_eq!(before.table_rows.len(), 1);

        writeln!(file, "1700000060,0.20").unwrap();
        let (after, _) = service.get_dashboard().await;
        assert_eq!(after.table_rows.len(), 2);
    }

    #[tokio::test]
    async fn test_repeated_render_is_identical() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1700000000,0.10").unwrap();
        writeln!(file, "garbage").unwrap();
        writeln!(file, "1700000060,0.55").unwrap();
        let service = service_for(file.path());

        let first = service.get_dashboard().await;
        let second = service.get_dashboard().await;
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_vec(&first.0).unwrap(),
            serde_json::to_vec(&second.0).unwrap()
        );
    }
}
