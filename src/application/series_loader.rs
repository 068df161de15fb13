// Series loader - Reads the data file and normalizes it into a series
use crate::application::sample_source::SampleSource;
use crate::domain::sample::LineOutcome;
use crate::domain::series::{LoadReport, Series, SeriesLoad};
use std::sync::Arc;

#[derive(Clone)]
pub struct SeriesLoader {
    source: Arc<dyn SampleSource>,
}

impl SeriesLoader {
    pub fn new(source: Arc<dyn SampleSource>) -> Self {
        Self { source }
    }

    /// Load the current series. Never fails: an unreadable source yields an
    /// empty series and malformed lines are skipped, so the dashboard keeps
    /// rendering while the sensor server is idle or mid-write.
    pub async fn load(&self) -> SeriesLoad {
        let contents = match self.source.read_contents().await {
            Ok(Some(contents)) => contents,
            Ok(None) => {
                tracing::debug!("No data at {} yet", self.source.describe());
                return SeriesLoad::default();
            }
            Err(e) => {
                tracing::warn!("Could not read {}: {:#}", self.source.describe(), e);
                return SeriesLoad::default();
            }
        };

        let load = parse_contents(&contents);
        tracing::debug!(
            "Loaded {} samples from {} ({} lines, {} skipped, {} blank)",
            load.series.len(),
            self.source.describe(),
            load.report.lines_read,
            load.report.skipped_lines,
            load.report.blank_lines
        );
        load
    }
}

/// Parse raw file contents record by record
pub fn parse_contents(contents: &[u8]) -> SeriesLoad {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(contents);

    let mut report = LoadReport {
        source_available: true,
        ..LoadReport::unavailable()
    };
    let mut samples = Vec::new();
    let mut records = 0;

    for result in reader.byte_records() {
        records += 1;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!("Skipping record {}: {}", records, e);
                report.skipped_lines += 1;
                continue;
            }
        };

        let fields: Vec<&[u8]> = record.iter().collect();
        match LineOutcome::classify(&fields) {
            LineOutcome::Sample(raw) => samples.push(raw.normalize()),
            LineOutcome::Blank => report.blank_lines += 1,
            LineOutcome::Malformed(e) => {
                let line = record.position().map_or(records as u64, |p| p.line());
                tracing::debug!("Skipping line {}: {}", line, e);
                report.skipped_lines += 1;
            }
        }
    }

    // the reader drops empty lines without yielding a record
    report.lines_read = line_count(contents).max(records);
    report.blank_lines += report.lines_read - records;
    report.samples = samples.len();
    SeriesLoad {
        series: Series::new(samples),
        report,
    }
}

fn line_count(contents: &[u8]) -> usize {
    let newlines = contents.iter().filter(|b| **b == b'\n').count();
    match contents.last() {
        None | Some(b'\n') => newlines,
        Some(_) => newlines + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::DateTime;

    struct FixedSource(anyhow::Result<Option<Vec<u8>>>);

    #[async_trait]
    impl SampleSource for FixedSource {
        fn describe(&self) -> String {
            "fixture".to_string()
        }

        async fn read_contents(&self) -> anyhow::Result<Option<Vec<u8>>> {
            match &self.0 {
                Ok(contents) => Ok(contents.clone()),
                Err(e) => Err(anyhow::anyhow!("{}", e)),
            }
        }
    }

    fn loader(result: anyhow::Result<Option<Vec<u8>>>) -> SeriesLoader {
        SeriesLoader::new(Arc::new(FixedSource(result)))
    }

    #[test]
    fn test_parse_single_line() {
        let load = parse_contents(b"1700000000,0.42\n");
        assert_eq!(load.series.len(), 1);
        let sample = load.series.samples()[0];
        assert_eq!(sample.timestamp, DateTime::from_timestamp(1_700_000_000, 0).unwrap());
        assert!((sample.percentage - 42.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_preserves_file_order() {
        let load = parse_contents(b"1700000060,0.55\n1700000000,0.10\n1700000120,0.30\n");
        let seconds: Vec<i64> = load.series.samples().iter().map(|s| s.timestamp.timestamp()).collect();
        assert_eq!(seconds, vec![1_700_000_060, 1_700_000_000, 1_700_000_120]);
    }

    #[test]
    fn test_parse_skips_malformed_line() {
        let load = parse_contents(b"1700000000,0.10\nnot,a,reading\n1700000060,0.55\n17000001");
        assert_eq!(load.series.len(), 2);
        assert_eq!(
            load.report,
            LoadReport {
                source_available: true,
                lines_read: 4,
                samples: 2,
                blank_lines: 0,
                skipped_lines: 2,
            }
        );
        let percentages: Vec<f64> = load.series.samples().iter().map(|s| s.percentage).collect();
        assert_eq!(percentages, vec![0.10 * 100.0, 0.55 * 100.0]);
    }

    #[test]
    fn test_parse_counts_blank_lines() {
        let load = parse_contents(b"\n1700000000,0.10\r\n\r\n1700000060,0.55\n");
        let r = load.report;
        assert_eq!(r.samples, 2);
        assert_eq!(r.blank_lines, 2);
        assert_eq!(r.samples + r.blank_lines + r.skipped_lines, r.lines_read);
    }

    #[test]
    fn test_parse_quoted_fields() {
        let load = parse_contents(b"\"1700000000\",\"0.42\"\n1700000060, 0.55\n");
        assert_eq!(load.series.len(), 2);
        assert_eq!(load.report.skipped_lines, 0);
        assert!((load.series.samples()[0].percentage - 42.0).abs() < 1e-9);
        assert_eq!(load.series.samples()[1].timestamp.timestamp(), 1_700_000_060);
    }

    #[test]
    fn test_parse_skips_invalid_utf8_record() {
        let load = parse_contents(b"1700000000,0.10\n17\xff,0.20\n1700000060,0.55\n");
        assert_eq!(load.series.len(), 2);
        assert_eq!(load.report.skipped_lines, 1);
        assert_eq!(load.report.lines_read, 3);
    }

    #[test]
    fn test_parse_empty_contents() {
        let load = parse_contents(b"");
        assert!(load.series.is_empty());
        assert!(load.report.source_available);
        assert_eq!(load.report.lines_read, 0);
    }

    #[tokio::test]
    async fn test_load_missing_source_is_empty() {
        let load = loader(Ok(None)).load().await;
        assert!(load.series.is_empty());
        assert!(!load.report.source_available);
    }

    #[tokio::test]
    async fn test_load_unreadable_source_is_empty() {
        let load = loader(Err(anyhow::anyhow!("permission denied"))).load().await;
        assert!(load.series.is_empty());
        assert_eq!(load.report, LoadReport::unavailable());
    }

    #[tokio::test]
    async fn test_load_parses_contents() {
        let load = loader(Ok(Some(b"1700000000,0.10\n1700000060,0.55\n".to_vec())))
            .load()
            .await;
        assert_eq!(load.series.len(), 2);
        assert_eq!(load.report.samples, 2);
    }
}
