// CSV file source written by the sensor server
use crate::application::sample_source::SampleSource;
use anyhow::Context;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FileSampleSource {
    path: PathBuf,
}

impl FileSampleSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl SampleSource for FileSampleSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn read_contents(&self) -> anyhow::Result<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", self.path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSampleSource::new(dir.path().join("absent.csv"));
        assert!(source.read_contents().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSampleSource::new(dir.path().to_path_buf());
        assert!(source.read_contents().await.is_err());
    }

    #[tokio::test]
    async fn test_reads_file_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1700000000,0.42").unwrap();
        let source = FileSampleSource::new(file.path().to_path_buf());
        assert_eq!(
            source.read_contents().await.unwrap(),
            Some(b"1700000000,0.42\n".to_vec())
        );
    }
}
