// Source trait for raw sensor data access
use async_trait::async_trait;

#[async_trait]
pub trait SampleSource: Send + Sync {
    /// Human readable location of the data, used in logs
    fn describe(&self) -> String;

    /// Read the whole current contents of the data.
    /// `Ok(None)` means the data does not exist yet.
    async fn read_contents(&self) -> anyhow::Result<Option<Vec<u8>>>;
}
