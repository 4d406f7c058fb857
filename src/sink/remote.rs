//! Fire-and-forget delivery to a remote JSON endpoint.

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::Error;
use crate::sink::record::DispatchRecord;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Remote endpoint sink: best-effort, at-most-once delivery.
///
/// Failures are logged and never retried; the next dispatch cycle
/// supersedes whatever was lost. No acknowledgment is needed for local
/// state to stay correct.
#[derive(Debug, Clone)]
pub struct RemoteSink {
    client: reqwest::Client,
    endpoint: String,
}

impl RemoteSink {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST one record as JSON. A non-success status is an error like any
    /// transport failure; callers observe it only for logging.
    pub async fn send(&self, record: &DispatchRecord) -> Result<(), Error> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(record)
            .send()
            .await?;
        response.error_for_status()?;
        debug!(endpoint = %self.endpoint, zone = record.zone.as_deref(), "record delivered");
        Ok(())
    }

    /// Detach delivery onto the async runtime so the detection cycle
    /// never waits on the network. Outside a Tokio runtime the record is
    /// dropped with a warning, which is within the at-most-once contract.
    pub fn send_detached(&self, record: DispatchRecord) {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let sink = self.clone();
                handle.spawn(async move {
                    if let Err(err) = sink.send(&record).await {
                        warn!(error = %err, endpoint = %sink.endpoint, "remote delivery failed");
                    }
                });
            }
            Err(_) => warn!(endpoint = %self.endpoint, "no async runtime, record dropped"),
        }
    }
}
