// Message endpoints
//
// Uplink message listing and per-device message counters.

use tracing::debug;

use crate::client::SigfoxClient;
use crate::error::Error;
use crate::models::{Message, MessageStats, Page};
use crate::paginate::PageMode;

impl SigfoxClient {
    /// List a device's messages, newest first.
    ///
    /// `GET /devices/{id}/messages[?since=<epoch ms>]`. The query parameter is
    /// only sent when `since` is given.
    pub async fn get_device_messages(
        &self,
        dev_id: &str,
        since: Option<i64>,
    ) -> Result<Page<Message>, Error> {
        self.get_device_messages_paged(dev_id, since, PageMode::FirstPage)
            .await
    }

    /// Like [`get_device_messages`](Self::get_device_messages), with control
    /// over how many pages are walked.
    pub async fn get_device_messages_paged(
        &self,
        dev_id: &str,
        since: Option<i64>,
        mode: PageMode,
    ) -> Result<Page<Message>, Error> {
        let mut url = self.endpoint(&["devices", dev_id, "messages"])?;
        if let Some(since) = since {
            url.query_pairs_mut()
                .append_pair("since", &since.to_string());
        }
        debug!(dev_id, ?since, ?mode, "listing device messages");
        self.get_paged(url, mode).await
    }

    /// Message counts for the last day, week and month.
    ///
    /// `GET /devices/{id}/messages/metric`
    pub async fn get_device_message_number(&self, dev_id: &str) -> Result<MessageStats, Error> {
        let url = self.endpoint(&["devices", dev_id, "messages", "metric"])?;
        debug!(dev_id, "fetching message metrics");
        self.get(url).await
    }
}
