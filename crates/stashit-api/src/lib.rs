//! StashIt ingestion API client.
//!
//! Implements the core `IngestApi` port with single-attempt JSON POSTs.
//! Only transport-level failures are errors: any HTTP response that makes
//! it back counts as accepted, and the body is kept as an opaque
//! diagnostic with best-effort structure.

use async_trait::async_trait;

use stashit_core::{
    domain::{Item, LinkOutcome, LinkRequest, Submission, UserId},
    errors::Error,
    ports::IngestApi,
    Result,
};

#[derive(Clone, Debug)]
pub struct StashItClient {
    ingest_url: String,
    link_url: String,
    http: reqwest::Client,
}

impl StashItClient {
    pub fn new(ingest_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("reqwest client build");
        let ingest_url = ingest_url.into();
        let link_url = link_endpoint(&ingest_url);
        Self {
            ingest_url,
            link_url,
            http,
        }
    }
}

#[async_trait]
impl IngestApi for StashItClient {
    async fn submit(&self, item: &Item) -> Result<Submission> {
        let resp = self
            .http
            .post(&self.ingest_url)
            .json(item)
            .send()
            .await
            .map_err(|e| Error::Submission(format!("ingest request error: {e}")))?;

        let status = resp.status();
        let raw = resp.text().await.unwrap_or_default();
        let parsed = serde_json::from_str(&raw).ok();

        tracing::debug!(status = status.as_u16(), "item submitted");

        Ok(Submission { raw, parsed })
    }

    async fn link(&self, code: &str, sender: UserId) -> Result<LinkOutcome> {
        let req = LinkRequest {
            code: code.to_string(),
            telegram_user_id: sender.0,
        };

        let resp = self
            .http
            .post(&self.link_url)
            .json(&req)
            .send()
            .await
            .map_err(|e| Error::Submission(format!("link request error: {e}")))?;

        let raw = resp.text().await.unwrap_or_default();
        Ok(parse_link_outcome(&raw))
    }
}

/// The link endpoint lives next to the ingest endpoint: the original bot
/// swapped the `/ingest/telegram` suffix for `/link-telegram`.
fn link_endpoint(ingest_url: &str) -> String {
    if ingest_url.contains("/ingest/telegram") {
        ingest_url.replace("/ingest/telegram", "/link-telegram")
    } else {
        format!("{}/link-telegram", ingest_url.trim_end_matches('/'))
    }
}

fn parse_link_outcome(raw: &str) -> LinkOutcome {
    serde_json::from_str(raw).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_endpoint_swaps_ingest_suffix() {
        assert_eq!(
            link_endpoint("https://stashit.app/api/ingest/telegram"),
            "https://stashit.app/api/link-telegram"
        );
    }

    #[test]
    fn link_endpoint_appends_when_suffix_absent() {
        assert_eq!(
            link_endpoint("https://stashit.app/api/"),
            "https://stashit.app/api/link-telegram"
        );
    }

    #[test]
    fn link_outcome_parsing_is_tolerant() {
        let ok = parse_link_outcome(r#"{"success":true}"#);
        assert!(ok.success);

        let failed = parse_link_outcome(r#"{"success":false,"error":"expired"}"#);
        assert!(!failed.success);
        assert_eq!(failed.error.as_deref(), Some("expired"));

        let garbage = parse_link_outcome("<html>502</html>");
        assert!(!garbage.success);
        assert!(garbage.error.is_none());
    }
}
