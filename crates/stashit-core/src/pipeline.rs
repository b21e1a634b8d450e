//! Per-message pipeline coordination.
//!
//! One pipeline run per inbound message: normalize, then for attachments
//! fetch → store → submit, then reply. Failures are converted to reply
//! text at this boundary; nothing escapes a run, so concurrent messages
//! cannot affect each other.

use std::sync::Arc;

use crate::{
    domain::{Item, ItemKind, UserId},
    normalize::{normalize, Command, InboundMessage, Intent, SaveRequest},
    ports::{FileFetcher, IngestApi, ObjectStore},
    Result,
};

pub const WELCOME_REPLY: &str = "Welcome to StashIt Bot! Send me any text, link, or file and I \
                                 will save it to your StashIt account.";

pub struct Pipeline {
    fetcher: Arc<dyn FileFetcher>,
    store: Arc<dyn ObjectStore>,
    api: Arc<dyn IngestApi>,
}

impl Pipeline {
    pub fn new(
        fetcher: Arc<dyn FileFetcher>,
        store: Arc<dyn ObjectStore>,
        api: Arc<dyn IngestApi>,
    ) -> Self {
        Self {
            fetcher,
            store,
            api,
        }
    }

    /// Handle one inbound message and produce the reply to send, if any.
    ///
    /// Infallible by design: every pipeline-stage error becomes reply text
    /// here. `None` means intentional silence (unhandled message shapes).
    pub async fn handle(&self, msg: &InboundMessage) -> Option<String> {
        match normalize(msg) {
            Intent::Command(Command::Welcome) => Some(WELCOME_REPLY.to_string()),
            Intent::Command(Command::Link { code }) => Some(self.link(&code, msg.sender).await),
            Intent::Note { content } => Some(self.save_note(content, msg.sender).await),
            Intent::Save(req) => Some(self.save_attachment(req, msg.sender).await),
            Intent::Unhandled => None,
        }
    }

    async fn save_note(&self, content: String, sender: UserId) -> String {
        let item = Item::note(content, sender);
        match self.api.submit(&item).await {
            Ok(_) => "Saved to StashIt!".to_string(),
            Err(e) => {
                tracing::warn!(user_id = sender.0, "note submission failed: {e}");
                failure_reply(ItemKind::Note, &e)
            }
        }
    }

    async fn save_attachment(&self, req: SaveRequest, sender: UserId) -> String {
        match self.run_attachment(&req, sender).await {
            Ok(()) => format!("{} saved to StashIt!", req.kind.label()),
            Err(e) => {
                tracing::warn!(
                    user_id = sender.0,
                    kind = req.kind.source_word(),
                    file_name = %req.file_name,
                    "attachment pipeline failed: {e}"
                );
                failure_reply(req.kind, &e)
            }
        }
    }

    /// fetch → store → submit. A retrieval failure stops before any
    /// upload; a submission failure after a successful upload leaves the
    /// stored object orphaned (logged, never rolled back).
    async fn run_attachment(&self, req: &SaveRequest, sender: UserId) -> Result<()> {
        let bytes = self.fetcher.fetch(&req.file_ref).await?;

        let stored = self
            .store
            .store(bytes, &req.file_name, &req.mime_type)
            .await?;

        let item = Item::file(req.kind, &stored, &req.file_name, sender);
        if let Err(e) = self.api.submit(&item).await {
            tracing::warn!(key = %stored.key, "submission failed after upload, object orphaned");
            return Err(e);
        }

        tracing::info!(
            user_id = sender.0,
            kind = req.kind.source_word(),
            key = %stored.key,
            "item ingested"
        );
        Ok(())
    }

    async fn link(&self, code: &str, sender: UserId) -> String {
        match self.api.link(code, sender).await {
            Ok(out) if out.success => {
                "✅ Your Telegram is now linked to your StashIt account!".to_string()
            }
            Ok(out) => format!(
                "❌ Failed to link: {}",
                out.error.as_deref().unwrap_or("Unknown error")
            ),
            Err(e) => format!("❌ Failed to link: {e}"),
        }
    }
}

fn failure_reply(kind: ItemKind, err: &crate::Error) -> String {
    format!("Failed to save {}: {err}", kind.source_word())
}
