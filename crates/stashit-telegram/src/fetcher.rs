use async_trait::async_trait;

use teloxide::{net::Download, prelude::*};

use stashit_core::{domain::FileRef, errors::Error, ports::FileFetcher, Result};

/// `FileFetcher` over the Telegram Bot API: resolve the file reference via
/// `getFile`, then stream the download into memory. No temp files.
#[derive(Clone)]
pub struct TelegramFetcher {
    bot: Bot,
}

impl TelegramFetcher {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl FileFetcher for TelegramFetcher {
    async fn fetch(&self, file_ref: &FileRef) -> Result<Vec<u8>> {
        let file = self
            .bot
            .get_file(file_ref.0.clone())
            .await
            .map_err(|e| Error::Retrieval(format!("telegram file info error: {e}")))?;

        let mut buf: Vec<u8> = Vec::new();
        self.bot
            .download_file(&file.path, &mut buf)
            .await
            .map_err(|e| Error::Retrieval(format!("telegram download error: {e}")))?;

        Ok(buf)
    }
}
