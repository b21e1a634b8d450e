use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use stashit_core::{
    config::Config,
    pipeline::Pipeline,
    ports::{FileFetcher, IngestApi, ObjectStore},
};

use crate::{handlers, TelegramFetcher};

pub struct AppState {
    pub pipeline: Arc<Pipeline>,
}

/// Run the long-polling loop until the process is stopped.
///
/// The storage and API adapters are built by the caller; the file fetcher
/// is built here because it needs the `Bot` handle.
pub async fn run_polling(
    cfg: Arc<Config>,
    store: Arc<dyn ObjectStore>,
    api: Arc<dyn IngestApi>,
) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    if let Ok(me) = bot.get_me().await {
        tracing::info!("stashit bot started: @{}", me.username());
    }

    let fetcher: Arc<dyn FileFetcher> = Arc::new(TelegramFetcher::new(bot.clone()));
    let pipeline = Arc::new(Pipeline::new(fetcher, store, api));
    let state = Arc::new(AppState { pipeline });

    let handler = dptree::entry().branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}
