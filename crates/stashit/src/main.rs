use std::sync::Arc;

use stashit_api::StashItClient;
use stashit_core::{
    config::Config,
    ports::{IngestApi, ObjectStore},
};
use stashit_storage::{S3Gateway, S3GatewayConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stashit_core::logging::init("stashit")?;

    let cfg = Arc::new(Config::load()?);

    let store: Arc<dyn ObjectStore> = Arc::new(S3Gateway::new(S3GatewayConfig {
        endpoint_url: cfg.storage_url.clone(),
        region: cfg.storage_region.clone(),
        access_key_id: cfg.storage_access_key.clone(),
        secret_access_key: cfg.storage_secret_key.clone(),
        bucket: cfg.storage_bucket.clone(),
        public_access: cfg.storage_public,
    })?);

    let api: Arc<dyn IngestApi> = Arc::new(StashItClient::new(cfg.stashit_api_url.clone()));

    stashit_telegram::router::run_polling(cfg, store, api).await
}
