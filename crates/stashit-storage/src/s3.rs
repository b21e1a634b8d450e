use async_trait::async_trait;
use bytes::Bytes;
use http::Method;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::signer::Signer;
use object_store::{
    Attribute, AttributeValue, Attributes, ObjectStore as _, ObjectStoreExt as _, PutMode,
    PutOptions, PutPayload, Result as ObjectResult,
};

use stashit_core::{
    domain::StoredObject,
    errors::{Error, StorageStage},
    ports::ObjectStore,
    Result,
};

use crate::{keys, SIGNED_URL_TTL};

/// Connection settings for an S3-compatible object store.
#[derive(Clone, Debug)]
pub struct S3GatewayConfig {
    /// Endpoint URL (e.g. "http://localhost:9000" for MinIO,
    /// "https://nyc3.digitaloceanspaces.com" for DigitalOcean Spaces).
    pub endpoint_url: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket: String,
    /// Whether objects in the bucket are publicly readable.
    pub public_access: bool,
}

/// S3-compatible gateway implementing the core `ObjectStore` port.
#[derive(Clone)]
pub struct S3Gateway {
    store: AmazonS3,
    bucket: String,
    endpoint_url: String,
    public_access: bool,
}

impl S3Gateway {
    pub fn new(cfg: S3GatewayConfig) -> Result<Self> {
        let allow_http = cfg.endpoint_url.starts_with("http://");
        let store = AmazonS3Builder::new()
            .with_region(cfg.region.clone())
            .with_bucket_name(cfg.bucket.clone())
            .with_endpoint(cfg.endpoint_url.clone())
            .with_allow_http(allow_http)
            .with_access_key_id(cfg.access_key_id.clone())
            .with_secret_access_key(cfg.secret_access_key.clone())
            .build()
            .map_err(|e| Error::Config(format!("storage client: {e}")))?;

        Ok(Self {
            store,
            bucket: cfg.bucket,
            endpoint_url: cfg.endpoint_url,
            public_access: cfg.public_access,
        })
    }

    /// Path-style public URL: `{endpoint}/{bucket}/{key}`.
    fn public_url(&self, key: &str) -> String {
        format!(
            "{}/{}/{}",
            self.endpoint_url.trim_end_matches('/'),
            self.bucket,
            key
        )
    }
}

#[async_trait]
impl ObjectStore for S3Gateway {
    async fn store(
        &self,
        data: Vec<u8>,
        file_name: &str,
        mime_type: &str,
    ) -> Result<StoredObject> {
        let key = keys::storage_key(file_name);
        let location = Path::from(key.clone());
        let size = data.len() as u64;
        let start = std::time::Instant::now();

        // Create-only: a key collision fails the upload instead of
        // overwriting the earlier object.
        let mut opts = PutOptions::from(PutMode::Create);
        opts.attributes = Attributes::from_iter([(
            Attribute::ContentType,
            AttributeValue::from(mime_type.to_string()),
        )]);

        let result: ObjectResult<_> = self
            .store
            .put_opts(&location, PutPayload::from(Bytes::from(data)), opts)
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "upload failed"
            );
            Error::Storage {
                stage: StorageStage::Upload,
                reason: e.to_string(),
            }
        })?;

        let signed: ObjectResult<_> = self
            .store
            .signed_url(Method::GET, &location, SIGNED_URL_TTL)
            .await;

        let signed_url = signed
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    "signed url issuance failed"
                );
                Error::Storage {
                    stage: StorageStage::Sign,
                    reason: e.to_string(),
                }
            })?
            .to_string();

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "upload successful"
        );

        let public_url = self.public_access.then(|| self.public_url(&key));

        Ok(StoredObject {
            key,
            mime_type: mime_type.to_string(),
            signed_url,
            public_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(public: bool) -> S3Gateway {
        S3Gateway::new(S3GatewayConfig {
            endpoint_url: "http://localhost:9000/".to_string(),
            region: "us-east-1".to_string(),
            access_key_id: "test".to_string(),
            secret_access_key: "test".to_string(),
            bucket: "stashit".to_string(),
            public_access: public,
        })
        .unwrap()
    }

    #[test]
    fn public_url_is_path_style() {
        let gw = gateway(true);
        assert_eq!(
            gw.public_url("1700_report.pdf"),
            "http://localhost:9000/stashit/1700_report.pdf"
        );
    }
}
